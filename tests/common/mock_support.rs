//! Shared fixtures for integration tests: a configurable container service
//! and helpers that point it at a `mockito` server.

use async_trait::async_trait;
use cowsay_provider::api::{ServiceInfo, ServiceStatus};
use cowsay_provider::traits::ContainerService;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Container service with per-operation switches. Operations left unset are
/// reported as not exposed.
#[derive(Default)]
pub struct MockContainerService {
    info: Option<ServiceInfo>,
    healthy: Option<bool>,
    status: Option<ServiceStatus>,
    lifecycle: Option<bool>,
    fail_status: bool,
    ports_on_start: bool,
    started: AtomicBool,
    status_calls: AtomicU32,
    start_calls: AtomicU32,
    stop_calls: AtomicU32,
}

impl MockContainerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A running, healthy container whose port is bound on `server`.
    pub fn serving(server: &mockito::Server) -> Self {
        Self::new()
            .with_server(server)
            .with_status(true, "healthy")
    }

    pub fn with_server(mut self, server: &mockito::Server) -> Self {
        let addr = server.socket_address();
        self.info = Some(ServiceInfo {
            ports: vec![addr.port()],
            host: Some(addr.ip().to_string()),
        });
        self
    }

    pub fn with_service_info(mut self, info: ServiceInfo) -> Self {
        self.info = Some(info);
        self
    }

    pub fn with_service_healthy(mut self, healthy: bool) -> Self {
        self.healthy = Some(healthy);
        self
    }

    pub fn with_status(mut self, running: bool, health: &str) -> Self {
        self.status = Some(ServiceStatus {
            running,
            health: health.to_string(),
        });
        self
    }

    pub fn with_status_failure(mut self) -> Self {
        self.fail_status = true;
        self
    }

    /// Publish the service info only once `start_service` has run, the way a
    /// container gets its host port when it starts.
    pub fn with_ports_on_start(mut self) -> Self {
        self.ports_on_start = true;
        self
    }

    /// Expose start/stop, both returning `result`.
    pub fn with_lifecycle(mut self, result: bool) -> Self {
        self.lifecycle = Some(result);
        self
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> u32 {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> u32 {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl ContainerService for MockContainerService {
    fn name(&self) -> &str {
        "mock-container-service"
    }

    fn service_info(&self) -> Option<anyhow::Result<ServiceInfo>> {
        if self.ports_on_start && !self.started.load(Ordering::SeqCst) {
            return Some(Ok(ServiceInfo::default()));
        }
        self.info.clone().map(Ok)
    }

    async fn is_service_healthy(&self) -> Option<anyhow::Result<bool>> {
        self.healthy.map(Ok)
    }

    async fn service_status(&self) -> Option<anyhow::Result<ServiceStatus>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_status {
            return Some(Err(anyhow::anyhow!("docker daemon unreachable")));
        }
        self.status.clone().map(Ok)
    }

    async fn start_service(&self) -> Option<anyhow::Result<bool>> {
        let result = self.lifecycle?;
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.started.store(true, Ordering::SeqCst);
        Some(Ok(result))
    }

    async fn stop_service(&self) -> Option<anyhow::Result<bool>> {
        let result = self.lifecycle?;
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Some(Ok(result))
    }
}

/// Mock `POST /cowsay` answering `{"cowsayOutput": output}` for exactly
/// `{"text": text}`.
pub async fn mock_cowsay(
    server: &mut mockito::Server,
    text: &str,
    output: &str,
) -> mockito::Mock {
    server
        .mock("POST", "/cowsay")
        .match_body(mockito::Matcher::Json(serde_json::json!({ "text": text })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({ "cowsayOutput": output }).to_string())
        .create_async()
        .await
}

/// Mock `GET /health` answering with `status` and a healthy document.
pub async fn mock_health(server: &mut mockito::Server, status: usize) -> mockito::Mock {
    let body = if status < 400 {
        serde_json::json!({
            "status": "healthy",
            "service": "cowsay",
            "version": "cowsay available",
            "timestamp": 1_700_000_000.5
        })
    } else {
        serde_json::json!({
            "status": "unhealthy",
            "error": "cowsay command not found in any expected location"
        })
    };
    server
        .mock("GET", "/health")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}
