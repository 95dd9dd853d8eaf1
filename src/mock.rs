#![allow(dead_code)]

//! Mock container service for unit tests.

use crate::api::{ServiceInfo, ServiceStatus};
use crate::traits::ContainerService;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

/// Outcome of one optional collaborator operation.
#[derive(Clone)]
enum Op<T> {
    Missing,
    Ok(T),
    Fail(&'static str),
}

impl<T: Clone> Op<T> {
    fn run(&self) -> Option<anyhow::Result<T>> {
        match self {
            Op::Missing => None,
            Op::Ok(v) => Some(Ok(v.clone())),
            Op::Fail(msg) => Some(Err(anyhow::anyhow!(*msg))),
        }
    }
}

/// Container service whose operations are individually switched on, off, or
/// made to fail. Nothing is exposed by default.
pub struct MockContainerService {
    info: Op<ServiceInfo>,
    healthy: Op<bool>,
    status: Op<ServiceStatus>,
    start: Op<bool>,
    stop: Op<bool>,
    status_calls: AtomicU32,
}

impl MockContainerService {
    pub fn new() -> Self {
        Self {
            info: Op::Missing,
            healthy: Op::Missing,
            status: Op::Missing,
            start: Op::Missing,
            stop: Op::Missing,
            status_calls: AtomicU32::new(0),
        }
    }

    pub fn with_ports(self, ports: Vec<u16>) -> Self {
        self.with_service_info(ServiceInfo { ports, host: None })
    }

    pub fn with_service_info(mut self, info: ServiceInfo) -> Self {
        self.info = Op::Ok(info);
        self
    }

    pub fn with_info_failure(mut self) -> Self {
        self.info = Op::Fail("docker inspect failed");
        self
    }

    pub fn with_service_healthy(mut self, healthy: bool) -> Self {
        self.healthy = Op::Ok(healthy);
        self
    }

    pub fn with_health_failure(mut self) -> Self {
        self.healthy = Op::Fail("health probe crashed");
        self
    }

    pub fn with_status(mut self, running: bool, health: &str) -> Self {
        self.status = Op::Ok(ServiceStatus {
            running,
            health: health.to_string(),
        });
        self
    }

    pub fn with_status_failure(mut self) -> Self {
        self.status = Op::Fail("docker daemon unreachable");
        self
    }

    pub fn with_lifecycle(mut self, start: bool, stop: bool) -> Self {
        self.start = Op::Ok(start);
        self.stop = Op::Ok(stop);
        self
    }

    pub fn with_start_failure(mut self) -> Self {
        self.start = Op::Fail("container failed to start");
        self
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockContainerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerService for MockContainerService {
    fn name(&self) -> &str {
        "mock-container-service"
    }

    fn service_info(&self) -> Option<anyhow::Result<ServiceInfo>> {
        self.info.run()
    }

    async fn is_service_healthy(&self) -> Option<anyhow::Result<bool>> {
        self.healthy.run()
    }

    async fn service_status(&self) -> Option<anyhow::Result<ServiceStatus>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status.run()
    }

    async fn start_service(&self) -> Option<anyhow::Result<bool>> {
        self.start.run()
    }

    async fn stop_service(&self) -> Option<anyhow::Result<bool>> {
        self.stop.run()
    }
}
