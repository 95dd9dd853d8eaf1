//! [`CowsayDockerProvider`]: the plugin entry point.
//!
//! Declares the provider's identity and its single model, proxies lifecycle
//! calls to the injected [`ContainerService`], and derives health from the
//! container's status plus reachability of the cowsay HTTP API. The API
//! address is looked up on every availability check, so a provider built
//! before the container starts sees the port assigned at start.

use crate::api::{
    HealthSnapshot, HealthStatus, MediaCapability, ModelDescriptor, Pricing, ProviderConfig,
    ProviderType, ServiceStatus,
};
use crate::client::CowsayApiClient;
use crate::error::{CowsayError, Result};
use crate::model::{
    CowsayDockerModel, MODEL_DESCRIPTION, MODEL_ID, MODEL_NAME, resolve_service_config,
};
use crate::traits::{ContainerService, MediaProvider, TextToTextModel};
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

pub const PROVIDER_ID: &str = "cowsay-docker-provider";
pub const PROVIDER_NAME: &str = "Cowsay Docker Provider";

const CAPABILITIES: &[MediaCapability] = &[MediaCapability::TextToText];

/// Provider exposing the `cowsay-default` model.
///
/// The container service is borrowed, not managed: starting and stopping it
/// is delegated, and its absence is tolerated by every operation.
pub struct CowsayDockerProvider {
    service: Option<Arc<dyn ContainerService>>,
    models: Vec<ModelDescriptor>,
    config: Mutex<ProviderConfig>,
}

impl CowsayDockerProvider {
    pub fn new(service: Arc<dyn ContainerService>) -> Result<Self> {
        Self::build(Some(service))
    }

    /// A provider with no container service. It reports itself unavailable
    /// and its lifecycle operations are no-ops.
    pub fn without_service() -> Result<Self> {
        Self::build(None)
    }

    fn build(service: Option<Arc<dyn ContainerService>>) -> Result<Self> {
        tracing::info!(
            provider = PROVIDER_ID,
            service = service.as_ref().map(|s| s.name()).unwrap_or("none"),
            "CowsayDockerProvider initialized"
        );

        Ok(Self {
            service,
            models: vec![Self::default_model_descriptor()],
            config: Mutex::new(ProviderConfig::default()),
        })
    }

    /// Register an additional descriptor. Descriptors without an
    /// implementation are listed but fail in [`get_model`](Self::get_model).
    pub fn with_model(mut self, descriptor: ModelDescriptor) -> Self {
        self.models.push(descriptor);
        self
    }

    /// Descriptor of `cowsay-default`: text-to-text, 1000 characters, 30 s,
    /// free.
    pub fn default_model_descriptor() -> ModelDescriptor {
        let mut parameters = serde_json::Map::new();
        parameters.insert("maxLength".to_string(), json!(1000));
        parameters.insert("timeout".to_string(), json!(30000));

        ModelDescriptor {
            id: MODEL_ID.to_string(),
            name: MODEL_NAME.to_string(),
            description: Some(MODEL_DESCRIPTION.to_string()),
            capabilities: CAPABILITIES.to_vec(),
            parameters,
            pricing: Some(Pricing::free()),
            limits: None,
        }
    }

    /// Snapshot of the merged configuration record.
    pub fn config(&self) -> ProviderConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ids of every registered descriptor.
    pub fn available_models(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.id.as_str()).collect()
    }

    /// Instantiate the model with `model_id`, bound to this provider's
    /// container service.
    pub async fn get_model(&self, model_id: &str) -> Result<CowsayDockerModel> {
        if !self.models.iter().any(|m| m.id == model_id) {
            return Err(CowsayError::NotFound {
                model_id: model_id.to_string(),
                provider: PROVIDER_NAME.to_string(),
            });
        }

        match model_id {
            MODEL_ID => CowsayDockerModel::new(self.service.clone()),
            _ => Err(CowsayError::UnsupportedModel {
                model_id: model_id.to_string(),
                provider: PROVIDER_NAME.to_string(),
            }),
        }
    }

    /// Same as [`get_model`](Self::get_model).
    pub async fn create_model(&self, model_id: &str) -> Result<CowsayDockerModel> {
        self.get_model(model_id).await
    }

    /// Ask the container service to start. `Ok(false)` when it cannot.
    pub async fn start_service(&self) -> Result<bool> {
        let op = match &self.service {
            Some(service) => service.start_service().await,
            None => None,
        };
        match op {
            Some(result) => result.map_err(CowsayError::from),
            None => {
                tracing::info!(
                    provider = PROVIDER_ID,
                    "Container service does not support start_service"
                );
                Ok(false)
            }
        }
    }

    /// Ask the container service to stop. `Ok(false)` when it cannot.
    pub async fn stop_service(&self) -> Result<bool> {
        let op = match &self.service {
            Some(service) => service.stop_service().await,
            None => None,
        };
        match op {
            Some(result) => result.map_err(CowsayError::from),
            None => {
                tracing::info!(
                    provider = PROVIDER_ID,
                    "Container service does not support stop_service"
                );
                Ok(false)
            }
        }
    }

    /// Container status, or [`ServiceStatus::unknown`] when the service cannot
    /// report one.
    pub async fn service_status(&self) -> Result<ServiceStatus> {
        let op = match &self.service {
            Some(service) => service.service_status().await,
            None => None,
        };
        match op {
            Some(result) => result.map_err(CowsayError::from),
            None => Ok(ServiceStatus::unknown()),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[async_trait]
impl MediaProvider for CowsayDockerProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Local
    }

    fn capabilities(&self) -> &[MediaCapability] {
        CAPABILITIES
    }

    fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    async fn configure(&self, config: ProviderConfig) -> Result<()> {
        let keys: Vec<String> = config.as_map().keys().cloned().collect();
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .merge(config);
        tracing::info!(provider = PROVIDER_ID, keys = ?keys, "Configured provider");
        Ok(())
    }

    /// Running and healthy according to the container service, and the HTTP
    /// API answers its health check.
    async fn is_available(&self) -> bool {
        let Some(service) = &self.service else {
            tracing::info!(provider = PROVIDER_ID, "No container service available");
            return false;
        };

        let status = match service.service_status().await {
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                tracing::error!(
                    provider = PROVIDER_ID,
                    error = %e,
                    "Error checking cowsay provider availability"
                );
                return false;
            }
            None => {
                tracing::debug!(provider = PROVIDER_ID, "Container service does not report status");
                return false;
            }
        };

        tracing::debug!(
            running = status.running,
            health = %status.health,
            "Container service status"
        );
        if !status.is_healthy() {
            return false;
        }

        match CowsayApiClient::new(resolve_service_config(Some(service.as_ref()))) {
            Ok(client) => client.is_reachable().await,
            Err(e) => {
                tracing::error!(
                    provider = PROVIDER_ID,
                    error = %e,
                    "Could not build cowsay API client"
                );
                false
            }
        }
    }

    async fn model(&self, model_id: &str) -> Result<Arc<dyn TextToTextModel>> {
        let model: Arc<dyn TextToTextModel> = Arc::new(self.get_model(model_id).await?);
        Ok(model)
    }

    async fn health(&self) -> HealthSnapshot {
        let available = self.is_available().await;
        HealthSnapshot {
            status: if available {
                HealthStatus::Healthy
            } else {
                HealthStatus::Unhealthy
            },
            uptime: now_millis(),
            active_jobs: 0,
            queued_jobs: 0,
            last_error: (!available).then(|| "Service not available".to_string()),
        }
    }
}
