//! The `cowsay-default` text-to-text model.
//!
//! The backing service's address is resolved once, when the model is built,
//! from the container service's first mapped port. If the container is later
//! restarted on a different port the model keeps talking to the old address;
//! build a new model to pick up the change.

use crate::api::{DEFAULT_TIMEOUT, MediaCapability, ModelInfo, ServiceConfig, TextToTextOptions};
use crate::client::CowsayApiClient;
use crate::error::{CowsayError, Result};
use crate::text::{Text, TextInput};
use crate::traits::{ContainerService, TextToTextModel};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Instant;

/// Id of the only model this crate implements.
pub const MODEL_ID: &str = "cowsay-default";
pub const MODEL_NAME: &str = "Cowsay Default";
pub const MODEL_DESCRIPTION: &str =
    "A simple text-to-text model that generates ASCII art of a cow saying your text.";
pub const MODEL_VERSION: &str = "1.0.0";
/// Provider label written into every output's metadata.
pub const MODEL_PROVIDER: &str = "cowsay-docker";

const TRANSFORMATION_TYPE: &str = "text-to-text";
const CAPABILITIES: &[MediaCapability] = &[MediaCapability::TextToText];

/// Work out where the cowsay service listens.
///
/// Uses `http://<host>:<first port>` from the container service's info, and
/// falls back to [`DEFAULT_BASE_URL`](crate::api::DEFAULT_BASE_URL) when there
/// is no service, it exposes no info, the lookup fails, or no ports are mapped.
pub fn resolve_service_config(service: Option<&dyn ContainerService>) -> ServiceConfig {
    let Some(service) = service else {
        tracing::warn!("No container service available, using fallback address");
        return ServiceConfig::default();
    };

    let info = match service.service_info() {
        Some(Ok(info)) => info,
        Some(Err(e)) => {
            tracing::warn!(
                service = %service.name(),
                error = %e,
                "Could not get service info, using fallback address"
            );
            return ServiceConfig::default();
        }
        None => {
            tracing::warn!(
                service = %service.name(),
                "Container service exposes no service info, using fallback address"
            );
            return ServiceConfig::default();
        }
    };

    let Some(port) = info.ports.first() else {
        tracing::warn!(
            service = %service.name(),
            "Service info has no ports, using fallback address"
        );
        return ServiceConfig::default();
    };

    let host = info.host.as_deref().unwrap_or("localhost");
    tracing::info!(service = %service.name(), port, "Using dynamic service port");
    ServiceConfig::new(format!("http://{}:{}", host, port), DEFAULT_TIMEOUT)
}

/// Text-to-text model that renders its input through the cowsay service.
pub struct CowsayDockerModel {
    info: ModelInfo,
    service: Option<Arc<dyn ContainerService>>,
    client: CowsayApiClient,
}

impl CowsayDockerModel {
    /// Build a model, resolving the service address from `service`.
    pub fn new(service: Option<Arc<dyn ContainerService>>) -> Result<Self> {
        let config = resolve_service_config(service.as_deref());
        Self::with_config(service, config)
    }

    /// Build a model that talks to an explicit address, skipping resolution.
    pub fn with_config(
        service: Option<Arc<dyn ContainerService>>,
        config: ServiceConfig,
    ) -> Result<Self> {
        let client = CowsayApiClient::new(config)?;
        tracing::info!(base_url = %client.base_url(), "Cowsay model client configured");

        Ok(Self {
            info: model_info(),
            service,
            client,
        })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn api_client(&self) -> &CowsayApiClient {
        &self.client
    }

    /// The container service's own health probe; `true` when it has none.
    async fn service_healthy(&self) -> bool {
        let Some(service) = &self.service else {
            return true;
        };
        match service.is_service_healthy().await {
            None => true,
            Some(Ok(healthy)) => healthy,
            Some(Err(e)) => {
                tracing::error!(
                    service = %service.name(),
                    error = %e,
                    "Error checking cowsay model availability"
                );
                false
            }
        }
    }
}

fn model_info() -> ModelInfo {
    ModelInfo {
        id: MODEL_ID.to_string(),
        name: MODEL_NAME.to_string(),
        description: MODEL_DESCRIPTION.to_string(),
        version: MODEL_VERSION.to_string(),
        provider: MODEL_PROVIDER.to_string(),
        capabilities: CAPABILITIES.to_vec(),
        input_types: vec!["text".to_string()],
        output_types: vec!["text".to_string()],
    }
}

fn output_metadata(processing_time_ms: u64) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("processingTime".to_string(), json!(processing_time_ms));
    metadata.insert("model".to_string(), json!(MODEL_ID));
    metadata.insert("provider".to_string(), json!(MODEL_PROVIDER));
    metadata.insert("transformationType".to_string(), json!(TRANSFORMATION_TYPE));
    metadata
}

#[async_trait]
impl TextToTextModel for CowsayDockerModel {
    fn id(&self) -> &str {
        &self.info.id
    }

    fn name(&self) -> &str {
        &self.info.name
    }

    fn capabilities(&self) -> &[MediaCapability] {
        CAPABILITIES
    }

    async fn is_available(&self) -> bool {
        self.service_healthy().await && self.client.is_reachable().await
    }

    async fn transform(&self, input: TextInput, _options: &TextToTextOptions) -> Result<Text> {
        let start = Instant::now();
        let text = input.into_text()?;

        if !text.is_valid() {
            return Err(CowsayError::Validation(
                "content must be a non-empty string".to_string(),
            ));
        }

        let result = self.client.generate(text.content()).await;
        let elapsed = start.elapsed();
        let status = if result.is_ok() { "success" } else { "failure" };

        metrics::histogram!(
            "cowsay_transform.duration_seconds",
            "model" => MODEL_ID,
            "provider" => MODEL_PROVIDER
        )
        .record(elapsed.as_secs_f64());

        metrics::counter!(
            "cowsay_transform.total",
            "model" => MODEL_ID,
            "provider" => MODEL_PROVIDER,
            "status" => status
        )
        .increment(1);

        let output = result.map_err(|e| {
            tracing::error!(
                model = MODEL_ID,
                error = %e,
                "Error transforming text with cowsay service"
            );
            CowsayError::transform(e)
        })?;

        Ok(Text::new(output)
            .with_language(text.language().unwrap_or("auto"))
            .with_confidence(1.0)
            .with_metadata(output_metadata(elapsed.as_millis() as u64))
            .with_source_of(&text))
    }
}
