//! Seams between this crate and its surroundings: the injected container
//! service it consumes, and the host framework's model and provider contracts
//! it implements.

use crate::api::{
    ChatMessage, HealthSnapshot, MediaCapability, ModelDescriptor, ProviderConfig, ProviderType,
    ServiceInfo, ServiceStatus, TextToTextOptions,
};
use crate::error::{CowsayError, Result};
use crate::text::{Text, TextInput};
use async_trait::async_trait;
use std::sync::Arc;

/// Lifecycle manager for the container that runs the cowsay service.
///
/// Implemented elsewhere and injected into the provider. Every operation is
/// optional: the default implementations return `None`, meaning "not exposed",
/// and callers fall back to safe defaults instead of failing. `Some(Err(_))`
/// means the operation exists but failed.
#[async_trait]
pub trait ContainerService: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        "container-service"
    }

    /// Addressing information, including the dynamically mapped host ports.
    fn service_info(&self) -> Option<anyhow::Result<ServiceInfo>> {
        None
    }

    /// The service's own health probe.
    async fn is_service_healthy(&self) -> Option<anyhow::Result<bool>> {
        None
    }

    async fn service_status(&self) -> Option<anyhow::Result<ServiceStatus>> {
        None
    }

    async fn start_service(&self) -> Option<anyhow::Result<bool>> {
        None
    }

    async fn stop_service(&self) -> Option<anyhow::Result<bool>> {
        None
    }
}

/// The host framework's generic text-to-text model contract.
#[async_trait]
pub trait TextToTextModel: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn capabilities(&self) -> &[MediaCapability];

    /// Whether the model can serve requests right now. Never fails; any
    /// internal error yields `false`.
    async fn is_available(&self) -> bool;

    /// Transform `input` into a new [`Text`].
    async fn transform(&self, input: TextInput, options: &TextToTextOptions) -> Result<Text>;

    /// Transform a raw prompt string.
    async fn generate(&self, prompt: &str, options: &TextToTextOptions) -> Result<Text> {
        self.transform(Text::new(prompt).into(), options).await
    }

    /// Transform the last message of a chat history.
    async fn chat(&self, messages: &[ChatMessage], options: &TextToTextOptions) -> Result<Text> {
        let last = messages.last().ok_or(CowsayError::NoMessage)?;
        self.generate(&last.content, options).await
    }
}

/// The host framework's provider contract: identity, offered models, and
/// aggregate health.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn provider_type(&self) -> ProviderType;

    fn capabilities(&self) -> &[MediaCapability];

    fn models(&self) -> &[ModelDescriptor];

    /// Merge `config` into the provider's settings.
    async fn configure(&self, config: ProviderConfig) -> Result<()>;

    async fn is_available(&self) -> bool;

    /// Descriptors of every model that supports `capability`.
    fn models_for_capability(&self, capability: MediaCapability) -> Vec<ModelDescriptor> {
        self.models()
            .iter()
            .filter(|m| m.supports(capability))
            .cloned()
            .collect()
    }

    /// Instantiate the model with the given id.
    async fn model(&self, model_id: &str) -> Result<Arc<dyn TextToTextModel>>;

    async fn health(&self) -> HealthSnapshot;
}
