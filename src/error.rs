//! Error types for the cowsay provider.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CowsayError>;

/// Unified error type covering transport, server, validation, lookup, and
/// collaborator failures.
///
/// Probes such as [`CowsayApiClient::is_reachable`](crate::client::CowsayApiClient::is_reachable)
/// never surface these; every generation path does.
#[derive(Debug, Error)]
pub enum CowsayError {
    /// Connection, timeout, or body decoding failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A non-2xx response whose JSON body carried an `error` field.
    #[error("Server error ({status}): {message}")]
    ServerReported { status: u16, message: String },

    /// A non-2xx response without an error payload.
    #[error("Request failed with status code {0}")]
    HttpStatus(u16),

    /// The `/cowsay` call failed. `source` is the transport or status error.
    #[error("Cowsay generation failed: {message}")]
    Generation {
        message: String,
        #[source]
        source: Box<CowsayError>,
    },

    /// The `/health` call failed.
    #[error("Health check failed: {message}")]
    HealthCheck {
        message: String,
        #[source]
        source: Box<CowsayError>,
    },

    /// Input text was empty or otherwise unusable.
    #[error("Invalid text data provided: {0}")]
    Validation(String),

    /// No descriptor with this id is registered on the provider.
    #[error("Model {model_id} not found in {provider}")]
    NotFound { model_id: String, provider: String },

    /// The descriptor exists but the provider has no implementation for it.
    #[error("Model {model_id} not supported by {provider}")]
    UnsupportedModel { model_id: String, provider: String },

    /// `chat` was called with an empty message history.
    #[error("No message to process for chat")]
    NoMessage,

    /// A transformation failed after the input was validated.
    #[error("Failed to transform text with Cowsay: {message}")]
    Transform {
        message: String,
        #[source]
        source: Box<CowsayError>,
    },

    /// Invalid configuration (bad base URL, HTTP client construction, etc.).
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation on the injected container service failed.
    #[error("Container service error: {0}")]
    Service(String),
}

impl CowsayError {
    /// Wrap a `/cowsay` failure, keeping its bare message.
    pub fn generation(source: CowsayError) -> Self {
        Self::Generation {
            message: source.detail(),
            source: Box::new(source),
        }
    }

    /// Wrap a `/health` failure, keeping its bare message.
    pub fn health_check(source: CowsayError) -> Self {
        Self::HealthCheck {
            message: source.detail(),
            source: Box::new(source),
        }
    }

    /// Wrap a failed transformation. The message keeps the cause's label.
    pub fn transform(source: CowsayError) -> Self {
        Self::Transform {
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    /// The message without the variant prefix.
    ///
    /// Used when one error is wrapped into another so the outer message reads
    /// `"Cowsay generation failed: cowsay command not found"` rather than
    /// repeating every layer's label.
    pub fn detail(&self) -> String {
        match self {
            Self::Transport(msg)
            | Self::Validation(msg)
            | Self::Config(msg)
            | Self::Service(msg) => msg.clone(),
            Self::ServerReported { message, .. }
            | Self::Generation { message, .. }
            | Self::HealthCheck { message, .. }
            | Self::Transform { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for connection-level failures, including timeouts,
    /// also when wrapped by a generation, health check, or transform error.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Generation { source, .. }
            | Self::HealthCheck { source, .. }
            | Self::Transform { source, .. } => source.is_transport(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CowsayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<anyhow::Error> for CowsayError {
    fn from(err: anyhow::Error) -> Self {
        Self::Service(format!("{:#}", err))
    }
}
