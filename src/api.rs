//! Public API types: service configuration, wire payloads, model descriptors,
//! and health records.

use crate::error::{CowsayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Base URL used when no address is configured or resolved.
pub const DEFAULT_BASE_URL: &str = "http://localhost:80";

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for one [`CowsayApiClient`](crate::client::CowsayApiClient).
///
/// Immutable once built. Absent, empty, or zero values fall back to
/// [`DEFAULT_BASE_URL`] and [`DEFAULT_TIMEOUT`].
///
/// # Example JSON
///
/// ```json
/// { "baseUrl": "http://localhost:8080", "timeout": 5000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ServiceConfigRepr", into = "ServiceConfigRepr")]
pub struct ServiceConfig {
    base_url: String,
    timeout: Duration,
}

impl ServiceConfig {
    /// Build a config, applying defaults for an empty URL or a zero timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim().trim_end_matches('/');
        Self {
            base_url: if base_url.is_empty() {
                DEFAULT_BASE_URL.to_string()
            } else {
                base_url.to_string()
            },
            timeout: if timeout.is_zero() {
                DEFAULT_TIMEOUT
            } else {
                timeout
            },
        }
    }

    /// Return a copy pointing at `base_url`.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self::new(base_url, self.timeout)
    }

    /// Return a copy with a different request timeout.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self::new(self.base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join `path` onto the base URL with exactly one `/` between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

/// Wire shape of [`ServiceConfig`]; timeout travels as milliseconds.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceConfigRepr {
    #[serde(default, alias = "base_url")]
    base_url: Option<String>,
    #[serde(default, alias = "timeout_ms")]
    timeout: Option<u64>,
}

impl From<ServiceConfigRepr> for ServiceConfig {
    fn from(repr: ServiceConfigRepr) -> Self {
        Self::new(
            repr.base_url.unwrap_or_default(),
            Duration::from_millis(repr.timeout.unwrap_or_default()),
        )
    }
}

impl From<ServiceConfig> for ServiceConfigRepr {
    fn from(config: ServiceConfig) -> Self {
        Self {
            base_url: Some(config.base_url),
            timeout: Some(config.timeout.as_millis() as u64),
        }
    }
}

/// Body of `POST /cowsay`.
#[derive(Debug, Clone, Serialize)]
pub struct CowsayRequest<'a> {
    pub text: &'a str,
}

/// Successful body of `POST /cowsay`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CowsayResponse {
    #[serde(rename = "cowsayOutput")]
    pub cowsay_output: String,
}

/// State reported by the service's `/health` endpoint. Values other than
/// `healthy` and `unhealthy` are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceHealthState {
    Healthy,
    Unhealthy,
    Other(String),
}

impl Default for ServiceHealthState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ServiceHealthState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "healthy" => Self::Healthy,
            "unhealthy" => Self::Unhealthy,
            _ => Self::Other(value),
        }
    }
}

impl From<ServiceHealthState> for String {
    fn from(state: ServiceHealthState) -> Self {
        match state {
            ServiceHealthState::Healthy => "healthy".to_string(),
            ServiceHealthState::Unhealthy => "unhealthy".to_string(),
            ServiceHealthState::Other(value) => value,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealthResponse {
    #[serde(default)]
    pub status: ServiceHealthState,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
    /// Seconds since the Unix epoch, as reported by the service.
    #[serde(default)]
    pub timestamp: f64,
}

/// Media transformation kinds understood by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaCapability {
    TextToText,
    TextToAudio,
    AudioToText,
    TextToImage,
    ImageToText,
    VideoToVideo,
}

impl std::fmt::Display for MediaCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TextToText => write!(f, "text-to-text"),
            Self::TextToAudio => write!(f, "text-to-audio"),
            Self::AudioToText => write!(f, "audio-to-text"),
            Self::TextToImage => write!(f, "text-to-image"),
            Self::ImageToText => write!(f, "image-to-text"),
            Self::VideoToVideo => write!(f, "video-to-video"),
        }
    }
}

/// Where a provider's work runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Local,
    Remote,
}

/// Per-unit pricing of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub input_cost: f64,
    pub output_cost: f64,
    pub currency: String,
}

impl Pricing {
    /// Zero-cost pricing in USD.
    pub fn free() -> Self {
        Self {
            input_cost: 0.0,
            output_cost: 0.0,
            currency: "USD".to_string(),
        }
    }
}

/// Optional size and rate limits of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u32>,
}

/// Static, read-only description of a model a provider offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub capabilities: Vec<MediaCapability>,
    /// Parameter limits such as `maxLength` and `timeout` (ms).
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<ModelLimits>,
}

impl ModelDescriptor {
    pub fn supports(&self, capability: MediaCapability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Identity record carried by a model instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub provider: String,
    pub capabilities: Vec<MediaCapability>,
    pub input_types: Vec<String>,
    pub output_types: Vec<String>,
}

/// Free-form provider settings, merged shallowly by
/// [`CowsayDockerProvider::configure`](crate::provider::CowsayDockerProvider::configure).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderConfig(Map<String, Value>);

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON value. `null` yields an empty config; anything other
    /// than an object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self(map)),
            other => Err(CowsayError::Config(format!(
                "Provider config must be a JSON object or null, got {}",
                other
            ))),
        }
    }

    /// Set a single key, returning the updated config.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Overwrite top-level keys with those from `other`. Nested objects are
    /// replaced, not merged.
    pub fn merge(&mut self, other: ProviderConfig) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Aggregate provider health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Point-in-time health record, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    /// Milliseconds since the Unix epoch at the time of the snapshot. This is
    /// a timestamp, not elapsed service uptime.
    pub uptime: u64,
    pub active_jobs: u32,
    pub queued_jobs: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Addressing information exposed by the container service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Host ports mapped to the service; the first one is used.
    #[serde(default)]
    pub ports: Vec<u16>,
    /// Host the ports are bound on. `localhost` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// Container lifecycle state as reported by the container service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub health: String,
}

impl ServiceStatus {
    /// Sentinel returned when the container service cannot report status.
    pub fn unknown() -> Self {
        Self {
            running: false,
            health: "unknown".to_string(),
        }
    }

    /// `true` when the container is running and its health check passes.
    pub fn is_healthy(&self) -> bool {
        self.running && self.health == "healthy"
    }
}

/// One turn of a chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Generic text-to-text options from the host framework.
///
/// Cowsay has no sampling knobs; these are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToTextOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn service_config_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url(), "http://localhost:80");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn service_config_from_partial_json() {
        let config: ServiceConfig =
            serde_json::from_value(json!({ "baseUrl": "http://127.0.0.1:9000/" })).unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);

        let config: ServiceConfig = serde_json::from_value(json!({ "timeout": 5000 })).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn service_config_serializes_timeout_as_millis() {
        let config = ServiceConfig::new("http://svc:81", Duration::from_secs(2));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({ "baseUrl": "http://svc:81", "timeout": 2000 }));
    }

    #[test]
    fn empty_and_zero_values_fall_back() {
        let config = ServiceConfig::new("  ", Duration::ZERO);
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn endpoint_joins_single_slash() {
        let config = ServiceConfig::new("http://localhost:8080/", DEFAULT_TIMEOUT);
        assert_eq!(config.endpoint("/cowsay"), "http://localhost:8080/cowsay");
        assert_eq!(config.endpoint("health"), "http://localhost:8080/health");
    }

    #[test]
    fn provider_config_merge_is_shallow() {
        let mut config = ProviderConfig::new()
            .with("timeout", 1000)
            .with("serviceConfig", json!({ "a": 1, "b": 2 }));
        config.merge(
            ProviderConfig::new()
                .with("serviceConfig", json!({ "a": 3 }))
                .with("autoStartService", true),
        );

        assert_eq!(config.len(), 3);
        assert_eq!(config.get("timeout"), Some(&json!(1000)));
        assert_eq!(config.get("serviceConfig"), Some(&json!({ "a": 3 })));
        assert_eq!(config.get("autoStartService"), Some(&json!(true)));
    }

    #[test]
    fn provider_config_rejects_non_objects() {
        assert!(ProviderConfig::from_value(Value::Null).unwrap().is_empty());
        let err = ProviderConfig::from_value(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn capability_wire_names() {
        assert_eq!(
            serde_json::to_value(MediaCapability::TextToText).unwrap(),
            json!("TEXT_TO_TEXT")
        );
        assert_eq!(MediaCapability::TextToText.to_string(), "text-to-text");
    }

    #[test]
    fn health_response_tolerates_missing_fields() {
        let resp: ServiceHealthResponse =
            serde_json::from_value(json!({ "status": "unhealthy" })).unwrap();
        assert_eq!(resp.status, ServiceHealthState::Unhealthy);
        assert!(resp.service.is_empty());
    }

    #[test]
    fn health_state_keeps_unknown_values() {
        let resp: ServiceHealthResponse =
            serde_json::from_value(json!({ "status": "degraded" })).unwrap();
        assert_eq!(resp.status, ServiceHealthState::Other("degraded".to_string()));
        assert_eq!(
            serde_json::to_value(&resp.status).unwrap(),
            json!("degraded")
        );
        assert_eq!(
            serde_json::to_value(ServiceHealthState::Healthy).unwrap(),
            json!("healthy")
        );
    }

    #[test]
    fn service_status_health() {
        let status = ServiceStatus {
            running: true,
            health: "healthy".to_string(),
        };
        assert!(status.is_healthy());
        assert!(!ServiceStatus::unknown().is_healthy());
    }
}
