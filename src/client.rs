//! HTTP client for the cowsay service: `POST /cowsay` and `GET /health`.
//!
//! Every call is a single attempt. Transport failures and non-2xx responses
//! are wrapped in one error per operation ([`CowsayError::Generation`] or
//! [`CowsayError::HealthCheck`]) whose message is the server-supplied `error`
//! field when present, or the transport failure description otherwise. The
//! wrapped cause stays reachable as the error's source.

use crate::api::{CowsayRequest, CowsayResponse, ServiceConfig, ServiceHealthResponse};
use crate::error::{CowsayError, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

const COWSAY_PATH: &str = "/cowsay";
const HEALTH_PATH: &str = "/health";

/// Error body the service returns alongside non-2xx statuses.
#[derive(Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// Client bound to one service address. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct CowsayApiClient {
    client: Client,
    config: ServiceConfig,
}

impl CowsayApiClient {
    /// Build a client for `config`. Fails only if the base URL does not parse
    /// or the HTTP client cannot be constructed.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        reqwest::Url::parse(config.base_url()).map_err(|e| {
            CowsayError::Config(format!("invalid base URL '{}': {}", config.base_url(), e))
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CowsayError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Render `text` through cowsay and return the ASCII art.
    pub async fn generate(&self, text: &str) -> Result<String> {
        let request = self
            .client
            .post(self.config.endpoint(COWSAY_PATH))
            .json(&CowsayRequest { text });

        let response = self
            .execute(request, COWSAY_PATH)
            .await
            .map_err(CowsayError::generation)?;

        let body: CowsayResponse = response
            .json()
            .await
            .map_err(|e| CowsayError::generation(e.into()))?;

        Ok(body.cowsay_output)
    }

    /// Fetch the service's health document. Any non-2xx status is a failure;
    /// any 2xx is a success. The `status` field is returned as-is, and a body
    /// that is not a health document yields [`ServiceHealthResponse::default`].
    pub async fn health_check(&self) -> Result<ServiceHealthResponse> {
        let request = self.client.get(self.config.endpoint(HEALTH_PATH));

        let response = self
            .execute(request, HEALTH_PATH)
            .await
            .map_err(CowsayError::health_check)?;

        let body = response
            .text()
            .await
            .map_err(|e| CowsayError::health_check(e.into()))?;

        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            tracing::debug!(
                base_url = %self.config.base_url(),
                error = %e,
                "Health body is not a health document"
            );
            ServiceHealthResponse::default()
        }))
    }

    /// `true` iff [`health_check`](Self::health_check) succeeds.
    pub async fn is_reachable(&self) -> bool {
        match self.health_check().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(
                    base_url = %self.config.base_url(),
                    error = %e,
                    "Cowsay service unreachable"
                );
                false
            }
        }
    }

    /// Send `request` and map transport errors and non-2xx statuses.
    async fn execute(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let result = match request.send().await {
            Ok(response) => check_status(response).await,
            Err(e) => Err(CowsayError::from(e)),
        };

        if let Err(e) = &result {
            tracing::warn!(
                base_url = %self.config.base_url(),
                path,
                error = %e,
                "Cowsay request failed"
            );
        }
        result
    }
}

/// Pass 2xx responses through; turn anything else into
/// [`CowsayError::ServerReported`] when the body names an error, or
/// [`CowsayError::HttpStatus`] when it does not.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorPayload>(&body) {
        Ok(ErrorPayload {
            error: Some(message),
        }) => Err(CowsayError::ServerReported {
            status: status.as_u16(),
            message,
        }),
        _ => Err(CowsayError::HttpStatus(status.as_u16())),
    }
}
