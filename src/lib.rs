//! Text-to-text provider backed by a containerized cowsay service.
//!
//! The crate is a thin adapter between a host media-processing framework and a
//! small HTTP service that runs `cowsay` inside a container. Data flows one
//! way: provider, then model, then API client, then the network.
//!
//! # Key concepts
//!
//! - **[`CowsayDockerProvider`](provider::CowsayDockerProvider)** — the plugin
//!   entry point. Declares the provider's identity and its one model, proxies
//!   start/stop/status to the injected container service, and reports health.
//! - **[`CowsayDockerModel`](model::CowsayDockerModel)** — implements the host's
//!   [`TextToTextModel`](traits::TextToTextModel) contract (`transform`,
//!   `generate`, `chat`) on top of the API client.
//! - **[`CowsayApiClient`](client::CowsayApiClient)** — single-attempt HTTP
//!   calls to `POST /cowsay` and `GET /health`.
//! - **[`ContainerService`](traits::ContainerService)** — the capability
//!   interface the container lifecycle manager is expected to implement. All of
//!   its operations are optional.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use cowsay_provider::api::{ServiceInfo, ServiceStatus, TextToTextOptions};
//! use cowsay_provider::provider::CowsayDockerProvider;
//! use cowsay_provider::traits::{ContainerService, MediaProvider, TextToTextModel};
//! use std::sync::Arc;
//!
//! struct FixedPort(u16);
//!
//! #[async_trait::async_trait]
//! impl ContainerService for FixedPort {
//!     fn service_info(&self) -> Option<anyhow::Result<ServiceInfo>> {
//!         Some(Ok(ServiceInfo { ports: vec![self.0], host: None }))
//!     }
//!
//!     async fn service_status(&self) -> Option<anyhow::Result<ServiceStatus>> {
//!         Some(Ok(ServiceStatus { running: true, health: "healthy".into() }))
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = CowsayDockerProvider::new(Arc::new(FixedPort(8080)))?;
//! let model = provider.get_model("cowsay-default").await?;
//!
//! if provider.is_available().await {
//!     let art = model.generate("Hello!", &TextToTextOptions::default()).await?;
//!     println!("{}", art.content());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod model;
pub mod provider;
pub mod text;
pub mod traits;

#[cfg(test)]
mod mock;
