//! Usage example: drive the provider through a fixed-port container service,
//! then call the HTTP API directly.
//!
//! Start the service first (it listens on port 80 inside the container):
//!
//! ```sh
//! docker run -d -p 8080:80 cowsay-service
//! cargo run --example usage -- 8080
//! ```

use async_trait::async_trait;
use cowsay_provider::api::{
    ChatMessage, ServiceConfig, ServiceInfo, ServiceStatus, TextToTextOptions,
};
use cowsay_provider::client::CowsayApiClient;
use cowsay_provider::provider::CowsayDockerProvider;
use cowsay_provider::traits::{ContainerService, MediaProvider, TextToTextModel};
use std::sync::Arc;
use std::time::Duration;

/// Stand-in for a real container manager: the container is already running
/// on a known host port.
struct AlreadyRunning {
    port: u16,
}

#[async_trait]
impl ContainerService for AlreadyRunning {
    fn name(&self) -> &str {
        "already-running"
    }

    fn service_info(&self) -> Option<anyhow::Result<ServiceInfo>> {
        Some(Ok(ServiceInfo {
            ports: vec![self.port],
            host: None,
        }))
    }

    async fn service_status(&self) -> Option<anyhow::Result<ServiceStatus>> {
        Some(Ok(ServiceStatus {
            running: true,
            health: "healthy".to_string(),
        }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let port: u16 = std::env::args()
        .nth(1)
        .map(|p| p.parse())
        .transpose()?
        .unwrap_or(8080);

    // 1. Through the provider
    let provider = CowsayDockerProvider::new(Arc::new(AlreadyRunning { port }))?;
    println!("Provider: {} ({:?})", provider.name(), provider.provider_type());
    println!("Models: {:?}", provider.available_models());

    let health = provider.health().await;
    println!("Health: {:?}", health.status);

    let model = provider.get_model("cowsay-default").await?;
    if model.is_available().await {
        let options = TextToTextOptions::default();

        let result = model.generate("Hello from Rust!", &options).await?;
        println!("{}", result.content());

        let reply = model
            .chat(
                &[
                    ChatMessage::user("Who's there?"),
                    ChatMessage::assistant("A cow."),
                    ChatMessage::user("A cow who?"),
                ],
                &options,
            )
            .await?;
        println!("{}", reply.content());
    } else {
        println!("Model not available on port {port}");
    }

    // 2. Directly against the HTTP API
    let client = CowsayApiClient::new(ServiceConfig::new(
        format!("http://localhost:{port}"),
        Duration::from_secs(5),
    ))?;
    match client.health_check().await {
        Ok(health) => {
            println!("Service health: {:?} ({})", health.status, health.version);
            println!("{}", client.generate("Direct API call!").await?);
        }
        Err(e) => println!("Error using API client: {e}"),
    }

    Ok(())
}
