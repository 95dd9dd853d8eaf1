//! `cowsay-probe` — check a running cowsay service and optionally render text.
//!
//! Usage:
//!
//! ```text
//! cowsay-probe [--url <base-url>] [--timeout-ms <n>] [--text <message>]
//! ```
//!
//! Performs one health check against `<base-url>/health` and prints the
//! result. With `--text`, also renders the message through `/cowsay`.
//! Exits with status 1 if either call fails.

use cowsay_provider::api::{DEFAULT_BASE_URL, ServiceConfig};
use cowsay_provider::client::CowsayApiClient;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage: cowsay-probe [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --url <base-url>    Service address (default: {DEFAULT_BASE_URL})");
    eprintln!("  --timeout-ms <n>    Per-request timeout in milliseconds (default: 30000)");
    eprintln!("  --text <message>    Render <message> after the health check");
    eprintln!("  --help              Show this message");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // --- Argument parsing ---------------------------------------------------
    let mut args = std::env::args().skip(1);
    let mut config = ServiceConfig::default();
    let mut text: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--url" => {
                let url = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--url requires an address"))?;
                config = config.with_base_url(url);
            }
            "--timeout-ms" => {
                let raw = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--timeout-ms requires a number"))?;
                let millis: u64 = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid --timeout-ms value: {raw}"))?;
                config = config.with_timeout(Duration::from_millis(millis));
            }
            "--text" => {
                text = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--text requires a message"))?,
                );
            }
            _ => anyhow::bail!("Unknown argument: {arg}"),
        }
    }

    // --- Probe --------------------------------------------------------------
    let client = CowsayApiClient::new(config)?;
    let health = client.health_check().await?;
    eprintln!(
        "{}: {:?} (service: {}, version: {})",
        client.base_url(),
        health.status,
        health.service,
        health.version
    );

    if let Some(text) = text {
        let art = client.generate(&text).await?;
        println!("{art}");
    }

    Ok(())
}
