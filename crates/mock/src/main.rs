//! Standalone mock backend, for pointing a local UI at the fixtures.
//!
//! ```text
//! PIZZAMOCK_ADDR=127.0.0.1:4567 cargo run -p pizzamock
//! ```

use tracing_subscriber::EnvFilter;

use pizzamock::{MockConfig, MockServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MockConfig::from_env()?;
    let server = MockServer::start(config).await?;
    println!("pizzamock serving fixtures at {}", server.base_url());

    tokio::signal::ctrl_c().await?;
    server.shutdown().await;
    Ok(())
}
