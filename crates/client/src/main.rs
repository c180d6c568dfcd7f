//! Stdio client entry point.
use anyhow::Result;
use easydice_client::{App, ClientConfig, logging};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config)?;

    App::new(config.runtime, tokio::io::stdout())?
        .run(BufReader::new(tokio::io::stdin()))
        .await
}
