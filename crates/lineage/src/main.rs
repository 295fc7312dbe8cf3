//! Lineage CLI binary.

use anyhow::Result;
use lineage::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the lineage CLI.
///
/// Runs on tokio's current_thread runtime; the only I/O is reading the
/// configuration and dataset files.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=lineage=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lineage=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting lineage CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Lineage CLI completed successfully");
    Ok(())
}
