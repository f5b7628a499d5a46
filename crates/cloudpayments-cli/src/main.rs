//! # CloudPayments CLI
//!
//! Run a single gateway operation from the shell.
//!
//! ## Usage
//!
//! ```bash
//! # Set credentials (or pass --config gateway.toml)
//! export CLOUDPAYMENTS_PUBLIC_KEY=pk_...
//! export CLOUDPAYMENTS_PRIVATE_KEY=...
//!
//! cloudpayments test
//! cloudpayments find order-1234
//! cloudpayments refund 504 100.00
//! ```

use clap::Parser;
use cloudpayments_cli::commands::{execute, Cli};
use cloudpayments_client::CloudPaymentsClient;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;

    info!("Gateway: {} (locale {})", config.base_url, config.locale);

    let client = CloudPaymentsClient::new(config)?;
    let output = execute(&cli.command, &client).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
