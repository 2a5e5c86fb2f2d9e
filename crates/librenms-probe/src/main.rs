//! LibreNMS Probe
//!
//! Resolves one device by hostname or id and prints its record as JSON:
//!
//! ```text
//! LIBRENMS_URL=https://librenms.example.com LIBRENMS_TOKEN=... librenms-probe sw1 --ports
//! ```
//!
//! Configuration comes from `LIBRENMS_URL`, `LIBRENMS_TOKEN`,
//! `LIBRENMS_CONNECT_TIMEOUT_SECS` and `LIBRENMS_VERIFY_TLS`.
//! Log verbosity follows `RUST_LOG` (default `info`).

mod error;
mod probe;

use crate::error::ProbeError;
use anyhow::Context;
use librenms_client::{ClientConfig, LibreNmsClient};
use probe::ProbeArgs;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match probe_from_env().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            e.downcast_ref::<ProbeError>()
                .map_or(ExitCode::FAILURE, ProbeError::exit_code)
        }
    }
}

async fn probe_from_env() -> anyhow::Result<()> {
    let args = ProbeArgs::parse(std::env::args().skip(1))?;

    // Load configuration from environment variables
    let config = ClientConfig::from_env().context("loading LibreNMS configuration")?;
    info!("Probing {} on {}", args.device, config.base_url);

    let client = LibreNmsClient::from_config(&config).map_err(ProbeError::from)?;
    let report = probe::run(&client, &args).await?;

    println!("{}", serde_json::to_string_pretty(&report).map_err(ProbeError::from)?);
    Ok(())
}
