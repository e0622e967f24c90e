//! InTransit - Command line entry point
//!
//! Loads settings, wires the session store, HTTP client and authenticated
//! transport together, then runs one command.

mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use intransit_application::{AuthenticatedTransport, SessionStore};
use intransit_infrastructure::{FileSessionStorage, ReqwestHttpClient, load_settings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::PromptLogin;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let mut settings = load_settings().map_err(|e| e.to_string())?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = Some(base_url);
    }

    let storage = FileSessionStorage::in_data_dir().map_err(|e| e.to_string())?;
    tracing::debug!(path = %storage.path().display(), "session storage");

    let client = ReqwestHttpClient::new(&settings).map_err(|e| e.to_string())?;
    let transport = Arc::new(AuthenticatedTransport::new(
        Arc::new(client),
        SessionStore::new(Arc::new(storage)),
        &settings,
        Arc::new(PromptLogin),
    ));

    tracing::debug!(base_url = transport.base_url(), "client ready");

    commands::run(cli.command, transport)
        .await
        .map_err(|e| e.message())
}
