#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::backtrace::Backtrace;

use film_library::infrastructure::{
    config::{AppConfig, LogFormat, LoggingConfig},
    http::start_server,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    init_tracing(&config.logging);
    install_panic_hook();

    info!("Starting Film Library Service in {} mode", config.mode);
    info!("Server will bind to {}:{}", config.server.host, config.server.port);

    if let Err(e) = start_server(config).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Initialize structured logging; `RUST_LOG` overrides the configured filter
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}

/// Route panic reports, with a backtrace, through tracing
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());

        error!(
            location = location.as_str(),
            backtrace = %Backtrace::force_capture(),
            "Panic: {}",
            payload
        );
    }));
}
