//! Library Console - interactive library management

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use library_console::{
    config::{AppConfig, LoggingConfig},
    console::Console,
    repository::Repository,
    services::Services,
    store::PostgrestStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let _log_guard = init_tracing(&config.logging)?;

    tracing::info!("Starting Library Console v{}", env!("CARGO_PKG_VERSION"));

    let store = PostgrestStore::new(&config.store).context("Failed to create store client")?;
    tracing::info!(url = %config.store.url, "Using table store");

    let services = Services::new(Repository::new(Arc::new(store)));

    let stdin = io::stdin();
    let mut console = Console::new(services, stdin.lock(), io::stdout());
    console.run().await?;

    Ok(())
}

/// Stdout carries the menu, so logs go to stderr or to `logging.file`
fn init_tracing(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_console={}", config.level).into());

    let (writer, guard) = match &config.file {
        Some(file) => {
            let path = Path::new(file);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", file))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
        None => tracing_appender::non_blocking(io::stderr()),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(config.file.is_none())
                    .with_writer(writer),
            )
            .init();
    }

    Ok(guard)
}
