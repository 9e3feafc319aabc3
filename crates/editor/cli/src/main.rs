//! `editmap`: terminal map editor over a generated demo world.
mod app;
mod config;
mod input;
mod presentation;

use std::path::PathBuf;

use anyhow::Result;
use app::EditorApp;
use config::CliConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _log_guard = setup_logging()?;

    EditorApp::load(config)?.run().await
}

/// Logs to a file only; the TUI owns the terminal.
fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "editmap.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}", log_dir.join("editmap.log").display());
    Ok(guard)
}

/// Platform cache directory, falling back to the system temp dir.
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "editmap")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("editmap"))
        .join("logs")
}
