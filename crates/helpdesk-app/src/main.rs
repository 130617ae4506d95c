//! Helpdesk application binary - composition root.
//!
//! Ties the workspace crates together into a single executable:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Open the SQLite customer store (optionally seeding demo data)
//! 3. Build the language-model client and the chat router
//! 4. Start the axum HTTP server (chat endpoint + widget)

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use helpdesk_api::{routes, state::AppState};
use helpdesk_chat::ChatRouter;
use helpdesk_core::config::HelpdeskConfig;
use helpdesk_llm::{LanguageModel, OllamaClient};
use helpdesk_storage::{CustomerRepository, Database};

use cli::CliArgs;

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config (needed before tracing for the log level fallback).
    let config_file = args.resolve_config_path();
    let mut config = HelpdeskConfig::load_or_default(&config_file);
    if let Some(data_dir) = args.resolve_data_dir() {
        config.general.data_dir = data_dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting helpdesk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    let db_path = data_dir.join("helpdesk.db");
    let database = Arc::new(Database::new(&db_path)?);
    tracing::info!(path = %db_path.display(), "SQLite database opened");

    let customers = CustomerRepository::new(database);
    if args.seed_demo_data {
        customers.seed_demo_data()?;
    }

    // Model client for the fallback path.
    let model: Arc<dyn LanguageModel> = Arc::new(OllamaClient::new(&config.model)?);
    tracing::info!(
        endpoint = %config.model.endpoint,
        model = %config.model.model,
        "Model client ready"
    );

    // Chat router + HTTP state.
    let chat = ChatRouter::new(
        customers.clone(),
        model,
        config.chat.max_message_length,
    );
    let state = AppState::new(chat, customers);

    // HTTP server.
    let port = args.resolve_port(config.general.port);
    tracing::info!("Chat widget at http://127.0.0.1:{}/", port);
    routes::start_server(port, state).await?;

    Ok(())
}
