//! Echochat CLI — entry point.
//!
//! # Commands
//!
//! - `echochat chat [-s SESSION]` — interactive chat REPL
//! - `echochat history list|show|clear` — inspect stored sessions
//! - `echochat onboard` — write a default config file
//! - `echochat status` — show configuration and storage status

mod helpers;
mod history_cmd;
mod onboard;
mod repl;
mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use echochat_chat::ChatController;
use echochat_core::config::{load_config, Config};
use echochat_core::session::HistoryStore;
use echochat_core::storage::FileStore;
use echochat_core::types::SessionId;
use echochat_responder::StubResponder;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Echochat — a terminal chat with locally stored session history
#[derive(Parser)]
#[command(name = "echochat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat
    Chat {
        /// Resume a stored session by id instead of starting a new one
        #[arg(short, long)]
        session: Option<SessionId>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Inspect or clear stored sessions
    History {
        #[command(subcommand)]
        action: history_cmd::HistoryCommands,
    },

    /// Write a default configuration file
    Onboard,

    /// Show configuration and storage status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { session, logs } => {
            init_logging(logs);
            run_chat(session).await
        }
        Commands::History { action } => {
            init_logging(false);
            history_cmd::dispatch(action)
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(session: Option<SessionId>) -> Result<()> {
    let config = load_config(None);
    let mut controller = build_controller(&config)?;

    if let Some(id) = session {
        if controller.load_session(id) {
            info!(session = %id, "resuming session");
        } else {
            anyhow::bail!("no stored session with id {id}");
        }
    }

    repl::run(controller).await
}

/// Open the history store described by `config`.
pub fn open_history(config: &Config) -> Result<HistoryStore> {
    let data_dir = helpers::expand_tilde(&config.storage.data_dir);
    let store = FileStore::new(Some(data_dir.clone()))
        .with_context(|| format!("failed to open storage at {}", data_dir.display()))?;

    Ok(HistoryStore::with_options(
        Arc::new(store),
        config.storage.history_key.clone(),
        config.storage.history_limit,
    ))
}

/// Build a `ChatController` from the loaded configuration.
pub fn build_controller(config: &Config) -> Result<ChatController> {
    let history = open_history(config)?;
    let responder = StubResponder::from_millis(config.responder.delay_ms);

    Ok(ChatController::new(
        history,
        Arc::new(responder),
        config.chat.greeting.clone(),
    ))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("echochat=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
