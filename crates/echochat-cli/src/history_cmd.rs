//! `echochat history` — inspect stored sessions from the CLI.
//!
//! - `echochat history list` — newest first, with date and title
//! - `echochat history show <ID>` — print one session's transcript
//! - `echochat history clear` — forget every stored session

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;

use echochat_core::config::load_config;
use echochat_core::types::SessionId;
use echochat_core::utils::format_short_date;

use crate::helpers;

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List stored sessions
    List,

    /// Print the transcript of a stored session
    Show {
        /// Session id (as printed by `history list`)
        id: SessionId,
    },

    /// Delete all stored sessions
    Clear,
}

/// Dispatch a history subcommand.
pub fn dispatch(action: HistoryCommands) -> Result<()> {
    let config = load_config(None);
    let mut history = crate::open_history(&config)?;

    match action {
        HistoryCommands::List => {
            if history.is_empty() {
                println!("{}", "No chat history yet".dimmed());
            }
            for (i, session) in history.sessions().iter().enumerate() {
                println!(
                    "{}  {}",
                    helpers::history_row(i + 1, session),
                    format!("id={} · {} messages", session.id, session.messages.len()).dimmed()
                );
            }
        }
        HistoryCommands::Show { id } => {
            let Some(session) = history.get(id) else {
                bail!("no stored session with id {id}");
            };
            println!();
            println!(
                "{}  {}",
                session.title.bold(),
                format_short_date(&session.timestamp).dimmed()
            );
            println!();
            helpers::print_transcript(&session.messages);
        }
        HistoryCommands::Clear => {
            let count = history.len();
            if history.clear() {
                println!("  {} removed {} session(s)", "✓".green(), count);
            } else {
                bail!("failed to clear stored history");
            }
        }
    }

    Ok(())
}
