//! Interactive REPL.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! Plain lines are sent to the chat; lines starting with `/` are commands.

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use echochat_chat::{ChatController, Dialog, SendError};
use echochat_core::types::{Session, SessionId};

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

const HELP_TEXT: &str = "\
  /new            start a new chat
  /history        list stored chats
  /load <n|id>    reopen a stored chat by list number or id
  /help           show this help
  exit            quit";

/// A parsed slash command.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    New,
    History,
    Load(String),
    Help,
    Unknown(String),
}

/// Run the interactive REPL loop.
pub async fn run(mut chat: ChatController) -> Result<()> {
    helpers::print_banner(chat.responder_name());
    helpers::print_transcript(chat.messages());

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C — exit cleanly
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        let _ = editor.add_history_entry(&input);

        if let Some(command) = parse_command(trimmed) {
            handle_command(&mut chat, &mut editor, command);
            continue;
        }

        debug!(session = %chat.active_id(), "sending input");
        helpers::print_thinking();

        match chat.send(&input).await {
            Ok(reply) => {
                helpers::clear_thinking();
                helpers::print_message(&reply);
            }
            Err(SendError::EmptyInput) => helpers::clear_thinking(),
            Err(e) => {
                helpers::clear_thinking();
                eprintln!("\n❌ {e}\n");
            }
        }
    }

    save_history(&mut editor);

    Ok(())
}

fn handle_command(chat: &mut ChatController, editor: &mut Editor<(), DefaultHistory>, command: ReplCommand) {
    match command {
        ReplCommand::New => {
            if chat.request_new_chat() == Dialog::ConfirmNewChat {
                let answer = editor
                    .readline("Start a new chat? This one stays in history. [y/N] ")
                    .unwrap_or_default();
                if is_yes(&answer) {
                    chat.confirm_dialog();
                } else {
                    chat.cancel_dialog();
                    println!("{}", "Keeping the current chat.".dimmed());
                    return;
                }
            }
            println!("{}", "New chat started.".green());
            helpers::print_transcript(chat.messages());
        }
        ReplCommand::History => helpers::print_history(chat.history().sessions()),
        ReplCommand::Load(arg) => {
            let loaded = resolve_session(&arg, chat.history().sessions())
                .is_some_and(|id| chat.load_session(id));
            if loaded {
                println!("{}", format!("Loaded chat {}.", chat.active_id()).green());
                helpers::print_transcript(chat.messages());
            } else {
                eprintln!("No stored chat matches '{arg}'. Try /history.");
            }
        }
        ReplCommand::Help => println!("{HELP_TEXT}"),
        ReplCommand::Unknown(name) => eprintln!("Unknown command '{name}'. Try /help."),
    }
}

/// Parse a `/command [arg]` line. Returns `None` for ordinary chat input.
fn parse_command(input: &str) -> Option<ReplCommand> {
    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default().to_string();

    Some(match name.as_str() {
        "new" => ReplCommand::New,
        "history" => ReplCommand::History,
        "load" => ReplCommand::Load(arg),
        "help" => ReplCommand::Help,
        _ => ReplCommand::Unknown(name),
    })
}

/// Resolve a `/load` argument: a 1-based position in the list, or a session id.
fn resolve_session(arg: &str, sessions: &[Session]) -> Option<SessionId> {
    let n: i64 = arg.trim().parse().ok()?;
    if n >= 1 && (n as usize) <= sessions.len() {
        return Some(sessions[n as usize - 1].id);
    }
    sessions.iter().map(|s| s.id).find(|id| id.as_i64() == n)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the prompt history file.
fn history_path() -> std::path::PathBuf {
    echochat_core::utils::get_data_path().join("history").join("cli_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
