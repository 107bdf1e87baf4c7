//! Shared CLI helpers — path expansion, message and history printing, banner.

use std::path::PathBuf;

use colored::Colorize;

use echochat_core::types::{Message, Sender, Session};
use echochat_core::utils::format_short_date;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print a single chat message.
pub fn print_message(message: &Message) {
    match message.sender {
        Sender::User => println!("{} {}", "You:".blue().bold(), message.text),
        Sender::Bot => {
            println!();
            println!("{}", "💬 Echochat".cyan().bold());
            println!("{}", message.text);
            println!();
        }
    }
}

/// Print a whole transcript (e.g. after loading a session).
pub fn print_transcript(messages: &[Message]) {
    for message in messages {
        print_message(message);
    }
}

/// One history row: `[n] Oct 19, 02:30 PM  Title...`.
pub fn history_row(index: usize, session: &Session) -> String {
    format!(
        "{} {}  {}",
        format!("[{}]", index).dimmed(),
        format_short_date(&session.timestamp).bold(),
        session.title
    )
}

/// Print the session list, newest first.
pub fn print_history(sessions: &[Session]) {
    println!();
    println!("{}", "🕘 Chat History".cyan().bold());
    if sessions.is_empty() {
        println!("{}", "No chat history yet".dimmed());
    }
    for (i, session) in sessions.iter().enumerate() {
        println!("  {}", history_row(i + 1, session));
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner(responder: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!(
        "{}  v{}  {}",
        "💬 Echochat".cyan().bold(),
        version.dimmed(),
        format!("responder: {responder}").dimmed()
    );
    println!(
        "{}",
        "Type a message, \"/help\" for commands, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder while the reply is pending.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use echochat_core::types::SessionId;

    #[test]
    fn expand_tilde_home() {
        let result = expand_tilde("~/foo/bar");
        assert!(result.ends_with("foo/bar"));
        assert!(!result.starts_with("~"));
    }

    #[test]
    fn expand_tilde_no_tilde() {
        let result = expand_tilde("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn expand_tilde_relative() {
        let result = expand_tilde("relative/path");
        assert_eq!(result, PathBuf::from("relative/path"));
    }

    #[test]
    fn history_row_contains_index_and_title() {
        colored::control::set_override(false);
        let session = Session {
            id: SessionId(1),
            timestamp: "2024-10-19T14:30:00Z".parse().unwrap(),
            messages: vec![Message::user("hello")],
            title: "hello...".to_string(),
        };
        let row = history_row(3, &session);
        assert!(row.starts_with("[3] Oct "));
        assert!(row.ends_with("  hello..."));
    }
}
