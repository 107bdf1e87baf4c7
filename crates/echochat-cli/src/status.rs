//! `echochat status` — show configuration and storage status.

use anyhow::Result;
use colored::Colorize;

use echochat_core::config::{get_config_path, load_config};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "💬 Echochat Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        found_marker(config_path.exists())
    );

    let data_dir = crate::helpers::expand_tilde(&config.storage.data_dir);
    println!(
        "  {:<18} {} {}",
        "Storage:".bold(),
        data_dir.display(),
        found_marker(data_dir.exists())
    );

    let history = crate::open_history(&config)?;
    println!(
        "  {:<18} {} / {} session(s) under '{}'",
        "History:".bold(),
        history.len(),
        history.limit(),
        config.storage.history_key
    );

    println!(
        "  {:<18} {}",
        "Reply delay:".bold(),
        format!("{} ms", config.responder.delay_ms).dimmed()
    );

    let greeting = match &config.chat.greeting {
        Some(g) => g.clone(),
        None => "(none)".dimmed().to_string(),
    };
    println!("  {:<18} {}", "Greeting:".bold(), greeting);

    println!();

    Ok(())
}

fn found_marker(exists: bool) -> String {
    if exists {
        "✓".green().to_string()
    } else {
        "(not found)".red().to_string()
    }
}
