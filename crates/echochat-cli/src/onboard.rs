//! `echochat onboard` — initialize configuration and storage.
//!
//! - Creates `~/.echochat/config.json` with defaults
//! - Creates the storage directory

use anyhow::Result;
use colored::Colorize;

use echochat_core::config::{get_config_path, load_config, save_config};

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "💬 Echochat — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();

    // 1. Create config if it doesn't exist
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(None); // defaults
        save_config(&config, Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. Ensure storage directory
    let config = load_config(Some(&config_path));
    let data_dir = crate::helpers::expand_tilde(&config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    println!("  {} storage at {}", "✓".green(), data_dir.display());

    println!();
    println!(
        "{}",
        "  Setup complete! Run `echochat chat` to start chatting.".green()
    );
    println!();

    Ok(())
}
