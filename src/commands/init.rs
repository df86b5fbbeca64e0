use std::io::{self, Write};

use serde::Serialize;

use crate::config::{Config, RepoRef, DEFAULT_REMINDER_WINDOW};
use crate::error::{DueError, Result};

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

#[derive(Serialize)]
struct ConfigFile<'a> {
    token: &'a str,
    repository: &'a str,
    reminder_window: u32,
}

fn render_config(token: &str, repository: &str, reminder_window: u32) -> Result<String> {
    let file = ConfigFile {
        token,
        repository,
        reminder_window,
    };
    Ok(toml::to_string(&file)?)
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("due-reminder Configuration");
    println!("==========================\n");

    let token = prompt("Enter a GitHub token with issues write access: ")?;
    if token.is_empty() {
        return Err(DueError::MissingToken);
    }

    let repository = prompt("Enter the repository to scan (OWNER/NAME): ")?;
    RepoRef::parse(&repository)?;

    let window = prompt(&format!(
        "Reminder window in minutes [{DEFAULT_REMINDER_WINDOW}]: "
    ))?;
    let window: u32 = if window.is_empty() {
        DEFAULT_REMINDER_WINDOW
    } else {
        window.parse().unwrap_or(DEFAULT_REMINDER_WINDOW)
    };

    // Create config directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DueError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let config_content = render_config(&token, &repository, window)?;

    std::fs::write(&config_path, config_content).map_err(|e| DueError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now run 'due-reminder run'!");

    Ok(())
}
