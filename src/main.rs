mod cli;
mod client;
mod commands;
mod config;
mod due;
mod error;
mod output;
mod repository;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use dotenvy::dotenv;

use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_logging(level: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "due-reminder", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        command => {
            let config = Config::load()?;
            init_logging(&config.log_level, cli.verbose);

            match command {
                Commands::Run(args) => {
                    commands::run::run(&config, args).await?;
                }
                Commands::Check(args) => {
                    commands::check::run(&config, args).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
