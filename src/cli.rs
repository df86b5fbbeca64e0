use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "due-reminder")]
#[command(about = "Label issues by due date and post reminder comments", version)]
#[command(after_help = "ISSUE HEADER:
    due-date: 2024-06-01
    due-time: 09:00
    time-zone: UTC-05:00
    reminders: 10m 2h 3d 1w
    ---
    (free-form issue text)

EXAMPLES:
    due-reminder run --repo octo/widgets      Label issues and post due reminders
    due-reminder run --dry-run                Show what would change
    due-reminder check issue.md               Inspect a single issue body")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress informational messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan open issues, update bucket labels and post due reminders
    #[command(after_help = "EXAMPLES:
    due-reminder run --repo octo/widgets
    due-reminder run --window 60
    due-reminder run --dry-run --now 2024-01-09T00:00:00Z")]
    Run(RunArgs),
    /// Parse an issue body and show the decisions a run would make
    #[command(after_help = "EXAMPLES:
    due-reminder check issue.md
    cat issue.md | due-reminder check --now 2024-01-09T08:00:00Z")]
    Check(CheckArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    due-reminder completions bash > ~/.bash_completion.d/due-reminder
    due-reminder completions zsh > ~/.zfunc/_due-reminder")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Args)]
pub struct RunArgs {
    /// Repository as OWNER/NAME (defaults to GITHUB_REPOSITORY or config)
    #[arg(long)]
    pub repo: Option<String>,

    /// Reminder window in minutes (defaults to REMINDER_WINDOW or config)
    #[arg(long)]
    pub window: Option<u32>,

    /// Compute decisions without changing labels or posting comments
    #[arg(long)]
    pub dry_run: bool,

    /// Evaluate as if the current time were this RFC 3339 timestamp
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// File holding the issue body (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Reminder window in minutes (defaults to REMINDER_WINDOW or config)
    #[arg(long)]
    pub window: Option<u32>,

    /// Evaluate as if the current time were this RFC 3339 timestamp
    #[arg(long)]
    pub now: Option<String>,
}
