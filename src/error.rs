use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DueError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token found. Set GITHUB_TOKEN env var or add token to ~/.config/due-reminder/config.toml"
    )]
    MissingToken,

    #[error(
        "Repository not specified. Pass --repo, set GITHUB_REPOSITORY, or add repository to config"
    )]
    MissingRepository,

    #[error("Invalid repository '{0}', expected OWNER/NAME")]
    InvalidRepository(String),

    #[error("Invalid time zone '{0}', expected UTC+HH:MM or UTC-HH:MM")]
    InvalidTimeZone(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid --now value '{0}', expected an RFC 3339 timestamp")]
    InvalidNow(String),

    #[error("{count} issue(s) failed to update")]
    IssueFailures { count: usize },
}

pub type Result<T> = std::result::Result<T, DueError>;
