use std::path::PathBuf;

use chrono::FixedOffset;
use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::due::{parse_utc_offset, BucketLabels};
use crate::error::{DueError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REMINDER_WINDOW: u32 = 30;
const DEFAULT_TIME_ZONE: &str = "UTC+00:00";

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub token: Option<String>,
    pub repository: Option<String>,
    pub api_url: String,
    pub reminder_window: u32,
    pub time_zone: String,
    pub log_level: String,
    pub labels: BucketLabels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            api_url: DEFAULT_API_URL.to_string(),
            reminder_window: DEFAULT_REMINDER_WINDOW,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            log_level: "info".to_string(),
            labels: BucketLabels::default(),
        }
    }
}

/// `owner/name` of the repository to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(DueError::InvalidRepository(value.to_string())),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| DueError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::from_toml(&contents).map_err(|e| DueError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "due-reminder")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(DueError::NoConfigDir)
    }

    /// Get token with env var taking precedence over config file
    pub fn token(&self) -> Result<String> {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                return Ok(token);
            }
        }

        self.token.clone().ok_or(DueError::MissingToken)
    }

    /// Get repository, preferring explicit argument over env var over config
    pub fn resolve_repository(&self, explicit: Option<&str>) -> Result<RepoRef> {
        pick_repository(
            explicit,
            std::env::var("GITHUB_REPOSITORY").ok(),
            self.repository.as_deref(),
        )
    }

    /// Reminder window in minutes, preferring explicit argument over env var
    pub fn resolve_window(&self, explicit: Option<u32>) -> u32 {
        if let Some(window) = explicit {
            return window;
        }

        match std::env::var("REMINDER_WINDOW") {
            Ok(value) => value.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "Ignoring invalid REMINDER_WINDOW '{value}', using {}",
                    self.reminder_window
                );
                self.reminder_window
            }),
            Err(_) => self.reminder_window,
        }
    }

    pub fn reference_zone(&self) -> Result<FixedOffset> {
        parse_utc_offset(self.time_zone.trim())
            .ok_or_else(|| DueError::InvalidTimeZone(self.time_zone.clone()))
    }

    pub fn api_base(&self) -> Result<Url> {
        Url::parse(&self.api_url).map_err(|_| DueError::InvalidUrl(self.api_url.clone()))
    }
}

/// First non-blank of flag, environment and config value, in that order.
fn pick_repository(
    explicit: Option<&str>,
    env: Option<String>,
    configured: Option<&str>,
) -> Result<RepoRef> {
    let value = [explicit, env.as_deref(), configured]
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .ok_or(DueError::MissingRepository)?;

    RepoRef::parse(value)
}
