//! Configuration for the `meals` binary.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional TOML file (`--config`), then command-line flags and environment
//! variables. `RUST_LOG` overrides the log filter from every layer.

use std::path::{Path, PathBuf};

use clap::Parser;
use meals_core::DEFAULT_COLLECTION_URL;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const DEFAULT_LOG_FILTER: &str = "meals_app=info,meals_core=info";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "meals", version, about = "Fetch the meal collection once and print it")]
pub struct Cli {
    /// Collection endpoint to read, e.g. https://<db>.firebaseio.com/meals.json
    #[arg(long, env = "MEALS_URL")]
    pub url: Option<String>,

    /// TOML file with `[store]` and `[logging]` sections
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the view as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Shape of the optional TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub filter: Option<String>,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub log_filter: String,
    pub json: bool,
}

impl Config {
    /// Read the file named by `--config`, if any, and merge it under `cli`.
    pub fn load(cli: Cli) -> AppResult<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_path(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file, std::env::var("RUST_LOG").ok()))
    }

    pub fn merge(cli: Cli, file: FileConfig, rust_log: Option<String>) -> Self {
        Self {
            url: cli
                .url
                .or(file.store.url)
                .unwrap_or_else(|| DEFAULT_COLLECTION_URL.to_string()),
            log_filter: rust_log
                .or(file.logging.filter)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            json: cli.json,
        }
    }
}
