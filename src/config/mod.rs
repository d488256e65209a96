use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::services::ViewRequest,
    currency::MoneyFormat,
    errors::Result,
    ledger::{EmptyBuckets, Interval},
    utils::{
        app_data_dir,
        persistence::{ensure_dir, write_atomic},
    },
};

const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "database.json";
const BACKUP_DIR: &str = "backups";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    pub default_interval: Interval,
    pub show_empty_buckets: bool,
    pub display_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let request = ViewRequest::default();
        Self {
            currency_symbol: MoneyFormat::default().symbol,
            database_path: None,
            backup_path: None,
            default_interval: request.interval,
            show_empty_buckets: true,
            display_limit: request.display_limit,
        }
    }
}

impl Config {
    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::with_symbol(self.currency_symbol.clone())
    }

    /// View settings seeded from the stored defaults.
    pub fn view_request(&self) -> ViewRequest {
        ViewRequest {
            interval: self.default_interval,
            empty_buckets: if self.show_empty_buckets {
                EmptyBuckets::Show
            } else {
                EmptyBuckets::Suppress
            },
            display_limit: self.display_limit,
            ..ViewRequest::default()
        }
    }
}

/// Loads and saves [`Config`] inside the application data directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configured database file, or `database.json` in the data directory.
    pub fn database_path(&self, config: &Config) -> PathBuf {
        config
            .database_path
            .clone()
            .unwrap_or_else(|| self.base.join(DATABASE_FILE))
    }

    pub fn backup_dir(&self, config: &Config) -> PathBuf {
        config
            .backup_path
            .clone()
            .unwrap_or_else(|| self.base.join(BACKUP_DIR))
    }
}
