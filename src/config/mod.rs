use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_REST_URL: &str = "RSTOPWATCH_REST_URL";
pub const ENV_API_KEY: &str = "RSTOPWATCH_API_KEY";

/// Which table store keeps the saved times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local SQLite file
    #[default]
    Sqlite,
    /// Hosted PostgREST-compatible service
    Rest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub rest: RestConfig,
}

fn default_table() -> String {
    "saved_times".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            database: default_database(),
            rest: RestConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rstopwatch")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rstopwatch")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rstopwatch.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rstopwatch.sqlite")
    }

    /// Load configuration from the standard location, or defaults if the file
    /// does not exist. Environment overrides are applied on top.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_from(&Self::config_file())?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Load configuration from an explicit file, without environment overrides.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// `RSTOPWATCH_REST_URL` / `RSTOPWATCH_API_KEY` win over the file so
    /// credentials can stay out of it.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(ENV_REST_URL)
            && !url.trim().is_empty()
        {
            self.rest.url = Some(url);
        }
        if let Ok(key) = env::var(ENV_API_KEY)
            && !key.trim().is_empty()
        {
            self.rest.api_key = Some(key);
        }
    }

    /// Database path with a leading `~/` expanded.
    pub fn database_path(&self) -> String {
        expand_tilde(&self.database).to_string_lossy().to_string()
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create the configuration directory and file.
    ///
    /// `custom_db` may be absolute or relative to the configuration
    /// directory. With `is_test` nothing is written besides the directory.
    /// Returns the configuration that was (or would have been) written.
    pub fn init_all(custom_db: Option<&str>, backend: Backend, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            backend,
            database: db_path.to_string_lossy().to_string(),
            rest: RestConfig::default(),
        };

        if !is_test {
            let path = Self::config_file();
            if path.exists() {
                return Err(AppError::Config(format!(
                    "{} already exists; use `config --edit` to change it",
                    path.display()
                )));
            }
            fs::write(&path, config.to_yaml()?)?;
        }

        Ok(config)
    }
}
