//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FOODIPY_DATA_DIR` - Directory holding the store file (default: the
//!   platform data dir)
//! - `FOODIPY_ADMIN_PASSWORD` - Password the bootstrap admin is created
//!   with (default: `admin123`)

use std::path::PathBuf;

use directories::ProjectDirs;
use secrecy::SecretString;
use thiserror::Error;

/// File name of the JSON store inside the data directory.
const STORE_FILE: &str = "store.json";

/// Default password for the bootstrap admin account.
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a data directory for this platform")]
    NoDataDir,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory the store file lives in.
    pub data_dir: PathBuf,
    /// Password the bootstrap admin is created with on first run.
    pub admin_password: SecretString,
}

impl AppConfig {
    /// Load configuration from environment variables, reading a `.env`
    /// file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoDataDir` if `FOODIPY_DATA_DIR` is unset and
    /// the platform provides no data directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = match std::env::var("FOODIPY_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => ProjectDirs::from("com", "foodipy", "foodipy")
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };

        let admin_password = std::env::var("FOODIPY_ADMIN_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_owned());

        Ok(Self {
            data_dir,
            admin_password: SecretString::from(admin_password),
        })
    }

    /// Configuration rooted at an explicit data directory, with the
    /// default admin password (tests, embedders).
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
        }
    }

    /// Full path of the JSON store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}
