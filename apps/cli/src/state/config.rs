//! # Configuration
//!
//! Application configuration loaded at start-up.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--user`, `--password`)
//! 2. Environment variables (`PEX_*`)
//! 3. Defaults (this file)
//!
//! Read-only after start-up.

use std::path::PathBuf;

use directories::ProjectDirs;
use pex_core::auth::Credentials;
use serde::Serialize;

/// Default text-generation model for advisory text.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "pex.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Folder holding the database file.
    pub data_dir: PathBuf,

    /// Explicit database file, overrides `data_dir`.
    pub database_path: Option<PathBuf>,

    /// Store name shown in report headers.
    pub store_name: String,

    /// Expected login.
    #[serde(skip)]
    pub credentials: Credentials,

    /// API key for advisory text. Without one, advice falls back to the
    /// static message.
    #[serde(skip)]
    pub gemini_api_key: Option<String>,

    /// Model used for advisory text.
    pub gemini_model: String,
}

impl Default for AppConfig {
    /// Defaults suitable for a single store.
    ///
    /// ## Default Values
    /// - Data dir: platform data folder (`~/.local/share/pex` on Linux), or
    ///   the working directory when none can be determined
    /// - Store: "PEX"
    /// - Login: CATANDUVA / LOJA 04
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            database_path: None,
            store_name: "PEX".to_string(),
            credentials: Credentials::default(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `PEX_DATA_DIR`: Folder for the database file
    /// - `PEX_STORE_NAME`: Store name in report headers
    /// - `PEX_LOGIN_USER` / `PEX_LOGIN_PASSWORD`: Expected login
    /// - `PEX_GEMINI_API_KEY`: Advisory text API key
    /// - `PEX_GEMINI_MODEL`: Advisory text model
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = var("PEX_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(name) = var("PEX_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(user) = var("PEX_LOGIN_USER") {
            config.credentials.user = user;
        }

        if let Some(password) = var("PEX_LOGIN_PASSWORD") {
            config.credentials.password = password;
        }

        config.gemini_api_key = var("PEX_GEMINI_API_KEY");

        if let Some(model) = var("PEX_GEMINI_MODEL") {
            config.gemini_model = model;
        }

        config
    }

    /// Sets an explicit database file.
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.database_path = path;
        }
        self
    }

    /// The database file to open.
    pub fn database_file(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DATABASE_FILE))
    }
}

/// Platform-specific data folder.
///
/// - **Linux**: `~/.local/share/pex`
/// - **macOS**: `~/Library/Application Support/br.pex.pex`
/// - **Windows**: `%APPDATA%\pex\pex\data`
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("br", "pex", "pex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
