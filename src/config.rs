//! Credential storage for switch-branch
//!
//! Stores the GitHub access token in a JSON file under the user's config
//! directory, outside of any repository.

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::WorkflowError;

/// Directory created under the platform config dir
pub const CONFIG_DIR_NAME: &str = "switch-branch";

/// The name of the credential file
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Contents of the credential file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Version of the config file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// GitHub personal access token
    #[serde(default)]
    pub access_token: Option<String>,

    /// When the token was stored
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    1
}

impl Config {
    /// Default location: `<config dir>/switch-branch/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from a file, or create default if it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

            Ok(config)
        } else {
            Ok(Config {
                version: default_version(),
                ..Config::default()
            })
        }
    }

    /// Save config to file, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        let mut file = owner_only(OpenOptions::new().write(true).create(true).truncate(true))
            .open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        // A file created by an older version keeps its mode on open
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict config file: {}", path.display()))?;
        }

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// The stored token, treating an empty string as absent
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Token with everything but the last four characters hidden
    pub fn masked_token(&self) -> Option<String> {
        self.token().map(|token| {
            let chars: Vec<char> = token.chars().collect();
            let visible = chars.len().min(4);
            let tail: String = chars[chars.len() - visible..].iter().collect();
            format!("{}{}", "*".repeat(chars.len() - visible), tail)
        })
    }

    /// Replace the stored token
    pub fn set_token(&mut self, token: &str) {
        self.access_token = Some(token.to_string());
        self.saved_at = Some(Utc::now());
    }

    /// Drop the stored token
    pub fn clear_token(&mut self) {
        self.access_token = None;
        self.saved_at = None;
    }
}

/// The token file is readable by its owner only
#[cfg(unix)]
fn owner_only(options: &mut OpenOptions) -> &mut OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600)
}

#[cfg(not(unix))]
fn owner_only(options: &mut OpenOptions) -> &mut OpenOptions {
    options
}

/// Persistence for "the" credential
pub trait CredentialStore: Send + Sync {
    /// The stored credential, if any
    fn get(&self) -> Option<String>;

    /// Persist a new credential
    fn set(&self, token: &str) -> Result<(), WorkflowError>;
}

/// Credential store backed by the JSON config file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        match Config::load(&self.path) {
            Ok(config) => config.token().map(str::to_string),
            Err(e) => {
                // An unreadable file behaves like a missing token
                debug!("Ignoring credential file: {:#}", e);
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), WorkflowError> {
        let mut config = Config::load(&self.path).unwrap_or_default();
        config.version = default_version();
        config.set_token(token);
        config
            .save(&self.path)
            .map_err(|e| WorkflowError::Storage(format!("{:#}", e)))?;

        debug!("Saved access token to {}", self.path.display());
        Ok(())
    }
}
