//! Client configuration

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use roster_http::RosterClientBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Prefix of environment overrides, e.g. `ROSTER__API__BASE_URL`
pub const ENV_PREFIX: &str = "ROSTER";

/// Main client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the session is persisted
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,

    /// Request timeout in seconds (0 disables the timeout)
    pub timeout_secs: u64,

    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the platform state directory
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration: defaults, then the optional file, then `ROSTER__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a value is invalid
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::Message(format!("api.base_url: invalid URL - {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "api.base_url: unsupported scheme {}",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// Directory holding the persisted session
    pub fn state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.state_dir {
            return dir.clone();
        }

        if let Some(dirs) = ProjectDirs::from("org", "Roster", "roster") {
            dirs.data_dir().to_path_buf()
        } else {
            warn!("Failed to determine platform-specific directories, using ./.roster");
            PathBuf::from(".roster")
        }
    }

    /// Client builder preconfigured from the `api` section
    pub fn client_builder(&self) -> RosterClientBuilder {
        let mut builder = RosterClientBuilder::new().base_url(&self.api.base_url);
        if self.api.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(self.api.timeout_secs));
        }
        if let Some(agent) = &self.api.user_agent {
            builder = builder.user_agent(agent);
        }
        builder
    }
}
