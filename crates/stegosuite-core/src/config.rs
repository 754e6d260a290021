//! Where the transformation service lives and how to talk to it.
//!
//! Values are layered: built-in defaults, then a TOML file, then the
//! `STEGOSUITE_SERVER` environment variable, then whatever the caller
//! overrides (the CLI does that for its flags).
//!
//! ```toml
//! server = "http://127.0.0.1:5000"
//! encode_path = "/api/encode"
//! decode_path = "/api/decode"
//! timeout_secs = 120
//! download_name = "stego.png"
//! default_scheme = "dct"
//! keep_selection = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use log::debug;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::StegoSuiteError;
use crate::result::Result;
use crate::scheme::Scheme;
use crate::selection::{Direction, SelectionRetention};

/// Environment variable that overrides the configured server
pub const SERVER_ENV: &str = "STEGOSUITE_SERVER";

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
pub const DEFAULT_DOWNLOAD_NAME: &str = "stego.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the service
    pub server: String,
    pub encode_path: String,
    pub decode_path: String,
    /// `None` leaves completion entirely to the service
    pub timeout_secs: Option<u64>,
    /// Fixed name of the downloaded stego image
    pub download_name: String,
    pub default_scheme: Scheme,
    pub keep_selection: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            encode_path: "/api/encode".to_string(),
            decode_path: "/api/decode".to_string(),
            timeout_secs: None,
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
            default_scheme: Scheme::default(),
            keep_selection: true,
        }
    }
}

impl ServiceConfig {
    /// Reads a TOML file, keys that are missing keep their defaults.
    /// Values are only checked by [`ServiceConfig::validated`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|source| StegoSuiteError::ReadError { source })?;

        Ok(toml::from_str(&content)?)
    }

    /// Loads file and environment layers, the caller applies its overrides and validates last.
    ///
    /// An explicitly given file has to exist, the per-user file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::layered(explicit, std::env::var(SERVER_ENV).ok())
    }

    fn layered(explicit: Option<&Path>, env_server: Option<String>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::user_config_file().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!("Using configuration from {}", path.display());
                    Self::from_file(path)?
                }
                None => Self::default(),
            },
        };

        Ok(config.with_server_override(env_server))
    }

    /// `<config dir>/stegosuite/config.toml` of the current user
    pub fn user_config_file() -> Option<PathBuf> {
        ProjectDirs::from("org", "stegosuite", "stegosuite")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Replaces the server when a non-empty value is given
    pub fn with_server_override(mut self, server: Option<String>) -> Self {
        if let Some(server) = server.filter(|s| !s.trim().is_empty()) {
            self.server = server.trim().to_string();
        }
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn retention(&self) -> SelectionRetention {
        if self.keep_selection {
            SelectionRetention::Keep
        } else {
            SelectionRetention::Clear
        }
    }

    /// Full URL of the endpoint for a direction
    pub fn endpoint(&self, direction: Direction) -> Result<Url> {
        let base = self.base_url()?;
        let path = match direction {
            Direction::Encode => &self.encode_path,
            Direction::Decode => &self.decode_path,
        };

        base.join(path.trim_start_matches('/'))
            .map_err(|e| StegoSuiteError::InvalidConfig(format!("endpoint `{path}`: {e}")))
    }

    fn base_url(&self) -> Result<Url> {
        let mut base = Url::parse(&self.server)
            .map_err(|e| StegoSuiteError::InvalidConfig(format!("server `{}`: {e}", self.server)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(StegoSuiteError::InvalidConfig(format!(
                "server `{}` is not an http(s) URL",
                self.server
            )));
        }
        // joining replaces the last segment unless the base ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(base)
    }

    /// Checks the merged result of all layers
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        self.endpoint(Direction::Encode)?;
        self.endpoint(Direction::Decode)?;
        if self.download_name.trim().is_empty() {
            return Err(StegoSuiteError::InvalidConfig(
                "download_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
