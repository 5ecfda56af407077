use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::{BootError, Result};

/// Config key for the push relay endpoint forwarded to the mobile client.
pub const PUSH_RELAY_SERVER_URL: &str = "push_relay_server_url";

/// Process-wide, read-only site configuration.
///
/// Loaded from the site config JSON file. `build_version` is pulled out as a
/// typed field; every other key stays reachable through [`SiteConfig::get`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    build_version: Option<String>,
    #[serde(flatten)]
    values: Map<String, Value>,
}

impl SiteConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| BootError::ConfigRead {
            path: shown.clone(),
            source,
        })?;
        let config = Self::from_json_str(&raw).map_err(|source| BootError::ConfigParse {
            path: shown.clone(),
            source,
        })?;
        tracing::debug!(path = %shown, keys = config.values.len(), "loaded site config");
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Builder-style setter, mostly handy for tests and embedding hosts.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "build_version" {
            self.build_version = value.as_str().map(str::to_owned);
        } else {
            self.values.insert(key, value);
        }
        self
    }

    /// Absent keys are "not set", never an error.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Opaque build identifier; falls back to the crate version.
    pub fn build_version(&self) -> &str {
        self.build_version
            .as_deref()
            .unwrap_or(env!("CARGO_PKG_VERSION"))
    }
}
