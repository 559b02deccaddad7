//! Configuration file for the `casebook` binary.
//!
//! The file is TOML, found at `--config`, else `$CASEBOOK_CONFIG`, else
//! `<platform config dir>/casebook/config.toml`. A missing file means
//! defaults. Command-line flags and their environment variables override
//! what the file says.
//!
//! ```toml
//! [store]
//! url = "https://abc.example.co"
//! api_key = "public-anon-key"
//! table = "case_studies"
//!
//! [site]
//! company_name = "Northwind Consulting"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use casebook_client::{DEFAULT_TABLE, StoreConfig};
use casebook_core::{Error, Result};

/// Project name used for the config directory and messages.
pub const PROJECT_NAME: &str = "casebook";

/// Company named in generated excerpts and the call to action.
pub const DEFAULT_COMPANY_NAME: &str = "Indrasol Solutions";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasebookConfig {
    /// Remote store connection
    pub store: StoreSection,
    /// Site presentation
    pub site: SiteSection,
}

/// `[store]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Project base URL
    pub url: String,
    /// Public API key
    pub api_key: String,
    /// Table holding case studies
    pub table: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

/// `[site]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Company name shown to readers
    pub company_name: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
        }
    }
}

impl CasebookConfig {
    /// `<platform config dir>/casebook/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, else the default location.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load from the resolved path; a missing file yields defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply flag/environment overrides; `None` keeps the file value.
    pub fn with_overrides(mut self, url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = url {
            self.store.url = url;
        }
        if let Some(api_key) = api_key {
            self.store.api_key = api_key;
        }
        self
    }

    /// Connection settings for the REST client.
    pub fn store_config(&self) -> Result<StoreConfig> {
        if self.store.url.trim().is_empty() {
            return Err(Error::config(format!(
                "store.url is not set. Set it in the config file (`{PROJECT_NAME} config path`), \
                 pass --store-url, or use --source-file"
            )));
        }
        Ok(StoreConfig::new(&self.store.url, &self.store.api_key).with_table(&self.store.table))
    }
}
