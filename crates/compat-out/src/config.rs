//! Render configuration
//!
//! Loaded from a YAML file, then overridden by `COMPAT_*` environment
//! variables:
//!
//! ```yaml
//! locale: de
//! strings_path: grammars/compat-strings.yaml
//! contribute_url: https://github.com/mdn/browser-compat-data
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::strings::StringTable;
use crate::RenderError;

pub const ENV_LOCALE: &str = "COMPAT_LOCALE";
pub const ENV_STRINGS_PATH: &str = "COMPAT_STRINGS_PATH";
pub const ENV_CONTRIBUTE_URL: &str = "COMPAT_CONTRIBUTE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Active locale for table labels and messages
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Strings file; the builtin one when unset
    #[serde(default)]
    pub strings_path: Option<PathBuf>,

    /// Linked from the "no data" message
    #[serde(default = "default_contribute_url")]
    pub contribute_url: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_contribute_url() -> String {
    "https://github.com/mdn/browser-compat-data".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            strings_path: None,
            contribute_url: default_contribute_url(),
        }
    }
}

impl RenderConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Apply `COMPAT_*` environment overrides
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable source
    pub fn apply_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = var(ENV_LOCALE) {
            self.locale = locale;
        }
        if let Some(path) = var(ENV_STRINGS_PATH) {
            self.strings_path = Some(PathBuf::from(path));
        }
        if let Some(url) = var(ENV_CONTRIBUTE_URL) {
            self.contribute_url = url;
        }
        self
    }

    /// Load the configured strings and select the configured locale
    pub fn string_table(&self) -> Result<StringTable, RenderError> {
        let table = match &self.strings_path {
            Some(path) => StringTable::load(path)?,
            None => StringTable::builtin()?,
        };
        Ok(table.with_locale(self.locale.clone()))
    }
}
