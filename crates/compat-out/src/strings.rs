//! Localized strings for compat tables.
//!
//! Strings live in a YAML file keyed by locale:
//!
//! ```yaml
//! version: "1.0"
//! default_locale: en-US
//! locales:
//!   en-US:
//!     feature: "Feature"
//!     noData: "No data for {{query}}"
//! ```
//!
//! Lookups fall back to the default locale, then to the key itself.
//! Placeholders are filled with Handlebars, without HTML escaping.

use handlebars::Handlebars;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::RenderError;

/// Strings file shipped with the crate
const BUILTIN_STRINGS: &str = include_str!("../../../grammars/compat-strings.yaml");

/// Resolves string keys to locale text.
pub trait Localize {
    /// Text for `key` in the active locale.
    fn text(&self, key: &str) -> String;

    /// Text for `key` with `{{placeholder}}` tokens filled from `data`.
    fn format(&self, key: &str, data: &Value) -> String;
}

/// Top-level strings file structure
#[derive(Debug, Clone, Deserialize)]
pub struct StringsFile {
    pub version: String,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    pub locales: HashMap<String, HashMap<String, String>>,
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl StringsFile {
    /// Parse a strings file from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        let file: StringsFile = serde_yaml::from_str(yaml)?;
        if !file.locales.contains_key(&file.default_locale) {
            return Err(RenderError::Strings(format!(
                "default locale {} has no strings",
                file.default_locale
            )));
        }
        Ok(file)
    }
}

/// String table for one active locale.
pub struct StringTable {
    file: StringsFile,
    locale: String,
    handlebars: Handlebars<'static>,
}

impl StringTable {
    pub fn new(file: StringsFile) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);

        let locale = file.default_locale.clone();
        StringTable { file, locale, handlebars }
    }

    /// The strings embedded in the crate
    pub fn builtin() -> Result<Self, RenderError> {
        Self::from_yaml(BUILTIN_STRINGS)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        Ok(Self::new(StringsFile::from_yaml(yaml)?))
    }

    /// Load from a file path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Switch the active locale. Unknown locales resolve everything through the default.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        if !self.file.locales.contains_key(&locale) {
            tracing::warn!(%locale, fallback = %self.file.default_locale, "unknown locale");
        }
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Locales present in the strings file, sorted
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.file.locales.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Raw string for `key`, walking active locale then default locale
    pub fn lookup(&self, key: &str) -> Option<&str> {
        [self.locale.as_str(), self.file.default_locale.as_str()]
            .into_iter()
            .find_map(|locale| self.file.locales.get(locale)?.get(key))
            .map(String::as_str)
    }
}

impl Localize for StringTable {
    fn text(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(text) => text.to_string(),
            None => {
                tracing::warn!(key, locale = %self.locale, "missing localized string");
                key.to_string()
            }
        }
    }

    fn format(&self, key: &str, data: &Value) -> String {
        let template = self.text(key);
        self.handlebars
            .render_template(&template, data)
            .unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "failed to interpolate localized string");
                template
            })
    }
}
