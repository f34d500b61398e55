//! COMPAT-OUT: Browser Compatibility Data to HTML Renderer
//!
//! Renders a node of the compatibility dataset into HTML tables, one per
//! browser catalog (desktop, mobile). A feature node (one carrying a
//! `__compat` block) becomes a detailed table with one row per sub-feature
//! and numbered footnotes; a container node becomes a summary table with one
//! row per child feature and basic support only.
//!
//! # Example
//!
//! ```ignore
//! use compat_core::Dataset;
//! use compat_out::{render, RenderConfig};
//!
//! let dataset = Dataset::load("data/compat.json")?;
//! let config = RenderConfig::default();
//! let strings = config.string_table()?;
//!
//! let html = render(&dataset, "css.properties.background-attachment", &strings, &config);
//! println!("{}", html);
//! ```

pub mod cells;
pub mod config;
pub mod flags;
pub mod footnotes;
pub mod notes;
pub mod strings;
pub mod tables;
pub mod version;

pub use config::RenderConfig;
pub use notes::NoteRegistry;
pub use strings::{Localize, StringTable};

use compat_core::{CompatSource, Platform};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while loading render inputs
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Strings load failed: {0}")]
    Strings(String),
}

/// Which table a query produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Detailed table for a single feature
    Feature,
    /// Summary table over a container of features
    Aggregate,
    /// Nothing found at the queried path
    NoData,
}

/// Result of a render operation
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    /// The rendered HTML fragment
    pub html: String,
    /// Table kind that was rendered
    pub kind: TableKind,
    /// Number of footnotes
    pub note_count: usize,
}

/// Render the compat tables for `query`.
pub fn render_compat(
    source: &dyn CompatSource,
    query: &str,
    strings: &dyn Localize,
    config: &RenderConfig,
) -> RenderResult {
    let node = match source.lookup(query) {
        Some(node) if node.is_feature() || !node.children.is_empty() => node,
        _ => {
            tracing::debug!(query, "no compat data");
            return RenderResult {
                html: no_data_message(query, strings, config),
                kind: TableKind::NoData,
                note_count: 0,
            };
        }
    };

    let mut html = tab_control(strings);
    let (kind, note_count) = match &node.compat {
        Some(block) => {
            tracing::debug!(query, rows = block.len(), "rendering feature table");
            let registry = NoteRegistry::collect(block);
            for platform in Platform::ALL {
                let table = tables::feature_table_with(block, platform.catalog(), &registry, strings);
                html.push_str(&platform_section(platform, &table));
            }
            html.push_str(&footnotes::notes_section_with(&registry));
            (TableKind::Feature, registry.len())
        }
        None => {
            tracing::debug!(query, features = node.children.len(), "rendering aggregate table");
            for platform in Platform::ALL {
                let table = tables::aggregate_table(node, platform.catalog(), strings);
                html.push_str(&platform_section(platform, &table));
            }
            (TableKind::Aggregate, 0)
        }
    };

    RenderResult { html, kind, note_count }
}

/// Render `query` and return only the HTML
pub fn render(
    source: &dyn CompatSource,
    query: &str,
    strings: &dyn Localize,
    config: &RenderConfig,
) -> String {
    render_compat(source, query, strings, config).html
}

/// The localized message shown when a path has no data.
///
/// The query comes from the page and is escaped; the contribute URL is trusted config.
pub fn no_data_message(query: &str, strings: &dyn Localize, config: &RenderConfig) -> String {
    strings.format(
        "noData",
        &json!({ "query": handlebars::html_escape(query), "contribute_url": config.contribute_url }),
    )
}

fn tab_control(strings: &dyn Localize) -> String {
    let tabs: String = Platform::ALL
        .iter()
        .map(|platform| {
            format!(
                r##"<li><a href="#compat-{id}">{label}</a></li>"##,
                id = platform.as_str(),
                label = strings.text(&format!("browserType_{}", platform.as_str()))
            )
        })
        .collect();
    format!(
        r#"<div class="htab"><a id="AutoCompatibilityTable" name="AutoCompatibilityTable"></a><ul>{tabs}</ul></div>"#
    )
}

fn platform_section(platform: Platform, table: &str) -> String {
    format!(r#"<div id="compat-{}">{}</div>"#, platform.as_str(), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compat_core::Dataset;

    fn dataset() -> Dataset {
        Dataset::from_json_str(
            r#"{
                "api": {
                    "Feature": {"__compat": {"basic_support": {"support": {
                        "firefox": {"version_added": "10", "notes": "A note."}
                    }}}},
                    "Empty": {}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_feature_dispatch() {
        let strings = StringTable::builtin().unwrap();
        let result = render_compat(&dataset(), "api.Feature", &strings, &RenderConfig::default());
        assert_eq!(result.kind, TableKind::Feature);
        assert_eq!(result.note_count, 1);
        assert_eq!(result.html.matches(r#"<table class="compat-table">"#).count(), 2);
        assert!(result.html.contains(r#"<p id="compatNote_1">1. A note.</p>"#));
    }

    #[test]
    fn test_aggregate_dispatch() {
        let strings = StringTable::builtin().unwrap();
        let result = render_compat(&dataset(), "api", &strings, &RenderConfig::default());
        assert_eq!(result.kind, TableKind::Aggregate);
        assert_eq!(result.note_count, 0);
        assert!(result.html.contains(r#"<div id="compat-desktop">"#));
        assert!(result.html.contains(r#"<div id="compat-mobile">"#));
    }

    #[test]
    fn test_empty_node_is_no_data() {
        let strings = StringTable::builtin().unwrap();
        let result = render_compat(&dataset(), "api.Empty", &strings, &RenderConfig::default());
        assert_eq!(result.kind, TableKind::NoData);
    }

    #[test]
    fn test_tab_control() {
        let strings = StringTable::builtin().unwrap();
        let tabs = tab_control(&strings);
        assert!(tabs.contains(r##"<a href="#compat-desktop">Desktop</a>"##));
        assert!(tabs.contains(r##"<a href="#compat-mobile">Mobile</a>"##));
    }

    #[test]
    fn test_no_data_message() {
        let strings = StringTable::builtin().unwrap();
        let config = RenderConfig {
            contribute_url: "https://example.org/bcd".to_string(),
            ..RenderConfig::default()
        };
        let message = no_data_message("api.Nope", &strings, &config);
        assert!(message.contains("\"api.Nope\""));
        assert!(message.contains(r#"<a href="https://example.org/bcd">"#));
    }

    #[test]
    fn test_no_data_message_escapes_query() {
        let strings = StringTable::builtin().unwrap();
        let message = no_data_message("<img src=x onerror=alert(1)>", &strings, &RenderConfig::default());
        assert!(!message.contains("<img"));
        assert!(message.contains("&lt;img src&#x3D;x onerror&#x3D;alert(1)&gt;"));
    }
}
