//! Support cell rendering: one table cell for one browser.

use compat_core::{SupportData, SupportStatement, VersionRemoved};
use serde_json::json;

use crate::notes::{statement_notes, NoteRegistry};
use crate::strings::Localize;
use crate::version::{unknown_marker, version_status};

/// Render a browser's support data. Footnote anchors are emitted only when
/// `notes` is given.
pub fn support_cell(
    data: &SupportData,
    browser: &str,
    notes: Option<&NoteRegistry>,
    strings: &dyn Localize,
) -> String {
    match data {
        SupportData::Absent => unknown_marker(strings),
        SupportData::Single(statement) => statement_cell(statement, browser, notes, strings),
        SupportData::Many(statements) if statements.is_empty() => unknown_marker(strings),
        SupportData::Many(statements) => statements
            .iter()
            .map(|statement| format!("<p>{}</p>", statement_cell(statement, browser, notes, strings)))
            .collect(),
    }
}

/// Render a single support statement.
pub fn statement_cell(
    statement: &SupportStatement,
    browser: &str,
    notes: Option<&NoteRegistry>,
    strings: &dyn Localize,
) -> String {
    let mut output = version_status(&statement.version_added, strings);

    match &statement.version_removed {
        Some(VersionRemoved::Unknown) => output.push_str("&nbsp;— ?"),
        Some(VersionRemoved::Version(version)) => {
            output.push_str("&nbsp;— ");
            output.push_str(version);
        }
        None => {}
    }

    if let Some(prefix) = &statement.prefix {
        let title = strings.format("prefix_title", &json!({ "prefix": prefix }));
        output.push_str(&format!(
            r#"<span title="{title}" class="inlineIndicator prefixBox prefixBoxInline">{prefix}</span>"#
        ));
    }

    if let Some(name) = &statement.alternative_name {
        output.push_str(&format!(" (as <code>{name}</code>)"));
    }

    if let Some(registry) = notes {
        let anchors = footnote_anchors(statement, browser, registry);
        if !anchors.is_empty() {
            output.push(' ');
            output.push_str(&anchors.join(" "));
        }
    }

    output
}

/// Anchors for a statement's notes, sorted as text.
///
/// The sort compares the anchor markup, so `10` orders before `2`.
pub fn footnote_anchors(
    statement: &SupportStatement,
    browser: &str,
    registry: &NoteRegistry,
) -> Vec<String> {
    let mut anchors: Vec<String> = statement_notes(statement, browser)
        .iter()
        .filter_map(|note| match registry.position(note) {
            Some(number) => Some(footnote_anchor(number)),
            None => {
                tracing::warn!(browser, note = %note, "note missing from registry");
                None
            }
        })
        .collect();
    anchors.sort();
    anchors
}

/// Superscript link to footnote `number`
pub fn footnote_anchor(number: usize) -> String {
    format!(r##"<sup><a href="#compatNote_{number}">{number}</a></sup>"##)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::StringTable;
    use serde_json::json;

    fn data(value: serde_json::Value) -> SupportData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_is_unknown() {
        let strings = StringTable::builtin().unwrap();
        let cell = support_cell(&SupportData::Absent, "firefox", None, &strings);
        assert_eq!(cell, unknown_marker(&strings));
        assert!(!cell.is_empty());
    }

    #[test]
    fn test_empty_sequence_is_unknown() {
        let strings = StringTable::builtin().unwrap();
        let cell = support_cell(&SupportData::Many(vec![]), "firefox", None, &strings);
        assert_eq!(cell, unknown_marker(&strings));
    }

    #[test]
    fn test_plain_version() {
        let strings = StringTable::builtin().unwrap();
        let cell = support_cell(&data(json!({"version_added": "10"})), "firefox", None, &strings);
        assert_eq!(cell, "10");
    }

    #[test]
    fn test_removed() {
        let strings = StringTable::builtin().unwrap();
        let known = data(json!({"version_added": "4", "version_removed": "15"}));
        let unknown = data(json!({"version_added": "4", "version_removed": true}));
        assert_eq!(support_cell(&known, "ie", None, &strings), "4&nbsp;— 15");
        assert_eq!(support_cell(&unknown, "ie", None, &strings), "4&nbsp;— ?");
    }

    #[test]
    fn test_prefix_and_alternative_name() {
        let strings = StringTable::builtin().unwrap();
        let cell = support_cell(
            &data(json!({"version_added": "3", "prefix": "-moz-", "alternative_name": "mozFoo"})),
            "firefox",
            None,
            &strings,
        );
        assert!(cell.starts_with("3<span"));
        assert!(cell.contains("prefixBox"));
        assert!(cell.contains(">-moz-</span>"));
        assert!(cell.contains("prefixed with '-moz-'"));
        assert!(cell.ends_with(" (as <code>mozFoo</code>)"));
    }

    #[test]
    fn test_sequence_renders_paragraphs() {
        let strings = StringTable::builtin().unwrap();
        let cell = support_cell(
            &data(json!([{"version_added": "20"}, {"version_added": "10", "version_removed": "20"}])),
            "chrome",
            None,
            &strings,
        );
        assert_eq!(cell, "<p>20</p><p>10&nbsp;— 20</p>");
    }

    #[test]
    fn test_no_anchors_without_registry() {
        let strings = StringTable::builtin().unwrap();
        let cell = support_cell(
            &data(json!({"version_added": "1", "notes": "n"})),
            "firefox",
            None,
            &strings,
        );
        assert_eq!(cell, "1");
    }

    #[test]
    fn test_anchors_resolve_against_registry() {
        let strings = StringTable::builtin().unwrap();
        let mut registry = NoteRegistry::new();
        registry.insert("other");
        registry.insert("mine");
        registry.insert("From version 1: this feature is behind the <code>F</code> compile flag.");
        let statement = json!({
            "version_added": "1",
            "notes": "mine",
            "flag": {"type": "compile_flag", "name": "F"}
        });

        let cell = support_cell(&data(statement), "firefox", Some(&registry), &strings);
        assert_eq!(
            cell,
            r##"1 <sup><a href="#compatNote_2">2</a></sup> <sup><a href="#compatNote_3">3</a></sup>"##
        );
    }

    #[test]
    fn test_anchors_sort_as_text() {
        let mut registry = NoteRegistry::new();
        for i in 1..=10 {
            registry.insert(format!("note {i}"));
        }
        let statement: SupportStatement =
            serde_json::from_value(json!({"notes": ["note 2", "note 10"]})).unwrap();

        let anchors = footnote_anchors(&statement, "firefox", &registry);
        assert_eq!(anchors, vec![footnote_anchor(10), footnote_anchor(2)]);
    }

    #[test]
    fn test_unregistered_note_is_skipped() {
        let registry = NoteRegistry::new();
        let statement: SupportStatement =
            serde_json::from_value(json!({"version_added": "1", "notes": "stray"})).unwrap();
        assert!(footnote_anchors(&statement, "firefox", &registry).is_empty());
    }
}
