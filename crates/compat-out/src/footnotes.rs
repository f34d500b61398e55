//! Numbered footnote list matching a feature table's anchors.

use compat_core::CompatBlock;

use crate::notes::NoteRegistry;

/// Render the notes of `block`, rebuilding its registry.
pub fn notes_section(block: &CompatBlock) -> String {
    notes_section_with(&NoteRegistry::collect(block))
}

/// One paragraph per note, numbered from 1, each carrying the anchor target id.
pub fn notes_section_with(registry: &NoteRegistry) -> String {
    registry
        .iter()
        .enumerate()
        .map(|(i, note)| format!(r#"<p id="compatNote_{n}">{n}. {note}</p>"#, n = i + 1))
        .collect()
}
