//! Note registry for one compat block.
//!
//! Walks every row and every browser's statements in declaration order and
//! keeps each distinct note text once, in first-seen order. Footnote numbers
//! are positions in this list. Identity is the note text itself: two
//! statements with byte-identical notes share one footnote.

use compat_core::{CompatBlock, SupportStatement};

use crate::flags::flag_note;

/// Ordered, deduplicated note texts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRegistry {
    notes: Vec<String>,
}

impl NoteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the notes of every row of `block`
    pub fn collect(block: &CompatBlock) -> Self {
        let mut registry = Self::new();
        for (_, entry) in block.rows() {
            for (browser, data) in entry.support.iter() {
                for statement in data.statements() {
                    for note in statement_notes(statement, browser) {
                        registry.insert(note);
                    }
                }
            }
        }
        tracing::debug!(rows = block.len(), notes = registry.len(), "collected compat notes");
        registry
    }

    /// Add a note unless present; returns its 1-based number
    pub fn insert(&mut self, note: impl Into<String>) -> usize {
        let note = note.into();
        if let Some(number) = self.position(&note) {
            return number;
        }
        self.notes.push(note);
        self.notes.len()
    }

    /// 1-based footnote number of `note`
    pub fn position(&self, note: &str) -> Option<usize> {
        self.notes.iter().position(|n| n == note).map(|i| i + 1)
    }

    /// Note text by 1-based footnote number
    pub fn get(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.notes.get(i))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.notes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Note texts attached to one statement: its own notes, then the flag sentence.
pub fn statement_notes(statement: &SupportStatement, browser: &str) -> Vec<String> {
    let mut notes = statement.notes.clone();
    notes.extend(flag_note(statement, browser));
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(json: &str) -> CompatBlock {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_insert_dedup() {
        let mut registry = NoteRegistry::new();
        assert_eq!(registry.insert("a"), 1);
        assert_eq!(registry.insert("b"), 2);
        assert_eq!(registry.insert("a"), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(2), Some("b"));
        assert_eq!(registry.get(0), None);
        assert_eq!(registry.get(3), None);
    }

    #[test]
    fn test_collect_order() {
        let block = block(
            r#"{
                "basic_support": {"support": {
                    "firefox": {"version_added": "1", "notes": ["first", "second"]},
                    "chrome": [
                        {"version_added": "5", "notes": "third"},
                        {"version_added": "2", "notes": "first"}
                    ]
                }},
                "other": {"support": {
                    "safari": {"version_added": true, "flag": {"type": "compile_flag", "name": "X"}}
                }}
            }"#,
        );

        let registry = NoteRegistry::collect(&block);
        let notes: Vec<_> = registry.iter().collect();
        assert_eq!(
            notes,
            vec![
                "first",
                "second",
                "third",
                "This feature is behind the <code>X</code> compile flag."
            ]
        );
    }

    #[test]
    fn test_identical_text_across_rows_collapses() {
        let block = block(
            r#"{
                "basic_support": {"support": {"ie": {"version_added": "9", "notes": "Same caveat."}}},
                "sub": {"support": {"edge": {"version_added": "12", "notes": "Same caveat."}}}
            }"#,
        );

        let registry = NoteRegistry::collect(&block);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.position("Same caveat."), Some(1));
    }

    #[test]
    fn test_identical_flag_sentences_collapse() {
        let block = block(
            r#"{
                "basic_support": {"support": {"safari": {"flag": {"type": "preference", "name": "p"}}}},
                "sub": {"support": {"opera": {"flag": {"type": "preference", "name": "p"}}}}
            }"#,
        );
        assert_eq!(NoteRegistry::collect(&block).len(), 1);
    }

    #[test]
    fn test_flag_sentence_depends_on_browser() {
        let block = block(
            r#"{
                "basic_support": {"support": {
                    "firefox": {"flag": {"type": "preference", "name": "p"}},
                    "chrome": {"flag": {"type": "preference", "name": "p"}}
                }}
            }"#,
        );
        assert_eq!(NoteRegistry::collect(&block).len(), 2);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let block = block(
            r#"{
                "basic_support": {"support": {"firefox": {"notes": ["b", "a"]}}},
                "x": {"support": {"chrome": {"notes": "c"}, "firefox": {"notes": "a"}}}
            }"#,
        );
        assert_eq!(NoteRegistry::collect(&block), NoteRegistry::collect(&block));
    }

    #[test]
    fn test_empty_block() {
        assert!(NoteRegistry::collect(&CompatBlock::default()).is_empty());
    }
}
