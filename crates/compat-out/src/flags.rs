//! Flag notes: the caveat text for features behind a preference or compile flag.
//!
//! The generated sentence doubles as the note's identity in the footnote
//! registry, so it must be a pure function of the statement and browser.

use compat_core::{FlagKind, SupportStatement, VersionRemoved, VersionValue};

const FIREFOX_PREFS: &str = "To change preferences in Firefox, visit about:config.";
const CHROME_PREFS: &str = "To change preferences in Chrome, visit chrome://flags.";

/// Describe the flag gating `statement` in `browser`, if any.
pub fn flag_note(statement: &SupportStatement, browser: &str) -> Option<String> {
    let flag = statement.flag.as_ref()?;

    let mut output = String::new();
    if let VersionValue::Version(added) = &statement.version_added {
        output = format!("From version {added}");
    }
    if let Some(VersionRemoved::Version(removed)) = &statement.version_removed {
        if output.is_empty() {
            output = format!("Until version {removed} (exclusive)");
        } else {
            output.push_str(&format!(" until version {removed} (exclusive)"));
        }
    }

    if output.is_empty() {
        output.push_str("This");
    } else {
        output.push_str(": this");
    }
    output.push_str(&format!(" feature is behind the <code>{}</code>", flag.name));
    match flag.kind {
        FlagKind::Preference => output.push_str(" preference"),
        FlagKind::CompileFlag => output.push_str(" compile flag"),
        FlagKind::Other => {}
    }
    if let Some(value) = &flag.value_to_set {
        output.push_str(&format!(" (needs to be set to <code>{value}</code>)"));
    }
    output.push('.');

    if flag.kind == FlagKind::Preference {
        if let Some(instructions) = preference_instructions(browser) {
            output.push(' ');
            output.push_str(instructions);
        }
    }

    Some(output)
}

fn preference_instructions(browser: &str) -> Option<&'static str> {
    match browser {
        "firefox" | "firefox_android" => Some(FIREFOX_PREFS),
        "chrome" | "chrome_android" => Some(CHROME_PREFS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn statement(value: serde_json::Value) -> SupportStatement {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_flag() {
        assert_eq!(flag_note(&statement(json!({"version_added": "1"})), "firefox"), None);
    }

    #[test]
    fn test_firefox_preference() {
        let s = statement(json!({
            "version_added": "40",
            "flag": {"type": "preference", "name": "layout.css.foo.enabled", "value_to_set": "true"}
        }));
        assert_eq!(
            flag_note(&s, "firefox").unwrap(),
            "From version 40: this feature is behind the <code>layout.css.foo.enabled</code> \
             preference (needs to be set to <code>true</code>). \
             To change preferences in Firefox, visit about:config."
        );
    }

    #[test]
    fn test_chrome_preference() {
        let s = statement(json!({
            "flag": {"type": "preference", "name": "Experimental Web Platform features"}
        }));
        let note = flag_note(&s, "chrome").unwrap();
        assert!(note.starts_with("This feature is behind the"));
        assert!(note.ends_with("To change preferences in Chrome, visit chrome://flags."));
        assert!(!note.contains("about:config"));
    }

    #[test]
    fn test_preference_other_browser_has_no_instructions() {
        let s = statement(json!({"flag": {"type": "preference", "name": "x"}}));
        assert_eq!(
            flag_note(&s, "safari").unwrap(),
            "This feature is behind the <code>x</code> preference."
        );
    }

    #[test]
    fn test_compile_flag() {
        let s = statement(json!({
            "version_added": "12",
            "version_removed": "20",
            "flag": {"type": "compile_flag", "name": "ENABLE_FOO", "value_to_set": "1"}
        }));
        assert_eq!(
            flag_note(&s, "firefox").unwrap(),
            "From version 12 until version 20 (exclusive): this feature is behind the \
             <code>ENABLE_FOO</code> compile flag (needs to be set to <code>1</code>)."
        );
    }

    #[test]
    fn test_until_only() {
        let s = statement(json!({
            "version_added": true,
            "version_removed": "30",
            "flag": {"type": "compile_flag", "name": "OLD"}
        }));
        assert_eq!(
            flag_note(&s, "chrome").unwrap(),
            "Until version 30 (exclusive): this feature is behind the <code>OLD</code> compile flag."
        );
    }
}
