//! Version status markup for a single `version_added` value.

use compat_core::VersionValue;

use crate::strings::Localize;

/// Render a support version as inline markup.
pub fn version_status(value: &VersionValue, strings: &dyn Localize) -> String {
    match value {
        VersionValue::Unknown => unknown_marker(strings),
        VersionValue::Yes => format!(
            r#"<span style="color: #888" title="{}">({})</span>"#,
            strings.text("supportsLong_yes"),
            strings.text("supportsShort_yes")
        ),
        VersionValue::No => format!(
            r#"<span style="color: #888" title="{}">({})</span>"#,
            strings.text("supportsLong_no"),
            strings.text("supportsShort_no")
        ),
        VersionValue::Version(version) => version.clone(),
    }
}

/// Highlighted "unknown support" marker.
pub fn unknown_marker(strings: &dyn Localize) -> String {
    format!(
        r#"<span title="{}" style="color: rgb(255, 153, 0);">{}</span>"#,
        strings.text("supportsLong_unknown"),
        strings.text("supportsShort_unknown")
    )
}
