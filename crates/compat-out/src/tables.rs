//! Table builders: header row, aggregate tables and feature tables.

use compat_core::{BrowserCatalog, CompatBlock, CompatNode, SubfeatureEntry};

use crate::cells::support_cell;
use crate::notes::NoteRegistry;
use crate::strings::Localize;

/// Header row: the feature column, then one column per browser in catalog order.
pub fn table_head(catalog: &BrowserCatalog, strings: &dyn Localize) -> String {
    let mut output = format!("<tr><th>{}</th>", strings.text("feature"));
    for (_, name) in catalog.browsers {
        output.push_str(&format!("<th>{name}</th>"));
    }
    output.push_str("</tr>");
    output
}

/// Summary table over a container: one row per child feature, sorted by
/// name, showing basic support only and no footnotes.
pub fn aggregate_table(
    container: &CompatNode,
    catalog: &BrowserCatalog,
    strings: &dyn Localize,
) -> String {
    let mut features: Vec<(&str, &CompatNode)> = container.children.iter().collect();
    features.sort_by(|a, b| a.0.cmp(b.0));

    let rows: String = features
        .into_iter()
        .map(|(name, feature)| {
            let basic = feature.compat.as_ref().and_then(CompatBlock::basic_support);
            support_row(&format!("<code>{name}</code>"), basic, catalog, None, strings)
        })
        .collect();

    tracing::debug!(platform = %catalog.platform, rows = container.children.len(), "rendered aggregate table");
    compat_table(catalog, strings, &rows)
}

/// Detailed table for one feature, with footnotes from a freshly collected registry.
pub fn feature_table(block: &CompatBlock, catalog: &BrowserCatalog, strings: &dyn Localize) -> String {
    let registry = NoteRegistry::collect(block);
    feature_table_with(block, catalog, &registry, strings)
}

/// Detailed table for one feature: basic support first, then every other
/// row in declaration order.
pub fn feature_table_with(
    block: &CompatBlock,
    catalog: &BrowserCatalog,
    registry: &NoteRegistry,
    strings: &dyn Localize,
) -> String {
    let mut rows = support_row(
        &strings.text("feature_basicsupport"),
        block.basic_support(),
        catalog,
        Some(registry),
        strings,
    );
    for (key, entry) in block.subfeatures() {
        let label = match &entry.description {
            Some(description) => description.clone(),
            None => format!("<code>{key}</code>"),
        };
        rows.push_str(&support_row(&label, Some(entry), catalog, Some(registry), strings));
    }

    tracing::debug!(platform = %catalog.platform, rows = block.len(), "rendered feature table");
    compat_table(catalog, strings, &rows)
}

fn compat_table(catalog: &BrowserCatalog, strings: &dyn Localize, rows: &str) -> String {
    format!(
        r#"<table class="compat-table"><tbody>{}{}</tbody></table>"#,
        table_head(catalog, strings),
        rows
    )
}

fn support_row(
    label: &str,
    entry: Option<&SubfeatureEntry>,
    catalog: &BrowserCatalog,
    notes: Option<&NoteRegistry>,
    strings: &dyn Localize,
) -> String {
    let empty = SubfeatureEntry::default();
    let entry = entry.unwrap_or(&empty);

    let mut output = format!("<tr><td>{label}</td>");
    for browser in catalog.ids() {
        output.push_str("<td>");
        output.push_str(&support_cell(entry.support_for(browser), browser, notes, strings));
        output.push_str("</td>");
    }
    output.push_str("</tr>");
    output
}
