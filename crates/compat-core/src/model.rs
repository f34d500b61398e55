//! Data Model: CompatNode, CompatBlock, SupportStatement
//!
//! The dataset is a tree. A node is either a container of child nodes, or a
//! feature carrying a `__compat` block (possibly next to child nodes). A compat
//! block maps row keys to sub-feature entries; `basic_support` is the baseline
//! row. Each entry maps browser ids to zero, one or several support statements.

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

use crate::ordered::OrderedMap;

/// Row key of the baseline support row in every compat block.
pub const BASIC_SUPPORT: &str = "basic_support";

/// Key holding the compat block inside a feature node.
pub const COMPAT_KEY: &str = "__compat";

static ABSENT: SupportData = SupportData::Absent;

/// Support value of `version_added`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionValue {
    /// No data (`null` or missing)
    #[default]
    Unknown,
    /// Supported, version unknown (`true`)
    Yes,
    /// Not supported (`false`)
    No,
    /// Supported since this version
    Version(String),
}

/// Value of `version_removed` when support was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRemoved {
    /// Removed, but the version is not known (`true`)
    Unknown,
    /// Removed in this version
    Version(String),
}

/// Kind of flag gating a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    Preference,
    CompileFlag,
    #[serde(other)]
    Other,
}

/// A preference or compile flag that must be set to enable a feature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flag {
    #[serde(rename = "type")]
    pub kind: FlagKind,
    pub name: String,
    #[serde(default)]
    pub value_to_set: Option<String>,
}

/// One browser's support record for one (sub-)feature.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SupportStatement {
    #[serde(default)]
    pub version_added: VersionValue,
    #[serde(default, deserialize_with = "deserialize_removed")]
    pub version_removed: Option<VersionRemoved>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub alternative_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_notes")]
    pub notes: Vec<String>,
    #[serde(default)]
    pub flag: Option<Flag>,
}

/// Support data for one browser: nothing, one statement, or several.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SupportData {
    #[default]
    Absent,
    Single(SupportStatement),
    Many(Vec<SupportStatement>),
}

impl SupportData {
    /// All statements, in declaration order.
    pub fn statements(&self) -> &[SupportStatement] {
        match self {
            SupportData::Absent => &[],
            SupportData::Single(statement) => std::slice::from_ref(statement),
            SupportData::Many(statements) => statements,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SupportData::Absent)
    }

    /// Read one browser's support value. Data of an unexpected shape counts as absent.
    pub fn from_value(browser: &str, value: serde_json::Value) -> SupportData {
        SupportData::deserialize(value).unwrap_or_else(|e| {
            tracing::warn!(browser, error = %e, "unreadable support data, treating as absent");
            SupportData::Absent
        })
    }
}

/// One row of a compat block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubfeatureEntry {
    /// Human-readable row label
    #[serde(default, alias = "desc")]
    pub description: Option<String>,
    /// Browser id -> support data
    #[serde(default, deserialize_with = "deserialize_support")]
    pub support: OrderedMap<SupportData>,
}

impl SubfeatureEntry {
    /// Support data for a browser; `Absent` when the browser has no entry.
    pub fn support_for(&self, browser: &str) -> &SupportData {
        self.support.get(browser).unwrap_or(&ABSENT)
    }
}

/// The compat payload of a feature.
#[derive(Debug, Clone, Default)]
pub struct CompatBlock {
    rows: OrderedMap<SubfeatureEntry>,
}

impl CompatBlock {
    pub fn basic_support(&self) -> Option<&SubfeatureEntry> {
        self.rows.get(BASIC_SUPPORT)
    }

    /// Named sub-features, excluding `basic_support`, in declaration order.
    pub fn subfeatures(&self) -> impl Iterator<Item = (&str, &SubfeatureEntry)> {
        self.rows.iter().filter(|(key, _)| *key != BASIC_SUPPORT)
    }

    /// Every row including `basic_support`, in declaration order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &SubfeatureEntry)> {
        self.rows.iter()
    }

    pub fn get(&self, key: &str) -> Option<&SubfeatureEntry> {
        self.rows.get(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A node of the compatibility tree.
#[derive(Debug, Clone, Default)]
pub struct CompatNode {
    /// Present when the node is a feature
    pub compat: Option<CompatBlock>,
    /// Child nodes (containers or sub-features), in declaration order
    pub children: OrderedMap<CompatNode>,
}

impl CompatNode {
    pub fn is_feature(&self) -> bool {
        self.compat.is_some()
    }

    pub fn child(&self, name: &str) -> Option<&CompatNode> {
        self.children.get(name)
    }

    /// Walk down a sequence of path segments.
    pub fn descend<'a, I>(&self, segments: I) -> Option<&CompatNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments
            .into_iter()
            .try_fold(self, |node, segment| node.child(segment))
    }
}

/// A value that is read only when it is a JSON object.
///
/// Non-object values next to features and rows (metadata, comments) carry no
/// compat data and deserialize to `None`.
struct ObjectOr<T>(Option<T>);

struct ObjectOrVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for ObjectOrVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = ObjectOr<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        T::deserialize(MapAccessDeserializer::new(map)).map(|value| ObjectOr(Some(value)))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(ObjectOr(None))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ObjectOr(None))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(ObjectOr(None))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(ObjectOr(None))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(ObjectOr(None))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(ObjectOr(None))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(ObjectOr(None))
    }
}

impl<'de, T> Deserialize<'de> for ObjectOr<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ObjectOrVisitor(PhantomData))
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = CompatNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a compatibility node")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut node = CompatNode::default();
        while let Some(key) = map.next_key::<String>()? {
            if key == COMPAT_KEY {
                node.compat = map.next_value::<ObjectOr<CompatBlock>>()?.0;
                if node.compat.is_none() {
                    tracing::warn!("skipping non-object compat block");
                }
            } else if let Some(child) = map.next_value::<ObjectOr<CompatNode>>()?.0 {
                node.children.insert(key, child);
            }
        }
        Ok(node)
    }
}

impl<'de> Deserialize<'de> for CompatNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NodeVisitor)
    }
}

struct RowsVisitor;

impl<'de> Visitor<'de> for RowsVisitor {
    type Value = CompatBlock;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a compat block")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut rows = OrderedMap::new();
        while let Some(key) = map.next_key::<String>()? {
            match map.next_value::<ObjectOr<SubfeatureEntry>>()?.0 {
                Some(entry) => rows.insert(key, entry),
                None => tracing::warn!(row = %key, "skipping non-object compat row"),
            }
        }
        Ok(CompatBlock { rows })
    }
}

impl<'de> Deserialize<'de> for CompatBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RowsVisitor)
    }
}

struct SupportMap(OrderedMap<SupportData>);

struct SupportVisitor;

impl<'de> Visitor<'de> for SupportVisitor {
    type Value = SupportMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("browser support data")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut support = OrderedMap::new();
        while let Some((browser, value)) = map.next_entry::<String, serde_json::Value>()? {
            let data = SupportData::from_value(&browser, value);
            support.insert(browser, data);
        }
        Ok(SupportMap(support))
    }
}

impl<'de> Deserialize<'de> for SupportMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SupportVisitor)
    }
}

// Browsers are read one at a time so a malformed entry only blanks its own cell.
fn deserialize_support<'de, D>(deserializer: D) -> Result<OrderedMap<SupportData>, D::Error>
where
    D: Deserializer<'de>,
{
    let support = ObjectOr::<SupportMap>::deserialize(deserializer)?.0;
    Ok(support.map(|SupportMap(map)| map).unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Flag(bool),
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for VersionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawVersion>::deserialize(deserializer)? {
            None => VersionValue::Unknown,
            Some(RawVersion::Flag(true)) => VersionValue::Yes,
            Some(RawVersion::Flag(false)) => VersionValue::No,
            Some(RawVersion::Text(version)) => VersionValue::Version(version),
            Some(RawVersion::Number(number)) => VersionValue::Version(number.to_string()),
        })
    }
}

fn deserialize_removed<'de, D>(deserializer: D) -> Result<Option<VersionRemoved>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawVersion>::deserialize(deserializer)? {
        None | Some(RawVersion::Flag(false)) => None,
        Some(RawVersion::Flag(true)) => Some(VersionRemoved::Unknown),
        Some(RawVersion::Text(version)) => Some(VersionRemoved::Version(version)),
        Some(RawVersion::Number(number)) => Some(VersionRemoved::Version(number.to_string())),
    })
}

fn deserialize_notes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNotes {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<RawNotes>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RawNotes::One(note)) => vec![note],
        Some(RawNotes::Many(notes)) => notes,
    })
}

impl<'de> Deserialize<'de> for SupportData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawSupport {
            Many(Vec<SupportStatement>),
            Single(SupportStatement),
        }

        Ok(match Option::<RawSupport>::deserialize(deserializer)? {
            None => SupportData::Absent,
            Some(RawSupport::Single(statement)) => SupportData::Single(statement),
            Some(RawSupport::Many(statements)) => SupportData::Many(statements),
        })
    }
}
