//! Dataset loading and dotted-path lookup.

use std::io::Read;
use std::path::Path;

use crate::error::{CompatError, Result};
use crate::model::CompatNode;

/// Resolves a dotted feature path (e.g. `"css.properties.color"`) to a node.
pub trait CompatSource {
    fn lookup(&self, query: &str) -> Option<&CompatNode>;
}

/// An in-memory compatibility dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    root: CompatNode,
}

impl Dataset {
    pub fn new(root: CompatNode) -> Self {
        Self { root }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    /// Load a dataset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            top_level = dataset.root.children.len(),
            "loaded compat dataset"
        );
        Ok(dataset)
    }

    pub fn root(&self) -> &CompatNode {
        &self.root
    }

    /// Child names of the node at `query`; the empty query lists the root.
    pub fn children(&self, query: &str) -> Result<Vec<&str>> {
        let node = if query.is_empty() {
            Some(&self.root)
        } else {
            self.lookup(query)
        };
        node.map(|n| n.children.keys().collect())
            .ok_or_else(|| CompatError::InvalidPath(query.to_string()))
    }
}

impl CompatSource for Dataset {
    fn lookup(&self, query: &str) -> Option<&CompatNode> {
        self.root.lookup(query)
    }
}

impl CompatSource for CompatNode {
    fn lookup(&self, query: &str) -> Option<&CompatNode> {
        if query.is_empty() || query.split('.').any(str::is_empty) {
            return None;
        }
        self.descend(query.split('.'))
    }
}
