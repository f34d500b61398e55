//! Compat Core: data model, catalogs and dataset lookup
//!
//! Types for the browser compatibility dataset: a tree of features keyed by
//! path segments, where a feature carries a `__compat` block describing, per
//! sub-feature and per browser, since which version it is supported.

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod model;
pub mod ordered;

pub use catalog::{BrowserCatalog, Platform};
pub use dataset::{CompatSource, Dataset};
pub use error::{CompatError, Result};
pub use model::{
    CompatBlock, CompatNode, Flag, FlagKind, SubfeatureEntry, SupportData, SupportStatement,
    VersionRemoved, VersionValue, BASIC_SUPPORT,
};
pub use ordered::OrderedMap;
