//! Browser catalogs: the fixed, ordered columns of a compat table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform a catalog covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Desktop,
    Mobile,
}

impl Platform {
    /// Every platform, in tab order.
    pub const ALL: [Platform; 2] = [Platform::Desktop, Platform::Mobile];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Desktop => "desktop",
            Platform::Mobile => "mobile",
        }
    }

    pub fn catalog(self) -> &'static BrowserCatalog {
        match self {
            Platform::Desktop => &DESKTOP,
            Platform::Mobile => &MOBILE,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered browser id -> display name mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserCatalog {
    pub platform: Platform,
    pub browsers: &'static [(&'static str, &'static str)],
}

impl BrowserCatalog {
    /// Browser ids in column order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.browsers.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.browsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }
}

pub static DESKTOP: BrowserCatalog = BrowserCatalog {
    platform: Platform::Desktop,
    browsers: &[
        ("chrome", "Chrome"),
        ("edge", "Edge"),
        ("firefox", "Firefox"),
        ("ie", "Internet Explorer"),
        ("opera", "Opera"),
        ("safari", "Safari"),
    ],
};

pub static MOBILE: BrowserCatalog = BrowserCatalog {
    platform: Platform::Mobile,
    browsers: &[
        ("webview_android", "Android webview"),
        ("chrome_android", "Chrome for Android"),
        ("edge_mobile", "Edge mobile"),
        ("firefox_android", "Firefox for Android"),
        ("ie_mobile", "IE mobile"),
        ("opera_android", "Opera Android"),
        ("safari_ios", "iOS Safari"),
    ],
};
