use serde::{Deserialize, Serialize};

use super::defaults;

/// Where the effect catalog is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a `.json`, `.toml`, or `.csv` catalog file.
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_CATALOG_PATH.to_string(),
        }
    }
}
