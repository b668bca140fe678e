//! Test fixture loader and provider doubles for the Prism workspace.
//!
//! Provides typed access to the catalog and query fixtures plus
//! deterministic stand-ins for the vector and generative providers, so
//! tests across crates run without network access.

pub mod doubles;

use std::path::PathBuf;

use prism_core::Catalog;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use doubles::{ConceptVectorProvider, FlakyVectorProvider, ScriptedGenerator};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    if path.ends_with("test-fixtures") {
        return path;
    }
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The four-effect catalog used by the end-to-end scenarios.
pub fn effects_catalog() -> Catalog {
    let path = fixture_path("catalogs/effects.json");
    Catalog::from_path(&path)
        .unwrap_or_else(|e| panic!("Failed to load catalog {}: {}", path.display(), e))
}

/// A query and the effect it should resolve to.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedMatch {
    pub query: String,
    pub expected: String,
}

/// Query expectations against [`effects_catalog`].
#[derive(Debug, Clone, Deserialize)]
pub struct QueryFixtures {
    pub relevant: Vec<ExpectedMatch>,
    pub irrelevant: Vec<String>,
}

pub fn query_fixtures() -> QueryFixtures {
    load_fixture("catalogs/queries.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn effects_catalog_has_four_effects() {
        let catalog = effects_catalog();
        assert_eq!(
            catalog.ids(),
            vec!["grayscale", "water_color", "heat_map", "object_detection"]
        );
    }

    #[test]
    fn query_fixtures_reference_catalog_ids() {
        let catalog = effects_catalog();
        let queries = query_fixtures();
        assert!(!queries.irrelevant.is_empty());
        for m in &queries.relevant {
            assert!(
                catalog.get(&m.expected).is_some(),
                "fixture expects unknown effect {}",
                m.expected
            );
        }
    }
}
