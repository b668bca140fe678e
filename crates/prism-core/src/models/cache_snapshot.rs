use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogFingerprint};

/// One cached embedding, keyed by effect id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub id: String,
    pub vector: Vec<f32>,
}

/// A complete set of descriptor embeddings for one catalog revision.
///
/// Records are kept in catalog order. A snapshot is only ever replaced
/// whole, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub catalog_fingerprint: CatalogFingerprint,
    /// Name of the vector provider model that produced the records.
    pub model: String,
    pub dimensions: usize,
    pub created_at: DateTime<Utc>,
    pub records: Vec<EmbeddingRecord>,
}

impl CacheSnapshot {
    pub fn records(&self) -> &[EmbeddingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Vector for the given effect id, if present.
    pub fn vector(&self, id: &str) -> Option<&[f32]> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.vector.as_slice())
    }

    /// Whether this snapshot is a valid cache for `catalog` as embedded by
    /// `model` at `dimensions`.
    ///
    /// Requires a matching fingerprint, matching provider identity, one
    /// record per descriptor in catalog order, and uniform vector length.
    pub fn is_valid_for(&self, catalog: &Catalog, model: &str, dimensions: usize) -> bool {
        if self.catalog_fingerprint != catalog.fingerprint()
            || self.model != model
            || self.dimensions != dimensions
            || self.records.len() != catalog.len()
        {
            return false;
        }
        self.records
            .iter()
            .zip(catalog.iter())
            .all(|(record, descriptor)| {
                record.id == descriptor.id && record.vector.len() == dimensions
            })
    }
}
