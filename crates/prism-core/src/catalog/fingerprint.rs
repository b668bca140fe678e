//! Content identity for a catalog revision.
//!
//! blake3 over the ordered `(id, description)` pairs, each field prefixed
//! with its byte length so field boundaries are unambiguous.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::EffectDescriptor;

/// Hex-encoded blake3 digest identifying one catalog revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogFingerprint(String);

impl CatalogFingerprint {
    /// Compute the fingerprint of an ordered descriptor sequence.
    pub fn compute<'a, I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = &'a EffectDescriptor>,
    {
        let mut hasher = blake3::Hasher::new();
        for descriptor in descriptors {
            write_field(&mut hasher, &descriptor.id);
            write_field(&mut hasher, &descriptor.description);
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    /// Wrap an already computed hex digest (e.g. read back from storage).
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn write_field(hasher: &mut blake3::Hasher, field: &str) {
    hasher.update(&(field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

impl fmt::Display for CatalogFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
