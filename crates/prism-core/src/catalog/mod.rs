//! The effect descriptor catalog.

mod fingerprint;
mod loader;

use std::collections::HashSet;

pub use fingerprint::CatalogFingerprint;

use crate::errors::{CatalogError, PrismResult};
use crate::models::EffectDescriptor;

/// An ordered, validated collection of effect descriptors.
///
/// Ids are trimmed on construction and must be unique ignoring ASCII case,
/// because generative selections are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    descriptors: Vec<EffectDescriptor>,
    fingerprint: CatalogFingerprint,
}

impl Catalog {
    /// Validate and wrap an ordered list of descriptors.
    ///
    /// # Errors
    /// `CatalogError::Empty`, `CatalogError::BlankId`, or
    /// `CatalogError::DuplicateId`.
    pub fn new(descriptors: Vec<EffectDescriptor>) -> PrismResult<Self> {
        if descriptors.is_empty() {
            return Err(CatalogError::Empty.into());
        }

        let mut seen = HashSet::with_capacity(descriptors.len());
        let mut cleaned = Vec::with_capacity(descriptors.len());
        for (position, descriptor) in descriptors.into_iter().enumerate() {
            let id = descriptor.id.trim().to_string();
            if id.is_empty() {
                return Err(CatalogError::BlankId { position }.into());
            }
            if !seen.insert(id.to_lowercase()) {
                return Err(CatalogError::DuplicateId { id }.into());
            }
            cleaned.push(EffectDescriptor::new(id, descriptor.description));
        }

        let fingerprint = CatalogFingerprint::compute(&cleaned);
        Ok(Self {
            descriptors: cleaned,
            fingerprint,
        })
    }

    pub fn fingerprint(&self) -> CatalogFingerprint {
        self.fingerprint.clone()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EffectDescriptor> {
        self.descriptors.iter()
    }

    pub fn descriptors(&self) -> &[EffectDescriptor] {
        &self.descriptors
    }

    pub fn ids(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.id.as_str()).collect()
    }

    /// Exact-id lookup.
    pub fn get(&self, id: &str) -> Option<&EffectDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    /// Look up an id after trimming and lower-casing both sides.
    pub fn find_normalized(&self, candidate: &str) -> Option<&EffectDescriptor> {
        let needle = candidate.trim().to_lowercase();
        self.descriptors
            .iter()
            .find(|d| d.id.to_lowercase() == needle)
    }

    /// Serialize every descriptor as `- id: description` lines, in order.
    ///
    /// This is the shared context every generative stage is grounded in.
    pub fn context(&self) -> String {
        self.descriptors
            .iter()
            .map(|d| format!("- {}: {}", d.id, d.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a EffectDescriptor;
    type IntoIter = std::slice::Iter<'a, EffectDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
