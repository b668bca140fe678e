//! Offline bag-of-words vector provider.
//!
//! Hashes each non-stopword term into a fixed number of buckets with
//! blake3, using one hash bit as the sign so unrelated terms that share a
//! bucket tend to cancel instead of piling up. Output is L2-normalized.
//! Deterministic and dependency-free at runtime, at the cost of no
//! synonym awareness.

use std::collections::HashMap;

use prism_core::errors::PrismResult;
use prism_core::traits::IVectorProvider;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "into", "is", "it",
    "its", "like", "look", "make", "me", "of", "on", "or", "show", "so", "that", "the", "this",
    "to", "with",
];

/// Hashed bag-of-words provider.
pub struct LocalVectorProvider {
    dimensions: usize,
}

impl LocalVectorProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
    }

    /// Bucket index and sign for one term.
    fn slot(&self, term: &str) -> (usize, f32) {
        let hash = blake3::hash(term.as_bytes());
        let bytes = hash.as_bytes();
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[..8]);
        let bucket = (u64::from_le_bytes(word) % self.dimensions as u64) as usize;
        let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in Self::terms(text) {
            *counts.entry(term).or_default() += 1;
        }

        let mut vec = vec![0.0f32; self.dimensions];
        for (term, count) in &counts {
            let (bucket, sign) = self.slot(term);
            // Sublinear term frequency.
            vec[bucket] += sign * (1.0 + (*count as f32).ln());
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IVectorProvider for LocalVectorProvider {
    fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "local-hashed-bow"
    }
}
