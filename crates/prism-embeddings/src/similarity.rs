//! Cosine similarity ranking over cached descriptor vectors.
//!
//! Pure functions: identical inputs always produce identical output.

use prism_core::errors::{PrismError, PrismResult, SearchError};
use prism_core::models::{EmbeddingRecord, SimilarityResult};

/// Cosine of the angle between `a` and `b`, accumulated in f64.
///
/// Returns 0.0 when either vector has zero magnitude or the result is not
/// finite. Callers are responsible for matching lengths; extra trailing
/// components of the longer slice are ignored.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

fn score(query: &[f32], record: &EmbeddingRecord) -> PrismResult<f64> {
    if record.vector.len() != query.len() {
        return Err(SearchError::DimensionMismatch {
            id: record.id.clone(),
            expected: query.len(),
            actual: record.vector.len(),
        }
        .into());
    }
    Ok(cosine_similarity(query, &record.vector))
}

/// Best match for `query` among `records`.
///
/// Ties resolve to the earliest record, so catalog order is the tie-break.
///
/// # Errors
/// `PrismError::EmptyCatalog` for no records,
/// `SearchError::DimensionMismatch` for a record of the wrong length.
pub fn rank(query: &[f32], records: &[EmbeddingRecord]) -> PrismResult<SimilarityResult> {
    let mut best: Option<(&EmbeddingRecord, f64)> = None;
    for record in records {
        let sim = score(query, record)?;
        if best.map_or(true, |(_, s)| sim > s) {
            best = Some((record, sim));
        }
    }
    best.map(|(record, sim)| SimilarityResult {
        id: record.id.clone(),
        score: sim,
    })
    .ok_or(PrismError::EmptyCatalog)
}

/// Every record scored against `query`, best first.
///
/// The sort is stable, so equal scores keep catalog order and the first
/// element always equals [`rank`]'s result.
pub fn rank_all(query: &[f32], records: &[EmbeddingRecord]) -> PrismResult<Vec<SimilarityResult>> {
    if records.is_empty() {
        return Err(PrismError::EmptyCatalog);
    }
    let mut scored = records
        .iter()
        .map(|record| {
            Ok(SimilarityResult {
                id: record.id.clone(),
                score: score(query, record)?,
            })
        })
        .collect::<PrismResult<Vec<_>>>()?;
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, vector: &[f32]) -> EmbeddingRecord {
        EmbeddingRecord {
            id: id.to_string(),
            vector: vector.to_vec(),
        }
    }

    #[test]
    fn identical_direction_scores_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn opposite_direction_scores_minus_one() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-3.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthogonal_scores_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn rank_picks_maximum() {
        let records = vec![
            record("a", &[0.0, 1.0]),
            record("b", &[1.0, 0.1]),
            record("c", &[-1.0, 0.0]),
        ];
        let best = rank(&[1.0, 0.0], &records).unwrap();
        assert_eq!(best.id, "b");
    }

    #[test]
    fn ties_resolve_to_first_record() {
        let records = vec![
            record("first", &[1.0, 1.0]),
            record("second", &[2.0, 2.0]),
        ];
        let best = rank(&[1.0, 1.0], &records).unwrap();
        assert_eq!(best.id, "first");
    }

    #[test]
    fn empty_records_is_an_error() {
        assert!(matches!(rank(&[1.0], &[]), Err(PrismError::EmptyCatalog)));
        assert!(matches!(rank_all(&[1.0], &[]), Err(PrismError::EmptyCatalog)));
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let records = vec![record("short", &[1.0])];
        let err = rank(&[1.0, 0.0], &records).unwrap_err();
        assert!(matches!(
            err,
            PrismError::SearchError(SearchError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn rank_all_is_sorted_and_stable() {
        let records = vec![
            record("low", &[0.0, 1.0]),
            record("tie_a", &[1.0, 0.0]),
            record("tie_b", &[3.0, 0.0]),
        ];
        let ranked = rank_all(&[1.0, 0.0], &records).unwrap();
        let ids: Vec<_> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["tie_a", "tie_b", "low"]);
    }
}
