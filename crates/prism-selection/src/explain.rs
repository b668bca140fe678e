//! Template explanation for similarity-only selections.

use prism_core::catalog::Catalog;
use prism_core::models::SimilarityResult;

/// Explain a nearest-match result without a generative call.
///
/// Falls back to naming only the id and score when `result.id` is not in
/// `catalog`.
pub fn explain_similarity(request: &str, result: &SimilarityResult, catalog: &Catalog) -> String {
    match catalog.get(&result.id) {
        Some(descriptor) => format!(
            "Based on your request '{request}', I selected the {id} effect. \
             This effect was chosen because it {description} \
             The similarity score of {score:.2} indicates how closely your request \
             matches this effect's capabilities.",
            id = result.id,
            description = descriptor.description.trim().to_lowercase(),
            score = result.score,
        ),
        None => format!(
            "Based on your request '{request}', I selected the {id} effect \
             with a similarity score of {score:.2}.",
            id = result.id,
            score = result.score,
        ),
    }
}
