//! Evaluation-stage verdict parsing.

use prism_core::constants::{VERDICT_ACCEPT_TOKEN, VERDICT_REJECT_TOKEN};
use prism_core::errors::{PrismError, PrismResult};
use prism_core::models::Verdict;

const SEPARATORS: &[char] = &[':', '-', '.', ','];

/// Parse a raw evaluation response into a [`Verdict`].
///
/// Leading whitespace is skipped, then the text must start with `YES` or
/// `NO` (case-sensitive) followed by end-of-text or a non-alphanumeric
/// character, so `NOPE` and `YESTERDAY` are rejected. The reasoning is the
/// remainder with leading separators and whitespace removed.
///
/// # Errors
/// `PrismError::MalformedVerdict` carrying the full raw response.
pub fn parse_verdict(response: &str) -> PrismResult<Verdict> {
    let text = response.trim_start();

    let (accepted, rest) = if let Some(rest) = strip_token(text, VERDICT_ACCEPT_TOKEN) {
        (true, rest)
    } else if let Some(rest) = strip_token(text, VERDICT_REJECT_TOKEN) {
        (false, rest)
    } else {
        return Err(PrismError::MalformedVerdict {
            response: response.to_string(),
        });
    };

    let reasoning = rest
        .trim_start_matches(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .trim_end()
        .to_string();

    Ok(Verdict {
        accepted,
        reasoning,
    })
}

fn strip_token<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(token)?;
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(rest),
    }
}
