//! JSON recovery pipeline for structured-content responses.
//!
//! The external generator is instructed to return a single JSON object, but
//! in practice the text arrives wrapped in code fences and occasionally
//! truncated mid-value. This module strips the wrapping, attempts a direct
//! parse, applies one round of structural repair, and then runs the
//! post-parse validation / default-fill step. No further heuristics and no
//! partial-content salvage beyond that.

pub mod repair;
pub mod urls;
pub mod validate;

pub use repair::{repair_json, strip_code_fences};
pub use urls::normalize_url;
pub use validate::validate;

use crate::apf::{AntiPortfolio, UserMaterials};
use crate::error::GenerationError;

/// Parse a raw response blob into a validated [`AntiPortfolio`].
///
/// Repair is attempted exactly once; a second parse failure is terminal for
/// this generation attempt. The caller decides whether to retry in a
/// degraded tier.
pub fn parse_or_repair(
    text: &str,
    materials: &UserMaterials,
) -> Result<AntiPortfolio, GenerationError> {
    let cleaned = strip_code_fences(text);

    let parsed: AntiPortfolio = match serde_json::from_str(cleaned) {
        Ok(data) => data,
        Err(first_err) => {
            tracing::warn!(error = %first_err, "direct parse failed, attempting repair");
            let repaired = repair_json(cleaned);
            serde_json::from_str(&repaired).map_err(|err| {
                let tail: String = cleaned
                    .chars()
                    .rev()
                    .take(200)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                tracing::error!(error = %err, tail = %tail, "repair parse failed");
                GenerationError::Parse(err.to_string())
            })?
        }
    };

    validate(parsed, materials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_payload(style: bool) -> String {
        let style_part = if style { r#","style_dna": {}"# } else { "" };
        format!(
            r#"{{"meta": {{"name": "Ada", "location": "Turin", "primary_links": []}}, "anti_title": "t"{style_part}}}"#
        )
    }

    #[test]
    fn fenced_valid_json_parses() {
        let text = format!("```json\n{}\n```", minimal_payload(true));
        let apf = parse_or_repair(&text, &UserMaterials::default()).unwrap();
        assert_eq!(apf.meta.name, "Ada");
        assert!(apf.style_dna.is_some());
    }

    #[test]
    fn truncated_json_is_repaired() {
        // Two unmatched braces and one unmatched bracket: repair must append
        // `]` then `}}`.
        let text = r#"{"anti_title": "t", "style_dna": {"section_order": ["hero""#;
        let apf = parse_or_repair(text, &UserMaterials::default()).unwrap();
        assert_eq!(apf.anti_title, "t");
    }

    #[test]
    fn unrepairable_text_is_a_parse_error() {
        let err = parse_or_repair("not json at all", &UserMaterials::default()).unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn missing_style_is_terminal() {
        let err =
            parse_or_repair(&minimal_payload(false), &UserMaterials::default()).unwrap_err();
        assert!(matches!(err, GenerationError::MissingStyle));
    }
}
