/// Strip fenced-code wrapping (with or without a language tag) from the start
/// and end of a response blob.
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();

    if let Some(rest) = cleaned.strip_prefix("```") {
        // Drop an optional language tag up to the first newline.
        cleaned = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest,
        };
        if let Some(body) = cleaned.trim_end().strip_suffix("```") {
            cleaned = body;
        }
    }

    cleaned.trim()
}

/// Best-effort structural repair of truncated JSON.
///
/// Appends a closing quote when the quote count is odd, then the missing
/// closing brackets and braces in bracket-then-brace order. The heuristic
/// closes syntax only; a value cut off mid-sentence stays truncated.
pub fn repair_json(text: &str) -> String {
    let mut repaired = text.trim().to_string();

    let quotes = repaired.matches('"').count();
    if quotes % 2 != 0 {
        repaired.push('"');
    }

    let open_braces = repaired.matches('{').count();
    let close_braces = repaired.matches('}').count();
    let open_brackets = repaired.matches('[').count();
    let close_brackets = repaired.matches(']').count();

    for _ in close_brackets..open_brackets {
        repaired.push(']');
    }
    for _ in close_braces..open_braces {
        repaired.push('}');
    }

    repaired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn leaves_interior_fences_alone() {
        let text = "{\"snippet\": \"```rust\"}";
        assert_eq!(strip_code_fences(text), text);
    }

    #[test]
    fn appends_bracket_then_braces() {
        // Truncated mid-value with two unmatched `{` and one unmatched `[`.
        let input = r#"{"outer": {"items": ["a", "b""#;
        let repaired = repair_json(input);
        assert!(repaired.ends_with("]}}"));
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }

    #[test]
    fn closes_dangling_quote() {
        let input = r#"{"key": "unfinished"#;
        let repaired = repair_json(input);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["key"], "unfinished");
    }

    #[test]
    fn balanced_input_is_untouched() {
        let input = r#"{"key": [1, 2, 3]}"#;
        assert_eq!(repair_json(input), input);
    }
}
