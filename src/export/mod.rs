//! Export an anti-portfolio as JSON, Markdown, or a standalone HTML document.
//!
//! Exports are pure views of the payload: the same payload always exports to
//! the same bytes, and nothing here calls the provider.

use crate::apf::AntiPortfolio;
use crate::error::RenderError;
use crate::render::{self, RenderedPage};

/// Pretty-printed JSON of the full payload, style descriptor included.
pub fn to_json(data: &AntiPortfolio) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// File name for a download of this payload: the subject's name with
/// whitespace collapsed to underscores, or a generic stem when empty.
pub fn file_stem(data: &AntiPortfolio) -> String {
    let stem: String = data
        .meta
        .name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        "portfolio".to_owned()
    } else {
        stem
    }
}

/// Deterministic Markdown summary of the signature, method, failures, proofs
/// and non-goals. A proof without evidence is flagged as self-declared
/// rather than given a fabricated link.
pub fn to_markdown(data: &AntiPortfolio) -> String {
    let mut out = String::new();

    let name = if data.meta.name.is_empty() {
        "Anti-Portfolio"
    } else {
        &data.meta.name
    };
    out.push_str(&format!("# {name}\n"));
    out.push_str(&format!("## {}\n", data.anti_title));
    out.push_str(&format!("> \"{}\"\n\n", data.signature.one_sentence));

    out.push_str("### What I do better than most\n");
    out.push_str(&data.signature.edge);
    out.push_str("\n\n---\n");

    out.push_str("### How I work\n");
    for (index, step) in data.method_stack.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}**: {}\n",
            index + 1,
            step.step,
            step.description
        ));
    }

    out.push_str("\n### Useful failures\n");
    for entry in &data.failure_ledger {
        out.push_str(&format!(
            "- **Failure**: {}\n  - *Rule*: {}\n",
            entry.failure, entry.rule_created
        ));
    }

    out.push_str("\n### Proof\n");
    for item in &data.proof_layer {
        let link = item
            .evidence
            .first()
            .map_or_else(|| "[Self-declared]".to_owned(), |e| format!("({})", e.url));
        out.push_str(&format!("- {} {link}\n", item.claim_text));
    }

    out.push_str("\n### What I don't do\n");
    for goal in &data.signature.non_goals {
        out.push_str(&format!("- {goal}\n"));
    }

    out
}

/// A complete HTML document. The generated full-markup artifact is already a
/// document and exports verbatim; the fallback render is wrapped in a shell
/// whose base stylesheet carries the resolved palette and typography.
pub fn to_html_document(data: &AntiPortfolio) -> Result<String, RenderError> {
    match render::render(data)? {
        RenderedPage::FullMarkup(html) => Ok(html),
        RenderedPage::Fallback(body) => {
            let Some(dna) = &data.style_dna else {
                return Err(RenderError::MissingStyle);
            };
            let style = render::resolve(dna);
            let title = render::escape_html(if data.meta.name.is_empty() {
                "Anti-Portfolio"
            } else {
                &data.meta.name
            });
            Ok(format!(
                "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
                 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
                 <title>{title}</title>\n<style>\n\
                 * {{ box-sizing: border-box; margin: 0; padding: 0; }}\n\
                 html, body {{ background-color: {}; color: {}; font-family: {}; \
                 line-height: {}; min-height: 100vh; }}\n\
                 h1, h2, h3 {{ font-family: {}; font-weight: {}; }}\n\
                 a {{ color: {}; }}\n\
                 </style>\n</head>\n<body>\n{body}\n</body>\n</html>",
                style.background,
                style.text,
                style.body_font,
                style.line_height,
                style.heading_font,
                style.heading_weight,
                style.accent,
            ))
        }
    }
}
