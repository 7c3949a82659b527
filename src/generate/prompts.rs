use rand::Rng;
use rand::distr::Alphanumeric;

use crate::apf::{AntiPortfolio, Transcript, UserMaterials, Verifiability};

pub const FAST_CHAR_LIMIT: usize = 30_000;
pub const LITE_CHAR_LIMIT: usize = 15_000;

/// Random short seed injected into prompts to push sampling away from the
/// previous run.
pub fn variation_seed() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Char-bounded material block with a personal-data header.
pub fn prepare_input(materials: &UserMaterials, limit: usize) -> String {
    let personal = &materials.personal_data;
    let combined = format!(
        "PERSONAL DATA:\nName: {}\nLocation: {}\nContact: {}\n\nRAW TEXT:\n{}\nLINKEDIN:\n{}\nLINKS:\n{}",
        or_unspecified(&personal.name),
        or_unspecified(&personal.location),
        or_unspecified(&personal.contact),
        materials.raw_text,
        materials.linked_in_export,
        materials.project_links,
    );
    match combined.char_indices().nth(limit) {
        Some((byte_index, _)) => combined[..byte_index].to_string(),
        None => combined,
    }
}

fn or_unspecified(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value
    }
}

const JSON_SCHEMA_INSTRUCTIONS: &str = r##"
You MUST return ONLY a valid JSON object with exactly this structure:
{
  "meta": {
    "name": "string",
    "location": "string",
    "contact": "string (optional)",
    "primary_links": ["array of URLs"]
  },
  "anti_title": "string - functional title, NOT a job title",
  "signature": {
    "one_sentence": "string - who I am in two lines",
    "three_traits": ["array of 3 traits"],
    "edge": "string - what I do better than most, 3 sentences",
    "non_goals": ["array - what I do NOT do"]
  },
  "decision_patterns": [
    {
      "pattern_name": "string",
      "when_used": "string",
      "signals": ["array"],
      "tradeoffs": ["array"],
      "example": "string"
    }
  ],
  "method_stack": [
    {
      "step": "string - active verb",
      "description": "string",
      "artifacts_produced": ["array"],
      "common_failure": "string",
      "mitigation": "string"
    }
  ],
  "failure_ledger": [
    {
      "failure": "string",
      "context": "string",
      "lesson": "string",
      "rule_created": "string",
      "what_changed": "string",
      "evidence_refs": ["array"]
    }
  ],
  "loves_hates": {
    "loves": ["array"],
    "hates": ["array - at least 3 items"],
    "will_use_if_needed": ["array"]
  },
  "superpowers": [
    {
      "claim": "string",
      "why_true": "string",
      "scope": "string",
      "boundaries": "string",
      "evidence": ["array"]
    }
  ],
  "projects": [
    {
      "name": "string",
      "role_function": "string",
      "problem": "string",
      "approach": "string",
      "outcome": "string",
      "metrics": ["array"],
      "links": ["array"]
    }
  ],
  "proof_layer": [
    {
      "claim_id": "string",
      "claim_text": "string",
      "verifiability": "HIGH|MED|LOW",
      "evidence": [{"url": "string", "label": "string", "note": "string"}]
    }
  ],
  "style_dna": {
    "theme_name": "string - unique creative name for this style",
    "section_order": ["ORDERED array: hero|edge|methodology|failures|projects|patterns|proof|loves|hates|non_goals"],
    "layout": {
      "max_width": "CSS string - e.g. 800px, 1000px, 1200px",
      "content_align": "left|center|right",
      "section_spacing": "CSS string - e.g. 3rem, 5rem, 8rem",
      "inner_padding": "CSS string - e.g. 1.5rem, 2rem, 3rem"
    },
    "typography": {
      "heading_font": "font-family string - e.g. Georgia, serif | system-ui, sans-serif | Courier, monospace",
      "body_font": "font-family string",
      "heading_size": "CSS string - e.g. 2rem, 3rem, 4rem",
      "body_size": "CSS string - e.g. 1rem, 1.1rem",
      "heading_weight": "string - e.g. 300, 400, 700, 900",
      "body_weight": "string - e.g. 300, 400, 500",
      "line_height": "string - e.g. 1.5, 1.7, 2",
      "letter_spacing": "CSS string - e.g. 0, 0.05em, -0.02em",
      "text_transform": "none|uppercase|lowercase"
    },
    "palette": {
      "background": "#hex - PICK UNIQUE, CREATIVE COLORS",
      "surface": "#hex - surface/card color",
      "text": "#hex - MUST be readable on background",
      "accent": "#hex - primary highlight color",
      "secondary": "#hex - secondary color",
      "border": "#hex - border color"
    },
    "borders": {
      "radius": "CSS string - e.g. 0, 4px, 8px, 16px, 50%",
      "width": "CSS string - e.g. 0, 1px, 2px, 3px",
      "style": "none|solid|dashed|double"
    },
    "effects": {
      "shadow": "CSS box-shadow string or none",
      "hover_transform": "CSS transform string or none - e.g. translateY(-4px), scale(1.02)",
      "transition": "CSS string - e.g. all 0.3s ease",
      "background_pattern": "none or CSS gradient/pattern",
      "animation": "fadeIn|slideUp|slideLeft|glow|pulse|none"
    },
    "section_icons": {
      "edge": "string", "methodology": "string", "failures": "string",
      "projects": "string", "patterns": "string", "proof": "string"
    },
    "headers": {
      "style": "underline|boxed|pill|gradient|bracket|minimal",
      "icon_position": "before|after|none",
      "decoration_color": "#hex or empty"
    },
    "hero": {
      "layout": "centered|left-aligned|right-aligned",
      "name_size": "CSS string - e.g. 3rem, 4rem, 5rem",
      "show_avatar": true,
      "show_location": true,
      "decorative_element": "none|underline|background-shape"
    },
    "cards": {
      "style": "flat|elevated|bordered|minimal",
      "padding": "CSS string - e.g. 1rem, 1.5rem, 2rem",
      "gap": "CSS string - e.g. 1rem, 1.5rem, 2rem",
      "columns": "1|2|3|auto-fit"
    }
  },
  "section_labels": {
    "edge": "string - skills section title",
    "methodology": "string - methodology section title",
    "failures": "string - failures section title",
    "patterns": "string - patterns section title",
    "evidence": "string - proof section title",
    "projects": "string - projects section title",
    "anti_goals": "string - anti-goals section title",
    "hates": "string - hates section title"
  }
}

RESPOND WITH THE JSON ONLY, NO OTHER TEXT."##;

/// System prompt for the structured-content call.
pub fn content_system_prompt(variant: u32, seed: &str) -> String {
    let mut dynamic = format!(
        "VARIATION SEED: {seed}\n\
         Use this seed as inspiration for a UNIQUE style.\n\n\
         IMPORTANT - CREATE A COMPLETELY ORIGINAL DESIGN:\n\
         - \"theme_name\" must be a CREATIVE, UNIQUE NAME (e.g. \"Neon Rebel\", \"Quiet Storm\", \"Digital Monk\")\n\
         - Do NOT use generic names like \"Professional\", \"Modern\", \"Clean\"\n\
         - The color palette must be DIFFERENT every time; try unusual combinations\n\
         - The layout must reflect this person's specific PERSONALITY\n"
    );

    if variant > 0 {
        dynamic.push_str(&format!(
            "\nATTENTION: this is a REGENERATION (iteration {variant}).\n\
             The user wants a COMPLETELY DIFFERENT portfolio from the previous version.\n\n\
             MANDATORY:\n\
             1. CREATE A TOTALLY NEW VISUAL THEME - new theme_name, new palette, new layout\n\
             2. EXPLORE A DIFFERENT TRAIT of the personality - every person has many facets\n\
             3. CHANGE THE SECTION ORDER (section_order) - prioritize different sections\n\
             4. USE COMPLETELY DIFFERENT COLORS - dark before, light now; cold before, warm now\n\
             5. CHANGE THE TYPOGRAPHY - serif before, sans now; bold before, light now\n\
             6. REWRITE ALL CONTENT from a different perspective\n\n\
             The person is the SAME, but each version tells them from a COMPLETELY \
             DIFFERENT angle.\n"
        ));
    }

    format!(
        "YOU ARE A \"PRODUCT PROFILER\" AND TECHNICAL BIOGRAPHER.\n\
         Your job is to build a unique \"Anti-Portfolio\" that shows WHO this person is.\n\n\
         {dynamic}\n\
         WHAT AN ANTI-PORTFOLIO IS (CRITICAL):\n\
         NOT a CV. NOT a list of job titles and screenshots.\n\
         A completely new format that:\n\
         - Shows HOW this person THINKS and solves problems (not WHAT they did)\n\
         - Reveals their PROCESS and methodology (not just final output)\n\
         - Tells their UNIQUE imprint (what separates them from others with the same role)\n\
         - Demonstrates results with tangible PROOF\n\
         - Exposes FAILURES and the lessons learned\n\
         - States what they do NOT do and what they HATE\n\n\
         GOAL: write in NATURAL, CLEAR, SIMPLE language.\n\
         NO: empty corporate jargon, CV phrases, generic skill lists.\n\
         YES: short sentences, raw truths, radical honesty, specific details.\n\n\
         CONTENT RULES:\n\
         - signature.edge is THE KEY SECTION. It must answer \"WHAT DO I DO BETTER \
         THAN ANYONE ELSE?\" - never \"I am good at X\"; write \"When others do Y, \
         I do Z because...\". Be SPECIFIC, UNIQUE, MEMORABLE.\n\
         - meta.name and meta.location: MANDATORY, taken from the materials.\n\
         - anti_title: NOT the job title; a definition that captures HOW they work.\n\
         - signature.one_sentence: a sentence no one else with the same role would say.\n\
         - signature.three_traits: three traits of their WAY OF THINKING, not technical skills.\n\
         - method_stack: their REAL process, minimum 4 steps.\n\
         - failure_ledger: TRUE failures with CONCRETE lessons, minimum 2.\n\
         - decision_patterns: how they decide, minimum 2 patterns.\n\
         - signature.non_goals: minimum 3 items.\n\
         - loves_hates.hates: brutal honesty, minimum 3 items.\n\
         - projects: interesting PROBLEMS they solved, as PROOF of the edge.\n\n\
         VISUAL STYLE (style_dna) - YOU ARE THE DESIGNER:\n\
         There are no templates. Analyze the PERSONALITY from the interview answers \
         and design every visual aspect from scratch: layout width and alignment, \
         typography (serif for elegant, sans for modern, mono for technical), a bold \
         memorable palette with readable text, borders and shapes, rich effects \
         (creative shadows, hover transforms, transitions, background patterns), \
         hero and card configuration, per-section icons matching the tone, a header \
         style, an animation, and the section order. Never repeat the same style.\n\
         {JSON_SCHEMA_INSTRUCTIONS}"
    )
}

/// User prompt for the structured-content call.
pub fn content_user_prompt(materials_block: &str, transcript: &Transcript) -> String {
    format!(
        "INPUT MATERIALS:\n{materials_block}\n\n\
         INTERVIEW CONTEXT:\n{}\n\n\
         Generate the Anti-Portfolio JSON from this data.",
        transcript.as_context()
    )
}

/// System prompt for the full-markup call.
pub const MARKUP_SYSTEM_PROMPT: &str = "\
YOU ARE A RADICAL DESIGNER creating ANTI-PORTFOLIOS.

WHAT AN ANTI-PORTFOLIO IS (CRITICAL):
NOT a CV. NOT a traditional portfolio. NOT a list of job titles and screenshots.
A COMPLETELY NEW format that BREAKS every convention.

It shows:
1. HOW this person THINKS and solves problems (not WHAT they did)
2. Their PROCESS and methodology
3. Their UNIQUE imprint
4. Their FAILURES and lessons - radical transparency
5. What they do NOT do and what they HATE - brutal honesty
6. Tangible PROOF - no empty self-declarations

DESIGN PRINCIPLES:
- The most important section is the EDGE - it must dominate
- FAILURES must be visible and celebrated as learning
- The PROCESS/METHODOLOGY must be clear and visual
- NO generic skill lists, NO CV layouts (round photo, timeline, experience list)
- NO LinkedIn phrases (\"passionate professional\", \"team player\")
- BREAK visual expectations - surprise the viewer

VISUAL HIERARCHY (by importance): EDGE, METHODOLOGY, FAILURES, DECISION
PATTERNS, NON-GOALS, then PROJECTS only as PROOF.

TECHNICAL RULES:
- Pure HTML+CSS, no framework
- CSS inline in a <style> tag
- Responsive via media queries
- Google Fonts via @import
- CSS animations for emphasis
- Text must stay READABLE

OUTPUT: return ONLY the complete HTML, starting with <!DOCTYPE html>";

/// User prompt for the full-markup call: a plain-text digest of the payload.
pub fn markup_user_prompt(data: &AntiPortfolio, variant: u32, seed: &str) -> String {
    let variant_block = if variant > 0 {
        format!(
            "\n\nTHIS IS A REGENERATION (iteration {variant}).\n\
             CREATE A COMPLETELY DIFFERENT DESIGN from the previous version.\n\
             Change: layout, color palette, typography, effects, structure.\n\
             Explore a DIFFERENT aspect of this person's personality."
        )
    } else {
        String::new()
    };

    format!(
        "SEED: {seed}{variant_block}\n\n{}\n\n\
         GENERATE THE ANTI-PORTFOLIO HTML.\n\n\
         REMEMBER:\n\
         - The EDGE must DOMINATE visually\n\
         - FAILURES must be CELEBRATED, not hidden\n\
         - The METHODOLOGY must be visualized as a process/flowchart\n\
         - NON-GOALS and HATES must be prominent\n\
         - PROJECTS serve only as PROOF\n\
         - BREAK traditional portfolio conventions\n\n\
         Return ONLY the HTML code (start with <!DOCTYPE html>).",
        portfolio_digest(data)
    )
}

fn portfolio_digest(data: &AntiPortfolio) -> String {
    let mut out = String::with_capacity(2_048);
    out.push_str("=== ANTI-PORTFOLIO DATA ===\n\nIDENTITY:\n");
    out.push_str(&format!(
        "Name: {}\nLocation: {}\nAnti-title (NOT a job title): {}\nWho I am in one sentence: {}\n",
        or_unspecified(&data.meta.name),
        or_unspecified(&data.meta.location),
        data.anti_title,
        data.signature.one_sentence,
    ));

    out.push_str("\n=== MOST IMPORTANT SECTION: EDGE ===\nWHAT I DO BETTER THAN ANYONE ELSE:\n");
    out.push_str(or_unspecified(&data.signature.edge));
    out.push_str("\n\nDistinctive traits of my way of thinking:\n");
    for trait_line in &data.signature.three_traits {
        out.push_str(&format!("- {trait_line}\n"));
    }

    out.push_str("\n=== METHODOLOGY - MY PROCESS ===\n");
    for (index, step) in data.method_stack.iter().enumerate() {
        out.push_str(&format!(
            "STEP {}: {}\n   {}\n   Produces: {}\n   Common failure: {}\n\n",
            index + 1,
            step.step,
            step.description,
            step.artifacts_produced.join(", "),
            step.common_failure,
        ));
    }

    out.push_str("=== FAILURES - RADICAL TRANSPARENCY ===\n");
    for failure in &data.failure_ledger {
        out.push_str(&format!(
            "FAILURE: {}\n   Context: {}\n   Lesson: {}\n   RULE CREATED: {}\n   What changed: {}\n\n",
            failure.failure, failure.context, failure.lesson, failure.rule_created,
            failure.what_changed,
        ));
    }

    out.push_str("=== DECISION PATTERNS ===\n");
    for pattern in &data.decision_patterns {
        out.push_str(&format!(
            "PATTERN: {}\n   When: {}\n   Signals: {}\n   Trade-offs: {}\n\n",
            pattern.pattern_name,
            pattern.when_used,
            pattern.signals.join(", "),
            pattern.tradeoffs.join(", "),
        ));
    }

    out.push_str("=== WHAT I DO NOT DO ===\n");
    for goal in &data.signature.non_goals {
        out.push_str(&format!("- {goal}\n"));
    }

    out.push_str("\n=== WHAT I HATE ===\n");
    for hate in &data.loves_hates.hates {
        out.push_str(&format!("- {hate}\n"));
    }

    out.push_str("\n=== WHAT I LOVE ===\n");
    for love in &data.loves_hates.loves {
        out.push_str(&format!("- {love}\n"));
    }

    out.push_str("\n=== PROJECTS (as PROOF, not as a list) ===\n");
    for project in &data.projects {
        out.push_str(&format!(
            "{}\n   Problem solved: {}\n   My approach: {}\n   Outcome: {}\n   Metrics: {}\n   Links: {}\n\n",
            project.name, project.problem, project.approach, project.outcome,
            project.metrics.join(", "),
            project.links.join(", "),
        ));
    }

    out.push_str("=== VERIFIABLE PROOF ===\n");
    for proof in &data.proof_layer {
        let tag = match proof.verifiability {
            Verifiability::High => "HIGH",
            Verifiability::Med => "MED",
            Verifiability::Low => "LOW",
        };
        out.push_str(&format!("[{tag}] {}\n", proof.claim_text));
        for evidence in &proof.evidence {
            out.push_str(&format!("   -> {}: {}\n", evidence.label, evidence.url));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apf::PersonalData;

    #[test]
    fn seed_is_eight_lowercase_alphanumerics() {
        let seed = variation_seed();
        assert_eq!(seed.chars().count(), 8);
        assert!(seed.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn prepare_input_respects_char_limit() {
        let materials = UserMaterials {
            raw_text: "x".repeat(50_000),
            ..Default::default()
        };
        let fast = prepare_input(&materials, FAST_CHAR_LIMIT);
        let lite = prepare_input(&materials, LITE_CHAR_LIMIT);
        assert_eq!(fast.chars().count(), FAST_CHAR_LIMIT);
        assert_eq!(lite.chars().count(), LITE_CHAR_LIMIT);
    }

    #[test]
    fn prepare_input_labels_missing_personal_data() {
        let materials = UserMaterials {
            raw_text: "short bio".into(),
            personal_data: PersonalData {
                name: "Ada".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let input = prepare_input(&materials, FAST_CHAR_LIMIT);
        assert!(input.contains("Name: Ada"));
        assert!(input.contains("Location: Not specified"));
    }

    #[test]
    fn regeneration_instructions_only_appear_for_variants() {
        assert!(!content_system_prompt(0, "seed").contains("REGENERATION"));
        assert!(content_system_prompt(2, "seed").contains("iteration 2"));
    }

    #[test]
    fn markup_prompt_digests_edge_and_failures() {
        let mut data = AntiPortfolio::default();
        data.signature.edge = "I break builds on purpose.".into();
        data.failure_ledger.push(crate::apf::FailureEntry {
            failure: "Shipped an untested migration".into(),
            rule_created: "Never migrate on Friday".into(),
            ..Default::default()
        });
        let prompt = markup_user_prompt(&data, 0, "abcd1234");
        assert!(prompt.contains("I break builds on purpose."));
        assert!(prompt.contains("Never migrate on Friday"));
        assert!(!prompt.contains("REGENERATION"));
    }
}
