use crate::apf::{AntiPortfolio, SectionKind, Verifiability};

use super::escape_html;
use super::headers::section_header;
use super::resolve::ResolvedStyle;

/// Edge narrative fragments at or below this trimmed length are dropped.
pub const EDGE_FRAGMENT_MIN_CHARS: usize = 10;

const METHODOLOGY_GRID_MIN_PX: u32 = 280;
const PROJECTS_GRID_MIN_PX: u32 = 300;

/// Build one section. `None` means the backing content is empty and the
/// section is omitted entirely. Styling never branches on content.
pub(crate) fn build(kind: SectionKind, data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    match kind {
        SectionKind::Hero => Some(hero(data, style)),
        SectionKind::Edge => edge(data, style),
        SectionKind::Methodology => methodology(data, style),
        SectionKind::Failures => failures(data, style),
        SectionKind::Projects => projects(data, style),
        SectionKind::Patterns => patterns(data, style),
        SectionKind::Proof => proof(data, style),
        SectionKind::Loves => loves(data, style),
        SectionKind::Hates => hates(data, style),
        SectionKind::NonGoals => non_goals(data, style),
    }
}

fn section_css(style: &ResolvedStyle) -> String {
    let animation = match style.animation.as_str() {
        "fadeIn" => ";animation:fadeIn 0.8s ease-out",
        "slideUp" => ";animation:slideUp 0.6s ease-out",
        "slideLeft" => ";animation:slideLeft 0.6s ease-out",
        "glow" => ";animation:glow 2s ease-in-out infinite",
        "pulse" => ";animation:pulse 2s ease-in-out infinite",
        _ => "",
    };
    format!(
        "margin-bottom:{};text-align:{}{animation}",
        style.section_spacing, style.content_align
    )
}

pub(crate) fn card_css(style: &ResolvedStyle) -> String {
    format!(
        "background-color:{};padding:{};border-radius:{};border-width:{};\
         border-style:{};border-color:{};box-shadow:{};transition:{}",
        style.surface,
        style.card_padding,
        style.radius,
        style.border_width,
        style.border_style,
        style.border,
        style.shadow,
        style.transition,
    )
}

fn card(style: &ResolvedStyle, inner: &str) -> String {
    format!("<div class=\"apf-card\" style=\"{}\">{inner}</div>", card_css(style))
}

fn column_stack(style: &ResolvedStyle, cards: &[String]) -> String {
    format!(
        "<div style=\"display:flex;flex-direction:column;gap:{}\">{}</div>",
        style.card_gap,
        cards.concat()
    )
}

/// Grid template: `auto-fit` keeps the responsive minmax form; anything else
/// is a fixed column count, unparsable values collapsing to one column.
fn grid(style: &ResolvedStyle, min_px: u32, cards: &[String]) -> String {
    let template = if style.columns == "auto-fit" {
        format!("repeat(auto-fit, minmax({min_px}px, 1fr))")
    } else {
        let count: u32 = style.columns.parse().unwrap_or(1);
        format!("repeat({count}, 1fr)")
    };
    format!(
        "<div style=\"display:grid;grid-template-columns:{template};gap:{}\">{}</div>",
        style.card_gap,
        cards.concat()
    )
}

fn section(style: &ResolvedStyle, header: String, body: String) -> String {
    format!(
        "<section style=\"{}\">{header}{body}</section>",
        section_css(style)
    )
}

fn label_of<'a>(explicit: Option<&'a str>, fallback: &'a str) -> &'a str {
    explicit.filter(|l| !l.trim().is_empty()).unwrap_or(fallback)
}

fn icon_for(data: &AntiPortfolio, kind: SectionKind) -> Option<&str> {
    data.style_dna
        .as_ref()
        .and_then(|dna| dna.section_icons.as_ref())
        .and_then(|icons| icons.for_kind(kind))
}

// ─── Section builders ────────────────────────────────────────────────────────

fn hero(data: &AntiPortfolio, style: &ResolvedStyle) -> String {
    let align = match style.hero_layout.as_str() {
        "centered" => "center",
        "right-aligned" => "right",
        _ => "left",
    };
    let centered = align == "center";

    let mut out = format!(
        "<section style=\"margin-bottom:{};padding-top:{};padding-bottom:{};text-align:{align}\">",
        style.section_spacing, style.section_spacing, style.section_spacing
    );

    if style.show_avatar {
        let initial = data.meta.name.chars().next().unwrap_or('?');
        let margin = if centered { "0 auto 1rem" } else { "0 0 1rem 0" };
        out.push_str(&format!(
            "<div style=\"width:80px;height:80px;border-radius:{};background-color:{};\
             color:{};display:flex;align-items:center;justify-content:center;\
             font-size:2rem;font-weight:bold;margin:{margin}\">{}</div>",
            style.radius,
            style.accent,
            style.background,
            escape_html(&initial.to_string()),
        ));
    }

    out.push_str(&format!(
        "<h1 style=\"font-family:{};font-size:{};font-weight:{};text-transform:{};color:{}\">{}</h1>",
        style.heading_font,
        style.hero_name_size,
        style.heading_weight,
        style.text_transform,
        style.accent,
        escape_html(&data.meta.name),
    ));

    out.push_str(&format!(
        "<div style=\"font-size:1.25rem;color:{};margin-bottom:1rem\">{}</div>",
        style.secondary,
        escape_html(&data.anti_title),
    ));

    if style.show_location && !data.meta.location.is_empty() {
        out.push_str(&format!(
            "<div style=\"color:{};font-size:0.9rem\">{}</div>",
            style.secondary,
            escape_html(&data.meta.location),
        ));
    }

    if !data.signature.one_sentence.is_empty() {
        let margin = if centered { "1.5rem auto 0" } else { "1.5rem 0 0 0" };
        out.push_str(&format!(
            "<p style=\"font-size:1.1rem;max-width:600px;margin:{margin}\">{}</p>",
            escape_html(&data.signature.one_sentence),
        ));
    }

    if style.decorative_element == "underline" {
        let margin = if centered { "2rem auto 0" } else { "2rem 0 0 0" };
        out.push_str(&format!(
            "<div style=\"width:60px;height:4px;background-color:{};margin:{margin}\"></div>",
            style.accent,
        ));
    }

    out.push_str("</section>");
    out
}

fn edge(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    let fragments: Vec<&str> = data
        .signature
        .edge
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > EDGE_FRAGMENT_MIN_CHARS)
        .collect();
    if fragments.is_empty() {
        return None;
    }

    let label = label_of(
        data.section_labels.as_ref().and_then(|l| l.edge.as_deref()),
        "Edge",
    );
    let cards: Vec<String> = fragments
        .iter()
        .map(|fragment| card(style, &escape_html(fragment)))
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::Edge), label),
        column_stack(style, &cards),
    ))
}

fn methodology(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    if data.method_stack.is_empty() {
        return None;
    }
    let label = label_of(
        data.section_labels
            .as_ref()
            .and_then(|l| l.methodology.as_deref()),
        "Methodology",
    );
    let cards: Vec<String> = data
        .method_stack
        .iter()
        .enumerate()
        .map(|(index, step)| {
            card(
                style,
                &format!(
                    "<div style=\"display:flex;align-items:center;gap:0.5rem;\
                     margin-bottom:0.5rem;color:{};font-weight:{}\">\
                     <span>{}.</span><span>{}</span></div>\
                     <p style=\"opacity:0.9\">{}</p>",
                    style.accent,
                    style.heading_weight,
                    index + 1,
                    escape_html(&step.step),
                    escape_html(&step.description),
                ),
            )
        })
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::Methodology), label),
        grid(style, METHODOLOGY_GRID_MIN_PX, &cards),
    ))
}

fn failures(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    if data.failure_ledger.is_empty() {
        return None;
    }
    let label = label_of(
        data.section_labels
            .as_ref()
            .and_then(|l| l.failures.as_deref()),
        "Lessons Learned",
    );
    let cards: Vec<String> = data
        .failure_ledger
        .iter()
        .map(|entry| {
            card(
                style,
                &format!(
                    "<p style=\"margin-bottom:0.75rem\">{}</p>\
                     <div style=\"padding:0.75rem;background-color:{};border-radius:{};\
                     font-size:0.9rem\"><strong>Rule:</strong> {}</div>",
                    escape_html(&entry.failure),
                    style.background,
                    style.radius,
                    escape_html(&entry.rule_created),
                ),
            )
        })
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::Failures), label),
        column_stack(style, &cards),
    ))
}

fn projects(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    if data.projects.is_empty() {
        return None;
    }
    let label = label_of(
        data.section_labels
            .as_ref()
            .and_then(|l| l.projects.as_deref()),
        "Projects",
    );
    let cards: Vec<String> = data
        .projects
        .iter()
        .map(|project| {
            card(
                style,
                &format!(
                    "<h3 style=\"color:{};margin-bottom:0.5rem;font-size:1.2rem;\
                     font-weight:{}\">{}</h3>\
                     <p style=\"margin-bottom:0.5rem\">{}</p>\
                     <p style=\"font-size:0.9rem;opacity:0.8\">{}</p>\
                     <div style=\"margin-top:0.75rem;color:{};font-weight:bold\">{}</div>",
                    style.accent,
                    style.heading_weight,
                    escape_html(&project.name),
                    escape_html(&project.problem),
                    escape_html(&project.approach),
                    style.accent,
                    escape_html(&project.outcome),
                ),
            )
        })
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::Projects), label),
        grid(style, PROJECTS_GRID_MIN_PX, &cards),
    ))
}

fn patterns(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    if data.decision_patterns.is_empty() {
        return None;
    }
    let label = label_of(
        data.section_labels
            .as_ref()
            .and_then(|l| l.patterns.as_deref()),
        "Decision Patterns",
    );
    let cards: Vec<String> = data
        .decision_patterns
        .iter()
        .map(|pattern| {
            let tradeoffs = if pattern.tradeoffs.is_empty() {
                String::new()
            } else {
                format!(
                    "<div style=\"font-size:0.9rem;opacity:0.8\">Trade-offs: {}</div>",
                    escape_html(&pattern.tradeoffs.join(", ")),
                )
            };
            card(
                style,
                &format!(
                    "<h3 style=\"margin-bottom:0.5rem;font-weight:bold\">{}</h3>\
                     <p style=\"margin-bottom:0.5rem;opacity:0.9\">{}</p>{tradeoffs}",
                    escape_html(&pattern.pattern_name),
                    escape_html(&pattern.when_used),
                ),
            )
        })
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::Patterns), label),
        column_stack(style, &cards),
    ))
}

fn proof(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    if data.proof_layer.is_empty() {
        return None;
    }
    let label = label_of(
        data.section_labels
            .as_ref()
            .and_then(|l| l.evidence.as_deref()),
        "Proof",
    );
    let cards: Vec<String> = data
        .proof_layer
        .iter()
        .map(|item| {
            let (badge_color, badge_text) = match item.verifiability {
                Verifiability::High => ("#22c55e", "HIGH"),
                Verifiability::Med => ("#eab308", "MED"),
                Verifiability::Low => ("#6b7280", "LOW"),
            };
            let links: String = item
                .evidence
                .iter()
                .map(|evidence| {
                    format!(
                        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" \
                         style=\"display:block;color:{};font-size:0.9rem;margin-top:0.25rem\">{}</a>",
                        escape_html(&evidence.url),
                        style.accent,
                        escape_html(&evidence.label),
                    )
                })
                .collect();
            format!(
                "<div class=\"apf-card\" style=\"{};display:flex;align-items:start;gap:1rem\">\
                 <span style=\"padding:0.25rem 0.5rem;border-radius:4px;font-size:0.75rem;\
                 font-weight:bold;background-color:{badge_color};color:#fff\">{badge_text}</span>\
                 <div><p>{}</p>{links}</div></div>",
                card_css(style),
                escape_html(&item.claim_text),
            )
        })
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::Proof), label),
        column_stack(style, &cards),
    ))
}

fn loves(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    if data.loves_hates.loves.is_empty() {
        return None;
    }
    let pills: String = data
        .loves_hates
        .loves
        .iter()
        .map(|love| {
            format!(
                "<span style=\"padding:0.5rem 1rem;background-color:{};color:{};\
                 border-radius:{};font-size:0.9rem;transition:{}\">{}</span>",
                style.accent,
                style.background,
                style.radius,
                style.transition,
                escape_html(love),
            )
        })
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::Loves), "What I Love"),
        format!("<div style=\"display:flex;flex-wrap:wrap;gap:0.5rem\">{pills}</div>"),
    ))
}

fn hates(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    if data.loves_hates.hates.is_empty() {
        return None;
    }
    let label = label_of(
        data.section_labels.as_ref().and_then(|l| l.hates.as_deref()),
        "What I Avoid",
    );
    let border_style = if style.border_style == "none" {
        "solid"
    } else {
        style.border_style.as_str()
    };
    let border_width = if style.border_width == "0" {
        "1px"
    } else {
        style.border_width.as_str()
    };
    let pills: String = data
        .loves_hates
        .hates
        .iter()
        .map(|hate| {
            format!(
                "<span style=\"padding:0.5rem 1rem;border:{border_width} {border_style} {};\
                 border-radius:{};font-size:0.9rem\">{}</span>",
                style.border,
                style.radius,
                escape_html(hate),
            )
        })
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::Hates), label),
        format!("<div style=\"display:flex;flex-wrap:wrap;gap:0.5rem\">{pills}</div>"),
    ))
}

fn non_goals(data: &AntiPortfolio, style: &ResolvedStyle) -> Option<String> {
    if data.signature.non_goals.is_empty() {
        return None;
    }
    let label = label_of(
        data.section_labels
            .as_ref()
            .and_then(|l| l.anti_goals.as_deref()),
        "What I Don't Do",
    );
    let items: String = data
        .signature
        .non_goals
        .iter()
        .map(|goal| {
            format!(
                "<li style=\"display:flex;gap:0.5rem;margin-bottom:0.5rem;opacity:0.8\">\
                 <span style=\"color:{}\">-</span><span>{}</span></li>",
                style.secondary,
                escape_html(goal),
            )
        })
        .collect();
    Some(section(
        style,
        section_header(style, icon_for(data, SectionKind::NonGoals), label),
        format!("<ul style=\"list-style:none;padding:0\">{items}</ul>"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apf::{FailureEntry, ProofItem, StyleDna};
    use crate::render::resolve::resolve;

    fn style() -> ResolvedStyle {
        resolve(&StyleDna::default())
    }

    #[test]
    fn empty_backing_lists_omit_their_sections() {
        let data = AntiPortfolio::default();
        let s = style();
        for kind in [
            SectionKind::Edge,
            SectionKind::Methodology,
            SectionKind::Failures,
            SectionKind::Projects,
            SectionKind::Patterns,
            SectionKind::Proof,
            SectionKind::Loves,
            SectionKind::Hates,
            SectionKind::NonGoals,
        ] {
            assert!(build(kind, &data, &s).is_none(), "{kind} should be omitted");
        }
        assert!(build(SectionKind::Hero, &data, &s).is_some());
    }

    #[test]
    fn edge_splits_sentences_and_drops_short_fragments() {
        let mut data = AntiPortfolio::default();
        data.signature.edge =
            "When others sketch, I interrogate the brief first! Ok. Then I design to survive objections?".into();
        let html = build(SectionKind::Edge, &data, &style()).unwrap();
        assert!(html.contains("When others sketch, I interrogate the brief first"));
        assert!(html.contains("Then I design to survive objections"));
        // "Ok" is at the 10-char floor and must be dropped.
        assert!(!html.contains(">Ok<"));
    }

    #[test]
    fn edge_with_only_short_fragments_is_omitted() {
        let mut data = AntiPortfolio::default();
        data.signature.edge = "Short. Tiny. No.".into();
        assert!(build(SectionKind::Edge, &data, &style()).is_none());
    }

    #[test]
    fn auto_fit_columns_emit_minmax_grid() {
        let mut data = AntiPortfolio::default();
        data.method_stack.push(Default::default());
        data.projects.push(Default::default());
        let dna: StyleDna =
            serde_json::from_str(r#"{"cards": {"columns": "auto-fit"}}"#).unwrap();
        let s = resolve(&dna);
        let methodology = build(SectionKind::Methodology, &data, &s).unwrap();
        assert!(methodology.contains("repeat(auto-fit, minmax(280px, 1fr))"));
        let projects = build(SectionKind::Projects, &data, &s).unwrap();
        assert!(projects.contains("repeat(auto-fit, minmax(300px, 1fr))"));
    }

    #[test]
    fn unparsable_column_count_falls_back_to_one() {
        let mut data = AntiPortfolio::default();
        data.method_stack.push(Default::default());
        let dna: StyleDna = serde_json::from_str(r#"{"cards": {"columns": "many"}}"#).unwrap();
        let html = build(SectionKind::Methodology, &data, &resolve(&dna)).unwrap();
        assert!(html.contains("repeat(1, 1fr)"));
    }

    #[test]
    fn proof_badges_track_verifiability() {
        let mut data = AntiPortfolio::default();
        data.proof_layer.push(ProofItem {
            claim_text: "Shipped the migration".into(),
            verifiability: Verifiability::High,
            ..Default::default()
        });
        let html = build(SectionKind::Proof, &data, &style()).unwrap();
        assert!(html.contains("#22c55e"));
        assert!(html.contains("HIGH"));
    }

    #[test]
    fn user_content_is_escaped() {
        let mut data = AntiPortfolio::default();
        data.failure_ledger.push(FailureEntry {
            failure: "<img src=x onerror=alert(1)>".into(),
            rule_created: "escape & verify".into(),
            ..Default::default()
        });
        let html = build(SectionKind::Failures, &data, &style()).unwrap();
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
        assert!(html.contains("escape &amp; verify"));
    }

    #[test]
    fn section_labels_override_defaults() {
        let mut data = AntiPortfolio::default();
        data.signature.non_goals.push("No growth hacking".into());
        data.section_labels = Some(crate::apf::SectionLabels {
            anti_goals: Some("Refusals".into()),
            ..Default::default()
        });
        let html = build(SectionKind::NonGoals, &data, &style()).unwrap();
        assert!(html.contains("Refusals"));
        assert!(!html.contains("What I Don&#39;t Do"));
    }
}
