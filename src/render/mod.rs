//! Render an [`AntiPortfolio`] to HTML.
//!
//! Two paths exist. When the payload carries a generated full-markup artifact
//! the renderer passes it through verbatim and the host embeds it in a
//! sandboxed iframe. Otherwise the generic path walks `section_order`,
//! building each section from the resolved style descriptor. The generic path
//! only reads the payload, so rendering the same payload twice produces the
//! same page.

mod headers;
mod resolve;
mod sections;

pub use resolve::{resolve, HeaderVariant, IconPosition, ResolvedStyle};
pub use sections::EDGE_FRAGMENT_MIN_CHARS;

use crate::apf::{AntiPortfolio, SectionKind};
use crate::error::RenderError;

/// Order used when the style descriptor supplies no `section_order`.
pub const DEFAULT_SECTION_ORDER: [SectionKind; 5] = [
    SectionKind::Hero,
    SectionKind::Edge,
    SectionKind::Methodology,
    SectionKind::Projects,
    SectionKind::Failures,
];

/// A rendered page, tagged by which path produced it so hosts can decide
/// how much trust to extend. Full markup is generator output and must be
/// isolated; fallback markup is built from escaped payload content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPage {
    FullMarkup(String),
    Fallback(String),
}

impl RenderedPage {
    pub fn html(&self) -> &str {
        match self {
            Self::FullMarkup(html) | Self::Fallback(html) => html,
        }
    }
}

/// Render the payload. The full-markup artifact wins when present and is
/// returned untouched. The generic path requires a style descriptor; a
/// payload without one was never validated and is rejected.
pub fn render(data: &AntiPortfolio) -> Result<RenderedPage, RenderError> {
    if let Some(html) = &data.generated_html {
        return Ok(RenderedPage::FullMarkup(html.clone()));
    }
    let Some(dna) = &data.style_dna else {
        return Err(RenderError::MissingStyle);
    };
    let style = resolve(dna);

    let order: &[SectionKind] = if dna.section_order.is_empty() {
        &DEFAULT_SECTION_ORDER
    } else {
        &dna.section_order
    };

    let body: String = order
        .iter()
        .filter_map(|&kind| sections::build(kind, data, &style))
        .collect();

    let mut out = format!("<style>{}</style>", stylesheet(&style));
    out.push_str(&format!(
        "<div style=\"{}\"><div style=\"max-width:{};margin:0 auto;padding:{}\">{body}{}</div></div>",
        wrapper_css(&style),
        style.max_width,
        style.inner_padding,
        footer(data, &style),
    ));
    Ok(RenderedPage::Fallback(out))
}

/// Embed markup for a host page. Full markup goes into a sandboxed iframe
/// with no permission tokens, so generated scripts and forms are inert.
/// Fallback markup is already escaped payload content and embeds directly.
pub fn host_embed(page: &RenderedPage) -> String {
    match page {
        RenderedPage::FullMarkup(html) => format!(
            "<iframe sandbox srcdoc=\"{}\" title=\"Anti-Portfolio\" \
             style=\"width:100%;height:100vh;border:none;display:block\"></iframe>",
            escape_html(html),
        ),
        RenderedPage::Fallback(html) => html.clone(),
    }
}

fn wrapper_css(style: &ResolvedStyle) -> String {
    let mut css = format!(
        "background-color:{};color:{};font-family:{};font-size:{};\
         font-weight:{};line-height:{};letter-spacing:{};min-height:100vh",
        style.background,
        style.text,
        style.body_font,
        style.body_size,
        style.body_weight,
        style.line_height,
        style.letter_spacing,
    );
    if let Some(pattern) = background_pattern(style) {
        css.push_str(&pattern);
    }
    css
}

fn background_pattern(style: &ResolvedStyle) -> Option<String> {
    match style.background_pattern.as_str() {
        "dots" => Some(format!(
            ";background-image:radial-gradient({}22 1px, transparent 1px);\
             background-size:20px 20px",
            style.decoration,
        )),
        "grid" => Some(format!(
            ";background-image:linear-gradient({deco}11 1px, transparent 1px),\
             linear-gradient(90deg, {deco}11 1px, transparent 1px);\
             background-size:40px 40px",
            deco = style.decoration,
        )),
        "diagonal-lines" => Some(format!(
            ";background-image:repeating-linear-gradient(45deg, {}08 0, {}08 1px, \
             transparent 1px, transparent 12px)",
            style.decoration, style.decoration,
        )),
        _ => None,
    }
}

/// Keyframes are always emitted; a section only animates when its resolved
/// `animation` names one of them. The hover rule and pointer cursor exist
/// only when the descriptor asks for a hover transform.
fn stylesheet(style: &ResolvedStyle) -> String {
    let mut css = String::from(
        "@keyframes fadeIn{from{opacity:0}to{opacity:1}}\
         @keyframes slideUp{from{opacity:0;transform:translateY(20px)}to{opacity:1;transform:translateY(0)}}\
         @keyframes slideLeft{from{opacity:0;transform:translateX(20px)}to{opacity:1;transform:translateX(0)}}\
         @keyframes glow{0%,100%{filter:brightness(1)}50%{filter:brightness(1.2)}}\
         @keyframes pulse{0%,100%{opacity:1}50%{opacity:0.7}}",
    );
    if style.hover_transform != "none" {
        css.push_str(&format!(
            ".apf-card:hover{{transform:{};cursor:pointer}}",
            style.hover_transform,
        ));
    }
    css
}

fn footer(data: &AntiPortfolio, style: &ResolvedStyle) -> String {
    let mut line = escape_html(&data.meta.name);
    if !data.meta.location.is_empty() {
        line.push_str(" | ");
        line.push_str(&escape_html(&data.meta.location));
    }
    format!(
        "<footer style=\"margin-top:{};padding-top:2rem;border-top:1px solid {};\
         text-align:center;color:{};font-size:0.85rem;opacity:0.7\">{line}</footer>",
        style.section_spacing, style.border, style.secondary,
    )
}

/// Escape payload text for inclusion in HTML element or attribute position.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
