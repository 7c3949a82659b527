use crate::apf::StyleDna;

/// A fully resolved visual style, one value per field.
///
/// Resolution is per field, never whole-object: a descriptor missing an
/// entire group still resolves every field in that group through its chain,
/// ending at a hard floor. No field here is ever empty.
#[derive(Debug, Clone)]
pub struct ResolvedStyle {
    pub background: String,
    pub surface: String,
    pub text: String,
    pub accent: String,
    pub secondary: String,
    pub border: String,
    /// Header decoration color: explicit value, else accent.
    pub decoration: String,

    pub heading_font: String,
    pub body_font: String,
    pub heading_size: String,
    pub body_size: String,
    pub heading_weight: String,
    pub body_weight: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub text_transform: String,

    pub max_width: String,
    pub content_align: String,
    pub section_spacing: String,
    pub inner_padding: String,

    pub radius: String,
    pub border_width: String,
    pub border_style: String,

    pub shadow: String,
    pub hover_transform: String,
    pub transition: String,
    pub background_pattern: String,
    pub animation: String,

    pub header_style: HeaderVariant,
    pub icon_position: IconPosition,

    pub hero_layout: String,
    pub hero_name_size: String,
    pub show_avatar: bool,
    pub show_location: bool,
    pub decorative_element: String,

    pub card_padding: String,
    pub card_gap: String,
    pub columns: String,
}

/// Closed set of header treatments. Unknown descriptor tokens collapse to
/// `Minimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
    Underline,
    Boxed,
    Pill,
    Gradient,
    Bracket,
    Minimal,
}

impl HeaderVariant {
    fn parse(token: Option<&str>) -> Self {
        match token {
            Some("underline") => Self::Underline,
            Some("boxed") => Self::Boxed,
            Some("pill") => Self::Pill,
            Some("gradient") => Self::Gradient,
            Some("bracket") => Self::Bracket,
            _ => Self::Minimal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPosition {
    Before,
    After,
    None,
}

impl IconPosition {
    fn parse(token: Option<&str>) -> Self {
        match token {
            Some("after") => Self::After,
            Some("none") => Self::None,
            _ => Self::Before,
        }
    }
}

fn pick(value: Option<&Option<String>>, floor: &str) -> String {
    value
        .and_then(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(floor)
        .to_string()
}

/// Resolve every field of the descriptor through its fallback chain.
pub fn resolve(dna: &StyleDna) -> ResolvedStyle {
    let palette = dna.palette.as_ref();
    let typography = dna.typography.as_ref();
    let layout = dna.layout.as_ref();
    let borders = dna.borders.as_ref();
    let effects = dna.effects.as_ref();
    let headers = dna.headers.as_ref();
    let hero = dna.hero.as_ref();
    let cards = dna.cards.as_ref();

    let background = pick(palette.map(|p| &p.background), "#fff");
    let text = pick(palette.map(|p| &p.text), "#000");
    let surface = pick(palette.map(|p| &p.surface), &background);
    let accent = pick(palette.map(|p| &p.accent), &text);
    let secondary = pick(palette.map(|p| &p.secondary), &text);
    let border = pick(palette.map(|p| &p.border), "transparent");
    let decoration = pick(headers.map(|h| &h.decoration_color), &accent);

    let heading_size = pick(typography.map(|t| &t.heading_size), "2rem");
    let hero_name_size = pick(hero.map(|h| &h.name_size), &heading_size);

    ResolvedStyle {
        background,
        surface,
        text,
        accent,
        secondary,
        border,
        decoration,

        heading_font: pick(typography.map(|t| &t.heading_font), "system-ui"),
        body_font: pick(typography.map(|t| &t.body_font), "system-ui"),
        heading_size,
        body_size: pick(typography.map(|t| &t.body_size), "1rem"),
        heading_weight: pick(typography.map(|t| &t.heading_weight), "700"),
        body_weight: pick(typography.map(|t| &t.body_weight), "400"),
        line_height: pick(typography.map(|t| &t.line_height), "1.6"),
        letter_spacing: pick(typography.map(|t| &t.letter_spacing), "0"),
        text_transform: pick(typography.map(|t| &t.text_transform), "none"),

        max_width: pick(layout.map(|l| &l.max_width), "100%"),
        content_align: pick(layout.map(|l| &l.content_align), "left"),
        section_spacing: pick(layout.map(|l| &l.section_spacing), "4rem"),
        inner_padding: pick(layout.map(|l| &l.inner_padding), "2rem"),

        radius: pick(borders.map(|b| &b.radius), "0"),
        border_width: pick(borders.map(|b| &b.width), "0"),
        border_style: pick(borders.map(|b| &b.style), "none"),

        shadow: pick(effects.map(|e| &e.shadow), "none"),
        hover_transform: pick(effects.map(|e| &e.hover_transform), "none"),
        transition: pick(effects.map(|e| &e.transition), "none"),
        background_pattern: pick(effects.map(|e| &e.background_pattern), "none"),
        animation: pick(effects.map(|e| &e.animation), "none"),

        header_style: HeaderVariant::parse(headers.and_then(|h| h.style.as_deref())),
        icon_position: IconPosition::parse(headers.and_then(|h| h.icon_position.as_deref())),

        hero_layout: pick(hero.map(|h| &h.layout), "left-aligned"),
        hero_name_size,
        show_avatar: hero.and_then(|h| h.show_avatar).unwrap_or(false),
        show_location: hero.and_then(|h| h.show_location).unwrap_or(false),
        decorative_element: pick(hero.map(|h| &h.decorative_element), "none"),

        card_padding: pick(cards.map(|c| &c.padding), "1.5rem"),
        card_gap: pick(cards.map(|c| &c.gap), "1rem"),
        columns: pick(cards.map(|c| &c.columns), "1"),
    }
}
