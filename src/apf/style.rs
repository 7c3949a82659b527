use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Closed set of renderable section kinds.
///
/// `section_order` is the only place these appear on the wire; unknown tags
/// fail deserialization of the style descriptor, which the recovery pipeline
/// surfaces as a parse error rather than guessing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SectionKind {
    Hero,
    Edge,
    Methodology,
    Failures,
    Projects,
    Patterns,
    Proof,
    Loves,
    Hates,
    NonGoals,
}

/// Style DNA: the generator controls every visual aspect of the output page.
///
/// Every nested group and every field inside a group is optional; the
/// renderer resolves each field independently through its fallback chain, so
/// a partially specified descriptor degrades field-by-field, never
/// whole-object. The descriptor carries no behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleDna {
    #[serde(default)]
    pub theme_name: Option<String>,

    /// Render order. Duplicates are rendered again, in order.
    #[serde(default)]
    pub section_order: Vec<SectionKind>,

    #[serde(default)]
    pub layout: Option<LayoutStyle>,
    #[serde(default)]
    pub typography: Option<TypographyStyle>,
    #[serde(default)]
    pub palette: Option<PaletteStyle>,
    #[serde(default)]
    pub borders: Option<BorderStyle>,
    #[serde(default)]
    pub effects: Option<EffectStyle>,
    #[serde(default)]
    pub section_icons: Option<SectionIcons>,
    #[serde(default)]
    pub headers: Option<HeaderStyle>,
    #[serde(default)]
    pub hero: Option<HeroStyle>,
    #[serde(default)]
    pub cards: Option<CardStyle>,

    /// Numeric seed biasing regeneration; derived at validation time when the
    /// generator omits it.
    #[serde(default)]
    pub style_seed: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutStyle {
    #[serde(default)]
    pub max_width: Option<String>,
    #[serde(default)]
    pub content_align: Option<String>,
    #[serde(default)]
    pub section_spacing: Option<String>,
    #[serde(default)]
    pub inner_padding: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypographyStyle {
    #[serde(default)]
    pub heading_font: Option<String>,
    #[serde(default)]
    pub body_font: Option<String>,
    #[serde(default)]
    pub heading_size: Option<String>,
    #[serde(default)]
    pub body_size: Option<String>,
    #[serde(default)]
    pub heading_weight: Option<String>,
    #[serde(default)]
    pub body_weight: Option<String>,
    #[serde(default)]
    pub line_height: Option<String>,
    #[serde(default)]
    pub letter_spacing: Option<String>,
    #[serde(default)]
    pub text_transform: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteStyle {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorderStyle {
    #[serde(default)]
    pub radius: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectStyle {
    #[serde(default)]
    pub shadow: Option<String>,
    #[serde(default)]
    pub hover_transform: Option<String>,
    #[serde(default)]
    pub transition: Option<String>,
    #[serde(default)]
    pub background_pattern: Option<String>,
    #[serde(default)]
    pub animation: Option<String>,
}

/// ASCII/Unicode glyphs prefixing section headers, one per decorated kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionIcons {
    #[serde(default)]
    pub edge: Option<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub failures: Option<String>,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub patterns: Option<String>,
    #[serde(default)]
    pub proof: Option<String>,
}

impl SectionIcons {
    pub fn for_kind(&self, kind: SectionKind) -> Option<&str> {
        match kind {
            SectionKind::Edge => self.edge.as_deref(),
            SectionKind::Methodology => self.methodology.as_deref(),
            SectionKind::Failures => self.failures.as_deref(),
            SectionKind::Projects => self.projects.as_deref(),
            SectionKind::Patterns => self.patterns.as_deref(),
            SectionKind::Proof => self.proof.as_deref(),
            SectionKind::Hero
            | SectionKind::Loves
            | SectionKind::Hates
            | SectionKind::NonGoals => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderStyle {
    /// One of: underline | boxed | pill | gradient | bracket | minimal.
    /// Unknown tokens resolve to minimal.
    #[serde(default)]
    pub style: Option<String>,
    /// before | after | none.
    #[serde(default)]
    pub icon_position: Option<String>,
    #[serde(default)]
    pub decoration_color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroStyle {
    /// centered | left-aligned | right-aligned.
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub name_size: Option<String>,
    #[serde(default)]
    pub show_avatar: Option<bool>,
    #[serde(default)]
    pub show_location: Option<bool>,
    /// none | underline | background-shape.
    #[serde(default)]
    pub decorative_element: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardStyle {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub padding: Option<String>,
    #[serde(default)]
    pub gap: Option<String>,
    /// Fixed column count, or the literal `auto-fit` for responsive flow.
    #[serde(default)]
    pub columns: Option<String>,
}
