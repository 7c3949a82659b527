//! APF (Anti-Portfolio Format) schema.
//!
//! Value objects only: the content payload produced by the external
//! generator, the style descriptor that drives the renderer, the user's raw
//! materials, and the interview transcript. No behavior beyond small
//! constructors and predicates lives here.

pub mod content;
pub mod materials;
pub mod style;
pub mod transcript;

pub use content::{
    AntiPortfolio, ApfMeta, ApfSignature, DecisionPattern, FailureEntry, LovesHates,
    MethodStackStep, Project, ProofEvidence, ProofItem, SectionLabels, Superpower, Verifiability,
};
pub use materials::{PersonalData, UserMaterials, MIN_MATERIAL_CHARS};
pub use style::{
    BorderStyle, CardStyle, EffectStyle, HeaderStyle, HeroStyle, LayoutStyle, PaletteStyle,
    SectionIcons, SectionKind, StyleDna, TypographyStyle,
};
pub use transcript::{ChatMessage, ChatRole, Transcript};
