//! Session lifecycle for a single anti-portfolio.
//!
//! The session is a small state machine over the payload: materials come in,
//! a generation run produces the payload, and the rendered phase admits
//! in-place style tuning. Transitions are validated; an invalid one is
//! reported, never silently coerced.

use serde::{Deserialize, Serialize};

use crate::apf::{
    AntiPortfolio, PaletteStyle, StyleDna, Transcript, TypographyStyle, UserMaterials,
    MIN_MATERIAL_CHARS,
};
use crate::error::SessionError;
use crate::generate::{GenerationOutcome, GenerationTrace};

/// Where the session stands.
///
/// `Generating` is entered before the orchestrator runs and left by
/// [`Session::complete`] or [`Session::fail`]. The two rendered phases are
/// distinguished because only the fallback path reads the style descriptor:
/// tuning an opaque full-markup artifact drops it and re-renders generically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Empty,
    Generating,
    RenderedFullMarkup,
    RenderedFallback,
    Error,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Generating => "generating",
            Self::RenderedFullMarkup => "rendered_full_markup",
            Self::RenderedFallback => "rendered_fallback",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    materials: UserMaterials,
    transcript: Transcript,
    payload: Option<AntiPortfolio>,
    trace: Option<GenerationTrace>,
    variant: u32,
    last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn materials(&self) -> &UserMaterials {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut UserMaterials {
        &mut self.materials
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn payload(&self) -> Option<&AntiPortfolio> {
        self.payload.as_ref()
    }

    /// Diagnostics from the most recent generation run.
    pub fn trace(&self) -> Option<&GenerationTrace> {
        self.trace.as_ref()
    }

    /// Variant counter for the next generation run. Zero for the first run;
    /// each regeneration bumps it, which raises the content temperature and
    /// reshuffles the variation seed downstream.
    pub fn variant(&self) -> u32 {
        self.variant
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Enter the generating phase for a first run. Gated on the materials
    /// sufficiency floor so the orchestrator never sees an empty corpus.
    pub fn begin_generation(&mut self) -> Result<u32, SessionError> {
        match self.phase() {
            Phase::Empty | Phase::Error => {}
            from => {
                return Err(SessionError::InvalidTransition {
                    from: from.name(),
                    to: Phase::Generating.name(),
                })
            }
        }
        if !self.materials.has_enough_data() {
            return Err(SessionError::InsufficientMaterials {
                min_chars: MIN_MATERIAL_CHARS,
            });
        }
        self.phase = Phase::Generating;
        Ok(self.variant)
    }

    /// Enter the generating phase again from a rendered state, bumping the
    /// variant counter so the rerun diverges from what is on screen.
    pub fn begin_regeneration(&mut self) -> Result<u32, SessionError> {
        match self.phase() {
            Phase::RenderedFullMarkup | Phase::RenderedFallback => {}
            from => {
                return Err(SessionError::InvalidTransition {
                    from: from.name(),
                    to: Phase::Generating.name(),
                })
            }
        }
        self.variant += 1;
        self.phase = Phase::Generating;
        Ok(self.variant)
    }

    /// Land a finished generation run. The rendered phase follows from the
    /// payload itself: a full-markup artifact selects the isolated path.
    pub fn complete(&mut self, outcome: GenerationOutcome) -> Result<(), SessionError> {
        if self.phase() != Phase::Generating {
            return Err(SessionError::InvalidTransition {
                from: self.phase().name(),
                to: Phase::RenderedFallback.name(),
            });
        }
        let phase = if outcome.portfolio.generated_html.is_some() {
            Phase::RenderedFullMarkup
        } else {
            Phase::RenderedFallback
        };
        self.payload = Some(outcome.portfolio);
        self.trace = Some(outcome.trace);
        self.last_error = None;
        self.phase = phase;
        Ok(())
    }

    /// Record a failure. Reachable from any phase; a later
    /// [`Session::begin_generation`] retries from here. An existing payload
    /// survives so the user keeps their last good page.
    pub fn fail(&mut self, detail: impl Into<String>) {
        self.last_error = Some(detail.into());
        self.phase = Phase::Error;
    }

    /// Discard everything and return to the empty phase.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ─── Style tuning ────────────────────────────────────────────────────────
    //
    // Tuning edits the payload's style descriptor in place. Only the fallback
    // renderer reads the descriptor, so tuning from the full-markup phase
    // drops the opaque artifact and lands on the fallback path; there is no
    // way back into full markup short of regenerating.

    pub fn tune_accent(&mut self, color: impl Into<String>) -> Result<(), SessionError> {
        let dna = self.tunable_dna()?;
        dna.palette.get_or_insert_with(PaletteStyle::default).accent = Some(color.into());
        Ok(())
    }

    /// Set the background and auto-correct the text color for contrast, so a
    /// single slider cannot produce an unreadable page.
    pub fn tune_background(&mut self, color: impl Into<String>) -> Result<(), SessionError> {
        let color = color.into();
        let text = contrast_text_color(&color);
        let dna = self.tunable_dna()?;
        let palette = dna.palette.get_or_insert_with(PaletteStyle::default);
        palette.background = Some(color);
        palette.text = Some(text.to_owned());
        Ok(())
    }

    pub fn tune_text_color(&mut self, color: impl Into<String>) -> Result<(), SessionError> {
        let dna = self.tunable_dna()?;
        dna.palette.get_or_insert_with(PaletteStyle::default).text = Some(color.into());
        Ok(())
    }

    pub fn tune_heading_font(&mut self, font: impl Into<String>) -> Result<(), SessionError> {
        let dna = self.tunable_dna()?;
        dna.typography
            .get_or_insert_with(TypographyStyle::default)
            .heading_font = Some(font.into());
        Ok(())
    }

    pub fn tune_body_font(&mut self, font: impl Into<String>) -> Result<(), SessionError> {
        let dna = self.tunable_dna()?;
        dna.typography
            .get_or_insert_with(TypographyStyle::default)
            .body_font = Some(font.into());
        Ok(())
    }

    fn tunable_dna(&mut self) -> Result<&mut StyleDna, SessionError> {
        match self.phase() {
            Phase::RenderedFullMarkup | Phase::RenderedFallback => {}
            from => {
                return Err(SessionError::InvalidTransition {
                    from: from.name(),
                    to: Phase::RenderedFallback.name(),
                })
            }
        }
        let payload = self.payload.as_mut().ok_or(SessionError::NoContent)?;
        let dna = payload.style_dna.as_mut().ok_or(SessionError::NoContent)?;
        payload.generated_html = None;
        self.phase = Phase::RenderedFallback;
        Ok(dna)
    }
}

/// Perceived-luminance text pick: dark text on light backgrounds, light text
/// on dark ones. Unparsable colors get the dark-background treatment.
fn contrast_text_color(background: &str) -> &'static str {
    let hex = background.trim_start_matches('#');
    let channel = |range| {
        hex.get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .map(f64::from)
    };
    let (Some(r), Some(g), Some(b)) = (channel(0..2), channel(2..4), channel(4..6)) else {
        return "#f0f0f0";
    };
    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    if luminance > 0.5 {
        "#1a1a1a"
    } else {
        "#f0f0f0"
    }
}
