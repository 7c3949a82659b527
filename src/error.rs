use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `antifolio`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum AntifolioError {
    // ── Generation / Provider ──────────────────────────────────────────
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),

    // ── Rendering ──────────────────────────────────────────────────────
    #[error("render: {0}")]
    Render(#[from] RenderError),

    // ── Session / Wizard flow ──────────────────────────────────────────
    #[error("session: {0}")]
    Session(#[from] SessionError),

    // ── Generic fallthrough (wraps anyhow for interop) ─────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Generation errors ───────────────────────────────────────────────────────

/// Failures of the outbound generation calls and the JSON recovery pipeline.
///
/// `NetworkOrTimeout` and `Parse` during structured-content generation are
/// retried exactly once at the lite tier; `MissingStyle` and
/// `MissingCredential` are terminal and never silently retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider call failed or deadline exceeded: {0}")]
    NetworkOrTimeout(String),

    #[error("response could not be parsed or repaired into JSON: {0}")]
    Parse(String),

    #[error("generated content carries no style descriptor")]
    MissingStyle,

    #[error("no API credential configured for provider {provider}")]
    MissingCredential { provider: String },
}

impl GenerationError {
    /// Distinguishes a missed deadline from other transport failures, for
    /// trace classification. Deadline errors carry an "exceeded" detail.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::NetworkOrTimeout(detail) if detail.contains("exceeded"))
    }
}

// ─── Render errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("content has no style descriptor and no markup artifact")]
    MissingStyle,
}

// ─── Session errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("materials insufficient: no field exceeds the {min_chars}-character floor")]
    InsufficientMaterials { min_chars: usize },

    #[error("invalid phase transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("interview already complete after {0} turns")]
    InterviewComplete(usize),

    #[error("no generated content in session")]
    NoContent,
}

// ─── Convenience re-exports ──────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, AntifolioError>;
