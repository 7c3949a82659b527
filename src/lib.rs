#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

//! antifolio: an LLM-driven anti-portfolio generator.
//!
//! The pipeline runs in three stages. An adaptive interview collects the
//! material a resume leaves out, a generation run turns transcript plus raw
//! materials into a structured payload with a style descriptor, and the
//! renderer turns that payload into HTML. Every stage is independently
//! testable against a scripted provider.

pub mod apf;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod interview;
pub mod llm;
pub mod recovery;
pub mod render;
pub mod session;

pub use apf::{AntiPortfolio, StyleDna, Transcript, UserMaterials};
pub use config::{GeneratorConfig, DEFAULT_MODEL};
pub use error::{AntifolioError, GenerationError, RenderError, Result, SessionError};
pub use generate::{GenerationOutcome, Orchestrator};
pub use interview::Interviewer;
pub use render::{host_embed, render, RenderedPage};
pub use session::{Phase, Session};
