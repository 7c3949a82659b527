use std::sync::Arc;

use crate::llm::{OpenRouterProvider, Provider};

/// Default generation backbone. Both interview and generation calls ride the
/// same model at different sampling parameters.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-lite";

/// Runtime settings for the generator. There is no configuration file; the
/// embedding application constructs one of these directly.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// OpenRouter API key. `None` falls back to `OPENROUTER_API_KEY`.
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Build the provider this config describes.
    pub fn provider(&self) -> Arc<dyn Provider> {
        Arc::new(OpenRouterProvider::new(self.api_key.as_deref()))
    }
}
