//! Generation orchestrator: structured content first, full markup second.

pub mod prompts;
pub mod trace;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::apf::{AntiPortfolio, Transcript, UserMaterials};
use crate::error::GenerationError;
use crate::llm::{ChatParams, Provider, WireMessage};
use crate::recovery::{parse_or_repair, strip_code_fences};

pub use trace::{GenerationTrace, PhaseRecord, PhaseStatus};

const GENERATION_DEADLINE: Duration = Duration::from_secs(90);
const CONTENT_MAX_TOKENS: u32 = 8_192;
const MARKUP_MAX_TOKENS: u32 = 16_000;
const BASE_TEMPERATURE: f64 = 0.85;
const TEMPERATURE_STEP: f64 = 0.05;
const MARKUP_TEMPERATURE: f64 = 0.9;

/// Material budget for the structured-content call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Fast,
    Lite,
}

impl Tier {
    fn char_limit(self) -> usize {
        match self {
            Self::Fast => prompts::FAST_CHAR_LIMIT,
            Self::Lite => prompts::LITE_CHAR_LIMIT,
        }
    }

    fn phase(self) -> &'static str {
        match self {
            Self::Fast => "content_fast",
            Self::Lite => "content_lite",
        }
    }
}

/// A generation run's result plus its per-phase diagnostics.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub portfolio: AntiPortfolio,
    pub trace: GenerationTrace,
}

pub struct Orchestrator {
    provider: Arc<dyn Provider>,
    model: String,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Produce a complete payload: structured content (one lite retry), then
    /// the full-markup artifact. A markup failure never fails the run.
    pub async fn generate(
        &self,
        transcript: &Transcript,
        materials: &UserMaterials,
        variant: u32,
    ) -> Result<GenerationOutcome, GenerationError> {
        if !self.provider.has_credentials() {
            return Err(GenerationError::MissingCredential {
                provider: self.provider.name().to_string(),
            });
        }

        let mut trace = GenerationTrace::new();

        let mut portfolio = match self
            .content_call(Tier::Fast, transcript, materials, variant, &mut trace)
            .await
        {
            Ok(portfolio) => portfolio,
            // A payload without a style descriptor is a contract violation,
            // not a transport hiccup; retrying cannot fix it.
            Err(GenerationError::MissingStyle) => return Err(GenerationError::MissingStyle),
            Err(error) => {
                tracing::warn!(error = %error, "fast-tier generation failed, retrying at lite tier");
                self.content_call(Tier::Lite, transcript, materials, variant, &mut trace)
                    .await?
            }
        };

        match self.markup_call(&portfolio, variant, &mut trace).await {
            Ok(html) => portfolio.generated_html = Some(html),
            Err(error) => {
                tracing::warn!(error = %error, "full-markup generation failed, shipping fallback payload");
            }
        }

        Ok(GenerationOutcome { portfolio, trace })
    }

    async fn content_call(
        &self,
        tier: Tier,
        transcript: &Transcript,
        materials: &UserMaterials,
        variant: u32,
        trace: &mut GenerationTrace,
    ) -> Result<AntiPortfolio, GenerationError> {
        let seed = prompts::variation_seed();
        let materials_block = prompts::prepare_input(materials, tier.char_limit());
        let messages = vec![
            WireMessage::system(prompts::content_system_prompt(variant, &seed)),
            WireMessage::user(prompts::content_user_prompt(&materials_block, transcript)),
        ];
        let temperature = (BASE_TEMPERATURE + TEMPERATURE_STEP * f64::from(variant)).min(1.0);
        let params = ChatParams::new(&self.model, temperature, CONTENT_MAX_TOKENS);

        let started_at = Utc::now();
        let started = Instant::now();
        let text = match self.call_with_deadline(&messages, &params).await {
            Ok(text) => text,
            Err(error) => {
                let status = if error.is_timeout() {
                    PhaseStatus::Timeout
                } else {
                    PhaseStatus::Error
                };
                trace.record(
                    tier.phase(),
                    status,
                    started_at,
                    started.elapsed(),
                    Some(error.to_string()),
                );
                return Err(error);
            }
        };

        match parse_or_repair(&text, materials) {
            Ok(portfolio) => {
                trace.record(
                    tier.phase(),
                    PhaseStatus::Success,
                    started_at,
                    started.elapsed(),
                    None,
                );
                Ok(portfolio)
            }
            Err(error) => {
                trace.record(
                    tier.phase(),
                    PhaseStatus::Error,
                    started_at,
                    started.elapsed(),
                    Some(error.to_string()),
                );
                Err(error)
            }
        }
    }

    async fn markup_call(
        &self,
        portfolio: &AntiPortfolio,
        variant: u32,
        trace: &mut GenerationTrace,
    ) -> Result<String, GenerationError> {
        let seed = prompts::variation_seed();
        let messages = vec![
            WireMessage::system(prompts::MARKUP_SYSTEM_PROMPT),
            WireMessage::user(prompts::markup_user_prompt(portfolio, variant, &seed)),
        ];
        let params = ChatParams::new(&self.model, MARKUP_TEMPERATURE, MARKUP_MAX_TOKENS);

        let started_at = Utc::now();
        let started = Instant::now();
        let result = self.call_with_deadline(&messages, &params).await;

        let outcome = result.and_then(|text| {
            let html = strip_code_fences(text.trim()).trim().to_string();
            if html.contains("<!DOCTYPE") || html.contains("<html") {
                Ok(html)
            } else {
                Err(GenerationError::Parse(
                    "markup call did not produce an HTML document".to_string(),
                ))
            }
        });

        match &outcome {
            Ok(_) => trace.record(
                "markup",
                PhaseStatus::Success,
                started_at,
                started.elapsed(),
                None,
            ),
            Err(error) => {
                let status = if error.is_timeout() {
                    PhaseStatus::Timeout
                } else {
                    PhaseStatus::Error
                };
                trace.record(
                    "markup",
                    status,
                    started_at,
                    started.elapsed(),
                    Some(error.to_string()),
                );
            }
        }

        outcome
    }

    async fn call_with_deadline(
        &self,
        messages: &[WireMessage],
        params: &ChatParams,
    ) -> Result<String, GenerationError> {
        let text = tokio::time::timeout(GENERATION_DEADLINE, self.provider.chat(messages, params))
            .await
            .map_err(|_| {
                GenerationError::NetworkOrTimeout(format!(
                    "generation call exceeded {}s",
                    GENERATION_DEADLINE.as_secs()
                ))
            })?
            .map_err(|error| GenerationError::NetworkOrTimeout(error.to_string()))?;
        if text.trim().is_empty() {
            return Err(GenerationError::NetworkOrTimeout(
                "provider returned an empty response".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        responses: Vec<anyhow::Result<String>>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn scripted(responses: Vec<anyhow::Result<String>>) -> Self {
            Self {
                responses,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn has_credentials(&self) -> bool {
            true
        }

        fn chat<'a>(
            &'a self,
            _messages: &'a [WireMessage],
            _params: &'a ChatParams,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            let result = match self.responses.get(index) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(error)) => Err(anyhow::anyhow!("{error}")),
                None => Err(anyhow::anyhow!("mock exhausted")),
            };
            Box::pin(async move { result })
        }
    }

    const VALID_CONTENT: &str = r#"{"meta": {"name": "Ada"}, "anti_title": "The Breaker",
        "style_dna": {"theme_name": "Quiet Storm"}}"#;
    const VALID_HTML: &str = "<!DOCTYPE html><html><body>page</body></html>";

    fn orchestrator(provider: Arc<MockProvider>) -> Orchestrator {
        Orchestrator::new(provider, "test-model")
    }

    #[tokio::test]
    async fn happy_path_attaches_markup() {
        let provider = Arc::new(MockProvider::scripted(vec![
            Ok(VALID_CONTENT.into()),
            Ok(format!("```html\n{VALID_HTML}\n```")),
        ]));
        let outcome = orchestrator(provider.clone())
            .generate(&Transcript::new(), &UserMaterials::default(), 0)
            .await
            .unwrap();
        assert_eq!(outcome.portfolio.meta.name, "Ada");
        assert_eq!(outcome.portfolio.generated_html.as_deref(), Some(VALID_HTML));
        assert_eq!(provider.call_count(), 2);
        assert_eq!(outcome.trace.records().len(), 2);
    }

    #[tokio::test]
    async fn fast_failure_retries_lite_exactly_once() {
        let provider = Arc::new(MockProvider::scripted(vec![
            Err(anyhow::anyhow!("connection reset")),
            Ok(VALID_CONTENT.into()),
            Ok(VALID_HTML.into()),
        ]));
        let outcome = orchestrator(provider.clone())
            .generate(&Transcript::new(), &UserMaterials::default(), 0)
            .await
            .unwrap();
        assert_eq!(outcome.portfolio.meta.name, "Ada");
        assert_eq!(provider.call_count(), 3);
        let phases: Vec<_> = outcome.trace.records().iter().map(|r| r.phase).collect();
        assert_eq!(phases, vec!["content_fast", "content_lite", "markup"]);
    }

    #[tokio::test]
    async fn two_content_failures_are_terminal() {
        let provider = Arc::new(MockProvider::scripted(vec![
            Err(anyhow::anyhow!("first")),
            Ok("not json at all".into()),
        ]));
        let error = orchestrator(provider.clone())
            .generate(&Transcript::new(), &UserMaterials::default(), 0)
            .await
            .unwrap_err();
        assert!(matches!(error, GenerationError::Parse(_)));
        // No markup call after a terminal content failure.
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn missing_style_is_never_retried() {
        let provider = Arc::new(MockProvider::scripted(vec![Ok(
            r#"{"anti_title": "No Style"}"#.into(),
        )]));
        let error = orchestrator(provider.clone())
            .generate(&Transcript::new(), &UserMaterials::default(), 0)
            .await
            .unwrap_err();
        assert!(matches!(error, GenerationError::MissingStyle));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn markup_failure_ships_fallback_payload() {
        let provider = Arc::new(MockProvider::scripted(vec![
            Ok(VALID_CONTENT.into()),
            Ok("sorry, I cannot produce HTML".into()),
        ]));
        let outcome = orchestrator(provider.clone())
            .generate(&Transcript::new(), &UserMaterials::default(), 0)
            .await
            .unwrap();
        assert!(outcome.portfolio.generated_html.is_none());
        assert_eq!(provider.call_count(), 2);
        assert_eq!(
            outcome.trace.records().last().map(|r| r.status),
            Some(PhaseStatus::Error)
        );
    }

    #[test]
    fn temperature_rises_with_variant_and_caps_at_one() {
        let temp = |variant: u32| (BASE_TEMPERATURE + TEMPERATURE_STEP * f64::from(variant)).min(1.0);
        assert!((temp(0) - 0.85).abs() < 1e-9);
        assert!((temp(1) - 0.90).abs() < 1e-9);
        assert!((temp(3) - 1.0).abs() < 1e-9);
        assert!((temp(10) - 1.0).abs() < 1e-9);
    }
}
