//! Interview orchestrator: six adaptive turns over the provider boundary.

pub mod markdown;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use crate::apf::{ChatRole, Transcript, UserMaterials};
use crate::error::{GenerationError, Result, SessionError};
use crate::llm::{ChatParams, Provider, WireMessage};

pub use markdown::strip_markdown;

/// Fixed interview length, opening question included.
pub const MAX_TURNS: usize = 6;

const FIRST_ATTEMPT_DEADLINE: Duration = Duration::from_secs(15);
const RETRY_DEADLINE: Duration = Duration::from_secs(10);
/// Model output shorter than this is treated as a failed call.
const MIN_QUESTION_CHARS: usize = 5;

const INTERVIEW_TEMPERATURE: f64 = 0.7;
const INTERVIEW_MAX_TOKENS: u32 = 4_096;

pub struct Interviewer {
    provider: Arc<dyn Provider>,
    params: ChatParams,
}

impl Interviewer {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            params: ChatParams::new(model, INTERVIEW_TEMPERATURE, INTERVIEW_MAX_TOKENS),
        }
    }

    /// Ask the opening question from the user's raw materials.
    pub async fn begin(&self, materials: &UserMaterials) -> Result<String> {
        let primary = vec![
            WireMessage::system(prompts::INTERVIEWER_SYSTEM_PROMPT),
            WireMessage::user(prompts::first_prompt(materials)),
        ];
        let fallback = vec![
            WireMessage::system(prompts::INTERVIEWER_SYSTEM_PROMPT),
            WireMessage::user(prompts::first_retry_prompt(materials)),
        ];
        Ok(self.ask(primary, fallback).await?)
    }

    /// Ask the next question. `turn_index` is the index of the question being
    /// produced (1..=5); the interview refuses to run past its fixed length.
    pub async fn advance(
        &self,
        transcript: &Transcript,
        answer: &str,
        turn_index: usize,
    ) -> Result<String> {
        if turn_index >= MAX_TURNS {
            return Err(SessionError::InterviewComplete(turn_index).into());
        }

        let mut primary = Vec::with_capacity(transcript.len() + 2);
        primary.push(WireMessage::system(prompts::INTERVIEWER_SYSTEM_PROMPT));
        for message in transcript.messages() {
            primary.push(match message.role {
                ChatRole::User => WireMessage::user(message.content.clone()),
                ChatRole::Model => WireMessage::assistant(message.content.clone()),
            });
        }
        primary.push(WireMessage::user(prompts::advance_context(
            answer, turn_index,
        )));

        let fallback = vec![
            WireMessage::system(prompts::INTERVIEWER_SYSTEM_PROMPT),
            WireMessage::user(prompts::advance_retry_prompt(transcript, answer)),
        ];
        Ok(self.ask(primary, fallback).await?)
    }

    /// Primary call on the 15 s deadline; one condensed retry on 10 s.
    async fn ask(
        &self,
        primary: Vec<WireMessage>,
        fallback: Vec<WireMessage>,
    ) -> std::result::Result<String, GenerationError> {
        if !self.provider.has_credentials() {
            return Err(GenerationError::MissingCredential {
                provider: self.provider.name().to_string(),
            });
        }

        match self.attempt(&primary, FIRST_ATTEMPT_DEADLINE).await {
            Ok(question) => Ok(question),
            Err(error) => {
                tracing::warn!(error = %error, "interview call failed, retrying condensed prompt");
                self.attempt(&fallback, RETRY_DEADLINE)
                    .await
                    .map_err(|retry_error| {
                        GenerationError::NetworkOrTimeout(retry_error.to_string())
                    })
            }
        }
    }

    async fn attempt(
        &self,
        messages: &[WireMessage],
        deadline: Duration,
    ) -> anyhow::Result<String> {
        let text = tokio::time::timeout(deadline, self.provider.chat(messages, &self.params))
            .await
            .map_err(|_| anyhow::anyhow!("interview call exceeded {}s", deadline.as_secs()))??;
        let question = strip_markdown(&text);
        if question.chars().count() < MIN_QUESTION_CHARS {
            anyhow::bail!("model returned an empty or too-short question");
        }
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apf::ChatMessage;
    use crate::error::AntifolioError;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider: each call pops the next canned result.
    struct MockProvider {
        responses: Vec<anyhow::Result<String>>,
        calls: AtomicUsize,
        credentials: bool,
    }

    impl MockProvider {
        fn scripted(responses: Vec<anyhow::Result<String>>) -> Self {
            Self {
                responses,
                calls: AtomicUsize::new(0),
                credentials: true,
            }
        }

        fn without_credentials() -> Self {
            Self {
                responses: Vec::new(),
                calls: AtomicUsize::new(0),
                credentials: false,
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
            self.credentials
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

    fn materials() -> UserMaterials {
        UserMaterials {
            raw_text: "I design storage engines and refuse to ship untested code.".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn begin_returns_stripped_question() {
        let provider = Arc::new(MockProvider::scripted(vec![Ok(
            "**What** is your _one_ rule?".into()
        )]));
        let interviewer = Interviewer::new(provider.clone(), "test-model");
        let question = interviewer.begin(&materials()).await.unwrap();
        assert_eq!(question, "What is your one rule?");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn begin_retries_once_then_succeeds() {
        let provider = Arc::new(MockProvider::scripted(vec![
            Err(anyhow::anyhow!("connection reset")),
            Ok("What trade-off hurt the most?".into()),
        ]));
        let interviewer = Interviewer::new(provider.clone(), "test-model");
        let question = interviewer.begin(&materials()).await.unwrap();
        assert_eq!(question, "What trade-off hurt the most?");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn two_failures_surface_network_error() {
        let provider = Arc::new(MockProvider::scripted(vec![
            Err(anyhow::anyhow!("first failure")),
            Err(anyhow::anyhow!("second failure")),
        ]));
        let interviewer = Interviewer::new(provider.clone(), "test-model");
        let error = interviewer.begin(&materials()).await.unwrap_err();
        assert!(matches!(
            error,
            AntifolioError::Generation(GenerationError::NetworkOrTimeout(_))
        ));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn too_short_output_counts_as_failure() {
        let provider = Arc::new(MockProvider::scripted(vec![
            Ok("ok".into()),
            Ok("A real follow-up question?".into()),
        ]));
        let interviewer = Interviewer::new(provider.clone(), "test-model");
        let question = interviewer.begin(&materials()).await.unwrap();
        assert_eq!(question, "A real follow-up question?");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_call() {
        let provider = Arc::new(MockProvider::without_credentials());
        let interviewer = Interviewer::new(provider.clone(), "test-model");
        let error = interviewer.begin(&materials()).await.unwrap_err();
        assert!(matches!(
            error,
            AntifolioError::Generation(GenerationError::MissingCredential { .. })
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn advance_reaches_the_sixth_question() {
        let provider = Arc::new(MockProvider::scripted(vec![Ok(
            "What would you tell someone starting out?".into(),
        )]));
        let interviewer = Interviewer::new(provider.clone(), "test-model");
        // Index 5 is the last valid question: the philosophy turn.
        let question = interviewer
            .advance(&Transcript::new(), "a long considered answer", MAX_TURNS - 1)
            .await
            .unwrap();
        assert_eq!(question, "What would you tell someone starting out?");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn advance_refuses_past_the_final_turn() {
        let provider = Arc::new(MockProvider::scripted(vec![]));
        let interviewer = Interviewer::new(provider.clone(), "test-model");
        let transcript = Transcript::new();
        let error = interviewer
            .advance(&transcript, "answer", MAX_TURNS)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            AntifolioError::Session(SessionError::InterviewComplete(_))
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn advance_threads_transcript_history() {
        let provider = Arc::new(MockProvider::scripted(vec![Ok(
            "Which failure taught you that rule?".into(),
        )]));
        let interviewer = Interviewer::new(provider.clone(), "test-model");
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::model("What makes you different?"));
        transcript.push(ChatMessage::user("I delete more code than I write."));
        let question = interviewer
            .advance(&transcript, "I delete more code than I write.", 1)
            .await
            .unwrap();
        assert_eq!(question, "Which failure taught you that rule?");
        assert_eq!(provider.call_count(), 1);
    }
}
