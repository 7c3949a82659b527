use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http_client::build_provider_client;
use super::scrub::api_error;
use super::traits::Provider;
use super::types::{ChatParams, WireMessage};

const OPENROUTER_CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
const OPENROUTER_MISSING_API_KEY_MESSAGE: &str =
    "OpenRouter API key not set. Pass one to the config or set OPENROUTER_API_KEY.";
const OPENROUTER_EXTRA_HEADERS: [(&str, &str); 2] = [
    ("HTTP-Referer", "https://github.com/antifolio/antifolio"),
    ("X-Title", "antifolio"),
];

pub struct OpenRouterProvider {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    chat_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [WireMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenRouterProvider {
    /// Credential resolution order: explicit key, then env var.
    pub fn new(api_key: Option<&str>) -> Self {
        let resolved = api_key
            .map(str::to_string)
            .or_else(|| std::env::var(OPENROUTER_API_KEY_ENV).ok());
        Self::with_chat_url(resolved.as_deref(), OPENROUTER_CHAT_COMPLETIONS_URL)
    }

    /// Point the provider at an alternate endpoint. Tests use this with a
    /// local mock server.
    pub fn with_chat_url(api_key: Option<&str>, chat_url: &str) -> Self {
        Self {
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            chat_url: chat_url.to_string(),
            client: build_provider_client(),
        }
    }

    fn extract_text(chat_response: ChatResponse) -> anyhow::Result<String> {
        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("No response from OpenRouter"))
    }

    async fn call_api(
        &self,
        messages: &[WireMessage],
        params: &ChatParams,
    ) -> anyhow::Result<ChatResponse> {
        let Some(auth_header) = self.cached_auth_header.as_ref() else {
            anyhow::bail!(OPENROUTER_MISSING_API_KEY_MESSAGE);
        };

        let request = ChatRequest {
            model: &params.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let mut builder = self
            .client
            .post(&self.chat_url)
            .header("Authorization", auth_header)
            .json(&request);
        for (name, value) in OPENROUTER_EXTRA_HEADERS {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .context("OpenRouter chat completions request failed")?;

        if !response.status().is_success() {
            return Err(api_error("OpenRouter", response).await);
        }

        response
            .json()
            .await
            .context("OpenRouter chat completions JSON decode failed")
    }
}

impl Provider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn has_credentials(&self) -> bool {
        self.cached_auth_header.is_some()
    }

    fn chat<'a>(
        &'a self,
        messages: &'a [WireMessage],
        params: &'a ChatParams,
    ) -> std::pin::Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let chat_response = self.call_api(messages, params).await?;
            Self::extract_text(chat_response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params() -> ChatParams {
        ChatParams::new("google/gemini-2.5-flash-lite", 0.85, 8192)
    }

    #[tokio::test]
    async fn chat_fails_without_key() {
        let provider = OpenRouterProvider::with_chat_url(None, "http://127.0.0.1:9/never");
        let result = provider.chat(&[WireMessage::user("hello")], &params()).await;
        assert!(result.unwrap_err().to_string().contains("API key not set"));
    }

    #[tokio::test]
    async fn chat_extracts_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-or-test"))
            .and(header("X-Title", "antifolio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "first"}},
                            {"message": {"role": "assistant", "content": "second"}}]
            })))
            .mount(&server)
            .await;

        let url = format!("{}/api/v1/chat/completions", server.uri());
        let provider = OpenRouterProvider::with_chat_url(Some("sk-or-test"), &url);
        let text = provider
            .chat(&[WireMessage::user("hello")], &params())
            .await
            .unwrap();
        assert_eq!(text, "first");
    }

    #[tokio::test]
    async fn error_status_surfaces_sanitized_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let provider = OpenRouterProvider::with_chat_url(Some("sk-or-test"), &server.uri());
        let err = provider
            .chat(&[WireMessage::user("hello")], &params())
            .await
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("OpenRouter API error"));
        assert!(text.contains("rate limited"));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let provider = OpenRouterProvider::with_chat_url(Some("sk-or-test"), &server.uri());
        let err = provider
            .chat(&[WireMessage::user("hello")], &params())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No response from OpenRouter"));
    }

    #[test]
    fn request_serializes_sampling_params() {
        let messages = [WireMessage::system("sys"), WireMessage::user("hi")];
        let p = params();
        let request = ChatRequest {
            model: &p.model,
            messages: &messages,
            temperature: p.temperature,
            max_tokens: p.max_tokens,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("google/gemini-2.5-flash-lite"));
        assert!(json.contains(r#""max_tokens":8192"#));
        assert!(json.contains(r#""role":"system""#));
    }
}
