use std::future::Future;
use std::pin::Pin;

use super::types::{ChatParams, WireMessage};

/// Boundary between the orchestrators and a concrete LLM backend.
///
/// Object-safe by construction: orchestrators hold `Arc<dyn Provider>` so
/// tests can swap in scripted mocks.
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "openrouter").
    fn name(&self) -> &str;

    /// Whether an API credential is configured. Orchestrators check this
    /// before issuing a call so a missing key fails before any network I/O.
    fn has_credentials(&self) -> bool;

    /// Single chat-completions round trip returning the first choice's text.
    fn chat<'a>(
        &'a self,
        messages: &'a [WireMessage],
        params: &'a ChatParams,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}
