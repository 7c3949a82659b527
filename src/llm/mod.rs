//! Provider boundary for outbound LLM calls.

pub mod http_client;
pub mod openrouter;
pub mod scrub;
pub mod traits;
pub mod types;

pub use http_client::{build_provider_client, build_provider_client_with_timeout};
pub use openrouter::{OPENROUTER_API_KEY_ENV, OpenRouterProvider};
pub use scrub::sanitize_api_error;
pub use traits::Provider;
pub use types::{ChatParams, WireMessage, WireRole};
