use std::time::Duration;

use reqwest::Client;

/// Generation calls own their deadlines; the client timeout is a backstop
/// slightly above the longest orchestrator deadline.
const REQUEST_TIMEOUT_SECS: u64 = 100;

pub fn build_provider_client() -> Client {
    build_provider_client_with_timeout(REQUEST_TIMEOUT_SECS)
}

pub fn build_provider_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
