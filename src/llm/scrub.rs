const MAX_API_ERROR_CHARS: usize = 200;

/// Truncate a provider error body to a loggable length.
///
/// Bodies can be full HTML error pages; only the head is useful in logs.
pub fn sanitize_api_error(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() <= MAX_API_ERROR_CHARS {
        return trimmed.to_string();
    }

    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

/// Build a provider error from a failed HTTP response, body sanitized.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    let sanitized = sanitize_api_error(&body);
    anyhow::anyhow!("{provider} API error ({status}): {sanitized}")
}
