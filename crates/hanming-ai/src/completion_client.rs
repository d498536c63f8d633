use crate::completion_provider::CompletionProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use hanming_core::{CompletionConfig, CompletionResult, FailureKind, MAX_COMPLETION_RETRIES};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP completion client
#[derive(Debug, Clone)]
pub struct HttpCompletionConfig {
    /// Full URL of the completion endpoint
    pub endpoint_url: String,
    /// Default per-call timeout
    pub timeout: Duration,
    /// Retries on network failure, clamped to [`MAX_COMPLETION_RETRIES`]
    pub max_retries: u32,
    /// Delay before a retry
    pub retry_backoff: Duration,
}

impl Default for HttpCompletionConfig {
    fn default() -> Self {
        Self::from(&CompletionConfig::default())
    }
}

impl From<&CompletionConfig> for HttpCompletionConfig {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            endpoint_url: config.endpoint_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

/// Client for `POST /api/ai_completion` with body `{"prompt": ...}`
pub struct HttpCompletionClient {
    config: HttpCompletionConfig,
    client: Client,
}

impl HttpCompletionClient {
    pub fn new(config: HttpCompletionConfig) -> Result<Self> {
        // Timeouts are applied per call so callers can override them.
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpCompletionConfig {
        &self.config
    }

    /// Send a request, retrying network failures at most once
    async fn send_request(&self, prompt: &str, timeout: Duration) -> CompletionResult {
        let max_retries = self.config.max_retries.min(MAX_COMPLETION_RETRIES);
        let mut last_failure = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                tokio::time::sleep(self.config.retry_backoff).await;
            }

            match self.try_request(prompt, timeout).await {
                failure @ CompletionResult::Failure {
                    kind: FailureKind::NetworkError,
                    ..
                } => {
                    if attempt < max_retries {
                        warn!(
                            "Completion request failed (attempt {}/{}), retrying...",
                            attempt + 1,
                            max_retries + 1
                        );
                    }
                    last_failure = Some(failure);
                }
                other => return other,
            }
        }

        last_failure.unwrap_or_else(|| {
            CompletionResult::failure(FailureKind::NetworkError, "All retry attempts failed")
        })
    }

    /// Try a single request within the timeout
    async fn try_request(&self, prompt: &str, timeout: Duration) -> CompletionResult {
        let body = match tokio::time::timeout(timeout, self.fetch_body(prompt)).await {
            Ok(Ok(body)) => body,
            Ok(Err(failure)) => return failure,
            Err(_) => {
                return CompletionResult::failure(
                    FailureKind::NetworkError,
                    format!(
                        "Completion request to {} timed out after {}ms",
                        self.config.endpoint_url,
                        timeout.as_millis()
                    ),
                )
            }
        };

        decode_body(&body)
    }

    async fn fetch_body(&self, prompt: &str) -> std::result::Result<String, CompletionResult> {
        let request = CompletionRequest { prompt };

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                CompletionResult::failure(
                    FailureKind::NetworkError,
                    format!(
                        "Failed to send request to {}: {}",
                        self.config.endpoint_url, e
                    ),
                )
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(CompletionResult::failure(
                FailureKind::NetworkError,
                format!("Completion endpoint error ({}): {}", status, error_text),
            ));
        }

        response.text().await.map_err(|e| {
            CompletionResult::failure(
                FailureKind::NetworkError,
                format!("Failed to read completion response body: {}", e),
            )
        })
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionClient {
    async fn complete_with_timeout(
        &self,
        prompt: &str,
        timeout: Option<Duration>,
    ) -> CompletionResult {
        let timeout = timeout.unwrap_or(self.config.timeout);
        debug!(
            endpoint = %self.config.endpoint_url,
            prompt_chars = prompt.chars().count(),
            "Submitting completion request"
        );
        self.send_request(prompt, timeout).await
    }

    fn provider_name(&self) -> &str {
        "http"
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint_url
    }
}

/// Decode a response body into JSON. Fenced or prose-wrapped bodies are
/// reduced to the JSON they carry first.
pub fn decode_body(body: &str) -> CompletionResult {
    let json_text = extract_json(body.trim());

    match serde_json::from_str::<Value>(json_text) {
        Ok(payload) => CompletionResult::success(payload),
        Err(e) => CompletionResult::failure(
            FailureKind::ParseError,
            format!("Failed to parse completion body as JSON: {}", e),
        ),
    }
}

fn extract_json(text: &str) -> &str {
    if text.starts_with('{') || text.starts_with('[') {
        return text;
    }

    if let Some(open) = text.find("```") {
        let inner = text[open + 3..].trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        let inner = match inner.rfind("```") {
            Some(close) => &inner[..close],
            None => inner,
        };
        return inner.trim();
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
}
