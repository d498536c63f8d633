use async_trait::async_trait;
use hanming_core::{CompletionResult, FailureKind};
use std::time::Duration;

/// A text-completion endpoint that turns a prompt into a JSON-bearing response.
///
/// Implementations never return errors: transport and decoding problems are
/// reported as [`CompletionResult::Failure`] values.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit a prompt using the provider's configured timeout
    async fn complete(&self, prompt: &str) -> CompletionResult {
        self.complete_with_timeout(prompt, None).await
    }

    /// Submit a prompt, overriding the timeout for this call only
    async fn complete_with_timeout(
        &self,
        prompt: &str,
        timeout: Option<Duration>,
    ) -> CompletionResult;

    /// Get the name of this provider
    fn provider_name(&self) -> &str;

    /// The single URL all prompts are sent to
    fn endpoint(&self) -> &str;
}

/// Provider used when completions are disabled; every request falls back.
#[derive(Debug, Default, Clone)]
pub struct OfflineProvider;

#[async_trait]
impl CompletionProvider for OfflineProvider {
    async fn complete_with_timeout(
        &self,
        _prompt: &str,
        _timeout: Option<Duration>,
    ) -> CompletionResult {
        CompletionResult::failure(
            FailureKind::NetworkError,
            "completion endpoint disabled in configuration",
        )
    }

    fn provider_name(&self) -> &str {
        "offline"
    }

    fn endpoint(&self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_provider_always_fails_with_network_error() {
        let provider = OfflineProvider;
        match provider.complete("anything").await {
            CompletionResult::Failure { kind, .. } => assert_eq!(kind, FailureKind::NetworkError),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
