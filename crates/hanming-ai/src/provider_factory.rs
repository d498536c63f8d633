use crate::completion_client::{HttpCompletionClient, HttpCompletionConfig};
use crate::completion_provider::{CompletionProvider, OfflineProvider};
use anyhow::{Context, Result};
use hanming_core::CompletionConfig;
use std::sync::Arc;
use tracing::info;

/// Factory for creating completion providers based on configuration
pub struct CompletionProviderFactory;

impl CompletionProviderFactory {
    /// Create a completion provider from configuration
    pub fn create_from_config(config: &CompletionConfig) -> Result<Arc<dyn CompletionProvider>> {
        if !config.enabled {
            info!("Completion endpoint disabled, analyses will use fallback defaults");
            return Ok(Arc::new(OfflineProvider));
        }

        let client = HttpCompletionClient::new(HttpCompletionConfig::from(config))
            .with_context(|| format!("Failed to create client for {}", config.endpoint_url))?;

        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_http_provider() {
        let provider = CompletionProviderFactory::create_from_config(&CompletionConfig::default())
            .unwrap();
        assert_eq!(provider.provider_name(), "http");
        assert_eq!(
            provider.endpoint(),
            "http://localhost:8080/api/ai_completion"
        );
    }

    #[test]
    fn test_disabled_config_yields_offline_provider() {
        let config = CompletionConfig {
            enabled: false,
            ..CompletionConfig::default()
        };
        let provider = CompletionProviderFactory::create_from_config(&config).unwrap();
        assert_eq!(provider.provider_name(), "offline");
    }
}
