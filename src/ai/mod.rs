//! Plant identification through a vision-language model
//!
//! Exposes the [`PlantIdentifier`] seam consumed by the HTTP handler, the
//! Gemini-backed implementation, and the canned fallback used when no
//! credential is configured.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiPlantClient;
pub use mock::MockPlantIdentifier;

use crate::config::Config;
use crate::models::{ImageInput, PlantIdentification};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PlantIdentifier: Send + Sync {
    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &str;

    async fn identify(&self, image: &ImageInput) -> Result<PlantIdentification>;
}

/// Chooses the identifier for the whole process.
///
/// A configured credential always selects Gemini. Without one, the mock is
/// served when fallback is enabled and startup fails otherwise.
pub fn build_identifier(config: &Config) -> Result<Arc<dyn PlantIdentifier>> {
    match &config.gemini_api_key {
        Some(api_key) => {
            tracing::info!(
                "Identifier: Gemini (model: {}, timeout: {}s)",
                config.gemini_model,
                config.gemini_timeout_secs
            );
            Ok(Arc::new(
                GeminiPlantClient::new(api_key.clone(), config.gemini_model.clone())
                    .with_timeout(config.gemini_timeout())
                    .with_base_url(config.gemini_base_url.clone()),
            ))
        }
        None if config.mock_fallback => {
            tracing::warn!("GEMINI_API_KEY is not configured, serving mock identifications");
            Ok(Arc::new(MockPlantIdentifier::new()))
        }
        None => Err(Error::Config(
            "GEMINI_API_KEY is not configured and PLANT_ID_MOCK_FALLBACK is disabled".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_identifier_prefers_gemini_when_key_present() {
        let config = Config {
            gemini_api_key: Some("key".to_string()),
            mock_fallback: true,
            ..Config::default()
        };
        assert_eq!(build_identifier(&config).unwrap().name(), "gemini");
    }

    #[test]
    fn test_build_identifier_falls_back_to_mock() {
        let config = Config::default();
        assert_eq!(build_identifier(&config).unwrap().name(), "mock");
    }

    #[test]
    fn test_build_identifier_fails_without_key_when_fallback_disabled() {
        let config = Config {
            mock_fallback: false,
            ..Config::default()
        };
        let err = build_identifier(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
