use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    HarmBlockThreshold, HarmCategory, InlineData, Part, SafetySetting,
};
use crate::ai::PlantIdentifier;
use crate::models::{ImageInput, PlantIdentification};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub const TEMPERATURE: f32 = 0.2;
pub const TOP_P: f32 = 0.8;
pub const TOP_K: u32 = 40;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiPlantClient {
    http: GeminiHttpClient,
}

impl GeminiPlantClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, DEFAULT_TIMEOUT, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    /// Builds the single-message request carrying the prompt and the image.
    pub fn build_request(image: &ImageInput) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::Text {
                        text: prompts::IDENTIFY_PLANT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.to_base64(),
                        },
                    },
                ],
            }],
            safety_settings: vec![
                SafetySetting {
                    category: HarmCategory::HarmCategoryHarassment,
                    threshold: HarmBlockThreshold::BlockMediumAndAbove,
                },
                SafetySetting {
                    category: HarmCategory::HarmCategoryHateSpeech,
                    threshold: HarmBlockThreshold::BlockMediumAndAbove,
                },
            ],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                response_mime_type: Some("application/json".to_string()),
            },
        }
    }
}

/// Turns the model's raw reply into a checked identification.
///
/// Syntax errors and shape errors are reported separately: text that is not
/// JSON at all is a [`Error::Parse`], JSON that lacks fields or carries empty
/// ones is an [`Error::IncompleteResult`].
pub fn parse_identification(text: &str) -> Result<PlantIdentification> {
    let value: serde_json::Value = serde_json::from_str(text.trim()).map_err(|e| {
        tracing::error!(
            raw_response = %text,
            "Failed to parse JSON response from Gemini: {}",
            e
        );
        Error::Parse
    })?;

    let plant: PlantIdentification = serde_json::from_value(value).map_err(|e| {
        tracing::error!(
            raw_response = %text,
            "Gemini response does not match the identification shape: {}",
            e
        );
        Error::IncompleteResult(e.to_string())
    })?;

    plant.validate()?;
    Ok(plant)
}

#[async_trait]
impl PlantIdentifier for GeminiPlantClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn identify(&self, image: &ImageInput) -> Result<PlantIdentification> {
        tracing::debug!(
            "Identifying plant in {} image ({} bytes) via {}",
            image.mime_type,
            image.bytes.len(),
            self.model()
        );

        let request = Self::build_request(image);
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let text = response.first_text().ok_or_else(|| {
            let reason = response
                .block_reason()
                .unwrap_or_else(|| "no candidates".to_string());
            tracing::error!("Gemini returned no text ({})", reason);
            Error::AiProvider(format!("No text in Gemini response ({})", reason))
        })?;

        let plant = parse_identification(&text)?;
        tracing::info!(
            "Identified {} ({})",
            plant.name,
            plant.scientific_name
        );
        Ok(plant)
    }
}
