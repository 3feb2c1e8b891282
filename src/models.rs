//! Data models and structures
//!
//! Defines the identification result returned to callers and the image
//! payload handed to the identification client.

use crate::{Error, Result};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareInstructions {
    pub water: String,
    pub sunlight: String,
    pub temperature: String,
}

/// Structured identification of a single plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantIdentification {
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    pub care_instructions: CareInstructions,
    pub native_region: String,
}

impl PlantIdentification {
    /// Checks that every field carries content.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("scientificName", &self.scientific_name),
            ("description", &self.description),
            ("careInstructions.water", &self.care_instructions.water),
            ("careInstructions.sunlight", &self.care_instructions.sunlight),
            (
                "careInstructions.temperature",
                &self.care_instructions.temperature,
            ),
            ("nativeRegion", &self.native_region),
        ];

        let empty: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(Error::IncompleteResult(format!(
                "empty fields: {}",
                empty.join(", ")
            )))
        }
    }
}

/// Canned identification served when no provider credential is configured.
pub fn mock_identification() -> PlantIdentification {
    PlantIdentification {
        name: "Monstera Deliciosa".to_string(),
        scientific_name: "Monstera deliciosa".to_string(),
        description: "Monstera deliciosa is a species of flowering plant native to tropical \
                      forests of southern Mexico, south to Panama. It has large, glossy, \
                      heart-shaped leaves with distinctive holes or cuts."
            .to_string(),
        care_instructions: CareInstructions {
            water: "Allow soil to dry out between waterings. Water thoroughly when the top \
                    2-3 inches of soil feel dry."
                .to_string(),
            sunlight: "Bright, indirect light. Avoid direct sunlight which can burn the leaves."
                .to_string(),
            temperature: "65-85°F (18-29°C). Keep away from cold drafts and sudden \
                          temperature changes."
                .to_string(),
        },
        native_region: "Southern Mexico to Panama".to_string(),
    }
}

/// An uploaded photo, alive for the duration of one request.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    /// Wraps uploaded bytes, sniffing the MIME type from their magic number.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime_type = crate::ai::mime::detect_image_mime(&bytes).to_string();
        Self { bytes, mime_type }
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Envelope returned by `POST /api/identify` on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyResponse {
    pub plant: PlantIdentification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identification_uses_camel_case_keys() {
        let json = serde_json::to_value(mock_identification()).unwrap();
        assert!(json.get("scientificName").is_some());
        assert!(json.get("nativeRegion").is_some());
        assert!(json["careInstructions"].get("sunlight").is_some());
        assert!(json.get("scientific_name").is_none());
    }

    #[test]
    fn test_mock_identification_is_complete() {
        mock_identification().validate().unwrap();
    }

    #[test]
    fn test_validate_reports_empty_fields() {
        let mut plant = mock_identification();
        plant.name = String::new();
        plant.care_instructions.water = "  ".to_string();

        let err = plant.validate().unwrap_err();
        match err {
            Error::IncompleteResult(msg) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("careInstructions.water"));
                assert!(!msg.contains("nativeRegion"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_image_input_base64() {
        let image = ImageInput::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.to_base64(), "/9j/4A==");
    }
}
