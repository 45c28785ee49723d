//! Client for the AI content-generation endpoints.
//!
//! One POST per trigger, no retry: a failed generation surfaces a toast
//! and waits for the user to try again. Image generation is a soft
//! concern; text without an image is still a success.

use crate::sanitize::TextCleaner;
use crate::types::{BrandVoice, ContentConfig, GeneratedContent};
use wam_core::{parse_rows, BackendClient, WamError, WamResult};

const GENERATE_PATH: &str = "api/v1/whatsapp/content/generate";
const GENERATE_WITH_IMAGE_PATH: &str = "api/v1/whatsapp/content/generate-with-image";
const BRAND_VOICES_PATH: &str = "api/v1/whatsapp/brand-voices";

/// Outcome of a generation call. `image_warning` carries the soft-fail
/// message when the text succeeded but the image did not.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub content: GeneratedContent,
    pub image_warning: Option<String>,
}

/// Generation client shared by the standalone generator page and the
/// campaign wizard.
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    client: BackendClient,
    cleaner: TextCleaner,
}

impl ContentGenerator {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            cleaner: TextCleaner::new(),
        }
    }

    /// POST the config to the endpoint selected by `include_image` and
    /// normalise the result.
    pub async fn generate(&self, config: &ContentConfig) -> WamResult<GenerationOutcome> {
        let path = if config.include_image {
            GENERATE_WITH_IMAGE_PATH
        } else {
            GENERATE_PATH
        };
        let body = serde_json::to_value(config)
            .map_err(|e| WamError::serialization(format!("Config serialization failed: {}", e)))?;

        let value = self.client.post_json(path, &body).await?;
        self.parse_generated(&value, config)
    }

    fn parse_generated(
        &self,
        value: &serde_json::Value,
        config: &ContentConfig,
    ) -> WamResult<GenerationOutcome> {
        let data = if value["data"].is_object() {
            &value["data"]
        } else {
            value
        };

        let raw_message = data["message"]
            .as_str()
            .or_else(|| data["content"].as_str())
            .ok_or_else(|| WamError::serialization("Generation response carried no message"))?;

        let message = self.cleaner.clean(raw_message);
        if message.is_empty() {
            return Err(WamError::serialization(
                "Generation response was empty after cleanup",
            ));
        }

        let preview_text = data["previewText"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| preview_of(&message));

        let image_url = data["imageUrl"]
            .as_str()
            .filter(|u| !u.trim().is_empty())
            .map(str::to_string);
        let image_generated = image_url.is_some();
        let image_warning = if config.include_image && !image_generated {
            Some("Message generated; image generation was unavailable".to_string())
        } else {
            None
        };

        let mut content = GeneratedContent {
            message,
            preview_text,
            brand_alignment_score: data["brandAlignmentScore"].as_u64().unwrap_or(0).min(100)
                as u8,
            character_count: 0,
            word_count: 0,
            suggested_emojis: string_list(&data["suggestedEmojis"]),
            personalization_tags: string_list(&data["personalizationTags"]),
            image_url,
            image_generated,
        };
        // counts always derive from the cleaned text, not the response
        content.recount();

        Ok(GenerationOutcome {
            content,
            image_warning,
        })
    }

    /// Fetch the brand-voice profiles for the configure dropdown.
    pub async fn list_brand_voices(&self) -> WamResult<Vec<BrandVoice>> {
        let value = self.client.get(BRAND_VOICES_PATH).await?;
        Ok(parse_rows(&value, "brand voice"))
    }
}

fn preview_of(message: &str) -> String {
    let first_line = message.lines().next().unwrap_or_default();
    first_line.chars().take(80).collect()
}

fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wam_core::ConsoleConfig;

    fn generator() -> ContentGenerator {
        ContentGenerator::new(BackendClient::new(&ConsoleConfig::default()).unwrap())
    }

    #[test]
    fn test_parse_cleans_and_recounts() {
        let generator = generator();
        let config = ContentConfig::default();
        let value = serde_json::json!({
            "message": "# Draft\nBig summer savings!",
            "brandAlignmentScore": 88,
            "characterCount": 9999,
            "wordCount": 9999,
            "suggestedEmojis": ["🌞", "🛒"]
        });

        let outcome = generator.parse_generated(&value, &config).unwrap();
        assert_eq!(outcome.content.message, "Big summer savings!");
        assert_eq!(outcome.content.character_count, 19);
        assert_eq!(outcome.content.word_count, 3);
        assert_eq!(outcome.content.brand_alignment_score, 88);
        assert_eq!(outcome.content.suggested_emojis.len(), 2);
        assert!(outcome.image_warning.is_none());
    }

    #[test]
    fn test_parse_unwraps_data_envelope() {
        let generator = generator();
        let config = ContentConfig::default();
        let value = serde_json::json!({
            "data": { "message": "Hello there", "previewText": "Hello" }
        });
        let outcome = generator.parse_generated(&value, &config).unwrap();
        assert_eq!(outcome.content.message, "Hello there");
        assert_eq!(outcome.content.preview_text, "Hello");
    }

    #[test]
    fn test_image_soft_fail_yields_warning_not_error() {
        let generator = generator();
        let config = ContentConfig {
            include_image: true,
            ..Default::default()
        };
        let value = serde_json::json!({ "message": "Text only" });

        let outcome = generator.parse_generated(&value, &config).unwrap();
        assert!(!outcome.content.image_generated);
        assert!(outcome.image_warning.is_some());
    }

    #[test]
    fn test_image_present_no_warning() {
        let generator = generator();
        let config = ContentConfig {
            include_image: true,
            ..Default::default()
        };
        let value = serde_json::json!({
            "message": "Text",
            "imageUrl": "https://cdn.example.com/img.png"
        });
        let outcome = generator.parse_generated(&value, &config).unwrap();
        assert!(outcome.content.image_generated);
        assert!(outcome.image_warning.is_none());
    }

    #[test]
    fn test_missing_message_is_error() {
        let generator = generator();
        let config = ContentConfig::default();
        let value = serde_json::json!({ "status": "ok" });
        assert!(generator.parse_generated(&value, &config).is_err());
    }

    #[test]
    fn test_score_clamped_to_100() {
        let generator = generator();
        let config = ContentConfig::default();
        let value = serde_json::json!({ "message": "x", "brandAlignmentScore": 400 });
        let outcome = generator.parse_generated(&value, &config).unwrap();
        assert_eq!(outcome.content.brand_alignment_score, 100);
    }
}
