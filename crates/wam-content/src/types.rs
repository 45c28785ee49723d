//! Content configuration and generation result types.

use serde::{Deserialize, Serialize};

/// Campaign category steering the AI prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentCategory {
    Promotional,
    CustomerService,
    OrderUpdate,
    Appointment,
    Newsletter,
    ReEngagement,
}

impl ContentCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentCategory::Promotional => "Promotional",
            ContentCategory::CustomerService => "Customer Service",
            ContentCategory::OrderUpdate => "Order Update",
            ContentCategory::Appointment => "Appointment",
            ContentCategory::Newsletter => "Newsletter",
            ContentCategory::ReEngagement => "Re-engagement",
        }
    }
}

/// Writing tone of the generated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentTone {
    Professional,
    Friendly,
    Casual,
    Enthusiastic,
    Informative,
    Persuasive,
}

impl ContentTone {
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentTone::Professional => "Professional",
            ContentTone::Friendly => "Friendly",
            ContentTone::Casual => "Casual",
            ContentTone::Enthusiastic => "Enthusiastic",
            ContentTone::Informative => "Informative",
            ContentTone::Persuasive => "Persuasive",
        }
    }
}

/// Requested message length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentLength {
    Short,
    Medium,
    Large,
}

/// Bounds for the keyword-count dial.
pub const KEYWORD_COUNT_MIN: u8 = 3;
pub const KEYWORD_COUNT_MAX: u8 = 10;

/// The content-generation form. Mutated by the configure step, sent to
/// the AI endpoint as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub brand_voice_id: Option<String>,
    pub category: ContentCategory,
    pub tone: ContentTone,
    pub content_length: ContentLength,
    pub keyword_count: u8,
    pub include_personalization: bool,
    #[serde(default)]
    pub call_to_action: Option<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub custom_prompt: Option<String>,
    #[serde(default)]
    pub include_image: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            topic: String::new(),
            target_audience: String::new(),
            brand_voice_id: None,
            category: ContentCategory::Promotional,
            tone: ContentTone::Professional,
            content_length: ContentLength::Medium,
            keyword_count: 5,
            include_personalization: true,
            call_to_action: None,
            key_points: Vec::new(),
            custom_prompt: None,
            include_image: false,
        }
    }
}

impl ContentConfig {
    /// Whether the configure step may advance. Topic and audience are
    /// the only required fields; everything else has a default.
    pub fn ready(&self) -> bool {
        !self.topic.trim().is_empty() && !self.target_audience.trim().is_empty()
    }

    /// Clamp the keyword count into its dial range.
    pub fn clamp_keyword_count(&mut self) {
        self.keyword_count = self.keyword_count.clamp(KEYWORD_COUNT_MIN, KEYWORD_COUNT_MAX);
    }
}

/// AI-generated message content. Counts always describe `message` as
/// currently stored, never a cached value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub message: String,
    #[serde(default)]
    pub preview_text: String,
    /// 0–100 score of how well the text matches the brand voice.
    pub brand_alignment_score: u8,
    pub character_count: usize,
    pub word_count: usize,
    #[serde(default)]
    pub suggested_emojis: Vec<String>,
    #[serde(default)]
    pub personalization_tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_generated: bool,
}

impl GeneratedContent {
    /// Recompute character and word counts from the message text.
    pub fn recount(&mut self) {
        self.character_count = self.message.chars().count();
        self.word_count = self.message.split_whitespace().count();
    }
}

/// Backend-stored brand voice profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandVoice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub sample_phrases: Vec<String>,
    #[serde(default)]
    pub keywords_to_avoid: Vec<String>,
}
