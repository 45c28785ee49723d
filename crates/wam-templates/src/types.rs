//! Template records and the editor draft.

use serde::{Deserialize, Serialize};
use wam_core::{parse_rows, WamError, WamResult};

/// WhatsApp template category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateCategory {
    Marketing,
    Utility,
    Authentication,
}

impl Default for TemplateCategory {
    fn default() -> Self {
        TemplateCategory::Marketing
    }
}

/// Review status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl Default for TemplateStatus {
    fn default() -> Self {
        TemplateStatus::Draft
    }
}

/// One stored template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    pub id: String,
    pub name: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub category: TemplateCategory,
    #[serde(default)]
    pub status: TemplateStatus,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Editor form for create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    pub name: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub category: TemplateCategory,
    pub body: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
}

impl TemplateDraft {
    pub fn validate(&self) -> WamResult<()> {
        if self.name.trim().is_empty() {
            return Err(WamError::validation("Template name is required"));
        }
        if self.body.trim().is_empty() {
            return Err(WamError::validation("Template body is required"));
        }
        Ok(())
    }
}

/// Parse the template list response (bare array or wrapped).
pub fn parse_templates(value: &serde_json::Value) -> Vec<MessageTemplate> {
    parse_rows(value, "template row")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_name_and_body() {
        let draft = TemplateDraft {
            name: "  ".to_string(),
            language: "en".to_string(),
            category: TemplateCategory::Utility,
            body: "Hello {{name}}".to_string(),
            header: None,
            footer: None,
        };
        assert!(draft.validate().is_err());

        let draft = TemplateDraft { name: "welcome".to_string(), ..draft };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_parse_template_rows() {
        let value = serde_json::json!({
            "content": [
                {"id": "t1", "name": "welcome", "category": "UTILITY", "status": "APPROVED"},
                {"name": "no id"}
            ]
        });
        let templates = parse_templates(&value);
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].status, TemplateStatus::Approved);
        assert_eq!(templates[0].language, "en");
    }
}
