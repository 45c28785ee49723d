//! Auto-reply rule records and the editor draft.

use regex::Regex;
use serde::{Deserialize, Serialize};
use wam_core::{parse_rows, WamError, WamResult};

/// How a rule's pattern is compared against inbound text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Exact,
    Contains,
    StartsWith,
    Regex,
}

impl Default for MatchType {
    fn default() -> Self {
        MatchType::Contains
    }
}

/// One auto-reply rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoReplyRule {
    pub id: String,
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub match_type: MatchType,
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub reply_body: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// Editor form for create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub match_type: MatchType,
    pub pattern: String,
    pub reply_body: String,
    #[serde(default)]
    pub priority: i32,
}

impl RuleDraft {
    pub fn validate(&self) -> WamResult<()> {
        if self.name.trim().is_empty() {
            return Err(WamError::validation("Rule name is required"));
        }
        if self.pattern.trim().is_empty() {
            return Err(WamError::validation("Match pattern is required"));
        }
        if self.reply_body.trim().is_empty() {
            return Err(WamError::validation("Reply text is required"));
        }
        if self.match_type == MatchType::Regex {
            if let Err(e) = Regex::new(self.pattern.trim()) {
                return Err(WamError::validation(format!("Invalid pattern: {}", e)));
            }
        }
        Ok(())
    }
}

/// One recorded inbound message and the reply it triggered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoReplyExchange {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub incoming_message: String,
    #[serde(default)]
    pub reply_sent: Option<String>,
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Parse the rule list response (bare array or wrapped).
pub fn parse_rules(value: &serde_json::Value) -> Vec<AutoReplyRule> {
    parse_rows(value, "auto-reply rule")
}

/// Parse a conversation thread response.
pub fn parse_exchanges(value: &serde_json::Value) -> Vec<AutoReplyExchange> {
    parse_rows(value, "conversation row")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation() {
        let draft = RuleDraft {
            name: "greeting".to_string(),
            enabled: true,
            match_type: MatchType::Contains,
            pattern: "hello".to_string(),
            reply_body: "Hi! How can we help?".to_string(),
            priority: 1,
        };
        assert!(draft.validate().is_ok());

        let bad = RuleDraft { pattern: " ".to_string(), ..draft.clone() };
        assert!(bad.validate().is_err());

        let bad_regex = RuleDraft {
            match_type: MatchType::Regex,
            pattern: "(unclosed".to_string(),
            ..draft
        };
        assert!(bad_regex.validate().is_err());
    }

    #[test]
    fn test_parse_rule_rows() {
        let value = serde_json::json!([
            {"id": "r1", "name": "greeting", "matchType": "STARTS_WITH", "pattern": "hi"},
            {"name": "missing id"}
        ]);
        let rules = parse_rules(&value);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].match_type, MatchType::StartsWith);
        assert!(rules[0].enabled);
    }
}
