//! The rule-matching ladder, shared by the local preview and tests.
//!
//! All comparisons are case-insensitive. Regex patterns compile per
//! match because they are user-supplied; an invalid pattern never
//! matches and is logged once per attempt.

use crate::types::{AutoReplyRule, MatchType};
use log::warn;
use regex::RegexBuilder;
use serde::Serialize;

/// Whether one rule matches the inbound text.
pub fn rule_matches(rule: &AutoReplyRule, text: &str) -> bool {
    let text_lower = text.trim().to_lowercase();
    let pattern_lower = rule.pattern.trim().to_lowercase();
    if pattern_lower.is_empty() {
        return false;
    }
    match rule.match_type {
        MatchType::Exact => text_lower == pattern_lower,
        MatchType::Contains => text_lower.contains(&pattern_lower),
        MatchType::StartsWith => text_lower.starts_with(&pattern_lower),
        MatchType::Regex => match RegexBuilder::new(rule.pattern.trim())
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re.is_match(text.trim()),
            Err(e) => {
                warn!("Invalid auto-reply pattern {:?}: {}", rule.pattern, e);
                false
            }
        },
    }
}

/// First enabled rule that matches, lowest priority value first.
pub fn find_matching_rule<'a>(rules: &'a [AutoReplyRule], text: &str) -> Option<&'a AutoReplyRule> {
    let mut enabled: Vec<&AutoReplyRule> = rules.iter().filter(|r| r.enabled).collect();
    enabled.sort_by_key(|r| r.priority);
    enabled.into_iter().find(|rule| rule_matches(rule, text))
}

/// Result of running sample text through the ladder.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreview {
    pub matched: bool,
    pub rule_id: Option<String>,
    pub rule_name: Option<String>,
    pub reply: Option<String>,
}

impl MatchPreview {
    pub fn from_rule(rule: Option<&AutoReplyRule>) -> Self {
        match rule {
            Some(rule) => Self {
                matched: true,
                rule_id: Some(rule.id.clone()),
                rule_name: Some(rule.name.clone()),
                reply: Some(rule.reply_body.clone()),
            },
            None => Self {
                matched: false,
                rule_id: None,
                rule_name: None,
                reply: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, match_type: MatchType, pattern: &str, priority: i32) -> AutoReplyRule {
        AutoReplyRule {
            id: id.to_string(),
            name: format!("rule {}", id),
            enabled: true,
            match_type,
            pattern: pattern.to_string(),
            reply_body: format!("reply from {}", id),
            priority,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_ladder_is_case_insensitive() {
        assert!(rule_matches(&rule("r", MatchType::Exact, "Hello", 0), "hello"));
        assert!(rule_matches(&rule("r", MatchType::Contains, "PRICE", 0), "What is the price?"));
        assert!(rule_matches(&rule("r", MatchType::StartsWith, "hi", 0), "Hi there"));
        assert!(rule_matches(&rule("r", MatchType::Regex, r"order\s+\d+", 0), "ORDER 42 status"));
    }

    #[test]
    fn test_exact_requires_whole_message() {
        let r = rule("r", MatchType::Exact, "stop", 0);
        assert!(rule_matches(&r, "  stop  "));
        assert!(!rule_matches(&r, "please stop"));
    }

    #[test]
    fn test_invalid_regex_never_matches() {
        let r = rule("r", MatchType::Regex, "(unclosed", 0);
        assert!(!rule_matches(&r, "(unclosed"));
    }

    #[test]
    fn test_priority_order_decides_between_matches() {
        let rules = vec![
            rule("low", MatchType::Contains, "help", 10),
            rule("high", MatchType::Contains, "help", 1),
        ];
        let hit = find_matching_rule(&rules, "I need help").unwrap();
        assert_eq!(hit.id, "high");
    }

    #[test]
    fn test_disabled_rules_skipped() {
        let mut r = rule("only", MatchType::Contains, "help", 0);
        r.enabled = false;
        assert!(find_matching_rule(&[r], "help me").is_none());
    }

    #[test]
    fn test_preview_carries_reply() {
        let r = rule("r1", MatchType::Contains, "hours", 0);
        let preview = MatchPreview::from_rule(Some(&r));
        assert!(preview.matched);
        assert_eq!(preview.reply.as_deref(), Some("reply from r1"));

        let miss = MatchPreview::from_rule(None);
        assert!(!miss.matched);
        assert!(miss.reply.is_none());
    }
}
