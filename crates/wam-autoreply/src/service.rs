//! Auto-reply service: rule cache, CRUD, toggle, the remote test and
//! the local match preview.

use crate::matching::{find_matching_rule, MatchPreview};
use crate::types::{parse_exchanges, parse_rules, AutoReplyExchange, AutoReplyRule, RuleDraft};
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;
use wam_core::{
    confirm_destructive, BackendClient, InFlight, InFlightToken, Notifier, WamError, WamResult,
};

pub const RULES_PATH: &str = "api/whatsapp/auto-reply/rules";
pub const CONVERSATIONS_PATH: &str = "api/whatsapp/auto-reply/conversations";

/// Shared service state, managed by Tauri.
pub type AutoReplyServiceState = Arc<Mutex<AutoReplyService>>;

/// The auto-reply service.
pub struct AutoReplyService {
    client: BackendClient,
    notifier: Arc<dyn Notifier>,
    rules: Vec<AutoReplyRule>,
    inflight: InFlight,
}

impl AutoReplyService {
    /// Create a new service wrapped in an Arc<Mutex>.
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>) -> AutoReplyServiceState {
        Arc::new(Mutex::new(Self::with_parts(client, notifier)))
    }

    pub(crate) fn with_parts(client: BackendClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            rules: Vec::new(),
            inflight: InFlight::new(),
        }
    }

    // ── List ────────────────────────────────────────────────────────

    /// Fetch the rule list. Errors surface as a notice; the stale list
    /// is kept.
    pub async fn load_rules(&mut self) -> Vec<AutoReplyRule> {
        match self.client.get(RULES_PATH).await {
            Ok(value) => {
                self.rules = parse_rules(&value);
                info!("Loaded {} auto-reply rules", self.rules.len());
            }
            Err(err) => {
                self.notifier.notify_error("Auto-reply rules unavailable", &err);
            }
        }
        self.rules.clone()
    }

    pub fn rules(&self) -> Vec<AutoReplyRule> {
        self.rules.clone()
    }

    // ── CRUD ────────────────────────────────────────────────────────

    /// Create a rule, then refresh the list.
    pub async fn create_rule(&mut self, draft: RuleDraft) -> WamResult<()> {
        draft.validate()?;
        let payload = serde_json::to_value(&draft)
            .map_err(|e| WamError::serialization(e.to_string()))?;
        match self.client.post_json(RULES_PATH, &payload).await {
            Ok(_) => {
                self.notifier
                    .success("Rule created", &format!("{} was saved", draft.name));
                self.load_rules().await;
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Rule creation failed", &err);
                Err(err)
            }
        }
    }

    /// Update a rule, then refresh the list.
    pub async fn update_rule(&mut self, id: &str, draft: RuleDraft) -> WamResult<()> {
        draft.validate()?;
        let payload = serde_json::to_value(&draft)
            .map_err(|e| WamError::serialization(e.to_string()))?;
        let path = format!("{}/{}", RULES_PATH, id);
        match self.client.put_json(&path, &payload).await {
            Ok(_) => {
                self.notifier
                    .success("Rule updated", &format!("{} was saved", draft.name));
                self.load_rules().await;
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Rule update failed", &err);
                Err(err)
            }
        }
    }

    /// Delete a rule. Requires the literal confirmation phrase.
    pub async fn delete_rule(&mut self, id: &str, confirmation: &str) -> WamResult<()> {
        confirm_destructive(confirmation)?;
        let path = format!("{}/{}", RULES_PATH, id);
        match self.client.delete(&path).await {
            Ok(_) => {
                self.rules.retain(|r| r.id != id);
                self.notifier.success("Rule deleted", "The rule was removed");
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Rule deletion failed", &err);
                Err(err)
            }
        }
    }

    /// Flip a rule's enabled flag, then refresh the list.
    pub async fn toggle_rule(&mut self, id: &str) -> WamResult<Vec<AutoReplyRule>> {
        let path = format!("{}/{}/toggle", RULES_PATH, id);
        match self.client.patch_json(&path, &serde_json::json!({})).await {
            Ok(_) => Ok(self.load_rules().await),
            Err(err) => {
                self.notifier.notify_error("Could not toggle the rule", &err);
                Err(err)
            }
        }
    }

    // ── Testing ─────────────────────────────────────────────────────

    /// Run sample text through the local ladder; no network involved.
    pub fn test_local(&self, text: &str) -> MatchPreview {
        MatchPreview::from_rule(find_matching_rule(&self.rules, text))
    }

    /// Claim the remote-test slot and build the request.
    pub fn begin_test_remote(
        &self,
        text: &str,
    ) -> WamResult<(BackendClient, serde_json::Value, InFlightToken)> {
        if text.trim().is_empty() {
            return Err(WamError::validation("Enter a sample message to test"));
        }
        let token = self.inflight.try_begin("rule-test")?;
        let payload = serde_json::json!({ "message": text.trim() });
        Ok((self.client.clone(), payload, token))
    }

    /// Record the remote test result, reduced to the same preview shape
    /// the local ladder produces.
    pub fn finish_test_remote(
        &mut self,
        outcome: WamResult<serde_json::Value>,
        token: InFlightToken,
    ) -> WamResult<MatchPreview> {
        drop(token);
        match outcome {
            Ok(value) => {
                let matched = value["matched"].as_bool().unwrap_or(!value["ruleId"].is_null());
                Ok(MatchPreview {
                    matched,
                    rule_id: value["ruleId"].as_str().map(str::to_string),
                    rule_name: value["ruleName"].as_str().map(str::to_string),
                    reply: value["reply"].as_str().map(str::to_string),
                })
            }
            Err(err) => {
                self.notifier.notify_error("Rule test failed", &err);
                Err(err)
            }
        }
    }

    // ── Conversations ───────────────────────────────────────────────

    /// Thread of recorded exchanges for one phone number.
    pub async fn conversation(&self, phone: &str) -> WamResult<Vec<AutoReplyExchange>> {
        if phone.trim().is_empty() {
            return Err(WamError::validation("Phone number is required"));
        }
        let path = format!("{}/{}", CONVERSATIONS_PATH, phone.trim());
        let value = self.client.get(&path).await?;
        Ok(parse_exchanges(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchType;
    use wam_core::{ConsoleConfig, MemoryNotifier, WamErrorCode};

    fn service_with_rules(rules: Vec<AutoReplyRule>) -> AutoReplyService {
        let notifier = Arc::new(MemoryNotifier::new());
        let client = BackendClient::new(&ConsoleConfig::default()).unwrap();
        let mut svc = AutoReplyService::with_parts(client, notifier as Arc<dyn Notifier>);
        svc.rules = rules;
        svc
    }

    fn rule(id: &str, pattern: &str, priority: i32) -> AutoReplyRule {
        AutoReplyRule {
            id: id.to_string(),
            name: format!("rule {}", id),
            enabled: true,
            match_type: MatchType::Contains,
            pattern: pattern.to_string(),
            reply_body: format!("reply {}", id),
            priority,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_local_preview_uses_cached_rules() {
        let svc = service_with_rules(vec![rule("r1", "hours", 0), rule("r2", "price", 1)]);
        let hit = svc.test_local("What are your opening hours?");
        assert!(hit.matched);
        assert_eq!(hit.rule_id.as_deref(), Some("r1"));

        let miss = svc.test_local("unrelated");
        assert!(!miss.matched);
    }

    #[test]
    fn test_remote_test_requires_text() {
        let svc = service_with_rules(vec![]);
        let err = svc.begin_test_remote("   ").unwrap_err();
        assert_eq!(err.code, WamErrorCode::Validation);
    }

    #[test]
    fn test_remote_preview_parsed_from_response() {
        let mut svc = service_with_rules(vec![]);
        let (_, payload, token) = svc.begin_test_remote("hi").unwrap();
        assert_eq!(payload["message"], "hi");

        let preview = svc
            .finish_test_remote(
                Ok(serde_json::json!({
                    "matched": true, "ruleId": "r9", "ruleName": "greeting", "reply": "Hello!"
                })),
                token,
            )
            .unwrap();
        assert!(preview.matched);
        assert_eq!(preview.reply.as_deref(), Some("Hello!"));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation_phrase() {
        let mut svc = service_with_rules(vec![rule("r1", "x", 0)]);
        let err = svc.delete_rule("r1", "DELETE ").await.unwrap_err();
        assert_eq!(err.code, WamErrorCode::ConfirmationRequired);
        assert_eq!(svc.rules().len(), 1);
    }

    #[tokio::test]
    async fn test_conversation_requires_phone() {
        let svc = service_with_rules(vec![]);
        let err = svc.conversation(" ").await.unwrap_err();
        assert_eq!(err.code, WamErrorCode::Validation);
    }
}
