//! Template service: list cache, editor CRUD, preview rendering and
//! the guarded test send.

use crate::preview::VariableScanner;
use crate::types::{parse_templates, MessageTemplate, TemplateDraft};
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use wam_core::{
    confirm_destructive, BackendClient, InFlight, InFlightToken, Notifier, WamError, WamResult,
};

pub const TEMPLATES_PATH: &str = "api/v1/whatsapp/templates";
pub const TEST_MESSAGE_PATH: &str = "api/v1/whatsapp/messages/test";

/// Shared service state, managed by Tauri.
pub type TemplatesServiceState = Arc<Mutex<TemplatesService>>;

/// Rendered preview plus the variables the body still expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub rendered: String,
    pub variables: Vec<String>,
    pub unresolved: Vec<String>,
}

/// The template service.
pub struct TemplatesService {
    client: BackendClient,
    notifier: Arc<dyn Notifier>,
    scanner: VariableScanner,
    templates: Vec<MessageTemplate>,
    inflight: InFlight,
}

impl TemplatesService {
    /// Create a new service wrapped in an Arc<Mutex>.
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>) -> TemplatesServiceState {
        Arc::new(Mutex::new(Self::with_parts(client, notifier)))
    }

    pub(crate) fn with_parts(client: BackendClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            scanner: VariableScanner::new(),
            templates: Vec::new(),
            inflight: InFlight::new(),
        }
    }

    // ── List and lookup ─────────────────────────────────────────────

    /// Fetch the template list. Errors surface as a notice; the stale
    /// list is kept.
    pub async fn load_templates(&mut self) -> Vec<MessageTemplate> {
        match self.client.get(TEMPLATES_PATH).await {
            Ok(value) => {
                self.templates = parse_templates(&value);
                info!("Loaded {} templates", self.templates.len());
            }
            Err(err) => {
                self.notifier.notify_error("Templates unavailable", &err);
            }
        }
        self.templates.clone()
    }

    pub fn templates(&self) -> Vec<MessageTemplate> {
        self.templates.clone()
    }

    pub fn find(&self, id: &str) -> Option<MessageTemplate> {
        self.templates.iter().find(|t| t.id == id).cloned()
    }

    // ── CRUD ────────────────────────────────────────────────────────

    fn draft_payload(&self, draft: &TemplateDraft) -> WamResult<serde_json::Value> {
        draft.validate()?;
        let mut payload = serde_json::to_value(draft)
            .map_err(|e| WamError::serialization(e.to_string()))?;
        payload["variables"] = serde_json::json!(self.scanner.extract_variables(&draft.body));
        Ok(payload)
    }

    /// Create a template, then refresh the list.
    pub async fn create_template(&mut self, draft: TemplateDraft) -> WamResult<()> {
        let payload = self.draft_payload(&draft)?;
        match self.client.post_json(TEMPLATES_PATH, &payload).await {
            Ok(_) => {
                self.notifier
                    .success("Template created", &format!("{} was saved", draft.name));
                self.load_templates().await;
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Template creation failed", &err);
                Err(err)
            }
        }
    }

    /// Update a template, then refresh the list.
    pub async fn update_template(&mut self, id: &str, draft: TemplateDraft) -> WamResult<()> {
        let payload = self.draft_payload(&draft)?;
        let path = format!("{}/{}", TEMPLATES_PATH, id);
        match self.client.put_json(&path, &payload).await {
            Ok(_) => {
                self.notifier
                    .success("Template updated", &format!("{} was saved", draft.name));
                self.load_templates().await;
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Template update failed", &err);
                Err(err)
            }
        }
    }

    /// Delete a template. Requires the literal confirmation phrase.
    pub async fn delete_template(&mut self, id: &str, confirmation: &str) -> WamResult<()> {
        confirm_destructive(confirmation)?;
        let path = format!("{}/{}", TEMPLATES_PATH, id);
        match self.client.delete(&path).await {
            Ok(_) => {
                self.templates.retain(|t| t.id != id);
                self.notifier.success("Template deleted", "The template was removed");
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Template deletion failed", &err);
                Err(err)
            }
        }
    }

    // ── Preview ─────────────────────────────────────────────────────

    /// Render a body against a variable map.
    pub fn preview(&self, body: &str, variables: &HashMap<String, String>) -> TemplatePreview {
        let all = self.scanner.extract_variables(body);
        let unresolved = all
            .iter()
            .filter(|name| !variables.contains_key(*name))
            .cloned()
            .collect();
        TemplatePreview {
            rendered: self.scanner.render(body, variables),
            variables: all,
            unresolved,
        }
    }

    /// Render a stored template by id.
    pub fn preview_template(
        &self,
        id: &str,
        variables: &HashMap<String, String>,
    ) -> WamResult<TemplatePreview> {
        let template = self
            .find(id)
            .ok_or_else(|| WamError::validation("Unknown template"))?;
        Ok(self.preview(&template.body, variables))
    }

    // ── Test send (two-phase around the network call) ───────────────

    /// Validate and claim the test-send slot. The message is rendered
    /// before sending so the recipient sees real values.
    pub fn begin_test_send(
        &self,
        body: &str,
        variables: &HashMap<String, String>,
        phone: &str,
    ) -> WamResult<(BackendClient, serde_json::Value, InFlightToken)> {
        if phone.trim().is_empty() {
            return Err(WamError::validation("Recipient phone number is required"));
        }
        if body.trim().is_empty() {
            return Err(WamError::validation("Nothing to send; the body is empty"));
        }
        let token = self.inflight.try_begin("test-send")?;
        let payload = serde_json::json!({
            "phoneNumber": phone.trim(),
            "message": self.scanner.render(body, variables),
        });
        Ok((self.client.clone(), payload, token))
    }

    pub fn finish_test_send(
        &mut self,
        outcome: WamResult<serde_json::Value>,
        token: InFlightToken,
    ) -> WamResult<()> {
        drop(token);
        match outcome {
            Ok(_) => {
                self.notifier
                    .success("Test message sent", "Check the recipient phone");
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Test send failed", &err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TemplateCategory;
    use wam_core::{ConsoleConfig, MemoryNotifier, NoticeKind, WamErrorCode};

    fn service() -> (TemplatesService, Arc<MemoryNotifier>) {
        let notifier = Arc::new(MemoryNotifier::new());
        let client = BackendClient::new(&ConsoleConfig::default()).unwrap();
        let svc = TemplatesService::with_parts(client, notifier.clone() as Arc<dyn Notifier>);
        (svc, notifier)
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_draft_payload_carries_extracted_variables() {
        let (svc, _) = service();
        let draft = TemplateDraft {
            name: "order-update".to_string(),
            language: "en".to_string(),
            category: TemplateCategory::Utility,
            body: "Hi {{name}}, order {{1}} shipped.".to_string(),
            header: None,
            footer: None,
        };
        let payload = svc.draft_payload(&draft).unwrap();
        assert_eq!(payload["variables"], serde_json::json!(["name", "1"]));
        assert_eq!(payload["category"], "UTILITY");
    }

    #[test]
    fn test_preview_reports_unresolved() {
        let (svc, _) = service();
        let preview = svc.preview("Hi {{name}}, code {{code}}.", &vars(&[("name", "Rita")]));
        assert_eq!(preview.rendered, "Hi Rita, code {{code}}.");
        assert_eq!(preview.unresolved, vec!["code"]);
        assert_eq!(preview.variables, vec!["name", "code"]);
    }

    #[test]
    fn test_test_send_requires_phone_and_body() {
        let (svc, _) = service();
        assert!(svc.begin_test_send("Hello", &HashMap::new(), "  ").is_err());
        assert!(svc.begin_test_send("  ", &HashMap::new(), "+351910000000").is_err());
    }

    #[test]
    fn test_test_send_renders_before_sending() {
        let (svc, _) = service();
        let (_, payload, _token) = svc
            .begin_test_send("Hi {{name}}!", &vars(&[("name", "Rita")]), "+351910000000")
            .unwrap();
        assert_eq!(payload["message"], "Hi Rita!");
        assert_eq!(payload["phoneNumber"], "+351910000000");
    }

    #[test]
    fn test_double_test_send_rejected() {
        let (svc, _) = service();
        let (_, _, token) = svc
            .begin_test_send("Hello", &HashMap::new(), "+351910000000")
            .unwrap();
        let second = svc
            .begin_test_send("Hello", &HashMap::new(), "+351910000000")
            .unwrap_err();
        assert_eq!(second.code, WamErrorCode::AlreadyRunning);
        drop(token);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation_phrase() {
        let (mut svc, notifier) = service();
        let err = svc.delete_template("t1", "delete").await.unwrap_err();
        assert_eq!(err.code, WamErrorCode::ConfirmationRequired);
        assert_eq!(notifier.count_of(NoticeKind::Error), 0);
    }

    #[test]
    fn test_finish_test_send_notifies() {
        let (mut svc, notifier) = service();
        let (_, _, token) = svc
            .begin_test_send("Hello", &HashMap::new(), "+351910000000")
            .unwrap();
        svc.finish_test_send(Ok(serde_json::json!({"success": true})), token)
            .unwrap();
        assert_eq!(notifier.count_of(NoticeKind::Success), 1);
    }
}
