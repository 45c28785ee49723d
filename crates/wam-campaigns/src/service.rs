//! Campaign wizard service: owns the step machine and every piece of
//! wizard state: content config, generated content, recipients,
//! schedule, tracking and the chosen business account.

use crate::schedule::ScheduleData;
use crate::types::{parse_campaigns, CampaignSubmitResult, CampaignSummary, TrackingOptions};
use crate::wizard::WizardStep;
use log::info;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use wam_contacts::selection::ContactSelection;
use wam_content::{ContentConfig, ContentGenerator, GeneratedContent, GenerationOutcome, LiveCounts, ReviewSession};
use wam_core::{BackendClient, InFlight, InFlightToken, Notifier, WamError, WamResult};

pub const CAMPAIGNS_PATH: &str = "api/v1/whatsapp/campaigns";

/// Shared service state, managed by Tauri.
pub type CampaignWizardState = Arc<Mutex<CampaignWizard>>;

/// One entry of the stepper header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub step: WizardStep,
    pub title: &'static str,
    pub complete: bool,
    pub current: bool,
}

/// Snapshot of the wizard for the webview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub step: WizardStep,
    pub steps: Vec<StepView>,
    pub name: String,
    pub account_id: Option<String>,
    pub config: ContentConfig,
    pub generated: Option<GeneratedContent>,
    pub editing: bool,
    pub recipient_count: usize,
    pub max_recipients: usize,
    pub schedule: ScheduleData,
    pub schedule_summary: String,
    pub tracking: TrackingOptions,
    pub can_submit: bool,
}

/// The campaign wizard.
pub struct CampaignWizard {
    client: BackendClient,
    generator: ContentGenerator,
    notifier: Arc<dyn Notifier>,
    step: WizardStep,
    name: String,
    account_id: Option<String>,
    config: ContentConfig,
    review: Option<ReviewSession>,
    recipients: ContactSelection,
    schedule: ScheduleData,
    tracking: TrackingOptions,
    inflight: InFlight,
}

impl CampaignWizard {
    /// Create a new service wrapped in an Arc<Mutex>.
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>) -> CampaignWizardState {
        Arc::new(Mutex::new(Self::with_parts(client, notifier)))
    }

    pub(crate) fn with_parts(client: BackendClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            generator: ContentGenerator::new(client.clone()),
            client,
            notifier,
            step: WizardStep::Configure,
            name: String::new(),
            account_id: None,
            config: ContentConfig::default(),
            review: None,
            recipients: ContactSelection::default(),
            schedule: ScheduleData::default(),
            tracking: TrackingOptions::default(),
            inflight: InFlight::new(),
        }
    }

    // ── Step machine ────────────────────────────────────────────────

    /// The per-step completion table. Every navigation rule consults
    /// this one function.
    pub fn step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Configure => self.config.ready(),
            WizardStep::Generate => self.review.is_some(),
            WizardStep::Review => true,
            WizardStep::Recipients => !self.recipients.is_empty(),
            WizardStep::Schedule => self.schedule.is_valid() && self.account_id.is_some(),
        }
    }

    fn gate_message(step: WizardStep) -> &'static str {
        match step {
            WizardStep::Configure => "Topic and target audience are required",
            WizardStep::Generate => "Generate content before continuing",
            WizardStep::Review => "Review is always available",
            WizardStep::Recipients => "Select at least one recipient",
            WizardStep::Schedule => "Complete the schedule and pick a business account",
        }
    }

    /// Advance one step, gated on the current step's completion.
    pub fn try_advance(&mut self) -> WamResult<WizardStep> {
        if !self.step_complete(self.step) {
            return Err(WamError::validation(Self::gate_message(self.step)));
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(self.step)
            }
            None => Err(WamError::validation(
                "Already on the last step; launch the campaign to finish",
            )),
        }
    }

    /// Step back freely.
    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Jump to a step. Backward jumps are free; forward jumps must pass
    /// every gate in between.
    pub fn goto(&mut self, target: WizardStep) -> WamResult<WizardStep> {
        if target.index() <= self.step.index() {
            self.step = target;
            return Ok(self.step);
        }
        for step in &WizardStep::ALL[self.step.index()..target.index()] {
            if !self.step_complete(*step) {
                return Err(WamError::validation(Self::gate_message(*step)));
            }
        }
        self.step = target;
        Ok(self.step)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    // ── Configure ───────────────────────────────────────────────────

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_config(&mut self, mut config: ContentConfig) -> ContentConfig {
        config.clamp_keyword_count();
        self.config = config;
        self.config.clone()
    }

    pub fn set_account(&mut self, account_id: Option<String>) {
        self.account_id = account_id.filter(|id| !id.trim().is_empty());
    }

    // ── Generate (two-phase around the network call) ────────────────

    pub fn begin_generate(&self) -> WamResult<(ContentGenerator, ContentConfig, InFlightToken)> {
        if !self.config.ready() {
            return Err(WamError::validation(Self::gate_message(WizardStep::Configure)));
        }
        let token = self.inflight.try_begin("generate")?;
        Ok((self.generator.clone(), self.config.clone(), token))
    }

    pub fn finish_generate(
        &mut self,
        outcome: WamResult<GenerationOutcome>,
        token: InFlightToken,
    ) -> WamResult<GeneratedContent> {
        drop(token);
        match outcome {
            Ok(outcome) => {
                if let Some(ref warning) = outcome.image_warning {
                    self.notifier.warning("Image unavailable", warning);
                }
                let content = outcome.content;
                self.review = Some(ReviewSession::new(content.clone()));
                Ok(content)
            }
            Err(err) => {
                self.notifier.notify_error("Generation failed", &err);
                Err(err)
            }
        }
    }

    /// Inject already-generated content (used when the user arrives
    /// from the standalone generator page).
    pub fn set_generated(&mut self, content: GeneratedContent) {
        self.review = Some(ReviewSession::new(content));
    }

    // ── Review / edit ───────────────────────────────────────────────

    fn review_mut(&mut self) -> WamResult<&mut ReviewSession> {
        self.review
            .as_mut()
            .ok_or_else(|| WamError::validation("No generated content to edit"))
    }

    pub fn begin_edit(&mut self) -> WamResult<String> {
        let session = self.review_mut()?;
        session.begin_edit();
        Ok(session.current_text().to_string())
    }

    pub fn update_draft(&mut self, text: String) -> WamResult<LiveCounts> {
        Ok(self.review_mut()?.update_draft(text))
    }

    pub fn save_edit(&mut self) -> WamResult<GeneratedContent> {
        Ok(self.review_mut()?.save().clone())
    }

    pub fn cancel_edit(&mut self) -> WamResult<GeneratedContent> {
        Ok(self.review_mut()?.cancel().clone())
    }

    /// Clear generated content and return to the generation step.
    pub fn regenerate(&mut self) -> WizardStep {
        self.review = None;
        self.step = WizardStep::Generate;
        self.step
    }

    // ── Recipients ──────────────────────────────────────────────────

    /// Replace the recipient list with ids picked in the directory.
    pub fn set_recipients(&mut self, ids: Vec<String>) -> WamResult<usize> {
        if ids.len() > self.recipients.max_selections() {
            return Err(WamError::selection_limit(self.recipients.max_selections()));
        }
        Ok(self.recipients.select_all_visible(&ids))
    }

    pub fn recipient_ids(&self) -> Vec<String> {
        self.recipients.ids().to_vec()
    }

    // ── Schedule and tracking ───────────────────────────────────────

    /// Replace the schedule; returns its summary line. Invalid data is
    /// stored anyway (the submit gate revalidates) but reported.
    pub fn set_schedule(&mut self, schedule: ScheduleData) -> WamResult<String> {
        let check = schedule.validate();
        self.schedule = schedule;
        check?;
        Ok(self.schedule.summary())
    }

    pub fn schedule_summary(&self) -> String {
        self.schedule.summary()
    }

    pub fn set_tracking(&mut self, tracking: TrackingOptions) {
        self.tracking = tracking;
    }

    // ── Submission ──────────────────────────────────────────────────

    fn campaign_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("{} campaign", self.config.topic.trim())
        } else {
            trimmed.to_string()
        }
    }

    /// Build the submission payload. Message, schedule and tracking ride
    /// in the nested `variables` map; schedule fields pass verbatim.
    pub fn build_payload(&self) -> WamResult<serde_json::Value> {
        let account_id = self
            .account_id
            .as_deref()
            .ok_or_else(|| WamError::validation("Select a business account"))?;
        let content = self
            .review
            .as_ref()
            .map(|r| r.committed())
            .ok_or_else(|| WamError::validation("Generate content before submitting"))?;
        if self.recipients.is_empty() {
            return Err(WamError::validation(Self::gate_message(WizardStep::Recipients)));
        }
        self.schedule.validate()?;

        let schedule = serde_json::to_value(&self.schedule)
            .map_err(|e| WamError::serialization(e.to_string()))?;
        let tracking = serde_json::to_value(&self.tracking)
            .map_err(|e| WamError::serialization(e.to_string()))?;

        Ok(serde_json::json!({
            "name": self.campaign_name(),
            "accountId": account_id,
            "recipients": self.recipients.ids(),
            "variables": {
                "message": content.message,
                "imageUrl": content.image_url,
                "scheduleData": schedule,
                "tracking": tracking,
            },
        }))
    }

    /// Validate everything and claim the submit slot.
    pub fn begin_submit(
        &self,
    ) -> WamResult<(BackendClient, serde_json::Value, InFlightToken)> {
        let payload = self.build_payload()?;
        let token = self.inflight.try_begin("submit")?;
        Ok((self.client.clone(), payload, token))
    }

    /// Record the submission result. Success resets the wizard.
    pub fn finish_submit(
        &mut self,
        result: WamResult<serde_json::Value>,
        token: InFlightToken,
    ) -> WamResult<CampaignSubmitResult> {
        drop(token);
        match result {
            Ok(value) => {
                let name = self.campaign_name();
                let id = value["id"]
                    .as_str()
                    .map(str::to_string)
                    .or_else(|| value["id"].as_u64().map(|n| n.to_string()))
                    .or_else(|| value["data"]["id"].as_str().map(str::to_string));
                info!("Campaign '{}' submitted (id: {})", name, id.as_deref().unwrap_or("?"));
                self.notifier
                    .success("Campaign created", &format!("{} was submitted", name));
                self.reset();
                Ok(CampaignSubmitResult { id, name })
            }
            Err(err) => {
                self.notifier.notify_error("Campaign submission failed", &err);
                Err(err)
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.inflight.is_running("submit")
    }

    /// Reset to a fresh wizard.
    pub fn reset(&mut self) {
        self.step = WizardStep::Configure;
        self.name = String::new();
        self.account_id = None;
        self.config = ContentConfig::default();
        self.review = None;
        self.recipients.clear();
        self.schedule = ScheduleData::default();
        self.tracking = TrackingOptions::default();
    }

    // ── Dashboard list ──────────────────────────────────────────────

    pub async fn list_campaigns(&self) -> WamResult<Vec<CampaignSummary>> {
        let value = self.client.get(CAMPAIGNS_PATH).await?;
        let campaigns = parse_campaigns(&value);
        info!("Loaded {} campaigns", campaigns.len());
        Ok(campaigns)
    }

    // ── View ────────────────────────────────────────────────────────

    pub fn view(&self) -> WizardView {
        let steps = WizardStep::ALL
            .iter()
            .map(|s| StepView {
                step: *s,
                title: s.title(),
                complete: self.step_complete(*s),
                current: *s == self.step,
            })
            .collect();
        WizardView {
            step: self.step,
            steps,
            name: self.name.clone(),
            account_id: self.account_id.clone(),
            config: self.config.clone(),
            generated: self.review.as_ref().map(|r| r.committed().clone()),
            editing: self.review.as_ref().map(|r| r.is_editing()).unwrap_or(false),
            recipient_count: self.recipients.len(),
            max_recipients: self.recipients.max_selections(),
            schedule: self.schedule.clone(),
            schedule_summary: self.schedule.summary(),
            tracking: self.tracking.clone(),
            can_submit: self.build_payload().is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleType;
    use wam_core::{ConsoleConfig, MemoryNotifier, NoticeKind, WamErrorCode};

    fn wizard() -> (CampaignWizard, Arc<MemoryNotifier>) {
        let notifier = Arc::new(MemoryNotifier::new());
        let client = BackendClient::new(&ConsoleConfig::default()).unwrap();
        let svc = CampaignWizard::with_parts(client, notifier.clone() as Arc<dyn Notifier>);
        (svc, notifier)
    }

    fn ready_config() -> ContentConfig {
        ContentConfig {
            topic: "Summer sale".to_string(),
            target_audience: "Returning customers".to_string(),
            ..Default::default()
        }
    }

    fn sample_content() -> GeneratedContent {
        let mut c = GeneratedContent {
            message: "Summer deals are live!".to_string(),
            preview_text: "Summer deals".to_string(),
            brand_alignment_score: 92,
            character_count: 0,
            word_count: 0,
            suggested_emojis: vec![],
            personalization_tags: vec![],
            image_url: None,
            image_generated: false,
        };
        c.recount();
        c
    }

    fn once_schedule() -> ScheduleData {
        ScheduleData {
            schedule_type: ScheduleType::Once,
            send_date: Some("2024-06-01".to_string()),
            send_time: Some("09:00".to_string()),
            timezone: "UTC".to_string(),
            ..Default::default()
        }
    }

    fn filled(svc: &mut CampaignWizard) {
        svc.set_config(ready_config());
        svc.set_generated(sample_content());
        svc.set_recipients(vec!["c1".to_string(), "c2".to_string()]).unwrap();
        svc.set_schedule(once_schedule()).unwrap();
        svc.set_account(Some("acc-1".to_string()));
    }

    #[test]
    fn test_advance_blocked_until_configure_complete() {
        let (mut svc, _) = wizard();
        let err = svc.try_advance().unwrap_err();
        assert_eq!(err.code, WamErrorCode::Validation);
        assert_eq!(svc.step(), WizardStep::Configure);

        svc.set_config(ready_config());
        assert_eq!(svc.try_advance().unwrap(), WizardStep::Generate);
    }

    #[test]
    fn test_forward_jump_gated_backward_free() {
        let (mut svc, _) = wizard();
        svc.set_config(ready_config());

        // cannot leap to recipients without generated content
        assert!(svc.goto(WizardStep::Recipients).is_err());

        svc.set_generated(sample_content());
        assert_eq!(svc.goto(WizardStep::Recipients).unwrap(), WizardStep::Recipients);

        // backward jump is always free
        assert_eq!(svc.goto(WizardStep::Configure).unwrap(), WizardStep::Configure);
    }

    #[test]
    fn test_regenerate_returns_to_generate_step() {
        let (mut svc, _) = wizard();
        filled(&mut svc);
        svc.goto(WizardStep::Review).unwrap();

        assert_eq!(svc.regenerate(), WizardStep::Generate);
        assert!(svc.view().generated.is_none());
        assert!(!svc.step_complete(WizardStep::Generate));
    }

    #[test]
    fn test_payload_carries_schedule_verbatim() {
        let (mut svc, _) = wizard();
        filled(&mut svc);
        svc.set_name("June Launch".to_string());

        let payload = svc.build_payload().unwrap();
        assert_eq!(payload["name"], "June Launch");
        assert_eq!(payload["accountId"], "acc-1");
        assert_eq!(payload["recipients"].as_array().unwrap().len(), 2);

        let schedule = &payload["variables"]["scheduleData"];
        assert_eq!(schedule["sendDate"], "2024-06-01");
        assert_eq!(schedule["sendTime"], "09:00");
        assert_eq!(schedule["timezone"], "UTC");
        assert_eq!(payload["variables"]["message"], "Summer deals are live!");
        assert_eq!(payload["variables"]["tracking"]["trackOpens"], true);
    }

    #[test]
    fn test_payload_requires_account_and_content() {
        let (mut svc, _) = wizard();
        svc.set_config(ready_config());
        svc.set_recipients(vec!["c1".to_string()]).unwrap();
        svc.set_schedule(once_schedule()).unwrap();

        // no account
        assert!(svc.build_payload().is_err());
        svc.set_account(Some("acc-1".to_string()));

        // no content
        assert!(svc.build_payload().is_err());
        svc.set_generated(sample_content());
        assert!(svc.build_payload().is_ok());
    }

    #[test]
    fn test_recipients_over_cap_rejected() {
        let (mut svc, _) = wizard();
        let too_many: Vec<String> = (0..500).map(|i| format!("c{}", i)).collect();
        let err = svc.set_recipients(too_many).unwrap_err();
        assert_eq!(err.code, WamErrorCode::SelectionLimit);
        assert_eq!(svc.recipient_ids().len(), 0);
    }

    #[test]
    fn test_double_submit_rejected() {
        let (mut svc, _) = wizard();
        filled(&mut svc);

        let (_, _, token) = svc.begin_submit().unwrap();
        let second = svc.begin_submit().unwrap_err();
        assert_eq!(second.code, WamErrorCode::AlreadyRunning);
        drop(token);
        assert!(svc.begin_submit().is_ok());
    }

    #[test]
    fn test_successful_submit_resets_wizard() {
        let (mut svc, notifier) = wizard();
        filled(&mut svc);
        svc.goto(WizardStep::Schedule).unwrap();

        let (_, _, token) = svc.begin_submit().unwrap();
        let result = svc
            .finish_submit(Ok(serde_json::json!({"id": "cmp-9"})), token)
            .unwrap();
        assert_eq!(result.id.as_deref(), Some("cmp-9"));
        assert_eq!(notifier.count_of(NoticeKind::Success), 1);

        // fresh wizard
        assert_eq!(svc.step(), WizardStep::Configure);
        assert!(svc.view().generated.is_none());
        assert_eq!(svc.recipient_ids().len(), 0);
    }

    #[test]
    fn test_failed_submit_keeps_state_and_notifies() {
        let (mut svc, notifier) = wizard();
        filled(&mut svc);

        let (_, _, token) = svc.begin_submit().unwrap();
        let err = svc
            .finish_submit(Err(WamError::from_api_response(400, r#"{"message":"Invalid account"}"#)), token)
            .unwrap_err();
        assert_eq!(err.message, "Invalid account");
        assert_eq!(notifier.count_of(NoticeKind::Error), 1);

        // state survives for a manual retry
        assert!(svc.build_payload().is_ok());
        assert!(!svc.is_submitting());
    }

    #[test]
    fn test_default_name_derived_from_topic() {
        let (mut svc, _) = wizard();
        filled(&mut svc);
        let payload = svc.build_payload().unwrap();
        assert_eq!(payload["name"], "Summer sale campaign");
    }

    #[test]
    fn test_view_mirrors_completion_table() {
        let (mut svc, _) = wizard();
        svc.set_config(ready_config());
        let view = svc.view();
        assert!(view.steps[0].complete);
        assert!(!view.steps[1].complete);
        assert!(view.steps[2].complete);
        assert!(!view.can_submit);
    }
}
