//! Content service backing the standalone AI generator page:
//! configuration, guarded generation, review/edit session and brand voices.

use crate::generator::{ContentGenerator, GenerationOutcome};
use crate::review::{LiveCounts, ReviewSession};
use crate::types::{BrandVoice, ContentConfig, GeneratedContent};
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;
use wam_core::{BackendClient, InFlight, InFlightToken, Notifier, WamError, WamResult};

/// Shared service state, managed by Tauri.
pub type ContentServiceState = Arc<Mutex<ContentService>>;

/// The AI content-generation service.
pub struct ContentService {
    generator: ContentGenerator,
    notifier: Arc<dyn Notifier>,
    config: ContentConfig,
    session: Option<ReviewSession>,
    brand_voices: Vec<BrandVoice>,
    inflight: InFlight,
}

impl ContentService {
    /// Create a new service wrapped in an Arc<Mutex>.
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>) -> ContentServiceState {
        Arc::new(Mutex::new(Self::with_parts(client, notifier)))
    }

    pub(crate) fn with_parts(client: BackendClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            generator: ContentGenerator::new(client),
            notifier,
            config: ContentConfig::default(),
            session: None,
            brand_voices: Vec::new(),
            inflight: InFlight::new(),
        }
    }

    // ── Configuration ───────────────────────────────────────────────

    pub fn config(&self) -> ContentConfig {
        self.config.clone()
    }

    /// Replace the form state. Keyword count is clamped into range.
    pub fn set_config(&mut self, mut config: ContentConfig) -> ContentConfig {
        config.clamp_keyword_count();
        self.config = config;
        self.config.clone()
    }

    pub fn ready(&self) -> bool {
        self.config.ready()
    }

    // ── Generation (two-phase, so the lock is not held across the
    //    network call and duplicate triggers are rejected) ───────────

    /// Validate and claim the generation slot. Returns everything the
    /// caller needs to run the request outside the service lock.
    pub fn begin_generate(&self) -> WamResult<(ContentGenerator, ContentConfig, InFlightToken)> {
        if !self.config.ready() {
            return Err(WamError::validation(
                "Topic and target audience are required",
            ));
        }
        let token = self.inflight.try_begin("generate")?;
        Ok((self.generator.clone(), self.config.clone(), token))
    }

    /// Store a finished generation. Failures notify and leave existing
    /// content untouched.
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
                info!("Generated {} characters of content", content.character_count);
                self.session = Some(ReviewSession::new(content.clone()));
                self.notifier.success("Content generated", "Review the message below");
                Ok(content)
            }
            Err(err) => {
                self.notifier.notify_error("Generation failed", &err);
                Err(err)
            }
        }
    }

    pub fn is_generating(&self) -> bool {
        self.inflight.is_running("generate")
    }

    // ── Brand voices ────────────────────────────────────────────────

    pub async fn load_brand_voices(&mut self) -> Vec<BrandVoice> {
        match self.generator.list_brand_voices().await {
            Ok(voices) => self.brand_voices = voices,
            Err(err) => self.notifier.notify_error("Brand voices unavailable", &err),
        }
        self.brand_voices.clone()
    }

    pub fn brand_voices(&self) -> Vec<BrandVoice> {
        self.brand_voices.clone()
    }

    // ── Review / edit ───────────────────────────────────────────────

    pub fn generated(&self) -> Option<GeneratedContent> {
        self.session.as_ref().map(|s| s.committed().clone())
    }

    fn session_mut(&mut self) -> WamResult<&mut ReviewSession> {
        self.session
            .as_mut()
            .ok_or_else(|| WamError::validation("No generated content to edit"))
    }

    pub fn begin_edit(&mut self) -> WamResult<String> {
        let session = self.session_mut()?;
        session.begin_edit();
        Ok(session.current_text().to_string())
    }

    pub fn update_draft(&mut self, text: String) -> WamResult<LiveCounts> {
        Ok(self.session_mut()?.update_draft(text))
    }

    pub fn save_edit(&mut self) -> WamResult<GeneratedContent> {
        Ok(self.session_mut()?.save().clone())
    }

    pub fn cancel_edit(&mut self) -> WamResult<GeneratedContent> {
        Ok(self.session_mut()?.cancel().clone())
    }

    /// Drop the generated content so the user can generate again.
    pub fn discard_generated(&mut self) {
        self.session = None;
    }

    /// Reset the whole page.
    pub fn clear(&mut self) {
        self.config = ContentConfig::default();
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wam_core::{ConsoleConfig, MemoryNotifier, NoticeKind, WamErrorCode};

    fn service() -> (ContentService, Arc<MemoryNotifier>) {
        let notifier = Arc::new(MemoryNotifier::new());
        let client = BackendClient::new(&ConsoleConfig::default()).unwrap();
        let svc = ContentService::with_parts(client, notifier.clone() as Arc<dyn Notifier>);
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
            message: "Summer deals are here!".to_string(),
            preview_text: "Summer deals".to_string(),
            brand_alignment_score: 90,
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

    #[test]
    fn test_begin_generate_blocked_until_ready() {
        let (svc, _) = service();
        let err = svc.begin_generate().unwrap_err();
        assert_eq!(err.code, WamErrorCode::Validation);
    }

    #[test]
    fn test_double_generate_rejected_while_first_runs() {
        let (mut svc, _) = service();
        svc.set_config(ready_config());

        let (_, _, token) = svc.begin_generate().unwrap();
        let second = svc.begin_generate().unwrap_err();
        assert_eq!(second.code, WamErrorCode::AlreadyRunning);

        drop(token);
        assert!(svc.begin_generate().is_ok());
    }

    #[test]
    fn test_finish_generate_soft_fail_warns_and_succeeds() {
        let (mut svc, notifier) = service();
        svc.set_config(ready_config());
        let (_, _, token) = svc.begin_generate().unwrap();

        let outcome = GenerationOutcome {
            content: sample_content(),
            image_warning: Some("Image generation was unavailable".to_string()),
        };
        let content = svc.finish_generate(Ok(outcome), token).unwrap();
        assert_eq!(content.message, "Summer deals are here!");
        assert_eq!(notifier.count_of(NoticeKind::Warning), 1);
        assert_eq!(notifier.count_of(NoticeKind::Success), 1);
        assert!(svc.generated().is_some());
    }

    #[test]
    fn test_finish_generate_failure_keeps_previous_content() {
        let (mut svc, notifier) = service();
        svc.set_config(ready_config());

        let (_, _, token) = svc.begin_generate().unwrap();
        svc.finish_generate(
            Ok(GenerationOutcome {
                content: sample_content(),
                image_warning: None,
            }),
            token,
        )
        .unwrap();

        let (_, _, token) = svc.begin_generate().unwrap();
        let err = svc
            .finish_generate(Err(WamError::network("timed out")), token)
            .unwrap_err();
        assert_eq!(err.code, WamErrorCode::NetworkError);
        // previous content survives the failed re-generation
        assert_eq!(svc.generated().unwrap().message, "Summer deals are here!");
        assert_eq!(notifier.count_of(NoticeKind::Error), 1);
        // slot released for the manual re-trigger
        assert!(!svc.is_generating());
    }

    #[test]
    fn test_edit_cycle() {
        let (mut svc, _) = service();
        svc.set_config(ready_config());
        let (_, _, token) = svc.begin_generate().unwrap();
        svc.finish_generate(
            Ok(GenerationOutcome {
                content: sample_content(),
                image_warning: None,
            }),
            token,
        )
        .unwrap();

        svc.begin_edit().unwrap();
        let counts = svc.update_draft("New text".to_string()).unwrap();
        assert_eq!(counts.character_count, 8);

        let saved = svc.save_edit().unwrap();
        assert_eq!(saved.message, "New text");
        assert_eq!(saved.character_count, 8);
    }

    #[test]
    fn test_edit_without_content_is_validation_error() {
        let (mut svc, _) = service();
        assert_eq!(
            svc.begin_edit().unwrap_err().code,
            WamErrorCode::Validation
        );
    }

    #[test]
    fn test_keyword_count_clamped_on_set() {
        let (mut svc, _) = service();
        let config = ContentConfig {
            keyword_count: 50,
            ..ready_config()
        };
        let stored = svc.set_config(config);
        assert_eq!(stored.keyword_count, 10);
    }
}
