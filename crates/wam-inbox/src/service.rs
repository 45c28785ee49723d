//! Inbox service: webhook feed cache, client-side filtering and
//! paging, conversation summaries and the guarded manual reply.

use crate::types::{
    parse_messages, parse_summaries, ConversationSummary, Direction, WebhookMessage,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use wam_core::{
    paginate, BackendClient, InFlight, InFlightToken, Notifier, PageInfo, WamError, WamResult,
};

pub const FEED_PATH: &str = "api/v1/whatsapp/webhook/messages";
pub const SUMMARY_PATH: &str = "api/v1/whatsapp/conversations/summary";
pub const SEND_REPLY_PATH: &str = "api/v1/whatsapp/send-reply";

/// Rows per feed page.
const PAGE_SIZE: usize = 20;
/// Pager buttons shown at once.
const PAGE_WINDOW: usize = 5;

/// Shared service state, managed by Tauri.
pub type InboxServiceState = Arc<Mutex<InboxService>>;

/// Feed filter form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedFilter {
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub search: String,
}

impl FeedFilter {
    fn matches(&self, message: &WebhookMessage) -> bool {
        if let Some(direction) = self.direction {
            if message.direction != direction {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let body = message.body.as_deref().unwrap_or("");
        let status = message.status.as_deref().unwrap_or("");
        [message.from.as_str(), message.to.as_str(), body, status]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// One rendered page of the feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub items: Vec<WebhookMessage>,
    pub page_info: PageInfo,
    pub page_numbers: Vec<usize>,
    pub range_label: String,
}

/// The inbox service.
pub struct InboxService {
    client: BackendClient,
    notifier: Arc<dyn Notifier>,
    messages: Vec<WebhookMessage>,
    summaries: Vec<ConversationSummary>,
    filter: FeedFilter,
    page: usize,
    inflight: InFlight,
}

impl InboxService {
    /// Create a new service wrapped in an Arc<Mutex>.
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>) -> InboxServiceState {
        Arc::new(Mutex::new(Self::with_parts(client, notifier)))
    }

    pub(crate) fn with_parts(client: BackendClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            messages: Vec::new(),
            summaries: Vec::new(),
            filter: FeedFilter::default(),
            page: 0,
            inflight: InFlight::new(),
        }
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Fetch the webhook feed. Errors surface as a notice; the stale
    /// feed is kept.
    pub async fn load_feed(&mut self) {
        match self.client.get(FEED_PATH).await {
            Ok(value) => {
                self.messages = parse_messages(&value);
                info!("Loaded {} webhook messages", self.messages.len());
            }
            Err(err) => {
                self.notifier.notify_error("Inbox unavailable", &err);
            }
        }
        self.page = 0;
    }

    /// Fetch conversation summaries, independent of the feed.
    pub async fn load_summaries(&mut self) -> Vec<ConversationSummary> {
        match self.client.get(SUMMARY_PATH).await {
            Ok(value) => {
                self.summaries = parse_summaries(&value);
            }
            Err(err) => {
                self.notifier.notify_error("Conversations unavailable", &err);
            }
        }
        self.summaries.clone()
    }

    // ── Filtering and paging ────────────────────────────────────────

    /// Replace the filter; resets to the first page.
    pub fn set_filter(&mut self, filter: FeedFilter) {
        self.filter = filter;
        self.page = 0;
    }

    fn filtered(&self) -> Vec<WebhookMessage> {
        self.messages
            .iter()
            .filter(|m| self.filter.matches(m))
            .cloned()
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// The current page of the filtered feed.
    pub fn page_view(&self) -> FeedPage {
        let filtered = self.filtered();
        let info = PageInfo::compute(filtered.len(), self.page, PAGE_SIZE);
        let items = paginate(&filtered, info.page, PAGE_SIZE).to_vec();
        FeedPage {
            items,
            page_numbers: info.window(PAGE_WINDOW),
            range_label: info.range_label(),
            page_info: info,
        }
    }

    // ── Manual reply (two-phase around the network call) ────────────

    /// Validate and claim the reply slot.
    pub fn begin_reply(
        &self,
        to: &str,
        body: &str,
    ) -> WamResult<(BackendClient, serde_json::Value, InFlightToken)> {
        if to.trim().is_empty() {
            return Err(WamError::validation("Recipient phone number is required"));
        }
        if body.trim().is_empty() {
            return Err(WamError::validation("Reply text is required"));
        }
        let token = self.inflight.try_begin("send-reply")?;
        let payload = serde_json::json!({
            "to": to.trim(),
            "body": body.trim(),
        });
        Ok((self.client.clone(), payload, token))
    }

    /// Record the reply result. The caller re-fetches the feed after a
    /// success so the new exchange shows up.
    pub fn finish_reply(
        &mut self,
        outcome: WamResult<serde_json::Value>,
        token: InFlightToken,
    ) -> WamResult<()> {
        drop(token);
        match outcome {
            Ok(_) => {
                self.notifier.success("Reply sent", "The message is on its way");
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Reply failed", &err);
                Err(err)
            }
        }
    }
}
