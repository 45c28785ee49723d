//! Read-only records mirrored from the webhook feed.

use serde::{Deserialize, Serialize};
use wam_core::parse_rows;

/// Feed entry direction: an inbound user message or a provider status
/// callback for an outbound one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Inbound,
    Status,
}

/// One webhook event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookMessage {
    pub id: String,
    pub direction: Direction,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default = "default_message_type")]
    pub message_type: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub received_at: Option<String>,
}

fn default_message_type() -> String {
    "text".to_string()
}

/// One conversation row for the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub contact_phone: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_at: Option<String>,
    #[serde(default)]
    pub unread: u64,
    #[serde(default)]
    pub total_messages: u64,
}

/// Parse the webhook feed response (bare array or wrapped).
pub fn parse_messages(value: &serde_json::Value) -> Vec<WebhookMessage> {
    parse_rows(value, "webhook message")
}

/// Parse the conversation-summary response.
pub fn parse_summaries(value: &serde_json::Value) -> Vec<ConversationSummary> {
    parse_rows(value, "conversation summary")
}
