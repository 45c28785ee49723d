//! # wam-inbox: webhook inbox for the WhatsApp Marketing Console
//!
//! ## Features
//!
//! - **Read-only feed** – inbound messages and provider status
//!   callbacks from the webhook log
//! - **Client-side filtering** – direction and free-text search over
//!   parties, body and status, paged in memory
//! - **Conversation summaries** – per-phone rollups for the sidebar
//! - **Manual reply** – one guarded send at a time, feed re-fetched on
//!   success

pub mod types;
pub mod service;
pub mod commands;

// Re-exports for the main app crate.
pub use service::{FeedFilter, FeedPage, InboxService, InboxServiceState};
pub use types::{ConversationSummary, Direction, WebhookMessage};
