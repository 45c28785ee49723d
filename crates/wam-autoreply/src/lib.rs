//! # wam-autoreply: auto-reply rules for the WhatsApp Marketing Console
//!
//! ## Features
//!
//! - **Rule CRUD** – create, update, delete and toggle against the
//!   backend, list re-fetched after every mutation; deletion gated by
//!   the typed confirmation phrase
//! - **Matching ladder** – exact, contains, starts-with and regex
//!   comparisons, case-insensitive, lowest priority value wins
//! - **Two test paths** – an instant local preview over the cached
//!   rules and a guarded remote test against the backend
//! - **Conversation threads** – recorded inbound/reply exchanges per
//!   phone number

pub mod types;
pub mod matching;
pub mod service;
pub mod commands;

// Re-exports for the main app crate.
pub use matching::{find_matching_rule, rule_matches, MatchPreview};
pub use service::{AutoReplyService, AutoReplyServiceState};
pub use types::{AutoReplyExchange, AutoReplyRule, MatchType, RuleDraft};
