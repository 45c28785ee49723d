//! # wam-analytics: messaging analytics for the WhatsApp Marketing Console
//!
//! ## Features
//!
//! - **Messaging stats** – sent, delivered, read and failed counters
//!   with guarded delivery/read rates
//! - **Campaign performance** – per-campaign counters enriched with
//!   computed rates
//! - **Dashboard rollup** – stats, conversation totals and a client-side
//!   top-N campaign list

pub mod types;
pub mod service;
pub mod commands;

// Re-exports for the main app crate.
pub use service::{AnalyticsService, AnalyticsServiceState};
pub use types::{CampaignPerformance, CampaignRow, DashboardSummary, MessagingStats};
