//! # wam-content: AI content generation for the WhatsApp Marketing Console
//!
//! ## Features
//!
//! - **Configuration** – category, tone, length, keyword dial and brand
//!   voice, with topic + audience as the only required fields
//! - **Generation** – one POST per trigger against the text or
//!   text-plus-image endpoint, image failures demoted to warnings
//! - **Cleanup** – fixed-pattern removal of assistant boilerplate from
//!   returned text, counts recomputed after cleanup
//! - **Review / edit** – shadow-copy editing with live counts, commit on
//!   save, byte-exact restore on cancel

pub mod types;
pub mod sanitize;
pub mod generator;
pub mod review;
pub mod service;
pub mod commands;

// Re-exports for the campaign wizard and the main app crate.
pub use generator::{ContentGenerator, GenerationOutcome};
pub use review::{LiveCounts, ReviewSession};
pub use service::{ContentService, ContentServiceState};
pub use types::{BrandVoice, ContentConfig, GeneratedContent};
