//! # wam-templates: message templates for the WhatsApp Marketing Console
//!
//! ## Features
//!
//! - **CRUD** – create, update and delete against the backend, list
//!   re-fetched after every mutation; deletion gated by the typed
//!   confirmation phrase
//! - **Preview** – `{{name}}` and positional `{{1}}` substitution with
//!   unresolved tokens left visible in the rendered output
//! - **Test send** – render-then-send to a single phone, one in flight
//!   at a time

pub mod types;
pub mod preview;
pub mod service;
pub mod commands;

// Re-exports for the main app crate.
pub use preview::VariableScanner;
pub use service::{TemplatePreview, TemplatesService, TemplatesServiceState};
pub use types::{MessageTemplate, TemplateCategory, TemplateDraft, TemplateStatus};
