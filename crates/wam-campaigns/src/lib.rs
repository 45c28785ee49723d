//! # wam-campaigns: campaign wizard for the WhatsApp Marketing Console
//!
//! ## Features
//!
//! - **Five-step wizard** – configure, generate, review, recipients,
//!   schedule; forward moves pass a per-step gate, backward moves are
//!   free
//! - **Scheduling** – immediate, one-shot, daily, weekly, monthly and
//!   custom schedules with recurrence, business-hours windows and smart
//!   timing flags, summarised in one human-readable line
//! - **Submission** – one POST per launch with recipients, message and
//!   verbatim schedule data nested under `variables`; success resets the
//!   wizard for the next draft
//! - **Dashboard list** – existing campaigns fetched for the overview
//!   table

pub mod types;
pub mod wizard;
pub mod schedule;
pub mod service;
pub mod commands;

// Re-exports for the main app crate.
pub use schedule::{BusinessHours, BusinessHoursPreset, ScheduleData, ScheduleType};
pub use service::{CampaignWizard, CampaignWizardState, WizardView};
pub use types::{CampaignSubmitResult, CampaignSummary, TrackingOptions};
pub use wizard::WizardStep;
