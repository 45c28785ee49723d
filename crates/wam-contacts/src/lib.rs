//! # wam-contacts: Contact directory for the WhatsApp Marketing Console
//!
//! ## Features
//!
//! - **Directory** – contacts and companies fetched independently, with a
//!   built-in demo dataset as offline fallback
//! - **Filters** – free-text search, company scope, and contact-method
//!   requirement, composable with AND
//! - **Selection** – capped, insertion-ordered recipient selection with
//!   asymmetric page/whole-set bulk operations
//! - **Paging** – client-side paging of the filtered dataset

pub mod types;
pub mod filter;
pub mod selection;
pub mod directory;
pub mod service;
pub mod commands;

// Re-export for use in the main app crate.
pub use service::{ContactsService, ContactsServiceState};
