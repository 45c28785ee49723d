//! # wam-core: Shared plumbing for the WhatsApp Marketing Console
//!
//! Everything the domain crates have in common:
//!
//! - **Configuration** – backend connection settings with env overrides
//! - **Backend client** – bearer-authenticated, single-attempt JSON client
//!   for the CRM REST API
//! - **Errors** – serialisable `WamError` taxonomy shared across crates
//! - **Notifications** – the `Notifier` capability behind which toasts are
//!   raised, plus an in-memory recorder for tests
//! - **Pagination** – windowed page models and in-memory slicing
//! - **Guards** – one-in-flight action tokens and the destructive-action
//!   confirmation phrase

pub mod client;
pub mod config;
pub mod error;
pub mod guards;
pub mod notify;
pub mod paging;

// Re-exports for the domain crates.
pub use client::{parse_rows, response_rows, BackendClient};
pub use config::ConsoleConfig;
pub use error::{WamError, WamErrorCode, WamResult};
pub use guards::{confirm_destructive, InFlight, InFlightToken, DELETE_CONFIRMATION};
pub use notify::{MemoryNotifier, Notice, NoticeKind, Notifier};
pub use paging::{paginate, PageInfo};
