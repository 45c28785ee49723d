//! # wam-accounts: business-account provisioning for the WhatsApp Marketing Console
//!
//! ## Features
//!
//! - **Four providers** – Meta, Twilio, GupShup and 360Dialog, each with
//!   a statically declared credential field list and a sandbox toggle
//!   where the provider offers one
//! - **Provider detection** – one shared pure function inferring the
//!   provider from which credential fields carry values
//! - **Seven-step wizard** – business info, provider, credentials,
//!   phone verification, API settings, webhooks, test; one completion
//!   table drives gating for every caller
//! - **Verification strategies** – live verification posts to the
//!   backend; sandbox short-circuits with a fixed demo code behind the
//!   same trait

pub mod provider;
pub mod types;
pub mod setup;
pub mod verification;
pub mod service;
pub mod commands;

// Re-exports for the main app crate.
pub use provider::{catalog, detect_provider, CredentialField, Provider, ProviderInfo};
pub use service::{AccountsService, AccountsServiceState, SetupView};
pub use setup::{step_complete, SetupForm, SetupStep};
pub use types::{AccountEnvironment, AccountStatus, BusinessAccount};
pub use verification::{strategy_for, SandboxVerification, VerificationStrategy, SANDBOX_CODE};
