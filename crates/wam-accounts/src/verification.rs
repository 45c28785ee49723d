//! Phone-verification strategies.
//!
//! The sandbox short-circuit lives behind one trait so the wizard has a
//! single switch point instead of scattered environment conditionals.

use crate::types::AccountEnvironment;
use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use wam_core::{BackendClient, WamResult};

pub const VERIFY_PHONE_PATH: &str = "api/v1/whatsapp/accounts/verify-phone";
pub const VERIFY_CODE_PATH: &str = "api/v1/whatsapp/accounts/verify-code";

/// Demo confirmation code accepted by the sandbox strategy.
pub const SANDBOX_CODE: &str = "000000";

/// Result of requesting a code. The sandbox strategy uses `hint` to
/// tell the user which code to type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequest {
    pub sent: bool,
    pub hint: Option<String>,
}

#[async_trait]
pub trait VerificationStrategy: Send + Sync {
    async fn request_code(&self, phone: &str) -> WamResult<CodeRequest>;
    async fn verify_code(&self, phone: &str, code: &str) -> WamResult<bool>;
}

/// Real verification through the backend.
pub struct LiveVerification {
    client: BackendClient,
}

impl LiveVerification {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VerificationStrategy for LiveVerification {
    async fn request_code(&self, phone: &str) -> WamResult<CodeRequest> {
        let body = serde_json::json!({ "phoneNumber": phone });
        self.client.post_json(VERIFY_PHONE_PATH, &body).await?;
        Ok(CodeRequest { sent: true, hint: None })
    }

    async fn verify_code(&self, phone: &str, code: &str) -> WamResult<bool> {
        let body = serde_json::json!({ "phoneNumber": phone, "code": code });
        let value = self.client.post_json(VERIFY_CODE_PATH, &body).await?;
        // an explicit `verified` flag wins; any other 2xx means verified
        Ok(value["verified"].as_bool().unwrap_or(true))
    }
}

/// Sandbox short-circuit: no network, fixed code.
pub struct SandboxVerification;

#[async_trait]
impl VerificationStrategy for SandboxVerification {
    async fn request_code(&self, phone: &str) -> WamResult<CodeRequest> {
        debug!("Sandbox verification requested for {}", phone);
        Ok(CodeRequest {
            sent: true,
            hint: Some(format!("Sandbox mode: enter code {}", SANDBOX_CODE)),
        })
    }

    async fn verify_code(&self, _phone: &str, code: &str) -> WamResult<bool> {
        Ok(code.trim() == SANDBOX_CODE)
    }
}

/// The one place that picks a strategy.
pub fn strategy_for(
    environment: AccountEnvironment,
    client: &BackendClient,
) -> Box<dyn VerificationStrategy> {
    match environment {
        AccountEnvironment::Production => Box::new(LiveVerification::new(client.clone())),
        AccountEnvironment::Sandbox => Box::new(SandboxVerification),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wam_core::ConsoleConfig;

    #[tokio::test]
    async fn test_sandbox_accepts_only_fixed_code() {
        let strategy = SandboxVerification;
        assert!(strategy.verify_code("+351910000000", "000000").await.unwrap());
        assert!(strategy.verify_code("+351910000000", " 000000 ").await.unwrap());
        assert!(!strategy.verify_code("+351910000000", "123456").await.unwrap());
        assert!(!strategy.verify_code("+351910000000", "").await.unwrap());
    }

    #[tokio::test]
    async fn test_sandbox_request_carries_hint() {
        let request = SandboxVerification.request_code("+351910000000").await.unwrap();
        assert!(request.sent);
        assert!(request.hint.unwrap().contains(SANDBOX_CODE));
    }

    #[tokio::test]
    async fn test_strategy_switch_is_environment_driven() {
        let client = BackendClient::new(&ConsoleConfig::default()).unwrap();
        let sandbox = strategy_for(AccountEnvironment::Sandbox, &client);
        assert!(sandbox.verify_code("x", SANDBOX_CODE).await.unwrap());
        // the live strategy would hit the network, so only its selection
        // is exercised here
        let _live = strategy_for(AccountEnvironment::Production, &client);
    }
}
