//! Backend-mirrored account records.

use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use wam_core::parse_rows;

/// Account lifecycle status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Pending,
    Verified,
    Active,
    Suspended,
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Pending
    }
}

/// Sandbox or production. Only Twilio and GupShup offer a sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountEnvironment {
    Production,
    Sandbox,
}

impl Default for AccountEnvironment {
    fn default() -> Self {
        AccountEnvironment::Production
    }
}

/// One registered sender identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAccount {
    pub id: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default)]
    pub environment: AccountEnvironment,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Parse the account list response (bare array or wrapped).
pub fn parse_accounts(value: &serde_json::Value) -> Vec<BusinessAccount> {
    parse_rows(value, "account row")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_rows() {
        let value = serde_json::json!([
            {"id": "a1", "businessName": "Alfa", "provider": "META", "status": "ACTIVE"},
            {"businessName": "no id"},
            {"id": "a2", "businessName": "Boreal", "provider": "360DIALOG"}
        ]);
        let accounts = parse_accounts(&value);
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].provider, Some(Provider::Meta));
        assert_eq!(accounts[0].status, AccountStatus::Active);
        assert_eq!(accounts[1].provider, Some(Provider::Dialog360));
        assert_eq!(accounts[1].status, AccountStatus::Pending);
    }

    #[test]
    fn test_unknown_shape_yields_empty() {
        assert!(parse_accounts(&serde_json::json!({"success": true})).is_empty());
    }
}
