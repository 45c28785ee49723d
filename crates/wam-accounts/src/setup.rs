//! The account-setup wizard's step machine and form state.
//!
//! Seven explicit steps with one shared completion table; forward moves
//! pass through a gate, backward jumps are free. Both the full wizard
//! and the compact editor drive this same machine.

use crate::provider::Provider;
use crate::types::AccountEnvironment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// The seven setup steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SetupStep {
    BusinessInfo,
    ProviderSelection,
    Credentials,
    PhoneVerification,
    ApiConfig,
    WebhookConfig,
    Testing,
}

impl SetupStep {
    pub const ALL: [SetupStep; 7] = [
        SetupStep::BusinessInfo,
        SetupStep::ProviderSelection,
        SetupStep::Credentials,
        SetupStep::PhoneVerification,
        SetupStep::ApiConfig,
        SetupStep::WebhookConfig,
        SetupStep::Testing,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<SetupStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<SetupStep> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            SetupStep::BusinessInfo => "Business Info",
            SetupStep::ProviderSelection => "Provider",
            SetupStep::Credentials => "Credentials",
            SetupStep::PhoneVerification => "Phone Verification",
            SetupStep::ApiConfig => "API Settings",
            SetupStep::WebhookConfig => "Webhooks",
            SetupStep::Testing => "Test & Finish",
        }
    }
}

/// The whole setup form. Serialized as-is to the setup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupForm {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub business_description: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub environment: AccountEnvironment,
    #[serde(default)]
    pub credentials: HashMap<String, String>,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub phone_verified: bool,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default)]
    pub webhook_verify_token: String,
    #[serde(default)]
    pub test_passed: bool,
}

fn default_api_version() -> String {
    "v1".to_string()
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            business_description: String::new(),
            industry: String::new(),
            provider: None,
            environment: AccountEnvironment::Production,
            credentials: HashMap::new(),
            phone_number: String::new(),
            phone_verified: false,
            api_version: default_api_version(),
            webhook_url: String::new(),
            webhook_verify_token: String::new(),
            test_passed: false,
        }
    }
}

impl SetupForm {
    fn credential_filled(&self, key: &str) -> bool {
        self.credentials
            .get(key)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    }

    fn webhook_url_valid(&self) -> bool {
        match Url::parse(self.webhook_url.trim()) {
            Ok(url) => matches!(url.scheme(), "http" | "https"),
            Err(_) => false,
        }
    }
}

/// The shared per-step completion table. Every navigation rule and both
/// wizard variants consult this one function.
pub fn step_complete(step: SetupStep, form: &SetupForm) -> bool {
    match step {
        SetupStep::BusinessInfo => {
            !form.business_name.trim().is_empty() && !form.industry.trim().is_empty()
        }
        SetupStep::ProviderSelection => form.provider.is_some(),
        SetupStep::Credentials => match form.provider {
            Some(provider) => provider
                .required_fields()
                .iter()
                .all(|field| form.credential_filled(field.key)),
            None => false,
        },
        SetupStep::PhoneVerification => form.phone_verified,
        SetupStep::ApiConfig => !form.api_version.trim().is_empty(),
        SetupStep::WebhookConfig => {
            form.webhook_url_valid() && !form.webhook_verify_token.trim().is_empty()
        }
        SetupStep::Testing => form.test_passed,
    }
}

/// Gate message for an incomplete step.
pub fn gate_message(step: SetupStep) -> &'static str {
    match step {
        SetupStep::BusinessInfo => "Business name and industry are required",
        SetupStep::ProviderSelection => "Pick a provider",
        SetupStep::Credentials => "Fill in every credential field for the provider",
        SetupStep::PhoneVerification => "Verify the phone number first",
        SetupStep::ApiConfig => "API version is required",
        SetupStep::WebhookConfig => "Webhook URL must be a valid http(s) URL and the verify token is required",
        SetupStep::Testing => "Run the connection test first",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> SetupForm {
        let mut form = SetupForm {
            business_name: "Alfa Lda".to_string(),
            industry: "Retail".to_string(),
            provider: Some(Provider::Gupshup),
            phone_number: "+351910000000".to_string(),
            phone_verified: true,
            webhook_url: "https://example.com/hooks/wa".to_string(),
            webhook_verify_token: "tok".to_string(),
            test_passed: true,
            ..Default::default()
        };
        form.credentials.insert("apiKey".to_string(), "k".to_string());
        form.credentials.insert("appName".to_string(), "alfa".to_string());
        form
    }

    #[test]
    fn test_step_order() {
        assert_eq!(SetupStep::BusinessInfo.index(), 0);
        assert_eq!(SetupStep::Testing.index(), 6);
        assert_eq!(SetupStep::Credentials.next(), Some(SetupStep::PhoneVerification));
        assert_eq!(SetupStep::Testing.next(), None);
        assert_eq!(SetupStep::BusinessInfo.prev(), None);
    }

    #[test]
    fn test_every_step_complete_on_filled_form() {
        let form = filled_form();
        for step in SetupStep::ALL {
            assert!(step_complete(step, &form), "step {:?} should be complete", step);
        }
    }

    #[test]
    fn test_credentials_require_every_provider_field() {
        let mut form = filled_form();
        form.credentials.remove("appName");
        assert!(!step_complete(SetupStep::Credentials, &form));

        // blank counts as missing
        form.credentials.insert("appName".to_string(), "  ".to_string());
        assert!(!step_complete(SetupStep::Credentials, &form));
    }

    #[test]
    fn test_credentials_incomplete_without_provider() {
        let mut form = filled_form();
        form.provider = None;
        assert!(!step_complete(SetupStep::Credentials, &form));
    }

    #[test]
    fn test_webhook_step_requires_http_url() {
        let mut form = filled_form();
        form.webhook_url = "not a url".to_string();
        assert!(!step_complete(SetupStep::WebhookConfig, &form));

        form.webhook_url = "ftp://example.com/x".to_string();
        assert!(!step_complete(SetupStep::WebhookConfig, &form));

        form.webhook_url = "https://example.com/x".to_string();
        assert!(step_complete(SetupStep::WebhookConfig, &form));
    }
}
