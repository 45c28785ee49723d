//! The four supported WhatsApp provider integrations and their
//! statically declared credential requirements.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A provider integration. Wire values match the backend enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provider {
    Meta,
    Twilio,
    Gupshup,
    #[serde(rename = "360DIALOG")]
    Dialog360,
}

/// One credential form field. `secret` marks values the form renders
/// masked.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialField {
    pub key: &'static str,
    pub label: &'static str,
    pub secret: bool,
}

const META_FIELDS: &[CredentialField] = &[
    CredentialField { key: "accessToken", label: "Access Token", secret: true },
    CredentialField { key: "phoneNumberId", label: "Phone Number ID", secret: false },
    CredentialField { key: "businessAccountId", label: "Business Account ID", secret: false },
];

const TWILIO_FIELDS: &[CredentialField] = &[
    CredentialField { key: "accountSid", label: "Account SID", secret: false },
    CredentialField { key: "authToken", label: "Auth Token", secret: true },
    CredentialField { key: "messagingServiceSid", label: "Messaging Service SID", secret: false },
];

const GUPSHUP_FIELDS: &[CredentialField] = &[
    CredentialField { key: "apiKey", label: "API Key", secret: true },
    CredentialField { key: "appName", label: "App Name", secret: false },
];

const DIALOG360_FIELDS: &[CredentialField] = &[
    CredentialField { key: "apiKey", label: "API Key", secret: true },
    CredentialField { key: "channelId", label: "Channel ID", secret: false },
];

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Meta,
        Provider::Twilio,
        Provider::Gupshup,
        Provider::Dialog360,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Meta => "Meta (WhatsApp Cloud API)",
            Provider::Twilio => "Twilio",
            Provider::Gupshup => "GupShup",
            Provider::Dialog360 => "360Dialog",
        }
    }

    /// Fields the credential step requires for this provider.
    pub fn required_fields(&self) -> &'static [CredentialField] {
        match self {
            Provider::Meta => META_FIELDS,
            Provider::Twilio => TWILIO_FIELDS,
            Provider::Gupshup => GUPSHUP_FIELDS,
            Provider::Dialog360 => DIALOG360_FIELDS,
        }
    }

    /// Whether the provider offers a sandbox environment.
    pub fn supports_sandbox(&self) -> bool {
        matches!(self, Provider::Twilio | Provider::Gupshup)
    }
}

/// Catalog entry for the provider-selection step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub provider: Provider,
    pub display_name: &'static str,
    pub supports_sandbox: bool,
    pub fields: &'static [CredentialField],
}

/// Static metadata for every provider.
pub fn catalog() -> Vec<ProviderInfo> {
    Provider::ALL
        .iter()
        .map(|p| ProviderInfo {
            provider: *p,
            display_name: p.display_name(),
            supports_sandbox: p.supports_sandbox(),
            fields: p.required_fields(),
        })
        .collect()
}

fn has(fields: &HashMap<String, String>, key: &str) -> bool {
    fields.get(key).map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Infer the provider from which credential keys carry values. Shared
/// by the setup wizard and the account editor; checked in a fixed
/// order, with 360Dialog before GupShup since both use `apiKey`.
pub fn detect_provider(fields: &HashMap<String, String>) -> Option<Provider> {
    if has(fields, "accessToken") && has(fields, "phoneNumberId") {
        Some(Provider::Meta)
    } else if has(fields, "accountSid") && has(fields, "authToken") {
        Some(Provider::Twilio)
    } else if has(fields, "apiKey") && has(fields, "channelId") {
        Some(Provider::Dialog360)
    } else if has(fields, "apiKey") && has(fields, "appName") {
        Some(Provider::Gupshup)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_detect_each_provider() {
        assert_eq!(
            detect_provider(&fields(&[("accessToken", "t"), ("phoneNumberId", "1")])),
            Some(Provider::Meta)
        );
        assert_eq!(
            detect_provider(&fields(&[("accountSid", "AC1"), ("authToken", "x")])),
            Some(Provider::Twilio)
        );
        assert_eq!(
            detect_provider(&fields(&[("apiKey", "k"), ("channelId", "c")])),
            Some(Provider::Dialog360)
        );
        assert_eq!(
            detect_provider(&fields(&[("apiKey", "k"), ("appName", "app")])),
            Some(Provider::Gupshup)
        );
    }

    #[test]
    fn test_detect_ignores_blank_values() {
        assert_eq!(
            detect_provider(&fields(&[("accessToken", "  "), ("phoneNumberId", "1")])),
            None
        );
        assert_eq!(detect_provider(&HashMap::new()), None);
    }

    #[test]
    fn test_dialog360_wins_over_gupshup_on_channel_id() {
        // apiKey plus both discriminators: channelId decides
        let f = fields(&[("apiKey", "k"), ("channelId", "c"), ("appName", "a")]);
        assert_eq!(detect_provider(&f), Some(Provider::Dialog360));
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_value(Provider::Dialog360).unwrap(),
            serde_json::json!("360DIALOG")
        );
        assert_eq!(
            serde_json::to_value(Provider::Meta).unwrap(),
            serde_json::json!("META")
        );
        let p: Provider = serde_json::from_value(serde_json::json!("360DIALOG")).unwrap();
        assert_eq!(p, Provider::Dialog360);
    }

    #[test]
    fn test_sandbox_support() {
        assert!(Provider::Twilio.supports_sandbox());
        assert!(Provider::Gupshup.supports_sandbox());
        assert!(!Provider::Meta.supports_sandbox());
        assert!(!Provider::Dialog360.supports_sandbox());
    }

    #[test]
    fn test_catalog_covers_all_providers() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.iter().all(|info| !info.fields.is_empty()));
    }
}
