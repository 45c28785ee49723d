//! Campaign types outside the wizard machine itself.

use serde::{Deserialize, Serialize};
use wam_core::parse_rows;

/// Tracking flags collected on the schedule step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingOptions {
    pub track_opens: bool,
    pub track_clicks: bool,
    #[serde(default)]
    pub utm_campaign: Option<String>,
}

impl Default for TrackingOptions {
    fn default() -> Self {
        Self {
            track_opens: true,
            track_clicks: true,
            utm_campaign: None,
        }
    }
}

/// Campaign row for the dashboard list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub recipients: Option<u64>,
    #[serde(default)]
    pub scheduled_for: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSubmitResult {
    pub id: Option<String>,
    pub name: String,
}

/// Parse the campaign list response (bare array or wrapped).
pub fn parse_campaigns(value: &serde_json::Value) -> Vec<CampaignSummary> {
    parse_rows(value, "campaign row")
}
