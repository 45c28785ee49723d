//! Analytics records and their derived rates.
//!
//! Everything here renders a dashboard; all aggregation is client-side
//! arithmetic over backend-owned counters.

use log::warn;
use serde::{Deserialize, Serialize};
use wam_core::parse_rows;

/// Messaging counters for one period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingStats {
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub delivered: u64,
    #[serde(default)]
    pub read: u64,
    #[serde(default)]
    pub failed: u64,
}

impl MessagingStats {
    /// Delivered as a percentage of sent; 0 when nothing was sent.
    pub fn delivery_rate(&self) -> f64 {
        percentage(self.delivered, self.sent)
    }

    /// Read as a percentage of delivered; 0 when nothing was delivered.
    pub fn read_rate(&self) -> f64 {
        percentage(self.read, self.delivered)
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Per-campaign counters for the performance table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPerformance {
    pub campaign_id: String,
    pub name: String,
    #[serde(default)]
    pub recipients: u64,
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub delivered: u64,
    #[serde(default)]
    pub read: u64,
    #[serde(default)]
    pub replied: u64,
}

impl CampaignPerformance {
    pub fn delivery_rate(&self) -> f64 {
        percentage(self.delivered, self.sent)
    }

    pub fn read_rate(&self) -> f64 {
        percentage(self.read, self.delivered)
    }
}

/// One campaign row enriched with its computed rates for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRow {
    #[serde(flatten)]
    pub performance: CampaignPerformance,
    pub delivery_rate: f64,
    pub read_rate: f64,
}

impl From<CampaignPerformance> for CampaignRow {
    fn from(performance: CampaignPerformance) -> Self {
        Self {
            delivery_rate: performance.delivery_rate(),
            read_rate: performance.read_rate(),
            performance,
        }
    }
}

/// The assembled dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: MessagingStats,
    pub delivery_rate: f64,
    pub read_rate: f64,
    pub total_conversations: u64,
    pub active_campaigns: u64,
    pub top_campaigns: Vec<CampaignRow>,
}

/// Parse the summary response; counters live either at the top level
/// or under `data`.
pub fn parse_summary(value: &serde_json::Value) -> (MessagingStats, u64, u64) {
    let root = if value["data"].is_object() {
        &value["data"]
    } else {
        value
    };
    let stats = serde_json::from_value::<MessagingStats>(root.clone()).unwrap_or_else(|e| {
        warn!("Analytics summary not in expected shape: {}", e);
        MessagingStats::default()
    });
    let conversations = root["totalConversations"].as_u64().unwrap_or(0);
    let active = root["activeCampaigns"].as_u64().unwrap_or(0);
    (stats, conversations, active)
}

/// Parse the campaign performance response (bare array or wrapped).
pub fn parse_performance(value: &serde_json::Value) -> Vec<CampaignPerformance> {
    parse_rows(value, "campaign stats row")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_guard_zero_denominators() {
        let empty = MessagingStats::default();
        assert_eq!(empty.delivery_rate(), 0.0);
        assert_eq!(empty.read_rate(), 0.0);

        let stats = MessagingStats { sent: 200, delivered: 150, read: 75, failed: 10 };
        assert_eq!(stats.delivery_rate(), 75.0);
        assert_eq!(stats.read_rate(), 50.0);
    }

    #[test]
    fn test_parse_summary_either_shape() {
        let wrapped = serde_json::json!({
            "data": {"sent": 10, "delivered": 9, "read": 3, "failed": 1, "totalConversations": 4}
        });
        let (stats, conversations, _) = parse_summary(&wrapped);
        assert_eq!(stats.delivered, 9);
        assert_eq!(conversations, 4);

        let bare = serde_json::json!({"sent": 5, "delivered": 5, "read": 5, "failed": 0});
        let (stats, _, _) = parse_summary(&bare);
        assert_eq!(stats.read, 5);
    }

    #[test]
    fn test_row_carries_computed_rates() {
        let row: CampaignRow = CampaignPerformance {
            campaign_id: "c1".to_string(),
            name: "June sale".to_string(),
            recipients: 100,
            sent: 100,
            delivered: 80,
            read: 40,
            replied: 5,
        }
        .into();
        assert_eq!(row.delivery_rate, 80.0);
        assert_eq!(row.read_rate, 50.0);
    }
}
