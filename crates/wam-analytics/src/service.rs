//! Analytics service: fetches the two analytics feeds and assembles
//! the dashboard rollup.

use crate::types::{
    parse_performance, parse_summary, CampaignPerformance, CampaignRow, DashboardSummary,
    MessagingStats,
};
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;
use wam_core::{BackendClient, Notifier};

pub const SUMMARY_PATH: &str = "api/v1/whatsapp/analytics/summary";
pub const CAMPAIGN_STATS_PATH: &str = "api/v1/whatsapp/analytics/campaigns";

/// Campaigns shown in the dashboard's top list.
const DEFAULT_TOP_N: usize = 5;

/// Shared service state, managed by Tauri.
pub type AnalyticsServiceState = Arc<Mutex<AnalyticsService>>;

/// The analytics service.
pub struct AnalyticsService {
    client: BackendClient,
    notifier: Arc<dyn Notifier>,
    stats: MessagingStats,
    total_conversations: u64,
    active_campaigns: u64,
    performance: Vec<CampaignPerformance>,
}

impl AnalyticsService {
    /// Create a new service wrapped in an Arc<Mutex>.
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>) -> AnalyticsServiceState {
        Arc::new(Mutex::new(Self::with_parts(client, notifier)))
    }

    pub(crate) fn with_parts(client: BackendClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            stats: MessagingStats::default(),
            total_conversations: 0,
            active_campaigns: 0,
            performance: Vec::new(),
        }
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Fetch both analytics feeds. Each fails independently; stale
    /// numbers stay on screen when a fetch fails.
    pub async fn refresh(&mut self) {
        match self.client.get(SUMMARY_PATH).await {
            Ok(value) => {
                let (stats, conversations, active) = parse_summary(&value);
                self.stats = stats;
                self.total_conversations = conversations;
                self.active_campaigns = active;
            }
            Err(err) => {
                self.notifier.notify_error("Analytics summary unavailable", &err);
            }
        }
        match self.client.get(CAMPAIGN_STATS_PATH).await {
            Ok(value) => {
                self.performance = parse_performance(&value);
                info!("Loaded stats for {} campaigns", self.performance.len());
            }
            Err(err) => {
                self.notifier
                    .notify_error("Campaign analytics unavailable", &err);
            }
        }
    }

    // ── Rollup ──────────────────────────────────────────────────────

    /// Every campaign row with its computed rates, in backend order.
    pub fn campaign_rows(&self) -> Vec<CampaignRow> {
        self.performance.iter().cloned().map(CampaignRow::from).collect()
    }

    /// The dashboard rollup; top campaigns ordered by delivered count.
    pub fn dashboard(&self, top_n: Option<usize>) -> DashboardSummary {
        let n = top_n.unwrap_or(DEFAULT_TOP_N);
        let mut ranked: Vec<&CampaignPerformance> = self.performance.iter().collect();
        ranked.sort_by(|a, b| b.delivered.cmp(&a.delivered).then(a.name.cmp(&b.name)));
        let top_campaigns = ranked
            .into_iter()
            .take(n)
            .cloned()
            .map(CampaignRow::from)
            .collect();
        DashboardSummary {
            stats: self.stats,
            delivery_rate: self.stats.delivery_rate(),
            read_rate: self.stats.read_rate(),
            total_conversations: self.total_conversations,
            active_campaigns: self.active_campaigns,
            top_campaigns,
        }
    }
}
