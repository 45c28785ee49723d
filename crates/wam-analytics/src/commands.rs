//! Tauri command handlers for the analytics dashboard.
//!
//! Commands follow the `analytics_*` naming convention.

use crate::service::AnalyticsServiceState;
use crate::types::{CampaignRow, DashboardSummary};
use tauri::State;

/// Re-fetch both analytics feeds and return the rollup.
#[tauri::command]
pub async fn analytics_refresh(
    state: State<'_, AnalyticsServiceState>,
    top_n: Option<usize>,
) -> Result<DashboardSummary, String> {
    let mut svc = state.lock().await;
    svc.refresh().await;
    Ok(svc.dashboard(top_n))
}

/// The rollup over already-loaded numbers.
#[tauri::command]
pub async fn analytics_dashboard(
    state: State<'_, AnalyticsServiceState>,
    top_n: Option<usize>,
) -> Result<DashboardSummary, String> {
    let svc = state.lock().await;
    Ok(svc.dashboard(top_n))
}

/// Every campaign row with computed rates.
#[tauri::command]
pub async fn analytics_campaigns(
    state: State<'_, AnalyticsServiceState>,
) -> Result<Vec<CampaignRow>, String> {
    let svc = state.lock().await;
    Ok(svc.campaign_rows())
}
