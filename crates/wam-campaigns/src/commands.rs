//! Tauri command handlers for the campaign wizard.
//!
//! Commands follow the `campaigns_*` naming convention. Generation and
//! submission run outside the service lock so a second trigger fails
//! fast with "already running" instead of queueing.

use crate::schedule::{BusinessHours, BusinessHoursPreset, ScheduleData};
use crate::service::{CampaignWizardState, WizardView, CAMPAIGNS_PATH};
use crate::types::{CampaignSubmitResult, CampaignSummary, TrackingOptions};
use crate::wizard::WizardStep;
use tauri::State;
use wam_content::{ContentConfig, GeneratedContent, LiveCounts};

// Helper to map WamError → String for Tauri.
macro_rules! map_err {
    ($expr:expr) => {
        $expr.map_err(|e| e.to_string())
    };
}

/// Full wizard snapshot for the webview.
#[tauri::command]
pub async fn campaigns_view(state: State<'_, CampaignWizardState>) -> Result<WizardView, String> {
    let svc = state.lock().await;
    Ok(svc.view())
}

/// Advance one step if the current gate passes.
#[tauri::command]
pub async fn campaigns_next(state: State<'_, CampaignWizardState>) -> Result<WizardView, String> {
    let mut svc = state.lock().await;
    map_err!(svc.try_advance())?;
    Ok(svc.view())
}

/// Step back; never gated.
#[tauri::command]
pub async fn campaigns_back(state: State<'_, CampaignWizardState>) -> Result<WizardView, String> {
    let mut svc = state.lock().await;
    svc.back();
    Ok(svc.view())
}

/// Jump to a step from the header.
#[tauri::command]
pub async fn campaigns_goto(
    state: State<'_, CampaignWizardState>,
    step: WizardStep,
) -> Result<WizardView, String> {
    let mut svc = state.lock().await;
    map_err!(svc.goto(step))?;
    Ok(svc.view())
}

/// Set the campaign name.
#[tauri::command]
pub async fn campaigns_set_name(
    state: State<'_, CampaignWizardState>,
    name: String,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_name(name);
    Ok(())
}

/// Replace the content form; echoes the clamped result.
#[tauri::command]
pub async fn campaigns_set_config(
    state: State<'_, CampaignWizardState>,
    config: ContentConfig,
) -> Result<ContentConfig, String> {
    let mut svc = state.lock().await;
    Ok(svc.set_config(config))
}

/// Pick the sending business account.
#[tauri::command]
pub async fn campaigns_set_account(
    state: State<'_, CampaignWizardState>,
    account_id: Option<String>,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_account(account_id);
    Ok(())
}

/// Run a generation round-trip inside the wizard.
#[tauri::command]
pub async fn campaigns_generate(
    state: State<'_, CampaignWizardState>,
) -> Result<GeneratedContent, String> {
    let (generator, config, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_generate())?
    };
    let outcome = generator.generate(&config).await;
    let mut svc = state.lock().await;
    map_err!(svc.finish_generate(outcome, token))
}

/// Seed the wizard with content generated elsewhere.
#[tauri::command]
pub async fn campaigns_set_generated(
    state: State<'_, CampaignWizardState>,
    content: GeneratedContent,
) -> Result<WizardView, String> {
    let mut svc = state.lock().await;
    svc.set_generated(content);
    Ok(svc.view())
}

/// Open the inline editor; returns the text to edit.
#[tauri::command]
pub async fn campaigns_begin_edit(
    state: State<'_, CampaignWizardState>,
) -> Result<String, String> {
    let mut svc = state.lock().await;
    map_err!(svc.begin_edit())
}

/// Update the in-edit draft; returns live counts.
#[tauri::command]
pub async fn campaigns_update_draft(
    state: State<'_, CampaignWizardState>,
    text: String,
) -> Result<LiveCounts, String> {
    let mut svc = state.lock().await;
    map_err!(svc.update_draft(text))
}

/// Commit the draft.
#[tauri::command]
pub async fn campaigns_save_edit(
    state: State<'_, CampaignWizardState>,
) -> Result<GeneratedContent, String> {
    let mut svc = state.lock().await;
    map_err!(svc.save_edit())
}

/// Discard the draft.
#[tauri::command]
pub async fn campaigns_cancel_edit(
    state: State<'_, CampaignWizardState>,
) -> Result<GeneratedContent, String> {
    let mut svc = state.lock().await;
    map_err!(svc.cancel_edit())
}

/// Drop generated content and return to the generation step.
#[tauri::command]
pub async fn campaigns_regenerate(
    state: State<'_, CampaignWizardState>,
) -> Result<WizardView, String> {
    let mut svc = state.lock().await;
    svc.regenerate();
    Ok(svc.view())
}

/// Replace the recipient id list.
#[tauri::command]
pub async fn campaigns_set_recipients(
    state: State<'_, CampaignWizardState>,
    ids: Vec<String>,
) -> Result<usize, String> {
    let mut svc = state.lock().await;
    map_err!(svc.set_recipients(ids))
}

/// Replace the schedule; returns its human summary.
#[tauri::command]
pub async fn campaigns_set_schedule(
    state: State<'_, CampaignWizardState>,
    schedule: ScheduleData,
) -> Result<String, String> {
    let mut svc = state.lock().await;
    map_err!(svc.set_schedule(schedule))
}

/// Summary line for the current schedule.
#[tauri::command]
pub async fn campaigns_schedule_summary(
    state: State<'_, CampaignWizardState>,
) -> Result<String, String> {
    let svc = state.lock().await;
    Ok(svc.schedule_summary())
}

/// Business-hours window for a named preset.
#[tauri::command]
pub async fn campaigns_business_hours_preset(
    preset: BusinessHoursPreset,
) -> Result<BusinessHours, String> {
    Ok(BusinessHours::preset(preset))
}

/// Replace tracking options.
#[tauri::command]
pub async fn campaigns_set_tracking(
    state: State<'_, CampaignWizardState>,
    tracking: TrackingOptions,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_tracking(tracking);
    Ok(())
}

/// Validate, submit, and on success reset the wizard.
#[tauri::command]
pub async fn campaigns_submit(
    state: State<'_, CampaignWizardState>,
) -> Result<CampaignSubmitResult, String> {
    let (client, payload, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_submit())?
    };
    let result = client.post_json(CAMPAIGNS_PATH, &payload).await;
    let mut svc = state.lock().await;
    map_err!(svc.finish_submit(result, token))
}

/// Existing campaigns for the dashboard list.
#[tauri::command]
pub async fn campaigns_list(
    state: State<'_, CampaignWizardState>,
) -> Result<Vec<CampaignSummary>, String> {
    let svc = state.lock().await;
    map_err!(svc.list_campaigns().await)
}

/// Abandon the draft and start over.
#[tauri::command]
pub async fn campaigns_reset(state: State<'_, CampaignWizardState>) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.reset();
    Ok(())
}
