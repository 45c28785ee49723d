//! Tauri command handlers for AI content generation.
//!
//! Commands follow the `content_*` naming convention. Generation runs
//! outside the service lock so a second trigger while one is in flight
//! fails fast with "already running" instead of queueing.

use crate::review::LiveCounts;
use crate::service::ContentServiceState;
use crate::types::{BrandVoice, ContentConfig, GeneratedContent};
use tauri::State;

// Helper to map WamError → String for Tauri.
macro_rules! map_err {
    ($expr:expr) => {
        $expr.map_err(|e| e.to_string())
    };
}

/// Current form state.
#[tauri::command]
pub async fn content_config(
    state: State<'_, ContentServiceState>,
) -> Result<ContentConfig, String> {
    let svc = state.lock().await;
    Ok(svc.config())
}

/// Replace the form state; echoes the clamped result.
#[tauri::command]
pub async fn content_set_config(
    state: State<'_, ContentServiceState>,
    config: ContentConfig,
) -> Result<ContentConfig, String> {
    let mut svc = state.lock().await;
    Ok(svc.set_config(config))
}

/// Whether the configure step may advance.
#[tauri::command]
pub async fn content_ready(state: State<'_, ContentServiceState>) -> Result<bool, String> {
    let svc = state.lock().await;
    Ok(svc.ready())
}

/// Run a generation round-trip.
#[tauri::command]
pub async fn content_generate(
    state: State<'_, ContentServiceState>,
) -> Result<GeneratedContent, String> {
    let (generator, config, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_generate())?
    };
    let outcome = generator.generate(&config).await;
    let mut svc = state.lock().await;
    map_err!(svc.finish_generate(outcome, token))
}

/// Fetch brand-voice profiles for the dropdown.
#[tauri::command]
pub async fn content_brand_voices(
    state: State<'_, ContentServiceState>,
) -> Result<Vec<BrandVoice>, String> {
    let mut svc = state.lock().await;
    Ok(svc.load_brand_voices().await)
}

/// Committed generated content, if any.
#[tauri::command]
pub async fn content_generated(
    state: State<'_, ContentServiceState>,
) -> Result<Option<GeneratedContent>, String> {
    let svc = state.lock().await;
    Ok(svc.generated())
}

/// Open the editor; returns the text to edit.
#[tauri::command]
pub async fn content_begin_edit(
    state: State<'_, ContentServiceState>,
) -> Result<String, String> {
    let mut svc = state.lock().await;
    map_err!(svc.begin_edit())
}

/// Update the in-edit draft; returns live counts.
#[tauri::command]
pub async fn content_update_draft(
    state: State<'_, ContentServiceState>,
    text: String,
) -> Result<LiveCounts, String> {
    let mut svc = state.lock().await;
    map_err!(svc.update_draft(text))
}

/// Commit the draft.
#[tauri::command]
pub async fn content_save_edit(
    state: State<'_, ContentServiceState>,
) -> Result<GeneratedContent, String> {
    let mut svc = state.lock().await;
    map_err!(svc.save_edit())
}

/// Discard the draft.
#[tauri::command]
pub async fn content_cancel_edit(
    state: State<'_, ContentServiceState>,
) -> Result<GeneratedContent, String> {
    let mut svc = state.lock().await;
    map_err!(svc.cancel_edit())
}

/// Drop generated content so generation can run again.
#[tauri::command]
pub async fn content_discard(state: State<'_, ContentServiceState>) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.discard_generated();
    Ok(())
}

/// Reset the whole page.
#[tauri::command]
pub async fn content_clear(state: State<'_, ContentServiceState>) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.clear();
    Ok(())
}
