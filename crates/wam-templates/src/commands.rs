//! Tauri command handlers for message templates.
//!
//! Commands follow the `templates_*` naming convention. The test send
//! runs outside the service lock so a second trigger fails fast.

use crate::service::{TemplatePreview, TemplatesServiceState, TEST_MESSAGE_PATH};
use crate::types::{MessageTemplate, TemplateDraft};
use std::collections::HashMap;
use tauri::State;

// Helper to map WamError → String for Tauri.
macro_rules! map_err {
    ($expr:expr) => {
        $expr.map_err(|e| e.to_string())
    };
}

/// Fetch the template list.
#[tauri::command]
pub async fn templates_list(
    state: State<'_, TemplatesServiceState>,
) -> Result<Vec<MessageTemplate>, String> {
    let mut svc = state.lock().await;
    Ok(svc.load_templates().await)
}

/// Look up one template from the cached list.
#[tauri::command]
pub async fn templates_get(
    state: State<'_, TemplatesServiceState>,
    id: String,
) -> Result<Option<MessageTemplate>, String> {
    let svc = state.lock().await;
    Ok(svc.find(&id))
}

/// Create a template from the editor draft.
#[tauri::command]
pub async fn templates_create(
    state: State<'_, TemplatesServiceState>,
    draft: TemplateDraft,
) -> Result<Vec<MessageTemplate>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.create_template(draft).await)?;
    Ok(svc.templates())
}

/// Update a template from the editor draft.
#[tauri::command]
pub async fn templates_update(
    state: State<'_, TemplatesServiceState>,
    id: String,
    draft: TemplateDraft,
) -> Result<Vec<MessageTemplate>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.update_template(&id, draft).await)?;
    Ok(svc.templates())
}

/// Delete a template after the literal confirmation phrase.
#[tauri::command]
pub async fn templates_delete(
    state: State<'_, TemplatesServiceState>,
    id: String,
    confirmation: String,
) -> Result<Vec<MessageTemplate>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.delete_template(&id, &confirmation).await)?;
    Ok(svc.templates())
}

/// Render an ad-hoc body against a variable map.
#[tauri::command]
pub async fn templates_preview(
    state: State<'_, TemplatesServiceState>,
    body: String,
    variables: HashMap<String, String>,
) -> Result<TemplatePreview, String> {
    let svc = state.lock().await;
    Ok(svc.preview(&body, &variables))
}

/// Render a stored template against a variable map.
#[tauri::command]
pub async fn templates_preview_stored(
    state: State<'_, TemplatesServiceState>,
    id: String,
    variables: HashMap<String, String>,
) -> Result<TemplatePreview, String> {
    let svc = state.lock().await;
    map_err!(svc.preview_template(&id, &variables))
}

/// Send a rendered body to a single phone as a test.
#[tauri::command]
pub async fn templates_test_send(
    state: State<'_, TemplatesServiceState>,
    body: String,
    variables: HashMap<String, String>,
    phone: String,
) -> Result<(), String> {
    let (client, payload, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_test_send(&body, &variables, &phone))?
    };
    let outcome = client.post_json(TEST_MESSAGE_PATH, &payload).await;
    let mut svc = state.lock().await;
    map_err!(svc.finish_test_send(outcome, token))
}
