//! Tauri command handlers for auto-reply rules.
//!
//! Commands follow the `autoreply_*` naming convention. The remote rule
//! test runs outside the service lock so a second trigger fails fast.

use crate::matching::MatchPreview;
use crate::service::{AutoReplyServiceState, RULES_PATH};
use crate::types::{AutoReplyExchange, AutoReplyRule, RuleDraft};
use tauri::State;

// Helper to map WamError → String for Tauri.
macro_rules! map_err {
    ($expr:expr) => {
        $expr.map_err(|e| e.to_string())
    };
}

/// Fetch the rule list.
#[tauri::command]
pub async fn autoreply_list(
    state: State<'_, AutoReplyServiceState>,
) -> Result<Vec<AutoReplyRule>, String> {
    let mut svc = state.lock().await;
    Ok(svc.load_rules().await)
}

/// Create a rule from the editor draft.
#[tauri::command]
pub async fn autoreply_create(
    state: State<'_, AutoReplyServiceState>,
    draft: RuleDraft,
) -> Result<Vec<AutoReplyRule>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.create_rule(draft).await)?;
    Ok(svc.rules())
}

/// Update a rule from the editor draft.
#[tauri::command]
pub async fn autoreply_update(
    state: State<'_, AutoReplyServiceState>,
    id: String,
    draft: RuleDraft,
) -> Result<Vec<AutoReplyRule>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.update_rule(&id, draft).await)?;
    Ok(svc.rules())
}

/// Delete a rule after the literal confirmation phrase.
#[tauri::command]
pub async fn autoreply_delete(
    state: State<'_, AutoReplyServiceState>,
    id: String,
    confirmation: String,
) -> Result<Vec<AutoReplyRule>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.delete_rule(&id, &confirmation).await)?;
    Ok(svc.rules())
}

/// Flip a rule's enabled flag.
#[tauri::command]
pub async fn autoreply_toggle(
    state: State<'_, AutoReplyServiceState>,
    id: String,
) -> Result<Vec<AutoReplyRule>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.toggle_rule(&id).await)
}

/// Run sample text through the local matching ladder.
#[tauri::command]
pub async fn autoreply_test_local(
    state: State<'_, AutoReplyServiceState>,
    text: String,
) -> Result<MatchPreview, String> {
    let svc = state.lock().await;
    Ok(svc.test_local(&text))
}

/// Ask the backend which rule would fire for sample text.
#[tauri::command]
pub async fn autoreply_test_remote(
    state: State<'_, AutoReplyServiceState>,
    text: String,
) -> Result<MatchPreview, String> {
    let (client, payload, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_test_remote(&text))?
    };
    let outcome = client
        .post_json(&format!("{}/test", RULES_PATH), &payload)
        .await;
    let mut svc = state.lock().await;
    map_err!(svc.finish_test_remote(outcome, token))
}

/// Recorded exchanges for one phone number.
#[tauri::command]
pub async fn autoreply_conversation(
    state: State<'_, AutoReplyServiceState>,
    phone: String,
) -> Result<Vec<AutoReplyExchange>, String> {
    let svc = state.lock().await;
    map_err!(svc.conversation(&phone).await)
}
