//! Tauri command handlers for the webhook inbox.
//!
//! Commands follow the `inbox_*` naming convention. The manual reply
//! runs outside the service lock so a second trigger fails fast.

use crate::service::{FeedFilter, FeedPage, InboxServiceState, SEND_REPLY_PATH};
use crate::types::ConversationSummary;
use tauri::State;

// Helper to map WamError → String for Tauri.
macro_rules! map_err {
    ($expr:expr) => {
        $expr.map_err(|e| e.to_string())
    };
}

/// Re-fetch the webhook feed and return the first page.
#[tauri::command]
pub async fn inbox_refresh(state: State<'_, InboxServiceState>) -> Result<FeedPage, String> {
    let mut svc = state.lock().await;
    svc.load_feed().await;
    Ok(svc.page_view())
}

/// Current page of the filtered feed.
#[tauri::command]
pub async fn inbox_page(state: State<'_, InboxServiceState>) -> Result<FeedPage, String> {
    let svc = state.lock().await;
    Ok(svc.page_view())
}

/// Replace the feed filter; resets to the first page.
#[tauri::command]
pub async fn inbox_set_filter(
    state: State<'_, InboxServiceState>,
    filter: FeedFilter,
) -> Result<FeedPage, String> {
    let mut svc = state.lock().await;
    svc.set_filter(filter);
    Ok(svc.page_view())
}

/// Flip to another page.
#[tauri::command]
pub async fn inbox_set_page(
    state: State<'_, InboxServiceState>,
    page: usize,
) -> Result<FeedPage, String> {
    let mut svc = state.lock().await;
    svc.set_page(page);
    Ok(svc.page_view())
}

/// Conversation summaries for the sidebar.
#[tauri::command]
pub async fn inbox_conversations(
    state: State<'_, InboxServiceState>,
) -> Result<Vec<ConversationSummary>, String> {
    let mut svc = state.lock().await;
    Ok(svc.load_summaries().await)
}

/// Send a manual reply, then re-fetch the feed.
#[tauri::command]
pub async fn inbox_send_reply(
    state: State<'_, InboxServiceState>,
    to: String,
    body: String,
) -> Result<FeedPage, String> {
    let (client, payload, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_reply(&to, &body))?
    };
    let outcome = client.post_json(SEND_REPLY_PATH, &payload).await;
    let mut svc = state.lock().await;
    map_err!(svc.finish_reply(outcome, token))?;
    svc.load_feed().await;
    Ok(svc.page_view())
}
