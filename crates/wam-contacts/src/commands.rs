//! Tauri command handlers for the contact directory.
//!
//! Commands follow the `contacts_*` naming convention and accept
//! `State<'_, ContactsServiceState>`. All return `Result<T, String>`
//! so errors are serialisable across the Tauri IPC bridge.

use crate::filter::ContactFilter;
use crate::service::{ContactPage, ContactsServiceState};
use crate::types::{Company, Contact, DirectoryStatus};
use tauri::State;

/// Reload both directory sources (contacts and companies).
#[tauri::command]
pub async fn contacts_refresh(
    state: State<'_, ContactsServiceState>,
) -> Result<DirectoryStatus, String> {
    let mut svc = state.lock().await;
    svc.refresh().await;
    Ok(svc.status())
}

/// Current load state of the directory.
#[tauri::command]
pub async fn contacts_status(
    state: State<'_, ContactsServiceState>,
) -> Result<DirectoryStatus, String> {
    let svc = state.lock().await;
    Ok(svc.status())
}

/// Company dropdown options.
#[tauri::command]
pub async fn contacts_companies(
    state: State<'_, ContactsServiceState>,
) -> Result<Vec<Company>, String> {
    let svc = state.lock().await;
    Ok(svc.companies())
}

/// Replace the directory filter; resets to the first page.
#[tauri::command]
pub async fn contacts_set_filter(
    state: State<'_, ContactsServiceState>,
    filter: ContactFilter,
) -> Result<ContactPage, String> {
    let mut svc = state.lock().await;
    svc.set_filter(filter);
    Ok(svc.page_view())
}

/// Jump to a page of the filtered dataset.
#[tauri::command]
pub async fn contacts_set_page(
    state: State<'_, ContactsServiceState>,
    page: usize,
) -> Result<ContactPage, String> {
    let mut svc = state.lock().await;
    svc.set_page(page);
    Ok(svc.page_view())
}

/// Current page of the filtered dataset.
#[tauri::command]
pub async fn contacts_page(
    state: State<'_, ContactsServiceState>,
) -> Result<ContactPage, String> {
    let svc = state.lock().await;
    Ok(svc.page_view())
}

/// Toggle one contact row; returns whether it is selected afterwards.
#[tauri::command]
pub async fn contacts_toggle(
    state: State<'_, ContactsServiceState>,
    id: String,
) -> Result<bool, String> {
    let mut svc = state.lock().await;
    Ok(svc.toggle_contact(&id))
}

/// Select every row on the current page; returns the selection size.
#[tauri::command]
pub async fn contacts_select_page(
    state: State<'_, ContactsServiceState>,
) -> Result<usize, String> {
    let mut svc = state.lock().await;
    Ok(svc.select_page())
}

/// Deselect every row on the current page; returns the selection size.
#[tauri::command]
pub async fn contacts_deselect_page(
    state: State<'_, ContactsServiceState>,
) -> Result<usize, String> {
    let mut svc = state.lock().await;
    Ok(svc.deselect_page())
}

/// Replace the selection with the whole filtered set (capped).
#[tauri::command]
pub async fn contacts_select_all_visible(
    state: State<'_, ContactsServiceState>,
) -> Result<usize, String> {
    let mut svc = state.lock().await;
    Ok(svc.select_all_visible())
}

/// Clear the selection.
#[tauri::command]
pub async fn contacts_clear_selection(
    state: State<'_, ContactsServiceState>,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.clear_selection();
    Ok(())
}

/// Selected contacts in selection order.
#[tauri::command]
pub async fn contacts_selected(
    state: State<'_, ContactsServiceState>,
) -> Result<Vec<Contact>, String> {
    let svc = state.lock().await;
    Ok(svc.selected_contacts())
}
