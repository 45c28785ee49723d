//! Tauri command handlers for business-account provisioning.
//!
//! Commands follow the `accounts_*` naming convention. Verification,
//! the connection test and the final submit all run outside the
//! service lock so a second trigger fails fast with "already running".

use crate::provider::{catalog, Provider, ProviderInfo};
use crate::service::{AccountsServiceState, SetupView, SETUP_PATH, TEST_MESSAGE_PATH};
use crate::setup::SetupStep;
use crate::types::{AccountEnvironment, BusinessAccount};
use crate::verification::CodeRequest;
use std::collections::HashMap;
use tauri::State;

// Helper to map WamError → String for Tauri.
macro_rules! map_err {
    ($expr:expr) => {
        $expr.map_err(|e| e.to_string())
    };
}

/// Fetch the account list.
#[tauri::command]
pub async fn accounts_list(
    state: State<'_, AccountsServiceState>,
) -> Result<Vec<BusinessAccount>, String> {
    let mut svc = state.lock().await;
    Ok(svc.load_accounts().await)
}

/// Static provider catalog for the selection step.
#[tauri::command]
pub async fn accounts_providers() -> Result<Vec<ProviderInfo>, String> {
    Ok(catalog())
}

/// Infer a provider from populated credential fields.
#[tauri::command]
pub async fn accounts_detect_provider(
    fields: HashMap<String, String>,
) -> Result<Option<Provider>, String> {
    Ok(crate::provider::detect_provider(&fields))
}

/// Full wizard snapshot for the webview.
#[tauri::command]
pub async fn accounts_view(state: State<'_, AccountsServiceState>) -> Result<SetupView, String> {
    let svc = state.lock().await;
    Ok(svc.view())
}

/// Advance one step if the current gate passes.
#[tauri::command]
pub async fn accounts_next(state: State<'_, AccountsServiceState>) -> Result<SetupView, String> {
    let mut svc = state.lock().await;
    map_err!(svc.try_advance())?;
    Ok(svc.view())
}

/// Step back; never gated.
#[tauri::command]
pub async fn accounts_back(state: State<'_, AccountsServiceState>) -> Result<SetupView, String> {
    let mut svc = state.lock().await;
    svc.back();
    Ok(svc.view())
}

/// Jump to a step from the header.
#[tauri::command]
pub async fn accounts_goto(
    state: State<'_, AccountsServiceState>,
    step: SetupStep,
) -> Result<SetupView, String> {
    let mut svc = state.lock().await;
    map_err!(svc.goto(step))?;
    Ok(svc.view())
}

/// Set the business-info fields.
#[tauri::command]
pub async fn accounts_set_business_info(
    state: State<'_, AccountsServiceState>,
    name: String,
    description: String,
    industry: String,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_business_info(name, description, industry);
    Ok(())
}

/// Pick the provider; switching clears entered credentials.
#[tauri::command]
pub async fn accounts_select_provider(
    state: State<'_, AccountsServiceState>,
    provider: Provider,
) -> Result<SetupView, String> {
    let mut svc = state.lock().await;
    svc.select_provider(provider);
    Ok(svc.view())
}

/// Toggle sandbox/production.
#[tauri::command]
pub async fn accounts_set_environment(
    state: State<'_, AccountsServiceState>,
    environment: AccountEnvironment,
) -> Result<SetupView, String> {
    let mut svc = state.lock().await;
    map_err!(svc.set_environment(environment))?;
    Ok(svc.view())
}

/// Set one credential field.
#[tauri::command]
pub async fn accounts_set_credential(
    state: State<'_, AccountsServiceState>,
    key: String,
    value: String,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_credential(key, value);
    Ok(())
}

/// Set the sender phone number; changing it voids verification.
#[tauri::command]
pub async fn accounts_set_phone(
    state: State<'_, AccountsServiceState>,
    phone: String,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_phone_number(phone);
    Ok(())
}

/// Request a verification code for the entered phone number.
#[tauri::command]
pub async fn accounts_request_code(
    state: State<'_, AccountsServiceState>,
) -> Result<CodeRequest, String> {
    let (strategy, phone, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_request_code())?
    };
    let outcome = strategy.request_code(&phone).await;
    let mut svc = state.lock().await;
    map_err!(svc.finish_request_code(outcome, token))
}

/// Check the entered verification code.
#[tauri::command]
pub async fn accounts_verify_code(
    state: State<'_, AccountsServiceState>,
    code: String,
) -> Result<bool, String> {
    let (strategy, phone, code, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_verify_code(code))?
    };
    let outcome = strategy.verify_code(&phone, &code).await;
    let mut svc = state.lock().await;
    map_err!(svc.finish_verify_code(outcome, token))
}

/// Set the API version used by the integration.
#[tauri::command]
pub async fn accounts_set_api_version(
    state: State<'_, AccountsServiceState>,
    version: String,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_api_version(version);
    Ok(())
}

/// Set the webhook endpoint and verify token.
#[tauri::command]
pub async fn accounts_set_webhook(
    state: State<'_, AccountsServiceState>,
    url: String,
    verify_token: String,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_webhook(url, verify_token);
    Ok(())
}

/// Run the connection test. Sandbox accounts pass without a network
/// round-trip.
#[tauri::command]
pub async fn accounts_test_connection(
    state: State<'_, AccountsServiceState>,
) -> Result<(), String> {
    let (request, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_test())?
    };
    let outcome = match request {
        Some((client, body)) => client
            .post_json(TEST_MESSAGE_PATH, &body)
            .await
            .map(|_| ()),
        None => Ok(()),
    };
    let mut svc = state.lock().await;
    map_err!(svc.finish_test(outcome, token))
}

/// Submit the completed wizard and refresh the account list.
#[tauri::command]
pub async fn accounts_submit(
    state: State<'_, AccountsServiceState>,
) -> Result<BusinessAccount, String> {
    let (client, payload, token) = {
        let svc = state.lock().await;
        map_err!(svc.begin_submit())?
    };
    let result = client.post_json(SETUP_PATH, &payload).await;
    let mut svc = state.lock().await;
    let account = map_err!(svc.finish_submit(result, token))?;
    svc.load_accounts().await;
    Ok(account)
}

/// Update an existing account and refresh the list.
#[tauri::command]
pub async fn accounts_update(
    state: State<'_, AccountsServiceState>,
    id: String,
    changes: serde_json::Value,
) -> Result<Vec<BusinessAccount>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.update_account(&id, changes).await)?;
    Ok(svc.load_accounts().await)
}

/// Delete an account after the literal confirmation phrase.
#[tauri::command]
pub async fn accounts_delete(
    state: State<'_, AccountsServiceState>,
    id: String,
    confirmation: String,
) -> Result<Vec<BusinessAccount>, String> {
    let mut svc = state.lock().await;
    map_err!(svc.delete_account(&id, &confirmation).await)?;
    Ok(svc.load_accounts().await)
}

/// Abandon the setup form and start over.
#[tauri::command]
pub async fn accounts_reset(state: State<'_, AccountsServiceState>) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.reset();
    Ok(())
}
