use std::collections::HashMap;
use std::sync::Arc;
use wam_accounts::{AccountsService, Provider, SetupStep, SANDBOX_CODE};
use wam_core::{BackendClient, ConsoleConfig, MemoryNotifier, NoticeKind, WamErrorCode};

// Walks the provisioning wizard with a sandbox account, which keeps the
// whole flow off the network: code delivery, verification and the
// connection test all short-circuit locally.

fn test_client() -> BackendClient {
    BackendClient::new(&ConsoleConfig::default()).unwrap()
}

fn twilio_credentials(svc: &mut AccountsService) {
    svc.set_credential("accountSid".to_string(), "AC0000".to_string());
    svc.set_credential("authToken".to_string(), "token".to_string());
    svc.set_credential("messagingServiceSid".to_string(), "MG0000".to_string());
}

#[tokio::test]
async fn test_sandbox_setup_end_to_end() {
    let notifier = Arc::new(MemoryNotifier::new());
    let state = AccountsService::new(test_client(), notifier.clone());
    let mut svc = state.lock().await;

    // Business info gates the first step
    assert!(svc.try_advance().is_err());
    svc.set_business_info(
        "Acme Retail".to_string(),
        "Neighbourhood store chain".to_string(),
        "Retail".to_string(),
    );
    assert_eq!(svc.try_advance().unwrap(), SetupStep::ProviderSelection);

    svc.select_provider(Provider::Twilio);
    svc.set_environment(wam_accounts::AccountEnvironment::Sandbox).unwrap();
    assert_eq!(svc.try_advance().unwrap(), SetupStep::Credentials);

    twilio_credentials(&mut svc);
    assert_eq!(svc.try_advance().unwrap(), SetupStep::PhoneVerification);

    // Sandbox code request resolves locally with the demo-code hint
    svc.set_phone_number("+15550100".to_string());
    let (strategy, phone, token) = svc.begin_request_code().unwrap();
    let outcome = strategy.request_code(&phone).await;
    let request = svc.finish_request_code(outcome, token).unwrap();
    assert!(request.sent);
    assert!(request.hint.unwrap().contains(SANDBOX_CODE));

    let (strategy, phone, code, token) = svc.begin_verify_code(SANDBOX_CODE.to_string()).unwrap();
    let outcome = strategy.verify_code(&phone, &code).await;
    assert!(svc.finish_verify_code(outcome, token).unwrap());
    assert_eq!(svc.try_advance().unwrap(), SetupStep::ApiConfig);

    // API version defaults to v1, so this step is already complete
    assert_eq!(svc.try_advance().unwrap(), SetupStep::WebhookConfig);
    svc.set_webhook(
        "https://crm.example.com/webhooks/whatsapp".to_string(),
        "verify-tok".to_string(),
    );
    assert_eq!(svc.try_advance().unwrap(), SetupStep::Testing);

    // Sandbox connection test never touches the backend
    let (payload, token) = svc.begin_test().unwrap();
    assert!(payload.is_none());
    svc.finish_test(Ok(()), token).unwrap();

    let (_client, body, token) = svc.begin_submit().unwrap();
    assert_eq!(body["provider"], "TWILIO");
    assert_eq!(body["environment"], "SANDBOX");
    assert_eq!(body["businessName"], "Acme Retail");
    assert_eq!(body["phoneVerified"], true);

    let created = svc
        .finish_submit(Ok(serde_json::json!({ "id": "ba-7", "businessName": "Acme Retail" })), token)
        .unwrap();
    assert_eq!(created.id, "ba-7");

    // Submission resets the wizard for the next account
    let view = svc.view();
    assert_eq!(view.step, SetupStep::BusinessInfo);
    assert!(view.form.business_name.is_empty());
    assert!(notifier.count_of(NoticeKind::Success) >= 1);
}

#[tokio::test]
async fn test_wrong_sandbox_code_warns_and_keeps_step() {
    let notifier = Arc::new(MemoryNotifier::new());
    let state = AccountsService::new(test_client(), notifier.clone());
    let mut svc = state.lock().await;

    svc.set_business_info("Acme".to_string(), String::new(), "Retail".to_string());
    svc.select_provider(Provider::Twilio);
    svc.set_environment(wam_accounts::AccountEnvironment::Sandbox).unwrap();
    twilio_credentials(&mut svc);
    svc.set_phone_number("+15550100".to_string());

    let (strategy, phone, token) = svc.begin_request_code().unwrap();
    let outcome = strategy.request_code(&phone).await;
    svc.finish_request_code(outcome, token).unwrap();

    let (strategy, phone, code, token) = svc.begin_verify_code("123456".to_string()).unwrap();
    let outcome = strategy.verify_code(&phone, &code).await;
    assert!(!svc.finish_verify_code(outcome, token).unwrap());

    assert!(!svc.view().form.phone_verified);
    assert_eq!(notifier.count_of(NoticeKind::Warning), 1);
}

#[tokio::test]
async fn test_sandbox_requires_a_provider_that_offers_one() {
    let state = AccountsService::new(test_client(), Arc::new(MemoryNotifier::new()));
    let mut svc = state.lock().await;

    svc.select_provider(Provider::Meta);
    let err = svc
        .set_environment(wam_accounts::AccountEnvironment::Sandbox)
        .unwrap_err();
    assert_eq!(err.code, WamErrorCode::Validation);
}

#[test]
fn test_provider_detection_from_pasted_credentials() {
    let mut fields = HashMap::new();
    fields.insert("apiKey".to_string(), "key-1".to_string());
    fields.insert("channelId".to_string(), "chan-1".to_string());
    assert_eq!(wam_accounts::detect_provider(&fields), Some(Provider::Dialog360));

    fields.remove("channelId");
    fields.insert("appName".to_string(), "acme".to_string());
    assert_eq!(wam_accounts::detect_provider(&fields), Some(Provider::Gupshup));
}
