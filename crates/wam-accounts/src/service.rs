//! Account service: the backing store for the accounts list and the
//! seven-step setup wizard.

use crate::provider::{detect_provider, Provider};
use crate::setup::{gate_message, step_complete, SetupForm, SetupStep};
use crate::types::{parse_accounts, AccountEnvironment, BusinessAccount};
use crate::verification::{strategy_for, CodeRequest, VerificationStrategy, SANDBOX_CODE};
use log::info;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use wam_core::{
    confirm_destructive, BackendClient, InFlight, InFlightToken, Notifier, WamError, WamResult,
};

pub const ACCOUNTS_PATH: &str = "api/v1/whatsapp/accounts";
pub const SETUP_PATH: &str = "api/v1/whatsapp/accounts/setup";
pub const TEST_MESSAGE_PATH: &str = "api/v1/whatsapp/messages/test";

/// Shared service state, managed by Tauri.
pub type AccountsServiceState = Arc<Mutex<AccountsService>>;

/// One entry of the stepper header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStepView {
    pub step: SetupStep,
    pub title: &'static str,
    pub complete: bool,
    pub current: bool,
}

/// Snapshot of the setup wizard for the webview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupView {
    pub step: SetupStep,
    pub steps: Vec<SetupStepView>,
    pub form: SetupForm,
    pub detected_provider: Option<Provider>,
    pub code_requested: bool,
    pub can_submit: bool,
}

/// The account provisioning service.
pub struct AccountsService {
    client: BackendClient,
    notifier: Arc<dyn Notifier>,
    accounts: Vec<BusinessAccount>,
    step: SetupStep,
    form: SetupForm,
    code_requested: bool,
    inflight: InFlight,
}

impl AccountsService {
    /// Create a new service wrapped in an Arc<Mutex>.
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>) -> AccountsServiceState {
        Arc::new(Mutex::new(Self::with_parts(client, notifier)))
    }

    pub(crate) fn with_parts(client: BackendClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            accounts: Vec::new(),
            step: SetupStep::BusinessInfo,
            form: SetupForm::default(),
            code_requested: false,
            inflight: InFlight::new(),
        }
    }

    // ── Account list ────────────────────────────────────────────────

    /// Fetch the account list. Errors surface as a notice; the stale
    /// list is kept.
    pub async fn load_accounts(&mut self) -> Vec<BusinessAccount> {
        match self.client.get(ACCOUNTS_PATH).await {
            Ok(value) => {
                self.accounts = parse_accounts(&value);
                info!("Loaded {} business accounts", self.accounts.len());
            }
            Err(err) => {
                self.notifier.notify_error("Accounts unavailable", &err);
            }
        }
        self.accounts.clone()
    }

    pub fn accounts(&self) -> Vec<BusinessAccount> {
        self.accounts.clone()
    }

    // ── Step machine ────────────────────────────────────────────────

    pub fn step(&self) -> SetupStep {
        self.step
    }

    /// Advance one step, gated on the current step's completion.
    pub fn try_advance(&mut self) -> WamResult<SetupStep> {
        if !step_complete(self.step, &self.form) {
            return Err(WamError::validation(gate_message(self.step)));
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(self.step)
            }
            None => Err(WamError::validation(
                "Already on the last step; complete the setup to finish",
            )),
        }
    }

    /// Step back freely.
    pub fn back(&mut self) -> SetupStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Jump to a step. Backward jumps are free; forward jumps must pass
    /// every gate in between.
    pub fn goto(&mut self, target: SetupStep) -> WamResult<SetupStep> {
        if target.index() <= self.step.index() {
            self.step = target;
            return Ok(self.step);
        }
        for step in &SetupStep::ALL[self.step.index()..target.index()] {
            if !step_complete(*step, &self.form) {
                return Err(WamError::validation(gate_message(*step)));
            }
        }
        self.step = target;
        Ok(self.step)
    }

    // ── Form mutation ───────────────────────────────────────────────

    pub fn set_business_info(&mut self, name: String, description: String, industry: String) {
        self.form.business_name = name;
        self.form.business_description = description;
        self.form.industry = industry;
    }

    /// Pick a provider. Switching providers drops credentials entered
    /// for the previous one and resets downstream verification state.
    pub fn select_provider(&mut self, provider: Provider) {
        if self.form.provider == Some(provider) {
            return;
        }
        self.form.provider = Some(provider);
        self.form.credentials.clear();
        self.form.phone_verified = false;
        self.form.test_passed = false;
        self.code_requested = false;
        if !provider.supports_sandbox() {
            self.form.environment = AccountEnvironment::Production;
        }
    }

    pub fn set_environment(&mut self, environment: AccountEnvironment) -> WamResult<()> {
        if environment == AccountEnvironment::Sandbox {
            let supported = self
                .form
                .provider
                .map(|p| p.supports_sandbox())
                .unwrap_or(false);
            if !supported {
                return Err(WamError::validation(
                    "The selected provider does not offer a sandbox environment",
                ));
            }
        }
        self.form.environment = environment;
        self.form.phone_verified = false;
        self.form.test_passed = false;
        self.code_requested = false;
        Ok(())
    }

    pub fn set_credential(&mut self, key: String, value: String) {
        self.form.credentials.insert(key, value);
        self.form.test_passed = false;
    }

    pub fn set_phone_number(&mut self, phone: String) {
        if self.form.phone_number != phone {
            self.form.phone_number = phone;
            self.form.phone_verified = false;
            self.code_requested = false;
        }
    }

    pub fn set_api_version(&mut self, version: String) {
        self.form.api_version = version;
    }

    pub fn set_webhook(&mut self, url: String, verify_token: String) {
        self.form.webhook_url = url;
        self.form.webhook_verify_token = verify_token;
    }

    // ── Phone verification (two-phase around the network call) ──────

    pub fn begin_request_code(
        &self,
    ) -> WamResult<(Box<dyn VerificationStrategy>, String, InFlightToken)> {
        let phone = self.form.phone_number.trim();
        if phone.is_empty() {
            return Err(WamError::validation("Enter the phone number first"));
        }
        let token = self.inflight.try_begin("request-code")?;
        let strategy = strategy_for(self.form.environment, &self.client);
        Ok((strategy, phone.to_string(), token))
    }

    pub fn finish_request_code(
        &mut self,
        outcome: WamResult<CodeRequest>,
        token: InFlightToken,
    ) -> WamResult<CodeRequest> {
        drop(token);
        match outcome {
            Ok(request) => {
                self.code_requested = true;
                match request.hint {
                    Some(ref hint) => self.notifier.info("Verification code", hint),
                    None => self
                        .notifier
                        .info("Verification code sent", "Check the phone for the code"),
                }
                Ok(request)
            }
            Err(err) => {
                self.notifier.notify_error("Could not send verification code", &err);
                Err(err)
            }
        }
    }

    pub fn begin_verify_code(
        &self,
        code: String,
    ) -> WamResult<(Box<dyn VerificationStrategy>, String, String, InFlightToken)> {
        if !self.code_requested {
            return Err(WamError::validation("Request a verification code first"));
        }
        if code.trim().is_empty() {
            return Err(WamError::validation("Enter the verification code"));
        }
        let token = self.inflight.try_begin("verify-code")?;
        let strategy = strategy_for(self.form.environment, &self.client);
        Ok((strategy, self.form.phone_number.trim().to_string(), code, token))
    }

    pub fn finish_verify_code(
        &mut self,
        outcome: WamResult<bool>,
        token: InFlightToken,
    ) -> WamResult<bool> {
        drop(token);
        match outcome {
            Ok(true) => {
                self.form.phone_verified = true;
                self.notifier.success("Phone verified", "The number is ready to send");
                Ok(true)
            }
            Ok(false) => {
                self.notifier
                    .warning("Invalid code", "The verification code did not match");
                Ok(false)
            }
            Err(err) => {
                self.notifier.notify_error("Verification failed", &err);
                Err(err)
            }
        }
    }

    // ── Connection test ─────────────────────────────────────────────

    /// Claim the test slot. Sandbox accounts skip the network entirely:
    /// the returned payload is None and the caller goes straight to
    /// `finish_test(Ok(..))`.
    pub fn begin_test(
        &self,
    ) -> WamResult<(Option<(BackendClient, serde_json::Value)>, InFlightToken)> {
        for step in [
            SetupStep::ProviderSelection,
            SetupStep::Credentials,
            SetupStep::PhoneVerification,
        ] {
            if !step_complete(step, &self.form) {
                return Err(WamError::validation(gate_message(step)));
            }
        }
        let token = self.inflight.try_begin("test")?;
        if self.form.environment == AccountEnvironment::Sandbox {
            return Ok((None, token));
        }
        let body = serde_json::json!({
            "provider": self.form.provider,
            "credentials": self.form.credentials,
            "phoneNumber": self.form.phone_number.trim(),
            "message": "Test message from account setup",
        });
        Ok((Some((self.client.clone(), body)), token))
    }

    pub fn finish_test(
        &mut self,
        outcome: WamResult<()>,
        token: InFlightToken,
    ) -> WamResult<()> {
        drop(token);
        match outcome {
            Ok(()) => {
                self.form.test_passed = true;
                if self.form.environment == AccountEnvironment::Sandbox {
                    self.notifier.success(
                        "Sandbox ready",
                        &format!("Sandbox accounts verify with code {}", SANDBOX_CODE),
                    );
                } else {
                    self.notifier
                        .success("Connection test passed", "A test message was sent");
                }
                Ok(())
            }
            Err(err) => {
                self.form.test_passed = false;
                self.notifier.notify_error("Connection test failed", &err);
                Err(err)
            }
        }
    }

    // ── Submission ──────────────────────────────────────────────────

    /// Validate every step and claim the submit slot.
    pub fn begin_submit(
        &self,
    ) -> WamResult<(BackendClient, serde_json::Value, InFlightToken)> {
        for step in SetupStep::ALL {
            if !step_complete(step, &self.form) {
                return Err(WamError::validation(gate_message(step)));
            }
        }
        let payload = serde_json::to_value(&self.form)
            .map_err(|e| WamError::serialization(e.to_string()))?;
        let token = self.inflight.try_begin("submit")?;
        Ok((self.client.clone(), payload, token))
    }

    /// Record the submission result. Success resets the wizard; the
    /// caller re-fetches the account list afterwards.
    pub fn finish_submit(
        &mut self,
        result: WamResult<serde_json::Value>,
        token: InFlightToken,
    ) -> WamResult<BusinessAccount> {
        drop(token);
        match result {
            Ok(value) => {
                let account = serde_json::from_value::<BusinessAccount>(value.clone())
                    .or_else(|_| serde_json::from_value::<BusinessAccount>(value["data"].clone()))
                    .unwrap_or(BusinessAccount {
                        id: String::new(),
                        business_name: self.form.business_name.clone(),
                        phone_number: Some(self.form.phone_number.clone()),
                        provider: self.form.provider,
                        status: Default::default(),
                        environment: self.form.environment,
                        verified_at: None,
                        created_at: None,
                    });
                self.notifier.success(
                    "Account created",
                    &format!("{} is being provisioned", self.form.business_name),
                );
                self.reset();
                Ok(account)
            }
            Err(err) => {
                self.notifier.notify_error("Account setup failed", &err);
                Err(err)
            }
        }
    }

    // ── Update / delete ─────────────────────────────────────────────

    /// PUT a partial update; the caller re-fetches afterwards.
    pub async fn update_account(
        &mut self,
        id: &str,
        changes: serde_json::Value,
    ) -> WamResult<()> {
        let path = format!("{}/{}", ACCOUNTS_PATH, id);
        match self.client.put_json(&path, &changes).await {
            Ok(_) => {
                self.notifier.success("Account updated", "Changes were saved");
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Account update failed", &err);
                Err(err)
            }
        }
    }

    /// Delete an account. Requires the literal confirmation phrase.
    pub async fn delete_account(&mut self, id: &str, confirmation: &str) -> WamResult<()> {
        confirm_destructive(confirmation)?;
        let path = format!("{}/{}", ACCOUNTS_PATH, id);
        match self.client.delete(&path).await {
            Ok(_) => {
                self.accounts.retain(|a| a.id != id);
                self.notifier.success("Account deleted", "The account was removed");
                Ok(())
            }
            Err(err) => {
                self.notifier.notify_error("Account deletion failed", &err);
                Err(err)
            }
        }
    }

    // ── View ────────────────────────────────────────────────────────

    /// Reset the wizard to a fresh form.
    pub fn reset(&mut self) {
        self.step = SetupStep::BusinessInfo;
        self.form = SetupForm::default();
        self.code_requested = false;
    }

    pub fn view(&self) -> SetupView {
        let steps = SetupStep::ALL
            .iter()
            .map(|s| SetupStepView {
                step: *s,
                title: s.title(),
                complete: step_complete(*s, &self.form),
                current: *s == self.step,
            })
            .collect();
        let can_submit = SetupStep::ALL.iter().all(|s| step_complete(*s, &self.form));
        SetupView {
            step: self.step,
            steps,
            form: self.form.clone(),
            detected_provider: detect_provider(&self.form.credentials),
            code_requested: self.code_requested,
            can_submit,
        }
    }
}
