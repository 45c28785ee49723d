//! HTTP client for the CRM REST backend.
//!
//! Thin JSON wrapper around `reqwest` with bearer-token auth and typed
//! error extraction from the response body. Calls are single-attempt:
//! the console surfaces every failure to the user instead of retrying.

use crate::config::ConsoleConfig;
use crate::error::{WamError, WamResult};
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Header carrying the tenant scope on multi-tenant deployments.
const TENANT_HEADER: &str = "x-tenant-id";

/// Low-level HTTP client for the CRM backend API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    config: ConsoleConfig,
}

impl BackendClient {
    /// Create a new client from configuration.
    pub fn new(config: &ConsoleConfig) -> WamResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec as u64))
            .connect_timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| WamError::network(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Build a backend URL: `{base}/{path}`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if !self.config.api_token.is_empty() {
            if let Ok(v) = HeaderValue::from_str(&format!("Bearer {}", self.config.api_token)) {
                headers.insert(AUTHORIZATION, v);
            }
        }
        if let Some(ref tenant) = self.config.tenant_id {
            if let Ok(v) = HeaderValue::from_str(tenant) {
                headers.insert(TENANT_HEADER, v);
            }
        }
        headers
    }

    // ─── Request helpers ─────────────────────────────────────────────

    /// GET a backend path.
    pub async fn get(&self, path: &str) -> WamResult<serde_json::Value> {
        self.execute(reqwest::Method::GET, &self.url(path), None).await
    }

    /// POST a JSON body.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> WamResult<serde_json::Value> {
        self.execute(reqwest::Method::POST, &self.url(path), Some(body.clone()))
            .await
    }

    /// PUT a JSON body.
    pub async fn put_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> WamResult<serde_json::Value> {
        self.execute(reqwest::Method::PUT, &self.url(path), Some(body.clone()))
            .await
    }

    /// PATCH a JSON body.
    pub async fn patch_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> WamResult<serde_json::Value> {
        self.execute(reqwest::Method::PATCH, &self.url(path), Some(body.clone()))
            .await
    }

    /// DELETE a backend path.
    pub async fn delete(&self, path: &str) -> WamResult<serde_json::Value> {
        self.execute(reqwest::Method::DELETE, &self.url(path), None)
            .await
    }

    // ─── Core request method ─────────────────────────────────────────

    /// Single-attempt request. Failures map straight into `WamError`;
    /// the caller decides how to surface them.
    async fn execute(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> WamResult<serde_json::Value> {
        debug!("{} {}", method, url);

        let mut req = self
            .client
            .request(method, url)
            .headers(self.auth_headers());

        if let Some(ref b) = body {
            req = req.header(CONTENT_TYPE, "application/json").json(b);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| WamError::network(e.to_string()))?;

        let status = resp.status().as_u16();
        let resp_body = resp.text().await.unwrap_or_default();

        if (200..300).contains(&status) {
            if resp_body.is_empty() {
                return Ok(serde_json::json!({"success": true}));
            }
            return serde_json::from_str(&resp_body)
                .map_err(|e| WamError::serialization(format!("JSON parse error: {}", e)));
        }

        Err(WamError::from_api_response(status, &resp_body))
    }
}

// ─── List responses ──────────────────────────────────────────────────

/// Extract the row array from a list response. The backend is not
/// consistent here: some endpoints return a bare array, others wrap it
/// under `content` (paged) or `data`.
pub fn response_rows(value: &serde_json::Value) -> &[serde_json::Value] {
    let rows = if value.is_array() {
        value
    } else if value["content"].is_array() {
        &value["content"]
    } else if value["data"].is_array() {
        &value["data"]
    } else {
        return &[];
    };
    rows.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Deserialize every row of a list response, logging and skipping rows
/// that don't parse. `what` names the row kind in the log line.
pub fn parse_rows<T: DeserializeOwned>(value: &serde_json::Value, what: &str) -> Vec<T> {
    response_rows(value)
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!("Skipping unparseable {}: {}", what, e);
                None
            }
        })
        .collect()
}
