//! HTTP lookup provider for the stock-lookup backend.
//!
//! POSTs `{company, period, interval}` to `{base_url}/api/lookup` and decodes
//! the JSON body. Non-OK statuses surface the backend's own error message.

use super::lookup::{LookupRequest, LookupResponse};
use super::provider::{backend_error_message, preview, LookupError, LookupProvider};
use std::time::Duration;
use tracing::{info, warn};

pub const LOOKUP_PATH: &str = "/api/lookup";

/// Blocking client for the lookup backend.
pub struct HttpLookupProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpLookupProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(LookupError::NotConfigured);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Network(format!("build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Full endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}{LOOKUP_PATH}", self.base_url)
    }
}

impl LookupProvider for HttpLookupProvider {
    fn name(&self) -> &str {
        "lookup-backend"
    }

    fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError> {
        let url = self.endpoint();
        info!(%url, company = %request.company, period = %request.period, interval = %request.interval, "calling lookup backend");

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| LookupError::Network(format!("read body: {e}")))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "lookup backend returned non-OK status");
            return Err(LookupError::BackendStatus {
                status: status.as_u16(),
                message: backend_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            LookupError::ResponseFormat(format!("{e}; body starts: {}", preview(&body, 200)))
        })
    }
}
