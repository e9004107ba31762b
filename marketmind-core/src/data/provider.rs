//! Lookup provider trait and structured error types.
//!
//! The LookupProvider trait abstracts over where a lookup response comes from
//! (the HTTP backend, a saved response on disk) so the CLI can swap them and
//! tests can run offline.

use super::lookup::{LookupRequest, LookupResponse};
use super::normalize::TailOhlcv;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Body previews in error messages are cut to this many characters.
pub const BODY_PREVIEW_LEN: usize = 200;

/// Keys that identify a full lookup response rather than a bare bar mapping.
const RESPONSE_KEYS: &[&str] = &[
    "tail_ohlcv",
    "symbol",
    "company",
    "error",
    "shortName",
    "lastPrice",
    "period_return_pct",
    "period",
    "interval",
];

/// Structured error types for lookup operations.
///
/// Displayable in CLI output as-is.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("ticker/company is required")]
    MissingTicker,

    #[error("lookup backend URL is not configured (set LOOKUP_BASE_URL or lookup.base_url)")]
    NotConfigured,

    #[error("failed to call lookup backend: {0}")]
    Network(String),

    #[error("lookup backend returned status {status}: {message}")]
    BackendStatus { status: u16, message: String },

    #[error("lookup response format changed: {0}")]
    ResponseFormat(String),

    #[error("read lookup file {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Trait for lookup providers.
pub trait LookupProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the lookup response for a request.
    fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError>;
}

/// Serves a lookup response saved on disk.
///
/// The file holds either a full lookup response or a bare `tail_ohlcv`
/// mapping. A response that names nothing takes the requested company.
#[derive(Debug, Clone)]
pub struct FileLookupProvider {
    path: PathBuf,
}

impl FileLookupProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the file.
    pub fn load(&self) -> Result<LookupResponse, LookupError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| LookupError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        parse_saved_response(&content)
    }
}

impl LookupProvider for FileLookupProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError> {
        info!(path = %self.path.display(), company = %request.company, "replaying saved lookup");
        let mut response = self.load()?;
        if response.short_name.is_none() && response.company.is_none() && response.symbol.is_none()
        {
            response.company = Some(request.company.clone());
        }
        Ok(response)
    }
}

/// Decode a saved lookup response or a bare bar mapping.
pub fn parse_saved_response(content: &str) -> Result<LookupResponse, LookupError> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| LookupError::ResponseFormat(format!("invalid JSON: {e}")))?;

    let is_response = value
        .as_object()
        .is_some_and(|obj| RESPONSE_KEYS.iter().any(|k| obj.contains_key(*k)));

    if is_response {
        serde_json::from_value(value)
            .map_err(|e| LookupError::ResponseFormat(format!("lookup response: {e}")))
    } else {
        serde_json::from_value::<TailOhlcv>(value)
            .map(LookupResponse::from_tail)
            .map_err(|e| LookupError::ResponseFormat(format!("bar mapping: {e}")))
    }
}

/// Extract a readable message from a non-OK backend body.
///
/// Prefers the JSON `error` field, then `detail` (FastAPI), then names the
/// reported `source`. Non-JSON bodies are previewed.
pub fn backend_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        detail: Option<serde_json::Value>,
        source: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => {
            if let Some(error) = parsed.error.filter(|e| !e.is_empty()) {
                return error;
            }
            match parsed.detail {
                Some(serde_json::Value::String(s)) if !s.is_empty() => s,
                Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => {
                    format!(
                        "Lookup failed ({})",
                        parsed.source.as_deref().unwrap_or("unknown")
                    )
                }
                Some(other) => other.to_string(),
            }
        }
        Err(_) => preview(body, BODY_PREVIEW_LEN),
    }
}

/// First `max` characters of `s`.
pub fn preview(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn saved_full_response() {
        let resp = parse_saved_response(
            r#"{"symbol":"AAPL","tail_ohlcv":{"2024-01-02":{"Close":1.0}}}"#,
        )
        .unwrap();
        assert_eq!(resp.symbol.as_deref(), Some("AAPL"));
        assert_eq!(resp.tail_ohlcv.unwrap().len(), 1);
    }

    #[test]
    fn saved_bare_mapping() {
        let resp = parse_saved_response(
            r#"{"2024-01-02":{"Close":1.0},"2024-01-03":{"Adj Close":2.0,"Dividends":0.0}}"#,
        )
        .unwrap();
        assert!(resp.symbol.is_none());
        assert_eq!(resp.tail_ohlcv.unwrap().len(), 2);
    }

    #[test]
    fn saved_metadata_only_response() {
        let resp = parse_saved_response(r#"{"period":"5d","interval":"1d"}"#).unwrap();
        assert_eq!(resp.period.as_deref(), Some("5d"));
        assert_eq!(resp.interval.as_deref(), Some("1d"));
        assert!(resp.tail_ohlcv.is_none());
    }

    #[test]
    fn saved_garbage_is_format_error() {
        assert!(matches!(
            parse_saved_response("not json"),
            Err(LookupError::ResponseFormat(_))
        ));
        assert!(matches!(
            parse_saved_response("[1, 2, 3]"),
            Err(LookupError::ResponseFormat(_))
        ));
    }

    #[test]
    fn file_provider_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"company":"msft","tail_ohlcv":null}}"#).unwrap();

        let provider = FileLookupProvider::new(file.path());
        let req = LookupRequest::new("msft", Default::default(), Default::default()).unwrap();
        let resp = provider.lookup(&req).unwrap();
        assert_eq!(provider.name(), "file");
        assert_eq!(resp.company.as_deref(), Some("msft"));
        assert!(resp.tail_ohlcv.is_none());
    }

    #[test]
    fn file_provider_names_bare_mapping_after_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"2024-01-02":{{"Close":1.0}}}}"#).unwrap();

        let provider = FileLookupProvider::new(file.path());
        let req = LookupRequest::new("msft", Default::default(), Default::default()).unwrap();
        let resp = provider.lookup(&req).unwrap();
        assert_eq!(resp.display_name(), "MSFT");
        assert_eq!(resp.tail_ohlcv.unwrap().len(), 1);
    }

    #[test]
    fn file_provider_keeps_saved_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"symbol":"AAPL","tail_ohlcv":{{}}}}"#).unwrap();

        let provider = FileLookupProvider::new(file.path());
        let req = LookupRequest::new("replay", Default::default(), Default::default()).unwrap();
        let resp = provider.lookup(&req).unwrap();
        assert_eq!(resp.display_name(), "AAPL");
        assert!(resp.company.is_none());
    }

    #[test]
    fn file_provider_missing_file() {
        let provider = FileLookupProvider::new("/definitely/not/here.json");
        assert!(matches!(provider.load(), Err(LookupError::Io { .. })));
    }

    #[test]
    fn error_message_prefers_error_then_detail() {
        assert_eq!(backend_error_message(r#"{"error":"bad ticker"}"#), "bad ticker");
        assert_eq!(
            backend_error_message(r#"{"detail":"Not Found"}"#),
            "Not Found"
        );
        assert_eq!(
            backend_error_message(r#"{"source":"lookup-backend"}"#),
            "Lookup failed (lookup-backend)"
        );
        assert_eq!(backend_error_message("{}"), "Lookup failed (unknown)");
    }

    #[test]
    fn empty_detail_falls_back_to_source() {
        assert_eq!(
            backend_error_message(r#"{"detail":"","source":"lookup-backend"}"#),
            "Lookup failed (lookup-backend)"
        );
        assert_eq!(
            backend_error_message(r#"{"error":"","detail":""}"#),
            "Lookup failed (unknown)"
        );
    }

    #[test]
    fn error_message_previews_plain_text() {
        let body = "x".repeat(500);
        assert_eq!(backend_error_message(&body).len(), BODY_PREVIEW_LEN);
        assert_eq!(backend_error_message("Bad Gateway"), "Bad Gateway");
    }
}
