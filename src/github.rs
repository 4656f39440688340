//! Blocking client for the GitHub repository statistics endpoints.

use crate::error::{FreqError, Result};
use crate::model::RepoCoords;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct StatsClient {
    http: Client,
    api_base: String,
}

impl StatsClient {
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        let mut auth = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|_| FreqError::ConfigurationMissing("TOKEN contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent(concat!("ghfreq/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Weekly `[week, additions, deletions]` triples for the whole history.
    pub fn code_frequency(&self, coords: &RepoCoords) -> Result<Value> {
        self.get_stats(coords, "code_frequency")
    }

    /// Per-contributor weekly commit counts.
    pub fn contributors(&self, coords: &RepoCoords) -> Result<Value> {
        self.get_stats(coords, "contributors")
    }

    fn get_stats(&self, coords: &RepoCoords, endpoint: &str) -> Result<Value> {
        let url = format!(
            "{}/repos/{}/{}/stats/{endpoint}",
            self.api_base, coords.owner, coords.name
        );
        tracing::debug!(%url, "requesting repository statistics");

        stats_body(self.http.get(&url).send()?, coords, endpoint)
    }
}

/// Status mapping plus body decoding for one statistics response.
///
/// 204 (no history) becomes an empty array; a success body that is not JSON
/// is a malformed payload, not a fetch failure.
pub fn stats_body(resp: Response, coords: &RepoCoords, endpoint: &str) -> Result<Value> {
    let resp = check_response(resp, coords)?;
    if resp.status() == StatusCode::NO_CONTENT {
        return Ok(Value::Array(Vec::new()));
    }
    let body = resp.text()?;
    parse_payload(&body, endpoint)
}

pub fn parse_payload(body: &str, what: &str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|e| FreqError::malformed(format!("{what} body is not valid JSON: {e}")))
}

/// Map statuses the statistics endpoints use onto the error taxonomy.
///
/// 202 means GitHub is still computing the statistics; 204 (no history) is
/// passed through for the caller to treat as an empty series.
pub fn check_response(resp: Response, coords: &RepoCoords) -> Result<Response> {
    let status = resp.status();
    if status == StatusCode::ACCEPTED {
        return Err(FreqError::StatsPending(coords.slug()));
    }
    if !status.is_success() {
        return Err(FreqError::Api {
            status: status.as_u16(),
            message: api_message(resp.text().unwrap_or_default()),
        });
    }
    Ok(resp)
}

/// Prefer the `message` field of a GitHub error body over the raw text.
fn api_message(body: String) -> String {
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body)
}
