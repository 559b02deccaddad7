//! REST client for the hosted case-study table.
//!
//! The store exposes each table under `{url}/rest/v1/{table}` with
//! PostgREST query conventions (`column=eq.value`, `order=column.desc`).
//! Every request carries the project key both as `apikey` and as a bearer
//! token.
//!
//! Failures map onto the shared error type:
//!
//! | Condition                  | Error                          |
//! |----------------------------|--------------------------------|
//! | zero rows for an id lookup | [`Error::NotFound`]            |
//! | non-2xx response           | [`Error::Transport`] with the store's `message`, else the status |
//! | network / decode failure   | [`Error::Transport`] with the underlying error |

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

use casebook_core::{CaseStudyRecord, Error, Result};

use crate::source::CaseStudySource;

/// Table read when none is configured.
pub const DEFAULT_TABLE: &str = "case_studies";

/// Connection settings for the hosted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://abc.example.co`
    pub url: String,
    /// Public (anon) API key
    pub api_key: String,
    /// Table name
    pub table: String,
}

impl StoreConfig {
    /// Settings for the default table.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Override the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// The table endpoint URL.
    pub fn endpoint(&self) -> Result<Url> {
        if self.url.trim().is_empty() {
            return Err(Error::config("store.url is not set"));
        }
        if self.table.trim().is_empty() {
            return Err(Error::config("store.table is empty"));
        }
        let raw = format!(
            "{}/rest/v1/{}",
            self.url.trim().trim_end_matches('/'),
            self.table.trim()
        );
        Url::parse(&raw).map_err(|e| Error::config(format!("invalid store.url {:?}: {e}", self.url)))
    }
}

/// Error body returned by the store on failure.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
}

/// [`CaseStudySource`] backed by the hosted REST table.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl StoreClient {
    /// Create a client with a default HTTP client.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_http_client(config: &StoreConfig, http: reqwest::Client) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            log::warn!("store.api_key is empty; requests will likely be rejected");
        }
        Ok(Self {
            http,
            endpoint: config.endpoint()?,
            api_key: config.api_key.clone(),
        })
    }

    /// The table endpoint this client queries.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn select(&self, filters: &[(&str, String)]) -> Result<Vec<CaseStudyRecord>> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        log::debug!("GET {} {:?}", self.endpoint, query);

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&query)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::transport_with_source(e.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            log::warn!("Case-study store returned {status}: {message}");
            return Err(Error::transport(message));
        }

        response
            .json::<Vec<CaseStudyRecord>>()
            .await
            .map_err(|e| Error::transport_with_source(format!("Invalid store response: {e}"), e))
    }
}

/// The store's `message` field, else the status line.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<StoreErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

#[async_trait]
impl CaseStudySource for StoreClient {
    async fn fetch_by_id(&self, id: &str) -> Result<CaseStudyRecord> {
        self.select(&[("id", format!("eq.{id}"))])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(id))
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<CaseStudyRecord>> {
        Ok(self
            .select(&[("slug", format!("eq.{slug}")), ("limit", "1".to_string())])
            .await?
            .into_iter()
            .next())
    }

    async fn list_all(&self) -> Result<Vec<CaseStudyRecord>> {
        self.select(&[("order", "created_at.desc".to_string())])
            .await
    }

    async fn list_by_category(
        &self,
        category: &str,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<CaseStudyRecord>> {
        self.select(&[
            ("cscategory", format!("eq.{category}")),
            ("id", format!("neq.{exclude_id}")),
            ("limit", limit.to_string()),
        ])
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let config = StoreConfig::new("https://abc.example.co/", "key");
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://abc.example.co/rest/v1/case_studies"
        );
    }

    #[test]
    fn test_endpoint_custom_table() {
        let config = StoreConfig::new("https://abc.example.co", "key").with_table("stories");
        assert!(config.endpoint().unwrap().as_str().ends_with("/rest/v1/stories"));
    }

    #[test]
    fn test_endpoint_missing_url() {
        let err = StoreConfig::new("", "key").endpoint().unwrap_err();
        assert!(err.to_string().contains("store.url"));
    }

    #[test]
    fn test_endpoint_invalid_url() {
        assert!(StoreConfig::new("not a url", "key").endpoint().is_err());
    }

    #[test]
    fn test_error_message_from_body() {
        let msg = error_message(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"code":"22P02","message":"invalid input syntax for type uuid"}"#,
        );
        assert_eq!(msg, "invalid input syntax for type uuid");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        let msg = error_message(reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(msg, "Request failed with status 502 Bad Gateway");
    }
}
