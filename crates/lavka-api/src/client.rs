//! HTTP client for the storefront REST API.
//!
//! Builds authenticated request URLs (the API key is always attached as a
//! query parameter, self-healing to the default key), executes the calls,
//! and hands successful bodies to the normalizer. Failure classification
//! lives in [`crate::error`].

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::key_store::KeyStore;
use crate::normalize::{normalize_good, normalize_goods_response, Good, GoodsPage};

pub use lavka_core::config::DEFAULT_BASE_URL;

/// Query parameters for a goods-list request.
///
/// Empty strings are dropped from the request, so the defaults send only
/// `page` and `per_page`.
#[derive(Debug, Clone)]
pub struct GoodsQuery {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    /// Free-text search string.
    pub query: String,
    /// Sort key, e.g. `"rating_desc"` or `"price_asc"`.
    pub sort_order: String,
}

impl Default for GoodsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 12,
            query: String::new(),
            sort_order: String::new(),
        }
    }
}

/// Client for the storefront goods/orders REST API.
///
/// Use [`StoreClient::new`] for production or [`StoreClient::with_base_url`]
/// to point at a mock server in tests. Every call is independent; nothing is
/// batched or cached across calls.
pub struct StoreClient {
    http: Client,
    base_url: Url,
    keys: KeyStore,
}

impl StoreClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(keys: KeyStore, timeout_secs: u64) -> Result<Self, ApiError> {
        Self::with_base_url(keys, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        keys: KeyStore,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("lavka/0.1 (storefront-client)")
            .build()
            .map_err(|e| ApiError::Transport {
                message: format!("failed to construct HTTP client: {e}"),
                source: e,
            })?;

        // Normalise: the base URL must end with exactly one slash so that
        // joining "goods" lands under the path prefix instead of replacing
        // its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: parsed,
            keys,
        })
    }

    /// Lists goods with pagination, free-text query, and sort key.
    ///
    /// Whatever shape the server answers with is normalized into a
    /// [`GoodsPage`].
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] when no response arrived.
    /// - [`ApiError::Http`] on a non-2xx status.
    pub async fn list_goods(&self, query: &GoodsQuery) -> Result<GoodsPage, ApiError> {
        let page = query.page.to_string();
        let per_page = query.per_page.to_string();
        let params = [
            ("page", page.as_str()),
            ("per_page", per_page.as_str()),
            ("query", query.query.as_str()),
            ("sort_order", query.sort_order.as_str()),
        ];
        let body = self.request_json(Method::GET, "goods", &params).await?;
        Ok(normalize_goods_response(&body))
    }

    /// Fetches one good by identifier, normalized.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] / [`ApiError::Http`] as for any call.
    /// - [`ApiError::UnexpectedShape`] when the body is not a goods record.
    pub async fn get_good(&self, id: i64) -> Result<Good, ApiError> {
        let body = self
            .request_json(Method::GET, &format!("goods/{id}"), &[])
            .await?;
        normalize_good(&body).ok_or(ApiError::UnexpectedShape {
            context: format!("getGood(id={id})"),
        })
    }

    /// Builds the full request URL: base + path, the API key, then any
    /// additional parameters with trimmed values, dropping empty ones.
    pub(crate) fn build_url(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.keys.current());
            for (key, value) in params {
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub(crate) async fn request_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let url = self.build_url(path, query)?;
        self.execute(self.http.request(method, url)).await
    }

    pub(crate) async fn request_json_with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let url = self.build_url(path, &[])?;
        self.execute(self.http.request(method, url).json(body)).await
    }

    /// Sends the request and classifies the outcome.
    ///
    /// A 2xx body is parsed as JSON, falling back to plain text; an empty
    /// body becomes `Value::Null`. Non-2xx statuses become
    /// [`ApiError::Http`] with the message extracted from the body.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = response.status();
        let text = response.text().await.map_err(ApiError::transport)?;
        let body = parse_body(&text);

        if !status.is_success() {
            return Err(ApiError::http(status, &body));
        }
        Ok(body)
    }
}

/// Parses a response body: JSON when it is JSON, otherwise the raw text,
/// and `Null` when empty.
fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str, dir: &std::path::Path) -> StoreClient {
        let keys = KeyStore::new(dir);
        keys.set("test-key").unwrap();
        StoreClient::with_base_url(keys, 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_attaches_key_and_params() {
        let dir = tempfile::tempdir().unwrap();
        let client = test_client("https://shop.example/api", dir.path());
        let url = client
            .build_url("goods", &[("page", "2"), ("per_page", "12")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example/api/goods?api_key=test-key&page=2&per_page=12"
        );
    }

    #[test]
    fn build_url_drops_empty_and_trims_values() {
        let dir = tempfile::tempdir().unwrap();
        let client = test_client("https://shop.example/api", dir.path());
        let url = client
            .build_url("goods", &[("query", "  tea  "), ("sort_order", ""), ("page", "1")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example/api/goods?api_key=test-key&query=tea&page=1"
        );
    }

    #[test]
    fn build_url_keeps_the_path_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let client = test_client("https://shop.example/exam-2024-1/api/", dir.path());
        let url = client.build_url("goods/17", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example/exam-2024-1/api/goods/17?api_key=test-key"
        );
    }

    #[test]
    fn parse_body_falls_back_to_text() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("{\"a\":1}"), serde_json::json!({"a": 1}));
        assert_eq!(parse_body("not json"), Value::String("not json".into()));
    }
}
