//! PostgREST client for probing the SpendWise database directly.

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::instrument;

use crate::error::ClientError;
use crate::transport;
use crate::types::ApiResponse;

/// Minimal PostgREST client authenticated with a project API key.
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl PostgrestClient {
    /// Create a new PostgREST client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Project URL, without the `/rest/v1` suffix
    /// * `api_key` - Project API key, sent as `apikey` and as a bearer token
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid URL.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let (client, base_url) = transport::build(
            &base_url.into(),
            concat!("spendcheck/", env!("CARGO_PKG_VERSION")),
        )?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Select `columns` from `table`, at most `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn select(
        &self,
        table: &str,
        columns: &str,
        limit: usize,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.table_url(
            table,
            &[("select", columns.to_string()), ("limit", limit.to_string())],
        )?;
        self.send(Method::GET, url, &[], None).await
    }

    /// Insert `rows` into `table` and return the inserted representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self, rows))]
    pub async fn insert(&self, table: &str, rows: &Value) -> Result<ApiResponse, ClientError> {
        let url = self.table_url(table, &[])?;
        self.send(
            Method::POST,
            url,
            &[("Prefer", "return=representation")],
            Some(rows),
        )
        .await
    }

    /// Delete the rows of `table` whose `column` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn delete_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.table_url(table, &[(column, format!("eq.{value}"))])?;
        self.send(Method::DELETE, url, &[], None).await
    }

    fn table_url(&self, table: &str, params: &[(&str, String)]) -> Result<Url, ClientError> {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        let parsed = if params.is_empty() {
            Url::parse(&url)
        } else {
            Url::parse_with_params(&url, params)
        };
        parsed.map_err(|e| ClientError::Configuration(format!("invalid request URL: {e}")))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        extra_headers: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        let bearer = format!("Bearer {}", self.api_key);
        let mut headers = vec![("apikey", self.api_key.as_str()), ("Authorization", bearer.as_str())];
        headers.extend_from_slice(extra_headers);

        transport::execute(&self.client, method, url, &headers, body, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> PostgrestClient {
        PostgrestClient::new(uri, "anon-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn select_sends_key_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .and(query_param("select", "id,email,name"))
            .and(query_param("limit", "1"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server.uri())
            .select("users", "id,email,name", 1)
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.exchange().url.contains("select=id%2Cemail%2Cname"));
    }

    #[tokio::test]
    async fn insert_asks_for_representation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/expenses"))
            .and(header("prefer", "return=representation"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "id": "x" }])))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server.uri())
            .insert("expenses", &json!([{ "id": "x" }]))
            .await
            .unwrap();

        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn delete_uses_eq_filter() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/expenses"))
            .and(query_param("id", "eq.abc"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server.uri())
            .delete_eq("expenses", "id", "abc")
            .await
            .unwrap();

        assert_eq!(response.status(), 204);
        assert!(response.body().is_empty());
    }
}
