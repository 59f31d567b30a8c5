//! Shared request execution.

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde_json::Value;
use spendcheck_core::Exchange;
use tracing::debug;

use crate::error::ClientError;
use crate::types::ApiResponse;

/// Build a `reqwest` client and normalize a base URL.
pub(crate) fn build(base_url: &str, user_agent: &str) -> Result<(Client, String), ClientError> {
    let base_url = base_url.trim_end_matches('/').to_string();
    Url::parse(&base_url)
        .map_err(|e| ClientError::Configuration(format!("invalid base URL {base_url:?}: {e}")))?;

    let client = Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;

    Ok((client, base_url))
}

/// Send one request and record the exchange.
pub(crate) async fn execute(
    client: &Client,
    method: Method,
    url: Url,
    headers: &[(&str, &str)],
    body: Option<&Value>,
    timeout: Duration,
) -> Result<ApiResponse, ClientError> {
    let request_body = body.map(Value::to_string);
    debug!(%method, %url, body = request_body.as_deref(), "sending request");

    let mut request = client.request(method.clone(), url.clone()).timeout(timeout);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request
        .send()
        .await
        .map_err(|e| ClientError::from_transport(e, timeout))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::from_transport(e, timeout))?;

    debug!(status, bytes = body.len(), "received response");

    Ok(ApiResponse::new(Exchange {
        method: method.to_string(),
        url: url.to_string(),
        request_body,
        status,
        headers,
        body,
    }))
}
