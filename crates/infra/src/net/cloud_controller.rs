//! reqwest-backed gateway for the cloud controller API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, trace, warn};

use cfroutes_core::{ApiError, ApiResult};

use super::gateway::{ApiRequest, Gateway, Method};
use crate::config::Configuration;

/// Error document returned by the cloud controller on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: Option<i64>,
    description: Option<String>,
    error_code: Option<String>,
}

/// Authenticated gateway bound to one target.
#[derive(Debug, Clone)]
pub struct CloudControllerGateway {
    client: Client,
    config: Arc<Configuration>,
}

impl CloudControllerGateway {
    pub fn new(config: Arc<Configuration>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Use a caller-supplied client (custom TLS roots, proxies, ...).
    pub fn with_client(client: Client, config: Arc<Configuration>) -> Self {
        Self { client, config }
    }

    fn build(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.config.url_for(&request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        let builder = builder
            .header(AUTHORIZATION, &self.config.access_token)
            .header(ACCEPT, "application/json");

        match &request.body {
            Some(body) => builder.header(CONTENT_TYPE, "application/json").body(body.clone()),
            None => builder,
        }
    }
}

#[async_trait]
impl Gateway for CloudControllerGateway {
    async fn execute(&self, request: ApiRequest) -> ApiResult<String> {
        debug!("{} {}", request.method, request.path);
        if let Some(body) = &request.body {
            trace!("Request body:\n{}", body);
        }

        let response = self
            .build(&request)
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("failed to read response body: {e}")))?;
        trace!("Response body:\n{}", body);

        if !status.is_success() {
            let err = classify_failure(status.as_u16(), &body);
            warn!(method = %request.method, path = %request.path, error = %err, "request failed");
            return Err(err);
        }

        Ok(body)
    }
}

/// Turn a non-2xx response into an `ApiError::Http`.
///
/// The cloud controller's error document is used when present; any other
/// body is passed through as the description.
pub(crate) fn classify_failure(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(doc) if doc.description.is_some() || doc.code.is_some() => {
            let description = match (doc.description, doc.error_code) {
                (Some(d), _) => d,
                (None, Some(name)) => name,
                (None, None) => String::new(),
            };
            ApiError::http(status, doc.code, description)
        }
        _ => ApiError::http(status, None, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_failure_reads_error_document() {
        let err = classify_failure(
            400,
            r#"{"code": 210003, "description": "The host is taken: my-cool-app", "error_code": "CF-RouteHostTaken"}"#,
        );
        assert_eq!(err, ApiError::http(400, Some(210003), "The host is taken: my-cool-app"));
    }

    #[test]
    fn classify_failure_falls_back_to_error_code_name() {
        let err = classify_failure(403, r#"{"code": 10003, "error_code": "CF-NotAuthorized"}"#);
        assert_eq!(err, ApiError::http(403, Some(10003), "CF-NotAuthorized"));
    }

    #[test]
    fn classify_failure_passes_raw_body_through() {
        let err = classify_failure(502, "  upstream unavailable\n");
        assert_eq!(err, ApiError::http(502, None, "upstream unavailable"));

        let err = classify_failure(500, r#"{"unrelated": true}"#);
        assert_eq!(err, ApiError::http(500, None, r#"{"unrelated": true}"#));
    }

    #[test]
    fn gateway_builds_from_configuration() {
        let config = Arc::new(Configuration::new(
            "https://api.example.com",
            "BEARER my_access_token",
            cfroutes_core::Space::default(),
        ));
        assert!(CloudControllerGateway::new(config).is_ok());
    }
}
