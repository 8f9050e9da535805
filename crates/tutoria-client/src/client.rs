// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level HTTP client for the tutoring REST API.
//!
//! Provides [`RestClient`] which handles URL construction, bearer
//! forwarding, response decoding and retry of idempotent requests on
//! transient errors.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use tutoria_core::{SessionContext, TutoriaError};

use crate::types::ApiErrorBody;

/// Delay between retry attempts.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// A request the backend answered with a non-success status.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    pub status: StatusCode,
    /// Backend message, if the body carried one.
    pub message: Option<String>,
}

impl ApiFailure {
    /// Map to the generic error, ignoring any reservation semantics.
    pub fn into_error(self) -> TutoriaError {
        if self.status == StatusCode::UNAUTHORIZED {
            return TutoriaError::Unauthenticated;
        }
        let message = match self.message {
            Some(m) => format!("backend returned {}: {m}", self.status),
            None => format!("backend returned {}", self.status),
        };
        TutoriaError::Backend {
            message,
            status: Some(self.status.as_u16()),
            source: None,
        }
    }
}

/// Outcome of a single request: transport errors are already mapped, API
/// failures are kept raw so callers can classify them.
pub type ApiResult<T> = Result<Result<T, ApiFailure>, TutoriaError>;

/// HTTP client for the tutoring backend.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl RestClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `base_url` - prefix for every endpoint path, e.g. `http://localhost:8080/api`
    /// * `timeout` - per-request timeout
    /// * `max_retries` - extra attempts for GETs answered with a transient status
    pub fn new(base_url: &str, timeout: Duration, max_retries: u32) -> Result<Self, TutoriaError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TutoriaError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(
        &self,
        builder: RequestBuilder,
        session: Option<&SessionContext>,
    ) -> Result<RequestBuilder, TutoriaError> {
        match session {
            Some(ctx) => {
                let value = HeaderValue::from_str(&ctx.bearer()).map_err(|e| {
                    TutoriaError::Config(format!("invalid bearer token header value: {e}"))
                })?;
                Ok(builder.header(AUTHORIZATION, value))
            }
            None => Ok(builder),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, TutoriaError> {
        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TutoriaError::Timeout {
                    duration: self.timeout,
                }
            } else {
                TutoriaError::Backend {
                    message: format!("HTTP request failed: {e}"),
                    status: None,
                    source: Some(Box::new(e)),
                }
            }
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TutoriaError> {
        let body = response.text().await.map_err(|e| TutoriaError::Backend {
            message: format!("failed to read response body: {e}"),
            status: None,
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| TutoriaError::Decode {
            message: format!("failed to parse backend response: {e}"),
            source: Box::new(e),
        })
    }

    async fn failure(response: Response) -> ApiFailure {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.text().map(str::to_string))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });
        ApiFailure { status, message }
    }

    /// GET `path` (which may carry a query string) and decode the JSON body.
    ///
    /// On transient errors (429, 500, 502, 503), retries up to `max_retries`
    /// times after a 1-second delay.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&SessionContext>,
    ) -> Result<T, TutoriaError> {
        let url = self.url(path);
        let mut last_failure = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, url = %url, "retrying request after transient error");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let builder = self.authorize(self.client.get(&url), session)?;
            let response = self.send(builder).await?;
            let status = response.status();
            debug!(status = %status, attempt, url = %url, "response received");

            if status.is_success() {
                return Self::decode(response).await;
            }

            let failure = Self::failure(response).await;
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, message = ?failure.message, "transient error, will retry");
                last_failure = Some(failure);
                continue;
            }
            return Err(failure.into_error());
        }

        Err(last_failure.map(ApiFailure::into_error).unwrap_or_else(|| {
            TutoriaError::Internal("request failed after retries".into())
        }))
    }

    /// POST a JSON body once.
    ///
    /// Non-success statuses come back as [`ApiFailure`] so the caller can
    /// decide how to classify them. POSTs are never retried.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        session: Option<&SessionContext>,
    ) -> ApiResult<T> {
        let url = self.url(path);
        let builder = self.authorize(self.client.post(&url).json(body), session)?;
        let response = self.send(builder).await?;
        let status = response.status();
        debug!(status = %status, url = %url, "response received");

        if status.is_success() {
            return Self::decode(response).await.map(Ok);
        }
        Ok(Err(Self::failure(response).await))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutoria_core::StudentId;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> RestClient {
        RestClient::new(base_url, Duration::from_secs(5), 1).unwrap()
    }

    #[tokio::test]
    async fn get_json_success_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("active", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let items: Vec<u32> = client
            .get_json("/items?active=true", None)
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn get_json_retries_on_503() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([7])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let items: Vec<u32> = client.get_json("/items", None).await.unwrap();
        assert_eq!(items, vec![7]);
    }

    #[tokio::test]
    async fn get_json_exhausts_retries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"mensaje": "caído"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .get_json::<Vec<u32>>("/items", None)
            .await
            .unwrap_err();
        match err {
            TutoriaError::Backend { status, message, .. } => {
                assert_eq!(status, Some(500));
                assert!(message.contains("caído"), "got: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_maps_to_unauthenticated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .get_json::<Vec<u32>>("/items", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TutoriaError::Unauthenticated));
    }

    #[tokio::test]
    async fn bearer_header_is_forwarded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .and(header("authorization", "Bearer tok-123"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let ctx = SessionContext::new("tok-123", "2182197", StudentId(4));
        let items: Vec<u32> = client.get_json("/items", Some(&ctx)).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn post_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/things"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let outcome = client
            .post_json::<_, serde_json::Value>("/things", &serde_json::json!({}), None)
            .await
            .unwrap();
        let failure = outcome.unwrap_err();
        assert_eq!(failure.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(failure.message.is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .get_json::<Vec<u32>>("/items", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TutoriaError::Decode { .. }));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = test_client("http://localhost:8080/api/");
        assert_eq!(client.url("/tutoring-sessions"), "http://localhost:8080/api/tutoring-sessions");
    }
}
