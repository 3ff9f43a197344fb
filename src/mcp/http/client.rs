//! HTTP client configuration and shared API call functionality for the
//! HR Enterprise API.
//!
//! This module provides:
//! - Environment-based configuration (base URL, API key)
//! - Shared HTTP client with a fixed request timeout
//! - OpenTelemetry integration for request tracing
//! - The single `call` function every tool goes through

use std::{env, time::Duration};

use http::Extensions;
use reqwest::{
    Method, Request, Response, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Result as MiddlewareResult};
use reqwest_tracing::{
    ReqwestOtelSpanBackend, TracingMiddleware, default_on_request_end, reqwest_otel_span,
};
use serde_json::{Value, json};
use tracing::Span;

use crate::mcp::error::HrError;

/// Version prefix shared by every upstream resource.
const API_PREFIX: &str = "/api/v1";

/// Single-attempt request budget; exceeding it surfaces `UpstreamUnreachable`.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_BASE_URL: &str = "http://hr-enterprise-api:80";
const DEFAULT_API_KEY: &str = "hr-api-default-key-change-in-production";

// Custom Tracing Backend for Reqwest to integrate with OpenTelemetry.
// Note: This struct is used via TracingMiddleware<ApiSpan>, but Rust can't
// detect this usage statically, hence the dead_code attribute.
#[allow(dead_code)]
struct ApiSpan;

impl ReqwestOtelSpanBackend for ApiSpan {
    fn on_request_start(req: &Request, _extension: &mut Extensions) -> Span {
        reqwest_otel_span!(name = "hr-api-request", req)
    }

    fn on_request_end(
        span: &Span,
        outcome: &MiddlewareResult<Response>,
        _extension: &mut Extensions,
    ) {
        default_on_request_end(span, outcome);
    }
}

/// Client for the upstream HR Enterprise REST API.
///
/// Cheap to clone; all clones share the same connection pool. Every request
/// carries JSON content-type/accept headers and the `X-API-Key` header, and
/// is bounded by a 30 second timeout. One attempt per call, no retries.
#[derive(Clone)]
pub struct HrApiClient {
    http: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl HrApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let http = ClientBuilder::new(client)
            .with(TracingMiddleware::<ApiSpan>::new())
            .build();

        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read `HR_API_BASE_URL` / `HR_API_KEY` from the environment, falling
    /// back to the development defaults.
    pub fn from_env() -> Self {
        let base_url =
            env::var("HR_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = env::var("HR_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());
        Self::new(base_url, api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes an authenticated request to the HR Enterprise API.
    ///
    /// `path` is the resource path including any query string, e.g.
    /// `/employees?department=Engineering`; the full URL is
    /// `{base_url}/api/v1{path}`.
    ///
    /// Failure classification:
    /// * network error or timeout → `HrError::UpstreamUnreachable`
    /// * non-2xx status → `HrError::UpstreamRejected` with the status code
    /// * 2xx body that is not JSON → `HrError::UpstreamMalformedResponse`
    ///
    /// A DELETE answered with 204 No Content yields the synthetic payload
    /// `{"message": "Successfully deleted"}`.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, HrError> {
        let url = format!("{}{API_PREFIX}{path}", self.base_url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header("X-API-Key", self.api_key.as_str());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("HR API request failed: {e}");
            HrError::UpstreamUnreachable(e.to_string())
        })?;

        let status = response.status();
        if method == Method::DELETE && status == StatusCode::NO_CONTENT {
            return Ok(json!({ "message": "Successfully deleted" }));
        }
        if !status.is_success() {
            return Err(HrError::UpstreamRejected {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| HrError::UpstreamMalformedResponse(e.to_string()))
    }

    pub async fn get(&self, path: &str) -> Result<Value, HrError> {
        self.call(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, HrError> {
        self.call(Method::POST, path, Some(body)).await
    }
}
