//! Outbound request execution.
//!
//! # Responsibilities
//! - Build the target URL (base URL + query parameters) and run the
//!   SSRF guard against it before anything touches the network
//! - Dispatch the request with the configured headers and optional
//!   JSON payload
//! - Enforce the invocation deadline via cancellation
//! - Enforce the response-size ceiling both via the Content-Length
//!   precheck and while streaming the body
//! - Shape the outcome into a uniform `ProbeReport`
//!
//! # Design Decisions
//! - Single attempt per invocation; retry policy belongs to callers
//! - The deadline covers dispatch and the full body read; on expiry the
//!   in-flight future is dropped, which releases the connection
//! - The ceiling aborts the read mid-stream, so buffered bytes never
//!   exceed it by more than one chunk
//! - Caller-supplied headers win over the default `Content-Type` on
//!   key collision

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use uuid::Uuid;

use crate::config::ProbeLimits;
use crate::net::Resolver;
use crate::probe::endpoint::EndpointConfig;
use crate::probe::error::ProbeError;
use crate::probe::result::ProbeReport;
use crate::security::ssrf;

/// Executes probe invocations. Stateless across invocations; safe to
/// share behind an `Arc` and call concurrently.
pub struct ProbeExecutor {
    client: reqwest::Client,
    resolver: Arc<dyn Resolver>,
    limits: ProbeLimits,
}

impl ProbeExecutor {
    pub fn new(limits: ProbeLimits, resolver: Arc<dyn Resolver>) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            resolver,
            limits,
        })
    }

    /// Run one probe invocation: validate, dispatch, read, shape.
    ///
    /// `payload` is attached as a JSON body only for POST/PUT/PATCH.
    pub async fn execute(
        &self,
        config: &EndpointConfig,
        payload: Option<&Value>,
    ) -> Result<ProbeReport, ProbeError> {
        let invocation = Uuid::new_v4();
        let url = build_url(config)?;

        // Hard precondition: the guard runs against the fully
        // constructed URL, and a rejection means no request is made.
        ssrf::validate_url(
            url.as_str(),
            self.resolver.as_ref(),
            self.limits.allow_private_networks,
        )
        .await?;

        tracing::debug!(
            invocation = %invocation,
            method = config.method.as_str(),
            url = %url,
            "Dispatching probe"
        );

        let deadline = Duration::from_secs(self.limits.timeout_secs);
        match tokio::time::timeout(deadline, self.dispatch(config, url, payload)).await {
            Ok(result) => result,
            // Dropping the dispatch future cancels the in-flight
            // request and releases the connection.
            Err(_) => {
                tracing::warn!(invocation = %invocation, "Probe timed out");
                Err(ProbeError::Timeout(self.limits.timeout_secs))
            }
        }
    }

    async fn dispatch(
        &self,
        config: &EndpointConfig,
        url: url::Url,
        payload: Option<&Value>,
    ) -> Result<ProbeReport, ProbeError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let name = match HeaderName::from_bytes(name.as_bytes()) {
                Ok(n) => n,
                Err(_) => {
                    tracing::warn!(header = %name, "Skipping unparseable header name");
                    continue;
                }
            };
            let value = match HeaderValue::from_str(value) {
                Ok(v) => v,
                Err(_) => {
                    tracing::warn!(header = %name, "Skipping unparseable header value");
                    continue;
                }
            };
            // insert replaces, so caller headers take precedence over
            // the default Content-Type
            headers.insert(name, value);
        }

        let mut request = self
            .client
            .request(config.method.into(), url)
            .headers(headers);

        if config.method.allows_body() {
            if let Some(payload) = payload {
                request = request.json(payload);
            }
        }

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        // Content-Length precheck: reject before reading any body bytes
        // when the response declares itself oversized.
        if let Some(declared) = response.content_length() {
            if declared > self.limits.max_response_bytes {
                return Err(ProbeError::ResponseTooLarge(self.limits.max_response_bytes));
            }
        }

        let status = response.status();
        let mut header_map = HashMap::new();
        for (name, value) in response.headers() {
            header_map.insert(
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        // Streamed read with incremental ceiling enforcement, for
        // responses with absent or understated Content-Length. Dropping
        // the stream aborts the connection.
        let mut body = Vec::new();
        let mut received: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ProbeError::Transport(e.to_string()))?;
            received += chunk.len() as u64;
            if received > self.limits.max_response_bytes {
                return Err(ProbeError::ResponseTooLarge(self.limits.max_response_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        let response_time = started.elapsed().as_millis() as u64;

        let data = if body.is_empty() {
            None
        } else {
            let text = String::from_utf8_lossy(&body).into_owned();
            if is_json {
                // Malformed JSON falls back to the raw text rather than
                // failing the invocation.
                match serde_json::from_str(&text) {
                    Ok(value) => Some(value),
                    Err(_) => Some(Value::String(text)),
                }
            } else {
                Some(Value::String(text))
            }
        };

        Ok(ProbeReport {
            success: status.is_success(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            response_time,
            headers: header_map,
            data,
        })
    }
}

/// Parse the base URL and append the configured query parameters.
fn build_url(config: &EndpointConfig) -> Result<url::Url, ProbeError> {
    let mut url = url::Url::parse(&config.base_url)
        .map_err(|_| ProbeError::InvalidUrl(config.base_url.clone()))?;
    if !config.query_params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &config.query_params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}
