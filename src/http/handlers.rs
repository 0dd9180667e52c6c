//! Route handlers for the probe service.

use std::time::Instant;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::response::failure_response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::probe::EndpointConfig;

/// Body of `POST /probe`: the endpoint configuration to exercise plus
/// an optional test payload for body-bearing methods.
///
/// Ownership/authorization of the config is the upstream CRUD layer's
/// concern; this service trusts what it is handed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRequest {
    pub config: EndpointConfig,
    #[serde(default)]
    pub test_data: Option<Value>,
}

pub async fn probe_handler(
    State(state): State<AppState>,
    Json(request): Json<ProbeRequest>,
) -> Response {
    let started = Instant::now();
    let method = request.config.method.as_str();

    match state
        .executor
        .execute(&request.config, request.test_data.as_ref())
        .await
    {
        Ok(report) => {
            metrics::record_probe(method, "completed", started);
            Json(report).into_response()
        }
        Err(err) => {
            metrics::record_probe(method, err.kind(), started);
            failure_response(&err)
        }
    }
}

#[derive(Serialize)]
pub struct ServiceStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
}

pub async fn status_handler(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

pub async fn healthz() -> &'static str {
    "ok"
}
