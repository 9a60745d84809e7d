//! # Optimization Service Client
//!
//! HTTP client for the remote vehicle-routing optimization service.
//!
//! ## Connection Model
//!
//! An [`OptimizationClient`] builds one `reqwest::Client` at construction and
//! reuses it for every call, so the connection pool and the JSON
//! `Content-Type` header live for the lifetime of the client and are released
//! when it is dropped. There is no retry logic anywhere in this module.
//!
//! ## Timeouts
//!
//! Health checks use a short fixed timeout. Solve requests default to the
//! solver's declared time limit plus a fixed slack (see
//! [`effective_timeout`]), so the transport never gives up before the solver
//! itself would have finished or errored.
//!
//! ## Results
//!
//! HTTP status codes are never interpreted. Any JSON body, including one
//! carrying an `"error"` field, comes back as an [`OptimizationResult`] with
//! the elapsed time and status code attached.

use crate::error::ClientError;
use crate::problem::OptimizationPayload;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Path of the service health endpoint.
pub const HEALTH_PATH: &str = "/cuopt/health";

/// Path of the solve endpoint.
pub const SOLVE_PATH: &str = "/cuopt/cuopt";

/// Resolve the service endpoint: explicit value, then the environment
/// variable, then the built-in default. Trailing slashes are trimmed.
pub fn resolve_endpoint(explicit: Option<&str>) -> String {
    select_endpoint(explicit, std::env::var(crate::defaults::ENDPOINT_ENV).ok())
}

/// Endpoint precedence given the environment value; a blank value is ignored.
fn select_endpoint(explicit: Option<&str>, from_env: Option<String>) -> String {
    let endpoint = match explicit {
        Some(endpoint) => endpoint.to_string(),
        None => from_env
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| crate::defaults::ENDPOINT.to_string()),
    };
    endpoint.trim_end_matches('/').to_string()
}

/// Timeout for a solve request.
///
/// An explicit timeout wins; otherwise the payload's solver time limit plus
/// [`crate::defaults::TIMEOUT_SLACK`] absorbs queueing and serialization
/// overhead on the service side.
pub fn effective_timeout(payload: &OptimizationPayload, timeout: Option<Duration>) -> Duration {
    timeout.unwrap_or_else(|| {
        Duration::from_secs(u64::from(payload.solver_config.time_limit))
            + crate::defaults::TIMEOUT_SLACK
    })
}

/// Timing and status captured around a solve request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub response_time_seconds: f64,
    pub status_code: u16,
}

/// Raw service response plus the metadata measured by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub body: Value,
    pub metadata: ResponseMetadata,
}

/// Route assigned to one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRoute {
    #[serde(default)]
    pub route: Vec<usize>,
}

impl VehicleRoute {
    /// Stops excluding the depot at both ends.
    pub fn stops(&self) -> usize {
        self.route.len().saturating_sub(2)
    }
}

/// The solver section of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResponse {
    pub status: Option<i64>,
    pub solution_cost: Option<f64>,
    #[serde(default)]
    pub vehicle_data: BTreeMap<String, VehicleRoute>,
}

impl OptimizationResult {
    /// Whether the body carries a `"response"` key.
    ///
    /// This is key presence only: a response whose solver status reports
    /// infeasibility still counts, and a 200 body carrying `"error"` does not.
    pub fn is_success(&self) -> bool {
        self.body.get("response").is_some()
    }

    /// The service-reported error, if the body carries one.
    pub fn error_message(&self) -> Option<String> {
        self.body.get("error").map(|error| match error {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        })
    }

    /// Decode `response.solver_response`, if present and well-formed.
    pub fn solver_response(&self) -> Option<SolverResponse> {
        let raw = self.body.get("response")?.get("solver_response")?;
        serde_json::from_value(raw.clone()).ok()
    }

    /// The raw body with the metadata inserted under `"_metadata"`.
    pub fn to_annotated_json(&self) -> Value {
        let mut body = self.body.clone();
        if let Value::Object(map) = &mut body {
            if let Ok(metadata) = serde_json::to_value(self.metadata) {
                map.insert("_metadata".to_string(), metadata);
            }
        }
        body
    }
}

/// The operations the benchmark runner needs from an optimization service.
#[async_trait]
pub trait OptimizationService: Send + Sync {
    /// Base URL results are reported against.
    fn endpoint(&self) -> &str;

    /// Submit a payload and wait for the solver's answer.
    async fn submit(
        &self,
        payload: &OptimizationPayload,
        timeout: Option<Duration>,
    ) -> Result<OptimizationResult, ClientError>;
}

/// Client holding a persistent HTTP session to the optimization service.
#[derive(Debug, Clone)]
pub struct OptimizationClient {
    endpoint: String,
    http: reqwest::Client,
}

impl OptimizationClient {
    /// Create a client for `endpoint`, falling back to the environment
    /// variable and then the default endpoint.
    pub fn new(endpoint: Option<&str>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            endpoint: resolve_endpoint(endpoint),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Query the service health endpoint and return the decoded body.
    pub async fn health_check(&self) -> Result<Value, ClientError> {
        let url = self.url(HEALTH_PATH);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .timeout(crate::defaults::HEALTH_TIMEOUT)
            .send()
            .await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|source| ClientError::InvalidBody { status, source })
    }

    /// Submit a payload and block until the service answers or the timeout fires.
    ///
    /// The elapsed time covers sending the request and reading the full body.
    pub async fn submit(
        &self,
        payload: &OptimizationPayload,
        timeout: Option<Duration>,
    ) -> Result<OptimizationResult, ClientError> {
        let url = self.url(SOLVE_PATH);
        let timeout = effective_timeout(payload, timeout);
        debug!(
            "POST {} ({} vehicles, {} tasks, timeout {:?})",
            url,
            payload.num_vehicles(),
            payload.num_tasks(),
            timeout
        );

        let start = Instant::now();
        let response = self
            .http
            .post(&url)
            .json(payload)
            .timeout(timeout)
            .send()
            .await?;
        let status_code = response.status().as_u16();
        let bytes = response.bytes().await?;
        let elapsed = start.elapsed();

        let body: Value = serde_json::from_slice(&bytes).map_err(|source| {
            ClientError::InvalidBody {
                status: status_code,
                source,
            }
        })?;

        debug!("HTTP {} after {:?}", status_code, elapsed);
        Ok(OptimizationResult {
            body,
            metadata: ResponseMetadata {
                response_time_seconds: elapsed.as_secs_f64(),
                status_code,
            },
        })
    }
}

#[async_trait]
impl OptimizationService for OptimizationClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn submit(
        &self,
        payload: &OptimizationPayload,
        timeout: Option<Duration>,
    ) -> Result<OptimizationResult, ClientError> {
        OptimizationClient::submit(self, payload, timeout).await
    }
}
