//! # VRP Service Benchmark Library
//!
//! A benchmarking client for a remote vehicle-routing optimization service.
//! It synthesizes problem instances, submits them over HTTP, measures response
//! latency, and aggregates results across repeated trials and scenarios.
//!
//! ## Architecture Overview
//!
//! The library is organized into several key modules:
//!
//! - `problem`: payload wire types and the seeded problem generator
//! - `scenario`: scenario definitions, validation, and built-in suites
//! - `client`: HTTP client for the optimization service
//! - `benchmark`: the scenario × iteration orchestrator
//! - `metrics`: response-time statistics using HDR histograms
//! - `results`: the report shape, persistence, and console summary
//! - `cli`, `logging`, `utils`: command-line surface and shared helpers
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vrp_service_bench::{BenchmarkConfig, BenchmarkRunner, OptimizationClient, ScenarioConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(OptimizationClient::new(Some("http://localhost:8000"))?);
//!     let config = BenchmarkConfig {
//!         iterations_per_scenario: 3,
//!         seed: Some(42),
//!         ..Default::default()
//!     };
//!
//!     let runner = BenchmarkRunner::new(config, client);
//!     let report = runner
//!         .run(&[
//!             ScenarioConfig::new("small", 5, 20),
//!             ScenarioConfig::new("medium", 10, 50),
//!         ])
//!         .await?;
//!
//!     println!("{} iterations, {} failed", report.total_iterations(), report.total_failures());
//!     Ok(())
//! }
//! ```

/// Scenario × iteration orchestration
///
/// Contains `BenchmarkRunner` and `BenchmarkConfig`. The runner validates
/// scenarios up front, regenerates a payload for every iteration, and either
/// aborts on the first transport failure or records it and continues.
pub mod benchmark;

/// Command-line interface and configuration
pub mod cli;

/// HTTP client and the `OptimizationService` seam the runner is generic over
pub mod client;

/// Error taxonomy
pub mod error;

pub mod logging;

/// Response-time statistics
pub mod metrics;

/// Payload wire types and seeded problem generation
pub mod problem;

/// Report shape and persistence
pub mod results;

pub mod scenario;

pub mod utils;

pub use benchmark::{BenchmarkConfig, BenchmarkRunner, FailurePolicy};
pub use client::{OptimizationClient, OptimizationResult, OptimizationService};
pub use error::{ClientError, ConfigurationError};
pub use problem::{generate_cost_matrix, OptimizationPayload, ProblemGenerator};
pub use results::{BenchmarkReport, ResultsManager};
pub use scenario::{ScenarioConfig, ScenarioSuite};

/// The current version of the benchmark client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    /// Service endpoint used when neither an argument nor the environment names one
    pub const ENDPOINT: &str = "http://cuopt-service:8000";

    /// Environment variable overriding the default endpoint
    pub const ENDPOINT_ENV: &str = "CUOPT_ENDPOINT";

    /// Fixed timeout for health checks
    pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(30);

    /// Added to the solver time limit to form the default request timeout
    ///
    /// Covers queueing, solver startup and serialization on the service side,
    /// which has been observed to stay well under two minutes.
    pub const TIMEOUT_SLACK: Duration = Duration::from_secs(120);

    /// Default solver time limit in seconds
    pub const TIME_LIMIT_SECS: u32 = 30;

    /// Default vehicle capacity for generic scenarios
    pub const VEHICLE_CAPACITY: u32 = 100;

    /// Default package capacity per EV
    pub const EV_VEHICLE_CAPACITY: u32 = 50;

    /// Default number of charging stations in EV fleet problems
    pub const CHARGING_STATIONS: usize = 5;

    /// Default submissions per scenario
    pub const ITERATIONS_PER_SCENARIO: usize = 5;

    /// Scenarios run one at a time unless asked otherwise
    pub const CONCURRENCY: usize = 1;

    /// Upper bound on concurrently running scenarios
    ///
    /// Each worker holds a solver request open for the whole time limit, so
    /// larger pools mostly measure queueing on the service side.
    pub const MAX_CONCURRENCY: usize = 64;

    /// Default report file name
    pub const OUTPUT_FILE: &str = "benchmark_results.json";
}
