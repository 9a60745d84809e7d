//! # Benchmark Engine Module
//!
//! This module drives the problem generator and an optimization service across
//! a list of named scenarios and a per-scenario iteration count, producing a
//! [`BenchmarkReport`].
//!
//! ## Execution Lifecycle
//!
//! 1. **Validation**: every scenario is checked before the first request, so a
//!    malformed scenario late in the list cannot waste a long run
//! 2. **Submission**: for each scenario, `iterations_per_scenario` fresh
//!    payloads are generated and submitted one after another
//! 3. **Recording**: each iteration yields `{iteration, response_time, success}`
//! 4. **Aggregation**: per-scenario summaries are computed and the report is
//!    assembled in scenario list order
//!
//! ## Ordering
//!
//! Iteration records within a scenario and scenarios within the report are
//! stored in submission order. Latency-trend analysis (fleet-scaling curves)
//! depends on it, so this holds in concurrent mode too: each scenario owns its
//! accumulator and results are put back in list order after the pool drains.
//!
//! ## Failure Handling
//!
//! With [`FailurePolicy::Abort`] (the default) the first transport error ends
//! the run and the partial results are discarded. [`FailurePolicy::Continue`]
//! records the failed iteration and moves on. A service-level error body is
//! never an exception: it is a failed iteration under either policy.

use crate::{
    client::{OptimizationResult, OptimizationService},
    error::ConfigurationError,
    problem::ProblemGenerator,
    results::{BenchmarkReport, IterationRecord, ScenarioResult},
    scenario::{validate_scenarios, ScenarioConfig},
    utils::{create_progress_indicator, derive_seed, format_duration, generate_run_id, time_seed},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// What to do when an iteration fails at the transport level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failing iteration
    #[default]
    Abort,

    /// Record the failure and continue with the next iteration
    Continue,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Abort => write!(f, "Abort on first failure"),
            FailurePolicy::Continue => write!(f, "Continue on error"),
        }
    }
}

/// Configuration for benchmark execution
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkConfig {
    /// Submissions per scenario; each gets a freshly generated payload
    pub iterations_per_scenario: usize,

    /// Transport failure handling
    pub failure_policy: FailurePolicy,

    /// Number of scenarios run at once
    ///
    /// 1 keeps the strictly sequential behavior; at most
    /// [`crate::defaults::MAX_CONCURRENCY`]. Iterations within a scenario are
    /// always sequential.
    pub concurrency: usize,

    /// Base seed for payload generation
    ///
    /// When set, every iteration's payload is reproducible. When unset, each
    /// iteration is seeded from the clock.
    pub seed: Option<u64>,

    /// Per-request timeout override; `None` derives it from the solver time limit
    pub request_timeout: Option<Duration>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            iterations_per_scenario: crate::defaults::ITERATIONS_PER_SCENARIO,
            failure_policy: FailurePolicy::default(),
            concurrency: crate::defaults::CONCURRENCY,
            seed: None,
            request_timeout: None,
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.iterations_per_scenario == 0 {
            return Err(ConfigurationError::ZeroSetting("iterations_per_scenario"));
        }
        if self.concurrency == 0 {
            return Err(ConfigurationError::ZeroSetting("concurrency"));
        }
        if self.concurrency > crate::defaults::MAX_CONCURRENCY {
            return Err(ConfigurationError::TooLarge {
                setting: "concurrency",
                value: self.concurrency,
                max: crate::defaults::MAX_CONCURRENCY,
            });
        }
        Ok(())
    }
}

/// Runs scenarios against an optimization service and collects a report
pub struct BenchmarkRunner<S> {
    config: BenchmarkConfig,
    service: Arc<S>,
}

impl<S> BenchmarkRunner<S>
where
    S: OptimizationService + 'static,
{
    pub fn new(config: BenchmarkConfig, service: Arc<S>) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Run every scenario and return the assembled report
    ///
    /// ## Returns
    /// - `Ok(BenchmarkReport)`: one entry per scenario, in list order
    /// - `Err(anyhow::Error)`: invalid configuration, or a transport failure
    ///   under [`FailurePolicy::Abort`]
    pub async fn run(&self, scenarios: &[ScenarioConfig]) -> Result<BenchmarkReport> {
        self.config.validate()?;
        validate_scenarios(scenarios)?;

        let run_id = generate_run_id();
        let timestamp = chrono::Utc::now();
        let started = Instant::now();

        info!(
            "Starting benchmark {} against {}: {} scenarios x {} iterations ({}, concurrency {})",
            run_id,
            self.service.endpoint(),
            scenarios.len(),
            self.config.iterations_per_scenario,
            self.config.failure_policy,
            self.config.concurrency
        );

        let results = if self.config.concurrency > 1 && scenarios.len() > 1 {
            self.run_concurrent(scenarios).await?
        } else {
            self.run_sequential(scenarios).await?
        };

        info!(
            "Benchmark {} completed in {}",
            run_id,
            format_duration(started.elapsed())
        );

        Ok(BenchmarkReport {
            run_id,
            timestamp,
            endpoint: self.service.endpoint().to_string(),
            scenarios: results,
        })
    }

    async fn run_sequential(&self, scenarios: &[ScenarioConfig]) -> Result<Vec<ScenarioResult>> {
        let mut results = Vec::with_capacity(scenarios.len());
        for (index, scenario) in scenarios.iter().enumerate() {
            let result = run_scenario(
                self.service.as_ref(),
                &self.config,
                index,
                scenario.clone(),
            )
            .await?;
            results.push(result);
        }
        Ok(results)
    }

    /// Run scenarios on a bounded pool of tasks sharing the service handle
    async fn run_concurrent(&self, scenarios: &[ScenarioConfig]) -> Result<Vec<ScenarioResult>> {
        let permits = Arc::new(Semaphore::new(self.config.concurrency));
        let mut tasks = JoinSet::new();

        for (index, scenario) in scenarios.iter().cloned().enumerate() {
            let permits = Arc::clone(&permits);
            let service = Arc::clone(&self.service);
            let config = self.config.clone();

            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .context("Worker pool closed")?;
                let result = run_scenario(service.as_ref(), &config, index, scenario).await?;
                Ok::<_, anyhow::Error>((index, result))
            });
        }

        let mut slots: Vec<Option<ScenarioResult>> = vec![None; scenarios.len()];
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.context("Scenario task panicked")?;
            match outcome {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => {
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.with_context(|| format!("Scenario {} produced no result", index))
            })
            .collect()
    }
}

/// Run all iterations of one scenario, in order, into its own accumulator
async fn run_scenario<S>(
    service: &S,
    config: &BenchmarkConfig,
    scenario_index: usize,
    scenario: ScenarioConfig,
) -> Result<ScenarioResult>
where
    S: OptimizationService + ?Sized,
{
    info!("Running: {}", scenario.name);
    info!(
        "  Vehicles: {}, Locations: {}",
        scenario.num_vehicles, scenario.num_locations
    );

    let total = config.iterations_per_scenario;
    let profile = scenario.profile.generator_profile();
    let mut records = Vec::with_capacity(total);

    for iteration in 1..=total {
        let seed = match config.seed {
            Some(base) => derive_seed(base, scenario_index, iteration),
            None => time_seed(),
        };
        let payload = ProblemGenerator::seeded(seed, profile).build_payload(&scenario);
        debug!(
            "{} iteration {} seed {} ({} tasks)",
            scenario.name,
            iteration,
            seed,
            payload.num_tasks()
        );

        let started = Instant::now();
        let record = match service.submit(&payload, config.request_timeout).await {
            Ok(result) => record_from_result(iteration, &result),
            Err(e) => match config.failure_policy {
                FailurePolicy::Abort => {
                    return Err(e).with_context(|| {
                        format!("Scenario '{}' iteration {} failed", scenario.name, iteration)
                    });
                }
                FailurePolicy::Continue => {
                    warn!(
                        "Scenario '{}' iteration {} failed: {}",
                        scenario.name, iteration, e
                    );
                    IterationRecord {
                        iteration,
                        response_time: started.elapsed().as_secs_f64(),
                        success: false,
                        error: Some(e.to_string()),
                    }
                }
            },
        };

        info!(
            "  [{}/{}] {} {:.2}s{}",
            iteration,
            total,
            create_progress_indicator(iteration, total, 10),
            record.response_time,
            if record.success { "" } else { " (failed)" }
        );
        records.push(record);
    }

    ScenarioResult::new(scenario, records)
}

fn record_from_result(iteration: usize, result: &OptimizationResult) -> IterationRecord {
    let success = result.is_success();
    if !success {
        if let Some(message) = result.error_message() {
            debug!("Service reported error: {}", message);
        }
    }
    IterationRecord {
        iteration,
        response_time: result.metadata.response_time_seconds,
        success,
        error: None,
    }
}
