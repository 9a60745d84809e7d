//! Benchmark report shape and persistence.
//!
//! A [`BenchmarkReport`] serializes `scenarios` as a JSON object keyed by
//! scenario name, in the order the scenarios ran. [`ResultsManager`] writes
//! and reloads that file and prints the console summary table.

use crate::metrics::ScenarioSummary;
use crate::scenario::ScenarioConfig;
use crate::utils::{format_seconds, print_table_row, print_table_separator};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of one submission within a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based position within the scenario.
    pub iteration: usize,
    /// Wall-clock seconds around the request.
    pub response_time: f64,
    /// Whether the response body carried a `"response"` key.
    pub success: bool,
    /// Transport error text, only present when failures are isolated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// All iterations of one scenario, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub config: ScenarioConfig,
    pub results: Vec<IterationRecord>,
    pub summary: ScenarioSummary,
}

impl ScenarioResult {
    pub fn new(config: ScenarioConfig, results: Vec<IterationRecord>) -> Result<Self> {
        let summary =
            ScenarioSummary::from_records(config.num_vehicles, config.num_locations, &results)?;
        Ok(Self {
            config,
            results,
            summary,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }
}

/// Complete output of a benchmark run.
///
/// `scenarios` serializes as a JSON object keyed by scenario name whose key
/// order is the order the scenarios were run in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub run_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub endpoint: String,
    #[serde(with = "ordered_scenarios")]
    pub scenarios: Vec<ScenarioResult>,
}

impl BenchmarkReport {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioResult> {
        self.scenarios.iter().find(|s| s.name() == name)
    }

    pub fn total_iterations(&self) -> usize {
        self.scenarios.iter().map(|s| s.results.len()).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.scenarios
            .iter()
            .flat_map(|s| s.results.iter())
            .filter(|r| !r.success)
            .count()
    }

    /// Scenario with the lowest mean response time
    pub fn fastest_scenario(&self) -> Option<&str> {
        self.scenarios
            .iter()
            .filter_map(|s| s.summary.avg_response_ms.map(|avg| (s.name(), avg)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name)
    }
}

/// Serialize a scenario list as a name-keyed map without losing its order.
mod ordered_scenarios {
    use super::ScenarioResult;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(scenarios: &[ScenarioResult], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(scenarios.len()))?;
        for scenario in scenarios {
            map.serialize_entry(scenario.name(), scenario)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<ScenarioResult>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = Vec<ScenarioResult>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of scenario name to scenario results")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut scenarios = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, mut scenario)) =
                    access.next_entry::<String, ScenarioResult>()?
                {
                    scenario.config.name = name;
                    scenarios.push(scenario);
                }
                Ok(scenarios)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Results manager for writing and reading benchmark reports
pub struct ResultsManager {
    output_file: PathBuf,
}

impl ResultsManager {
    /// Create a new results manager
    pub fn new(output_file: &Path) -> Self {
        Self {
            output_file: output_file.to_path_buf(),
        }
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Write the report as pretty-printed JSON, replacing any existing file
    pub fn write(&self, report: &BenchmarkReport) -> Result<()> {
        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&self.output_file, json).with_context(|| {
            format!("Failed to write results to {}", self.output_file.display())
        })?;

        info!("Results written to: {:?}", self.output_file);
        Ok(())
    }

    /// Read a previously written report
    pub fn load(path: &Path) -> Result<BenchmarkReport> {
        debug!("Loading report from {:?}", path);
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?;
        let report = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse report {}", path.display()))?;
        Ok(report)
    }

    /// Print a per-scenario summary table to stdout
    pub fn print_summary(report: &BenchmarkReport) {
        let widths = [22, 8, 9, 10, 9, 9, 9];
        println!();
        print_table_row(
            &["Scenario", "Vehicles", "Locations", "Success", "Avg", "P95", "Max"],
            &widths,
        );
        print_table_separator(&widths);

        for scenario in &report.scenarios {
            let summary = &scenario.summary;
            let ms_to_s = |ms: Option<f64>| ms.map_or("-".to_string(), |v| format_seconds(v / 1_000.0));
            let success = format!("{}/{}", summary.successes, summary.iterations);
            let max = summary.latency.as_ref().map(|l| l.max_ms);

            print_table_row(
                &[
                    scenario.name(),
                    &summary.vehicles.to_string(),
                    &summary.locations.to_string(),
                    &success,
                    &ms_to_s(summary.avg_response_ms),
                    &ms_to_s(summary.p95_response_ms),
                    &ms_to_s(max),
                ],
                &widths,
            );
        }

        print_table_separator(&widths);
        println!(
            "{} iterations, {} failed{}",
            report.total_iterations(),
            report.total_failures(),
            report
                .fastest_scenario()
                .map(|name| format!(", fastest: {}", name))
                .unwrap_or_default()
        );
    }
}
