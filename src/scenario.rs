//! Benchmark scenario definitions.
//!
//! A [`ScenarioConfig`] names one problem shape (fleet size, location count,
//! capacity, solver budget) plus optional explicit task data. Scenarios come
//! from a built-in [`ScenarioSuite`] or a JSON file holding an array of them.

use crate::error::ConfigurationError;
use crate::problem::{ProblemProfile, TimeWindow};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub(crate) fn default_vehicle_capacity() -> u32 {
    crate::defaults::VEHICLE_CAPACITY
}

pub(crate) fn default_time_limit() -> u32 {
    crate::defaults::TIME_LIMIT_SECS
}

/// Explicit task data that replaces the generator's random defaults.
///
/// Every supplied sequence must hold exactly `num_locations - 1` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demands: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_times: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_windows: Option<Vec<TimeWindow>>,
}

/// One named benchmark scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Report key; scenario files may omit it (see [`load_scenarios`]).
    #[serde(default)]
    pub name: String,
    pub num_vehicles: usize,
    /// Total locations including the depot at index 0.
    pub num_locations: usize,
    #[serde(default = "default_vehicle_capacity")]
    pub vehicle_capacity: u32,
    /// Solver budget in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit: u32,
    #[serde(default, skip_serializing_if = "ProblemProfile::is_generic")]
    pub profile: ProblemProfile,
    #[serde(flatten)]
    pub overrides: ScenarioOverrides,
}

impl ScenarioConfig {
    pub fn new(name: impl Into<String>, num_vehicles: usize, num_locations: usize) -> Self {
        Self {
            name: name.into(),
            num_vehicles,
            num_locations,
            vehicle_capacity: default_vehicle_capacity(),
            time_limit: default_time_limit(),
            profile: ProblemProfile::Generic,
            overrides: ScenarioOverrides::default(),
        }
    }

    pub fn with_profile(mut self, profile: ProblemProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_time_limit(mut self, time_limit: u32) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_capacity(mut self, vehicle_capacity: u32) -> Self {
        self.vehicle_capacity = vehicle_capacity;
        self
    }

    /// Number of tasks: every location except the depot.
    pub fn num_tasks(&self) -> usize {
        self.num_locations.saturating_sub(1)
    }

    /// Check the scenario is internally consistent.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::EmptyName);
        }

        let not_positive = |field| ConfigurationError::NotPositive {
            scenario: self.name.clone(),
            field,
        };
        if self.num_vehicles == 0 {
            return Err(not_positive("num_vehicles"));
        }
        if self.vehicle_capacity == 0 {
            return Err(not_positive("vehicle_capacity"));
        }
        if self.time_limit == 0 {
            return Err(not_positive("time_limit"));
        }
        if self.num_locations < 2 {
            return Err(ConfigurationError::TooFewLocations {
                scenario: self.name.clone(),
                num_locations: self.num_locations,
            });
        }

        let expected = self.num_tasks();
        let check_len = |field, actual: Option<usize>| match actual {
            Some(actual) if actual != expected => Err(ConfigurationError::LengthMismatch {
                scenario: self.name.clone(),
                field,
                expected,
                actual,
            }),
            _ => Ok(()),
        };
        check_len("demands", self.overrides.demands.as_ref().map(Vec::len))?;
        check_len(
            "service_times",
            self.overrides.service_times.as_ref().map(Vec::len),
        )?;
        check_len(
            "time_windows",
            self.overrides.time_windows.as_ref().map(Vec::len),
        )?;

        if let Some(windows) = &self.overrides.time_windows {
            if let Some((index, window)) = windows
                .iter()
                .enumerate()
                .find(|(_, w)| w.start() > w.end())
            {
                return Err(ConfigurationError::InvertedTimeWindow {
                    scenario: self.name.clone(),
                    index,
                    start: window.start(),
                    end: window.end(),
                });
            }
        }

        Ok(())
    }
}

/// Validate a whole scenario list, including name uniqueness.
///
/// The report keys scenarios by name, so a repeated name would silently
/// overwrite an earlier scenario's results.
pub fn validate_scenarios(scenarios: &[ScenarioConfig]) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        scenario.validate()?;
        if !seen.insert(scenario.name.as_str()) {
            return Err(ConfigurationError::DuplicateScenario(scenario.name.clone()));
        }
    }
    Ok(())
}

/// Load scenarios from a JSON file containing an array of scenario objects.
///
/// An entry without a `name` is called `scenario_<index>`, counting from 0 in
/// file order.
pub fn load_scenarios(path: &Path) -> Result<Vec<ScenarioConfig>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    let mut scenarios: Vec<ScenarioConfig> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse scenario file {}", path.display()))?;

    for (index, scenario) in scenarios.iter_mut().enumerate() {
        if scenario.name.is_empty() {
            scenario.name = format!("scenario_{}", index);
        }
    }
    Ok(scenarios)
}

/// Built-in scenario collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioSuite {
    /// Two small generic scenarios for smoke-testing an endpoint
    #[clap(name = "quick")]
    Quick,

    /// EV fleets from 10 to 500 vehicles
    #[clap(name = "fleet-scaling")]
    FleetScaling,

    /// Last-mile, charging and dispatch workloads
    #[clap(name = "use-cases")]
    UseCases,
}

/// Fleet sizes of the scaling suite, smallest first.
const FLEET_SCALING_VEHICLES: [usize; 9] = [10, 25, 50, 100, 150, 200, 300, 400, 500];

impl ScenarioSuite {
    pub fn scenarios(self) -> Vec<ScenarioConfig> {
        match self {
            ScenarioSuite::Quick => vec![
                ScenarioConfig::new("Small-5v-20l", 5, 20),
                ScenarioConfig::new("Medium-10v-50l", 10, 50),
            ],
            // Two tasks per vehicle plus the depot; the time limit grows with
            // the fleet so larger instances still get a meaningful search.
            ScenarioSuite::FleetScaling => FLEET_SCALING_VEHICLES
                .iter()
                .map(|&vehicles| {
                    ScenarioConfig::new(format!("EV-Fleet-{}v", vehicles), vehicles, vehicles * 2 + 1)
                        .with_profile(ProblemProfile::EvDelivery)
                        .with_capacity(crate::defaults::EV_VEHICLE_CAPACITY)
                        .with_time_limit(if vehicles >= 200 { 60 } else { 30 })
                })
                .collect(),
            ScenarioSuite::UseCases => vec![
                ScenarioConfig::new("LastMile-Small", 5, 26),
                ScenarioConfig::new("LastMile-Medium", 20, 101),
                ScenarioConfig::new("LastMile-Large", 50, 301).with_time_limit(60),
                ScenarioConfig::new("Charging-Small", 10, 31)
                    .with_profile(ProblemProfile::EvDelivery)
                    .with_capacity(crate::defaults::EV_VEHICLE_CAPACITY),
                ScenarioConfig::new("Charging-Medium", 25, 76)
                    .with_profile(ProblemProfile::EvDelivery)
                    .with_capacity(crate::defaults::EV_VEHICLE_CAPACITY),
                ScenarioConfig::new("Charging-Large", 50, 151)
                    .with_profile(ProblemProfile::EvDelivery)
                    .with_capacity(crate::defaults::EV_VEHICLE_CAPACITY),
                ScenarioConfig::new("Dispatch-Realtime", 15, 41).with_time_limit(10),
                ScenarioConfig::new("Dispatch-Batch", 100, 401).with_time_limit(120),
            ],
        }
    }
}

impl std::fmt::Display for ScenarioSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioSuite::Quick => write!(f, "Quick"),
            ScenarioSuite::FleetScaling => write!(f, "Fleet Scaling"),
            ScenarioSuite::UseCases => write!(f, "Use Cases"),
        }
    }
}
