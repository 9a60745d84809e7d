//! # Synthetic Problem Generation
//!
//! This module defines the wire shape of an optimization request and the
//! generator that fills it with randomized-but-reproducible data.
//!
//! ## Wire Shape
//!
//! The [`OptimizationPayload`] serializes to exactly the body the service
//! expects:
//!
//! ```json
//! {
//!   "cost_matrix_data": { "data": { "0": [[0, 12], [40, 0]] } },
//!   "fleet_data": {
//!     "vehicle_locations": [[0, 0]],
//!     "capacities": [[100]],
//!     "vehicle_time_windows": [[0, 480]]
//!   },
//!   "task_data": {
//!     "task_locations": [1],
//!     "demand": [[7]],
//!     "task_time_windows": [[0, 480]],
//!     "service_times": [9]
//!   },
//!   "solver_config": { "time_limit": 30 }
//! }
//! ```
//!
//! ## Reproducibility
//!
//! Every random draw goes through the RNG owned by a [`ProblemGenerator`].
//! There is no process-wide seed: two generators built from the same seed
//! produce identical payloads no matter what else runs in the process.

use crate::error::ConfigurationError;
use crate::scenario::ScenarioConfig;
use crate::utils::time_seed;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the single vehicle-type cost matrix is sent.
pub const COST_MATRIX_KEY: &str = "0";

/// Index of the depot every vehicle starts and ends at.
pub const DEPOT: usize = 0;

/// An `[start, end]` interval in minutes from the reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow(pub u32, pub u32);

impl TimeWindow {
    pub fn start(&self) -> u32 {
        self.0
    }

    pub fn end(&self) -> u32 {
        self.1
    }
}

/// Inclusive integer range a value is drawn uniformly from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// How default task time windows are synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskWindowPolicy {
    /// Every task gets the same window.
    Fixed(TimeWindow),
    /// Start drawn from `start`, length from `length`, end capped at `horizon_end`.
    Random {
        start: ValueRange,
        length: ValueRange,
        horizon_end: u32,
    },
}

/// The ranges and windows used to fill in whatever a scenario leaves out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorProfile {
    pub cost: ValueRange,
    pub demand: ValueRange,
    pub service_time: ValueRange,
    pub task_windows: TaskWindowPolicy,
    pub vehicle_window: TimeWindow,
}

impl GeneratorProfile {
    /// General-purpose benchmarking: an 8-hour day starting at minute 0.
    pub const GENERIC: GeneratorProfile = GeneratorProfile {
        cost: ValueRange::new(5, 100),
        demand: ValueRange::new(5, 20),
        service_time: ValueRange::new(5, 15),
        task_windows: TaskWindowPolicy::Fixed(TimeWindow(0, 480)),
        vehicle_window: TimeWindow(0, 480),
    };

    /// Metro EV delivery: short hops in km, 8 AM to 6 PM in minutes from
    /// midnight, 1-3 hour delivery windows opening no later than 3 PM.
    pub const EV_DELIVERY: GeneratorProfile = GeneratorProfile {
        cost: ValueRange::new(3, 15),
        demand: ValueRange::new(1, 10),
        service_time: ValueRange::new(5, 15),
        task_windows: TaskWindowPolicy::Random {
            start: ValueRange::new(480, 900),
            length: ValueRange::new(60, 180),
            horizon_end: 1080,
        },
        vehicle_window: TimeWindow(480, 1080),
    };
}

/// Named generator profile, selectable per scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ProblemProfile {
    #[default]
    Generic,
    EvDelivery,
}

impl ProblemProfile {
    pub fn generator_profile(self) -> GeneratorProfile {
        match self {
            ProblemProfile::Generic => GeneratorProfile::GENERIC,
            ProblemProfile::EvDelivery => GeneratorProfile::EV_DELIVERY,
        }
    }

    pub fn is_generic(&self) -> bool {
        *self == ProblemProfile::Generic
    }
}

/// Square matrix of travel costs; diagonal is always zero, symmetry is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostMatrix(Vec<Vec<u32>>);

impl CostMatrix {
    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.0
    }

    pub fn get(&self, from: usize, to: usize) -> Option<u32> {
        self.0.get(from).and_then(|row| row.get(to)).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostMatrixData {
    pub data: BTreeMap<String, CostMatrix>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSpec {
    /// `[start, end]` location per vehicle.
    pub vehicle_locations: Vec<[usize; 2]>,
    /// One inner vector per capacity dimension, one entry per vehicle.
    pub capacities: Vec<Vec<u32>>,
    pub vehicle_time_windows: Vec<TimeWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub task_locations: Vec<usize>,
    /// One inner vector per demand dimension, one entry per task.
    pub demand: Vec<Vec<u32>>,
    pub task_time_windows: Vec<TimeWindow>,
    pub service_times: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Solver budget in seconds.
    pub time_limit: u32,
}

/// The exact request body sent to the optimization service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationPayload {
    pub cost_matrix_data: CostMatrixData,
    pub fleet_data: FleetSpec,
    pub task_data: TaskSpec,
    pub solver_config: SolverConfig,
}

impl OptimizationPayload {
    pub fn cost_matrix(&self) -> Option<&CostMatrix> {
        self.cost_matrix_data.data.get(COST_MATRIX_KEY)
    }

    pub fn num_vehicles(&self) -> usize {
        self.fleet_data.vehicle_locations.len()
    }

    pub fn num_tasks(&self) -> usize {
        self.task_data.task_locations.len()
    }

    pub fn num_locations(&self) -> usize {
        self.cost_matrix().map_or(0, CostMatrix::size)
    }
}

/// EV fleet problem with charging stations appended to the location set.
///
/// Locations are laid out as depot, deliveries, then charging stations; only
/// deliveries become tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvFleetScenario {
    pub num_vehicles: usize,
    pub num_deliveries: usize,
    #[serde(default = "default_charging_stations")]
    pub num_charging_stations: usize,
    #[serde(default = "default_ev_capacity")]
    pub vehicle_capacity: u32,
    #[serde(default = "crate::scenario::default_time_limit")]
    pub time_limit: u32,
}

/// Name EV fleet problems are reported under.
const EV_FLEET_SCENARIO: &str = "ev-fleet";

fn default_charging_stations() -> usize {
    crate::defaults::CHARGING_STATIONS
}

fn default_ev_capacity() -> u32 {
    crate::defaults::EV_VEHICLE_CAPACITY
}

impl EvFleetScenario {
    pub fn new(num_vehicles: usize, num_deliveries: usize, num_charging_stations: usize) -> Self {
        Self {
            num_vehicles,
            num_deliveries,
            num_charging_stations,
            vehicle_capacity: default_ev_capacity(),
            time_limit: crate::scenario::default_time_limit(),
        }
    }

    pub fn total_locations(&self) -> usize {
        1 + self.num_deliveries + self.num_charging_stations
    }

    /// Check the problem has a fleet, at least one delivery, and a usable
    /// capacity and time limit. Zero charging stations is allowed.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let not_positive = |field| ConfigurationError::NotPositive {
            scenario: EV_FLEET_SCENARIO.to_string(),
            field,
        };
        if self.num_vehicles == 0 {
            return Err(not_positive("num_vehicles"));
        }
        if self.num_deliveries == 0 {
            return Err(not_positive("num_deliveries"));
        }
        if self.vehicle_capacity == 0 {
            return Err(not_positive("vehicle_capacity"));
        }
        if self.time_limit == 0 {
            return Err(not_positive("time_limit"));
        }
        Ok(())
    }
}

/// Generate a cost matrix for `num_locations` locations with the generic profile.
///
/// With a seed the result is fully deterministic. Without one, the seed is
/// derived from the current time, so callers that need reproducibility must
/// always pass a seed.
pub fn generate_cost_matrix(num_locations: usize, seed: Option<u64>) -> CostMatrix {
    let seed = seed.unwrap_or_else(time_seed);
    ProblemGenerator::seeded(seed, GeneratorProfile::GENERIC).cost_matrix(num_locations)
}

/// Builds optimization payloads from an explicit RNG.
///
/// The profile given at construction drives the standalone draws
/// ([`cost_matrix`](Self::cost_matrix), [`demands`](Self::demands), ...).
/// Whole payloads follow the profile of the scenario or problem they are
/// built for.
pub struct ProblemGenerator<R = StdRng> {
    rng: R,
    profile: GeneratorProfile,
}

impl ProblemGenerator<StdRng> {
    /// Deterministic generator: the same seed always yields the same payloads.
    pub fn seeded(seed: u64, profile: GeneratorProfile) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), profile)
    }

    /// Non-reproducible generator seeded from the current time.
    pub fn from_time(profile: GeneratorProfile) -> Self {
        Self::seeded(time_seed(), profile)
    }
}

impl<R: Rng> ProblemGenerator<R> {
    pub fn with_rng(rng: R, profile: GeneratorProfile) -> Self {
        Self { rng, profile }
    }

    pub fn profile(&self) -> &GeneratorProfile {
        &self.profile
    }

    /// Draw an `n x n` matrix; off-diagonal values come from the profile's cost range.
    pub fn cost_matrix(&mut self, num_locations: usize) -> CostMatrix {
        self.draw_matrix(self.profile.cost, num_locations)
    }

    pub fn demands(&mut self, num_tasks: usize) -> Vec<u32> {
        self.draw_values(self.profile.demand, num_tasks)
    }

    pub fn service_times(&mut self, num_tasks: usize) -> Vec<u32> {
        self.draw_values(self.profile.service_time, num_tasks)
    }

    pub fn task_time_windows(&mut self, num_tasks: usize) -> Vec<TimeWindow> {
        self.draw_windows(self.profile.task_windows, num_tasks)
    }

    /// Build the full payload for a scenario, synthesizing any omitted overrides.
    ///
    /// Ranges and windows come from the scenario's own [`ProblemProfile`], not
    /// the profile this generator was built with. The cost matrix is drawn
    /// first, then demands, service times and time windows, so a given seed
    /// always maps to the same payload.
    pub fn build_payload(&mut self, scenario: &ScenarioConfig) -> OptimizationPayload {
        let profile = scenario.profile.generator_profile();
        let num_tasks = scenario.num_tasks();
        let cost_matrix = self.draw_matrix(profile.cost, scenario.num_locations);

        let overrides = &scenario.overrides;
        let demands = match &overrides.demands {
            Some(demands) => demands.clone(),
            None => self.draw_values(profile.demand, num_tasks),
        };
        let service_times = match &overrides.service_times {
            Some(service_times) => service_times.clone(),
            None => self.draw_values(profile.service_time, num_tasks),
        };
        let time_windows = match &overrides.time_windows {
            Some(time_windows) => time_windows.clone(),
            None => self.draw_windows(profile.task_windows, num_tasks),
        };

        assemble(
            cost_matrix,
            FleetShape {
                num_vehicles: scenario.num_vehicles,
                vehicle_capacity: scenario.vehicle_capacity,
                vehicle_window: profile.vehicle_window,
            },
            TaskSpec {
                task_locations: (1..scenario.num_locations).collect(),
                demand: vec![demands],
                task_time_windows: time_windows,
                service_times,
            },
            scenario.time_limit,
        )
    }

    /// Build an EV fleet payload whose matrix also covers the charging stations.
    pub fn build_ev_fleet_payload(&mut self, scenario: &EvFleetScenario) -> OptimizationPayload {
        let profile = GeneratorProfile::EV_DELIVERY;
        let num_tasks = scenario.num_deliveries;
        let cost_matrix = self.draw_matrix(profile.cost, scenario.total_locations());
        let demands = self.draw_values(profile.demand, num_tasks);
        let service_times = self.draw_values(profile.service_time, num_tasks);
        let time_windows = self.draw_windows(profile.task_windows, num_tasks);

        assemble(
            cost_matrix,
            FleetShape {
                num_vehicles: scenario.num_vehicles,
                vehicle_capacity: scenario.vehicle_capacity,
                vehicle_window: profile.vehicle_window,
            },
            TaskSpec {
                task_locations: (1..=num_tasks).collect(),
                demand: vec![demands],
                task_time_windows: time_windows,
                service_times,
            },
            scenario.time_limit,
        )
    }

    fn draw_matrix(&mut self, cost: ValueRange, num_locations: usize) -> CostMatrix {
        let rows = (0..num_locations)
            .map(|i| {
                (0..num_locations)
                    .map(|j| {
                        if i == j {
                            0
                        } else {
                            cost.sample(&mut self.rng)
                        }
                    })
                    .collect()
            })
            .collect();
        CostMatrix(rows)
    }

    fn draw_values(&mut self, range: ValueRange, count: usize) -> Vec<u32> {
        (0..count).map(|_| range.sample(&mut self.rng)).collect()
    }

    fn draw_windows(&mut self, policy: TaskWindowPolicy, count: usize) -> Vec<TimeWindow> {
        match policy {
            TaskWindowPolicy::Fixed(window) => vec![window; count],
            TaskWindowPolicy::Random {
                start,
                length,
                horizon_end,
            } => (0..count)
                .map(|_| {
                    let open = start.sample(&mut self.rng);
                    let close = open + length.sample(&mut self.rng);
                    TimeWindow(open, close.min(horizon_end))
                })
                .collect(),
        }
    }
}

/// Homogeneous fleet parked at the depot.
struct FleetShape {
    num_vehicles: usize,
    vehicle_capacity: u32,
    vehicle_window: TimeWindow,
}

fn assemble(
    cost_matrix: CostMatrix,
    fleet: FleetShape,
    task_data: TaskSpec,
    time_limit: u32,
) -> OptimizationPayload {
    let mut data = BTreeMap::new();
    data.insert(COST_MATRIX_KEY.to_string(), cost_matrix);

    OptimizationPayload {
        cost_matrix_data: CostMatrixData { data },
        fleet_data: FleetSpec {
            vehicle_locations: vec![[DEPOT, DEPOT]; fleet.num_vehicles],
            capacities: vec![vec![fleet.vehicle_capacity; fleet.num_vehicles]],
            vehicle_time_windows: vec![fleet.vehicle_window; fleet.num_vehicles],
        },
        task_data,
        solver_config: SolverConfig { time_limit },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioOverrides;

    fn scenario(num_vehicles: usize, num_locations: usize) -> ScenarioConfig {
        ScenarioConfig::new("test", num_vehicles, num_locations)
    }

    #[test]
    fn test_cost_matrix_same_seed_is_identical() {
        let a = generate_cost_matrix(25, Some(42));
        let b = generate_cost_matrix(25, Some(42));
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }

    #[test]
    fn test_cost_matrix_different_seeds_differ() {
        let a = generate_cost_matrix(25, Some(1));
        let b = generate_cost_matrix(25, Some(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_cost_matrix_shape_and_diagonal() {
        for n in [0, 1, 2, 7, 40] {
            let matrix = generate_cost_matrix(n, Some(n as u64));
            assert_eq!(matrix.size(), n);
            for (i, row) in matrix.rows().iter().enumerate() {
                assert_eq!(row.len(), n);
                assert_eq!(row[i], 0, "diagonal entry {} must be zero", i);
            }
        }
    }

    #[test]
    fn test_cost_matrix_values_within_profile_range() {
        let mut generic = ProblemGenerator::seeded(7, GeneratorProfile::GENERIC);
        let matrix = generic.cost_matrix(30);
        for i in 0..30 {
            for j in 0..30 {
                let value = matrix.get(i, j).unwrap();
                if i != j {
                    assert!((5..=100).contains(&value));
                }
            }
        }

        let mut ev = ProblemGenerator::seeded(7, GeneratorProfile::EV_DELIVERY);
        let matrix = ev.cost_matrix(30);
        assert!(matrix
            .rows()
            .iter()
            .enumerate()
            .all(|(i, row)| row
                .iter()
                .enumerate()
                .all(|(j, &v)| i == j || (3..=15).contains(&v))));
    }

    #[test]
    fn test_unseeded_matrix_has_valid_shape() {
        let matrix = generate_cost_matrix(5, None);
        assert_eq!(matrix.size(), 5);
        assert!((0..5).all(|i| matrix.get(i, i) == Some(0)));
    }

    #[test]
    fn test_build_payload_lengths() {
        for n in [2, 3, 10, 101] {
            let mut generator = ProblemGenerator::seeded(99, GeneratorProfile::GENERIC);
            let payload = generator.build_payload(&scenario(4, n));
            let tasks = &payload.task_data;

            assert_eq!(tasks.task_locations, (1..n).collect::<Vec<_>>());
            assert_eq!(tasks.demand.len(), 1);
            assert_eq!(tasks.demand[0].len(), n - 1);
            assert_eq!(tasks.service_times.len(), n - 1);
            assert_eq!(tasks.task_time_windows.len(), n - 1);
            assert_eq!(payload.num_locations(), n);
        }
    }

    #[test]
    fn test_build_payload_fleet_and_solver_config() {
        let mut generator = ProblemGenerator::seeded(3, GeneratorProfile::GENERIC);
        let mut config = scenario(3, 6);
        config.vehicle_capacity = 250;
        config.time_limit = 45;
        let payload = generator.build_payload(&config);

        assert_eq!(payload.fleet_data.vehicle_locations, vec![[0, 0]; 3]);
        assert_eq!(payload.fleet_data.capacities, vec![vec![250; 3]]);
        assert_eq!(
            payload.fleet_data.vehicle_time_windows,
            vec![TimeWindow(0, 480); 3]
        );
        assert_eq!(payload.solver_config.time_limit, 45);
        assert_eq!(payload.num_vehicles(), 3);
    }

    #[test]
    fn test_build_payload_default_ranges() {
        let mut generator = ProblemGenerator::seeded(11, GeneratorProfile::GENERIC);
        let payload = generator.build_payload(&scenario(2, 50));
        assert!(payload.task_data.demand[0]
            .iter()
            .all(|d| (5..=20).contains(d)));
        assert!(payload
            .task_data
            .service_times
            .iter()
            .all(|s| (5..=15).contains(s)));
        assert!(payload
            .task_data
            .task_time_windows
            .iter()
            .all(|w| *w == TimeWindow(0, 480)));
    }

    #[test]
    fn test_build_payload_uses_overrides() {
        let mut config = scenario(1, 4);
        config.overrides = ScenarioOverrides {
            demands: Some(vec![1, 2, 3]),
            service_times: Some(vec![10, 20, 30]),
            time_windows: Some(vec![TimeWindow(0, 60), TimeWindow(60, 120), TimeWindow(0, 480)]),
        };
        let mut generator = ProblemGenerator::seeded(5, GeneratorProfile::GENERIC);
        let payload = generator.build_payload(&config);

        assert_eq!(payload.task_data.demand, vec![vec![1, 2, 3]]);
        assert_eq!(payload.task_data.service_times, vec![10, 20, 30]);
        assert_eq!(payload.task_data.task_time_windows[1], TimeWindow(60, 120));
    }

    #[test]
    fn test_build_payload_follows_scenario_profile() {
        let ev_scenario = scenario(2, 6).with_profile(ProblemProfile::EvDelivery);
        let payload =
            ProblemGenerator::seeded(1, GeneratorProfile::GENERIC).build_payload(&ev_scenario);

        assert_eq!(
            payload.fleet_data.vehicle_time_windows,
            vec![TimeWindow(480, 1080); 2]
        );
        let matrix = payload.cost_matrix().unwrap();
        for (i, row) in matrix.rows().iter().enumerate() {
            for (j, &cost) in row.iter().enumerate() {
                assert!(i == j || (3..=15).contains(&cost), "cost {} out of EV range", cost);
            }
        }
        assert!(payload.task_data.demand[0].iter().all(|d| (1..=10).contains(d)));
        assert!(payload
            .task_data
            .task_time_windows
            .iter()
            .all(|w| (480..=900).contains(&w.start()) && w.end() <= 1080));

        // The generator's own profile has no say in whole payloads.
        let from_ev_generator =
            ProblemGenerator::seeded(1, GeneratorProfile::EV_DELIVERY).build_payload(&ev_scenario);
        assert_eq!(payload, from_ev_generator);
    }

    #[test]
    fn test_ev_fleet_scenario_validation() {
        assert!(EvFleetScenario::new(20, 50, 5).validate().is_ok());
        assert!(EvFleetScenario::new(3, 4, 0).validate().is_ok());

        assert_eq!(
            EvFleetScenario::new(0, 0, 5).validate(),
            Err(ConfigurationError::NotPositive {
                scenario: "ev-fleet".to_string(),
                field: "num_vehicles",
            })
        );
        assert_eq!(
            EvFleetScenario::new(2, 0, 5).validate(),
            Err(ConfigurationError::NotPositive {
                scenario: "ev-fleet".to_string(),
                field: "num_deliveries",
            })
        );

        let mut no_capacity = EvFleetScenario::new(2, 5, 1);
        no_capacity.vehicle_capacity = 0;
        assert!(no_capacity.validate().is_err());
    }

    #[test]
    fn test_build_payload_is_reproducible() {
        let config = scenario(5, 20);
        let a = ProblemGenerator::seeded(1234, GeneratorProfile::GENERIC).build_payload(&config);
        let b = ProblemGenerator::seeded(1234, GeneratorProfile::GENERIC).build_payload(&config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ev_time_windows_respect_horizon() {
        let mut generator = ProblemGenerator::seeded(8, GeneratorProfile::EV_DELIVERY);
        let windows = generator.task_time_windows(200);
        assert_eq!(windows.len(), 200);
        for window in windows {
            assert!((480..=900).contains(&window.start()));
            assert!(window.end() <= 1080);
            assert!(window.end() > window.start());
        }
    }

    #[test]
    fn test_ev_fleet_payload_excludes_charging_stations_from_tasks() {
        let ev = EvFleetScenario::new(20, 50, 5);
        let mut generator = ProblemGenerator::seeded(21, GeneratorProfile::EV_DELIVERY);
        let payload = generator.build_ev_fleet_payload(&ev);

        assert_eq!(payload.num_locations(), 56);
        assert_eq!(payload.task_data.task_locations, (1..=50).collect::<Vec<_>>());
        assert_eq!(payload.task_data.demand[0].len(), 50);
        assert_eq!(payload.fleet_data.capacities, vec![vec![50; 20]]);
        assert_eq!(
            payload.fleet_data.vehicle_time_windows[0],
            TimeWindow(480, 1080)
        );
        assert_eq!(payload.solver_config.time_limit, 30);
    }

    #[test]
    fn test_payload_wire_field_names() {
        let mut generator = ProblemGenerator::seeded(2, GeneratorProfile::GENERIC);
        let payload = generator.build_payload(&scenario(2, 3));
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["cost_matrix_data"]["data"]["0"].as_array().unwrap().len(), 3);
        assert_eq!(json["fleet_data"]["vehicle_locations"][1], serde_json::json!([0, 0]));
        assert_eq!(json["fleet_data"]["vehicle_time_windows"][0], serde_json::json!([0, 480]));
        assert_eq!(json["task_data"]["task_locations"], serde_json::json!([1, 2]));
        assert!(json["task_data"]["demand"][0].is_array());
        assert!(json["task_data"]["task_time_windows"][0].is_array());
        assert_eq!(json["task_data"]["service_times"].as_array().unwrap().len(), 2);
        assert_eq!(json["solver_config"]["time_limit"], 30);
    }
}
