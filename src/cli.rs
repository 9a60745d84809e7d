//! Command-line surface of `vrp-bench`.
//!
//! Global flags pick the endpoint and logging; each subcommand maps onto one
//! library entry point (`health`, `solve`, `ev-fleet`, `run`).

use crate::benchmark::{BenchmarkConfig, FailurePolicy};
use crate::problem::ProblemProfile;
use crate::scenario::ScenarioSuite;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// VRP Service Benchmark - measure a remote vehicle-routing optimizer
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Service endpoint URL (defaults to $CUOPT_ENDPOINT, then http://cuopt-service:8000)
    #[clap(long, global = true)]
    pub endpoint: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[clap(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Also write logs to this file
    #[clap(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query the service health endpoint
    Health,

    /// Generate and solve a single problem
    Solve(SolveArgs),

    /// Solve an EV fleet problem with charging stations
    EvFleet(EvFleetArgs),

    /// Run a benchmark across scenarios and write a JSON report
    Run(RunArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SolveArgs {
    /// Number of vehicles
    #[clap(long, default_value_t = 10)]
    pub vehicles: usize,

    /// Number of locations including the depot
    #[clap(long, default_value_t = 20)]
    pub locations: usize,

    /// Capacity per vehicle
    #[clap(long, default_value_t = crate::defaults::VEHICLE_CAPACITY)]
    pub capacity: u32,

    /// Solver time limit in seconds
    #[clap(long, default_value_t = crate::defaults::TIME_LIMIT_SECS)]
    pub time_limit: u32,

    /// Generator profile for costs, demands and time windows
    #[clap(long, value_enum, default_value_t = ProblemProfile::Generic)]
    pub profile: ProblemProfile,

    /// Seed for reproducible problem data
    #[clap(long)]
    pub seed: Option<u64>,

    /// Request timeout (defaults to time limit + 120s)
    #[clap(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EvFleetArgs {
    /// Number of EVs
    #[clap(long, default_value_t = 20)]
    pub vehicles: usize,

    /// Number of deliveries
    #[clap(long, default_value_t = 50)]
    pub deliveries: usize,

    /// Number of charging stations
    #[clap(long, default_value_t = crate::defaults::CHARGING_STATIONS)]
    pub charging_stations: usize,

    /// Seed for reproducible problem data
    #[clap(long)]
    pub seed: Option<u64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Built-in scenario suite
    #[clap(long, value_enum, default_value_t = ScenarioSuite::Quick, conflicts_with = "scenarios")]
    pub suite: ScenarioSuite,

    /// JSON file with an array of scenarios (overrides --suite)
    #[clap(long)]
    pub scenarios: Option<PathBuf>,

    /// Iterations per scenario
    #[clap(short = 'i', long, default_value_t = crate::defaults::ITERATIONS_PER_SCENARIO)]
    pub iterations: usize,

    /// Output file for results (JSON format)
    #[clap(short = 'o', long = "output", default_value = crate::defaults::OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Record failed iterations and keep going instead of aborting the run
    #[clap(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Number of scenarios to run concurrently
    #[clap(short = 'c', long, default_value_t = crate::defaults::CONCURRENCY)]
    pub concurrency: usize,

    /// Base seed for reproducible payloads
    #[clap(long)]
    pub seed: Option<u64>,

    /// Per-request timeout (defaults to each scenario's time limit + 120s)
    #[clap(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,
}

impl From<&RunArgs> for BenchmarkConfig {
    fn from(args: &RunArgs) -> Self {
        Self {
            iterations_per_scenario: args.iterations,
            failure_policy: if args.continue_on_error {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            },
            concurrency: args.concurrency,
            seed: args.seed,
            request_timeout: args.timeout,
        }
    }
}

/// Parse duration from string (e.g., "10s", "5m", "1h")
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Duration cannot be empty".to_string());
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, "s")
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, "m")
    } else if let Some(stripped) = s.strip_suffix('h') {
        (stripped, "h")
    } else {
        (s, "s")
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number in duration: {}", num_str))?;

    if num < 0.0 {
        return Err(format!("Duration cannot be negative: {}", s));
    }

    let duration = match unit {
        "ms" => Duration::from_millis(num as u64),
        "s" => Duration::from_secs_f64(num),
        "m" => Duration::from_secs_f64(num * 60.0),
        "h" => Duration::from_secs_f64(num * 3600.0),
        _ => return Err(format!("Invalid duration unit: {}", unit)),
    };

    Ok(duration)
}
