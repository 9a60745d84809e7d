//! # VRP Service Benchmark - Main Entry Point
//!
//! 1. **Initialize logging**: colorized console output, optional log file
//! 2. **Parse arguments**: endpoint, verbosity and one subcommand
//! 3. **Dispatch**: health check, single solve, EV fleet solve, or a full
//!    benchmark run whose report is written to disk
//!
//! Errors propagate as `anyhow::Error`; a failed run exits non-zero without
//! writing a report.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use vrp_service_bench::{
    cli::{Args, Command, EvFleetArgs, RunArgs, SolveArgs},
    client::{OptimizationClient, OptimizationResult},
    logging::init_logging,
    problem::{EvFleetScenario, GeneratorProfile, ProblemGenerator},
    results::ResultsManager,
    scenario::{load_scenarios, ScenarioConfig},
    utils::{get_recommended_concurrency, time_seed},
    BenchmarkConfig, BenchmarkRunner,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(args.verbose, args.quiet, args.log_file.as_deref())?;

    let client = OptimizationClient::new(args.endpoint.as_deref())
        .context("Failed to create optimization client")?;
    info!("Endpoint: {}", client.endpoint());

    match args.command {
        Command::Health => health(&client).await,
        Command::Solve(solve_args) => solve(&client, &solve_args).await,
        Command::EvFleet(ev_args) => ev_fleet(&client, &ev_args).await,
        Command::Run(run_args) => run(client, &run_args).await,
    }
}

async fn health(client: &OptimizationClient) -> Result<()> {
    info!("Checking health...");
    let status = client
        .health_check()
        .await
        .context("Health check failed")?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

async fn solve(client: &OptimizationClient, args: &SolveArgs) -> Result<()> {
    let scenario = ScenarioConfig::new("solve", args.vehicles, args.locations)
        .with_capacity(args.capacity)
        .with_time_limit(args.time_limit)
        .with_profile(args.profile);
    scenario.validate()?;

    let seed = args.seed.unwrap_or_else(time_seed);
    let payload =
        ProblemGenerator::seeded(seed, scenario.profile.generator_profile()).build_payload(&scenario);

    info!(
        "Optimizing {} vehicles, {} locations (seed {})...",
        args.vehicles, args.locations, seed
    );
    let result = client.submit(&payload, args.timeout).await?;
    report_result(&result);
    Ok(())
}

async fn ev_fleet(client: &OptimizationClient, args: &EvFleetArgs) -> Result<()> {
    let scenario = EvFleetScenario::new(args.vehicles, args.deliveries, args.charging_stations);
    scenario.validate()?;
    info!(
        "EV fleet: {} vehicles, {} deliveries, {} charging stations",
        scenario.num_vehicles, scenario.num_deliveries, scenario.num_charging_stations
    );

    match client.health_check().await {
        Ok(status) => info!("Status: {}", status),
        Err(e) => {
            warn!("Health check failed: {}", e);
            return Err(e.into());
        }
    }

    let seed = args.seed.unwrap_or_else(time_seed);
    let payload = ProblemGenerator::seeded(seed, GeneratorProfile::EV_DELIVERY)
        .build_ev_fleet_payload(&scenario);

    info!("Solving optimization (time limit: {}s)...", scenario.time_limit);
    let result = client.submit(&payload, None).await?;
    report_result(&result);
    Ok(())
}

async fn run(client: OptimizationClient, args: &RunArgs) -> Result<()> {
    let recommended = get_recommended_concurrency();
    if args.concurrency > recommended {
        warn!(
            "Concurrency {} exceeds the recommended {} for this machine",
            args.concurrency, recommended
        );
    }

    let scenarios = match &args.scenarios {
        Some(path) => load_scenarios(path)?,
        None => {
            info!("Using built-in suite: {}", args.suite);
            args.suite.scenarios()
        }
    };

    let results_manager = ResultsManager::new(&args.output_file);
    let runner = BenchmarkRunner::new(BenchmarkConfig::from(args), Arc::new(client));
    let report = runner.run(&scenarios).await?;

    results_manager.write(&report)?;
    ResultsManager::print_summary(&report);
    Ok(())
}

fn report_result(result: &OptimizationResult) {
    println!();
    println!(
        "Response Time: {:.2}s (HTTP {})",
        result.metadata.response_time_seconds, result.metadata.status_code
    );

    if let Some(solver) = result.solver_response() {
        println!(
            "Solver Status: {} (0=optimal)",
            solver.status.map_or("-".to_string(), |s| s.to_string())
        );
        println!(
            "Total Cost: {}",
            solver.solution_cost.map_or("-".to_string(), |c| c.to_string())
        );

        let active: Vec<_> = solver
            .vehicle_data
            .iter()
            .filter(|(_, route)| route.stops() > 0)
            .collect();
        if !active.is_empty() {
            println!("Routes Generated:");
            for (vehicle_id, route) in active {
                println!("  Vehicle {}: {} stops", vehicle_id, route.stops());
            }
        }
    } else if let Some(message) = result.error_message() {
        println!("ERROR: {}", message);
    } else {
        println!("{}", result.to_annotated_json());
    }
}
