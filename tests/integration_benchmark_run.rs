use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use vrp_service_bench::{
    client::SOLVE_PATH, BenchmarkConfig, BenchmarkRunner, FailurePolicy, OptimizationClient,
    ResultsManager, ScenarioConfig,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_solver(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SOLVE_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn ok_template() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "response": { "solver_response": { "status": 0, "solution_cost": 10.0 } }
    }))
}

/// Two scenarios at three iterations each produce a report keyed in list order
/// and a file that reads back in the same order.
#[tokio::test]
async fn run_writes_report_for_every_scenario() -> Result<()> {
    let server = mock_solver(ok_template()).await;
    let client = Arc::new(OptimizationClient::new(Some(&server.uri()))?);

    let config = BenchmarkConfig {
        iterations_per_scenario: 3,
        seed: Some(11),
        ..Default::default()
    };
    let runner = BenchmarkRunner::new(config, client);
    let scenarios = [
        ScenarioConfig::new("B-second-alphabetically", 2, 6),
        ScenarioConfig::new("A-first-alphabetically", 3, 8),
    ];
    let report = runner.run(&scenarios).await?;

    assert_eq!(report.endpoint, server.uri());
    assert_eq!(report.scenarios.len(), 2);
    for scenario in &report.scenarios {
        let iterations: Vec<usize> = scenario.results.iter().map(|r| r.iteration).collect();
        assert_eq!(iterations, vec![1, 2, 3]);
        assert!(scenario.results.iter().all(|r| r.success));
        assert_eq!(scenario.summary.successes, 3);
    }
    assert_eq!(report.total_iterations(), 6);
    assert_eq!(report.total_failures(), 0);

    let requests = server.received_requests().await.expect("request recording");
    assert_eq!(requests.len(), 6);

    let dir = TempDir::new()?;
    let output = dir.path().join("nested").join("results.json");
    ResultsManager::new(&output).write(&report)?;

    let text = std::fs::read_to_string(&output)?;
    let second = text.find("\"B-second-alphabetically\"").expect("B entry");
    let first = text.find("\"A-first-alphabetically\"").expect("A entry");
    assert!(second < first);

    let raw: Value = serde_json::from_str(&text)?;
    assert!(raw["scenarios"].is_object());
    assert_eq!(raw["scenarios"]["A-first-alphabetically"]["config"]["num_vehicles"], json!(3));
    assert_eq!(
        raw["scenarios"]["A-first-alphabetically"]["results"][0]["success"],
        json!(true)
    );

    let loaded = ResultsManager::load(&output)?;
    assert_eq!(loaded.run_id, report.run_id);
    let loaded_names: Vec<&str> = loaded.scenarios.iter().map(|s| s.name()).collect();
    assert_eq!(loaded_names, vec!["B-second-alphabetically", "A-first-alphabetically"]);
    assert_eq!(loaded.total_iterations(), 6);
    Ok(())
}

/// Without failure isolation the first transport failure ends the run.
#[tokio::test]
async fn run_aborts_on_non_json_body() -> Result<()> {
    let server = mock_solver(ResponseTemplate::new(502).set_body_string("Bad Gateway")).await;
    let client = Arc::new(OptimizationClient::new(Some(&server.uri()))?);

    let config = BenchmarkConfig {
        iterations_per_scenario: 3,
        seed: Some(1),
        ..Default::default()
    };
    let runner = BenchmarkRunner::new(config, client);
    let err = runner
        .run(&[ScenarioConfig::new("gateway", 1, 4)])
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Scenario 'gateway' iteration 1 failed"));

    let requests = server.received_requests().await.expect("request recording");
    assert_eq!(requests.len(), 1);
    Ok(())
}

/// With failure isolation every iteration is attempted and recorded.
#[tokio::test]
async fn run_continues_past_failures() -> Result<()> {
    let server = mock_solver(ResponseTemplate::new(502).set_body_string("Bad Gateway")).await;
    let client = Arc::new(OptimizationClient::new(Some(&server.uri()))?);

    let config = BenchmarkConfig {
        iterations_per_scenario: 2,
        failure_policy: FailurePolicy::Continue,
        seed: Some(1),
        ..Default::default()
    };
    let runner = BenchmarkRunner::new(config, client);
    let report = runner
        .run(&[
            ScenarioConfig::new("first", 1, 4),
            ScenarioConfig::new("second", 2, 5),
        ])
        .await?;

    assert_eq!(report.total_iterations(), 4);
    assert_eq!(report.total_failures(), 4);
    for scenario in &report.scenarios {
        assert!(scenario.results.iter().all(|r| !r.success && r.error.is_some()));
        assert_eq!(scenario.summary.success_rate, 0.0);
    }
    Ok(())
}

/// Invalid scenarios are rejected before any request is sent.
#[tokio::test]
async fn run_rejects_invalid_scenarios_up_front() -> Result<()> {
    let server = mock_solver(ok_template()).await;
    let client = Arc::new(OptimizationClient::new(Some(&server.uri()))?);

    let runner = BenchmarkRunner::new(BenchmarkConfig::default(), client);
    let result = runner
        .run(&[
            ScenarioConfig::new("fine", 2, 6),
            ScenarioConfig::new("no-tasks", 2, 1),
        ])
        .await;
    assert!(result.is_err());

    let requests = server.received_requests().await.expect("request recording");
    assert!(requests.is_empty());
    Ok(())
}

/// Scenarios run concurrently still come back in list order.
#[tokio::test]
async fn concurrent_run_preserves_scenario_order() -> Result<()> {
    let server = mock_solver(ok_template()).await;
    let client = Arc::new(OptimizationClient::new(Some(&server.uri()))?);

    let config = BenchmarkConfig {
        iterations_per_scenario: 2,
        concurrency: 3,
        seed: Some(5),
        ..Default::default()
    };
    let runner = BenchmarkRunner::new(config, client);
    let scenarios: Vec<ScenarioConfig> = (1..=5)
        .map(|v| ScenarioConfig::new(format!("fleet-{}", v), v, 2 * v + 1))
        .collect();
    let report = runner.run(&scenarios).await?;

    let names: Vec<&str> = report.scenarios.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["fleet-1", "fleet-2", "fleet-3", "fleet-4", "fleet-5"]);
    assert_eq!(report.total_iterations(), 10);
    Ok(())
}
