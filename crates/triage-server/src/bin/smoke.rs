//! Fixture-driven smoke check for the analyze endpoint.
//!
//! Posts each `{name, data, expected_decision}` record from a fixture
//! file to a running server, compares the returned decision against the
//! expectation, and exits non-zero on any failure or error.
//!
//! Usage: triage-smoke [fixture-file]
//! The target server is taken from API_URL (default http://localhost:8080).

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FixtureCase {
    name: String,
    data: serde_json::Value,
    expected_decision: String,
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

#[tokio::main]
async fn main() -> Result<()> {
    let api_url =
        std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let fixture_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fixtures/transactions.json".to_string());

    let raw = std::fs::read_to_string(&fixture_path)
        .with_context(|| format!("failed to read fixture file {}", fixture_path))?;
    let cases: Vec<FixtureCase> =
        serde_json::from_str(&raw).context("failed to parse fixture file")?;

    println!("Loaded {} test cases from {}", cases.len(), fixture_path);
    println!("Target: {}/api/analyze\n", api_url);

    let client = reqwest::Client::new();
    let total = cases.len();
    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut errors = 0usize;

    for (i, case) in cases.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, total, case.name);
        println!("{}   Expected: {}{}", GRAY, case.expected_decision, RESET);

        match run_case(&client, &api_url, case).await {
            Ok(outcome) => {
                if outcome.actual == case.expected_decision {
                    println!(
                        "{}   PASS: {} (confidence: {:.0}%){}",
                        GREEN,
                        outcome.actual,
                        outcome.confidence * 100.0,
                        RESET
                    );
                    passed += 1;
                } else {
                    println!(
                        "{}   FAIL: got {}, expected {}{}",
                        RED, outcome.actual, case.expected_decision, RESET
                    );
                    failed += 1;
                }
                println!(
                    "{}   Processing time: {}ms{}\n",
                    GRAY, outcome.processing_time_ms, RESET
                );
            }
            Err(err) => {
                println!("{}   ERROR: {}{}\n", RED, err, RESET);
                errors += 1;
            }
        }
    }

    println!("Summary");
    println!("  Total:  {}", total);
    println!("  {}Passed: {}{}", GREEN, passed, RESET);
    println!("  {}Failed: {}{}", RED, failed, RESET);
    println!("  {}Errors: {}{}", YELLOW, errors, RESET);
    if total > 0 {
        println!(
            "  Pass rate: {:.1}%",
            passed as f64 / total as f64 * 100.0
        );
    }

    if failed > 0 || errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

struct CaseOutcome {
    actual: String,
    confidence: f64,
    processing_time_ms: u64,
}

async fn run_case(
    client: &reqwest::Client,
    api_url: &str,
    case: &FixtureCase,
) -> Result<CaseOutcome> {
    let response = client
        .post(format!("{}/api/analyze", api_url))
        .json(&case.data)
        .send()
        .await
        .context("request failed")?;

    let status = response.status();
    let body: serde_json::Value = response.json().await.context("invalid response body")?;

    if !status.is_success() {
        let message = body["error"].as_str().unwrap_or("unknown error");
        anyhow::bail!("HTTP {}: {}", status, message);
    }

    let actual = body["decision"]["decision"]
        .as_str()
        .context("response carries no decision")?
        .to_string();

    Ok(CaseOutcome {
        actual,
        confidence: body["decision"]["confidence"].as_f64().unwrap_or(0.0),
        processing_time_ms: body["processing_time_ms"].as_u64().unwrap_or(0),
    })
}
