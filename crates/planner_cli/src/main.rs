//! Command-line entry point for the horizon lineup planner.
//!
//! Reads a `PlanRequest` JSON document (squad, fixtures, formation,
//! constraints, optional parameter overrides) from a file or stdin,
//! runs `planner_core::plan_horizon`, and writes the resulting
//! `HorizonPlan` or structured `PlannerError` as JSON to a file or
//! stdout. Exit code `0` on a plan, `1` on a returned planner error,
//! `2` on a malformed request this binary itself rejects before
//! handing off to the core.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planner_core::{Constraints, Fixture, Formation, ParameterOverrides, ParameterStore, Player};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "planner-cli")]
#[command(about = "Plan a multi-fixture starting lineup horizon", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plan a horizon from a request document.
    Plan {
        /// Input JSON path, or "-" for stdin.
        #[arg(long, default_value = "-")]
        input: String,

        /// Output JSON path, or "-" for stdout.
        #[arg(long, default_value = "-")]
        output: String,

        /// JSON document deserializing into `ParameterOverrides`, merged
        /// onto the request's inline overrides (request wins on conflict).
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Print the JSON Schema for the request and response DTOs and exit.
    Schema,
}

/// The full request document a caller submits to `plan`.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct PlanRequest {
    squad: Vec<Player>,
    fixtures: Vec<Fixture>,
    formation: Formation,
    #[serde(default)]
    constraints: Constraints,
    #[serde(default)]
    parameters: ParameterOverrides,
}

/// The envelope written to `output`: exactly one of `plan` or `error` is
/// populated, mirroring `plan_horizon`'s `Result`.
#[derive(Debug, Serialize, schemars::JsonSchema)]
struct PlanResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<planner_core::HorizonPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<planner_core::PlannerError>,
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Plan { input, output, params } => run_plan(&input, &output, params.as_deref()),
        Command::Schema => print_schema(),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading request from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading request from {input}"))
    }
}

fn write_output(output: &str, body: &str) -> Result<()> {
    if output == "-" {
        println!("{body}");
        Ok(())
    } else {
        let mut file = std::fs::File::create(output).with_context(|| format!("creating {output}"))?;
        file.write_all(body.as_bytes()).with_context(|| format!("writing {output}"))?;
        Ok(())
    }
}

fn run_plan(input: &str, output: &str, params_path: Option<&std::path::Path>) -> Result<()> {
    let raw = read_input(input)?;
    let request: PlanRequest =
        serde_json::from_str(&raw).context("request does not match the expected PlanRequest shape")?;

    let mut overrides = request.parameters;
    if let Some(path) = params_path {
        let raw = std::fs::read_to_string(path).with_context(|| format!("reading params file {}", path.display()))?;
        let file_overrides: ParameterOverrides =
            serde_json::from_str(&raw).context("params file does not match ParameterOverrides")?;
        overrides = merge_overrides(file_overrides, overrides);
    }

    let params = overrides
        .apply(&ParameterStore::default())
        .map_err(|e| anyhow::anyhow!("invalid parameter overrides: {e}"))?;

    let result = planner_core::plan_horizon(&params, &request.squad, &request.fixtures, &request.formation, &request.constraints);

    let (response, exit_code) = match result {
        Ok(plan) => (PlanResponse { plan: Some(plan), error: None }, 0),
        Err(err) => {
            tracing::warn!(error = %err, "plan_horizon returned an error");
            (PlanResponse { plan: None, error: Some(err) }, 1)
        }
    };

    let body = serde_json::to_string_pretty(&response).context("serializing response")?;
    write_output(output, &body)?;
    std::process::exit(exit_code);
}

/// Request-inline overrides win over `--params` file overrides on a
/// per-field basis, so a caller's ad-hoc tweak always beats a shared
/// config file without needing to know the file's contents.
fn merge_overrides(file: ParameterOverrides, request: ParameterOverrides) -> ParameterOverrides {
    ParameterOverrides {
        condition_floor: request.condition_floor.or(file.condition_floor),
        big_m: request.big_m.or(file.big_m),
        rolling_window_days: request.rolling_window_days.or(file.rolling_window_days),
        shadow_discount_gamma: request.shadow_discount_gamma.or(file.shadow_discount_gamma),
        bench_size: request.bench_size.or(file.bench_size),
    }
}

fn print_schema() -> Result<()> {
    let request_schema = schemars::schema_for!(PlanRequest);
    let response_schema = schemars::schema_for!(PlanResponse);
    let combined = serde_json::json!({
        "request": request_schema,
        "response": response_schema,
    });
    println!("{}", serde_json::to_string_pretty(&combined)?);
    Ok(())
}
