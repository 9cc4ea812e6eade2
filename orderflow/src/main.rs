//! Command line front end for the orderflow pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orderflow::core::Request;
use orderflow::events::LoggingEventSink;
use orderflow::pipeline::{Pipeline, PipelineRun};
use orderflow::testing::scenarios;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orderflow")]
#[command(about = "Validate and price purchase requests", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print each run as JSON instead of a sentence
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in sample requests
    Demo,

    /// Evaluate one request read from a JSON file
    Check {
        /// Path to the request JSON, or `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("orderflow started with verbosity level: {}", cli.verbose);

    let pipeline = Pipeline::standard().with_event_sink(Arc::new(LoggingEventSink::debug()));

    match cli.command {
        Commands::Demo => run_demo(&pipeline, cli.json),
        Commands::Check { input } => run_check(&pipeline, &input, cli.json),
    }
}

fn run_demo(pipeline: &Pipeline, json: bool) -> Result<()> {
    for (index, scenario) in scenarios().into_iter().enumerate() {
        let run = pipeline
            .run(scenario.request)
            .with_context(|| format!("scenario '{}' failed", scenario.name))?;

        if !scenario.expected.matches(&run.outcome) {
            warn!(
                scenario = scenario.name,
                expected = ?scenario.expected,
                actual = %run.outcome,
                "Demo outcome differs from the expected one"
            );
        }

        if json {
            print_run(&run, true)?;
        } else {
            println!("\n=== Processing request {} ({}) ===", index + 1, scenario.name);
            print_run(&run, false)?;
        }
    }
    Ok(())
}

fn run_check(pipeline: &Pipeline, input: &Path, json: bool) -> Result<()> {
    let request = load_request(input, std::io::stdin().lock())?;
    let run = pipeline.run(request)?;
    print_run(&run, json)
}

/// Loads a request from `input`, reading `stdin` when the path is `-`.
fn load_request(input: &Path, mut stdin: impl Read) -> Result<Request> {
    if input.as_os_str() == "-" {
        let mut buffer = String::new();
        stdin
            .read_to_string(&mut buffer)
            .context("failed to read request from stdin")?;
        return Ok(Request::from_json(&buffer)?);
    }

    Request::from_path(input)
        .with_context(|| format!("failed to load request from {}", input.display()))
}

fn print_run(run: &PipelineRun, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(run)?);
    } else {
        println!("{}", run.outcome);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow::testing::{assert_approved_with, assert_rejected_with};
    use std::io::Write;

    const ORDER: &str = r#"{
        "in_stock": true,
        "payment_method": "paypal",
        "shipping_address": "5 Birch Ln",
        "is_premium_customer": true,
        "total_price": 40.0
    }"#;

    #[test]
    fn test_load_request_from_stdin() {
        let request = load_request(Path::new("-"), ORDER.as_bytes()).unwrap();
        let outcome = Pipeline::standard().evaluate(request).unwrap();
        assert_approved_with(&outcome, 36.0);
    }

    #[test]
    fn test_load_request_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ORDER.as_bytes()).unwrap();

        let request = load_request(file.path(), std::io::empty()).unwrap();
        assert_eq!(request.payment_method.as_deref(), Some("paypal"));
    }

    #[test]
    fn test_load_request_reports_bad_input() {
        assert!(load_request(Path::new("-"), "{ not json".as_bytes()).is_err());

        let missing = load_request(Path::new("/nonexistent/order.json"), std::io::empty());
        let message = format!("{:#}", missing.unwrap_err());
        assert!(message.contains("failed to load request from"));
    }

    #[test]
    fn test_demo_scenarios_meet_expectations() {
        let pipeline = Pipeline::standard();
        for scenario in scenarios() {
            let run = pipeline.run(scenario.request).unwrap();
            assert!(scenario.expected.matches(&run.outcome), "{}", scenario.name);
        }
        let outcome = pipeline.evaluate(orderflow::testing::out_of_stock_order()).unwrap();
        assert_rejected_with(&outcome, "out_of_stock");
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from(["orderflow", "--json", "check", "-"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Check { ref input } if input == Path::new("-")));
    }
}
