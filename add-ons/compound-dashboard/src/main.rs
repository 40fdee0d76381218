//! `compound`: terminal dashboard for stock chat, research and comparison.
//!
//! ## Usage
//!
//! ```text
//! compound                   # open the dashboard (default)
//! compound dash              # same
//! compound activate <NAME>   # process one stock headless and report the outcome
//! compound help              # print usage
//! ```

use compound_core::{ActivationOutcome, DashboardConfig, HttpStockBackend, SessionActivator};
use compound_dashboard::{telemetry, tui, DashboardApp};
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("[compound] .env not loaded: {}", e);
        }
    }

    let args: Vec<String> = std::env::args().collect();
    let sub = args.get(1).map(|s| s.as_str()).unwrap_or("dash");

    let result = match sub {
        "dash" => run_dashboard(),
        "activate" => run_activate(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(0)
        }
        other => {
            eprintln!(
                "Unknown subcommand '{}'. Use: compound dash | compound activate <NAME> | compound help",
                other
            );
            Ok(1)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("compound {}: {}", sub, e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Compound dashboard v{}", VERSION);
    println!();
    println!("Usage: compound [COMMAND]");
    println!();
    println!("Commands:");
    println!("  dash              Open the terminal dashboard (default)");
    println!("  activate <NAME>   Process one stock and print the outcome");
    println!("  help              Print this help message");
    println!();
    println!("Configure via COMPOUND_CONFIG (default config/compound.toml) or COMPOUND__* env vars.");
}

fn run_dashboard() -> Result<i32, Box<dyn std::error::Error>> {
    let config = DashboardConfig::load()?;
    let _guard = telemetry::init_file_logging(&config)?;
    tracing::info!(
        backend = %config.process_stock_url(),
        timeout = ?config.request_timeout(),
        "dashboard starting"
    );

    tui::run(DashboardApp::from_config(&config))?;
    Ok(0)
}

fn run_activate(name: &[String]) -> Result<i32, Box<dyn std::error::Error>> {
    let config = DashboardConfig::load()?;
    telemetry::init_stderr_logging(&config)?;

    let identifier = name.join(" ");
    let backend = Arc::new(HttpStockBackend::from_config(&config));
    let mut activator = SessionActivator::new(backend).with_timeout(config.request_timeout());

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async {
        tokio::select! {
            outcome = activator.activate(&identifier) => outcome,
            _ = tokio::signal::ctrl_c() => ActivationOutcome::Failed("Request cancelled".to_string()),
        }
    });

    match outcome {
        ActivationOutcome::Ready => {
            println!("Ready: {} is available for chat.", identifier.trim());
            Ok(0)
        }
        ActivationOutcome::Failed(message) => {
            eprintln!("Error: {}", message);
            Ok(1)
        }
        ActivationOutcome::Skipped => {
            eprintln!("Nothing to process: enter a stock name, e.g. `compound activate AAPL`.");
            Ok(2)
        }
    }
}
