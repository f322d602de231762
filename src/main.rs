//! chainbench - async call-chain micro-benchmark harness
//!
//! Compares a fully awaited forwarding chain against a tail-forwarded one
//! over a simulated data source, and can expose both chains over HTTP for
//! external load drivers.

use anyhow::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use chainbench::benchmark::{format_count, Orchestrator, SuiteType};
use chainbench::config::{BenchConfig, CliArgs};
use chainbench::menu;
use chainbench::server;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn print_banner(config: &BenchConfig, suites: &[SuiteType]) {
    if config.quiet {
        return;
    }

    println!("chainbench v{}", env!("CARGO_PKG_VERSION"));
    println!("====================================");
    println!(
        "Chain: depth={}, delay={}us",
        config.depth, config.delay_us
    );
    println!(
        "Warmup: {}, Threads: {}",
        config.warmup, config.threads
    );
    println!(
        "Suites: {:?}",
        suites.iter().map(|s| s.as_str()).collect::<Vec<_>>()
    );
    println!("====================================\n");
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();
    setup_logging(args.verbose, args.quiet);

    // Build configuration
    let config = BenchConfig::from_cli(&args)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.threads as usize)
        .enable_all()
        .build()?;

    // Serve mode exposes the chains over HTTP instead of measuring them
    if config.serve {
        runtime.block_on(server::serve(&config))?;
        return Ok(());
    }

    let suites = menu::select_suites(config.suite_token.as_deref());
    print_banner(&config, &suites);

    let orchestrator = Orchestrator::new(config.clone());
    let results = runtime.block_on(orchestrator.run_suites(&suites))?;

    // Export to JSON if requested
    if let Some(ref output_path) = config.output_path {
        info!("Writing results to: {:?}", output_path);
        orchestrator.export_json(&results, output_path)?;
    }

    // Export to CSV if requested
    if let Some(ref csv_path) = config.csv_output {
        info!("Writing CSV to: {:?}", csv_path);
        orchestrator.export_csv(&results, csv_path)?;
    }

    if !config.quiet {
        orchestrator.print_comparison();
    }

    // Print summary
    println!("\n====================================");
    println!("BENCHMARK COMPLETE");
    println!("====================================");
    println!("Cases run: {}", results.len());

    let total_invocations: u64 = results.iter().map(|r| r.total_invocations).sum();
    let total_errors: u64 = results.iter().map(|r| r.error_count).sum();
    println!("Total invocations: {}", format_count(total_invocations));
    println!("Total errors: {}", total_errors);

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
