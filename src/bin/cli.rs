//! GEX Analyzer CLI
//!
//! With a request file, analyzes it and prints the JSON report. Without one,
//! runs the canned scenarios. Log verbosity follows `RUST_LOG` (default: info).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gex_analyzer::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "gex_cli", version)]
#[command(about = "Gamma exposure analysis of option-chain snapshots")]
struct Args {
    /// JSON analyze request; the canned scenarios run when omitted
    request: Option<PathBuf>,

    /// JSON analyzer configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

fn print_summary(report: &AnalysisReport) {
    println!("  Price: ${:.2}  Expiry: {}", report.current_price, report.expiration_date);
    println!(
        "  Options: {} ({} calls, {} puts, {} skipped)",
        report.summary.total_options, report.summary.calls, report.summary.puts, report.skipped_rows
    );
    println!("  Total GEX: {:.2}  Regime: {}", report.total_gex, report.regime.label());
    println!(
        "  Weighted net exposure: {:.2}",
        report.weighted_exposure.totals.net
    );

    for wall in &report.patterns.walls {
        println!(
            "  Wall: {} {:.2} (strength {:.2}, gex {:.0})",
            wall.option_type, wall.strike, wall.strength, wall.gex
        );
    }
    for flip in &report.patterns.flips {
        println!("  Flip: {} (strength {:.2})", flip.kind.label(), flip.strength);
    }
    for pin in &report.patterns.pins {
        println!("  Pin: {:.2} ({:.1}% of OI)", pin.strike, pin.oi_ratio * 100.0);
    }

    println!("  Strategies:");
    for s in &report.strategies {
        println!(
            "    [{}] {} - confidence {:.2}, target {:.2}",
            s.direction.label(),
            s.strategy_name,
            s.confidence,
            s.target_price
        );
    }
}

fn run(args: Args) -> GexResult<()> {
    let config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = GexAnalyzer::with_config(config);

    match &args.request {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            let request: serde_json::Value = serde_json::from_str(&json)?;
            let report = analyzer.analyze(&request)?;

            println!("GEX Analysis: {}", path.display());
            print_summary(&report);
            println!("\n{}", serde_json::to_string_pretty(&report)?);
        }
        None => {
            let status = health();
            println!("GEX Analyzer v{} ({})", status.version, status.status);
            println!("================================\n");

            for scenario in example_scenarios() {
                println!("{}: {}", scenario.scenario, scenario.description);
                let report = analyzer.analyze(&scenario.to_request()?)?;
                print_summary(&report);
                println!();
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "analysis failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["gex_cli", "chain.json", "-c", "cfg.json"]).unwrap();
        assert_eq!(args.request, Some(PathBuf::from("chain.json")));
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));

        let args = Args::try_parse_from(["gex_cli", "--config", "cfg.json"]).unwrap();
        assert!(args.request.is_none());

        assert!(Args::try_parse_from(["gex_cli", "a.json", "b.json"]).is_err());
        assert!(Args::try_parse_from(["gex_cli", "--config"]).is_err());
        assert!(Args::try_parse_from(["gex_cli", "--verbose"]).is_err());
    }
}
