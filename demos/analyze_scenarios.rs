//! Example: snapshot and history analysis end to end
//!
//! Run with: cargo run --example analyze_scenarios

use gex_analyzer::prelude::*;

fn main() -> GexResult<()> {
    tracing_subscriber::fmt::init();

    let analyzer = GexAnalyzer::new();

    println!("=== Snapshot Scenarios ===\n");
    let mut positive_totals = ExposureTotals::default();
    for scenario in example_scenarios() {
        let report = analyzer.analyze(&scenario.to_request()?)?;
        println!(
            "{:<28} total GEX {:>12.0}  {:<15} walls {} flips {} pins {}",
            scenario.scenario,
            report.total_gex,
            report.regime.label(),
            report.patterns.walls.len(),
            report.patterns.flips.len(),
            report.patterns.pins.len()
        );
        if report.regime == GammaRegime::Positive {
            positive_totals = report.weighted_exposure.totals;
        }
    }

    println!("\n=== History Analysis ===\n");
    // Rally, then a pullback
    let bars: Vec<OhlcBar> = (0..80)
        .map(|i| {
            let t = i as f64;
            let close = if i < 50 {
                100.0 * (1.0 + 0.004 * t)
            } else {
                120.0 * (1.0 - 0.006 * (t - 50.0))
            };
            OhlcBar::new(close, close * 1.004, close * 0.996, close, 1_000.0 + 10.0 * t)
        })
        .collect();

    let history = analyzer.analyze_history(&bars, &positive_totals)?;
    println!("Last close: {:.2}", history.price);

    println!("\nRegimes:");
    for r in &history.regimes {
        println!(
            "  {:<8} bars {:>2}..{:>2}  avg return {:+.4}  confidence {:.2}",
            r.kind.label(),
            r.start_idx,
            r.end_idx,
            r.characteristics.avg_return,
            r.confidence
        );
    }

    println!("\nTop patterns:");
    for c in history.classifications.iter().take(5) {
        println!(
            "  {:<22} {:<8} confidence {:.2} -> {:?}",
            c.description,
            c.kind.label(),
            c.confidence,
            c.recommendation
        );
    }

    println!("\nSignals:");
    for s in &history.signals {
        println!(
            "  {:<5} {:?} confidence {:.2}  stop {:.2} target {:.2}  ({})",
            s.direction.label(),
            s.source,
            s.confidence,
            s.stop.unwrap_or(0.0),
            s.target.unwrap_or(0.0),
            s.rationale
        );
    }

    if let Some(bt) = &history.backtest {
        println!(
            "\nSignal check: {} trades, win rate {:.0}%, avg return {:.2}%",
            bt.total_trades,
            bt.win_rate * 100.0,
            bt.avg_return * 100.0
        );
    }

    Ok(())
}
