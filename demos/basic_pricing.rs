//! Example: Black-Scholes pricing, greeks and implied volatility
//!
//! Run with: cargo run --example basic_pricing

use gex_analyzer::prelude::*;

fn main() {
    // Option parameters
    let spot = 100.0;
    let strike = 100.0;
    let time = 1.0; // 1 year
    let rate = 0.05; // 5% risk-free rate
    let vol = 0.20; // 20% volatility

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.2} years ({:.0} days)", time, time * 365.0);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let call_price = bs_price(spot, strike, rate, vol, time, OptionType::Call);
    println!("Call Price: ${:.4}", call_price);

    let put_price = bs_price(spot, strike, rate, vol, time, OptionType::Put);
    println!("Put Price:  ${:.4}", put_price);

    // Put-call parity: C - P = S - K*e^(-rT)
    let parity_lhs = call_price - put_price;
    let parity_rhs = spot - strike * (-rate * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.6}", (parity_lhs - parity_rhs).abs());

    // Moneyness
    let itm = bs_price(110.0, strike, rate, vol, time, OptionType::Call);
    let otm = bs_price(90.0, strike, rate, vol, time, OptionType::Call);
    println!("\nITM call (S=110): ${:.4}", itm);
    println!("OTM call (S=90):  ${:.4}", otm);

    // Degenerate inputs fall back to zero with a status flag
    let expired = bs_value(spot, strike, rate, vol, 0.0, OptionType::Call);
    println!("Expired call:     ${:.4} ({:?})", expired.price, expired.status);

    println!("\n=== Greeks (Call) ===\n");
    let greeks = bs_greeks(spot, strike, rate, vol, time, OptionType::Call);
    println!("Delta:  {:.4}", greeks.delta);
    println!("Gamma:  {:.4}", greeks.gamma);
    println!("Vega:   {:.4}", greeks.vega);

    println!("\n=== Implied Volatility ===\n");
    let market_price = call_price + 0.50; // Simulated market price
    let iv = implied_volatility(market_price, spot, strike, rate, time, OptionType::Call);
    println!(
        "Market price ${:.4} implies vol: {:.2}% ({:?} after {} iterations)",
        market_price,
        iv.volatility * 100.0,
        iv.status,
        iv.iterations
    );

    // Below intrinsic: no volatility reproduces it
    let iv = implied_volatility(0.01, 150.0, strike, rate, time, OptionType::Call);
    println!(
        "Market price $0.0100 deep ITM: {:.2}% ({:?})",
        iv.volatility * 100.0,
        iv.status
    );

    println!("\n=== Exposure Level Statistics ===\n");
    let calculator = ExposureCalculator::new();
    let snapshot = calculator.compute_exposure(
        spot,
        &[95.0, 100.0, 105.0],
        &[0.01, 0.02, 0.015],
        &[1000.0, 2000.0, 1500.0],
    );
    if let Some(levels) = calculator.analyze_levels(&snapshot.exposures()) {
        println!("Mean:     {:.2}", levels.mean);
        println!("Std:      {:.2}", levels.std);
        println!("Range:    {:.2} .. {:.2}", levels.min, levels.max);
        println!("IQR:      {:.2} .. {:.2}", levels.percentile_25, levels.percentile_75);
        println!("Barriers: {} of {}", levels.significant_barriers, levels.count);
    }
}
