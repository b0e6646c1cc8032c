//! Reference scenario: λ = 5, μ = 3, K = 10 over 49 simulated seconds.
//!
//! Usage: `cargo run --example router -- [config.json] [seed]`
//!
//! Set `RUST_LOG=turboq_core=debug` to follow every event.

use std::error::Error;
use std::fs;

use turboq::prelude::*;
use turboq::viz::charts::occupancy::create_occupancy_chart_with_config;
use turboq::viz::charts::state_distribution::create_state_distribution_chart_with_config;
use turboq::viz::charts::ChartConfig;

fn main() -> Result<(), Box<dyn Error>> {
    init_simulation_logging();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => RouterConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => RouterConfig::new(5.0, 3.0, 10),
    };
    let mut options = RunOptions::new(49.0, 200);
    if let Some(seed) = args.next() {
        options = options.with_seed(seed.parse()?);
    }

    let router = Router::new(config)?;
    let run = router.run(&options)?;
    print_report(&run);

    let distribution = StateDistribution::from_history(run.occupancy());
    println!("\nTime-averaged packets in system: {:.4}", distribution.mean_packets());
    for (n, p) in distribution.probabilities.iter().enumerate() {
        println!("  P[{n:>2}] = {p:.4}");
    }

    let seeds: Vec<u64> = (1..=30).collect();
    let summary = replicate(&router, &options, &seeds)?;
    let loss = summary.loss_probability;
    println!(
        "\nLoss over {} replications: {:.2}% (95% CI {:.2}% .. {:.2}%)",
        seeds.len(),
        loss.estimate * 100.0,
        loss.low * 100.0,
        loss.high * 100.0
    );

    // Wide canvas so the 49 s time axis stays readable
    let output_dir = std::env::temp_dir().join("turboq");
    fs::create_dir_all(&output_dir)?;
    let occupancy = ChartConfig::new("Packets in System")
        .x_label("Time (s)")
        .y_label("Packets")
        .dimensions(1600, 900);
    let states = ChartConfig::new("System State Distribution")
        .x_label("Packets in System")
        .y_label("Probability")
        .dimensions(1600, 900);
    let charts = create_occupancy_chart_with_config(&run, output_dir.join("occupancy.svg"), occupancy)
        .and_then(|()| {
            create_state_distribution_chart_with_config(
                &distribution,
                output_dir.join("state_distribution.svg"),
                states,
            )
        });
    match charts {
        Ok(()) => println!("Charts written to {}", output_dir.display()),
        Err(e) => eprintln!("Skipping charts: {e}"),
    }

    Ok(())
}
