//! Demonstration of the router's structured logging
//!
//! Runs a short, heavily loaded scenario with detailed (pretty, DEBUG level)
//! output so every arrival, drop, rate switch and completion is visible.
//! Override the filter with `RUST_LOG`, e.g. `RUST_LOG=turboq_core=trace`.

use turboq_core::{init_detailed_simulation_logging, Router, RouterConfig, RunOptions};
use tracing::info;

fn main() -> Result<(), turboq_core::SimError> {
    init_detailed_simulation_logging();

    let router = Router::new(RouterConfig::new(8.0, 3.0, 4))?;
    let run = router.run(&RunOptions::new(3.0, 25).with_seed(7))?;

    let stats = run.stats();
    info!(
        delivered = stats.packets_delivered,
        lost = stats.packets_lost,
        rate_mean = stats.rate_mean,
        termination = run.termination().as_str(),
        "Demo finished"
    );
    Ok(())
}
