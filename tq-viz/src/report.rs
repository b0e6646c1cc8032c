//! End-of-run text report

use std::fmt;

use turboq_core::SimulationRun;
use turboq_metrics::TheoreticalComparison;

const WIDTH: usize = 50;

/// Statistics of one run next to the M/M/1/K prediction for its base rate.
///
/// # Example
/// ```
/// use turboq_core::{Router, RouterConfig};
/// use turboq_viz::RunReport;
///
/// let run = Router::new(RouterConfig::default())?.simulate(49.0, 200, Some(42))?;
/// let text = RunReport::new(&run).to_string();
/// assert!(text.contains("Packets delivered"));
/// # Ok::<(), turboq_core::SimError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RunReport<'a> {
    run: &'a SimulationRun,
    comparison: TheoreticalComparison,
}

impl<'a> RunReport<'a> {
    pub fn new(run: &'a SimulationRun) -> Self {
        Self {
            run,
            comparison: TheoreticalComparison::for_run(run),
        }
    }

    pub fn comparison(&self) -> &TheoreticalComparison {
        &self.comparison
    }
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.run.stats();
        let rule = "=".repeat(WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "Statistics ({} policy)", self.run.policy_name())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Simulation time: {:.6} seconds", stats.simulation_duration)?;
        writeln!(f, "Packets delivered: {}", stats.packets_delivered)?;
        writeln!(f, "Packets lost: {}", stats.packets_lost)?;
        writeln!(f, "Loss probability: {:.2}%", stats.drop_probability * 100.0)?;
        writeln!(f, "Server utilization: {:.2}%", stats.utilization * 100.0)?;
        writeln!(f, "Average waiting time: {:.4} seconds", stats.avg_waiting_time)?;
        writeln!(f, "Throughput: {:.4} packets/second", stats.throughput)?;
        writeln!(
            f,
            "Service rate: mean {:.4}, std dev {:.4}",
            stats.rate_mean, stats.rate_std_dev
        )?;
        writeln!(f, "Stopped: {}", self.run.termination().as_str())?;

        writeln!(f)?;
        writeln!(f, "{:-^width$}", " Theoretical comparison ", width = WIDTH)?;
        writeln!(
            f,
            "Rho (traffic intensity): {:.4}",
            self.comparison.traffic_intensity
        )?;
        writeln!(
            f,
            "Theoretical loss probability (M/M/1/K): {:.2}%",
            self.comparison.theoretical_loss_probability * 100.0
        )?;
        write!(f, "{rule}")
    }
}

/// Print the report for `run` to stdout.
pub fn print_report(run: &SimulationRun) {
    println!("\n{}", RunReport::new(run));
}
