//! Command-line front end: sweep memory sizes and print hit rates.
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagesim::common::config::{DEFAULT_MAX_CAPACITY, DEFAULT_MIN_CAPACITY};
use pagesim::sim::SweepPoint;
use pagesim::{
    Policy, Result, SimConfig, SimulationResult, SweepRunner, DEFAULT_OUTER_MEMORY_SIZE,
    DEFAULT_PAGE_SIZE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare LRU and CLOCK page replacement hit rates")]
struct Args {
    /// Instructions per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Total instructions in the simulated program
    #[arg(long, default_value_t = DEFAULT_OUTER_MEMORY_SIZE)]
    memory_size: usize,

    /// Smallest resident memory size, in pages
    #[arg(long, default_value_t = DEFAULT_MIN_CAPACITY)]
    min_capacity: usize,

    /// Largest resident memory size, in pages
    #[arg(long, default_value_t = DEFAULT_MAX_CAPACITY)]
    max_capacity: usize,

    /// Policy to simulate (repeatable; default: lru and clock)
    #[arg(short, long = "policy")]
    policies: Vec<Policy>,

    /// References per simulation (default: one per instruction)
    #[arg(long)]
    accesses: Option<usize>,

    /// Base seed for a reproducible sweep
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,
}

impl Args {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig::default()
            .with_page_size(self.page_size)
            .with_outer_memory_size(self.memory_size)
            .with_capacity_range(self.min_capacity..=self.max_capacity);
        if !self.policies.is_empty() {
            config = config.with_policies(self.policies.clone());
        }
        if let Some(accesses) = self.accesses {
            config = config.with_access_count(accesses);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = args.config();
    let runner = SweepRunner::from_config(&config)?;
    info!(
        pages = runner.driver().universe().total_pages(),
        capacities = ?config.capacity_range,
        accesses = config.access_count(),
        jobs = args.jobs,
        "starting sweep"
    );

    let points: Vec<SweepPoint> = runner.run_config(&config)?.points().collect();
    let results: Vec<Result<SimulationResult>> = if args.jobs > 1 {
        runner.run_parallel(
            config.capacity_range.clone(),
            &config.policies,
            config.access_count(),
            args.jobs,
        )?
    } else {
        runner.run_config(&config)?.collect()
    };

    let mut current = None;
    for (point, result) in points.into_iter().zip(results) {
        if current != Some(point.capacity) {
            current = Some(point.capacity);
            println!("\nMemory size: {} pages", point.capacity);
        }
        println!("{}", report_line(&point, &result));
    }

    Ok(())
}

/// One report line per sweep point, failed points included.
fn report_line(point: &SweepPoint, result: &Result<SimulationResult>) -> String {
    match result {
        Ok(result) => result.to_string(),
        Err(e) => format!(
            "{:<5} capacity {:>3}: failed ({})",
            point.policy, point.capacity, e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesim::{AccessStats, Error};

    fn point(capacity: usize, policy: Policy) -> SweepPoint {
        SweepPoint {
            ordinal: 0,
            capacity,
            policy,
        }
    }

    #[test]
    fn test_report_line_success() {
        let result = AccessStats {
            hits: 3,
            misses: 1,
            evictions: 0,
        }
        .finish(4, Policy::Lru);

        let line = report_line(&point(4, Policy::Lru), &Ok(result));
        assert!(line.contains("75.00%"));
    }

    #[test]
    fn test_report_line_keeps_failed_point() {
        let err = Error::OutOfRangeReference {
            index: 500,
            limit: 400,
        };
        let line = report_line(&point(12, Policy::Clock), &Err(err));

        assert!(line.starts_with("Clock capacity  12: failed ("));
        assert!(line.contains("Instruction index 500 out of range [0, 400)"));
    }
}
