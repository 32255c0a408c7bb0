//! Counts distinct lines read from stdin.
//!
//! ```text
//! cat access.log | HLL_PRECISION=14 RUST_LOG=debug cargo run --example estimator
//! ```
//!
//! Lines are split between two shards which are merged at the end, the same way
//! independent workers would combine their estimators.
use std::io::{self, BufRead};

use hll_sketch::{HyperLogLog, DEFAULT_PRECISION, DEFAULT_SEED};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let precision = env_or("HLL_PRECISION", DEFAULT_PRECISION);
    let seed = env_or("HLL_SEED", DEFAULT_SEED);

    let mut shards = [
        HyperLogLog::with_seed(precision, seed)?,
        HyperLogLog::with_seed(precision, seed)?,
    ];

    let mut lines = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line?;
        shards[lines % 2].add(&line);
        lines += 1;
    }

    let [mut estimator, other] = shards;
    info!(
        lines,
        shard_1 = estimator.cardinality(),
        shard_2 = other.cardinality(),
        "finished reading input"
    );

    estimator.merge(&other)?;
    println!(
        "lines = {}, distinct ~ {:.0} (+/- {:.2}%)",
        lines,
        estimator.cardinality(),
        estimator.standard_error() * 100.0
    );

    Ok(())
}
