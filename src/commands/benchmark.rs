//! Benchmark command
//!
//! Generates targets for many dealt racks and reports how the search behaved.

use crate::core::{MAX_LARGE, NumberRack};
use crate::solver::{TARGET_RANGE, TargetOrigin, generate_solvable_target};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Outcome of generating one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RackResult {
    origin: TargetOrigin,
    in_range: bool,
    operands: usize,
}

/// Result of a benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub total_racks: usize,
    /// Targets certified by the random search
    pub searched: usize,
    /// Targets built from the largest numbers
    pub fallback: usize,
    /// Fallback targets outside the 100-999 range
    pub out_of_range: usize,
    pub average_attempts: f64,
    pub max_attempts: usize,
    /// Witness size (numbers used) to rack count
    pub operand_distribution: BTreeMap<usize, usize>,
    pub duration: Duration,
    pub racks_per_second: f64,
}

/// Options for [`run_benchmark`]
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkConfig {
    pub count: usize,
    /// Large numbers per rack; random 0-4 when `None`
    pub large: Option<usize>,
    pub seed: u64,
    pub show_progress: bool,
}

/// Generate a target for `count` racks in parallel
///
/// Rack `i` is dealt from a generator seeded with `seed + i`, so a run is
/// reproducible regardless of thread scheduling.
///
/// # Errors
///
/// Returns an error if a large count above four is requested.
pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkResult> {
    if let Some(large) = config.large
        && large > MAX_LARGE
    {
        anyhow::bail!("At most {MAX_LARGE} large numbers per rack, got {large}");
    }

    let pb = if config.show_progress {
        let pb = ProgressBar::new(config.count as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░");
        pb.set_style(style);
        pb.set_message("Generating targets");
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let results = (0..config.count)
        .into_par_iter()
        .map(|i| {
            let result = bench_rack(config.seed.wrapping_add(i as u64), config.large);
            pb.inc(1);
            result
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish_with_message("Complete!");

    let duration = start.elapsed();
    Ok(summarize(&results, duration))
}

fn bench_rack(seed: u64, large: Option<usize>) -> Result<RackResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    let large = large.unwrap_or_else(|| rng.random_range(0..=MAX_LARGE));
    let rack = NumberRack::deal(large, &mut rng).context("Cannot deal a rack")?;
    let target =
        generate_solvable_target(rack.numbers(), &mut rng).context("Cannot generate a target")?;

    Ok(RackResult {
        origin: target.origin,
        in_range: TARGET_RANGE.contains(&target.value),
        operands: target.solution.expr.numbers().len(),
    })
}

fn summarize(results: &[RackResult], duration: Duration) -> BenchmarkResult {
    let mut searched = 0;
    let mut fallback = 0;
    let mut out_of_range = 0;
    let mut total_attempts = 0;
    let mut max_attempts = 0;
    let mut operand_distribution = BTreeMap::new();

    for result in results {
        match result.origin {
            TargetOrigin::Searched { attempts } => {
                searched += 1;
                total_attempts += attempts;
                max_attempts = max_attempts.max(attempts);
            }
            TargetOrigin::Fallback => {
                fallback += 1;
                if !result.in_range {
                    out_of_range += 1;
                }
            }
        }
        *operand_distribution.entry(result.operands).or_insert(0) += 1;
    }

    let total_racks = results.len();
    BenchmarkResult {
        total_racks,
        searched,
        fallback,
        out_of_range,
        average_attempts: if searched == 0 {
            0.0
        } else {
            total_attempts as f64 / searched as f64
        },
        max_attempts,
        operand_distribution,
        duration,
        racks_per_second: if duration.is_zero() {
            0.0
        } else {
            total_racks as f64 / duration.as_secs_f64()
        },
    }
}
