// SPDX-License-Identifier: MIT
//! # Overlapping Interval Partitioning
//!
//! Splits the interval `[0, length)` into `n` equally sized sub-intervals that
//! jointly cover it, such that:
//! - the sub-interval size is admissible under a [`DimSpec`],
//! - consecutive sub-intervals overlap by at least `ceil(size * overlap_fraction)`,
//! - the solution with the fewest sub-intervals wins, and among those the one
//!   with the smallest sub-interval size.
//!
//! The search is exhaustive over a small range (tile count and admissible
//! sizes), so tie-breaks are exact and reproducible.

use tracing::trace;

use crate::dim_spec::DimSpec;
use crate::error::{GeomError, GeomResult};

/// Sub-interval size plus start positions; sub-interval `i` is
/// `[starts[i], starts[i] + size)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalSplitSolution {
    pub size: u32,
    pub starts: Vec<u32>,
}

impl IntervalSplitSolution {
    pub fn count(&self) -> usize {
        self.starts.len()
    }
}

/// Find the minimal partition of `[0, length)` into overlapping sub-intervals.
///
/// # Errors
/// - `InvalidArgument` if `length == 0` or `overlap_fraction` is outside `[0, 1)`
/// - `InfeasiblePartition` if no candidate in the search range is valid
pub fn split_in_overlapping_intervals(
    length: u32,
    spec: &DimSpec,
    overlap_fraction: f64,
) -> GeomResult<IntervalSplitSolution> {
    if length == 0 {
        return Err(GeomError::InvalidArgument { name: "length", value: "0".to_string() });
    }
    if !(0.0..1.0).contains(&overlap_fraction) {
        return Err(GeomError::InvalidArgument {
            name: "overlap_fraction",
            value: overlap_fraction.to_string(),
        });
    }
    let infeasible = || GeomError::InfeasiblePartition { length, overlap_fraction, spec: *spec };

    // largest admissible sub-interval that still fits in `length`
    let max_size = spec.round_down(length.min(spec.max_value()));
    if max_size == 0 || max_size > length {
        return Err(infeasible());
    }

    let n_min = length.div_ceil(max_size);
    let n_max = (f64::from(length) / (f64::from(max_size) * (1.0 - overlap_fraction))).ceil() as u32 + 2;

    for n in n_min..=n_max {
        for size in spec.valid_values().into_iter().filter(|&s| s > 0 && s <= max_size) {
            let candidate = IntervalSplitSolution {
                size,
                starts: spaced_ints(length - size, n),
            };
            if is_solution_valid(&candidate, spec, overlap_fraction, length) {
                trace!(length, n, size, "interval split found");
                return Ok(candidate);
            }
        }
    }

    Err(infeasible())
}

/// `n` evenly spaced integers over `[0, max]`, first `0`, last `max`.
///
/// Position `i` is `floor(i * max / (n - 1))`, computed exactly.
pub fn spaced_ints(max: u32, n: u32) -> Vec<u32> {
    match n {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let span = u64::from(max);
            let last = u64::from(n - 1);
            (0..u64::from(n)).map(|i| (i * span / last) as u32).collect()
        }
    }
}

/// Checks size admissibility, full coverage of `[0, length)` and minimum overlap.
pub fn is_solution_valid(
    solution: &IntervalSplitSolution,
    spec: &DimSpec,
    overlap_fraction: f64,
    length: u32,
) -> bool {
    if !spec.is_valid(solution.size) || solution.starts.is_empty() {
        return false;
    }
    if covered_len(solution) < u64::from(length) {
        return false;
    }

    let min_overlap = (f64::from(solution.size) * overlap_fraction).ceil() as i64;
    solution.starts.windows(2).all(|pair| {
        let overlap = i64::from(pair[0]) + i64::from(solution.size) - i64::from(pair[1]);
        overlap >= min_overlap
    })
}

/// Number of distinct integer positions covered by the union of sub-intervals.
fn covered_len(solution: &IntervalSplitSolution) -> u64 {
    let mut starts = solution.starts.clone();
    starts.sort_unstable();
    let size = u64::from(solution.size);

    let mut covered = 0u64;
    let mut reach = 0u64; // exclusive end of everything counted so far
    for start in starts {
        let (start, end) = (u64::from(start), u64::from(start) + size);
        if end > reach {
            covered += end - start.max(reach);
            reach = end;
        }
    }
    covered
}
