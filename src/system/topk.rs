use std::cmp::Ordering;

use super::snapshot::ProcessSample;

/// How many processes the report lists.
pub const TOP_PROCESS_COUNT: usize = 5;

/// Select the `k` samples with the highest CPU utilization, descending.
///
/// The sort is stable: equal CPU values keep their enumeration order. Inputs
/// shorter than `k` come back whole, still sorted.
pub fn top_by_cpu(mut samples: Vec<ProcessSample>, k: usize) -> Vec<ProcessSample> {
    samples.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(Ordering::Equal)
    });
    samples.truncate(k);
    samples
}
