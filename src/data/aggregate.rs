use std::collections::BTreeMap;

use super::bin::{Bins, MAX_BINS, MIN_BINS};
use super::model::CropRecord;

// ---------------------------------------------------------------------------
// Per-bin aggregation: label counts and the best crop
// ---------------------------------------------------------------------------

/// The winning crop of one temperature interval.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCrop {
    /// Interval index (ascending with temperature).
    pub bin: usize,
    /// Most frequently recommended crop in the interval.
    pub label: String,
    /// How often that crop was recommended in the interval.
    pub count: usize,
    /// Total records in the interval, across all crops.
    pub bin_total: usize,
}

/// Result of one binning + aggregation pass, ready for presentation.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The fitted intervals; `None` when there was nothing to bin.
    pub bins: Option<Bins>,
    /// One row per non-empty interval, in ascending bin order.
    pub best: Vec<BestCrop>,
}

impl Analysis {
    /// The result for an empty dataset: no bins, no rows.
    pub fn empty() -> Self {
        Analysis {
            bins: None,
            best: Vec::new(),
        }
    }
}

/// Run the bin → count → arg-max pipeline for the given bin count.
///
/// This is the whole recomputation triggered by a bin-count change; the
/// cleaned records themselves are never touched. `bin_count` is clamped to
/// `[MIN_BINS, MAX_BINS]`.
pub fn analyze(records: &[CropRecord], bin_count: usize) -> Analysis {
    let bin_count = bin_count.clamp(MIN_BINS, MAX_BINS);
    let Some(bins) = Bins::fit(records, bin_count) else {
        return Analysis::empty();
    };

    let assignment = bins.assign(records);
    let counts = label_counts(records, &assignment, bins.count());
    let best = best_per_bin(&counts);

    Analysis {
        bins: Some(bins),
        best,
    }
}

/// Count recommendations per (interval, crop) pair. `assignment[i]` is the
/// interval index of `records[i]`.
pub fn label_counts(
    records: &[CropRecord],
    assignment: &[usize],
    bin_count: usize,
) -> Vec<BTreeMap<String, usize>> {
    let mut counts = vec![BTreeMap::new(); bin_count];
    for (record, &bin) in records.iter().zip(assignment) {
        *counts[bin].entry(record.label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Pick the most frequent crop of every non-empty interval.
///
/// Ties on count resolve to the lexicographically smallest label: the scan
/// walks each interval's counts in ascending label order and keeps the first
/// strict maximum. The rule is user-visible, so changing it changes rendered
/// results.
pub fn best_per_bin(counts: &[BTreeMap<String, usize>]) -> Vec<BestCrop> {
    counts
        .iter()
        .enumerate()
        .filter_map(|(bin, labels)| {
            let bin_total: usize = labels.values().sum();
            let mut best: Option<(&String, usize)> = None;
            for (label, &count) in labels {
                if best.map_or(true, |(_, best_count)| count > best_count) {
                    best = Some((label, count));
                }
            }
            best.map(|(label, count)| BestCrop {
                bin,
                label: label.clone(),
                count,
                bin_total,
            })
        })
        .collect()
}
