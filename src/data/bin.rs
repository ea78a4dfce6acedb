use super::model::CropRecord;

// ---------------------------------------------------------------------------
// Equal-width temperature bins
// ---------------------------------------------------------------------------

/// Smallest selectable bin count.
pub const MIN_BINS: usize = 3;
/// Largest selectable bin count.
pub const MAX_BINS: usize = 15;
/// Bin count before the user touches the slider.
pub const DEFAULT_BINS: usize = 5;

/// N contiguous equal-width intervals spanning `[min, max]` of the cleaned
/// temperatures. Interval `i` covers `[min + i·width, min + (i+1)·width)`;
/// the last interval is closed on both ends so the global maximum stays
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bins {
    min: f64,
    width: f64,
    count: usize,
}

impl Bins {
    /// Fit `count` bins to the temperature range of `records`.
    /// Returns `None` for an empty record set.
    pub fn fit(records: &[CropRecord], count: usize) -> Option<Self> {
        if records.is_empty() || count == 0 {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for r in records {
            min = min.min(r.temperature);
            max = max.max(r.temperature);
        }
        Some(Bins {
            min,
            width: (max - min) / count as f64,
            count,
        })
    }

    /// Number of intervals.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Interval index for a temperature. Values at or above the global
    /// maximum clamp into the last bin; a degenerate zero-width range maps
    /// everything to the first bin.
    pub fn index_of(&self, temperature: f64) -> usize {
        if self.width <= 0.0 {
            return 0;
        }
        let i = ((temperature - self.min) / self.width).floor();
        (i as usize).min(self.count - 1)
    }

    /// `(lower, upper)` temperature edges of interval `index`.
    pub fn edges(&self, index: usize) -> (f64, f64) {
        (
            self.min + index as f64 * self.width,
            self.min + (index + 1) as f64 * self.width,
        )
    }

    /// Interval index for every record, in record order.
    pub fn assign(&self, records: &[CropRecord]) -> Vec<usize> {
        records.iter().map(|r| self.index_of(r.temperature)).collect()
    }
}

/// Display label for interval `index`, ascending with temperature:
/// "Bin 1" … "Bin N".
pub fn bin_label(index: usize) -> String {
    format!("Bin {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(temps: &[f64]) -> Vec<CropRecord> {
        temps
            .iter()
            .map(|&t| CropRecord {
                temperature: t,
                label: "rice".to_string(),
            })
            .collect()
    }

    #[test]
    fn fit_requires_records() {
        assert!(Bins::fit(&[], 5).is_none());
    }

    #[test]
    fn global_max_lands_in_last_bin() {
        let recs = records(&[10.0, 20.0, 30.0]);
        let bins = Bins::fit(&recs, 4).unwrap();
        assert_eq!(bins.index_of(30.0), 3);
        // Nothing overflows into a phantom fifth bucket.
        assert!(bins.assign(&recs).iter().all(|&i| i < 4));
    }

    #[test]
    fn inner_edges_are_half_open() {
        // [0, 30] in 3 bins: edges at 10 and 20 belong to the upper bin.
        let bins = Bins::fit(&records(&[0.0, 30.0]), 3).unwrap();
        assert_eq!(bins.index_of(0.0), 0);
        assert_eq!(bins.index_of(9.999), 0);
        assert_eq!(bins.index_of(10.0), 1);
        assert_eq!(bins.index_of(20.0), 2);
        assert_eq!(bins.index_of(30.0), 2);
    }

    #[test]
    fn edges_partition_the_range() {
        let bins = Bins::fit(&records(&[10.0, 40.0]), 3).unwrap();
        assert_eq!(bins.edges(0), (10.0, 20.0));
        assert_eq!(bins.edges(1), (20.0, 30.0));
        assert_eq!(bins.edges(2), (30.0, 40.0));
    }

    #[test]
    fn degenerate_single_value_maps_to_first_bin() {
        let recs = records(&[25.0, 25.0, 25.0]);
        let bins = Bins::fit(&recs, 5).unwrap();
        assert_eq!(bins.assign(&recs), vec![0, 0, 0]);
    }

    #[test]
    fn labels_ascend_with_temperature() {
        assert_eq!(bin_label(0), "Bin 1");
        assert_eq!(bin_label(14), "Bin 15");
    }
}
