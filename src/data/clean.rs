use super::model::{CleanReport, CleanedDataset, CropRecord, RawRecord};

// ---------------------------------------------------------------------------
// Cleaning: missing values, then IQR temperature outliers
// ---------------------------------------------------------------------------

/// Clean raw rows into analysable records.
///
/// 1. Drop rows missing `temperature` or `label` (non-finite temperatures
///    count as missing).
/// 2. Compute Q1/Q3 of temperature over the remaining rows and drop rows
///    outside `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]` (bounds inclusive).
///
/// An empty input or an input that cleans down to nothing is a valid result,
/// not an error; the report still carries the removal counts.
pub fn clean(rows: Vec<RawRecord>) -> CleanedDataset {
    let rows_loaded = rows.len();

    let complete: Vec<CropRecord> = rows
        .into_iter()
        .filter_map(|row| match (row.temperature, row.label) {
            (Some(temperature), Some(label)) if temperature.is_finite() => {
                Some(CropRecord { temperature, label })
            }
            _ => None,
        })
        .collect();
    let missing_removed = rows_loaded - complete.len();

    if complete.is_empty() {
        return CleanedDataset::new(
            complete,
            CleanReport {
                rows_loaded,
                missing_removed,
                outliers_removed: 0,
            },
        );
    }

    let mut temperatures: Vec<f64> = complete.iter().map(|r| r.temperature).collect();
    temperatures.sort_by(f64::total_cmp);

    let q1 = quantile(&temperatures, 0.25);
    let q3 = quantile(&temperatures, 0.75);
    let iqr = q3 - q1;
    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    let before_outliers = complete.len();
    let records: Vec<CropRecord> = complete
        .into_iter()
        .filter(|r| r.temperature >= lower_bound && r.temperature <= upper_bound)
        .collect();
    let outliers_removed = before_outliers - records.len();

    CleanedDataset::new(
        records,
        CleanReport {
            rows_loaded,
            missing_removed,
            outliers_removed,
        },
    )
}

/// Quantile of an ascending-sorted, non-empty slice, using linear
/// interpolation between closest ranks (`h = (n - 1)·q`), matching the
/// standard definition pandas and numpy default to.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(temperature: Option<f64>, label: Option<&str>) -> RawRecord {
        RawRecord {
            temperature,
            label: label.map(|l| l.to_string()),
        }
    }

    fn raw_rows(temps: &[f64]) -> Vec<RawRecord> {
        temps.iter().map(|&t| raw(Some(t), Some("rice"))).collect()
    }

    #[test]
    fn quantile_interpolates_between_ranks() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.25), 1.75);
        assert_eq!(quantile(&values, 0.5), 2.5);
        assert_eq!(quantile(&values, 0.75), 3.25);
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 1.0), 4.0);
    }

    #[test]
    fn quantile_of_single_value() {
        assert_eq!(quantile(&[42.0], 0.25), 42.0);
        assert_eq!(quantile(&[42.0], 0.75), 42.0);
    }

    #[test]
    fn drops_rows_with_missing_fields() {
        let rows = vec![
            raw(Some(20.0), Some("rice")),
            raw(None, Some("maize")),
            raw(Some(25.0), None),
            raw(Some(f64::NAN), Some("rice")),
            raw(Some(22.0), Some("maize")),
        ];
        let cleaned = clean(rows);
        assert_eq!(cleaned.report.rows_loaded, 5);
        assert_eq!(cleaned.report.missing_removed, 3);
        assert_eq!(cleaned.len(), 2);
        assert!(cleaned.records.iter().all(|r| r.temperature.is_finite()));
    }

    #[test]
    fn iqr_rule_removes_injected_extreme() {
        let mut temps: Vec<f64> = (10..=40).map(|t| t as f64).collect();
        temps.push(1000.0);
        let cleaned = clean(raw_rows(&temps));
        assert_eq!(cleaned.report.outliers_removed, 1);
        assert!(cleaned.records.iter().all(|r| r.temperature <= 40.0));
    }

    #[test]
    fn bounds_are_inclusive() {
        // [0, 10, 20, 30, 40]: Q1 = 10, Q3 = 30, bounds = [-20, 60].
        let cleaned = clean(raw_rows(&[0.0, 10.0, 20.0, 30.0, 40.0]));
        assert_eq!(cleaned.report.outliers_removed, 0);
        assert_eq!(cleaned.len(), 5);
    }

    #[test]
    fn cleaning_is_idempotent_on_its_own_output() {
        let mut temps: Vec<f64> = (10..=40).map(|t| t as f64).collect();
        temps.push(1000.0);
        temps.push(-500.0);

        let first = clean(raw_rows(&temps));
        assert_eq!(first.report.outliers_removed, 2);

        let again = clean(
            first
                .records
                .iter()
                .map(|r| raw(Some(r.temperature), Some(&r.label)))
                .collect(),
        );
        assert_eq!(again.report.missing_removed, 0);
        assert_eq!(again.report.outliers_removed, 0);
        assert_eq!(again.len(), first.len());
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let cleaned = clean(Vec::new());
        assert!(cleaned.is_empty());
        assert_eq!(cleaned.report, CleanReport::default());
    }

    #[test]
    fn all_missing_input_skips_outlier_step() {
        let cleaned = clean(vec![raw(None, None), raw(None, Some("rice"))]);
        assert!(cleaned.is_empty());
        assert_eq!(cleaned.report.missing_removed, 2);
        assert_eq!(cleaned.report.outliers_removed, 0);
    }

    #[test]
    fn collects_distinct_labels() {
        let rows = vec![
            raw(Some(20.0), Some("rice")),
            raw(Some(21.0), Some("maize")),
            raw(Some(22.0), Some("rice")),
        ];
        let cleaned = clean(rows);
        let labels: Vec<&str> = cleaned.labels.iter().map(|l| l.as_str()).collect();
        assert_eq!(labels, vec!["maize", "rice"]);
    }
}
