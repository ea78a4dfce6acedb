use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// RawRecord – one row as read from the source file
// ---------------------------------------------------------------------------

/// A source row before cleaning. Either field may be missing; the cleaner
/// decides what to drop. Extra source columns are discarded at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub temperature: Option<f64>,
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// CropRecord – one cleaned row
// ---------------------------------------------------------------------------

/// A crop observation that survived cleaning: finite temperature, non-empty
/// label. Immutable from here on.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRecord {
    /// Temperature reading in the unit of the source data.
    pub temperature: f64,
    /// Recommended crop for this reading.
    pub label: String,
}

// ---------------------------------------------------------------------------
// CleanReport – what the cleaner removed
// ---------------------------------------------------------------------------

/// Row counts surfaced to the user after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Rows read from the source file.
    pub rows_loaded: usize,
    /// Rows dropped because `temperature` or `label` was missing.
    pub missing_removed: usize,
    /// Rows dropped by the IQR temperature-outlier rule.
    pub outliers_removed: usize,
}

// ---------------------------------------------------------------------------
// CleanedDataset – the cached result of one load
// ---------------------------------------------------------------------------

/// The cleaned dataset with its removal report and the sorted set of distinct
/// crop labels (pre-computed so chart colours stay stable while the bin count
/// changes).
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    /// All cleaned records.
    pub records: Vec<CropRecord>,
    /// Distinct crop labels across `records`, sorted.
    pub labels: BTreeSet<String>,
    /// What cleaning removed, for the sidebar messages.
    pub report: CleanReport,
}

impl CleanedDataset {
    /// Build the label index from the cleaned records.
    pub fn new(records: Vec<CropRecord>, report: CleanReport) -> Self {
        let labels: BTreeSet<String> = records.iter().map(|r| r.label.clone()).collect();
        CleanedDataset {
            records,
            labels,
            report,
        }
    }

    /// Number of cleaned records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
