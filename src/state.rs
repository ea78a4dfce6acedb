use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{self, Analysis};
use crate::data::bin::{DEFAULT_BINS, MAX_BINS, MIN_BINS};
use crate::data::clean;
use crate::data::loader::{self, LoadError};
use crate::data::model::CleanedDataset;

/// Source file opened at startup, matching where the original dataset ships.
pub const DEFAULT_DATA_PATH: &str = "data/Crop_recommendation.csv";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Loading and cleaning happen once per source path; the cleaned dataset is
/// memoized in an explicit cache map and shared behind `Arc` (it is never
/// mutated after creation). Binning and aggregation re-run in full whenever
/// the bin count changes.
pub struct AppState {
    /// Path of the currently displayed dataset (None until a load succeeds).
    pub source_path: Option<PathBuf>,

    /// Cleaned dataset currently on screen.
    pub dataset: Option<Arc<CleanedDataset>>,

    /// Memoized cleaned datasets keyed by source path. Entries only leave
    /// through [`AppState::invalidate`].
    cleaned_cache: BTreeMap<PathBuf, Arc<CleanedDataset>>,

    /// Number of temperature intervals, slider-controlled.
    pub bin_count: usize,

    /// Best crop per interval for the current dataset and bin count.
    pub analysis: Analysis,

    /// Crop label → colour, rebuilt when a dataset is loaded.
    pub color_map: Option<ColorMap>,

    /// Error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source_path: None,
            dataset: None,
            cleaned_cache: BTreeMap::new(),
            bin_count: DEFAULT_BINS,
            analysis: Analysis::empty(),
            color_map: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load, clean and display the dataset at `path` (cached per path).
    /// On failure the previous dataset stays on screen and the error is
    /// surfaced in the top bar; nothing downstream recomputes.
    pub fn open_path(&mut self, path: PathBuf) {
        match self.cleaned_for(&path) {
            Ok(dataset) => {
                log::info!(
                    "Using {} cleaned records from {} ({} crops)",
                    dataset.len(),
                    path.display(),
                    dataset.labels.len()
                );
                self.color_map = Some(ColorMap::new(&dataset.labels));
                self.dataset = Some(dataset);
                self.source_path = Some(path);
                self.status_message = None;
                self.refresh_analysis();
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Cleaned dataset for `path`: cache hit, or load + clean + insert.
    fn cleaned_for(&mut self, path: &Path) -> Result<Arc<CleanedDataset>, LoadError> {
        if let Some(cached) = self.cleaned_cache.get(path) {
            return Ok(Arc::clone(cached));
        }
        let raw = loader::load_file(path)?;
        let dataset = Arc::new(clean::clean(raw));
        self.cleaned_cache
            .insert(path.to_path_buf(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached cleaned dataset for `path`, forcing the next open to
    /// re-read the file.
    pub fn invalidate(&mut self, path: &Path) {
        self.cleaned_cache.remove(path);
    }

    /// Re-read the current source file from disk.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path.clone() {
            self.invalidate(&path);
            self.open_path(path);
        }
    }

    /// Set the bin count (clamped to the slider range) and recompute.
    pub fn set_bin_count(&mut self, bin_count: usize) {
        self.bin_count = bin_count.clamp(MIN_BINS, MAX_BINS);
        self.refresh_analysis();
    }

    /// Recompute binning + aggregation for the current dataset. Cheap enough
    /// to run synchronously inside the frame that changed the parameter.
    pub fn refresh_analysis(&mut self) {
        self.analysis = match &self.dataset {
            Some(dataset) => aggregate::analyze(&dataset.records, self.bin_count),
            None => Analysis::empty(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{body}").unwrap();
        path
    }

    const CSV: &str = "temperature,label\n10.0,rice\n20.0,maize\n30.0,rice\n";

    #[test]
    fn open_path_caches_cleaned_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "crops.csv", CSV);

        let mut state = AppState::default();
        state.open_path(path.clone());
        let first = state.dataset.clone().unwrap();

        // Re-opening the same path hands back the same allocation.
        state.open_path(path.clone());
        let second = state.dataset.clone().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Invalidation forces a fresh load.
        state.invalidate(&path);
        state.open_path(path);
        let third = state.dataset.clone().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first.len(), third.len());
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "crops.csv", CSV);

        let mut state = AppState::default();
        state.open_path(path.clone());
        assert!(state.status_message.is_none());
        assert_eq!(state.analysis.best.len(), 3);

        state.open_path(dir.path().join("missing.csv"));
        assert!(state.status_message.is_some());
        assert_eq!(state.source_path.as_deref(), Some(path.as_path()));
        assert!(state.dataset.is_some());
    }

    #[test]
    fn bin_count_change_recomputes_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "crops.csv", CSV);

        let mut state = AppState::default();
        state.open_path(path);
        assert_eq!(state.bin_count, DEFAULT_BINS);

        state.set_bin_count(3);
        assert_eq!(state.analysis.bins.unwrap().count(), 3);

        // Out-of-range requests clamp instead of failing.
        state.set_bin_count(99);
        assert_eq!(state.bin_count, MAX_BINS);
        state.set_bin_count(0);
        assert_eq!(state.bin_count, MIN_BINS);
    }

    #[test]
    fn unloaded_state_has_empty_analysis() {
        let mut state = AppState::default();
        state.refresh_analysis();
        assert!(state.analysis.best.is_empty());
        assert!(state.dataset.is_none());
    }
}
