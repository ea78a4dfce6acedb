//! Data layer: core types, loading, cleaning, binning, and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<RawRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  drop missing rows + IQR outliers → CleanedDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   bin     │  N equal-width temperature intervals → bin indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  per-bin crop counts → best crop per bin
//!   └───────────┘
//! ```
//!
//! Loader and cleaner run once per file and the result is cached by path;
//! bin and aggregate re-run on every bin-count change.

pub mod aggregate;
pub mod bin;
pub mod clean;
pub mod loader;
pub mod model;
