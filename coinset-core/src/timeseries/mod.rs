//! Pipeline stages from raw provider observations to a train/test dataset.
//!
//! Modules include:
//! - `series`: daily series construction with same-day averaging
//! - `window`: fixed-length overlapping windows
//! - `normalize`: per-window rebasing to relative change
//! - `split`: chronological train/test partitioning
/// Daily price series construction.
pub mod series;
/// Fixed-length window slicing.
pub mod window;
/// Relative-change normalization.
pub mod normalize;
/// Train/test dataset construction.
pub mod split;
