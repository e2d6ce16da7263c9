//! Configuration types shared by the orchestrator and its callers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoinsetError;

/// Default number of consecutive daily prices per window.
pub const DEFAULT_WINDOW_LEN: usize = 30;

/// Default share of windows assigned to the training set.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.9;

/// How normalized windows are partitioned into train and test sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Fraction of windows (oldest first) that go to the training set, in `[0, 1]`.
    pub train_fraction: f64,
    /// Shuffle the training slice. The test slice always stays chronological.
    pub shuffle_train: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            train_fraction: DEFAULT_TRAIN_FRACTION,
            shuffle_train: false,
        }
    }
}

impl SplitOptions {
    /// Check that `train_fraction` is a finite value in `[0, 1]`.
    ///
    /// # Errors
    /// Returns `CoinsetError::InvalidArg` when the fraction is NaN or out of range.
    pub fn validate(&self) -> Result<(), CoinsetError> {
        if (0.0..=1.0).contains(&self.train_fraction) {
            Ok(())
        } else {
            Err(CoinsetError::InvalidArg(format!(
                "train_fraction must be within [0, 1], got {}",
                self.train_fraction
            )))
        }
    }
}

/// Global configuration for the `Coinset` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinsetConfig {
    /// Number of consecutive prices per window (L). Must be at least 2 so that
    /// every window has one feature and one label.
    pub window_len: usize,
    /// Train/test partitioning used by `dataset()`.
    pub split: SplitOptions,
    /// Timeout applied to every provider call (catalog and history).
    pub provider_timeout: Duration,
    /// Base currency used when the caller does not pick one.
    pub default_base: String,
    /// Refresh the identifier registry before the first load if it has never
    /// been refreshed successfully.
    pub refresh_registry_on_first_load: bool,
}

impl Default for CoinsetConfig {
    fn default() -> Self {
        Self {
            window_len: DEFAULT_WINDOW_LEN,
            split: SplitOptions::default(),
            provider_timeout: Duration::from_secs(10),
            default_base: "USD".to_string(),
            refresh_registry_on_first_load: true,
        }
    }
}

impl CoinsetConfig {
    /// Validate invariants that cannot be expressed in the types.
    ///
    /// # Errors
    /// Returns `CoinsetError::InvalidArg` for a window length below 2, an
    /// out-of-range train fraction, a zero timeout, or an empty default base.
    pub fn validate(&self) -> Result<(), CoinsetError> {
        if self.window_len < 2 {
            return Err(CoinsetError::InvalidArg(format!(
                "window_len must be at least 2, got {}",
                self.window_len
            )));
        }
        self.split.validate()?;
        if self.provider_timeout.is_zero() {
            return Err(CoinsetError::InvalidArg(
                "provider_timeout must be non-zero".into(),
            ));
        }
        if self.default_base.trim().is_empty() {
            return Err(CoinsetError::InvalidArg(
                "default_base must not be empty".into(),
            ));
        }
        Ok(())
    }
}
