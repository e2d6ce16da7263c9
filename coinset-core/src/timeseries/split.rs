//! Chronological train/test partitioning of normalized windows.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::normalize::NormalizedWindow;
use crate::CoinsetError;
use crate::types::SplitOptions;

/// Supervised-learning tensors derived from normalized windows.
///
/// Each window contributes its first `L - 1` values as features and its last
/// value as the label. Windows `[0, split_row)` form the training set and
/// `[split_row, count)` the test set; the test set is always chronological.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Index of the first test window.
    pub split_row: usize,
    /// Training features, one row of `L - 1` values per window.
    pub train_features: Vec<Vec<f64>>,
    /// Training labels, aligned with `train_features`.
    pub train_labels: Vec<f64>,
    /// Test features, one row of `L - 1` values per window.
    pub test_features: Vec<Vec<f64>>,
    /// Test labels, aligned with `test_features`.
    pub test_labels: Vec<f64>,
}

/// `(samples, timesteps, channels)` shape of a feature tensor.
pub type FeatureShape = (usize, usize, usize);

impl Dataset {
    /// Total number of windows across both sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.train_labels.len() + self.test_labels.len()
    }

    /// True when no windows were available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shapes of the train and test feature tensors as single-channel
    /// sequences, the layout recurrent models consume.
    #[must_use]
    pub fn feature_shape(&self) -> (FeatureShape, FeatureShape) {
        let width = self
            .train_features
            .first()
            .or_else(|| self.test_features.first())
            .map_or(0, Vec::len);
        (
            (self.train_features.len(), width, 1),
            (self.test_features.len(), width, 1),
        )
    }
}

/// Index of the first test window: `round(train_fraction * count)`, ties to even.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn split_row(count: usize, train_fraction: f64) -> usize {
    let row = (train_fraction * count as f64).round_ties_even();
    if row <= 0.0 {
        0
    } else {
        (row as usize).min(count)
    }
}

/// Partition windows into a [`Dataset`] using the thread-local RNG for the
/// optional training shuffle.
///
/// # Errors
/// Returns `CoinsetError::InvalidArg` if `opts.train_fraction` is outside `[0, 1]`
/// or a window holds fewer than two values.
pub fn split(windows: &[NormalizedWindow], opts: SplitOptions) -> Result<Dataset, CoinsetError> {
    split_with_rng(windows, opts, &mut rand::rng())
}

/// Partition windows into a [`Dataset`] with an explicit RNG, for reproducible shuffles.
///
/// # Errors
/// Same as [`split`].
pub fn split_with_rng<R>(
    windows: &[NormalizedWindow],
    opts: SplitOptions,
    rng: &mut R,
) -> Result<Dataset, CoinsetError>
where
    R: Rng + ?Sized,
{
    opts.validate()?;
    if let Some((i, w)) = windows.iter().enumerate().find(|(_, w)| w.len() < 2) {
        return Err(CoinsetError::InvalidArg(format!(
            "window {i} starting {} has {} value(s); at least 2 are needed for a feature and a label",
            w.start(),
            w.len()
        )));
    }
    let row = split_row(windows.len(), opts.train_fraction);
    let (train, test) = windows.split_at(row);

    let mut train: Vec<&NormalizedWindow> = train.iter().collect();
    if opts.shuffle_train {
        train.shuffle(rng);
    }

    let (train_features, train_labels) = features_and_labels(train);
    let (test_features, test_labels) = features_and_labels(test.iter());
    Ok(Dataset {
        split_row: row,
        train_features,
        train_labels,
        test_features,
        test_labels,
    })
}

fn features_and_labels<'a, I>(windows: I) -> (Vec<Vec<f64>>, Vec<f64>)
where
    I: IntoIterator<Item = &'a NormalizedWindow>,
{
    // Every window holds at least two values once split_with_rng has checked them
    windows
        .into_iter()
        .filter_map(|w| w.values().split_last())
        .map(|(label, features)| (features.to_vec(), *label))
        .unzip()
}
