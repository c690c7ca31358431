//! Single best-peak pitch estimate from a cepstrum

use crate::error::{PitchError, Result};
use crate::spectrum::Cepstrum;
use serde::Serialize;

/// Pitch and goodness of pitch for one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchEstimate {
    /// sample_rate / peak_lag_index
    pub pitch_hz: f64,

    /// Raw cepstrum magnitude at the peak (not normalized)
    pub goodness: f64,

    /// Lag of the cepstrum peak in samples
    pub peak_lag_index: usize,
}

impl PitchEstimate {
    /// Pick the largest cepstrum value in lags `n_skip..num_points`
    ///
    /// # Arguments
    /// * `cepstrum` - Cepstrum of one window
    /// * `num_points` - Exclusive upper bound of the search; at most half the
    ///   cepstrum length, since the upper half mirrors the lower one
    /// * `n_skip` - First lag searched (see [`super::SkipRegion`])
    ///
    /// Ties go to the smallest lag.
    pub fn from_cepstrum(cepstrum: &Cepstrum, num_points: usize, n_skip: usize) -> Result<Self> {
        let half = cepstrum.len() / 2;
        if num_points > half {
            return Err(PitchError::invalid(format!(
                "num_points {num_points} exceeds half the cepstrum length ({half})"
            )));
        }
        if n_skip >= num_points {
            return Err(PitchError::invalid(format!(
                "empty peak search: n_skip {n_skip} >= num_points {num_points}"
            )));
        }

        let values = cepstrum.values();
        let mut peak_lag_index = n_skip;
        for lag in n_skip + 1..num_points {
            if values[lag] > values[peak_lag_index] {
                peak_lag_index = lag;
            }
        }

        if peak_lag_index == 0 {
            return Err(PitchError::InvalidPeak { num_points, n_skip });
        }

        let goodness = values[peak_lag_index];
        if !goodness.is_finite() {
            return Err(PitchError::NumericDomain(format!(
                "cepstrum value {goodness} at lag {peak_lag_index}"
            )));
        }

        Ok(Self {
            pitch_hz: cepstrum.sample_rate() / peak_lag_index as f64,
            goodness,
            peak_lag_index,
        })
    }

    /// Whether this estimate clears a goodness threshold
    pub fn is_reliable(&self, threshold: f64) -> bool {
        self.goodness >= threshold
    }
}
