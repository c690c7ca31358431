//! Low-lag cepstrum region excluded from the pitch search
//!
//! Lag n of the cepstrum corresponds to a pitch of sample_rate / n. Small
//! lags (zero lag in particular) carry large values unrelated to pitch, so
//! the search starts at the first lag whose pitch is at or below the
//! configured ceiling.

use crate::error::{PitchError, Result};

/// Number of leading cepstrum points to skip, and the ceiling it implies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkipRegion {
    /// First lag eligible for the peak search (always >= 1)
    pub n_skip: usize,

    /// sample_rate / n_skip: the highest pitch the search can report
    pub effective_max_pitch_freq: f64,
}

impl SkipRegion {
    /// Compute the skip region for a sample rate and pitch ceiling
    ///
    /// Finds the smallest n with sample_rate / (n + 1) < max_pitch_freq.
    /// For 44.1 kHz and a 4.2 kHz ceiling this gives n_skip = 10
    /// (44100/11 ≈ 4009 Hz), reporting an effective ceiling of 4410 Hz.
    ///
    /// # Errors
    /// `InvalidParameter` unless 0 < max_pitch_freq < sample_rate / 2.
    pub fn compute(sample_rate: f64, max_pitch_freq: f64) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(PitchError::invalid(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        if !(max_pitch_freq.is_finite() && max_pitch_freq > 0.0) {
            return Err(PitchError::invalid(format!(
                "max pitch frequency must be positive, got {max_pitch_freq}"
            )));
        }
        let nyquist = sample_rate / 2.0;
        if max_pitch_freq >= nyquist {
            return Err(PitchError::invalid(format!(
                "max pitch frequency {max_pitch_freq} Hz must be below Nyquist ({nyquist} Hz)"
            )));
        }

        // Zero lag is always skipped
        let mut n_skip = 1;
        while sample_rate / (n_skip + 1) as f64 >= max_pitch_freq {
            n_skip += 1;
        }

        Ok(Self {
            n_skip,
            effective_max_pitch_freq: sample_rate / n_skip as f64,
        })
    }
}
