//! Configuration parameters for pitch analysis

use crate::error::{PitchError, Result};
use crate::pitch::{SkipRegion, SweepParams};
use crate::spectrum::WindowType;
use serde::Deserialize;

/// Pitch analysis configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Samples per analysis window (default: 1024)
    /// Power of two is fastest but not required
    pub blocksize: usize,

    /// Fraction of each window shared with the next, in [0, 1) (default: 0.5)
    pub overlap_fraction: f64,

    /// Highest pitch to report in Hz, below Nyquist (default: 4200.0)
    pub max_pitch_freq: f64,

    /// Taper each block before the FFT (default: true)
    pub apply_window: bool,

    /// Window used when `apply_window` is set (default: Hann)
    pub window_type: WindowType,

    /// Goodness of pitch below which points are treated as unreliable
    /// when plotting (default: 0.25). Sweeps themselves never filter.
    pub goodness_threshold: f64,

    /// Keep sweeping past windows whose estimate fails (default: false)
    pub skip_on_error: bool,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            blocksize: 1024,
            overlap_fraction: 0.5,
            max_pitch_freq: 4200.0,
            apply_window: true,
            window_type: WindowType::Hann,
            goodness_threshold: 0.25,
            skip_on_error: false,
        }
    }
}

impl PitchConfig {
    /// Check values that do not depend on the recording
    ///
    /// The Nyquist limit on `max_pitch_freq` is checked once the sample rate
    /// is known (see [`SkipRegion::compute`]).
    pub fn validate(&self) -> Result<()> {
        if self.blocksize < 2 {
            return Err(PitchError::invalid(format!(
                "blocksize must be at least 2, got {}",
                self.blocksize
            )));
        }
        if !(self.overlap_fraction.is_finite() && (0.0..1.0).contains(&self.overlap_fraction)) {
            return Err(PitchError::invalid(format!(
                "overlap fraction must be in [0, 1), got {}",
                self.overlap_fraction
            )));
        }
        if !(self.max_pitch_freq.is_finite() && self.max_pitch_freq > 0.0) {
            return Err(PitchError::invalid(format!(
                "max pitch frequency must be positive, got {}",
                self.max_pitch_freq
            )));
        }
        if !self.goodness_threshold.is_finite() {
            return Err(PitchError::invalid("goodness threshold must be finite"));
        }
        Ok(())
    }

    /// Sweep parameters for a recording with the given skip region
    pub fn sweep_params(&self, skip_region: SkipRegion) -> SweepParams {
        SweepParams {
            blocksize: self.blocksize,
            overlap_fraction: self.overlap_fraction,
            skip_region,
            apply_window: self.apply_window,
            skip_on_error: self.skip_on_error,
        }
    }
}
