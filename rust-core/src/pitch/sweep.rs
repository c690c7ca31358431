//! Pitch track over a whole recording
//!
//! Slides an overlapping analysis window across the waveform and collects
//! one cepstral pitch estimate per window position.

use super::{PitchEstimate, SkipRegion};
use crate::audio::Waveform;
use crate::error::{PitchError, Result};
use crate::spectrum::SpectralAnalyzer;
use log::{debug, trace, warn};
use serde::Serialize;

/// Sweep parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepParams {
    /// Samples per analysis window
    pub blocksize: usize,

    /// Fraction of each window shared with the next, in [0, 1)
    pub overlap_fraction: f64,

    /// Low-lag region excluded from the peak search
    pub skip_region: SkipRegion,

    /// Taper each block with the analyzer's window before the FFT
    pub apply_window: bool,

    /// Record failing windows in `PitchTrack::skipped` instead of aborting
    pub skip_on_error: bool,
}

impl SweepParams {
    fn validate(&self) -> Result<()> {
        if self.blocksize < 2 {
            return Err(PitchError::invalid(format!(
                "blocksize must be at least 2, got {}",
                self.blocksize
            )));
        }
        if !(self.overlap_fraction.is_finite()
            && (0.0..1.0).contains(&self.overlap_fraction))
        {
            return Err(PitchError::invalid(format!(
                "overlap fraction must be in [0, 1), got {}",
                self.overlap_fraction
            )));
        }
        if self.skip_region.n_skip >= self.blocksize / 2 {
            return Err(PitchError::invalid(format!(
                "blocksize {} leaves no lags to search after skipping {}",
                self.blocksize, self.skip_region.n_skip
            )));
        }
        Ok(())
    }
}

/// One window of a pitch track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchPoint {
    /// Window start in seconds
    pub time_sec: f64,
    pub pitch_hz: f64,
    pub goodness: f64,
}

/// Pitch and goodness of pitch over time, ordered by window start
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PitchTrack {
    points: Vec<PitchPoint>,

    /// Window starts whose estimate failed (skip-on-error mode only)
    skipped: Vec<f64>,
}

impl PitchTrack {
    pub fn points(&self) -> &[PitchPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn skipped(&self) -> &[f64] {
        &self.skipped
    }

    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time_sec).collect()
    }

    pub fn pitches(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.pitch_hz).collect()
    }

    pub fn goodness(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.goodness).collect()
    }

    /// Points whose goodness of pitch reaches `threshold`
    pub fn above_threshold(&self, threshold: f64) -> impl Iterator<Item = &PitchPoint> + '_ {
        self.points.iter().filter(move |p| p.goodness >= threshold)
    }
}

/// Estimate pitch at every window position across a waveform
///
/// # Arguments
/// * `analyzer` - Analyzer whose buffers are used for every window
/// * `waveform` - Recording to sweep (not modified)
/// * `params` - Window size, overlap and skip region
///
/// # Returns
/// One point per window starting at k·step, for every window that ends
/// before the end of the recording. No goodness filtering is applied.
///
/// # Errors
/// `InvalidParameter` for bad parameters. A failing window aborts with
/// `SweepWindow` naming its offset unless `skip_on_error` is set.
pub fn sweep(
    analyzer: &mut SpectralAnalyzer,
    waveform: &Waveform,
    params: &SweepParams,
) -> Result<PitchTrack> {
    params.validate()?;

    let window_duration = params.blocksize as f64 * waveform.delta_t();
    let step = window_duration * (1.0 - params.overlap_fraction);
    if !(step > 0.0) {
        return Err(PitchError::invalid(format!(
            "window step must be positive, got {step} s"
        )));
    }

    let total_duration = waveform.duration();
    let num_points = params.blocksize / 2;
    let mut track = PitchTrack::default();

    for k in 0usize.. {
        let offset = k as f64 * step;
        if offset + window_duration >= total_duration {
            break;
        }
        if waveform.offset_index(offset)? + params.blocksize > waveform.sample_count() {
            break;
        }

        match estimate_window(analyzer, waveform, offset, num_points, params) {
            Ok(estimate) => {
                trace!(
                    "t={:.4}s pitch={:.1}Hz goodness={:.3}",
                    offset,
                    estimate.pitch_hz,
                    estimate.goodness
                );
                track.points.push(PitchPoint {
                    time_sec: offset,
                    pitch_hz: estimate.pitch_hz,
                    goodness: estimate.goodness,
                });
            }
            Err(err) if params.skip_on_error => {
                warn!("Skipping window at {:.4} s: {}", offset, err);
                track.skipped.push(offset);
            }
            Err(err) => {
                return Err(PitchError::SweepWindow {
                    offset_sec: offset,
                    source: Box::new(err),
                });
            }
        }
    }

    debug!(
        "Swept {} windows ({} skipped), blocksize {}, step {:.4} s",
        track.points.len(),
        track.skipped.len(),
        params.blocksize,
        step
    );

    Ok(track)
}

fn estimate_window(
    analyzer: &mut SpectralAnalyzer,
    waveform: &Waveform,
    offset: f64,
    num_points: usize,
    params: &SweepParams,
) -> Result<PitchEstimate> {
    let power = analyzer.power_spectrum(waveform, offset, params.blocksize, params.apply_window)?;
    analyzer.cepstrum_pitch(&power, num_points, params.skip_region.n_skip)
}
