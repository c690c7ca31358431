//! Power spectrum, autocorrelation and cepstrum of one analysis window
//!
//! Combines the FFT engine with optional windowing. Every intermediate result
//! is returned to the caller; nothing is remembered between calls.

use super::fft::FftEngine;
use super::windowing::{apply_window_inplace, WindowType};
use crate::audio::Waveform;
use crate::error::{PitchError, Result};
use crate::pitch::PitchEstimate;
use log::debug;

/// Smallest power fed to the logarithm (keeps silent bins finite)
pub const POWER_FLOOR: f64 = 1e-20;

/// Power spectrum of one analysis window
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    /// |X[k]·X[k]| for every bin k (full length, not just positive frequencies)
    values: Vec<f64>,

    /// Sample rate of the source waveform in Hz
    sample_rate: f64,

    /// First sample of the window in the source waveform
    offset_index: usize,

    /// Requested block size (may exceed `values.len()` at the end of a file)
    blocksize: usize,
}

impl PowerSpectrum {
    /// All bins
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of bins (equal to the number of samples analyzed)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn offset_index(&self) -> usize {
        self.offset_index
    }

    pub fn blocksize(&self) -> usize {
        self.blocksize
    }

    /// True when the window held a full block of samples
    pub fn is_complete(&self) -> bool {
        self.values.len() == self.blocksize
    }

    /// Positive-frequency half used for plotting (len/2 bins)
    pub fn half(&self) -> &[f64] {
        &self.values[..self.values.len() / 2]
    }

    /// Bin spacing in Hz
    pub fn delta_f(&self) -> f64 {
        self.sample_rate / self.values.len().max(1) as f64
    }

    /// Frequency in Hz of each bin in `half()`
    pub fn frequency_axis(&self) -> Vec<f64> {
        let delta_f = self.delta_f();
        (0..self.half().len()).map(|k| k as f64 * delta_f).collect()
    }
}

/// Real cepstrum |IFFT(ln P)| of one analysis window
#[derive(Debug, Clone, PartialEq)]
pub struct Cepstrum {
    values: Vec<f64>,
    sample_rate: f64,
}

impl Cepstrum {
    /// Build a cepstrum from precomputed values
    pub fn from_values(values: Vec<f64>, sample_rate: f64) -> Self {
        Self { values, sample_rate }
    }

    /// Magnitude at each lag; index 0 is zero lag
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// First `num_points` lags with the zero-lag point cleared
    ///
    /// Zero lag always dominates and would flatten the rest of a plot.
    pub fn plot_values(&self, num_points: usize) -> Vec<f64> {
        let mut view: Vec<f64> = self.values.iter().take(num_points).copied().collect();
        if let Some(first) = view.first_mut() {
            *first = 0.0;
        }
        view
    }
}

/// Per-window spectral analyzer
///
/// Owns its FFT planner and buffers. Use one analyzer per thread; the
/// waveform itself can be shared.
pub struct SpectralAnalyzer {
    fft_engine: FftEngine,
    window_type: WindowType,
}

impl SpectralAnalyzer {
    /// Create an analyzer that uses a Hann window when windowing is requested
    pub fn new() -> Self {
        Self::with_window(WindowType::Hann)
    }

    /// Create an analyzer with a specific window function
    pub fn with_window(window_type: WindowType) -> Self {
        Self {
            fft_engine: FftEngine::new(),
            window_type,
        }
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Compute the power spectrum of one window of a waveform
    ///
    /// # Arguments
    /// * `waveform` - Source recording
    /// * `offset_time_sec` - Window start; converted to a sample index rounding half up
    /// * `blocksize` - Number of samples to analyze
    /// * `apply_window` - Taper the block with the analyzer's window first
    ///
    /// # Returns
    /// Full-length spectrum. Near the end of the file fewer than `blocksize`
    /// samples may be available; the spectrum then covers what exists.
    pub fn power_spectrum(
        &mut self,
        waveform: &Waveform,
        offset_time_sec: f64,
        blocksize: usize,
        apply_window: bool,
    ) -> Result<PowerSpectrum> {
        if blocksize == 0 {
            return Err(PitchError::invalid("blocksize must be at least 1"));
        }

        let offset_index = waveform.offset_index(offset_time_sec)?;
        let block = waveform.window(offset_index, blocksize);
        if block.is_empty() {
            return Err(PitchError::invalid(format!(
                "offset {offset_time_sec} s (sample {offset_index}) is past the end of a \
                 {}-sample waveform",
                waveform.sample_count()
            )));
        }
        if block.len() < blocksize {
            debug!(
                "Window at sample {} truncated to {} of {} samples",
                offset_index,
                block.len(),
                blocksize
            );
        }

        let mut signal: Vec<f64> = block.iter().map(|&s| s as f64).collect();
        if apply_window {
            apply_window_inplace(&mut signal, self.window_type);
        }

        // Square the complex bin, then take its magnitude
        let values = self
            .fft_engine
            .forward(&signal)
            .iter()
            .map(|&x| (x * x).norm())
            .collect();

        Ok(PowerSpectrum {
            values,
            sample_rate: waveform.sample_rate(),
            offset_index,
            blocksize,
        })
    }

    /// Autocorrelation |IFFT(P)| of a power spectrum
    pub fn autocorrelation(&mut self, power: &PowerSpectrum) -> Vec<f64> {
        self.fft_engine.inverse_magnitude(power.values())
    }

    /// Cepstrum |IFFT(ln P)| of a power spectrum
    ///
    /// Power values are floored at [`POWER_FLOOR`] so silent bins stay finite.
    pub fn cepstrum(&mut self, power: &PowerSpectrum) -> Cepstrum {
        let log_power: Vec<f64> = power
            .values()
            .iter()
            .map(|&p| p.max(POWER_FLOOR).ln())
            .collect();

        Cepstrum {
            values: self.fft_engine.inverse_magnitude(&log_power),
            sample_rate: power.sample_rate(),
        }
    }

    /// Cepstrum of a power spectrum reduced to its pitch peak
    ///
    /// # Arguments
    /// * `power` - Power spectrum of the window
    /// * `num_points` - Exclusive upper lag of the peak search (at most len/2)
    /// * `n_skip` - First lag eligible for the peak search
    pub fn cepstrum_pitch(
        &mut self,
        power: &PowerSpectrum,
        num_points: usize,
        n_skip: usize,
    ) -> Result<PitchEstimate> {
        let cepstrum = self.cepstrum(power);
        PitchEstimate::from_cepstrum(&cepstrum, num_points, n_skip)
    }
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
