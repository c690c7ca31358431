//! 16-bit mono waveform loading
//!
//! Reads a whole WAV file into memory together with its timing metadata.
//! The waveform is immutable after load and can be shared between analyzers.

use crate::error::{PitchError, Result};
use hound::{SampleFormat, WavReader};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// In-memory 16-bit PCM recording
#[derive(Debug, Clone)]
pub struct Waveform {
    /// Sample rate in Hz
    sample_rate: f64,

    /// 1 / sample_rate
    delta_t: f64,

    /// Raw signed 16-bit samples
    samples: Vec<i16>,

    /// Time of each sample, plus one trailing timestamp (len = samples + 1)
    sample_times: Vec<f64>,
}

impl Waveform {
    /// Load a mono 16-bit PCM WAV file
    ///
    /// # Arguments
    /// * `path` - Path of the file to read
    ///
    /// # Errors
    /// `PitchError::Io` if the file cannot be opened or read,
    /// `PitchError::Format` if it is not single-channel 16-bit integer PCM.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PitchError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // The reader owns the handle; it is closed when this call returns.
        let waveform = Self::read_wav(BufReader::new(file), path)?;

        info!(
            "Loaded {}: {} samples at {:.0} Hz ({:.3} s)",
            path.display(),
            waveform.sample_count(),
            waveform.sample_rate,
            waveform.duration()
        );

        Ok(waveform)
    }

    /// Read a mono 16-bit PCM WAV stream from any byte source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::read_wav(reader, Path::new("<reader>"))
    }

    /// Build a waveform from samples already in memory
    ///
    /// # Arguments
    /// * `samples` - Signed 16-bit samples
    /// * `sample_rate` - Sample rate in Hz (must be positive)
    pub fn from_samples(samples: Vec<i16>, sample_rate: f64) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(PitchError::invalid(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }

        let delta_t = 1.0 / sample_rate;
        let sample_times = (0..=samples.len())
            .map(|i| i as f64 * delta_t)
            .collect();

        Ok(Self {
            sample_rate,
            delta_t,
            samples,
            sample_times,
        })
    }

    fn read_wav<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let mut reader =
            WavReader::new(reader).map_err(|e| PitchError::from_wav(e, origin.to_path_buf()))?;
        let spec = reader.spec();

        debug!(
            "{}: {} channel(s), {} bits, {:?}, {} Hz",
            origin.display(),
            spec.channels,
            spec.bits_per_sample,
            spec.sample_format,
            spec.sample_rate
        );

        if spec.bits_per_sample != 16 {
            return Err(PitchError::Format(format!(
                "{} has {}-byte samples. Expecting 2-byte samples.",
                origin.display(),
                (spec.bits_per_sample + 7) / 8
            )));
        }
        if spec.sample_format != SampleFormat::Int {
            return Err(PitchError::Format(format!(
                "{} holds float samples. Expecting 16-bit integer PCM.",
                origin.display()
            )));
        }
        if spec.channels != 1 {
            return Err(PitchError::Format(format!(
                "{} has {} channels. Expecting mono.",
                origin.display(),
                spec.channels
            )));
        }

        let samples = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<i16>, _>>()
            .map_err(|e| PitchError::from_wav(e, PathBuf::from(origin)))?;

        Self::from_samples(samples, spec.sample_rate as f64)
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Sample period in seconds
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Number of samples
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Raw samples
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Sample timestamps in seconds (one more entry than samples)
    pub fn sample_times(&self) -> &[f64] {
        &self.sample_times
    }

    /// Total duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 * self.delta_t
    }

    /// Convert a time offset to a sample index, rounding half up
    pub fn offset_index(&self, offset_time_sec: f64) -> Result<usize> {
        if !(offset_time_sec.is_finite() && offset_time_sec >= 0.0) {
            return Err(PitchError::invalid(format!(
                "offset time must be a non-negative number of seconds, got {offset_time_sec}"
            )));
        }
        Ok((0.5 + offset_time_sec * self.sample_rate).floor() as usize)
    }

    /// Up to `len` samples starting at `offset_index`
    ///
    /// Shorter (possibly empty) near the end of the recording; never padded.
    pub fn window(&self, offset_index: usize, len: usize) -> &[i16] {
        let start = offset_index.min(self.samples.len());
        let end = start.saturating_add(len).min(self.samples.len());
        &self.samples[start..end]
    }

    /// Timestamps and samples for a time-history plot
    ///
    /// # Arguments
    /// * `offset_time_sec` - Start of the excerpt
    /// * `num_points` - Number of samples, or `None` for the rest of the file
    ///
    /// # Returns
    /// `(times, samples)` of equal length, clipped to the end of the recording
    pub fn time_history(
        &self,
        offset_time_sec: f64,
        num_points: Option<usize>,
    ) -> Result<(&[f64], &[i16])> {
        let offset = self.offset_index(offset_time_sec)?;
        let samples = self.window(offset, num_points.unwrap_or(self.samples.len()));
        let start = offset.min(self.samples.len());
        let times = &self.sample_times[start..start + samples.len()];
        Ok((times, samples))
    }
}
