//! Plot-ready data series
//!
//! Analysis results are converted into labelled (x, y) series here. Drawing
//! them is left to whatever implements [`Plotter`].

use crate::audio::Waveform;
use crate::error::Result;
use crate::pitch::PitchTrack;
use crate::spectrum::{Cepstrum, PowerSpectrum};
use serde::Serialize;

/// One line plot: x/y data plus labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PlotSeries {
    fn new(title: &str, x_label: &str, y_label: &str, x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x,
            y,
        }
    }

    /// Raw samples against time
    ///
    /// # Arguments
    /// * `num_points` - Samples to show, or `None` for the rest of the file
    pub fn time_history(
        waveform: &Waveform,
        offset_time_sec: f64,
        num_points: Option<usize>,
        title: &str,
    ) -> Result<Self> {
        let (times, samples) = waveform.time_history(offset_time_sec, num_points)?;
        Ok(Self::new(
            title,
            "Seconds",
            "Counts",
            times.to_vec(),
            samples.iter().map(|&s| s as f64).collect(),
        ))
    }

    /// Positive-frequency half of a power spectrum
    pub fn power_spectrum(power: &PowerSpectrum, title: &str) -> Self {
        Self::new(
            title,
            "Hz",
            "power (no units)",
            power.frequency_axis(),
            power.half().to_vec(),
        )
    }

    /// Autocorrelation against lag time
    pub fn autocorrelation(values: &[f64], sample_rate: f64, num_points: usize, title: &str) -> Self {
        let y: Vec<f64> = values.iter().take(num_points).copied().collect();
        Self::new(title, "Seconds", "autocorrelation", lag_axis(y.len(), sample_rate), y)
    }

    /// Cepstrum against lag time, zero lag cleared
    pub fn cepstrum(cepstrum: &Cepstrum, num_points: usize, title: &str) -> Self {
        let y = cepstrum.plot_values(num_points);
        Self::new(
            title,
            "Seconds",
            "cepstrum",
            lag_axis(y.len(), cepstrum.sample_rate()),
            y,
        )
    }

    /// Pitch over time, keeping only points that reach `threshold`
    pub fn pitch_track(track: &PitchTrack, threshold: f64, title: &str) -> Self {
        let (x, y): (Vec<f64>, Vec<f64>) = track
            .above_threshold(threshold)
            .map(|p| (p.time_sec, p.pitch_hz))
            .unzip();
        Self::new(title, "Seconds", "pitch (Hz)", x, y)
    }

    /// Goodness of pitch over time (every window)
    pub fn goodness_track(track: &PitchTrack, title: &str) -> Self {
        Self::new(title, "Seconds", "goodness of pitch", track.times(), track.goodness())
    }
}

fn lag_axis(len: usize, sample_rate: f64) -> Vec<f64> {
    let delta_t = 1.0 / sample_rate;
    (0..len).map(|i| i as f64 * delta_t).collect()
}

/// Rendering collaborator
///
/// Implementations decide how and when series are drawn (screen, file,
/// nothing at all). Analysis code only hands series over.
pub trait Plotter {
    fn plot(&mut self, series: PlotSeries) -> Result<()>;
}

/// Collects series in memory
impl Plotter for Vec<PlotSeries> {
    fn plot(&mut self, series: PlotSeries) -> Result<()> {
        self.push(series);
        Ok(())
    }
}
