//! High-level pitch lab
//!
//! Bundles a recording, its skip region, a configuration and an analyzer so
//! a motif can be opened, inspected window by window and swept in a few calls.

use crate::audio::Waveform;
use crate::config::PitchConfig;
use crate::error::Result;
use crate::pitch::{sweep, PitchEstimate, PitchTrack, SkipRegion};
use crate::plot::{PlotSeries, Plotter};
use crate::spectrum::{Cepstrum, PowerSpectrum, SpectralAnalyzer};
use log::info;
use std::path::Path;

/// Everything computed for one analysis window
#[derive(Debug, Clone)]
pub struct WindowAnalysis {
    pub power: PowerSpectrum,
    pub autocorrelation: Vec<f64>,
    pub cepstrum: Cepstrum,
    pub estimate: PitchEstimate,
}

/// Recording plus analysis state
pub struct PitchLab {
    waveform: Waveform,
    config: PitchConfig,
    skip_region: SkipRegion,
    analyzer: SpectralAnalyzer,
}

impl PitchLab {
    /// Load a WAV file and prepare it for analysis
    pub fn open<P: AsRef<Path>>(path: P, config: PitchConfig) -> Result<Self> {
        Self::new(Waveform::load(path)?, config)
    }

    /// Prepare an already loaded waveform for analysis
    ///
    /// Validates the configuration and computes the skip region once.
    pub fn new(waveform: Waveform, config: PitchConfig) -> Result<Self> {
        config.validate()?;
        let skip_region = SkipRegion::compute(waveform.sample_rate(), config.max_pitch_freq)?;

        info!(
            "n_cepstrum_points_to_skip = {}, max pitch freq = {:.1} kHz",
            skip_region.n_skip,
            skip_region.effective_max_pitch_freq * 1e-3
        );

        Ok(Self {
            analyzer: SpectralAnalyzer::with_window(config.window_type),
            waveform,
            config,
            skip_region,
        })
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    pub fn config(&self) -> &PitchConfig {
        &self.config
    }

    pub fn skip_region(&self) -> SkipRegion {
        self.skip_region
    }

    /// Power spectrum of the configured block at `offset_time_sec`
    pub fn power_spectrum(&mut self, offset_time_sec: f64) -> Result<PowerSpectrum> {
        self.analyzer.power_spectrum(
            &self.waveform,
            offset_time_sec,
            self.config.blocksize,
            self.config.apply_window,
        )
    }

    /// Pitch estimate from a power spectrum, searching lags up to half its length
    pub fn cepstrum_pitch(&mut self, power: &PowerSpectrum) -> Result<PitchEstimate> {
        self.analyzer
            .cepstrum_pitch(power, power.len() / 2, self.skip_region.n_skip)
    }

    /// Full analysis of one window: spectrum, autocorrelation, cepstrum, estimate
    pub fn analyze_window(&mut self, offset_time_sec: f64) -> Result<WindowAnalysis> {
        let power = self.power_spectrum(offset_time_sec)?;
        let autocorrelation = self.analyzer.autocorrelation(&power);
        let cepstrum = self.analyzer.cepstrum(&power);
        let estimate =
            PitchEstimate::from_cepstrum(&cepstrum, power.len() / 2, self.skip_region.n_skip)?;

        Ok(WindowAnalysis {
            power,
            autocorrelation,
            cepstrum,
            estimate,
        })
    }

    /// Pitch and goodness of pitch across the whole recording
    pub fn goodness_of_pitch(&mut self) -> Result<PitchTrack> {
        let params = self.config.sweep_params(self.skip_region);
        sweep(&mut self.analyzer, &self.waveform, &params)
    }

    /// Hand the diagnostic plots for one window to a plotter
    ///
    /// Sends time history, power spectrum, autocorrelation and cepstrum, in
    /// that order, and returns the window's pitch estimate.
    pub fn plot_window(
        &mut self,
        offset_time_sec: f64,
        title: &str,
        plotter: &mut dyn Plotter,
    ) -> Result<PitchEstimate> {
        let analysis = self.analyze_window(offset_time_sec)?;
        let num_points = analysis.power.len() / 2;
        let sample_rate = self.waveform.sample_rate();

        plotter.plot(PlotSeries::time_history(
            &self.waveform,
            offset_time_sec,
            Some(self.config.blocksize),
            title,
        )?)?;
        plotter.plot(PlotSeries::power_spectrum(&analysis.power, title))?;
        plotter.plot(PlotSeries::autocorrelation(
            &analysis.autocorrelation,
            sample_rate,
            num_points,
            title,
        ))?;
        plotter.plot(PlotSeries::cepstrum(&analysis.cepstrum, num_points, title))?;

        Ok(analysis.estimate)
    }

    /// Hand goodness-of-pitch and thresholded pitch plots to a plotter
    pub fn plot_track(&self, track: &PitchTrack, title: &str, plotter: &mut dyn Plotter) -> Result<()> {
        plotter.plot(PlotSeries::goodness_track(track, title))?;
        plotter.plot(PlotSeries::pitch_track(track, self.config.goodness_threshold, title))
    }
}
