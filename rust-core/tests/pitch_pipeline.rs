//! End-to-end tests: WAV file on disk to pitch track

use cepstral_pitch::{
    sweep, PitchConfig, PitchError, PitchLab, PlotSeries, SkipRegion, SpectralAnalyzer,
    Waveform,
};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::f64::consts::PI;
use std::path::PathBuf;

/// Harmonic-rich tone (sawtooth-like) with fundamental `f0`
fn harmonic_samples(f0: f64, sample_rate: f64, len: usize) -> Vec<i16> {
    let harmonics = (sample_rate / 2.0 / f0) as usize;
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate;
            let v: f64 = (1..harmonics)
                .map(|h| (2.0 * PI * f0 * h as f64 * t).sin() / h as f64)
                .sum();
            (8000.0 * v).round() as i16
        })
        .collect()
}

fn fixture_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cepstral_pitch_{}_{}.wav", std::process::id(), name))
}

fn write_wav(name: &str, samples: &[i16], sample_rate: u32, bits: u16) -> PathBuf {
    let path = fixture_path(name);
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: bits,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&path, spec).expect("create fixture");
    for &s in samples {
        if bits == 16 {
            writer.write_sample(s).expect("write sample");
        } else {
            writer.write_sample(s as i32 * 256).expect("write sample");
        }
    }
    writer.finalize().expect("finalize fixture");
    path
}

#[test]
fn test_load_from_disk() {
    let samples = harmonic_samples(440.0, 44100.0, 2048);
    let path = write_wav("load", &samples, 44100, 16);

    let wf = Waveform::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(wf.sample_rate(), 44100.0);
    assert_eq!(wf.samples(), samples.as_slice());
    assert_eq!(wf.sample_times().len(), 2049);
}

#[test]
fn test_24_bit_file_rejected() {
    let path = write_wav("24bit", &[0, 100, -100, 5], 44100, 24);

    let err = Waveform::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, PitchError::Format(_)));
}

#[test]
fn test_missing_file_rejected() {
    let err = PitchLab::open(fixture_path("never_written"), PitchConfig::default()).err();
    assert!(matches!(err, Some(PitchError::Io { .. })));
}

#[test]
fn test_single_window_440hz() {
    let wf = Waveform::from_samples(harmonic_samples(440.0, 44100.0, 1024), 44100.0).unwrap();
    let region = SkipRegion::compute(44100.0, 4200.0).unwrap();
    assert_eq!(region.n_skip, 10);

    let mut analyzer = SpectralAnalyzer::new();
    for apply_window in [false, true] {
        let ps = analyzer.power_spectrum(&wf, 0.0, 1024, apply_window).unwrap();
        let est = analyzer.cepstrum_pitch(&ps, 512, region.n_skip).unwrap();

        assert!(
            (est.pitch_hz - 440.0).abs() <= 44100.0 / 1024.0,
            "window={apply_window}: {est:?}"
        );
        assert!(est.peak_lag_index >= region.n_skip);
        assert!(est.goodness > 0.0);
    }
}

#[test]
fn test_round_trip_other_pitches() {
    let sample_rate = 44100.0;
    let blocksize = 2048;
    let region = SkipRegion::compute(sample_rate, 4200.0).unwrap();
    let mut analyzer = SpectralAnalyzer::new();

    for f0 in [220.0, 300.0, 1000.0] {
        let wf = Waveform::from_samples(harmonic_samples(f0, sample_rate, blocksize), sample_rate)
            .unwrap();
        let ps = analyzer.power_spectrum(&wf, 0.0, blocksize, true).unwrap();
        let est = analyzer.cepstrum_pitch(&ps, blocksize / 2, region.n_skip).unwrap();

        assert!(
            (est.pitch_hz - f0).abs() <= sample_rate / blocksize as f64,
            "f0={f0}: {est:?}"
        );
    }
}

#[test]
fn test_repeated_calls_are_bit_identical() {
    let wf = Waveform::from_samples(harmonic_samples(440.0, 44100.0, 4096), 44100.0).unwrap();
    let mut analyzer = SpectralAnalyzer::new();

    let ps1 = analyzer.power_spectrum(&wf, 0.02, 1024, true).unwrap();
    let est1 = analyzer.cepstrum_pitch(&ps1, 512, 10).unwrap();

    // Different window in between must not leak into the next result
    let other = analyzer.power_spectrum(&wf, 0.05, 512, false).unwrap();
    analyzer.cepstrum_pitch(&other, 256, 10).unwrap();

    let ps2 = analyzer.power_spectrum(&wf, 0.02, 1024, true).unwrap();
    let est2 = analyzer.cepstrum_pitch(&ps2, 512, 10).unwrap();

    assert_eq!(ps1, ps2);
    assert_eq!(est1.pitch_hz.to_bits(), est2.pitch_hz.to_bits());
    assert_eq!(est1.goodness.to_bits(), est2.goodness.to_bits());
    assert_eq!(est1.peak_lag_index, est2.peak_lag_index);
}

#[test]
fn test_offset_near_end_is_bounded() {
    let wf = Waveform::from_samples(harmonic_samples(440.0, 44100.0, 1500), 44100.0).unwrap();
    let mut analyzer = SpectralAnalyzer::new();

    // Only 1500 - 1000 samples remain: spectrum covers what exists
    let ps = analyzer.power_spectrum(&wf, 1000.0 / 44100.0, 1024, true).unwrap();
    assert_eq!(ps.offset_index(), 1000);
    assert_eq!(ps.len(), 500);

    // Searching further than the short spectrum allows is refused
    let err = analyzer.cepstrum_pitch(&ps, 512, 10).unwrap_err();
    assert!(matches!(err, PitchError::InvalidParameter(_)));

    // Past the end entirely
    let err = analyzer.power_spectrum(&wf, 1.0, 1024, true).unwrap_err();
    assert!(matches!(err, PitchError::InvalidParameter(_)));
}

#[test]
fn test_zero_skip_peak_is_invalid() {
    let wf = Waveform::from_samples(harmonic_samples(440.0, 44100.0, 1024), 44100.0).unwrap();
    let mut analyzer = SpectralAnalyzer::new();
    let ps = analyzer.power_spectrum(&wf, 0.0, 1024, true).unwrap();

    let err = analyzer.cepstrum_pitch(&ps, 512, 0).unwrap_err();
    assert!(matches!(err, PitchError::InvalidPeak { n_skip: 0, .. }));
}

#[test]
fn test_two_second_sweep() {
    let wf = Waveform::from_samples(harmonic_samples(440.0, 44100.0, 88200), 44100.0).unwrap();
    let config = PitchConfig::default();
    let region = SkipRegion::compute(wf.sample_rate(), config.max_pitch_freq).unwrap();

    let track = sweep(&mut SpectralAnalyzer::new(), &wf, &config.sweep_params(region)).unwrap();

    // (2.0 - 0.0232) / 0.0116 windows, plus the one at t = 0
    assert_eq!(track.len(), 171);
    let times = track.times();
    assert_eq!(times[0], 0.0);
    assert!(times.windows(2).all(|w| w[1] > w[0]));
    assert!(times.last().copied().unwrap() + 1024.0 / 44100.0 < 2.0);
}

#[test]
fn test_lab_from_file_end_to_end() {
    let samples = harmonic_samples(500.0, 22050.0, 22050);
    let path = write_wav("lab", &samples, 22050, 16);

    let config = PitchConfig { blocksize: 512, ..PitchConfig::default() };
    let mut lab = PitchLab::open(&path, config).unwrap();
    std::fs::remove_file(&path).ok();

    let track = lab.goodness_of_pitch().unwrap();
    assert!(!track.is_empty());

    let reliable: Vec<_> = track.above_threshold(lab.config().goodness_threshold).collect();
    assert!(!reliable.is_empty());
    for p in reliable {
        assert!((p.pitch_hz - 500.0).abs() <= 22050.0 / 512.0, "{p:?}");
    }

    let mut plots: Vec<PlotSeries> = Vec::new();
    let estimate = lab.plot_window(0.25, "motif", &mut plots).unwrap();
    assert_eq!(plots.len(), 4);
    assert!((estimate.pitch_hz - 500.0).abs() <= 22050.0 / 512.0);
}
