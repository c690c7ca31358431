//! Spectral analysis with FFT

pub mod fft;
pub mod windowing;
pub mod analysis;

pub use fft::FftEngine;
pub use windowing::{apply_window_inplace, generate_window, WindowType};
pub use analysis::{Cepstrum, PowerSpectrum, SpectralAnalyzer, POWER_FLOOR};
