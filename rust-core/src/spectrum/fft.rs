//! FFT engine using rustfft
//!
//! Full-length complex transforms for power spectrum and cepstrum work

use num_complex::Complex;
use rustfft::FftPlanner;

/// FFT engine for arbitrary block sizes
///
/// Plans are cached by the planner, so repeated calls with the same block
/// size reuse the same twiddles. One engine belongs to one analyzer.
pub struct FftEngine {
    /// FFT planner (caches forward and inverse plans per size)
    planner: FftPlanner<f64>,

    /// Reusable complex buffer
    buffer: Vec<Complex<f64>>,

    /// Reusable scratch space for in-place processing
    scratch: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            buffer: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Forward transform of a real signal
    ///
    /// # Arguments
    /// * `signal` - Input signal (transform length = signal length)
    ///
    /// # Returns
    /// All `signal.len()` complex bins X[k]
    pub fn forward(&mut self, signal: &[f64]) -> Vec<Complex<f64>> {
        self.buffer.clear();
        self.buffer
            .extend(signal.iter().map(|&s| Complex::new(s, 0.0)));
        self.run(false);
        self.buffer.clone()
    }

    /// Inverse transform of a real sequence, returning |x[n]|
    ///
    /// Normalized by 1/N, matching the usual inverse DFT definition.
    pub fn inverse_magnitude(&mut self, spectrum: &[f64]) -> Vec<f64> {
        self.buffer.clear();
        self.buffer
            .extend(spectrum.iter().map(|&v| Complex::new(v, 0.0)));
        self.run(true);

        let scale = 1.0 / spectrum.len().max(1) as f64;
        self.buffer.iter().map(|c| c.norm() * scale).collect()
    }

    fn run(&mut self, inverse: bool) {
        let len = self.buffer.len();
        if len == 0 {
            return;
        }

        let fft = if inverse {
            self.planner.plan_fft_inverse(len)
        } else {
            self.planner.plan_fft_forward(len)
        };

        let scratch_len = fft.get_inplace_scratch_len();
        if self.scratch.len() < scratch_len {
            self.scratch.resize(scratch_len, Complex::new(0.0, 0.0));
        }
        fft.process_with_scratch(&mut self.buffer, &mut self.scratch[..scratch_len]);
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new();

        let signal = vec![1.0; 128];
        let spectrum = fft.forward(&signal);

        assert_eq!(spectrum.len(), 128);
        assert!((spectrum[0].re - 128.0).abs() < 1e-9);
        assert!(spectrum[10].norm() < 1e-9);
    }

    #[test]
    fn test_fft_sine_wave_symmetric() {
        let mut fft = FftEngine::new();

        // 16 cycles over 1024 samples lands exactly on bin 16
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 16.0 * n as f64 / 1024.0).sin())
            .collect();
        let spectrum = fft.forward(&signal);

        let (peak_bin, _) = spectrum[..512]
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().partial_cmp(&b.norm()).unwrap())
            .unwrap();

        assert_eq!(peak_bin, 16);
        assert!((spectrum[16].norm() - 512.0).abs() < 1e-6);
        // Real input: X[N-k] is the conjugate of X[k]
        assert!((spectrum[1024 - 16] - spectrum[16].conj()).norm() < 1e-6);
    }

    #[test]
    fn test_inverse_of_power_is_autocorrelation() {
        let mut fft = FftEngine::new();

        let signal: Vec<f64> = (0..64).map(|n| (n as f64 * 0.3).cos() + 2.0).collect();
        let spectrum = fft.forward(&signal);

        // |X|^2 is real, so its inverse is the circular autocorrelation
        let power: Vec<f64> = spectrum.iter().map(|c| c.norm_sqr()).collect();
        let autocorr = fft.inverse_magnitude(&power);
        let energy: f64 = signal.iter().map(|s| s * s).sum();

        assert_eq!(autocorr.len(), 64);
        assert!((autocorr[0] - energy).abs() < 1e-6);
    }

    #[test]
    fn test_odd_and_empty_lengths() {
        let mut fft = FftEngine::new();

        assert_eq!(fft.forward(&[1.0, 2.0, 3.0]).len(), 3);
        assert!(fft.forward(&[]).is_empty());
        assert!(fft.inverse_magnitude(&[]).is_empty());
    }
}
