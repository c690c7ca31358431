//! Cepstral Pitch - Goodness-of-Pitch Analysis Core
//!
//! Offline pitch and goodness-of-pitch estimation for recorded vocalizations
//! (e.g. birdsong motifs) using the power cepstrum.
//!
//! ```no_run
//! use cepstral_pitch::{PitchConfig, PitchLab};
//!
//! let mut lab = PitchLab::open("motif.wav", PitchConfig::default())?;
//! let track = lab.goodness_of_pitch()?;
//! for point in track.above_threshold(lab.config().goodness_threshold) {
//!     println!("{:.3}s {:.1}Hz", point.time_sec, point.pitch_hz);
//! }
//! # Ok::<(), cepstral_pitch::PitchError>(())
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod lab;
pub mod pitch;
pub mod plot;
pub mod spectrum;

pub use audio::Waveform;
pub use config::PitchConfig;
pub use error::{PitchError, Result};
pub use lab::{PitchLab, WindowAnalysis};
pub use pitch::{sweep, PitchEstimate, PitchPoint, PitchTrack, SkipRegion, SweepParams};
pub use plot::{PlotSeries, Plotter};
pub use spectrum::{Cepstrum, PowerSpectrum, SpectralAnalyzer, WindowType};
