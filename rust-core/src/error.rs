//! Error types for pitch analysis

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading audio or estimating pitch
#[derive(Error, Debug)]
pub enum PitchError {
    #[error("Unsupported audio format: {0}")]
    Format(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Cepstrum peak landed on zero lag (num_points={num_points}, n_skip={n_skip})")]
    InvalidPeak { num_points: usize, n_skip: usize },

    #[error("Numeric domain error: {0}")]
    NumericDomain(String),

    #[error("Pitch estimate failed at offset {offset_sec:.4} s: {source}")]
    SweepWindow {
        offset_sec: f64,
        #[source]
        source: Box<PitchError>,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PitchError>;

impl PitchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PitchError::InvalidParameter(msg.into())
    }

    /// Map a hound error, keeping I/O failures distinct from format problems
    pub(crate) fn from_wav(err: hound::Error, path: PathBuf) -> Self {
        match err {
            hound::Error::IoError(source) => PitchError::Io { path, source },
            other => PitchError::Format(other.to_string()),
        }
    }
}
