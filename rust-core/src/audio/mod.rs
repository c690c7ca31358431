//! Audio file input

pub mod waveform;

pub use waveform::Waveform;
