//! Cepstral pitch estimation and pitch tracking

pub mod skip_region;
pub mod estimator;
pub mod sweep;

pub use skip_region::SkipRegion;
pub use estimator::PitchEstimate;
pub use sweep::{sweep, PitchPoint, PitchTrack, SweepParams};
