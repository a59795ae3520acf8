//! Upload validation and audio estimation.

pub mod analysis;
mod decode;
pub mod format;
pub mod upload;
pub mod validation;

pub use analysis::{
    classify_size, classify_stream, AudioAnalysis, AudioEstimator, AudioMeasurement,
    DecodingEstimator, EstimatorKind, HeuristicEstimator,
};
pub use decode::AudioProbe;
pub use format::{format_duration, format_file_size};
pub use upload::AudioUpload;
pub use validation::{validate_upload, ValidationError};
