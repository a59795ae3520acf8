//! Voxclone core - voice profile intake, audio estimation and speech generation workflow.
//!
//! The HTTP surface lives in `voxclone-server`; this crate holds everything that can be
//! exercised without a network listener.

pub mod audio;
pub mod error;
pub mod generation;
pub mod ids;
pub mod intake;
pub mod models;
pub mod store;
pub mod synthesis;

pub use audio::{
    AudioAnalysis, AudioEstimator, AudioMeasurement, AudioUpload, DecodingEstimator,
    EstimatorKind, HeuristicEstimator, ValidationError,
};
pub use error::{Error, Result};
pub use generation::{GenerationOutcome, GenerationService};
pub use intake::{NewVoiceProfile, ProfileIntake};
pub use models::{GenerationRecord, Quality, VoiceProfile};
pub use store::{
    GenerationHistoryStore, InMemoryHistoryStore, InMemoryProfileStore, StoredSample,
    VoiceProfileStore,
};
pub use synthesis::{
    RemoteSynthesisClient, SynthesisBackend, SynthesisConfig, SynthesisOutput, SynthesisRequest,
    VoiceSettings,
};
