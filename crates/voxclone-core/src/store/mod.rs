//! In-memory storage behind injectable traits.

pub mod history;
pub mod profiles;
pub mod samples;

pub use history::{GenerationHistoryStore, InMemoryHistoryStore};
pub use profiles::{InMemoryProfileStore, StoredSample, VoiceProfileStore};
pub use samples::{sample_history, sample_profiles};
