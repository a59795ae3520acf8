//! External speech synthesis collaborator.

mod placeholder;
mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use placeholder::{demo_placeholder_url, generated_placeholder_url, PLACEHOLDER_HOST};
pub use remote::{RemoteSynthesisClient, SynthesisConfig};

/// Voice-shaping parameters sent with every synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.75,
            similarity_boost: 0.85,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_profile_id: String,
    pub voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, Default)]
pub struct SynthesisOutput {
    /// Audio location reported by the backend, when it reported one.
    pub audio_url: Option<String>,
}

#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutput>;
}
