//! Text-to-speech request workflow against a stored voice profile.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ids;
use crate::models::GenerationRecord;
use crate::store::{GenerationHistoryStore, VoiceProfileStore};
use crate::synthesis::{
    demo_placeholder_url, generated_placeholder_url, SynthesisBackend, SynthesisRequest,
    VoiceSettings,
};

pub const MAX_TEXT_CHARS: usize = 5_000;

const SECS_PER_CHAR: f64 = 0.1;
const MIN_OUTPUT_SECS: f64 = 10.0;
const MAX_OUTPUT_SECS: f64 = 300.0;

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub audio_url: String,
    pub history_id: String,
    /// Set when the audio reference is a placeholder standing in for a failed call.
    pub demo_mode: bool,
    pub record: GenerationRecord,
}

#[derive(Clone)]
pub struct GenerationService {
    profiles: Arc<dyn VoiceProfileStore>,
    history: Arc<dyn GenerationHistoryStore>,
    backend: Arc<dyn SynthesisBackend>,
    voice_settings: VoiceSettings,
}

impl GenerationService {
    pub fn new(
        profiles: Arc<dyn VoiceProfileStore>,
        history: Arc<dyn GenerationHistoryStore>,
        backend: Arc<dyn SynthesisBackend>,
    ) -> Self {
        Self {
            profiles,
            history,
            backend,
            voice_settings: VoiceSettings::default(),
        }
    }

    pub async fn generate(&self, voice_profile_id: &str, text: &str) -> Result<GenerationOutcome> {
        let voice_profile_id = voice_profile_id.trim();
        if voice_profile_id.is_empty() || text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Voice profile ID and text are required".to_string(),
            ));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(Error::InvalidInput(format!(
                "Text too long. Maximum {MAX_TEXT_CHARS} characters."
            )));
        }

        let profile = self
            .profiles
            .get(voice_profile_id)
            .await?
            .ok_or(Error::ProfileNotFound)?;

        let request = SynthesisRequest {
            text: text.to_string(),
            voice_profile_id: profile.id.clone(),
            voice_settings: self.voice_settings,
        };

        let (audio_url, demo_mode) = match self.backend.synthesize(request).await {
            Ok(output) => (
                output.audio_url.unwrap_or_else(generated_placeholder_url),
                false,
            ),
            Err(err) => {
                warn!(
                    backend = self.backend.name(),
                    "Synthesis unavailable, using placeholder audio: {err}"
                );
                (demo_placeholder_url(text), true)
            }
        };

        let record = self
            .history
            .append(GenerationRecord {
                id: ids::new_generation_id(),
                voice_profile_id: profile.id,
                voice_profile_name: profile.name,
                text: text.to_string(),
                audio_url: audio_url.clone(),
                created_at: Utc::now(),
                duration: estimate_output_duration(text),
            })
            .await?;

        info!(
            history_id = %record.id,
            demo_mode,
            duration_secs = record.duration,
            "Generation recorded"
        );

        Ok(GenerationOutcome {
            audio_url,
            history_id: record.id.clone(),
            demo_mode,
            record,
        })
    }
}

/// `clamp(chars * 0.1, 10, 300)` seconds.
pub fn estimate_output_duration(text: &str) -> f64 {
    (text.chars().count() as f64 * SECS_PER_CHAR).clamp(MIN_OUTPUT_SECS, MAX_OUTPUT_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quality, VoiceProfile};
    use crate::store::{InMemoryHistoryStore, InMemoryProfileStore};
    use crate::synthesis::SynthesisOutput;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Fail,
        Succeed(Option<&'static str>),
    }

    struct MockBackend {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SynthesisBackend for MockBackend {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn synthesize(&self, _request: SynthesisRequest) -> Result<SynthesisOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Fail => Err(Error::Synthesis("connection refused".to_string())),
                Behavior::Succeed(url) => Ok(SynthesisOutput {
                    audio_url: url.map(str::to_string),
                }),
            }
        }
    }

    struct Fixture {
        service: GenerationService,
        history: Arc<InMemoryHistoryStore>,
        backend: Arc<MockBackend>,
        profile_id: String,
    }

    async fn fixture(behavior: Behavior) -> Fixture {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let history = Arc::new(InMemoryHistoryStore::new());
        let backend = MockBackend::new(behavior);

        let profile = profiles
            .create(
                VoiceProfile {
                    id: ids::new_profile_id(),
                    name: "Narrator".to_string(),
                    description: None,
                    audio_url: "http://localhost/audio".to_string(),
                    created_at: Utc::now(),
                    duration: 20.0,
                    quality: Quality::High,
                    sample_rate: None,
                    channels: None,
                    file_size: None,
                },
                None,
            )
            .await
            .unwrap();

        Fixture {
            service: GenerationService::new(profiles, history.clone(), backend.clone()),
            history,
            backend,
            profile_id: profile.id,
        }
    }

    #[test]
    fn output_duration_is_clamped() {
        assert_eq!(estimate_output_duration("Hello world"), 10.0);
        assert_eq!(estimate_output_duration(&"x".repeat(250)), 25.0);
        assert_eq!(estimate_output_duration(&"x".repeat(5000)), 300.0);
        assert_eq!(estimate_output_duration(&"é".repeat(150)), 15.0);
    }

    #[tokio::test]
    async fn unknown_profile_is_not_found_and_records_nothing() {
        let fx = fixture(Behavior::Succeed(None)).await;

        let result = fx.service.generate("voice_missing", "Hello world").await;
        assert!(matches!(result, Err(Error::ProfileNotFound)));
        assert!(fx.history.list().await.unwrap().is_empty());
        assert_eq!(fx.backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn synthesis_failure_degrades_to_placeholder() {
        let fx = fixture(Behavior::Fail).await;

        let outcome = fx
            .service
            .generate(&fx.profile_id, "Hello world")
            .await
            .unwrap();
        assert!(outcome.demo_mode);
        assert!(outcome.audio_url.contains("Demo+Generated+Audio"));

        let history = fx.history.list().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, outcome.history_id);
        assert_eq!(history[0].voice_profile_name, "Narrator");
    }

    #[tokio::test]
    async fn successful_synthesis_uses_reported_url() {
        let fx = fixture(Behavior::Succeed(Some("https://cdn.example/out.mp3"))).await;

        let outcome = fx
            .service
            .generate(&fx.profile_id, &"word ".repeat(100))
            .await
            .unwrap();
        assert!(!outcome.demo_mode);
        assert_eq!(outcome.audio_url, "https://cdn.example/out.mp3");
        assert_eq!(outcome.record.duration, 50.0);
    }

    #[tokio::test]
    async fn successful_synthesis_without_url_uses_generated_placeholder() {
        let fx = fixture(Behavior::Succeed(None)).await;

        let outcome = fx.service.generate(&fx.profile_id, "Hi").await.unwrap();
        assert!(!outcome.demo_mode);
        assert_eq!(outcome.audio_url, generated_placeholder_url());
        assert_eq!(outcome.record.duration, 10.0);
    }

    #[tokio::test]
    async fn rejects_blank_and_oversized_text() {
        let fx = fixture(Behavior::Succeed(None)).await;

        assert!(matches!(
            fx.service.generate(&fx.profile_id, "   ").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            fx.service.generate("", "Hello").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            fx.service
                .generate(&fx.profile_id, &"x".repeat(MAX_TEXT_CHARS + 1))
                .await,
            Err(Error::InvalidInput(_))
        ));
        assert!(fx
            .service
            .generate(&fx.profile_id, &"x".repeat(MAX_TEXT_CHARS))
            .await
            .is_ok());
        assert_eq!(fx.history.list().await.unwrap().len(), 1);
    }
}
