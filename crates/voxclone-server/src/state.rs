//! Shared application state. One store instance per entity, injected into every handler.

use std::sync::Arc;

use voxclone_core::{
    AudioEstimator, GenerationHistoryStore, GenerationService, InMemoryHistoryStore,
    InMemoryProfileStore, ProfileIntake, RemoteSynthesisClient, SynthesisBackend,
    VoiceProfileStore,
};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn VoiceProfileStore>,
    pub history: Arc<dyn GenerationHistoryStore>,
    pub intake: ProfileIntake,
    pub generation: GenerationService,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let backend = RemoteSynthesisClient::new(config.synthesis.clone())?;
        Ok(Self::with_parts(
            Arc::new(InMemoryProfileStore::new()),
            Arc::new(InMemoryHistoryStore::new()),
            config.estimator.build(),
            Arc::new(backend),
            config.public_url.clone(),
        ))
    }

    pub fn with_parts(
        profiles: Arc<dyn VoiceProfileStore>,
        history: Arc<dyn GenerationHistoryStore>,
        estimator: Arc<dyn AudioEstimator>,
        backend: Arc<dyn SynthesisBackend>,
        public_url: String,
    ) -> Self {
        let intake = ProfileIntake::new(profiles.clone(), estimator, public_url);
        let generation = GenerationService::new(profiles.clone(), history.clone(), backend);
        Self {
            profiles,
            history,
            intake,
            generation,
        }
    }
}
