//! Voice profile storage.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::VoiceProfile;

/// Uploaded sample kept alongside a profile so it can be served back.
#[derive(Debug, Clone)]
pub struct StoredSample {
    pub audio_bytes: Vec<u8>,
    pub audio_mime_type: String,
    pub audio_filename: Option<String>,
}

#[async_trait]
pub trait VoiceProfileStore: Send + Sync {
    /// Append a profile and return it.
    async fn create(
        &self,
        profile: VoiceProfile,
        sample: Option<StoredSample>,
    ) -> Result<VoiceProfile>;

    /// All profiles in insertion order.
    async fn list(&self) -> Result<Vec<VoiceProfile>>;

    async fn get(&self, id: &str) -> Result<Option<VoiceProfile>>;

    async fn get_sample(&self, id: &str) -> Result<Option<StoredSample>>;

    /// Remove the first profile with this id. Returns `false` when nothing matched.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Insert `profiles` only when the store is empty. Returns whether anything was added.
    async fn seed(&self, profiles: Vec<VoiceProfile>) -> Result<bool>;
}

struct ProfileEntry {
    profile: VoiceProfile,
    sample: Option<StoredSample>,
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    entries: RwLock<Vec<ProfileEntry>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoiceProfileStore for InMemoryProfileStore {
    async fn create(
        &self,
        profile: VoiceProfile,
        sample: Option<StoredSample>,
    ) -> Result<VoiceProfile> {
        let mut entries = self.entries.write().await;
        entries.push(ProfileEntry {
            profile: profile.clone(),
            sample,
        });
        Ok(profile)
    }

    async fn list(&self) -> Result<Vec<VoiceProfile>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().map(|entry| entry.profile.clone()).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<VoiceProfile>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|entry| entry.profile.id == id)
            .map(|entry| entry.profile.clone()))
    }

    async fn get_sample(&self, id: &str) -> Result<Option<StoredSample>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|entry| entry.profile.id == id)
            .and_then(|entry| entry.sample.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        match entries.iter().position(|entry| entry.profile.id == id) {
            Some(index) => {
                entries.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn seed(&self, profiles: Vec<VoiceProfile>) -> Result<bool> {
        let mut entries = self.entries.write().await;
        if !entries.is_empty() {
            return Ok(false);
        }
        entries.extend(
            profiles
                .into_iter()
                .map(|profile| ProfileEntry {
                    profile,
                    sample: None,
                }),
        );
        Ok(true)
    }
}
