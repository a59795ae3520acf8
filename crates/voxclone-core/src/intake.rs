//! Upload-to-profile pipeline: validate, estimate, persist.

use std::sync::Arc;

use chrono::Utc;
use tokio::task;
use tracing::info;

use crate::audio::{
    format_duration, format_file_size, validate_upload, AudioEstimator, AudioMeasurement,
    AudioUpload,
};
use crate::error::{Error, Result};
use crate::ids;
use crate::models::VoiceProfile;
use crate::store::{StoredSample, VoiceProfileStore};

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct NewVoiceProfile {
    pub name: String,
    pub description: Option<String>,
    pub upload: AudioUpload,
}

#[derive(Clone)]
pub struct ProfileIntake {
    store: Arc<dyn VoiceProfileStore>,
    estimator: Arc<dyn AudioEstimator>,
    public_base_url: String,
}

impl ProfileIntake {
    pub fn new(
        store: Arc<dyn VoiceProfileStore>,
        estimator: Arc<dyn AudioEstimator>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            estimator,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn register(&self, request: NewVoiceProfile) -> Result<VoiceProfile> {
        let name = validate_name(&request.name)?;
        let description = validate_description(request.description.as_deref())?;

        let estimator = self.estimator.clone();
        let upload = request.upload;
        let (upload, measurement) = task::spawn_blocking(move || {
            let measurement = validate_upload(&upload, estimator.as_ref())?;
            Ok::<_, Error>((upload, measurement))
        })
        .await
        .map_err(|err| Error::AudioDecode(format!("Audio analysis worker failed: {err}")))??;
        let AudioMeasurement {
            duration_secs: duration,
            analysis,
        } = measurement;

        let id = ids::new_profile_id();
        let profile = VoiceProfile {
            audio_url: format!("{}/profiles/{id}/audio", self.public_base_url),
            id,
            name,
            description,
            created_at: Utc::now(),
            duration,
            quality: analysis.quality,
            sample_rate: Some(analysis.sample_rate),
            channels: Some(analysis.channels),
            file_size: Some(upload.size()),
        };

        info!(
            profile_id = %profile.id,
            estimator = self.estimator.name(),
            quality = %profile.quality,
            duration = %format_duration(duration),
            size = %format_file_size(upload.size()),
            "Voice profile registered"
        );

        let sample = StoredSample {
            audio_mime_type: upload.content_type(),
            audio_filename: upload.filename,
            audio_bytes: upload.bytes,
        };
        self.store.create(profile, Some(sample)).await
    }
}

pub fn validate_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("Voice name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(Error::InvalidInput(format!(
            "Voice name must be {MAX_NAME_CHARS} characters or less"
        )));
    }
    let allowed = name
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch.is_whitespace() || ch == '-' || ch == '_');
    if !allowed {
        return Err(Error::InvalidInput(
            "Voice name can only contain letters, numbers, spaces, hyphens, and underscores"
                .to_string(),
        ));
    }
    Ok(name.to_string())
}

pub fn validate_description(raw: Option<&str>) -> Result<Option<String>> {
    let Some(description) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(Error::InvalidInput(format!(
            "Description must be {MAX_DESCRIPTION_CHARS} characters or less"
        )));
    }
    Ok(Some(description.to_string()))
}
