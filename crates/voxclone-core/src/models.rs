//! Records exchanged between the stores, the generation workflow and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse quality tier attached to an uploaded sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceProfile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub audio_url: String,
    pub created_at: DateTime<Utc>,
    /// Estimated sample length in seconds.
    pub duration: f64,
    pub quality: Quality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub id: String,
    pub voice_profile_id: String,
    pub voice_profile_name: String,
    pub text: String,
    pub audio_url: String,
    pub created_at: DateTime<Utc>,
    /// Estimated output length in seconds.
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Quality::Medium).unwrap(), "\"medium\"");
        let parsed: Quality = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, Quality::High);
    }

    #[test]
    fn quality_orders_low_to_high() {
        assert!(Quality::Low < Quality::Medium);
        assert!(Quality::Medium < Quality::High);
    }

    #[test]
    fn profile_uses_camel_case_and_skips_missing_optionals() {
        let profile = VoiceProfile {
            id: "voice_1_abc".to_string(),
            name: "Test".to_string(),
            description: None,
            audio_url: "http://localhost/profiles/voice_1_abc/audio".to_string(),
            created_at: Utc::now(),
            duration: 12.0,
            quality: Quality::Medium,
            sample_rate: Some(44_100),
            channels: None,
            file_size: None,
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["audioUrl"], "http://localhost/profiles/voice_1_abc/audio");
        assert_eq!(value["sampleRate"], 44_100);
        assert_eq!(value["quality"], "medium");
        assert!(value.get("channels").is_none());
        assert!(value.get("description").is_none());
        assert!(value.get("createdAt").is_some());
    }
}
