use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{SynthesisBackend, SynthesisOutput, SynthesisRequest, VoiceSettings};
use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://oi-server.onrender.com/chat/completions";
pub const DEFAULT_MODEL: &str = "openrouter/elevenlabs/voice-synthesis";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub customer_id: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            customer_id: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct SynthesisPayload<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    voice_settings: VoiceSettings,
}

/// Chat-completion shaped synthesis endpoint.
#[derive(Clone)]
pub struct RemoteSynthesisClient {
    client: Client,
    config: SynthesisConfig,
}

impl RemoteSynthesisClient {
    pub fn new(config: SynthesisConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("voxclone/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Synthesis(format!("Failed to initialize HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SynthesisBackend for RemoteSynthesisClient {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutput> {
        let payload = build_payload(&self.config.model, &request);

        let mut builder = self.client.post(&self.config.endpoint).json(&payload);
        if let Some(api_key) = self.config.api_key.as_deref() {
            builder = builder.bearer_auth(api_key);
        }
        if let Some(customer_id) = self.config.customer_id.as_deref() {
            builder = builder.header("CustomerId", customer_id);
        }

        debug!(
            endpoint = %self.config.endpoint,
            voice_profile_id = %request.voice_profile_id,
            "Calling synthesis endpoint"
        );

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Synthesis(format!("Synthesis request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!(
                "Synthesis endpoint returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Synthesis(format!("Invalid synthesis response: {e}")))?;

        let audio_url = extract_audio_url(&body);
        info!(has_audio_url = audio_url.is_some(), "Synthesis endpoint responded");
        Ok(SynthesisOutput { audio_url })
    }
}

fn build_payload<'a>(model: &'a str, request: &SynthesisRequest) -> SynthesisPayload<'a> {
    SynthesisPayload {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: format!(
                "Generate speech using voice cloning for the following text: \"{}\"",
                request.text
            ),
        }],
        voice_settings: request.voice_settings,
    }
}

/// The endpoint has no published contract; accept the shapes it is known to use.
fn extract_audio_url(body: &Value) -> Option<String> {
    let candidates = [
        body.get("audio_url"),
        body.get("audioUrl"),
        body.pointer("/data/0/url"),
        body.pointer("/choices/0/message/audio/url"),
        body.pointer("/choices/0/message/content"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| value.starts_with("https://") || value.starts_with("http://"))
        .map(str::to_string)
}
