use axum::{
    body::Body,
    extract::{Multipart, Path, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json, RequestExt,
};
use base64::Engine;
use serde::Deserialize;
use tracing::info;
use voxclone_core::store::{sample_profiles, StoredSample};
use voxclone_core::{AudioUpload, NewVoiceProfile, VoiceProfile};

use crate::api::envelope::ApiResponse;
use crate::error::{from_core, ApiError};
use crate::state::AppState;

const MISSING_UPLOAD_FIELDS: &str = "Name and audio file are required";
const UPLOAD_FAILED: &str = "Failed to process voice upload";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonUploadRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    audio_base64: Option<String>,
    #[serde(default)]
    audio_mime_type: Option<String>,
    #[serde(default)]
    audio_filename: Option<String>,
}

#[derive(Debug, Default)]
struct ParsedUpload {
    name: Option<String>,
    description: Option<String>,
    audio_bytes: Vec<u8>,
    audio_mime_type: Option<String>,
    audio_filename: Option<String>,
}

pub async fn upload_voice_profile(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<ApiResponse<VoiceProfile>>, ApiError> {
    let parsed = parse_upload_request(req).await?;

    let name = sanitize_optional(parsed.name);
    let Some(name) = name.filter(|_| !parsed.audio_bytes.is_empty()) else {
        return Err(ApiError::bad_request(MISSING_UPLOAD_FIELDS));
    };

    let profile = state
        .intake
        .register(NewVoiceProfile {
            name,
            description: parsed.description,
            upload: AudioUpload::new(
                parsed.audio_bytes,
                parsed.audio_mime_type,
                parsed.audio_filename,
            ),
        })
        .await
        .map_err(|err| from_core(err, UPLOAD_FAILED))?;

    Ok(Json(ApiResponse::ok(
        profile,
        "Voice profile created successfully",
    )))
}

pub async fn list_voice_profiles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VoiceProfile>>>, ApiError> {
    let profiles = state.profiles.list().await?;
    Ok(Json(ApiResponse::ok(
        profiles,
        "Voice profiles retrieved successfully",
    )))
}

pub async fn seed_voice_profiles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VoiceProfile>>>, ApiError> {
    let samples = sample_profiles();
    let seeded = state.profiles.seed(samples.clone()).await?;
    if seeded {
        info!(count = samples.len(), "Seeded sample voice profiles");
    }
    Ok(Json(ApiResponse::ok(samples, "Sample profiles created")))
}

pub async fn get_voice_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> Result<Json<ApiResponse<VoiceProfile>>, ApiError> {
    let profile = state
        .profiles
        .get(&profile_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Voice profile not found"))?;

    Ok(Json(ApiResponse::ok(
        profile,
        "Voice profile retrieved successfully",
    )))
}

pub async fn get_voice_profile_audio(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> Result<Response, ApiError> {
    let sample = state
        .profiles
        .get_sample(&profile_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Voice profile audio not found"))?;

    Ok(audio_response(sample))
}

pub async fn delete_voice_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !state.profiles.delete(&profile_id).await? {
        return Err(ApiError::not_found("Voice profile not found"));
    }

    info!(profile_id = %profile_id, "Voice profile deleted");
    Ok(Json(ApiResponse::message_only(
        "Voice profile deleted successfully",
    )))
}

async fn parse_upload_request(req: Request) -> Result<ParsedUpload, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        let Json(payload) = req
            .extract::<Json<JsonUploadRequest>, _>()
            .await
            .map_err(|err| ApiError::bad_request(format!("Invalid JSON payload: {err}")))?;

        let audio_bytes = match payload.audio_base64.as_deref() {
            Some(raw) => decode_audio_base64(raw)?,
            None => Vec::new(),
        };

        return Ok(ParsedUpload {
            name: payload.name,
            description: payload.description,
            audio_bytes,
            audio_mime_type: sanitize_optional(payload.audio_mime_type),
            audio_filename: sanitize_optional(payload.audio_filename),
        });
    }

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = req
            .extract::<Multipart, _>()
            .await
            .map_err(|err| ApiError::bad_request(format!("Invalid multipart payload: {err}")))?;

        let mut out = ParsedUpload::default();

        while let Some(field) = multipart.next_field().await.map_err(|err| {
            ApiError::bad_request(format!("Failed reading multipart field: {err}"))
        })? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "audioFile" | "file" | "audio" => {
                    let mime_type = field.content_type().map(ToString::to_string);
                    let file_name = field.file_name().map(ToString::to_string);
                    let bytes = field.bytes().await.map_err(|err| {
                        ApiError::bad_request(format!(
                            "Failed reading multipart '{name}' field: {err}"
                        ))
                    })?;
                    if !bytes.is_empty() {
                        out.audio_bytes = bytes.to_vec();
                        out.audio_mime_type = sanitize_optional(mime_type);
                        out.audio_filename = sanitize_optional(file_name);
                    }
                }
                "name" | "description" => {
                    let text = field.text().await.map_err(|err| {
                        ApiError::bad_request(format!(
                            "Failed reading multipart '{name}' field: {err}"
                        ))
                    })?;
                    if name == "name" {
                        out.name = Some(text);
                    } else {
                        out.description = Some(text);
                    }
                }
                _ => {}
            }
        }

        return Ok(out);
    }

    Err(ApiError::new(
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        "Expected `Content-Type: multipart/form-data` or `application/json`",
    ))
}

fn sanitize_optional(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn decode_audio_base64(input: &str) -> Result<Vec<u8>, ApiError> {
    let payload = input
        .split_once(',')
        .map(|(_, value)| value)
        .unwrap_or(input)
        .trim();

    if payload.is_empty() {
        return Ok(Vec::new());
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| ApiError::bad_request(format!("Invalid base64 audio payload: {err}")))
}

fn audio_response(sample: StoredSample) -> Response {
    let mut response = Response::builder().status(StatusCode::OK);

    if let Ok(content_type) = HeaderValue::from_str(sample.audio_mime_type.as_str()) {
        response = response.header(header::CONTENT_TYPE, content_type);
    }

    let disposition = match sample.audio_filename.as_deref() {
        Some(filename) => format!("inline; filename=\"{}\"", filename.replace('"', "")),
        None => "inline".to_string(),
    };
    if let Ok(value) = HeaderValue::from_str(disposition.as_str()) {
        response = response.header(header::CONTENT_DISPOSITION, value);
    }

    response
        .body(Body::from(sample.audio_bytes))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_payload_accepts_data_urls() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"RIFF");
        assert_eq!(
            decode_audio_base64(&format!("data:audio/wav;base64,{encoded}")).unwrap(),
            b"RIFF"
        );
        assert_eq!(decode_audio_base64(&encoded).unwrap(), b"RIFF");
        assert!(decode_audio_base64("   ").unwrap().is_empty());
        assert_eq!(
            decode_audio_base64("not base64!").unwrap_err().status,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn blank_optional_values_are_dropped() {
        assert_eq!(sanitize_optional(Some("  ".to_string())), None);
        assert_eq!(
            sanitize_optional(Some(" a.wav ".to_string())).as_deref(),
            Some("a.wav")
        );
    }
}
