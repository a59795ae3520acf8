//! Upload acceptance rules. The first failing rule wins.

use thiserror::Error;
use tracing::debug;

use super::analysis::{AudioEstimator, AudioMeasurement};
use super::upload::AudioUpload;

pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;
pub const MIN_UPLOAD_BYTES: u64 = 1024;
pub const MIN_DURATION_SECS: f64 = 10.0;
pub const MAX_DURATION_SECS: f64 = 300.0;

pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "audio/wav",
    "audio/x-wav",
    "audio/wave",
    "audio/mp3",
    "audio/mpeg",
    "audio/ogg",
    "audio/webm",
    "audio/m4a",
    "audio/x-m4a",
];

pub const ACCEPTED_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid file type. Please upload WAV, MP3, M4A, or OGG files.")]
    InvalidType,
    #[error("File size too large. Maximum size is 50MB.")]
    TooLarge,
    #[error("File too small. Minimum size is 1KB.")]
    TooSmall,
    #[error("Audio too short. Minimum duration is 10 seconds.")]
    TooShort,
    #[error("Audio too long. Maximum duration is 300 seconds.")]
    TooLong,
    #[error("Failed to process audio file.")]
    Unreadable,
}

/// Check an upload against the type, size and duration rules, returning the
/// measurement taken for the duration check.
pub fn validate_upload(
    upload: &AudioUpload,
    estimator: &dyn AudioEstimator,
) -> Result<AudioMeasurement, ValidationError> {
    if !has_accepted_type(upload) {
        return Err(ValidationError::InvalidType);
    }

    let size = upload.size();
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge);
    }
    if size < MIN_UPLOAD_BYTES {
        return Err(ValidationError::TooSmall);
    }

    let measurement = estimator.measure(upload).map_err(|err| {
        debug!("Duration estimation failed: {err}");
        ValidationError::Unreadable
    })?;
    check_duration(measurement.duration_secs)?;
    Ok(measurement)
}

pub fn check_duration(duration_secs: f64) -> Result<(), ValidationError> {
    if !duration_secs.is_finite() {
        return Err(ValidationError::Unreadable);
    }
    if duration_secs < MIN_DURATION_SECS {
        return Err(ValidationError::TooShort);
    }
    if duration_secs > MAX_DURATION_SECS {
        return Err(ValidationError::TooLong);
    }
    Ok(())
}

fn has_accepted_type(upload: &AudioUpload) -> bool {
    let mime_ok = upload
        .essence_mime_type()
        .map(|mime| ACCEPTED_MIME_TYPES.contains(&mime.as_str()))
        .unwrap_or(false);
    let ext_ok = upload
        .extension()
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    mime_ok || ext_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::analysis::AudioAnalysis;
    use crate::error::{Error, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedDuration(Option<f64>);

    impl AudioEstimator for FixedDuration {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn measure(&self, _upload: &AudioUpload) -> Result<AudioMeasurement> {
            let duration_secs = self
                .0
                .ok_or_else(|| Error::AudioDecode("no duration".to_string()))?;
            Ok(AudioMeasurement {
                duration_secs,
                analysis: AudioAnalysis::fallback(),
            })
        }
    }

    #[derive(Default)]
    struct CountingEstimator {
        calls: AtomicUsize,
    }

    impl AudioEstimator for CountingEstimator {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn measure(&self, _upload: &AudioUpload) -> Result<AudioMeasurement> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AudioMeasurement {
                duration_secs: 42.0,
                analysis: AudioAnalysis::fallback(),
            })
        }
    }

    fn upload(size: usize, mime: Option<&str>, filename: Option<&str>) -> AudioUpload {
        AudioUpload::new(
            vec![0u8; size],
            mime.map(str::to_string),
            filename.map(str::to_string),
        )
    }

    #[test]
    fn rejects_disallowed_type_with_mismatched_extension() {
        for (mime, name) in [
            (Some("text/plain"), Some("notes.txt")),
            (Some("video/mp4"), Some("clip.mp4")),
            (None, Some("sample.flac")),
            (Some("application/octet-stream"), None),
            (None, None),
        ] {
            let err = validate_upload(&upload(4096, mime, name), &FixedDuration(Some(20.0)));
            assert_eq!(err, Err(ValidationError::InvalidType), "{mime:?} {name:?}");
        }
    }

    #[test]
    fn accepts_allowed_type_or_allowed_extension() {
        let estimator = FixedDuration(Some(20.0));
        assert!(validate_upload(&upload(4096, Some("audio/ogg"), None), &estimator).is_ok());
        assert!(
            validate_upload(&upload(4096, Some("audio/x-wav; rate=8000"), None), &estimator)
                .is_ok()
        );
        assert!(validate_upload(
            &upload(4096, Some("application/octet-stream"), Some("VOICE.M4A")),
            &estimator
        )
        .is_ok());
    }

    #[test]
    fn type_rule_runs_before_size_rules() {
        let err = validate_upload(&upload(10, Some("text/plain"), None), &FixedDuration(None));
        assert_eq!(err, Err(ValidationError::InvalidType));
    }

    #[test]
    fn rejects_sizes_outside_bounds() {
        let estimator = FixedDuration(Some(20.0));
        let too_large = upload(MAX_UPLOAD_BYTES as usize + 1, Some("audio/wav"), None);
        assert_eq!(
            validate_upload(&too_large, &estimator),
            Err(ValidationError::TooLarge)
        );

        let too_small = upload(MIN_UPLOAD_BYTES as usize - 1, Some("audio/wav"), None);
        assert_eq!(
            validate_upload(&too_small, &estimator),
            Err(ValidationError::TooSmall)
        );

        let at_floor = upload(MIN_UPLOAD_BYTES as usize, Some("audio/wav"), None);
        assert!(validate_upload(&at_floor, &estimator).is_ok());
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        for secs in [10.0, 10.5, 150.0, 300.0] {
            assert!(check_duration(secs).is_ok(), "{secs}");
        }
        for secs in [0.0, 9.99, 1.0] {
            assert_eq!(check_duration(secs), Err(ValidationError::TooShort), "{secs}");
        }
        for secs in [300.01, 301.0, 3600.0] {
            assert_eq!(check_duration(secs), Err(ValidationError::TooLong), "{secs}");
        }
        assert_eq!(check_duration(f64::NAN), Err(ValidationError::Unreadable));
    }

    #[test]
    fn estimation_failure_is_a_validation_failure() {
        let err = validate_upload(&upload(4096, Some("audio/wav"), None), &FixedDuration(None));
        assert_eq!(err, Err(ValidationError::Unreadable));
    }

    #[test]
    fn accepted_upload_returns_its_single_measurement() {
        let estimator = CountingEstimator::default();
        let measurement =
            validate_upload(&upload(4096, Some("audio/wav"), None), &estimator).unwrap();

        assert_eq!(measurement.duration_secs, 42.0);
        assert_eq!(measurement.analysis, AudioAnalysis::fallback());
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejected_type_is_never_measured() {
        let estimator = CountingEstimator::default();
        assert!(validate_upload(&upload(4096, Some("text/plain"), None), &estimator).is_err());
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 0);
    }
}
