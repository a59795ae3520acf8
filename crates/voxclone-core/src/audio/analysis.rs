//! Duration and quality estimation for uploaded samples.
//!
//! Two estimators share the [`AudioEstimator`] capability:
//! - [`DecodingEstimator`] decodes the payload and reads the true stream properties.
//! - [`HeuristicEstimator`] never decodes and works from the payload size.
//!
//! Which one runs is decided once at startup through [`EstimatorKind`].

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use super::decode::{probe_audio_bytes, wav_header_probe};
use super::upload::AudioUpload;
use crate::error::{Error, Result};
use crate::models::Quality;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_CHANNELS: u16 = 2;

const MIB: u64 = 1024 * 1024;
const HEURISTIC_BYTES_PER_SEC: f64 = 32.0 * 1024.0;
const HEURISTIC_MIN_DURATION_SECS: f64 = 30.0;
const HEURISTIC_MAX_DURATION_SECS: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioAnalysis {
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_rate: Option<u64>,
    pub quality: Quality,
}

impl AudioAnalysis {
    /// Result reported when a decode attempt fails.
    pub const fn fallback() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            bit_rate: None,
            quality: Quality::Medium,
        }
    }
}

/// Duration and stream properties taken from a single pass over the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioMeasurement {
    pub duration_secs: f64,
    pub analysis: AudioAnalysis,
}

pub trait AudioEstimator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Read the payload once. Fails only when no duration can be determined.
    fn measure(&self, upload: &AudioUpload) -> Result<AudioMeasurement>;

    /// Estimated play length in seconds.
    fn estimate_duration(&self, upload: &AudioUpload) -> Result<f64> {
        self.measure(upload).map(|m| m.duration_secs)
    }

    /// Never fails; estimators degrade to a best-effort answer.
    fn analyze(&self, upload: &AudioUpload) -> AudioAnalysis {
        match self.measure(upload) {
            Ok(measurement) => measurement.analysis,
            Err(err) => {
                warn!("Audio analysis fell back to defaults: {err}");
                AudioAnalysis::fallback()
            }
        }
    }
}

/// Quality tier from decoded stream properties.
pub fn classify_stream(sample_rate: u32, bit_rate: u64) -> Quality {
    if sample_rate >= 44_100 && bit_rate >= 320_000 {
        Quality::High
    } else if sample_rate >= 22_050 && bit_rate >= 128_000 {
        Quality::Medium
    } else {
        Quality::Low
    }
}

/// Quality tier from payload size alone.
pub fn classify_size(size_bytes: u64) -> Quality {
    if size_bytes > 5 * MIB {
        Quality::High
    } else if size_bytes > MIB {
        Quality::Medium
    } else {
        Quality::Low
    }
}

pub fn approximate_bit_rate(size_bytes: u64, duration_secs: f64) -> Option<u64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return None;
    }
    Some(((size_bytes as f64 * 8.0) / duration_secs).round() as u64)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecodingEstimator;

impl AudioEstimator for DecodingEstimator {
    fn name(&self) -> &'static str {
        "decode"
    }

    fn measure(&self, upload: &AudioUpload) -> Result<AudioMeasurement> {
        let probe = probe_audio_bytes(
            &upload.bytes,
            upload.essence_mime_type().as_deref(),
            upload.filename.as_deref(),
        )?;

        let analysis = match approximate_bit_rate(upload.size(), probe.duration_secs) {
            Some(bit_rate) => AudioAnalysis {
                sample_rate: probe.sample_rate,
                channels: probe.channels,
                bit_rate: Some(bit_rate),
                quality: classify_stream(probe.sample_rate, bit_rate),
            },
            None => AudioAnalysis::fallback(),
        };

        Ok(AudioMeasurement {
            duration_secs: probe.duration_secs,
            analysis,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEstimator;

impl AudioEstimator for HeuristicEstimator {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn measure(&self, upload: &AudioUpload) -> Result<AudioMeasurement> {
        let duration_secs = match wav_header_probe(&upload.bytes) {
            Some(probe) => {
                debug!(
                    duration_secs = probe.duration_secs,
                    "Duration read from WAV header"
                );
                probe.duration_secs
            }
            None => (upload.size() as f64 / HEURISTIC_BYTES_PER_SEC)
                .min(HEURISTIC_MAX_DURATION_SECS)
                .max(HEURISTIC_MIN_DURATION_SECS),
        };

        Ok(AudioMeasurement {
            duration_secs,
            analysis: AudioAnalysis {
                sample_rate: DEFAULT_SAMPLE_RATE,
                channels: DEFAULT_CHANNELS,
                bit_rate: None,
                quality: classify_size(upload.size()),
            },
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EstimatorKind {
    Decode,
    #[default]
    Heuristic,
}

impl EstimatorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::Heuristic => "heuristic",
        }
    }

    pub fn build(self) -> Arc<dyn AudioEstimator> {
        match self {
            Self::Decode => Arc::new(DecodingEstimator),
            Self::Heuristic => Arc::new(HeuristicEstimator),
        }
    }
}

impl FromStr for EstimatorKind {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "decode" | "decoding" => Ok(Self::Decode),
            "heuristic" | "size" => Ok(Self::Heuristic),
            other => Err(Error::InvalidInput(format!(
                "Unknown audio analyzer '{other}', expected 'decode' or 'heuristic'"
            ))),
        }
    }
}
