//! Container probing and full decode used to read true stream properties.

use std::io::Cursor;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Stream properties recovered from an uploaded sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioProbe {
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_secs: f64,
}

/// Decode the whole payload and count frames.
///
/// Symphonia handles every container it knows; plain PCM WAV that symphonia rejects is
/// retried through hound.
pub(crate) fn probe_audio_bytes(
    audio_bytes: &[u8],
    mime_type: Option<&str>,
    filename: Option<&str>,
) -> Result<AudioProbe> {
    if audio_bytes.is_empty() {
        return Err(Error::AudioDecode("Empty audio input".to_string()));
    }

    match probe_symphonia(audio_bytes, mime_type, filename) {
        Ok(probe) => Ok(probe),
        Err(symphonia_err) => probe_wav_hound(audio_bytes).map_err(|wav_err| {
            Error::AudioDecode(format!(
                "Failed to decode audio. Symphonia: {symphonia_err}; WAV fallback: {wav_err}"
            ))
        }),
    }
}

/// Read the RIFF header only. Returns `None` when the payload is not a readable WAV.
pub(crate) fn wav_header_probe(audio_bytes: &[u8]) -> Option<AudioProbe> {
    let reader = hound::WavReader::new(Cursor::new(audio_bytes)).ok()?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return None;
    }
    Some(AudioProbe {
        sample_rate: spec.sample_rate,
        channels: spec.channels.max(1),
        duration_secs: reader.duration() as f64 / spec.sample_rate as f64,
    })
}

fn probe_symphonia(
    audio_bytes: &[u8],
    mime_type: Option<&str>,
    filename: Option<&str>,
) -> Result<AudioProbe> {
    use symphonia::core::codecs::DecoderOptions;
    use symphonia::core::errors::Error as SymphoniaError;
    use symphonia::core::formats::FormatOptions;
    use symphonia::core::io::MediaSourceStream;
    use symphonia::core::meta::MetadataOptions;
    use symphonia::core::probe::Hint;
    use symphonia::default::{get_codecs, get_probe};

    let media_source = MediaSourceStream::new(
        Box::new(Cursor::new(audio_bytes.to_vec())),
        Default::default(),
    );

    let mut hint = Hint::new();
    if let Some(ext) = filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
    {
        hint.with_extension(ext);
    }
    if let Some(mime) = mime_type {
        hint.mime_type(mime);
    }

    let probed = get_probe()
        .format(
            &hint,
            media_source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioDecode(format!("Symphonia probe failed: {e}")))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| Error::AudioDecode("No default audio track found".to_string()))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track
        .codec_params
        .channels
        .map(|layout| layout.count() as u16)
        .unwrap_or(0);
    let mut decoder = get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode(format!("Failed to create audio decoder: {e}")))?;

    let mut total_frames: u64 = 0;
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => {
                return Err(Error::AudioDecode(
                    "Audio stream format reset is not supported".to_string(),
                ));
            }
            Err(SymphoniaError::IoError(_)) => break,
            Err(err) => {
                return Err(Error::AudioDecode(format!(
                    "Failed reading audio packets: {err}"
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(err)) => {
                debug!("Skipping undecodable packet: {err}");
                continue;
            }
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(err) => {
                return Err(Error::AudioDecode(format!(
                    "Failed decoding audio packet: {err}"
                )));
            }
        };

        let spec = *decoded.spec();
        if sample_rate == 0 {
            sample_rate = spec.rate;
        }
        if channels == 0 {
            channels = spec.channels.count() as u16;
        }
        total_frames += decoded.frames() as u64;
    }

    if sample_rate == 0 {
        return Err(Error::AudioDecode(
            "Decoded audio is missing sample rate metadata".to_string(),
        ));
    }
    if total_frames == 0 {
        return Err(Error::AudioDecode(
            "Decoded audio produced zero samples".to_string(),
        ));
    }

    Ok(AudioProbe {
        sample_rate,
        channels: channels.max(1),
        duration_secs: total_frames as f64 / sample_rate as f64,
    })
}

fn probe_wav_hound(wav_bytes: &[u8]) -> Result<AudioProbe> {
    let mut reader = hound::WavReader::new(Cursor::new(wav_bytes))
        .map_err(|e| Error::AudioDecode(format!("Failed to parse WAV: {e}")))?;

    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(Error::AudioDecode("WAV header reports 0 Hz".to_string()));
    }
    let channels = spec.channels.max(1);

    let sample_count = match spec.sample_format {
        hound::SampleFormat::Int => reader.samples::<i32>().filter_map(|s| s.ok()).count(),
        hound::SampleFormat::Float => reader.samples::<f32>().filter_map(|s| s.ok()).count(),
    };
    if sample_count == 0 {
        return Err(Error::AudioDecode("WAV payload holds no samples".to_string()));
    }

    let frames = sample_count / channels as usize;
    Ok(AudioProbe {
        sample_rate: spec.sample_rate,
        channels,
        duration_secs: frames as f64 / spec.sample_rate as f64,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn wav_bytes(sample_rate: u32, channels: u16, seconds: f64) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            let frames = (sample_rate as f64 * seconds) as usize;
            for i in 0..frames {
                let sample = ((i % 64) as i16 - 32) * 256;
                for _ in 0..channels {
                    writer.write_sample(sample).unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_wav_properties() {
        let bytes = wav_bytes(22_050, 1, 2.0);
        let probe = probe_audio_bytes(&bytes, Some("audio/wav"), Some("clip.wav")).unwrap();
        assert_eq!(probe.sample_rate, 22_050);
        assert_eq!(probe.channels, 1);
        assert!((probe.duration_secs - 2.0).abs() < 0.01);
    }

    #[test]
    fn decodes_stereo_wav_duration_in_frames() {
        let bytes = wav_bytes(16_000, 2, 1.5);
        let probe = probe_audio_bytes(&bytes, None, None).unwrap();
        assert_eq!(probe.channels, 2);
        assert!((probe.duration_secs - 1.5).abs() < 0.01);
    }

    #[test]
    fn rejects_garbage_payload() {
        let garbage = vec![0x42u8; 4096];
        assert!(probe_audio_bytes(&garbage, Some("audio/mpeg"), Some("x.mp3")).is_err());
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(matches!(
            probe_audio_bytes(&[], None, None),
            Err(Error::AudioDecode(_))
        ));
    }

    #[test]
    fn header_probe_reads_duration_without_decoding() {
        let bytes = wav_bytes(8_000, 1, 3.0);
        let probe = wav_header_probe(&bytes).unwrap();
        assert_eq!(probe.sample_rate, 8_000);
        assert!((probe.duration_secs - 3.0).abs() < 0.01);
        assert!(wav_header_probe(b"definitely not a wav file").is_none());
    }
}
