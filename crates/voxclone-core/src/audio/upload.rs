use std::path::Path;

/// A candidate voice sample as received from a client.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub bytes: Vec<u8>,
    /// Declared media type, as sent by the client.
    pub mime_type: Option<String>,
    pub filename: Option<String>,
}

impl AudioUpload {
    pub fn new(bytes: Vec<u8>, mime_type: Option<String>, filename: Option<String>) -> Self {
        Self {
            bytes,
            mime_type,
            filename,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Media type without parameters, lowercased.
    pub fn essence_mime_type(&self) -> Option<String> {
        self.mime_type
            .as_deref()
            .and_then(|raw| raw.split(';').next())
            .map(|mime| mime.trim().to_ascii_lowercase())
            .filter(|mime| !mime.is_empty())
    }

    /// Lowercased file extension, if the upload carried a file name.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.trim().to_ascii_lowercase())
    }

    /// Content type to use when serving the sample back.
    pub fn content_type(&self) -> String {
        if let Some(mime) = self.essence_mime_type() {
            return mime;
        }
        let mapped = match self.extension().as_deref() {
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            Some("m4a") => "audio/mp4",
            Some("ogg") => "audio/ogg",
            Some("webm") => "audio/webm",
            _ => "application/octet-stream",
        };
        mapped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn essence_strips_parameters_and_case() {
        let upload = AudioUpload::new(vec![], Some(" Audio/WAV; codecs=1 ".to_string()), None);
        assert_eq!(upload.essence_mime_type().as_deref(), Some("audio/wav"));
    }

    #[test]
    fn content_type_falls_back_to_extension() {
        let upload = AudioUpload::new(vec![], None, Some("Sample.MP3".to_string()));
        assert_eq!(upload.extension().as_deref(), Some("mp3"));
        assert_eq!(upload.content_type(), "audio/mpeg");

        let unknown = AudioUpload::new(vec![], Some("  ".to_string()), None);
        assert_eq!(unknown.content_type(), "application/octet-stream");
    }
}
