//! Stand-in audio references used when no real audio exists.

use reqwest::Url;

pub const PLACEHOLDER_HOST: &str = "https://placehold.co";

const LABEL_PREVIEW_CHARS: usize = 50;

/// Placeholder for a synthesis call that failed or was unreachable.
pub fn demo_placeholder_url(text: &str) -> String {
    let preview: String = text.chars().take(LABEL_PREVIEW_CHARS).collect();
    let label = if text.chars().count() > LABEL_PREVIEW_CHARS {
        format!("Demo Generated Audio {preview}...")
    } else {
        format!("Demo Generated Audio {preview}")
    };
    placeholder("600x100", &label)
}

/// Placeholder for a successful call that did not report an audio location.
pub fn generated_placeholder_url() -> String {
    placeholder("600x100", "AI Generated Voice Audio File")
}

pub(crate) fn placeholder(size: &str, label: &str) -> String {
    let base = format!("{PLACEHOLDER_HOST}/{size}");
    match Url::parse_with_params(&base, &[("text", label)]) {
        Ok(url) => url.to_string(),
        Err(_) => base,
    }
}
