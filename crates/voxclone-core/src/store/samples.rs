//! Demo records used to pre-populate empty stores.

use chrono::{Duration, Utc};

use crate::models::{GenerationRecord, Quality, VoiceProfile};

pub fn sample_profiles() -> Vec<VoiceProfile> {
    let now = Utc::now();
    let profile = |id: &str,
                   name: &str,
                   description: &str,
                   days_ago: i64,
                   duration: f64,
                   quality: Quality,
                   sample_rate: u32,
                   channels: u16| VoiceProfile {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        audio_url: format!(
            "https://placehold.co/400x200?text={}+Voice+Sample",
            name.replace(' ', "+")
        ),
        created_at: now - Duration::days(days_ago),
        duration,
        quality,
        sample_rate: Some(sample_rate),
        channels: Some(channels),
        file_size: None,
    };

    vec![
        profile(
            "voice_sample_1",
            "Professional Speaker",
            "Clear, authoritative voice perfect for presentations",
            1,
            45.3,
            Quality::High,
            44_100,
            2,
        ),
        profile(
            "voice_sample_2",
            "Friendly Narrator",
            "Warm, engaging voice ideal for storytelling",
            2,
            62.1,
            Quality::High,
            44_100,
            2,
        ),
        profile(
            "voice_sample_3",
            "Casual Conversational",
            "Natural, conversational tone for everyday content",
            3,
            38.7,
            Quality::Medium,
            22_050,
            1,
        ),
    ]
}

pub fn sample_history() -> Vec<GenerationRecord> {
    let now = Utc::now();
    let record = |id: &str,
                  profile_id: &str,
                  profile_name: &str,
                  text: &str,
                  label: &str,
                  hours_ago: i64,
                  duration: f64| GenerationRecord {
        id: id.to_string(),
        voice_profile_id: profile_id.to_string(),
        voice_profile_name: profile_name.to_string(),
        text: text.to_string(),
        audio_url: format!("https://placehold.co/600x100?text=Generated+{label}+Audio"),
        created_at: now - Duration::hours(hours_ago),
        duration,
    };

    vec![
        record(
            "gen_sample_1",
            "voice_sample_1",
            "Professional Speaker",
            "Welcome to our quarterly business review. Today we'll be discussing our key achievements and future strategic initiatives.",
            "Business+Presentation",
            1,
            12.4,
        ),
        record(
            "gen_sample_2",
            "voice_sample_2",
            "Friendly Narrator",
            "Once upon a time, in a land far away, there lived a curious little fox who loved to explore the enchanted forest.",
            "Story+Narration",
            2,
            15.8,
        ),
        record(
            "gen_sample_3",
            "voice_sample_1",
            "Professional Speaker",
            "Thank you for joining today's webinar. We're excited to share the latest updates and answer your questions.",
            "Webinar+Introduction",
            4,
            9.2,
        ),
        record(
            "gen_sample_4",
            "voice_sample_3",
            "Casual Conversational",
            "Hey everyone! Just wanted to give you a quick update on what's been happening this week. It's been pretty exciting!",
            "Casual+Update",
            6,
            8.7,
        ),
        record(
            "gen_sample_5",
            "voice_sample_2",
            "Friendly Narrator",
            "In this tutorial, we'll walk through the steps to create your first voice clone. It's easier than you might think!",
            "Tutorial",
            12,
            11.3,
        ),
    ]
}
