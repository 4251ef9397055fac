use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(default = "default_stability")]
    pub stability: f32,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
}

fn default_stability() -> f32 {
    0.4
}

fn default_similarity_boost() -> f32 {
    0.75
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
        }
    }
}

impl SynthesisRequest {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            voice_settings: VoiceSettings::default(),
        }
    }
}

/// Build `{base}/v1/text-to-speech/{voice}`, escaping the voice as a path segment.
pub fn synthesis_url(base: &Url, voice: &str) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(["v1", "text-to-speech", voice]);
    Some(url)
}
