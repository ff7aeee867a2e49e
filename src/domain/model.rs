use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimal record describing a deployed demo application.
///
/// Every field is optional at the type level so a descriptor missing
/// `app_name` still deserializes; `UrlStrategy::resolve_url` reports the gap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl AppDescriptor {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: Some(app_name.into()),
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoUrls {
    pub immediate: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoicePreset {
    pub speaking_rate: f32,
    pub pitch: f32,
    #[serde(default)]
    pub volume_gain_db: f32,
}

impl VoicePreset {
    pub const RATE_RANGE: (f32, f32) = (0.25, 4.0);
    pub const PITCH_RANGE: (f32, f32) = (-20.0, 20.0);
    pub const VOLUME_RANGE: (f32, f32) = (-96.0, 16.0);

    pub fn new(speaking_rate: f32, pitch: f32, volume_gain_db: f32) -> Self {
        Self {
            speaking_rate,
            pitch,
            volume_gain_db,
        }
        .clamped()
    }

    /// Pulls every parameter into the range the synthesis engine accepts.
    pub fn clamped(self) -> Self {
        Self {
            speaking_rate: self.speaking_rate.clamp(Self::RATE_RANGE.0, Self::RATE_RANGE.1),
            pitch: self.pitch.clamp(Self::PITCH_RANGE.0, Self::PITCH_RANGE.1),
            volume_gain_db: self
                .volume_gain_db
                .clamp(Self::VOLUME_RANGE.0, Self::VOLUME_RANGE.1),
        }
    }
}

impl Default for VoicePreset {
    fn default() -> Self {
        Self {
            speaking_rate: 0.9,
            pitch: -2.0,
            volume_gain_db: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceRequest {
    pub message: String,
    pub use_dialect: bool,
    pub voice_speed: Option<f32>,
    pub voice_pitch: Option<f32>,
    pub voice_preset: Option<String>,
    pub fallback_to_text: bool,
}

impl VoiceRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            use_dialect: true,
            voice_speed: None,
            voice_pitch: None,
            voice_preset: None,
            fallback_to_text: true,
        }
    }

    pub fn with_dialect(mut self, use_dialect: bool) -> Self {
        self.use_dialect = use_dialect;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.voice_speed = Some(speed);
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.voice_pitch = Some(pitch);
        self
    }

    pub fn with_preset(mut self, name: impl Into<String>) -> Self {
        self.voice_preset = Some(name.into());
        self
    }

    pub fn with_fallback_to_text(mut self, fallback: bool) -> Self {
        self.fallback_to_text = fallback;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    pub audio_content: Vec<u8>,
    pub format: String,
    pub sample_rate: u32,
}

impl AudioPayload {
    pub fn mp3(audio_content: Vec<u8>) -> Self {
        Self {
            audio_content,
            format: "mp3".to_string(),
            sample_rate: 24_000,
        }
    }

    pub fn len(&self) -> usize {
        self.audio_content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio_content.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct VoiceResponse {
    pub text_response: String,
    pub audio_data: Option<AudioPayload>,
}

/// Cumulative named counters for one voice session.
pub type SessionStats = BTreeMap<String, u64>;

pub mod stat_keys {
    pub const API_CALLS: &str = "api_calls";
    pub const TTS_CALLS: &str = "tts_calls";
    pub const VOICE_RESPONSES: &str = "voice_responses";
    pub const TOTAL_AUDIO_BYTES: &str = "total_audio_bytes";
    pub const TOTAL_TOKENS: &str = "total_tokens";

    pub const ALL: [&str; 5] = [
        API_CALLS,
        TTS_CALLS,
        VOICE_RESPONSES,
        TOTAL_AUDIO_BYTES,
        TOTAL_TOKENS,
    ];
}
