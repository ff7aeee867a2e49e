pub mod http;
pub mod mock;

pub use http::HttpVoiceService;
pub use mock::MockVoiceService;

use crate::domain::model::stat_keys;
use crate::core::{SessionStats, VoicePreset, VoiceRequest};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

pub const DEFAULT_PRESET: &str = "normal";

fn builtin_presets() -> BTreeMap<String, VoicePreset> {
    BTreeMap::from([
        (DEFAULT_PRESET.to_string(), VoicePreset::default()),
        ("fast".to_string(), VoicePreset::new(1.5, 0.0, 0.0)),
        ("slow".to_string(), VoicePreset::new(0.7, -5.0, 0.0)),
    ])
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // counters stay meaningful even if a holder panicked
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Per-service state shared by the voice adapters: counters and presets.
#[derive(Debug)]
pub struct VoiceSession {
    stats: Mutex<SessionStats>,
    presets: Mutex<BTreeMap<String, VoicePreset>>,
}

impl Default for VoiceSession {
    fn default() -> Self {
        let stats: SessionStats = stat_keys::ALL.iter().map(|k| (k.to_string(), 0)).collect();
        Self {
            stats: Mutex::new(stats),
            presets: Mutex::new(builtin_presets()),
        }
    }
}

impl VoiceSession {
    pub fn add(&self, key: &str, amount: u64) {
        *lock(&self.stats).entry(key.to_string()).or_insert(0) += amount;
    }

    pub fn record_reply(&self, message: &str, reply: &str) {
        self.add(stat_keys::API_CALLS, 1);
        self.add(
            stat_keys::TOTAL_TOKENS,
            (message.chars().count() + reply.chars().count()) as u64,
        );
    }

    pub fn snapshot(&self) -> SessionStats {
        lock(&self.stats).clone()
    }

    pub fn create_preset(&self, name: &str, preset: VoicePreset) {
        tracing::debug!("Registering voice preset {}", name);
        lock(&self.presets).insert(name.to_string(), preset.clamped());
    }

    pub fn presets(&self) -> BTreeMap<String, VoicePreset> {
        lock(&self.presets).clone()
    }

    /// Preset named by the request (or `normal`), then explicit speed and
    /// pitch on top, clamped into the engine's accepted range.
    pub fn resolve_voice(&self, request: &VoiceRequest) -> VoicePreset {
        let presets = lock(&self.presets);
        let base = match request.voice_preset.as_deref() {
            Some(name) => presets.get(name).copied().unwrap_or_else(|| {
                tracing::warn!("Unknown voice preset {}, using {}", name, DEFAULT_PRESET);
                presets.get(DEFAULT_PRESET).copied().unwrap_or_default()
            }),
            None => presets.get(DEFAULT_PRESET).copied().unwrap_or_default(),
        };

        VoicePreset {
            speaking_rate: request.voice_speed.unwrap_or(base.speaking_rate),
            pitch: request.voice_pitch.unwrap_or(base.pitch),
            volume_gain_db: base.volume_gain_db,
        }
        .clamped()
    }
}
