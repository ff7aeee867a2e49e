use super::VoiceSession;
use crate::core::{
    AudioPayload, SessionStats, Storage, VoicePreset, VoiceRequest, VoiceResponse, VoiceService,
};
use crate::domain::model::stat_keys;
use crate::utils::error::{DemoError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;

const DIALECT_REPLIES: [&str; 4] = [
    "そだね〜、なんまら面白いっしょ！",
    "だべさ〜、いいアイデアだね！",
    "うんうん、そうっしょ〜",
    "なんまらそう思うわ！",
];

const PLAIN_REPLY: &str = "I understand your message.";

/// Placeholder bytes generated per character at speaking rate 1.0.
const BYTES_PER_CHAR: f32 = 600.0;

/// Offline voice service for rehearsals and tests. Replies are canned and the
/// "audio" is an ID3 header followed by silence sized like real speech.
pub struct MockVoiceService<S: Storage> {
    storage: S,
    session: VoiceSession,
    synthesis_fails: bool,
}

impl<S: Storage> MockVoiceService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: VoiceSession::default(),
            synthesis_fails: false,
        }
    }

    /// Makes every synthesis attempt fail, to rehearse the text-only path.
    pub fn with_failing_synthesis(mut self) -> Self {
        self.synthesis_fails = true;
        self
    }

    fn reply_for(request: &VoiceRequest) -> String {
        if !request.use_dialect {
            return PLAIN_REPLY.to_string();
        }
        let index = request.message.chars().count() % DIALECT_REPLIES.len();
        DIALECT_REPLIES[index].to_string()
    }

    fn synthesize(&self, text: &str, voice: VoicePreset) -> Result<AudioPayload> {
        self.session.add(stat_keys::TTS_CALLS, 1);
        if self.synthesis_fails {
            return Err(DemoError::Synthesis {
                message: "mock synthesis disabled".to_string(),
            });
        }

        let size = (text.chars().count() as f32 * BYTES_PER_CHAR / voice.speaking_rate) as usize;
        let mut audio = b"ID3".to_vec();
        audio.resize(size.max(audio.len()), 0);
        Ok(AudioPayload::mp3(audio))
    }
}

#[async_trait]
impl<S: Storage> VoiceService for MockVoiceService<S> {
    async fn generate_voice_response(&self, request: &VoiceRequest) -> Result<VoiceResponse> {
        if request.message.trim().is_empty() {
            return Err(DemoError::Voice {
                message: "message is empty".to_string(),
            });
        }

        let text_response = Self::reply_for(request);
        self.session.record_reply(&request.message, &text_response);

        let voice = self.session.resolve_voice(request);
        let audio_data = match self.synthesize(&text_response, voice) {
            Ok(audio) => {
                self.session
                    .add(stat_keys::TOTAL_AUDIO_BYTES, audio.len() as u64);
                Some(audio)
            }
            Err(e) if request.fallback_to_text => {
                tracing::warn!("Synthesis failed, returning text only: {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        self.session.add(stat_keys::VOICE_RESPONSES, 1);
        Ok(VoiceResponse {
            text_response,
            audio_data,
        })
    }

    async fn save_voice_response_to_file(
        &self,
        audio: &AudioPayload,
        file_name: &str,
    ) -> Result<String> {
        self.storage.write_file(file_name, &audio.audio_content).await
    }

    fn session_stats(&self) -> SessionStats {
        self.session.snapshot()
    }

    fn create_voice_preset(&self, name: &str, preset: VoicePreset) {
        self.session.create_preset(name, preset);
    }

    fn voice_presets(&self) -> BTreeMap<String, VoicePreset> {
        self.session.presets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> MockVoiceService<LocalStorage> {
        MockVoiceService::new(LocalStorage::new(dir.path()))
    }

    #[tokio::test]
    async fn test_dialect_reply_has_keyword_and_audio() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let result = service
            .generate_voice_response(&VoiceRequest::new("元気ですか？"))
            .await
            .unwrap();

        let keywords = ["だべ", "っしょ", "なんまら", "そだね"];
        assert!(keywords.iter().any(|k| result.text_response.contains(k)));
        assert!(result.audio_data.map(|a| !a.is_empty()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_same_message_same_reply() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let request = VoiceRequest::new("プログラミングについて教えて");

        let first = service.generate_voice_response(&request).await.unwrap();
        let second = service.generate_voice_response(&request).await.unwrap();
        assert_eq!(first.text_response, second.text_response);
    }

    #[tokio::test]
    async fn test_plain_reply_without_dialect() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let result = service
            .generate_voice_response(&VoiceRequest::new("hello").with_dialect(false))
            .await
            .unwrap();
        assert_eq!(result.text_response, PLAIN_REPLY);
    }

    #[tokio::test]
    async fn test_faster_speech_is_smaller() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let message = "なんまら良い天気だべ〜";

        let slow = service
            .generate_voice_response(&VoiceRequest::new(message).with_speed(0.7))
            .await
            .unwrap();
        let fast = service
            .generate_voice_response(&VoiceRequest::new(message).with_speed(1.5))
            .await
            .unwrap();

        let slow_len = slow.audio_data.map(|a| a.len()).unwrap_or(0);
        let fast_len = fast.audio_data.map(|a| a.len()).unwrap_or(0);
        assert!(fast_len < slow_len);
    }

    #[tokio::test]
    async fn test_failing_synthesis_without_fallback_is_error() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir).with_failing_synthesis();

        let err = service
            .generate_voice_response(&VoiceRequest::new("テスト").with_fallback_to_text(false))
            .await
            .unwrap_err();
        assert!(matches!(err, DemoError::Synthesis { .. }));
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let result = service.generate_voice_response(&VoiceRequest::new("  ")).await;
        assert!(result.is_err());
        assert_eq!(service.session_stats()[stat_keys::API_CALLS], 0);
    }
}
