use super::VoiceSession;
use crate::core::{
    AudioPayload, SessionStats, Storage, VoicePreset, VoiceRequest, VoiceResponse, VoiceService,
};
use crate::domain::model::stat_keys;
use crate::utils::error::{DemoError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct RespondBody<'a> {
    message: &'a str,
    use_dialect: bool,
}

#[derive(Debug, Deserialize)]
struct RespondReply {
    text_response: String,
}

#[derive(Debug, Serialize)]
struct SynthesizeBody<'a> {
    text: &'a str,
    speaking_rate: f32,
    pitch: f32,
    volume_gain_db: f32,
}

/// Voice service reached over HTTP: `/respond` for the text reply and
/// `/synthesize` for the audio.
pub struct HttpVoiceService<S: Storage> {
    client: Client,
    endpoint: String,
    storage: S,
    session: VoiceSession,
}

impl<S: Storage> HttpVoiceService<S> {
    pub fn new(endpoint: &str, timeout: Duration, storage: S) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            storage,
            session: VoiceSession::default(),
        })
    }

    async fn generate_reply(&self, request: &VoiceRequest) -> Result<String> {
        let url = format!("{}/respond", self.endpoint);
        tracing::debug!("Requesting reply from {}", url);

        let response = self
            .client
            .post(&url)
            .json(&RespondBody {
                message: &request.message,
                use_dialect: request.use_dialect,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DemoError::Voice {
                message: format!("reply request returned {}", status),
            });
        }

        let reply: RespondReply = serde_json::from_slice(&response.bytes().await?)?;
        self.session.record_reply(&request.message, &reply.text_response);
        Ok(reply.text_response)
    }

    async fn synthesize(&self, text: &str, voice: VoicePreset) -> Result<AudioPayload> {
        let url = format!("{}/synthesize", self.endpoint);
        self.session.add(stat_keys::TTS_CALLS, 1);

        let response = self
            .client
            .post(&url)
            .json(&SynthesizeBody {
                text,
                speaking_rate: voice.speaking_rate,
                pitch: voice.pitch,
                volume_gain_db: voice.volume_gain_db,
            })
            .send()
            .await
            .map_err(|e| DemoError::Synthesis {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DemoError::Synthesis {
                message: format!("synthesis request returned {}", status),
            });
        }

        let bytes = response.bytes().await.map_err(|e| DemoError::Synthesis {
            message: e.to_string(),
        })?;
        if bytes.is_empty() {
            return Err(DemoError::Synthesis {
                message: "empty audio payload".to_string(),
            });
        }

        Ok(AudioPayload::mp3(bytes.to_vec()))
    }
}

#[async_trait]
impl<S: Storage> VoiceService for HttpVoiceService<S> {
    async fn generate_voice_response(&self, request: &VoiceRequest) -> Result<VoiceResponse> {
        let text_response = self.generate_reply(request).await?;
        let voice = self.session.resolve_voice(request);

        let audio_data = match self.synthesize(&text_response, voice).await {
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
