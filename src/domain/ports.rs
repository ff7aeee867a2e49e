use crate::domain::model::{AudioPayload, SessionStats, VoicePreset, VoiceRequest, VoiceResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Answers whether a pre-registered domain is currently handed out.
///
/// A production backend should pair this with an atomic check-and-reserve in
/// the shared store; the allocator itself never marks anything as used.
pub trait DomainUsage: Send + Sync {
    fn is_in_use(&self, domain: &str) -> bool;
}

impl<F> DomainUsage for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_in_use(&self, domain: &str) -> bool {
        self(domain)
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[async_trait]
pub trait VoiceService: Send + Sync {
    async fn generate_voice_response(&self, request: &VoiceRequest) -> Result<VoiceResponse>;

    /// Persists the audio bytes and returns the path they were written to.
    async fn save_voice_response_to_file(
        &self,
        audio: &AudioPayload,
        file_name: &str,
    ) -> Result<String>;

    fn session_stats(&self) -> SessionStats;

    fn create_voice_preset(&self, name: &str, preset: VoicePreset);

    fn voice_presets(&self) -> BTreeMap<String, VoicePreset>;
}
