use async_trait::async_trait;
use demo_access::domain::model::{stat_keys, SessionStats};
use demo_access::{
    conversation, AudioPayload, DemoError, DemoItem, HttpVoiceService, ItemOutcome, LocalStorage,
    MockVoiceService, Result, VoiceDemo, VoicePreset, VoiceRequest, VoiceResponse, VoiceService,
};
use httpmock::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use tempfile::TempDir;

/// Fails every message containing "boom", otherwise behaves like the mock.
struct FlakyService {
    inner: MockVoiceService<LocalStorage>,
}

#[async_trait]
impl VoiceService for FlakyService {
    async fn generate_voice_response(&self, request: &VoiceRequest) -> Result<VoiceResponse> {
        if request.message.contains("boom") {
            return Err(DemoError::Voice {
                message: "upstream exploded".to_string(),
            });
        }
        self.inner.generate_voice_response(request).await
    }

    async fn save_voice_response_to_file(
        &self,
        audio: &AudioPayload,
        file_name: &str,
    ) -> Result<String> {
        self.inner.save_voice_response_to_file(audio, file_name).await
    }

    fn session_stats(&self) -> SessionStats {
        self.inner.session_stats()
    }

    fn create_voice_preset(&self, name: &str, preset: VoicePreset) {
        self.inner.create_voice_preset(name, preset)
    }

    fn voice_presets(&self) -> BTreeMap<String, VoicePreset> {
        self.inner.voice_presets()
    }
}

#[tokio::test]
async fn test_demo_continues_after_failed_item() {
    let temp_dir = TempDir::new().unwrap();
    let service = FlakyService {
        inner: MockVoiceService::new(LocalStorage::new(temp_dir.path())),
    };

    let items = conversation(
        &["こんにちは！元気ですか？", "boom", "一緒にWebアプリ作ってみない？"],
        true,
    );
    let demo = VoiceDemo::new(service);
    let report = demo.run(&items).await;

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.failures(), 1);
    assert!(matches!(report.outcomes[0], ItemOutcome::Spoken { .. }));
    assert!(matches!(report.outcomes[1], ItemOutcome::Failed { .. }));
    assert!(matches!(report.outcomes[2], ItemOutcome::Spoken { .. }));

    assert!(temp_dir.path().join("demo_response_1.mp3").exists());
    assert!(!temp_dir.path().join("demo_response_2.mp3").exists());
    assert!(temp_dir.path().join("demo_response_3.mp3").exists());

    assert_eq!(report.stats[stat_keys::VOICE_RESPONSES], 2);
}

#[tokio::test]
async fn test_text_only_when_synthesis_fails() {
    let temp_dir = TempDir::new().unwrap();
    let service = MockVoiceService::new(LocalStorage::new(temp_dir.path())).with_failing_synthesis();

    let demo = VoiceDemo::new(service);
    let items = conversation(&["テスト"], true);
    let report = demo.run(&items).await;

    assert_eq!(report.outcomes, vec![ItemOutcome::TextOnly]);
    assert_eq!(report.stats[stat_keys::TTS_CALLS], 1);
    assert_eq!(report.stats[stat_keys::TOTAL_AUDIO_BYTES], 0);
}

#[tokio::test]
async fn test_session_stats_accumulate() {
    let temp_dir = TempDir::new().unwrap();
    let service = MockVoiceService::new(LocalStorage::new(temp_dir.path()));

    for message in ["統計テスト", "もう一回"] {
        service
            .generate_voice_response(&VoiceRequest::new(message))
            .await
            .unwrap();
    }

    let stats = service.session_stats();
    assert_eq!(stats[stat_keys::API_CALLS], 2);
    assert_eq!(stats[stat_keys::TTS_CALLS], 2);
    assert_eq!(stats[stat_keys::VOICE_RESPONSES], 2);
    assert!(stats[stat_keys::TOTAL_AUDIO_BYTES] > 0);
    assert!(stats[stat_keys::TOTAL_TOKENS] > 0);
}

#[tokio::test]
async fn test_speed_control_items_with_custom_preset() {
    let temp_dir = TempDir::new().unwrap();
    let service = MockVoiceService::new(LocalStorage::new(temp_dir.path()));
    service.create_voice_preset("turbo", VoicePreset::new(2.0, 3.0, 2.0));

    let items = vec![
        DemoItem::new("slow", VoiceRequest::new("天気").with_speed(0.7), "slow.mp3"),
        DemoItem::new("turbo", VoiceRequest::new("天気").with_preset("turbo"), "turbo.mp3"),
        DemoItem::new("clamped", VoiceRequest::new("天気").with_speed(10.0), "clamped.mp3"),
    ];
    let demo = VoiceDemo::new(service);
    let report = demo.run(&items).await;

    let sizes: Vec<usize> = report
        .outcomes
        .iter()
        .map(|o| match o {
            ItemOutcome::Spoken { audio_bytes, .. } => *audio_bytes,
            other => panic!("unexpected outcome {:?}", other),
        })
        .collect();
    assert!(sizes[0] > sizes[1]);
    assert!(sizes[1] > sizes[2]);
    assert!(demo.service().voice_presets().contains_key("turbo"));
}

#[tokio::test]
async fn test_http_voice_service_full_response() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let respond_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/respond")
            .json_body(json!({"message": "こんにちは", "use_dialect": true}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"text_response": "そだね〜、元気だべ！"}));
    });
    let synth_mock = server.mock(|when, then| {
        when.method(POST).path("/synthesize");
        then.status(200)
            .header("Content-Type", "audio/mpeg")
            .body(vec![0x49u8, 0x44, 0x33, 0x04, 0x00]);
    });

    let service = HttpVoiceService::new(
        &server.base_url(),
        Duration::from_secs(5),
        LocalStorage::new(temp_dir.path()),
    )
    .unwrap();

    let result = service
        .generate_voice_response(&VoiceRequest::new("こんにちは"))
        .await
        .unwrap();

    respond_mock.assert();
    synth_mock.assert();
    assert_eq!(result.text_response, "そだね〜、元気だべ！");

    let audio = result.audio_data.expect("audio payload");
    assert_eq!(audio.len(), 5);

    let path = service
        .save_voice_response_to_file(&audio, "reply.mp3")
        .await
        .unwrap();
    assert_eq!(std::fs::read(path).unwrap(), vec![0x49u8, 0x44, 0x33, 0x04, 0x00]);

    let stats = service.session_stats();
    assert_eq!(stats[stat_keys::API_CALLS], 1);
    assert_eq!(stats[stat_keys::TOTAL_AUDIO_BYTES], 5);
}

#[tokio::test]
async fn test_http_synthesis_failure_falls_back_to_text() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/respond");
        then.status(200)
            .json_body(json!({"text_response": "なんまらいいっしょ！"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/synthesize");
        then.status(503);
    });

    let service = HttpVoiceService::new(
        &server.base_url(),
        Duration::from_secs(5),
        LocalStorage::new(temp_dir.path()),
    )
    .unwrap();

    let result = service
        .generate_voice_response(&VoiceRequest::new("テスト"))
        .await
        .unwrap();
    assert_eq!(result.text_response, "なんまらいいっしょ！");
    assert!(result.audio_data.is_none());

    let err = service
        .generate_voice_response(&VoiceRequest::new("テスト").with_fallback_to_text(false))
        .await
        .unwrap_err();
    assert!(matches!(err, DemoError::Synthesis { .. }));
}

#[tokio::test]
async fn test_http_reply_failure_skips_synthesis() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/respond");
        then.status(500);
    });
    let synth_mock = server.mock(|when, then| {
        when.method(POST).path("/synthesize");
        then.status(200).body("unused");
    });

    let service = HttpVoiceService::new(
        &server.base_url(),
        Duration::from_secs(5),
        LocalStorage::new(temp_dir.path()),
    )
    .unwrap();

    let err = service
        .generate_voice_response(&VoiceRequest::new("テスト"))
        .await
        .unwrap_err();

    assert!(matches!(err, DemoError::Voice { .. }));
    synth_mock.assert_hits(0);
    assert_eq!(service.session_stats()[stat_keys::TTS_CALLS], 0);
}

#[tokio::test]
async fn test_http_synthesize_receives_resolved_voice() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/respond");
        then.status(200).json_body(json!({"text_response": "だべさ〜"}));
    });
    let synth_mock = server.mock(|when, then| {
        when.method(POST).path("/synthesize").json_body(json!({
            "text": "だべさ〜",
            "speaking_rate": 1.5,
            "pitch": 0.0,
            "volume_gain_db": 0.0
        }));
        then.status(200).body(vec![1u8, 2, 3]);
    });

    let service = HttpVoiceService::new(
        &format!("{}/", server.base_url()),
        Duration::from_secs(5),
        LocalStorage::new(temp_dir.path()),
    )
    .unwrap();

    let result = service
        .generate_voice_response(&VoiceRequest::new("速く").with_preset("fast"))
        .await
        .unwrap();

    synth_mock.assert();
    assert_eq!(result.audio_data.map(|a| a.len()), Some(3));
}
