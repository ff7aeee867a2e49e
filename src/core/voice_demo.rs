use crate::core::{SessionStats, VoiceRequest, VoiceService};

/// One scripted step of a voice demo.
#[derive(Debug, Clone)]
pub struct DemoItem {
    pub label: String,
    pub request: VoiceRequest,
    pub audio_file: String,
}

impl DemoItem {
    pub fn new(label: impl Into<String>, request: VoiceRequest, audio_file: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            request,
            audio_file: audio_file.into(),
        }
    }
}

/// Builds the classic conversation demo: one item per message, audio saved
/// as `demo_response_{n}.mp3`.
pub fn conversation(messages: &[&str], use_dialect: bool) -> Vec<DemoItem> {
    messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let n = i + 1;
            DemoItem::new(
                format!("Demo {}", n),
                VoiceRequest::new(*message).with_dialect(use_dialect),
                format!("demo_response_{}.mp3", n),
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Spoken { audio_path: String, audio_bytes: usize },
    TextOnly,
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct DemoReport {
    pub outcomes: Vec<ItemOutcome>,
    pub stats: SessionStats,
}

impl DemoReport {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ItemOutcome::Failed { .. }))
            .count()
    }
}

/// Walks demo items one at a time and keeps going when an item fails.
pub struct VoiceDemo<V: VoiceService> {
    service: V,
}

impl<V: VoiceService> VoiceDemo<V> {
    pub fn new(service: V) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &V {
        &self.service
    }

    pub async fn run(&self, items: &[DemoItem]) -> DemoReport {
        let mut outcomes = Vec::with_capacity(items.len());

        for item in items {
            println!("\n[{}] User: {}", item.label, item.request.message);
            let outcome = self.run_item(item).await;
            if let ItemOutcome::Failed { error } = &outcome {
                tracing::error!("{} failed: {}", item.label, error);
                println!("[ERROR] {}", error);
            }
            outcomes.push(outcome);
        }

        let stats = self.service.session_stats();
        println!("\n{}", "=".repeat(50));
        println!("[STATS] Session statistics");
        println!("{}", "=".repeat(50));
        for (key, value) in &stats {
            println!("{}: {}", key, value);
        }

        DemoReport { outcomes, stats }
    }

    async fn run_item(&self, item: &DemoItem) -> ItemOutcome {
        let response = match self.service.generate_voice_response(&item.request).await {
            Ok(response) => response,
            Err(e) => {
                return ItemOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        println!("AltMX: {}", response.text_response);

        let Some(audio) = response.audio_data else {
            println!("[WARN] No audio data");
            return ItemOutcome::TextOnly;
        };

        match self
            .service
            .save_voice_response_to_file(&audio, &item.audio_file)
            .await
        {
            Ok(audio_path) => {
                println!("[AUDIO] Saved: {}", audio_path);
                println!("[INFO] Audio size: {} bytes", audio.len());
                ItemOutcome::Spoken {
                    audio_path,
                    audio_bytes: audio.len(),
                }
            }
            Err(e) => ItemOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}
