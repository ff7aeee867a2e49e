use clap::Parser;
use demo_access::{
    AppConfig, DemoArgs, DemoItem, HttpVoiceService, LocalStorage, MockVoiceService, VoiceDemo,
    VoicePreset, VoiceRequest, VoiceService,
};
use std::time::Duration;

const MESSAGE: &str = "なんまら良い天気だべ〜！今日も札幌は寒いっしょ。";

fn items() -> Vec<DemoItem> {
    let request = || VoiceRequest::new(MESSAGE);
    vec![
        DemoItem::new(
            "Normal speed",
            request().with_speed(0.9).with_pitch(-2.0),
            "demo_normal_speed.mp3",
        ),
        DemoItem::new(
            "1.5x speed",
            request().with_speed(1.5).with_pitch(0.0),
            "demo_fast_speed.mp3",
        ),
        DemoItem::new(
            "0.7x speed",
            request().with_speed(0.7).with_pitch(-5.0),
            "demo_slow_speed.mp3",
        ),
        DemoItem::new(
            "Preset 'fast'",
            request().with_preset("fast"),
            "demo_preset_fast.mp3",
        ),
        DemoItem::new(
            "Custom preset",
            request().with_preset("sapporo-turbo"),
            "demo_custom_preset.mp3",
        ),
    ]
}

async fn run<V: VoiceService>(service: V) {
    service.create_voice_preset("sapporo-turbo", VoicePreset::new(2.0, 3.0, 2.0));

    let demo = VoiceDemo::new(service);
    demo.run(&items()).await;

    println!("\n[Available presets]");
    for (name, preset) in demo.service().voice_presets() {
        println!(
            "- {}: rate={}, pitch={}",
            name, preset.speaking_rate, preset.pitch
        );
    }
    println!("\n[SUCCESS] Speed control demo finished!");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = DemoArgs::parse();
    args.init_logging();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    println!("=== AltMX voice speed control demo ===");

    let storage = LocalStorage::new(&config.voice.output_path);
    match &config.voice.endpoint {
        Some(endpoint) => {
            let timeout = Duration::from_secs(config.voice.timeout_seconds);
            run(HttpVoiceService::new(endpoint, timeout, storage)?).await;
        }
        None => run(MockVoiceService::new(storage)).await,
    }

    Ok(())
}
