use clap::Parser;
use demo_access::{
    conversation, AppConfig, DemoArgs, HttpVoiceService, LocalStorage, MockVoiceService, VoiceDemo,
    VoiceService,
};
use std::time::Duration;

const DEMO_MESSAGES: [&str; 3] = [
    "こんにちは！元気ですか？",
    "プログラミングで困ってることある？",
    "一緒にWebアプリ作ってみない？",
];

async fn run<V: VoiceService>(service: V, use_dialect: bool) {
    let demo = VoiceDemo::new(service);
    let items = conversation(&DEMO_MESSAGES, use_dialect);
    let report = demo.run(&items).await;

    if report.failures() > 0 {
        tracing::warn!("{} of {} demo items failed", report.failures(), items.len());
    }
    println!("\n[SUCCESS] Demo finished!");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = DemoArgs::parse();
    args.init_logging();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} (severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    println!("=== AltMX voice response demo ===");

    let storage = LocalStorage::new(&config.voice.output_path);
    match &config.voice.endpoint {
        Some(endpoint) => {
            tracing::info!("🔊 Using voice service at {}", endpoint);
            let timeout = Duration::from_secs(config.voice.timeout_seconds);
            let service = HttpVoiceService::new(endpoint, timeout, storage)?;
            run(service, config.voice.use_dialect).await;
        }
        None => {
            tracing::info!("🔇 No voice endpoint configured, using the offline mock");
            run(MockVoiceService::new(storage), config.voice.use_dialect).await;
        }
    }

    Ok(())
}
