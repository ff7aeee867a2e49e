use clap::Parser;
use demo_access::{
    AppConfig, AppDescriptor, DemoArgs, DomainAllocator, DomainPool, NeverInUse, UrlStrategy,
};

fn main() -> anyhow::Result<()> {
    let args = DemoArgs::parse();
    args.init_logging();

    tracing::info!("🚀 Starting live demo domain strategy");

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} (severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let strategy = UrlStrategy::new(config.url.clone())?;
    let allocator = DomainAllocator::new(DomainPool::from_config(&config.pool)?, NeverInUse);

    let descriptor = AppDescriptor::new("ai-dashboard").with_session_id(strategy.demo_id());
    let urls = strategy.demo_urls(&descriptor)?;

    println!("=== Live demo URL strategy ===");
    println!("🚀 ALB URL (available immediately): {}", urls.immediate);
    println!("🌐 Pre-warmed domain: {}", allocator.acquire_domain());

    println!("\n=== Demo flow (60 minute session) ===");
    println!("1. CloudFormation starts -> show 'Generating...'");
    println!("2. ALB ready (5-8 min) -> deployment done on the ALB URL");
    println!("3. Walk through the running app with the audience");
    println!("※ No DNS setup: too slow and too fiddly for a live demo");

    Ok(())
}
