pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::DemoArgs;

pub use adapters::clock::{FixedClock, SystemClock};
pub use adapters::storage::LocalStorage;
pub use adapters::usage::{InMemoryUsage, NeverInUse};
pub use adapters::voice::{HttpVoiceService, MockVoiceService};
pub use config::AppConfig;
pub use crate::core::{
    allocator::{DomainAllocator, DomainPool},
    url_strategy::UrlStrategy,
    voice_demo::{conversation, DemoItem, DemoReport, ItemOutcome, VoiceDemo},
};
pub use domain::model::{AppDescriptor, AudioPayload, VoicePreset, VoiceRequest, VoiceResponse};
pub use domain::ports::{Clock, DomainUsage, Storage, VoiceService};
pub use utils::error::{DemoError, Result};
