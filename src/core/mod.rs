pub mod allocator;
pub mod url_strategy;
pub mod voice_demo;

pub use crate::domain::model::{
    AppDescriptor, AudioPayload, DemoUrls, SessionStats, VoicePreset, VoiceRequest, VoiceResponse,
};
pub use crate::domain::ports::{Clock, DomainUsage, Storage, VoiceService};
pub use crate::utils::error::Result;
