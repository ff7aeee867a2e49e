use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Voice service error: {message}")]
    Voice { message: String },

    #[error("Speech synthesis failed: {message}")]
    Synthesis { message: String },

    #[error("Refusing to use {path} outside the storage directory")]
    UnsafePath { path: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DemoError {
    pub fn missing_field(field: &str) -> Self {
        DemoError::MissingRequiredField {
            field: field.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DemoError::Synthesis { .. } => ErrorSeverity::Low,
            DemoError::Voice { .. } | DemoError::Http(_) => ErrorSeverity::Medium,
            DemoError::MissingRequiredField { .. }
            | DemoError::InvalidConfigValue { .. }
            | DemoError::ConfigParse { .. }
            | DemoError::UnsafePath { .. }
            | DemoError::Serialization(_) => ErrorSeverity::High,
            DemoError::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DemoError::MissingRequiredField { .. } => {
                "Fill in the missing field in the deployment descriptor"
            }
            DemoError::InvalidConfigValue { .. } | DemoError::ConfigParse { .. } => {
                "Check the configuration file against the documented sections"
            }
            DemoError::Voice { .. } | DemoError::Http(_) => {
                "Check that the voice service endpoint is reachable, or remove it to use the offline mock"
            }
            DemoError::Synthesis { .. } => "Enable fallback_to_text to continue with text-only replies",
            DemoError::UnsafePath { .. } => {
                "Use a relative file name without '..' inside the output directory"
            }
            DemoError::Io(_) => "Check that the output directory exists and is writable",
            DemoError::Serialization(_) => "The voice service returned an unexpected payload",
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
