use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("NLU request timed out after {0} ms")]
    Timeout(u64),

    #[error("Malformed NLU response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid command pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, VoiceError>;
