//! Pipeline configuration with documented defaults
//!
//! Values come from three places, later ones winning: the built-in
//! defaults below, an optional TOML file, and `VOICEBOOK_*` environment
//! variables. LLM credentials are read separately by the LLM client.

use crate::core::error::{Result, VoiceError};
use crate::core::types::Language;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bound on the remote NLU round trip.
///
/// The host will not accept the next utterance until the current one is
/// processed, so a hung request must expire well within a user's patience.
pub const DEFAULT_NLU_TIMEOUT_MS: u64 = 8_000;

/// Default completion budget for NLU replies. A single command object,
/// even a chained one, fits comfortably.
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 1_024;

/// Configuration for the command pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Upper bound for the remote NLU stage in milliseconds.
    ///
    /// Expiry is treated as a fallback failure and resolves to `unknown`.
    pub nlu_timeout_ms: u64,

    /// Language used for feedback messages
    pub language: Language,

    /// Optional TOML file with extra exact-match phrases
    pub phrases_file: Option<PathBuf>,

    /// `max_tokens` sent with each NLU completion request
    pub llm_max_tokens: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            nlu_timeout_ms: DEFAULT_NLU_TIMEOUT_MS,
            language: Language::En,
            phrases_file: None,
            llm_max_tokens: DEFAULT_LLM_MAX_TOKENS,
        }
    }
}

impl PipelineConfig {
    /// Remote stage timeout as a `Duration`
    pub fn nlu_timeout(&self) -> Duration {
        Duration::from_millis(self.nlu_timeout_ms)
    }

    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Build from defaults plus environment overrides
    ///
    /// Optional: VOICEBOOK_NLU_TIMEOUT_MS, VOICEBOOK_LANGUAGE, VOICEBOOK_PHRASES
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `VOICEBOOK_*` environment variables on top of `self`
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(raw) = std::env::var("VOICEBOOK_NLU_TIMEOUT_MS") {
            self.nlu_timeout_ms = raw.trim().parse().map_err(|_| {
                VoiceError::ConfigError(format!("VOICEBOOK_NLU_TIMEOUT_MS is not a number: {}", raw))
            })?;
        }
        if let Ok(raw) = std::env::var("VOICEBOOK_LANGUAGE") {
            self.language = raw.parse().map_err(VoiceError::ConfigError)?;
        }
        if let Ok(raw) = std::env::var("VOICEBOOK_PHRASES") {
            self.phrases_file = Some(PathBuf::from(raw));
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.nlu_timeout_ms == 0 {
            return Err(VoiceError::ConfigError(
                "nlu_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.llm_max_tokens == 0 {
            return Err(VoiceError::ConfigError(
                "llm_max_tokens must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.nlu_timeout(), Duration::from_secs(8));
        assert_eq!(config.language, Language::En);
        assert!(config.phrases_file.is_none());
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let config = PipelineConfig::parse_toml("language = \"bn\"\n").unwrap();
        assert_eq!(config.language, Language::Bn);
        assert_eq!(config.nlu_timeout_ms, DEFAULT_NLU_TIMEOUT_MS);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = PipelineConfig::parse_toml(
            r#"
nlu_timeout_ms = 2500
language = "en"
phrases_file = "phrases.toml"
llm_max_tokens = 256
"#,
        )
        .unwrap();
        assert_eq!(config.nlu_timeout_ms, 2500);
        assert_eq!(config.phrases_file, Some(PathBuf::from("phrases.toml")));
        assert_eq!(config.llm_max_tokens, 256);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(PipelineConfig::parse_toml("nlu_timeout = 5\n").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = PipelineConfig::parse_toml("nlu_timeout_ms = 0\n").unwrap_err();
        assert!(matches!(err, VoiceError::ConfigError(_)));
    }
}
