//! Configuration settings for Prat.

use crate::error::{PratError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the ElevenLabs API key.
pub const ELEVENLABS_API_KEY_VAR: &str = "ELEVENLABS_API_KEY";
/// Environment variable holding the Firecrawl API key.
pub const FIRECRAWL_API_KEY_VAR: &str = "FIRECRAWL_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub summarizer: SummarizerSettings,
    pub synthesis: SynthesisSettings,
    pub scraper: ScraperSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where generated audio files are written.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: "audio_generations".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Summarizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Chat model used for summarization.
    pub model: String,
    /// Soft cap on summary length, enforced through the instructions.
    pub max_summary_chars: usize,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4.1".to_string(),
            max_summary_chars: 2000,
        }
    }
}

/// Speech synthesis strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisStrategy {
    /// Call the ElevenLabs text-to-speech API directly (MP3 output).
    #[default]
    Direct,
    /// Obtain audio from an audio-capable chat completion (WAV output).
    Bundled,
}

impl std::str::FromStr for SynthesisStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" | "elevenlabs" => Ok(SynthesisStrategy::Direct),
            "bundled" | "agent" => Ok(SynthesisStrategy::Bundled),
            _ => Err(format!("Unknown synthesis strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for SynthesisStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisStrategy::Direct => write!(f, "direct"),
            SynthesisStrategy::Bundled => write!(f, "bundled"),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    /// Which synthesis strategy to use (direct, bundled).
    pub strategy: SynthesisStrategy,
    /// ElevenLabs voice ID (direct strategy).
    pub voice_id: String,
    /// ElevenLabs TTS model (direct strategy).
    pub model_id: String,
    /// Voice stability, 0.0-1.0 (direct strategy).
    pub stability: f32,
    /// Voice similarity boost, 0.0-1.0 (direct strategy).
    pub similarity_boost: f32,
    /// Audio-capable chat model (bundled strategy).
    pub bundled_model: String,
    /// Voice name for the bundled strategy.
    pub bundled_voice: String,
    /// Keep only the newest N generated files. None keeps everything.
    pub retain_last: Option<usize>,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            strategy: SynthesisStrategy::Direct,
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            stability: 0.5,
            similarity_boost: 0.75,
            bundled_model: "gpt-4o-audio-preview".to_string(),
            bundled_voice: "alloy".to_string(),
            retain_last: None,
        }
    }
}

/// Scraping service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    /// Base URL of the Firecrawl API.
    pub base_url: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.firecrawl.dev".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PratError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prat")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded audio output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }
}

/// API credentials, read once at startup and passed explicitly.
///
/// Components receive the keys they need through constructors; nothing in the
/// library reads process environment after this struct is built.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub firecrawl_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    ///
    /// Empty values are treated the same as unset.
    pub fn from_env() -> Self {
        fn non_empty(var: &str) -> Option<String> {
            std::env::var(var).ok().filter(|v| !v.trim().is_empty())
        }

        Self {
            openai_api_key: non_empty(OPENAI_API_KEY_VAR),
            elevenlabs_api_key: non_empty(ELEVENLABS_API_KEY_VAR),
            firecrawl_api_key: non_empty(FIRECRAWL_API_KEY_VAR),
        }
    }

    /// The OpenAI key, or a configuration error naming the variable.
    pub fn require_openai(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| Self::missing(OPENAI_API_KEY_VAR))
    }

    /// The ElevenLabs key, or a configuration error naming the variable.
    pub fn require_elevenlabs(&self) -> Result<&str> {
        self.elevenlabs_api_key
            .as_deref()
            .ok_or_else(|| Self::missing(ELEVENLABS_API_KEY_VAR))
    }

    /// The Firecrawl key, or a configuration error naming the variable.
    pub fn require_firecrawl(&self) -> Result<&str> {
        self.firecrawl_api_key
            .as_deref()
            .ok_or_else(|| Self::missing(FIRECRAWL_API_KEY_VAR))
    }

    fn missing(var: &str) -> PratError {
        PratError::Config(format!("{} not set. Set it with: export {}='...'", var, var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.general.output_dir, "audio_generations");
        assert_eq!(settings.summarizer.max_summary_chars, 2000);
        assert_eq!(settings.synthesis.strategy, SynthesisStrategy::Direct);
        assert!(settings.synthesis.retain_last.is_none());
    }

    #[test]
    fn test_strategy_from_str() {
        use std::str::FromStr;
        assert_eq!(SynthesisStrategy::from_str("direct").unwrap(), SynthesisStrategy::Direct);
        assert_eq!(SynthesisStrategy::from_str("Bundled").unwrap(), SynthesisStrategy::Bundled);
        assert!(SynthesisStrategy::from_str("polly").is_err());
    }

    #[test]
    fn test_settings_roundtrip_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.synthesis.voice_id, settings.synthesis.voice_id);
        assert_eq!(parsed.scraper.base_url, settings.scraper.base_url);
    }

    #[test]
    fn test_credentials_require_reports_variable_name() {
        let creds = Credentials::default();
        let err = creds.require_elevenlabs().unwrap_err();
        assert!(err.to_string().contains("ELEVENLABS_API_KEY"));
    }
}
