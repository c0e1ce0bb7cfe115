//! Speech synthesis for Prat.
//!
//! Two interchangeable strategies sit behind one trait: a direct call to the
//! ElevenLabs text-to-speech API, and a bundled audio-capable chat completion
//! where the language model reads the summary itself. The strategy is picked
//! from configuration, not hardwired into the pipeline.

mod bundled;
mod elevenlabs;

pub use bundled::BundledSynthesizer;
pub use elevenlabs::ElevenLabsSynthesizer;

use crate::config::{Credentials, Settings, SynthesisStrategy};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Container format of a generated audio payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// MIME type for playback and download.
    pub fn mime(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }

    /// Fixed display filename offered for download.
    pub fn download_name(&self) -> String {
        format!("generated_podcast.{}", self.extension())
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Raw synthesized audio plus its format.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
}

/// Trait for speech synthesis providers.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Convert text into audio.
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact>;

    /// The format this synthesizer produces.
    fn format(&self) -> AudioFormat;
}

/// Build the synthesizer selected by configuration.
pub fn create_synthesizer(
    settings: &Settings,
    credentials: &Credentials,
) -> Result<Arc<dyn SpeechSynthesizer>> {
    match settings.synthesis.strategy {
        SynthesisStrategy::Direct => Ok(Arc::new(ElevenLabsSynthesizer::new(
            credentials.require_elevenlabs()?,
            &settings.synthesis,
        ))),
        SynthesisStrategy::Bundled => Ok(Arc::new(BundledSynthesizer::new(
            credentials.require_openai()?,
            &settings.synthesis,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extensions_and_mime() {
        assert_eq!(AudioFormat::Wav.extension(), "wav");
        assert_eq!(AudioFormat::Mp3.mime(), "audio/mpeg");
        assert_eq!(AudioFormat::Wav.mime(), "audio/wav");
    }

    #[test]
    fn test_download_name_is_fixed_per_format() {
        assert_eq!(AudioFormat::Mp3.download_name(), "generated_podcast.mp3");
        assert_eq!(AudioFormat::Wav.download_name(), "generated_podcast.wav");
    }

    #[test]
    fn test_create_synthesizer_requires_strategy_credentials() {
        let settings = Settings::default();
        let creds = Credentials::default();
        // Direct strategy needs the ElevenLabs key.
        assert!(create_synthesizer(&settings, &creds).is_err());

        let creds = Credentials {
            elevenlabs_api_key: Some("el-test".to_string()),
            ..Default::default()
        };
        let synthesizer = create_synthesizer(&settings, &creds).unwrap();
        assert_eq!(synthesizer.format(), AudioFormat::Mp3);
    }
}
