//! Direct ElevenLabs text-to-speech client.

use super::{AudioArtifact, AudioFormat, SpeechSynthesizer};
use crate::config::SynthesisSettings;
use crate::error::{PratError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Timeout for synthesis requests (2 minutes).
const TTS_TIMEOUT_SECS: u64 = 120;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// ElevenLabs-backed synthesizer. Produces MP3.
pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    voice_id: String,
    model_id: String,
    stability: f32,
    similarity_boost: f32,
}

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl ElevenLabsSynthesizer {
    /// Create a synthesizer for the given API key and voice configuration.
    pub fn new(api_key: impl Into<String>, settings: &SynthesisSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TTS_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            voice_id: settings.voice_id.clone(),
            model_id: settings.model_id.clone(),
            stability: settings.stability,
            similarity_boost: settings.similarity_boost,
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    #[instrument(skip(self, text), fields(chars = text.chars().count(), voice = %self.voice_id))]
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact> {
        let body = TtsRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: self.stability,
                similarity_boost: self.similarity_boost,
            },
        };

        let resp = self
            .client
            .post(format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id))
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(PratError::SynthesisApi { status, message });
        }

        let bytes = resp.bytes().await?.to_vec();
        if bytes.is_empty() {
            return Err(PratError::Synthesis("Provider returned empty audio".to_string()));
        }

        debug!("Synthesized {} bytes of audio", bytes.len());
        Ok(AudioArtifact { bytes, format: AudioFormat::Mp3 })
    }

    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }
}
