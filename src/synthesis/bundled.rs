//! Bundled synthesis through an audio-capable chat completion.
//!
//! Instead of a separate TTS call, a single model invocation is configured to
//! return audio alongside text. The response carries zero or one audio
//! payloads; absence means the synthesis failed.

use super::{AudioArtifact, AudioFormat, SpeechSynthesizer};
use crate::config::SynthesisSettings;
use crate::error::{PratError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionAudio, ChatCompletionAudioFormat, ChatCompletionAudioVoice,
    ChatCompletionModalities, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::{debug, instrument, warn};

const NARRATOR_PROMPT: &str = "You are a podcast narrator. \
    Read the provided summary aloud exactly as written, in a warm and \
    engaging tone. Do not add introductions, sign-offs, or commentary.";

/// Synthesizer that bundles audio generation into a chat completion.
/// Produces WAV.
pub struct BundledSynthesizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    voice: ChatCompletionAudioVoice,
}

impl BundledSynthesizer {
    /// Create a synthesizer for the given API key and voice configuration.
    pub fn new(api_key: &str, settings: &SynthesisSettings) -> Self {
        Self {
            client: create_client(api_key),
            model: settings.bundled_model.clone(),
            voice: parse_voice(&settings.bundled_voice),
        }
    }
}

/// Map a configured voice name to the API voice identifier.
fn parse_voice(name: &str) -> ChatCompletionAudioVoice {
    match name.to_lowercase().as_str() {
        "alloy" => ChatCompletionAudioVoice::Alloy,
        "ash" => ChatCompletionAudioVoice::Ash,
        "ballad" => ChatCompletionAudioVoice::Ballad,
        "coral" => ChatCompletionAudioVoice::Coral,
        "echo" => ChatCompletionAudioVoice::Echo,
        "sage" => ChatCompletionAudioVoice::Sage,
        "shimmer" => ChatCompletionAudioVoice::Shimmer,
        "verse" => ChatCompletionAudioVoice::Verse,
        other => {
            warn!("Unknown voice '{}', falling back to alloy", other);
            ChatCompletionAudioVoice::Alloy
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for BundledSynthesizer {
    #[instrument(skip(self, text), fields(chars = text.chars().count(), model = %self.model))]
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(NARRATOR_PROMPT)
                .build()
                .map_err(|e| PratError::Synthesis(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!("Read this podcast summary aloud:\n\n{}", text))
                .build()
                .map_err(|e| PratError::Synthesis(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .modalities(vec![ChatCompletionModalities::Text, ChatCompletionModalities::Audio])
            .audio(ChatCompletionAudio {
                voice: self.voice.clone(),
                format: ChatCompletionAudioFormat::Wav,
            })
            .messages(messages)
            .build()
            .map_err(|e| PratError::Synthesis(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| PratError::OpenAI(format!("Audio completion API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PratError::Synthesis("No response from model".to_string()))?;

        let audio = choice
            .message
            .audio
            .ok_or_else(|| PratError::Synthesis("No audio payload in model response".to_string()))?;

        let bytes = BASE64
            .decode(audio.data.as_bytes())
            .map_err(|e| PratError::Synthesis(format!("Invalid audio payload: {}", e)))?;

        if bytes.is_empty() {
            return Err(PratError::Synthesis("Model returned empty audio".to_string()));
        }

        debug!("Decoded {} bytes of audio", bytes.len());
        Ok(AudioArtifact { bytes, format: AudioFormat::Wav })
    }

    fn format(&self) -> AudioFormat {
        AudioFormat::Wav
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voice_known_and_unknown() {
        assert!(matches!(parse_voice("alloy"), ChatCompletionAudioVoice::Alloy));
        assert!(matches!(parse_voice("Shimmer"), ChatCompletionAudioVoice::Shimmer));
        assert!(matches!(parse_voice("no-such-voice"), ChatCompletionAudioVoice::Alloy));
    }

    #[test]
    fn test_synthesizer_reports_wav() {
        let settings = SynthesisSettings::default();
        let synthesizer = BundledSynthesizer::new("sk-test", &settings);
        assert_eq!(synthesizer.format(), AudioFormat::Wav);
    }
}
