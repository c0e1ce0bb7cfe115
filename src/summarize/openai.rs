//! OpenAI chat summarizer.

use super::{Summarizer, Summary};
use crate::error::{PratError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI-based summarizer with a fixed instruction set.
pub struct OpenAiSummarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_summary_chars: usize,
}

impl OpenAiSummarizer {
    /// Create a summarizer for the given API key, model, and summary bound.
    pub fn new(api_key: &str, model: &str, max_summary_chars: usize) -> Self {
        Self {
            client: create_client(api_key),
            model: model.to_string(),
            max_summary_chars,
        }
    }

    fn instructions(&self) -> String {
        format!(
            "You turn written content into a short podcast script.\n\
             \n\
             1. Create a concise summary of the given content, NO MORE than {} characters.\n\
             2. Capture the important details of the content.\n\
             3. Since the summary will be read aloud as a podcast, make the language \
             casual and friendly.\n\
             4. Return only the summary text, with no headings, markdown, or preamble.",
            self.max_summary_chars
        )
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    #[instrument(skip(self, content), fields(chars = content.chars().count()))]
    async fn summarize(&self, content: &str) -> Result<Summary> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.instructions())
                .build()
                .map_err(|e| PratError::Summarize(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!(
                    "Convert this content into an engaging podcast summary:\n\n{}",
                    content
                ))
                .build()
                .map_err(|e| PratError::Summarize(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| PratError::Summarize(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| PratError::OpenAI(format!("Summarization API error: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| PratError::Summarize("No response from model".to_string()))?;

        let text = choice
            .message
            .content
            .clone()
            .unwrap_or_default()
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(PratError::Summarize("Model returned an empty summary".to_string()));
        }

        debug!("Summary of {} characters generated", text.chars().count());
        Ok(Summary { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_carry_the_length_bound() {
        let summarizer = OpenAiSummarizer::new("sk-test", "gpt-4.1", 2000);
        let instructions = summarizer.instructions();
        assert!(instructions.contains("NO MORE than 2000 characters"));
        assert!(instructions.contains("casual and friendly"));
    }
}
