//! Error types for Prat.

use thiserror::Error;

/// Library-level error type for Prat operations.
#[derive(Error, Debug)]
pub enum PratError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error reading PDF: {0}")]
    PdfExtraction(String),

    #[error("Scraping failed: {0}")]
    Scrape(String),

    #[error("Scraping service error: {status} - {message}")]
    ScrapeApi { status: u16, message: String },

    #[error("Summarization failed: {0}")]
    Summarize(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Speech synthesis service error: {status} - {message}")]
    SynthesisApi { status: u16, message: String },

    #[error("Audio store error: {0}")]
    AudioStore(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PratError {
    /// Stable category label for user-facing diagnostics.
    ///
    /// Lets the CLI and the web UI distinguish "summarizer failed" from
    /// "synthesis failed" without parsing error text.
    pub fn category(&self) -> &'static str {
        match self {
            PratError::Config(_) => "configuration",
            PratError::InvalidInput(_) => "invalid-input",
            PratError::PdfExtraction(_) => "extraction",
            PratError::Scrape(_) | PratError::ScrapeApi { .. } => "scraping",
            PratError::Summarize(_) | PratError::OpenAI(_) => "summarization",
            PratError::Synthesis(_) | PratError::SynthesisApi { .. } => "synthesis",
            PratError::AudioStore(_) | PratError::Io(_) => "storage",
            PratError::Json(_) | PratError::TomlParse(_) | PratError::Http(_) => "internal",
        }
    }
}

/// Result type alias for Prat operations.
pub type Result<T> = std::result::Result<T, PratError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_distinguishes_pipeline_stages() {
        assert_eq!(PratError::InvalidInput("empty".into()).category(), "invalid-input");
        assert_eq!(PratError::PdfExtraction("bad xref".into()).category(), "extraction");
        assert_eq!(PratError::Summarize("empty reply".into()).category(), "summarization");
        assert_eq!(
            PratError::SynthesisApi { status: 401, message: "bad key".into() }.category(),
            "synthesis"
        );
    }

    #[test]
    fn test_synthesis_api_error_surfaces_status_and_message() {
        let err = PratError::SynthesisApi { status: 401, message: "invalid api key".into() };
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("invalid api key"));
    }
}
