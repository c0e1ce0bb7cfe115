//! Content source abstraction for Prat.
//!
//! A content source is the single input to a podcast generation run: a blog
//! URL, an uploaded PDF, or pasted text. Constructors are the validation
//! gate; an invalid input never reaches an external service.

pub mod pdf;

use crate::error::{PratError, Result};
use url::Url;

/// Kind of content source, for logging and UI labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    BlogUrl,
    PdfDocument,
    RawText,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::BlogUrl => write!(f, "blog-url"),
            SourceKind::PdfDocument => write!(f, "pdf"),
            SourceKind::RawText => write!(f, "text"),
        }
    }
}

/// A validated content source.
///
/// Immutable once constructed; the pipeline branches on the variant to decide
/// whether scraping or PDF extraction is needed.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// A remote blog post to scrape.
    BlogUrl(String),
    /// An uploaded PDF document.
    PdfDocument(Vec<u8>),
    /// Pasted plain text.
    RawText(String),
}

impl ContentSource {
    /// Build a blog-URL source. Requires a non-blank, absolute http(s) URL.
    pub fn blog_url(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(PratError::InvalidInput("Please enter a valid URL".to_string()));
        }

        let parsed = Url::parse(url)
            .map_err(|e| PratError::InvalidInput(format!("Invalid URL '{}': {}", url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(PratError::InvalidInput(format!(
                "Unsupported URL scheme '{}': expected http or https",
                parsed.scheme()
            )));
        }

        Ok(ContentSource::BlogUrl(url.to_string()))
    }

    /// Build a PDF source. Requires non-empty document bytes.
    pub fn pdf_document(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(PratError::InvalidInput(
                "Please upload a PDF file".to_string(),
            ));
        }
        Ok(ContentSource::PdfDocument(bytes))
    }

    /// Build a raw-text source. Requires non-blank text.
    pub fn raw_text(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(PratError::InvalidInput(
                "Please enter some text to summarize".to_string(),
            ));
        }
        Ok(ContentSource::RawText(text.to_string()))
    }

    /// The kind of this source.
    pub fn kind(&self) -> SourceKind {
        match self {
            ContentSource::BlogUrl(_) => SourceKind::BlogUrl,
            ContentSource::PdfDocument(_) => SourceKind::PdfDocument,
            ContentSource::RawText(_) => SourceKind::RawText,
        }
    }

    /// Short description for logs, without exposing full content.
    pub fn describe(&self) -> String {
        match self {
            ContentSource::BlogUrl(url) => format!("blog URL {}", url),
            ContentSource::PdfDocument(bytes) => format!("PDF document ({} bytes)", bytes.len()),
            ContentSource::RawText(text) => format!("raw text ({} chars)", text.chars().count()),
        }
    }
}
