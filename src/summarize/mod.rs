//! Content summarization for Prat.
//!
//! Summarization is delegated to a hosted language model. Transport and API
//! failures come back as structured errors; on top of that, a reply can still
//! be a prose failure narrative ("I had trouble accessing..."), so the
//! summary carries a marker check the pipeline consults before spending a
//! synthesis call.

mod openai;

pub use openai::OpenAiSummarizer;

use crate::error::Result;
use async_trait::async_trait;

/// Phrases that mark a summary as a failure narrative rather than content.
const FAILURE_MARKERS: &[&str] = &["trouble accessing", "unable to access", "error"];

/// A summary produced by the summarizer.
#[derive(Debug, Clone)]
pub struct Summary {
    pub text: String,
}

impl Summary {
    /// True when the text is empty or reads as a failure report.
    ///
    /// The marker match is case-insensitive; a summary that legitimately
    /// discusses "errors" also trips it.
    pub fn is_failure_narrative(&self) -> bool {
        let text = self.text.trim();
        if text.is_empty() {
            return true;
        }

        let lowered = text.to_lowercase();
        FAILURE_MARKERS.iter().any(|marker| lowered.contains(marker))
    }
}

/// Trait for summarization providers.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the given content into a short casual-register script.
    async fn summarize(&self, content: &str) -> Result<Summary>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_is_failure() {
        assert!(Summary { text: String::new() }.is_failure_narrative());
        assert!(Summary { text: "   \n".to_string() }.is_failure_narrative());
    }

    #[test]
    fn test_failure_markers_are_case_insensitive() {
        let summary = Summary {
            text: "I had TROUBLE ACCESSING the page you linked.".to_string(),
        };
        assert!(summary.is_failure_narrative());

        let summary = Summary {
            text: "An Error occurred while fetching the post.".to_string(),
        };
        assert!(summary.is_failure_narrative());
    }

    #[test]
    fn test_clean_summary_passes() {
        let summary = Summary {
            text: "Today we're talking about sourdough starters and why timing matters."
                .to_string(),
        };
        assert!(!summary.is_failure_narrative());
    }
}
