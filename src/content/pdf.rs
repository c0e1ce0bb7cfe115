//! PDF text extraction.
//!
//! Extracts plain text page by page and bounds the result so a very long
//! document cannot blow past the summarizer's useful input size.

use crate::error::{PratError, Result};
use lopdf::Document;
use tracing::{debug, instrument};

/// Maximum number of characters passed downstream.
const TRUNCATION_THRESHOLD: usize = 10_000;

/// Marker appended when extracted text is cut at the threshold.
const TRUNCATION_MARKER: &str = "... (truncated)";

/// Extract plain text from PDF bytes.
///
/// Per-page text is joined with blank lines. Output longer than the threshold
/// is truncated once, irreversibly, with a marker appended.
#[instrument(skip(bytes), fields(size = bytes.len()))]
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let document =
        Document::load_mem(bytes).map_err(|e| PratError::PdfExtraction(e.to_string()))?;

    let pages = document.get_pages();
    if pages.is_empty() {
        return Err(PratError::PdfExtraction("document has no pages".to_string()));
    }

    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = document
            .extract_text(&[*page_number])
            .map_err(|e| PratError::PdfExtraction(format!("page {}: {}", page_number, e)))?;
        page_texts.push(text.trim().to_string());
    }

    let full_text = page_texts.join("\n\n");
    debug!("Extracted {} characters from {} pages", full_text.chars().count(), pages.len());

    Ok(truncate_text(&full_text))
}

/// Cut text at the threshold and append the truncation marker.
fn truncate_text(text: &str) -> String {
    if text.chars().count() <= TRUNCATION_THRESHOLD {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(TRUNCATION_THRESHOLD).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_below_threshold_is_untouched() {
        let text = "short document text";
        assert_eq!(truncate_text(text), text);
    }

    #[test]
    fn test_truncate_at_threshold_is_untouched() {
        let text: String = "a".repeat(TRUNCATION_THRESHOLD);
        assert_eq!(truncate_text(&text), text);
    }

    #[test]
    fn test_truncate_over_threshold_is_exact_prefix_plus_marker() {
        let text: String = "b".repeat(TRUNCATION_THRESHOLD + 500);
        let result = truncate_text(&text);

        let expected_prefix: String = "b".repeat(TRUNCATION_THRESHOLD);
        assert_eq!(result, format!("{}{}", expected_prefix, TRUNCATION_MARKER));
        assert_eq!(
            result.chars().count(),
            TRUNCATION_THRESHOLD + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn test_truncate_is_multibyte_safe() {
        let text: String = "ø".repeat(TRUNCATION_THRESHOLD + 10);
        let result = truncate_text(&text);
        assert!(result.starts_with('ø'));
        assert!(result.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            result.chars().count(),
            TRUNCATION_THRESHOLD + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn test_extract_rejects_garbage_bytes() {
        let result = extract_text(b"definitely not a pdf");
        assert!(matches!(result, Err(PratError::PdfExtraction(_))));
    }

    #[test]
    fn test_extract_rejects_empty_bytes() {
        assert!(extract_text(&[]).is_err());
    }
}
