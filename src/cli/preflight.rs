//! Pre-flight checks before expensive operations.
//!
//! Validates that the credentials an operation depends on are present before
//! starting a run that would otherwise fail midway.

use crate::config::{Credentials, Settings, SynthesisStrategy};
use crate::content::SourceKind;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// One generation run for a specific input kind.
    Generate(SourceKind),
    /// The web server; scraping requirements are deferred to request time.
    Serve,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings, credentials: &Credentials) -> Result<()> {
    // The summarizer always needs OpenAI.
    credentials.require_openai()?;

    match settings.synthesis.strategy {
        SynthesisStrategy::Direct => {
            credentials.require_elevenlabs()?;
        }
        // Bundled synthesis rides on the OpenAI key checked above.
        SynthesisStrategy::Bundled => {}
    }

    if let Operation::Generate(SourceKind::BlogUrl) = operation {
        credentials.require_firecrawl()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_credentials() -> Credentials {
        Credentials {
            openai_api_key: Some("sk-test".to_string()),
            elevenlabs_api_key: Some("el-test".to_string()),
            firecrawl_api_key: Some("fc-test".to_string()),
        }
    }

    #[test]
    fn test_check_passes_with_all_keys() {
        let settings = Settings::default();
        assert!(check(Operation::Generate(SourceKind::BlogUrl), &settings, &full_credentials()).is_ok());
        assert!(check(Operation::Serve, &settings, &full_credentials()).is_ok());
    }

    #[test]
    fn test_text_mode_does_not_need_firecrawl() {
        let settings = Settings::default();
        let creds = Credentials {
            firecrawl_api_key: None,
            ..full_credentials()
        };
        assert!(check(Operation::Generate(SourceKind::RawText), &settings, &creds).is_ok());
        assert!(check(Operation::Generate(SourceKind::BlogUrl), &settings, &creds).is_err());
    }

    #[test]
    fn test_bundled_strategy_does_not_need_elevenlabs() {
        let mut settings = Settings::default();
        settings.synthesis.strategy = SynthesisStrategy::Bundled;
        let creds = Credentials {
            elevenlabs_api_key: None,
            ..full_credentials()
        };
        assert!(check(Operation::Generate(SourceKind::RawText), &settings, &creds).is_ok());

        settings.synthesis.strategy = SynthesisStrategy::Direct;
        assert!(check(Operation::Generate(SourceKind::RawText), &settings, &creds).is_err());
    }

    #[test]
    fn test_openai_is_always_required() {
        let settings = Settings::default();
        let creds = Credentials {
            openai_api_key: None,
            ..full_credentials()
        };
        assert!(check(Operation::Serve, &settings, &creds).is_err());
    }
}
