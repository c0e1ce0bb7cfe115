//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::{
    Credentials, Settings, SynthesisStrategy, ELEVENLABS_API_KEY_VAR, FIRECRAWL_API_KEY_VAR,
    OPENAI_API_KEY_VAR,
};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, credentials: &Credentials) -> anyhow::Result<()> {
    Output::header("Prat Doctor");
    println!();
    println!("Checking credentials and configuration...\n");

    let mut checks = Vec::new();

    // Check API keys. Presence only; values are never printed.
    println!("{}", style("API Configuration").bold());
    let key_checks = check_api_keys(settings, credentials);
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    // Check output directory
    println!("{}", style("Directories").bold());
    let dir_check = check_output_dir(settings);
    dir_check.print();
    checks.push(dir_check);

    println!();

    // Check configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Prat.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Prat is ready to use.");
    }

    Ok(())
}

/// Check presence of the three API keys against the configured strategy.
fn check_api_keys(settings: &Settings, credentials: &Credentials) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(check_key(
        OPENAI_API_KEY_VAR,
        credentials.openai_api_key.is_some(),
        true,
        "Needed for summarization (and bundled synthesis)",
    ));

    let elevenlabs_required = settings.synthesis.strategy == SynthesisStrategy::Direct;
    results.push(check_key(
        ELEVENLABS_API_KEY_VAR,
        credentials.elevenlabs_api_key.is_some(),
        elevenlabs_required,
        "Needed for the direct synthesis strategy",
    ));

    results.push(check_key(
        FIRECRAWL_API_KEY_VAR,
        credentials.firecrawl_api_key.is_some(),
        false,
        "Needed to generate podcasts from blog URLs",
    ));

    results
}

fn check_key(var: &str, present: bool, required: bool, why: &str) -> CheckResult {
    if present {
        CheckResult::ok(var, "configured")
    } else if required {
        CheckResult::error(
            var,
            "not set",
            &format!("{}. Set with: export {}='...'", why, var),
        )
    } else {
        CheckResult::warning(
            var,
            "not set",
            &format!("{}. Set with: export {}='...'", why, var),
        )
    }
}

/// Check the audio output directory.
fn check_output_dir(settings: &Settings) -> CheckResult {
    let dir = settings.output_dir();
    if dir.exists() {
        let count = std::fs::read_dir(&dir).map(|e| e.count()).unwrap_or(0);
        CheckResult::ok(
            "Output directory",
            &format!("{} ({} file(s))", dir.display(), count),
        )
    } else {
        CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", dir.display()),
            "Directory will be created on first generation",
        )
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: prat init",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_missing_required_key_is_error() {
        let result = check_key("OPENAI_API_KEY", false, true, "why");
        assert_eq!(result.status, CheckStatus::Error);
    }

    #[test]
    fn test_missing_optional_key_is_warning() {
        let result = check_key("FIRECRAWL_API_KEY", false, false, "why");
        assert_eq!(result.status, CheckStatus::Warning);
    }

    #[test]
    fn test_key_checks_never_reveal_values() {
        let credentials = Credentials {
            openai_api_key: Some("sk-secret-value".to_string()),
            elevenlabs_api_key: None,
            firecrawl_api_key: None,
        };
        let checks = check_api_keys(&Settings::default(), &credentials);
        for check in checks {
            assert!(!check.message.contains("secret"));
            if let Some(hint) = check.hint {
                assert!(!hint.contains("secret"));
            }
        }
    }
}
