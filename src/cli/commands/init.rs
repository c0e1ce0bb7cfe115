//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::{
    Credentials, Settings, ELEVENLABS_API_KEY_VAR, FIRECRAWL_API_KEY_VAR, OPENAI_API_KEY_VAR,
};
use console::style;

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings, credentials: &Credentials) -> anyhow::Result<()> {
    Output::header("Prat Setup");
    println!();
    println!("Welcome to Prat! Let's make sure everything is configured correctly.\n");

    // Step 1: API keys
    println!("{}", style("Step 1: API keys").bold().cyan());
    println!();

    let keys = [
        (OPENAI_API_KEY_VAR, credentials.openai_api_key.is_some(), "summarization"),
        (ELEVENLABS_API_KEY_VAR, credentials.elevenlabs_api_key.is_some(), "speech synthesis"),
        (FIRECRAWL_API_KEY_VAR, credentials.firecrawl_api_key.is_some(), "blog scraping"),
    ];

    let mut missing = 0;
    for (var, present, purpose) in keys {
        if present {
            println!("  {} {} - configured", style("✓").green(), style(var).bold());
        } else {
            missing += 1;
            println!("  {} {} - not set ({})", style("✗").red(), style(var).bold(), purpose);
            println!("    {} {}", style("→").dim(), style(format!("export {}='...'", var)).dim());
        }
    }

    if missing > 0 {
        println!();
        Output::warning(&format!(
            "{} key(s) missing. Add them to your shell configuration (~/.bashrc, ~/.zshrc, etc.).",
            missing
        ));
    }

    println!();

    // Step 2: configuration file
    println!("{}", style("Step 2: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file already exists: {}", config_path.display()));
    } else {
        settings.save()?;
        Output::success(&format!("Wrote default config to {}", config_path.display()));
    }

    println!();
    Output::header("Next steps");
    Output::kv("Check setup", "prat doctor");
    Output::kv("Generate from a blog", "prat generate --url https://example.com/post");
    Output::kv("Generate from text", "prat generate --text 'Something to read aloud'");
    Output::kv("Start the web UI", "prat serve");
    println!();

    Ok(())
}
