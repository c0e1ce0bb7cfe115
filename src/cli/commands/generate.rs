//! Generate command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::content::ContentSource;
use crate::pipeline::PodcastPipeline;
use anyhow::Result;
use std::path::PathBuf;

/// Run the generate command.
pub async fn run_generate(
    url: Option<String>,
    pdf: Option<PathBuf>,
    text: Option<String>,
    strategy: Option<String>,
    mut settings: Settings,
    credentials: Credentials,
) -> Result<()> {
    if let Some(name) = strategy {
        settings.synthesis.strategy = name
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
    }

    let source = match (url, pdf, text) {
        (Some(url), None, None) => ContentSource::blog_url(&url)?,
        (None, Some(path), None) => {
            let bytes = std::fs::read(&path)
                .map_err(|e| anyhow::anyhow!("Could not read {}: {}", path.display(), e))?;
            ContentSource::pdf_document(bytes)?
        }
        (None, None, Some(text)) => ContentSource::raw_text(&text)?,
        _ => {
            Output::warning("Provide exactly one of --url, --pdf, or --text.");
            anyhow::bail!("exactly one input source is required");
        }
    };

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Generate(source.kind()), &settings, &credentials) {
        Output::error(&format!("{}", e));
        Output::info("Run 'prat doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let pipeline = PodcastPipeline::new(&settings, &credentials)?;

    let spinner = Output::spinner("Scraping, summarizing and generating podcast...");

    match pipeline.generate(source).await {
        Ok(podcast) => {
            spinner.finish_and_clear();
            Output::success("Podcast generated successfully");

            Output::header("Summary");
            println!("{}\n", podcast.summary);

            Output::kv("Audio file", &podcast.audio.path.display().to_string());
            Output::kv("Download as", &podcast.audio.format.download_name());
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Podcast generation failed ({}): {}", e.category(), e));
            return Err(e.into());
        }
    }

    Ok(())
}
