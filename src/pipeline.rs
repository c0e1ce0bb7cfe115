//! Podcast generation pipeline.
//!
//! Coordinates one generation request from content source to saved audio:
//! resolve content (scrape or extract) → summarize → synthesize → persist.
//! Strictly sequential, no retries; every failure short-circuits with a
//! categorized error.

use crate::config::{Credentials, Settings};
use crate::content::{pdf, ContentSource};
use crate::error::{PratError, Result};
use crate::scrape::{FirecrawlScraper, Scraper};
use crate::store::{AudioStore, SavedAudio};
use crate::summarize::{OpenAiSummarizer, Summarizer};
use crate::synthesis::{create_synthesizer, AudioFormat, SpeechSynthesizer};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// A successfully generated podcast.
#[derive(Debug)]
pub struct Podcast {
    /// The summary text that was narrated.
    pub summary: String,
    /// Where the audio was written.
    pub audio: SavedAudio,
    /// Audio bytes, kept in memory for immediate playback.
    pub bytes: Vec<u8>,
}

/// The main pipeline for podcast generation.
pub struct PodcastPipeline {
    scraper: Arc<dyn Scraper>,
    summarizer: Arc<dyn Summarizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: AudioStore,
}

impl PodcastPipeline {
    /// Create a pipeline with real providers wired from configuration.
    ///
    /// A missing Firecrawl key surfaces when a blog-URL request arrives,
    /// not at construction.
    pub fn new(settings: &Settings, credentials: &Credentials) -> Result<Self> {
        let scraper: Arc<dyn Scraper> = match credentials.firecrawl_api_key.as_deref() {
            Some(key) => Arc::new(FirecrawlScraper::new(key, &settings.scraper.base_url)),
            None => Arc::new(UnconfiguredScraper),
        };

        let summarizer = Arc::new(OpenAiSummarizer::new(
            credentials.require_openai()?,
            &settings.summarizer.model,
            settings.summarizer.max_summary_chars,
        ));

        let synthesizer = create_synthesizer(settings, credentials)?;

        let store = AudioStore::new(settings.output_dir(), settings.synthesis.retain_last);

        Ok(Self {
            scraper,
            summarizer,
            synthesizer,
            store,
        })
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        scraper: Arc<dyn Scraper>,
        summarizer: Arc<dyn Summarizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: AudioStore,
    ) -> Self {
        Self {
            scraper,
            summarizer,
            synthesizer,
            store,
        }
    }

    /// The audio store backing this pipeline.
    pub fn store(&self) -> &AudioStore {
        &self.store
    }

    /// The audio format the configured synthesizer produces.
    pub fn output_format(&self) -> AudioFormat {
        self.synthesizer.format()
    }

    /// Run one generation request to completion.
    #[instrument(skip(self, source), fields(kind = %source.kind()))]
    pub async fn generate(&self, source: ContentSource) -> Result<Podcast> {
        info!("Generating podcast from {}", source.describe());

        let content = match &source {
            ContentSource::BlogUrl(url) => {
                info!("Scraping blog post");
                self.scraper.scrape(url).await?
            }
            ContentSource::PdfDocument(bytes) => {
                info!("Extracting PDF text");
                pdf::extract_text(bytes)?
            }
            ContentSource::RawText(text) => text.clone(),
        };

        info!("Summarizing {} characters", content.chars().count());
        let summary = self.summarizer.summarize(&content).await?;

        if summary.is_failure_narrative() {
            return Err(PratError::Summarize(format!(
                "The summarizer could not process the content: {}",
                preview(&summary.text)
            )));
        }

        info!("Synthesizing audio ({} chars)", summary.text.chars().count());
        let artifact = self.synthesizer.synthesize(&summary.text).await?;

        let audio = self.store.save(&artifact)?;
        info!("Podcast saved as {}", audio.file_name);

        Ok(Podcast {
            summary: summary.text,
            bytes: artifact.bytes,
            audio,
        })
    }
}

/// Scraper stand-in used when no Firecrawl key was provided.
struct UnconfiguredScraper;

#[async_trait]
impl Scraper for UnconfiguredScraper {
    async fn scrape(&self, _url: &str) -> Result<String> {
        Err(PratError::Config(
            "FIRECRAWL_API_KEY not set. Set it with: export FIRECRAWL_API_KEY='...'".to_string(),
        ))
    }
}

/// First line of a summary, bounded, for error messages.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() <= 120 {
        line.to_string()
    } else {
        let cut: String = line.chars().take(120).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::Summary;
    use crate::synthesis::AudioArtifact;
    use std::sync::Mutex;

    struct MockScraper {
        content: String,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockScraper {
        fn new(content: &str) -> Self {
            Self {
                content: content.to_string(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Scraper for MockScraper {
        async fn scrape(&self, url: &str) -> Result<String> {
            self.calls.lock().unwrap().push(url.to_string());
            Ok(self.content.clone())
        }
    }

    struct MockSummarizer {
        summary: String,
        fail_with: Option<String>,
        calls: Arc<Mutex<usize>>,
    }

    impl MockSummarizer {
        fn new(summary: &str) -> Self {
            Self {
                summary: summary.to_string(),
                fail_with: None,
                calls: Arc::new(Mutex::new(0)),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                summary: String::new(),
                fail_with: Some(message.to_string()),
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    #[async_trait]
    impl Summarizer for MockSummarizer {
        async fn summarize(&self, _content: &str) -> Result<Summary> {
            *self.calls.lock().unwrap() += 1;
            if let Some(ref message) = self.fail_with {
                return Err(PratError::OpenAI(message.clone()));
            }
            Ok(Summary {
                text: self.summary.clone(),
            })
        }
    }

    struct MockSynthesizer {
        fail_status: Option<u16>,
        calls: Arc<Mutex<usize>>,
    }

    impl MockSynthesizer {
        fn new() -> Self {
            Self {
                fail_status: None,
                calls: Arc::new(Mutex::new(0)),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                fail_status: Some(status),
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for MockSynthesizer {
        async fn synthesize(&self, _text: &str) -> Result<AudioArtifact> {
            *self.calls.lock().unwrap() += 1;
            if let Some(status) = self.fail_status {
                return Err(PratError::SynthesisApi {
                    status,
                    message: "Unauthorized".to_string(),
                });
            }
            Ok(AudioArtifact {
                bytes: vec![1, 2, 3, 4],
                format: AudioFormat::Mp3,
            })
        }

        fn format(&self) -> AudioFormat {
            AudioFormat::Mp3
        }
    }

    fn build_pipeline(
        scraper: MockScraper,
        summarizer: MockSummarizer,
        synthesizer: MockSynthesizer,
        dir: &std::path::Path,
    ) -> PodcastPipeline {
        PodcastPipeline::with_components(
            Arc::new(scraper),
            Arc::new(summarizer),
            Arc::new(synthesizer),
            AudioStore::new(dir, None),
        )
    }

    fn generated_files(dir: &std::path::Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_raw_text_happy_path() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = build_pipeline(
            MockScraper::new(""),
            MockSummarizer::new("Today we're talking about a short test paragraph."),
            MockSynthesizer::new(),
            dir.path(),
        );

        let source = ContentSource::raw_text("Short test paragraph.").unwrap();
        let podcast = pipeline.generate(source).await.unwrap();

        assert_eq!(podcast.summary, "Today we're talking about a short test paragraph.");
        assert!(podcast.audio.file_name.ends_with(".mp3"));
        assert_eq!(podcast.audio.format.download_name(), "generated_podcast.mp3");
        assert!(podcast.audio.path.exists());
        assert_eq!(podcast.bytes, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_blog_url_routes_through_scraper() {
        let dir = tempfile::tempdir().unwrap();
        let scraper = MockScraper::new("# Post\n\nScraped body.");
        let scraper_calls = scraper.calls.clone();
        let pipeline = build_pipeline(
            scraper,
            MockSummarizer::new("A friendly rundown of the post."),
            MockSynthesizer::new(),
            dir.path(),
        );

        let source = ContentSource::blog_url("https://example.com/post").unwrap();
        pipeline.generate(source).await.unwrap();

        let calls = scraper_calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["https://example.com/post"]);
    }

    #[tokio::test]
    async fn test_failure_narrative_halts_before_synthesis() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = MockSynthesizer::new();
        let synth_calls = synthesizer.calls.clone();
        let pipeline = build_pipeline(
            MockScraper::new("whatever"),
            MockSummarizer::new("I had trouble accessing the blog post you linked."),
            synthesizer,
            dir.path(),
        );

        let source = ContentSource::blog_url("https://example.com/post").unwrap();
        let err = pipeline.generate(source).await.unwrap_err();

        assert_eq!(err.category(), "summarization");
        assert_eq!(*synth_calls.lock().unwrap(), 0);
        assert!(generated_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_summarizer_api_failure_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = build_pipeline(
            MockScraper::new(""),
            MockSummarizer::failing("quota exceeded"),
            MockSynthesizer::new(),
            dir.path(),
        );

        let source = ContentSource::raw_text("Some content.").unwrap();
        let err = pipeline.generate(source).await.unwrap_err();

        assert_eq!(err.category(), "summarization");
        assert!(generated_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_synthesis_http_error_surfaces_status_and_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = build_pipeline(
            MockScraper::new(""),
            MockSummarizer::new("A perfectly good summary."),
            MockSynthesizer::failing(401),
            dir.path(),
        );

        let source = ContentSource::raw_text("Some content.").unwrap();
        let err = pipeline.generate(source).await.unwrap_err();

        assert_eq!(err.category(), "synthesis");
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("Unauthorized"));
        assert!(generated_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_pdf_halts_before_summarization() {
        let dir = tempfile::tempdir().unwrap();
        let summarizer = MockSummarizer::new("unused");
        let summarizer_calls = summarizer.calls.clone();
        let pipeline = build_pipeline(
            MockScraper::new(""),
            summarizer,
            MockSynthesizer::new(),
            dir.path(),
        );

        let source = ContentSource::pdf_document(b"not a real pdf".to_vec()).unwrap();
        let err = pipeline.generate(source).await.unwrap_err();

        assert_eq!(err.category(), "extraction");
        assert_eq!(*summarizer_calls.lock().unwrap(), 0);
        assert!(generated_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_scraper_reports_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = PodcastPipeline::with_components(
            Arc::new(UnconfiguredScraper),
            Arc::new(MockSummarizer::new("unused")),
            Arc::new(MockSynthesizer::new()),
            AudioStore::new(dir.path(), None),
        );

        let source = ContentSource::blog_url("https://example.com/post").unwrap();
        let err = pipeline.generate(source).await.unwrap_err();
        assert!(err.to_string().contains("FIRECRAWL_API_KEY"));
    }
}
