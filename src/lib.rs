//! Prat - Blog to Podcast
//!
//! A CLI tool and small web app for turning written content into short audio podcasts.
//!
//! The name "Prat" comes from the Norwegian word for "talk."
//!
//! # Overview
//!
//! Prat allows you to:
//! - Summarize a blog post, a PDF document, or pasted text into a short casual script
//! - Convert that script into audio with a hosted text-to-speech service
//! - Play and download the result from a single-page web UI or the terminal
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings and startup credentials
//! - `content` - Content source descriptors and PDF text extraction
//! - `scrape` - Blog scraping abstraction (Firecrawl)
//! - `summarize` - Summarization abstraction (OpenAI)
//! - `synthesis` - Speech synthesis strategies (ElevenLabs direct, bundled chat audio)
//! - `store` - Generated audio persistence
//! - `pipeline` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use prat::config::{Credentials, Settings};
//! use prat::content::ContentSource;
//! use prat::pipeline::PodcastPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env();
//!     let pipeline = PodcastPipeline::new(&settings, &credentials)?;
//!
//!     let source = ContentSource::blog_url("https://example.com/post")?;
//!     let podcast = pipeline.generate(source).await?;
//!     println!("Saved {}", podcast.audio.path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod scrape;
pub mod store;
pub mod summarize;
pub mod synthesis;

pub use error::{PratError, Result};
