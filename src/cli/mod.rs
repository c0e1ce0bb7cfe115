//! CLI module for Prat.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Prat - Blog to Podcast
///
/// Turn blogs, PDFs, and notes into short audio podcasts.
/// The name "Prat" comes from the Norwegian word for "talk."
#[derive(Parser, Debug)]
#[command(name = "prat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Prat and write a default configuration
    Init,

    /// Check credentials and configuration
    Doctor,

    /// Generate a podcast from a blog URL, a PDF file, or raw text
    Generate {
        /// Blog URL to scrape and summarize
        #[arg(long)]
        url: Option<String>,

        /// Path to a PDF file to summarize
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Raw text to summarize
        #[arg(long)]
        text: Option<String>,

        /// Synthesis strategy override (direct, bundled)
        #[arg(short, long)]
        strategy: Option<String>,
    },

    /// Start the web UI and HTTP API server
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value = "7860")]
        port: u16,
    },
}
