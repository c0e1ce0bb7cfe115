//! Configuration module for Prat.
//!
//! Handles loading application settings and startup credentials.

mod settings;

pub use settings::{
    Credentials, GeneralSettings, ScraperSettings, Settings, SummarizerSettings,
    SynthesisSettings, SynthesisStrategy, ELEVENLABS_API_KEY_VAR, FIRECRAWL_API_KEY_VAR,
    OPENAI_API_KEY_VAR,
};
