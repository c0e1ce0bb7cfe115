//! Web UI and HTTP API server.
//!
//! Serves the single-page generation form, a JSON generation endpoint, and
//! playback/download of generated audio files.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{self, Credentials, Settings};
use crate::content::ContentSource;
use crate::error::PratError;
use crate::pipeline::PodcastPipeline;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use console::style;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

const INDEX_HTML: &str = include_str!("index.html");

/// Shared application state.
struct AppState {
    pipeline: PodcastPipeline,
}

/// Run the web server.
pub async fn run_serve(
    host: &str,
    port: u16,
    settings: Settings,
    credentials: Credentials,
) -> anyhow::Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Serve, &settings, &credentials) {
        Output::error(&format!("{}", e));
        Output::info("Run 'prat doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let pipeline = PodcastPipeline::new(&settings, &credentials)?;

    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .route("/audio/{file}", get(audio))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Prat Server");
    println!();
    println!("API keys:");
    for (var, present) in [
        (config::OPENAI_API_KEY_VAR, credentials.openai_api_key.is_some()),
        (config::ELEVENLABS_API_KEY_VAR, credentials.elevenlabs_api_key.is_some()),
        (config::FIRECRAWL_API_KEY_VAR, credentials.firecrawl_api_key.is_some()),
    ] {
        let icon = if present { style("✓").green() } else { style("✗").red() };
        println!("  {} {}", icon, var);
    }
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Web UI", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Generate", "POST /api/generate");
    Output::kv("Audio", "GET  /audio/:file");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Serialize)]
struct GenerateResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
}

impl GenerateResponse {
    fn failure(error: &PratError) -> Self {
        Self {
            success: false,
            summary: None,
            audio_url: None,
            download_name: None,
            generated_at: None,
            error: Some(error.to_string()),
            category: Some(error.category()),
        }
    }
}

#[derive(Deserialize)]
struct AudioQuery {
    #[serde(default)]
    download: Option<u8>,
}

// === Handlers ===

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> impl IntoResponse {
    let source = match read_source(multipart).await {
        Ok(source) => source,
        Err(e) => return failure_response(&e),
    };

    match state.pipeline.generate(source).await {
        Ok(podcast) => Json(GenerateResponse {
            success: true,
            summary: Some(podcast.summary),
            audio_url: Some(format!("/audio/{}", podcast.audio.file_name)),
            download_name: Some(podcast.audio.format.download_name()),
            generated_at: Some(chrono::Utc::now().to_rfc3339()),
            error: None,
            category: None,
        })
        .into_response(),
        Err(e) => failure_response(&e),
    }
}

/// Read the multipart form into a validated content source.
async fn read_source(mut multipart: Multipart) -> crate::error::Result<ContentSource> {
    let mut mode: Option<String> = None;
    let mut url: Option<String> = None;
    let mut text: Option<String> = None;
    let mut file: Option<Vec<u8>> = None;

    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| PratError::InvalidInput(format!("Malformed upload: {}", e)))?;
        let Some(field) = field else { break };

        match field.name().unwrap_or_default() {
            "mode" => {
                mode = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| PratError::InvalidInput(e.to_string()))?,
                )
            }
            "url" => {
                url = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| PratError::InvalidInput(e.to_string()))?,
                )
            }
            "text" => {
                text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| PratError::InvalidInput(e.to_string()))?,
                )
            }
            "file" => {
                file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| PratError::InvalidInput(e.to_string()))?
                        .to_vec(),
                )
            }
            _ => {}
        }
    }

    match mode.as_deref() {
        Some("url") => ContentSource::blog_url(url.as_deref().unwrap_or_default()),
        Some("pdf") => ContentSource::pdf_document(file.unwrap_or_default()),
        Some("text") => ContentSource::raw_text(text.as_deref().unwrap_or_default()),
        _ => Err(PratError::InvalidInput("Unknown input mode".to_string())),
    }
}

fn failure_response(error: &PratError) -> axum::response::Response {
    tracing::error!("Generation failed ({}): {}", error.category(), error);
    let status = match error.category() {
        "invalid-input" => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(GenerateResponse::failure(error))).into_response()
}

async fn audio(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
    Query(query): Query<AudioQuery>,
) -> impl IntoResponse {
    let bytes = match state.pipeline.store().read(&file) {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    };

    let (mime, download_name) = if file.ends_with(".wav") {
        ("audio/wav", "generated_podcast.wav")
    } else {
        ("audio/mpeg", "generated_podcast.mp3")
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    if query.download.unwrap_or(0) != 0 {
        if let Ok(value) =
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", download_name))
        {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
    }

    (headers, bytes).into_response()
}
