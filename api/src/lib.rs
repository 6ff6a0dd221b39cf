pub mod citation;
pub mod config;
pub mod cors;
pub mod error;

use axum::{
    http::{StatusCode, Uri},
    middleware,
    routing::post,
    Json, Router,
};
use citation_system::{CompletionClient, OpenAiService};
use std::sync::Arc;

pub use config::Config;
pub use error::{ApiError, ApiResult, ErrorBody};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no OpenAI key was configured; requests then fail with
    /// [`ApiError::Misconfigured`].
    pub completions: Option<Arc<dyn CompletionClient>>,
}

impl AppState {
    pub fn new(config: Config, completions: Option<Arc<dyn CompletionClient>>) -> Self {
        Self {
            config: Arc::new(config),
            completions,
        }
    }

    /// Wires the OpenAI client up from configuration.
    pub fn from_config(config: Config) -> Self {
        let completions = config.openai_api_key.as_ref().map(|key| {
            Arc::new(OpenAiService::new(key.clone(), config.openai_base_url.clone()))
                as Arc<dyn CompletionClient>
        });
        Self::new(config, completions)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/generate-citation", post(citation::generate_citation))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(cors::cors_middleware))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    log::debug!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            detail: "Not Found".to_string(),
        }),
    )
}
