//! HTTP serving wrapper around an embedding engine.

pub mod engine;
pub mod protocol;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ServeError;
use crate::models::Config;

use self::engine::{Embedder, FastembedEngine};
use self::protocol::{EmbedRequest, EmbedResponse, ErrorResponse, HealthResponse};

#[derive(Clone)]
struct AppState {
    engine: Arc<dyn Embedder>,
}

/// Build the wrapper's router over any engine. Split out so tests can
/// drive the contract with a stub.
pub fn router(engine: Arc<dyn Embedder>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/embed", post(embed))
        .with_state(AppState { engine })
        .layer(TraceLayer::new_for_http())
}

/// Load the configured model and serve the embedding contract until the
/// process is stopped.
pub async fn run_server(config: &Config) -> Result<(), ServeError> {
    info!(model = %config.embedding.model, "loading embedding model");
    let engine = FastembedEngine::load(&config.embedding.model)?;
    info!(dimensions = engine.dimension(), "model loaded");

    if engine.dimension() != config.embedding.dimension {
        warn!(
            loaded = engine.dimension(),
            configured = config.embedding.dimension,
            "model dimension differs from configured collection dimension"
        );
    }

    serve(Arc::new(engine), config.server.port).await
}

/// Bind and serve the given engine on `port`.
pub async fn serve(engine: Arc<dyn Embedder>, port: u16) -> Result<(), ServeError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "embedding service listening");
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.engine.model_id().to_string(),
        dimensions: state.engine.dimension(),
    })
}

async fn embed(
    State(state): State<AppState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(text) = request.text {
        let mut vectors = run_engine(&state, vec![text])?;
        let embedding = vectors
            .pop()
            .ok_or_else(|| error_response(StatusCode::INTERNAL_SERVER_ERROR, "engine returned no embedding"))?;
        Ok(Json(EmbedResponse::Single { embedding }))
    } else if let Some(texts) = request.texts {
        let embeddings = run_engine(&state, texts)?;
        Ok(Json(EmbedResponse::Batch { embeddings }))
    } else {
        Err(error_response(
            StatusCode::BAD_REQUEST,
            "send {text: ...} or {texts: [...]}",
        ))
    }
}

fn run_engine(
    state: &AppState,
    texts: Vec<String>,
) -> Result<Vec<Vec<f32>>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .embed(texts)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
