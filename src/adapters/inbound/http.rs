//! HTTP surface: planning, trajectory storage, the live channel and the
//! bundled web UI.

use super::ws::{websocket_handler, ConnectionManager};
use crate::application::CoverageService;
use crate::common::DomainError;
use crate::domains::coverage::{NewTrajectory, PlanInput, Trajectory, TrajectoryPoint};
use crate::domains::logger::DynLogger;
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CoverageService>,
    pub connections: Arc<ConnectionManager>,
    pub logger: DynLogger,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(service: Arc<CoverageService>, logger: DynLogger, static_dir: PathBuf) -> Self {
        Self {
            service,
            connections: Arc::new(ConnectionManager::new()),
            logger,
            static_dir,
        }
    }
}

pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Domain errors rendered as `{"detail": ...}` with a matching status code.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            DomainError::InvalidInput { reason } => (StatusCode::BAD_REQUEST, reason.clone()),
            DomainError::TrajectoryNotFound { .. } => {
                (StatusCode::NOT_FOUND, "Trajectory not found".to_string())
            }
            other => {
                // Store errors can carry paths and SQL; keep them in the logs only.
                tracing::error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_DETAIL.to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/plan", post(plan_trajectory))
        .route("/trajectory", post(save_trajectory))
        .route("/trajectory/:id", get(get_trajectory))
        .route("/trajectories", get(list_trajectories))
        .route("/ws/trajectory", get(websocket_handler))
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    state.logger.info(&format!("Incoming request: {} {}", method, uri));

    let start = Instant::now();
    let response = next.run(request).await;
    state.logger.info(&format!(
        "Completed request: {} {} in {:.4} seconds",
        method,
        uri,
        start.elapsed().as_secs_f64()
    ));
    response
}

async fn index(State(state): State<AppState>) -> Response {
    let page = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&page).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            state.logger.warn(&format!("Cannot read {}: {}", page.display(), e));
            (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
        }
    }
}

/// POST /plan
/// Zig-zag coverage path for the wall, skipping points inside obstacles.
async fn plan_trajectory(
    State(state): State<AppState>,
    Json(input): Json<PlanInput>,
) -> Result<Json<Vec<TrajectoryPoint>>, ApiError> {
    Ok(Json(state.service.plan(&input)?))
}

/// POST /trajectory
async fn save_trajectory(
    State(state): State<AppState>,
    Json(body): Json<NewTrajectory>,
) -> Result<Json<Trajectory>, ApiError> {
    let saved = state.service.save(body).await?;
    let notice = json!({ "event": "trajectory_saved", "id": saved.id }).to_string();
    state.connections.broadcast(&notice).await;
    Ok(Json(saved))
}

/// GET /trajectory/:id
async fn get_trajectory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Trajectory>, ApiError> {
    Ok(Json(state.service.get(id).await?))
}

/// GET /trajectories, newest first
async fn list_trajectories(State(state): State<AppState>) -> Result<Json<Vec<Trajectory>>, ApiError> {
    Ok(Json(state.service.list().await?))
}
