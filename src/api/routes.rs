//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::PlannerConfig;
use crate::core::TripPlanner;
use crate::error::PlannerError;
use crate::types::{TripPlan, TripRequest};

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub config: PlannerConfig,
    /// `None` until a model credential is configured
    pub planner: Option<TripPlanner>,
}

impl AppState {
    pub fn new(config: PlannerConfig, planner: Option<TripPlanner>) -> Self {
        Self { config, planner }
    }

    /// Build the state from configuration. A missing credential is not fatal
    /// here; each planning request reports it instead.
    pub fn from_config(config: PlannerConfig) -> Self {
        let planner = match TripPlanner::from_config(&config) {
            Ok(planner) => Some(planner),
            Err(err) => {
                tracing::warn!("Trip planner disabled: {}", err);
                None
            }
        };
        Self::new(config, planner)
    }
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_error_payload())).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/plan-trip", post(plan_trip))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: PlannerConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = Arc::new(AppState::from_config(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "configured": state.planner.is_some(),
        "model": state.config.model,
    }))
}

async fn plan_trip(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TripPlan>, PlannerError> {
    let Json(body) =
        payload.map_err(|rejection| PlannerError::InvalidRequest(rejection.body_text()))?;
    let request = TripRequest::from_json(&body)?;

    let planner = state
        .planner
        .as_ref()
        .ok_or_else(|| PlannerError::Config("OpenAI API key not configured".to_string()))?;

    match planner.plan(&request).await {
        Ok(plan) => Ok(Json(plan)),
        Err(err) => {
            tracing::error!("Trip planning pipeline failed: {}", err);
            Err(err)
        }
    }
}
