//! REST API Server for the retirement advisor
//!
//! Exposes a single advisor session over HTTP for a chat UI

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

use crate::agent::{AdvisorSession, QuickAction, INCOMPLETE_PROFILE, SAMPLE_QUESTIONS};

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

struct SessionSlot {
    session_id: Uuid,
    session: AdvisorSession,
}

#[derive(Clone)]
pub struct ApiState {
    slot: Arc<Mutex<SessionSlot>>,
}

impl ApiState {
    pub fn new(session: AdvisorSession) -> Self {
        Self {
            slot: Arc::new(Mutex::new(SessionSlot {
                session_id: Uuid::new_v4(),
                session,
            })),
        }
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Questionnaire Endpoints
/// =============================

async fn current_question(State(state): State<ApiState>) -> Json<ApiResponse> {
    let mut slot = state.slot.lock().await;
    let session_id = slot.session_id;
    let (prompt, finished) = slot.session.current_prompt();

    Json(ApiResponse::success(serde_json::json!({
        "session_id": session_id,
        "prompt": prompt,
        "questionnaire_complete": finished,
    })))
}

async fn reset_session(State(state): State<ApiState>) -> Json<ApiResponse> {
    let mut slot = state.slot.lock().await;
    slot.session.reset();
    slot.session_id = Uuid::new_v4();
    let (prompt, _) = slot.session.current_prompt();

    info!(session_id = %slot.session_id, "Session reset");

    Json(ApiResponse::success(serde_json::json!({
        "session_id": slot.session_id,
        "prompt": prompt,
    })))
}

/// =============================
/// Chat Endpoints
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Message must not be empty".into())),
        );
    }

    let mut slot = state.slot.lock().await;
    info!(session_id = %slot.session_id, "Received chat message");

    let turn = slot.session.handle_message(&req.message).await;
    (StatusCode::OK, Json(ApiResponse::success(turn)))
}

async fn quick_action_handler(
    State(state): State<ApiState>,
    Path(action): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let action = match action.as_str() {
        "retirement-forecast" | "retirement_forecast" => QuickAction::RetirementForecast,
        "savings-analysis" | "savings_analysis" => QuickAction::SavingsAnalysis,
        other => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("Unknown quick action: {}", other))),
            )
        }
    };

    let slot = state.slot.lock().await;
    let reply = slot.session.quick_action(action).await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "action": action,
            "message": action.message(),
            "reply": reply,
        }))),
    )
}

async fn sample_questions() -> Json<ApiResponse> {
    Json(ApiResponse::success(SAMPLE_QUESTIONS))
}

/// =============================
/// Profile Endpoint
/// =============================

async fn profile_handler(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    let slot = state.slot.lock().await;

    match slot.session.overview() {
        Some(overview) => (StatusCode::OK, Json(ApiResponse::success(overview))),
        None => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error(INCOMPLETE_PROFILE.into())),
        ),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(session: AdvisorSession) -> Router {
    let state = ApiState::new(session);

    Router::new()
        .route("/health", get(health))
        .route("/api/question", get(current_question))
        .route("/api/chat", post(chat_handler))
        .route("/api/quick-actions/:action", post(quick_action_handler))
        .route("/api/sample-questions", get(sample_questions))
        .route("/api/profile", get(profile_handler))
        .route("/api/reset", post(reset_session))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    session: AdvisorSession,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(session);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
