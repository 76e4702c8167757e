//! HTTP + WebSocket API for handmode
//!
//! Endpoints:
//! - POST /session/new - Create recognizer session
//! - GET /session/{id} - Get session status
//! - POST /session/{id}/frame - Process one hand frame
//! - POST /session/{id}/context - Deliver a browser/music probe reading
//! - POST /session/{id}/toggle - Explicit mode toggle
//! - POST /session/{id}/reset - Clear transient state
//! - GET /modes/{mode}/table - Gesture→action table of one mode
//! - WS /ws/{id} - Live updates
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::core::{GestureRecognizer, ModeProfile};
use crate::types::{
    Action, ContextSignal, FrameOutput, Gesture, HandFrame, Mode, ModeError, ModeTransition,
    RecognizerConfig, RecognizerState,
};

/// Session state
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub recognizer: GestureRecognizer,
    pub update_tx: broadcast::Sender<SessionUpdate>,
}

/// Live update message
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    pub mode: Mode,
    pub gesture: Option<String>,
    pub action: Option<String>,
    pub sustained: bool,
    pub reason: String,
    pub transitions: Vec<ModeTransition>,
    pub frames_processed: u64,
}

impl SessionUpdate {
    fn from_frame(output: &FrameOutput, frames_processed: u64) -> Self {
        Self {
            mode: output.mode,
            gesture: output.gesture.map(|g| g.as_str().to_string()),
            action: output.action.map(|a| a.as_str().to_string()),
            sustained: output.sustained,
            reason: output.reason.code().to_string(),
            transitions: output.transition.iter().cloned().collect(),
            frames_processed,
        }
    }

    fn from_transitions(state: &RecognizerState, transitions: Vec<ModeTransition>) -> Self {
        let reason = transitions
            .last()
            .map(|t| t.cause.reason().code().to_string())
            .unwrap_or_default();
        Self {
            mode: state.mode,
            gesture: state.current_gesture.map(|g| g.as_str().to_string()),
            action: None,
            sustained: false,
            reason,
            transitions,
            frames_processed: state.frames_processed,
        }
    }
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    pub default_config: RecognizerConfig,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub config: Option<RecognizerConfig>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub state: RecognizerState,
}

/// Context reading response
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub mode: Mode,
    pub transitions: Vec<ModeTransition>,
}

/// One row of a mode's action table
#[derive(Debug, Serialize)]
pub struct TableEntry {
    pub gesture: Gesture,
    pub action: Action,
}

/// Action table response
#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub mode: Mode,
    pub table: Vec<TableEntry>,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router(default_config: RecognizerConfig) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        default_config,
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/frame", post(process_frame))
        .route("/session/:id/context", post(observe_context))
        .route("/session/:id/toggle", post(toggle_mode))
        .route("/session/:id/reset", post(reset_session))
        .route("/modes/:mode/table", get(mode_table))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let config = req.config.unwrap_or_else(|| state.default_config.clone());
    let recognizer = GestureRecognizer::new(config).map_err(|e| {
        warn!(error = %e, "rejected session config");
        StatusCode::BAD_REQUEST
    })?;

    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);

    let session = Session {
        id: session_id.clone(),
        recognizer,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, "session created");

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        state: session.recognizer.state(),
    }))
}

/// Process one frame
async fn process_frame(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(frame): Json<HandFrame>,
) -> Result<Json<FrameOutput>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let output = session.recognizer.process_frame(&frame);
    let frames = session.recognizer.state().frames_processed;
    let _ = session.update_tx.send(SessionUpdate::from_frame(&output, frames));

    Ok(Json(output))
}

/// Deliver a context probe reading
async fn observe_context(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(signal): Json<ContextSignal>,
) -> Result<Json<ContextResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let transitions = session.recognizer.observe_context(signal);
    if !transitions.is_empty() {
        let update = SessionUpdate::from_transitions(&session.recognizer.state(), transitions.clone());
        let _ = session.update_tx.send(update);
    }

    Ok(Json(ContextResponse {
        mode: session.recognizer.mode(),
        transitions,
    }))
}

/// Explicit toggle
async fn toggle_mode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ModeTransition>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let transition = session.recognizer.request_toggle();
    let update = SessionUpdate::from_transitions(&session.recognizer.state(), vec![transition.clone()]);
    let _ = session.update_tx.send(update);

    Ok(Json(transition))
}

/// Clear transient state
async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    session.recognizer.reset();

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        state: session.recognizer.state(),
    }))
}

/// Action table for a mode named in the path
async fn mode_table(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TableResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mode: Mode = name.parse().map_err(|e: ModeError| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                code: e.code().to_string(),
                error: format!("{}: {}", e, name),
            }),
        )
    })?;

    let table = ModeProfile::for_mode(mode, &state.default_config)
        .table()
        .iter()
        .map(|&(gesture, action)| TableEntry { gesture, action })
        .collect();

    Ok(Json(TableResponse { mode, table }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward updates until either side hangs up
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<SessionUpdate>) {
    let (mut sender, mut receiver) = socket.split();

    let mut forward = tokio::spawn(async move {
        while let Ok(update) = rx.recv().await {
            let json = serde_json::to_string(&update).unwrap_or_default();
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let mut inbound = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut forward => inbound.abort(),
        _ = &mut inbound => forward.abort(),
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("session_{:x}_{}", nanos, seq)
}

/// Run the API server
pub async fn run_server(addr: &str, default_config: RecognizerConfig) -> anyhow::Result<()> {
    let router = create_router(default_config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("handmode API running on {}", addr);
    info!("  POST /session/new         - Create session");
    info!("  GET  /session/:id         - Get status");
    info!("  POST /session/:id/frame   - Process frame");
    info!("  POST /session/:id/context - Context probe reading");
    info!("  POST /session/:id/toggle  - Toggle mode");
    info!("  POST /session/:id/reset   - Reset transient state");
    info!("  GET  /modes/:mode/table   - Action table");
    info!("  WS   /ws/:id              - Live updates");
    info!("  GET  /health              - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
