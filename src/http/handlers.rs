use super::socket::handle_socket;
use super::state::AppState;
use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};

const CHAT_PAGE: &str = include_str!("chat.html");

/// GET / (and any unrouted path)
/// Upgrade to the chat WebSocket
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// GET /chat
/// Serve the chat page
pub async fn chat_page() -> impl IntoResponse {
    Html(CHAT_PAGE)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
