use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // WebSocket endpoint lives at the page origin
        .route("/", get(handlers::ws_upgrade))
        // Chat page
        .route("/chat", get(handlers::chat_page))
        // Health check
        .route("/health", get(handlers::health_check))
        // The channel is the same whatever path the client dials
        .fallback(handlers::ws_upgrade)
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::UnavailableClient;
    use crate::session::SessionConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(AppState::new(
            Arc::new(UnavailableClient),
            SessionConfig::default(),
        ))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let resp = router().oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chat_page_is_html() {
        let resp = router().oneshot(get("/chat")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_plain_get_on_socket_route_is_rejected() {
        // No upgrade headers, so the WebSocket extractor refuses the request
        let resp = router().oneshot(get("/")).await.unwrap();
        assert!(resp.status().is_client_error());

        let resp = router().oneshot(get("/anything")).await.unwrap();
        assert!(resp.status().is_client_error());
    }
}
