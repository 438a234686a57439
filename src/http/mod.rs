//! HTTP and WebSocket surface
//!
//! - GET / - WebSocket upgrade, one `ConnectionSession` per connection
//! - GET /chat - Static chat page
//! - GET /health - Health check

mod handlers;
mod routes;
mod socket;
mod state;

pub use routes::create_router;
pub use socket::handle_socket;
pub use state::AppState;
