//! HTTP relay in front of the upstream translator
//!
//! One translator, two transports:
//! - POST /api/translate - REST translate call
//! - GET /socket - WebSocket `translate-message` / `translated-text` events
//! - GET /api/languages - Selectable languages
//! - GET /health - Health check

mod handlers;
mod routes;
mod socket;
mod state;

pub use routes::create_router;
pub use state::AppState;
