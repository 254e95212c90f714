//! # cellestial-api
//!
//! HTTP API layer for the Cellestial backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Hosted checkout session creation
//! - Avatar uploads forwarded to the media provider
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Liveness text |
//! | GET | `/health` | Health check |
//! | POST | `/create-checkout-session` | Create checkout session |
//! | POST | `/api/upload-avatar` | Upload avatar image |

pub mod handlers;
pub mod logging;
pub mod routes;
pub mod state;
pub mod upload;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
