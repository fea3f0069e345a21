//! HTTP surface of the Sphere one-time passcode service
//!
//! - `POST /api/auth/send-otp` issues and texts a code
//! - `POST /api/auth/verify-otp` checks and consumes it
//! - `GET /health` reports liveness and store reachability

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
