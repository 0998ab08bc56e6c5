//! Route definitions for authentication and password management.
//!
//! Mounted directly under `/api/v1` (no `/auth` prefix).

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Authentication routes.
///
/// ```text
/// POST /register         -> register
/// POST /login            -> login
/// POST /refresh          -> refresh
/// POST /logout           -> logout (requires auth)
/// POST /forgot-password  -> forgot_password
/// POST /reset-password   -> reset_password
/// POST /update-password  -> update_password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route("/update-password", post(auth::update_password))
}
