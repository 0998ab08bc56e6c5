pub mod auth;
pub mod health;
pub mod member;
pub mod project;
pub mod task;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                                  register (public)
/// /login                                     login (public)
/// /refresh                                   rotate refresh token (public)
/// /logout                                    logout (requires auth)
/// /forgot-password                           request reset token (public)
/// /reset-password                            consume reset token (public)
/// /update-password                           change password (requires auth)
///
/// /user                                      current user (GET)
///
/// /projects                                  list mine, create
/// /projects/{id}                             get, update, delete
/// /projects/{id}/members                     list, add
/// /projects/{id}/members/{member_id}         remove (DELETE)
/// /projects/{id}/tasks                       list with assignee (GET)
/// /projects/{id}/board                       board view (?member_id)
/// /projects/{id}/board/tasks                 create on board (POST)
/// /projects/{id}/board/tasks/{task_id}       edit on board (PUT)
/// /projects/{id}/board/move                  move between columns (POST)
/// /projects/{id}/board/assign                set or clear assignee (POST)
///
/// /tasks                                     list mine, create
/// /tasks/{id}                                get, update, delete
/// /tasks/{id}/comments                       list, add
///
/// /members                                   list, create
/// /members/{id}                              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and password lifecycle.
        .merge(auth::router())
        .route("/user", get(handlers::user::me))
        // Projects, their rosters, and their boards.
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/members", member::router())
}
