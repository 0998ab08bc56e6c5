//! Route definitions for the `/tasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comment, task};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                -> list (tasks in my projects)
/// POST   /                -> create
/// GET    /{id}            -> get_by_id (with comments)
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/comments   -> comment::list
/// POST   /{id}/comments   -> comment::add
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/comments", get(comment::list).post(comment::add))
}
