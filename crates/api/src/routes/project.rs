//! Route definitions for the `/projects` resource.
//!
//! Also nests the roster, task listing, and board routes under
//! `/projects/{id}/...`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{board, project, project_member, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update (owner)
/// DELETE /{id}                          -> delete (owner)
///
/// GET    /{id}/members                  -> project_member::list
/// POST   /{id}/members                  -> project_member::add (owner)
/// DELETE /{id}/members/{member_id}      -> project_member::remove (owner)
///
/// GET    /{id}/tasks                    -> task::list_by_project
///
/// GET    /{id}/board                    -> board::get_board
/// POST   /{id}/board/tasks              -> board::create_task
/// PUT    /{id}/board/tasks/{task_id}    -> board::update_task
/// POST   /{id}/board/move               -> board::move_task
/// POST   /{id}/board/assign             -> board::assign_task
/// ```
pub fn router() -> Router<AppState> {
    let board_routes = Router::new()
        .route("/", get(board::get_board))
        .route("/tasks", post(board::create_task))
        .route("/tasks/{task_id}", put(board::update_task))
        .route("/move", post(board::move_task))
        .route("/assign", post(board::assign_task));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/members",
            get(project_member::list).post(project_member::add),
        )
        .route(
            "/{id}/members/{member_id}",
            delete(project_member::remove),
        )
        .route("/{id}/tasks", get(task::list_by_project))
        .nest("/{id}/board", board_routes)
}
