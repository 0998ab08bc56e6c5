//! Domain layer for Project Pulse.
//!
//! Has no internal workspace dependencies so both the persistence layer and
//! the HTTP layer can share its types, validation rules, and the task board
//! state model.

pub mod board;
pub mod error;
pub mod member;
pub mod project;
pub mod roles;
pub mod task;
pub mod types;
