pub mod auth;
pub mod board;
pub mod comment;
pub mod member;
pub mod project;
pub mod project_member;
pub mod task;
pub mod user;
