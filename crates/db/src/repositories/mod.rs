//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod board_repo;
pub mod comment_repo;
pub mod member_repo;
pub mod password_reset_repo;
pub mod project_member_repo;
pub mod project_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use board_repo::BoardRepo;
pub use comment_repo::CommentRepo;
pub use member_repo::MemberRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use project_member_repo::ProjectMemberRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
