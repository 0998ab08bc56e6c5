//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification, and policy checks.
//! - [`jwt`] -- JWT access tokens plus opaque refresh/reset token helpers.

pub mod jwt;
pub mod password;
