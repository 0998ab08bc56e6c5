//! Request extractors whose rejections use the error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` for request bodies, rejecting with [`AppError::BadRequest`]
/// instead of axum's plain-text 4xx.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
