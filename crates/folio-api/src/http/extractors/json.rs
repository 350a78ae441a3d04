//! `Json` and `Query` wrappers whose rejections use the error envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::http::error::AppError;

/// JSON body; malformed input becomes a 400 envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string; malformed input becomes a 400 envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
