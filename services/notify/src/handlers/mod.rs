pub mod email;
pub mod whatsapp;

use axum::extract::FromRequest;

use crate::error::NotifyServiceError;

/// `axum::Json` whose rejections answer with the `{kind, message}` error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(NotifyServiceError))]
pub struct JsonBody<T>(pub T);
