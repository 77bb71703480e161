//! JSON body extractor with the application's error envelope.
//!
//! `axum::Json` rejects malformed bodies with a plain-text 4xx. [`AppJson`]
//! routes the same rejection through [`AppError`] so clients always get
//! `{ "error", "code" }`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, OptionalFromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Drop-in replacement for `axum::Json` as a request extractor.
///
/// As `Option<AppJson<T>>` it yields `None` when the request carries no
/// `Content-Type`, which lets bodies be optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

impl<T, S> OptionalFromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        if !req.headers().contains_key(CONTENT_TYPE) {
            return Ok(None);
        }
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(Some(AppJson(value)))
    }
}
