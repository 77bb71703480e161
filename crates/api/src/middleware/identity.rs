//! Caller identity extractor.
//!
//! The backend has no authentication. Every simulated user identifies itself
//! with the `x-user-id` header, and that value becomes the lease holder id
//! passed explicitly into the core.

use arcade_core::collaboration::validate_holder_id;
use arcade_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;

use crate::error::AppError;

/// Header carrying the caller identity.
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// The caller identity taken from the `x-user-id` header.
///
/// ```ignore
/// async fn my_handler(caller: CallerId) -> AppResult<Json<()>> {
///     tracing::info!(holder_id = %caller.0, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CallerId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(&USER_ID_HEADER)
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation("Missing x-user-id header".into()))
            })?
            .to_str()
            .map_err(|_| {
                AppError::Core(CoreError::Validation(
                    "x-user-id header must be visible ASCII".into(),
                ))
            })?
            .trim();

        validate_holder_id(value).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

        Ok(CallerId(value.to_string()))
    }
}
