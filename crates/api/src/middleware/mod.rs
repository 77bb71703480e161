//! Request extractors shared by handlers.
//!
//! - [`identity::CallerId`] -- the caller's identity from the `x-user-id` header.
//! - [`json::AppJson`] -- JSON bodies whose rejections use the error envelope.

pub mod identity;
pub mod json;
