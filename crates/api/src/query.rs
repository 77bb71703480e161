//! Query parameter types shared across handler modules.

use serde::Deserialize;

/// `?window_secs=` for presence queries. Falls back to the configured window.
#[derive(Debug, Deserialize)]
pub struct WindowParams {
    pub window_secs: Option<i64>,
}

/// `?limit=` for "most recent" listings. Clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?email=` for user lookup.
#[derive(Debug, Deserialize)]
pub struct EmailParams {
    pub email: String,
}
