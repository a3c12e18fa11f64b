//! Frontend Errors
//!
//! Failures raised by the registry and routing bindings.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { status: u16, url: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{entity} has no id")]
    MissingId { entity: &'static str },

    #[error("routing service returned no route")]
    NoRoute,

    #[error("routing service answered with code {0}")]
    Routing(String),
}
