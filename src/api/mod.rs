//! REST Bindings
//!
//! Frontend bindings to the CRUD backend and the routing service, organized by domain.

mod registry;
mod route;

use reqwest::Response;

use crate::error::{ApiError, ApiResult};

// Re-export all public items
pub use registry::*;
pub use route::*;

/// Read the body of a successful response, or fail with its status
async fn success_body(response: Response, url: &str) -> ApiResult<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}
