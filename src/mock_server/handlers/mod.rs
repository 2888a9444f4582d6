//! Endpoint handlers for the mock Bugspad server.

mod bugs;
mod catalog;

pub use bugs::*;
pub use catalog::*;

use axum::response::{IntoResponse, Response};
use axum::Json;

/// The body the real server sends on bad credentials: a JSON-encoded
/// string, HTTP status still 200.
pub(crate) fn auth_failure() -> Response {
    Json("Authentication failure.").into_response()
}
