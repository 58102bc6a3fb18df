//! Response produced by the stylesheet handler.
//!
//! # Responsibilities
//! - Carry status, content type and body out of the synchronous pipeline
//! - Convert into an axum response at the HTTP boundary
//!
//! # Design Decisions
//! - Bodies are fully buffered; compiled stylesheets are small
//! - 405 responses advertise the accepted methods

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

pub const CONTENT_TYPE_CSS: &str = "text/css";
pub const CONTENT_TYPE_SOURCE_MAP: &str = "application/json";
pub const CONTENT_TYPE_ERROR: &str = "text/plain";

/// A complete response from the stylesheet handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SassResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl SassResponse {
    pub fn new(status: StatusCode, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, CONTENT_TYPE_ERROR, "Method Not Allowed")
    }

    pub fn internal_error(body: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, CONTENT_TYPE_ERROR, body)
    }
}

impl IntoResponse for SassResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        if self.status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
        }
        response
    }
}
