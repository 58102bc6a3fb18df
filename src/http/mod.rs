//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → sass::SassHandler (blocking pool)
//!         → Respond: response.rs (SassResponse → HTTP response)
//!         → Declined: static files from the document root
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use response::SassResponse;
pub use server::HttpServer;
