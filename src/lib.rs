//! On-the-fly Sass/SCSS compilation for HTTP servers.
//!
//! Requests for `.css` (and `.map`) files that have a sibling `.sass` or
//! `.scss` source are compiled on demand; everything else falls through to
//! static file serving.

pub mod cascade;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod sass;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use sass::SassHandler;
