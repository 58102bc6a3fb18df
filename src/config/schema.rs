//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::cascade::SassOptions;

/// Handler identifier the stylesheet handler answers to.
pub const SASS_HANDLER: &str = "sass-script";

/// Root configuration for the stylesheet server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Document root and handler table.
    pub server: SiteConfig,

    /// Options for the outermost scope.
    pub sass: SassOptions,

    /// Per-directory overrides, inherited down the path hierarchy.
    pub scopes: Vec<ScopeConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Where requests map on disk and which handler owns which extension.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory URL paths are resolved against.
    pub document_root: String,

    /// Serve declined requests as static files.
    pub serve_static: bool,

    /// Extension → handler table.
    pub handlers: Vec<HandlerMapping>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_root: "./public".to_string(),
            serve_static: true,
            handlers: vec![HandlerMapping {
                handler: SASS_HANDLER.to_string(),
                extensions: vec![".css".to_string(), ".map".to_string()],
            }],
        }
    }
}

impl SiteConfig {
    /// Handler tag registered for a file extension (with leading dot).
    pub fn handler_for(&self, extension: &str) -> Option<&str> {
        self.handlers
            .iter()
            .find(|m| m.extensions.iter().any(|e| e.eq_ignore_ascii_case(extension)))
            .map(|m| m.handler.as_str())
    }
}

/// Assigns a handler to a set of file extensions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerMapping {
    /// Handler identifier (e.g., "sass-script").
    pub handler: String,

    /// Extensions including the leading dot (e.g., ".css").
    pub extensions: Vec<String>,
}

/// Option overrides for a URL path and everything beneath it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScopeConfig {
    /// URL path prefix (e.g., "/assets").
    pub path: String,

    #[serde(flatten)]
    pub options: SassOptions,
}
