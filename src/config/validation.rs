//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check scope paths and the handler table are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("document_root must not be empty")]
    EmptyDocumentRoot,
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
    #[error("scope path `{0}` must start with '/'")]
    RelativeScopePath(String),
    #[error("scope path `{0}` is declared more than once")]
    DuplicateScopePath(String),
    #[error("handler name must not be empty")]
    EmptyHandlerName,
    #[error("handler extension `{0}` must start with '.'")]
    BadExtension(String),
}

/// Check a parsed configuration, collecting every problem.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.document_root.trim().is_empty() {
        errors.push(ValidationError::EmptyDocumentRoot);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = HashSet::new();
    for scope in &config.scopes {
        if !scope.path.starts_with('/') {
            errors.push(ValidationError::RelativeScopePath(scope.path.clone()));
        }
        let normalized = scope.path.trim_end_matches('/');
        if !seen.insert(normalized.to_string()) {
            errors.push(ValidationError::DuplicateScopePath(scope.path.clone()));
        }
    }

    for mapping in &config.server.handlers {
        if mapping.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandlerName);
        }
        for ext in &mapping.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                errors.push(ValidationError::BadExtension(ext.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
