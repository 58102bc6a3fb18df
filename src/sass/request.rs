//! Read-only view of an inbound request.
//!
//! # Responsibilities
//! - Map the URL path onto the document root
//! - Look up the handler tag registered for the path's extension
//! - Derive the configuration scope (the URL directory)
//!
//! # Design Decisions
//! - Each path segment is percent-decoded before it touches the disk, so
//!   the handler and the static fallback agree on which file a URL names
//! - Segments that decode to `..`, or to anything holding a separator, NUL
//!   or invalid UTF-8, leave the request unmapped

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use axum::http::Method;
use percent_encoding::percent_decode_str;

use crate::config::SiteConfig;

/// Everything the pipeline needs to know about one request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,

    /// URL path as received (e.g., "/css/site.css").
    pub uri_path: String,

    /// File the path maps to, if it can be mapped.
    pub filename: Option<PathBuf>,

    /// Handler tag registered for the path's extension.
    pub handler: Option<String>,

    /// Directory scope owning the request (e.g., "/css").
    pub scope: String,
}

impl RequestDescriptor {
    /// Describe a request against the site's document root and handler table.
    pub fn new(method: Method, uri_path: &str, site: &SiteConfig) -> Self {
        let filename = map_to_disk(Path::new(&site.document_root), uri_path);
        let handler = url_extension(uri_path)
            .and_then(|ext| site.handler_for(&ext))
            .map(str::to_string);

        Self {
            method,
            uri_path: uri_path.to_string(),
            filename,
            handler,
            scope: scope_of(uri_path),
        }
    }
}

fn decode(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

/// Final-segment extension with its leading dot.
fn url_extension(uri_path: &str) -> Option<String> {
    let name = decode(uri_path.rsplit('/').next()?)?;
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(name[idx..].to_string()),
    }
}

fn scope_of(uri_path: &str) -> String {
    match uri_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => {
            let dir = &uri_path[..idx];
            decode(dir).map_or_else(|| dir.to_string(), Cow::into_owned)
        }
    }
}

fn map_to_disk(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for raw in uri_path.split('/') {
        let segment = decode(raw)?;
        match segment.as_ref() {
            "" | "." => continue,
            ".." => return None,
            s if s.contains(['/', '\\', '\0']) => return None,
            s => path.push(s),
        }
    }
    Some(path)
}
