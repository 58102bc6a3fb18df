//! The stylesheet handler.
//!
//! Wires the pipeline together for one request:
//!
//! ```text
//! RequestDescriptor
//!     → ConfigStore (effective options for the request scope)
//!     → classifier.rs (accept / decline / 405)
//!     → invoker.rs (one compilation)
//!     → dispatcher.rs (response + artifact writes)
//! ```
//!
//! The handler is built once at startup with its collaborators injected and
//! is shared by every request. It holds no per-request state.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{ConfigStore, Snapshot};
use crate::http::response::SassResponse;
use crate::observability::metrics;
use crate::sass::classifier::{classify, Classification, DeclineReason};
use crate::sass::compiler::StylesheetCompiler;
use crate::sass::dispatcher::dispatch;
use crate::sass::fs::Filesystem;
use crate::sass::invoker::{invoke, Outcome};
use crate::sass::request::RequestDescriptor;

/// Result of offering a request to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResult {
    /// Not ours; pass the request on.
    Declined(DeclineReason),
    /// A finished response.
    Respond(SassResponse),
}

/// Stylesheet handler with injected collaborators.
#[derive(Clone)]
pub struct SassHandler {
    compiler: Arc<dyn StylesheetCompiler>,
    fs: Arc<dyn Filesystem>,
    config: Arc<ConfigStore>,
}

impl SassHandler {
    pub fn new(
        compiler: Arc<dyn StylesheetCompiler>,
        fs: Arc<dyn Filesystem>,
        config: Arc<ConfigStore>,
    ) -> Self {
        Self { compiler, fs, config }
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    /// Handle one request synchronously.
    ///
    /// `snapshot` must be the one `request` was described against, so the
    /// document root, handler table and scope options all come from the
    /// same configuration.
    pub fn handle(&self, snapshot: &Snapshot, request: &RequestDescriptor) -> HandlerResult {
        let effective = snapshot.resolve(&request.scope);

        let (kind, files) = match classify(request, &effective, self.fs.as_ref()) {
            Classification::Declined(reason) => {
                tracing::debug!(path = %request.uri_path, reason = %reason, "Declined");
                metrics::record_declined(reason.as_str());
                return HandlerResult::Declined(reason);
            }
            Classification::MethodNotAllowed => {
                tracing::debug!(path = %request.uri_path, method = %request.method, "Method not allowed");
                return HandlerResult::Respond(SassResponse::method_not_allowed());
            }
            Classification::Accepted { kind, files } => (kind, files),
        };

        let start = Instant::now();
        let outcome = invoke(self.compiler.as_ref(), &effective, &files);
        let result = match &outcome {
            Outcome::Error { .. } => "error",
            Outcome::Success { css: None, source_map: None } => "empty",
            Outcome::Success { .. } => "success",
        };
        metrics::record_compile(result, start);

        let response = dispatch(outcome, kind, &files, &effective, self.fs.as_ref());
        tracing::info!(
            path = %request.uri_path,
            kind = kind.as_str(),
            status = response.status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Stylesheet served"
        );
        HandlerResult::Respond(response)
    }
}
