//! Stylesheet compilation pipeline.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → request.rs (RequestDescriptor: path, method, handler tag, scope)
//!     → classifier.rs (decline / 405 / accept with ResolvedFiles)
//!     → invoker.rs (CompilerOptions → StylesheetCompiler → Outcome)
//!     → dispatcher.rs (SassResponse + optional artifact writes)
//! ```
//!
//! # Design Decisions
//! - Synchronous and request-scoped: nothing is shared between requests
//!   except the immutable configuration snapshot
//! - Compiler and filesystem sit behind traits so each stage can be tested
//!   with fakes

pub mod classifier;
pub mod compiler;
pub mod dispatcher;
pub mod fs;
pub mod grass_backend;
pub mod handler;
pub mod invoker;
pub mod request;
pub mod sourcemap;

pub use classifier::{Classification, DeclineReason, OutputKind, ResolvedFiles, Syntax};
pub use compiler::{CompileResult, CompilerOptions, StylesheetCompiler};
pub use fs::{Filesystem, OsFilesystem};
pub use grass_backend::GrassCompiler;
pub use handler::{HandlerResult, SassHandler};
pub use invoker::Outcome;
pub use request::RequestDescriptor;
