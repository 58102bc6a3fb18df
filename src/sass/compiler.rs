//! Contract with the external stylesheet compiler.
//!
//! A compiler takes a source file path, an output path and an options
//! record, and returns an owned result record. Nothing in the result
//! borrows from the compiler, so a result can outlive the call freely.

use std::path::PathBuf;

use crate::cascade::OutputStyle;

/// Options handed to the compiler for one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub output_style: OutputStyle,
    pub precision: Option<u32>,
    pub source_comments: bool,
    pub is_indented_syntax_src: bool,
    pub include_paths: Vec<PathBuf>,
    pub plugin_paths: Vec<PathBuf>,

    /// Set when a source map should be generated.
    pub source_map_file: Option<PathBuf>,
    pub omit_source_map_url: bool,
    pub source_map_embed: bool,
    pub source_map_contents: bool,
    pub source_map_root: Option<String>,
}

/// Result record returned by the compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileResult {
    pub error_status: bool,
    pub error_message: Option<String>,
    pub output_string: Option<String>,
    pub source_map_string: Option<String>,
}

impl CompileResult {
    pub fn success(css: String, source_map: Option<String>) -> Self {
        Self {
            error_status: false,
            error_message: None,
            output_string: Some(css),
            source_map_string: source_map,
        }
    }

    pub fn failure(message: Option<String>) -> Self {
        Self {
            error_status: true,
            error_message: message,
            ..Default::default()
        }
    }
}

/// A file-based stylesheet compiler.
pub trait StylesheetCompiler: Send + Sync {
    /// Compile `options.input_path` once, synchronously.
    fn compile_file(&self, options: &CompilerOptions) -> CompileResult;
}
