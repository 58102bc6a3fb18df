//! Compilation invocation.
//!
//! # Responsibilities
//! - Build [`CompilerOptions`] from the effective configuration and files
//! - Call the compiler exactly once per request
//! - Normalize the result record into an [`Outcome`]
//!
//! # Design Decisions
//! - No retries: compilation is deterministic given its inputs
//! - The result record is consumed by value; nothing borrowed from the
//!   compiler survives this call

use crate::cascade::EffectiveConfig;
use crate::sass::classifier::{ResolvedFiles, Syntax};
use crate::sass::compiler::{CompileResult, CompilerOptions, StylesheetCompiler};

/// Normalized result of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Error {
        message: Option<String>,
    },
    Success {
        css: Option<String>,
        source_map: Option<String>,
    },
}

/// Build compiler options for one request.
pub fn build_options(config: &EffectiveConfig, files: &ResolvedFiles) -> CompilerOptions {
    CompilerOptions {
        input_path: files.source().to_path_buf(),
        output_path: files.css.clone(),
        output_style: config.output_style,
        precision: config.precision,
        source_comments: config.source_comments,
        is_indented_syntax_src: files.syntax == Syntax::Indented,
        include_paths: config.include_paths.clone(),
        plugin_paths: config.plugin_paths.clone(),
        source_map_file: config.source_map.then(|| files.map.clone()),
        omit_source_map_url: config.omit_source_map_url,
        source_map_embed: config.source_map_embed,
        source_map_contents: config.source_map_contents,
        source_map_root: config.source_map_root.clone(),
    }
}

/// Interpret a compiler result record.
pub fn interpret(result: CompileResult, map_requested: bool) -> Outcome {
    if result.error_status {
        if result.error_message.is_none() {
            tracing::warn!("Compiler reported an error without a message");
        }
        return Outcome::Error {
            message: result.error_message,
        };
    }

    Outcome::Success {
        css: result.output_string,
        source_map: result.source_map_string.filter(|_| map_requested),
    }
}

/// Compile the resolved source once and normalize the result.
pub fn invoke(
    compiler: &dyn StylesheetCompiler,
    config: &EffectiveConfig,
    files: &ResolvedFiles,
) -> Outcome {
    let options = build_options(config, files);
    tracing::debug!(
        input = %options.input_path.display(),
        style = %options.output_style,
        source_map = options.source_map_file.is_some(),
        "Compiling stylesheet"
    );
    let map_requested = options.source_map_file.is_some();
    interpret(compiler.compile_file(&options), map_requested)
}
