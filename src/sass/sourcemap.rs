//! Source Map v3 generation for whole-file mappings.
//!
//! grass reports no span information for its output, so a map links the
//! generated file to its source as a whole: the single mapping points the
//! first compiled line at line 1, column 0 of the source. Per-rule or
//! per-declaration mappings are not produced; browser devtools will open
//! the right source file but not jump to the rule.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::sass::compiler::CompilerOptions;

#[derive(Debug, thiserror::Error)]
pub enum SourceMapError {
    #[error("failed to read source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize source map: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceMapV3<'a> {
    version: u8,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_root: Option<&'a str>,
    sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources_content: Option<Vec<String>>,
    names: Vec<String>,
    mappings: String,
}

/// `path` relative to `dir` when it lies beneath it, else as given.
pub(crate) fn relative_to(path: &Path, dir: Option<&Path>) -> String {
    dir.and_then(|d| path.strip_prefix(d).ok())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Build the map for `options.input_path` → `options.output_path`.
///
/// `leading_lines` is the number of generated lines placed before the
/// compiled output; the first compiled line maps to the start of the source.
pub fn build(options: &CompilerOptions, leading_lines: usize) -> Result<String, SourceMapError> {
    let map_path = options
        .source_map_file
        .as_deref()
        .unwrap_or(options.output_path.as_path());
    let map_dir = map_path.parent();

    let sources_content = if options.source_map_contents {
        let content = std::fs::read_to_string(&options.input_path).map_err(|source| SourceMapError::Io {
            path: options.input_path.display().to_string(),
            source,
        })?;
        Some(vec![content])
    } else {
        None
    };

    let map = SourceMapV3 {
        version: 3,
        file: relative_to(&options.output_path, map_dir),
        source_root: options.source_map_root.as_deref(),
        sources: vec![relative_to(&options.input_path, map_dir)],
        sources_content,
        names: Vec::new(),
        mappings: format!("{}AAAA", ";".repeat(leading_lines)),
    };

    Ok(serde_json::to_string(&map)?)
}

/// Trailing comment linking generated CSS to its map.
pub fn mapping_url_comment(options: &CompilerOptions, map: &str) -> String {
    let url = if options.source_map_embed {
        format!("data:application/json;base64,{}", STANDARD.encode(map))
    } else {
        let css_dir = options.output_path.parent();
        let map_path = options
            .source_map_file
            .as_deref()
            .unwrap_or(options.output_path.as_path());
        relative_to(map_path, css_dir)
    };
    format!("/*# sourceMappingURL={url} */")
}
