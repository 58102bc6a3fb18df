//! Stylesheet compilation using the grass crate.
//!
//! grass is a pure Rust implementation targeting dart-sass. It only knows
//! two output styles, so `nested` and `compact` render as `expanded`.
//! It has no precision or plugin settings; those are logged and skipped.

use grass::{InputSyntax, Options};

use crate::cascade::OutputStyle;
use crate::sass::compiler::{CompileResult, CompilerOptions, StylesheetCompiler};
use crate::sass::sourcemap;

/// [`StylesheetCompiler`] backed by grass.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrassCompiler;

impl GrassCompiler {
    pub fn new() -> Self {
        Self
    }
}

fn grass_style(style: OutputStyle) -> grass::OutputStyle {
    match style {
        OutputStyle::Compressed => grass::OutputStyle::Compressed,
        OutputStyle::Expanded | OutputStyle::Nested | OutputStyle::Compact => {
            grass::OutputStyle::Expanded
        }
    }
}

impl StylesheetCompiler for GrassCompiler {
    fn compile_file(&self, options: &CompilerOptions) -> CompileResult {
        if options.precision.is_some() || !options.plugin_paths.is_empty() {
            tracing::debug!(
                precision = ?options.precision,
                plugin_paths = ?options.plugin_paths,
                "grass has no precision or plugin support; ignoring"
            );
        }

        let syntax = if options.is_indented_syntax_src {
            InputSyntax::Sass
        } else {
            InputSyntax::Scss
        };

        let grass_options = Options::default()
            .style(grass_style(options.output_style))
            .load_paths(options.include_paths.as_slice())
            .input_syntax(syntax)
            .quiet(true);

        let compiled = match grass::from_path(&options.input_path, &grass_options) {
            Ok(css) => css,
            Err(e) => return CompileResult::failure(Some(e.to_string())),
        };

        let mut css = String::new();
        let mut leading_lines = 0;
        if options.source_comments && options.output_style != OutputStyle::Compressed {
            // Relative to the generated file, so no server path reaches clients
            let source = sourcemap::relative_to(&options.input_path, options.output_path.parent());
            css.push_str(&format!("/* line 1, {source} */\n"));
            leading_lines = 1;
        }
        css.push_str(&compiled);

        let source_map = match options.source_map_file {
            Some(_) => match sourcemap::build(options, leading_lines) {
                Ok(map) => Some(map),
                Err(e) => return CompileResult::failure(Some(e.to_string())),
            },
            None => None,
        };

        if let Some(map) = &source_map {
            if !options.omit_source_map_url {
                if !css.is_empty() && !css.ends_with('\n') {
                    css.push('\n');
                }
                css.push_str(&sourcemap::mapping_url_comment(options, map));
                css.push('\n');
            }
        }

        CompileResult::success(css, source_map)
    }
}
