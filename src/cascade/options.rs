//! Per-scope stylesheet options and their merge rules.
//!
//! # Responsibilities
//! - Represent one scope's declared options (every field optional)
//! - Merge a base scope with a more specific override scope
//! - Resolve a merged layer into an [`EffectiveConfig`] with defaults applied
//!
//! # Design Decisions
//! - "Unset" is `None`, never a magic value
//! - Empty strings and a zero precision cascade like `None`
//! - Merge is pure and associative, so a scope chain folds left-to-right

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output style requested from the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputStyle {
    Expanded,
    #[default]
    Nested,
    Compact,
    Compressed,
}

impl OutputStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStyle::Expanded => "expanded",
            OutputStyle::Nested => "nested",
            OutputStyle::Compact => "compact",
            OutputStyle::Compressed => "compressed",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an output style name outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output style `{0}` (expected expanded, nested, compact or compressed)")]
pub struct UnknownOutputStyle(pub String);

impl FromStr for OutputStyle {
    type Err = UnknownOutputStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "expanded" => Ok(OutputStyle::Expanded),
            "nested" => Ok(OutputStyle::Nested),
            "compact" => Ok(OutputStyle::Compact),
            "compressed" => Ok(OutputStyle::Compressed),
            _ => Err(UnknownOutputStyle(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputStyle {
    type Error = UnknownOutputStyle;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Options declared by a single configuration scope.
///
/// Every field is optional; an absent field inherits from the enclosing
/// scope when layers are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SassOptions {
    /// Also write generated artifacts next to the source.
    pub save_output: Option<bool>,

    /// Serve compile errors with 200 instead of 500.
    pub display_error: Option<bool>,

    pub output_style: Option<OutputStyle>,

    /// Emit inline provenance comments.
    pub source_comments: Option<bool>,

    /// Generate and serve source maps.
    pub source_map: Option<bool>,

    pub omit_source_map_url: Option<bool>,
    pub source_map_embed: Option<bool>,
    pub source_map_contents: Option<bool>,

    /// Pass-through `sourceRoot` for generated maps.
    pub source_map_root: Option<String>,

    /// Platform path list searched by `@use`/`@import`.
    pub include_paths: Option<String>,

    /// Platform path list of compiler plugins.
    pub plugin_paths: Option<String>,

    /// Numeric output precision; zero means unset.
    pub precision: Option<u32>,
}

fn pick<T>(base: &Option<T>, over: &Option<T>) -> Option<T>
where
    T: Clone,
{
    over.clone().or_else(|| base.clone())
}

fn pick_str(base: &Option<String>, over: &Option<String>) -> Option<String> {
    let set = |v: &Option<String>| v.as_ref().filter(|s| !s.is_empty()).cloned();
    set(over).or_else(|| set(base))
}

fn pick_precision(base: Option<u32>, over: Option<u32>) -> Option<u32> {
    over.filter(|p| *p > 0).or(base.filter(|p| *p > 0))
}

impl SassOptions {
    /// Merge `self` (the base scope) with a more specific `over` scope.
    ///
    /// Each field takes the override's value when the override sets it,
    /// otherwise the base's value.
    pub fn merge(&self, over: &SassOptions) -> SassOptions {
        SassOptions {
            save_output: pick(&self.save_output, &over.save_output),
            display_error: pick(&self.display_error, &over.display_error),
            output_style: pick(&self.output_style, &over.output_style),
            source_comments: pick(&self.source_comments, &over.source_comments),
            source_map: pick(&self.source_map, &over.source_map),
            omit_source_map_url: pick(&self.omit_source_map_url, &over.omit_source_map_url),
            source_map_embed: pick(&self.source_map_embed, &over.source_map_embed),
            source_map_contents: pick(&self.source_map_contents, &over.source_map_contents),
            source_map_root: pick_str(&self.source_map_root, &over.source_map_root),
            include_paths: pick_str(&self.include_paths, &over.include_paths),
            plugin_paths: pick_str(&self.plugin_paths, &over.plugin_paths),
            precision: pick_precision(self.precision, over.precision),
        }
    }

    /// Apply module defaults to every unset field.
    pub fn effective(&self) -> EffectiveConfig {
        EffectiveConfig {
            save_output: self.save_output.unwrap_or(false),
            display_error: self.display_error.unwrap_or(false),
            output_style: self.output_style.unwrap_or_default(),
            source_comments: self.source_comments.unwrap_or(false),
            source_map: self.source_map.unwrap_or(false),
            omit_source_map_url: self.omit_source_map_url.unwrap_or(false),
            source_map_embed: self.source_map_embed.unwrap_or(false),
            source_map_contents: self.source_map_contents.unwrap_or(false),
            source_map_root: self.source_map_root.clone().filter(|s| !s.is_empty()),
            include_paths: split_path_list(self.include_paths.as_deref()),
            plugin_paths: split_path_list(self.plugin_paths.as_deref()),
            precision: self.precision.filter(|p| *p > 0),
        }
    }
}

fn split_path_list(list: Option<&str>) -> Vec<PathBuf> {
    match list {
        Some(list) if !list.is_empty() => std::env::split_paths(list)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Fully resolved options for one request scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub save_output: bool,
    pub display_error: bool,
    pub output_style: OutputStyle,
    pub source_comments: bool,
    pub source_map: bool,
    pub omit_source_map_url: bool,
    pub source_map_embed: bool,
    pub source_map_contents: bool,
    pub source_map_root: Option<String>,
    pub include_paths: Vec<PathBuf>,
    pub plugin_paths: Vec<PathBuf>,
    /// `None` leaves the compiler's built-in precision.
    pub precision: Option<u32>,
}
