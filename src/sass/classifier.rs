//! Request classification.
//!
//! # Responsibilities
//! - Decide whether the stylesheet handler owns a request
//! - Pick the output kind from the requested extension
//! - Pick the source syntax from the sibling files on disk
//!
//! # Design Decisions
//! - Checks run in a fixed order: handler tag, extension, source file,
//!   method, source-map switch
//! - Only existence checks touch the disk; no file content is read
//! - `.sass` wins over `.scss` when both exist

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use axum::http::Method;

use crate::cascade::EffectiveConfig;
use crate::config::SASS_HANDLER;
use crate::sass::fs::Filesystem;
use crate::sass::request::RequestDescriptor;

/// What the client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Css,
    SourceMap,
}

impl OutputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Css => "css",
            OutputKind::SourceMap => "map",
        }
    }
}

/// Source dialect selected for compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// Whitespace-significant `.sass`.
    Indented,
    /// Brace-delimited `.scss`.
    Scss,
}

/// Paths derived from the request's base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFiles {
    pub sass: PathBuf,
    pub scss: PathBuf,
    pub css: PathBuf,
    pub map: PathBuf,
    pub syntax: Syntax,
}

impl ResolvedFiles {
    /// The source file chosen for compilation.
    pub fn source(&self) -> &Path {
        match self.syntax {
            Syntax::Indented => &self.sass,
            Syntax::Scss => &self.scss,
        }
    }
}

/// Why a request was passed on to other handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    HandlerMismatch,
    NotMapped,
    UnsupportedExtension,
    NoSource,
    SourceMapDisabled,
}

impl DeclineReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclineReason::HandlerMismatch => "handler_mismatch",
            DeclineReason::NotMapped => "not_mapped",
            DeclineReason::UnsupportedExtension => "unsupported_extension",
            DeclineReason::NoSource => "no_source",
            DeclineReason::SourceMapDisabled => "source_map_disabled",
        }
    }
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Declined(DeclineReason),
    MethodNotAllowed,
    Accepted { kind: OutputKind, files: ResolvedFiles },
}

/// Methods answered by the handler.
pub fn is_safe_read(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Classify a request against its effective configuration.
pub fn classify(
    request: &RequestDescriptor,
    config: &EffectiveConfig,
    fs: &dyn Filesystem,
) -> Classification {
    let handler_matches = request
        .handler
        .as_deref()
        .is_some_and(|h| h.eq_ignore_ascii_case(SASS_HANDLER));
    if !handler_matches {
        return Classification::Declined(DeclineReason::HandlerMismatch);
    }

    let Some(filename) = request.filename.as_deref() else {
        return Classification::Declined(DeclineReason::NotMapped);
    };

    let extension = filename.extension().and_then(|e| e.to_str()).unwrap_or("");
    let kind = if extension.eq_ignore_ascii_case("css") {
        OutputKind::Css
    } else if extension.eq_ignore_ascii_case("map") {
        OutputKind::SourceMap
    } else {
        return Classification::Declined(DeclineReason::UnsupportedExtension);
    };

    let base = filename.with_extension("");
    let sass = with_suffix(&base, ".sass");
    let scss = with_suffix(&base, ".scss");

    let syntax = if fs.is_file(&sass) {
        Syntax::Indented
    } else if fs.is_file(&scss) {
        Syntax::Scss
    } else {
        return Classification::Declined(DeclineReason::NoSource);
    };

    if !is_safe_read(&request.method) {
        return Classification::MethodNotAllowed;
    }

    if kind == OutputKind::SourceMap && !config.source_map {
        return Classification::Declined(DeclineReason::SourceMapDisabled);
    }

    Classification::Accepted {
        kind,
        files: ResolvedFiles {
            css: with_suffix(&base, ".css"),
            map: with_suffix(&base, ".map"),
            sass,
            scss,
            syntax,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::sass::fs::memory::MemoryFs;

    fn request(method: Method, path: &str) -> RequestDescriptor {
        let site = SiteConfig {
            document_root: "/www".into(),
            ..Default::default()
        };
        RequestDescriptor::new(method, path, &site)
    }

    fn maps_enabled() -> EffectiveConfig {
        EffectiveConfig {
            source_map: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_declines_foreign_handler() {
        let fs = MemoryFs::with_files(&["/www/style.scss"]);
        let mut req = request(Method::GET, "/style.css");
        req.handler = Some("default-handler".into());
        assert_eq!(
            classify(&req, &EffectiveConfig::default(), &fs),
            Classification::Declined(DeclineReason::HandlerMismatch)
        );

        // Tag comparison ignores case
        req.handler = Some("SASS-Script".into());
        assert!(matches!(
            classify(&req, &EffectiveConfig::default(), &fs),
            Classification::Accepted { .. }
        ));
    }

    #[test]
    fn test_declines_unsupported_extension() {
        let fs = MemoryFs::with_files(&["/www/style.scss"]);
        let mut req = request(Method::GET, "/style.scss");
        req.handler = Some(SASS_HANDLER.into());
        assert_eq!(
            classify(&req, &EffectiveConfig::default(), &fs),
            Classification::Declined(DeclineReason::UnsupportedExtension)
        );
    }

    #[test]
    fn test_declines_without_source() {
        let fs = MemoryFs::with_files(&["/www/other.scss"]);
        for path in ["/style.css", "/style.map"] {
            assert_eq!(
                classify(&request(Method::GET, path), &maps_enabled(), &fs),
                Classification::Declined(DeclineReason::NoSource)
            );
        }
    }

    #[test]
    fn test_selects_scss_when_only_scss_exists() {
        let fs = MemoryFs::with_files(&["/www/css/style.scss"]);
        let verdict = classify(&request(Method::GET, "/css/style.css"), &EffectiveConfig::default(), &fs);
        let Classification::Accepted { kind, files } = verdict else {
            panic!("expected acceptance, got {verdict:?}");
        };
        assert_eq!(kind, OutputKind::Css);
        assert_eq!(files.syntax, Syntax::Scss);
        assert_eq!(files.source(), Path::new("/www/css/style.scss"));
        assert_eq!(files.css, PathBuf::from("/www/css/style.css"));
        assert_eq!(files.map, PathBuf::from("/www/css/style.map"));
    }

    #[test]
    fn test_prefers_indented_syntax() {
        let fs = MemoryFs::with_files(&["/www/style.scss", "/www/style.sass"]);
        let verdict = classify(&request(Method::GET, "/style.css"), &EffectiveConfig::default(), &fs);
        let Classification::Accepted { files, .. } = verdict else {
            panic!("expected acceptance, got {verdict:?}");
        };
        assert_eq!(files.syntax, Syntax::Indented);
        assert_eq!(files.source(), Path::new("/www/style.sass"));
    }

    #[test]
    fn test_keeps_inner_dots_in_base_name() {
        let fs = MemoryFs::with_files(&["/www/theme.dark.scss"]);
        let verdict = classify(&request(Method::GET, "/theme.dark.css"), &EffectiveConfig::default(), &fs);
        let Classification::Accepted { files, .. } = verdict else {
            panic!("expected acceptance, got {verdict:?}");
        };
        assert_eq!(files.source(), Path::new("/www/theme.dark.scss"));
        assert_eq!(files.map, PathBuf::from("/www/theme.dark.map"));
    }

    #[test]
    fn test_map_requires_source_map_option() {
        let fs = MemoryFs::with_files(&["/www/style.scss"]);
        assert_eq!(
            classify(&request(Method::GET, "/style.map"), &EffectiveConfig::default(), &fs),
            Classification::Declined(DeclineReason::SourceMapDisabled)
        );
        assert!(matches!(
            classify(&request(Method::GET, "/style.map"), &maps_enabled(), &fs),
            Classification::Accepted { kind: OutputKind::SourceMap, .. }
        ));
    }

    #[test]
    fn test_rejects_unsafe_methods() {
        let fs = MemoryFs::with_files(&["/www/style.scss"]);
        assert_eq!(
            classify(&request(Method::POST, "/style.css"), &EffectiveConfig::default(), &fs),
            Classification::MethodNotAllowed
        );
        // Method is checked before the source-map switch
        assert_eq!(
            classify(&request(Method::PUT, "/style.map"), &EffectiveConfig::default(), &fs),
            Classification::MethodNotAllowed
        );
        assert!(matches!(
            classify(&request(Method::HEAD, "/style.css"), &EffectiveConfig::default(), &fs),
            Classification::Accepted { .. }
        ));
    }

    #[test]
    fn test_unmapped_path_declines() {
        let fs = MemoryFs::with_files(&["/style.scss"]);
        assert_eq!(
            classify(&request(Method::GET, "/../style.css"), &EffectiveConfig::default(), &fs),
            Classification::Declined(DeclineReason::NotMapped)
        );
    }
}
