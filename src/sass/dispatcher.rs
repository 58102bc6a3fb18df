//! Response and artifact dispatch.
//!
//! # Responsibilities
//! - Map a compilation [`Outcome`] to status, content type and body
//! - Persist generated CSS and maps next to the source when enabled
//!
//! # Design Decisions
//! - Rules are evaluated in a fixed order: error, map, CSS, anomaly
//! - A failed artifact write is logged and never changes the response
//! - Concurrent writers of the same artifact race; last writer wins

use std::path::Path;

use axum::http::StatusCode;

use crate::cascade::EffectiveConfig;
use crate::http::response::{
    SassResponse, CONTENT_TYPE_CSS, CONTENT_TYPE_ERROR, CONTENT_TYPE_SOURCE_MAP,
};
use crate::observability::metrics;
use crate::sass::classifier::{OutputKind, ResolvedFiles};
use crate::sass::fs::Filesystem;
use crate::sass::invoker::Outcome;

pub const NO_ERROR_MESSAGE: &str = "An error occurred; no error message available.";
pub const UNKNOWN_INTERNAL_ERROR: &str = "Unknown internal error.";

fn error_status(config: &EffectiveConfig) -> StatusCode {
    if config.display_error {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Write one artifact, logging instead of failing.
fn write_artifact(fs: &dyn Filesystem, path: &Path, contents: &str) {
    match fs.write(path, contents) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), bytes = contents.len(), "Artifact written");
            metrics::record_artifact_write(true);
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Can't create/write to file");
            metrics::record_artifact_write(false);
        }
    }
}

/// Turn an outcome into a response, writing artifacts as configured.
pub fn dispatch(
    outcome: Outcome,
    kind: OutputKind,
    files: &ResolvedFiles,
    config: &EffectiveConfig,
    fs: &dyn Filesystem,
) -> SassResponse {
    match outcome {
        Outcome::Error { message } => {
            let body = message.unwrap_or_else(|| NO_ERROR_MESSAGE.to_string());
            tracing::warn!(source = %files.source().display(), "Stylesheet compilation failed");
            SassResponse::new(error_status(config), CONTENT_TYPE_ERROR, body)
        }
        Outcome::Success {
            css,
            source_map: Some(map),
        } if kind == OutputKind::SourceMap => {
            if config.save_output {
                write_artifact(fs, &files.map, &map);
                if let Some(css) = &css {
                    write_artifact(fs, &files.css, css);
                }
            }
            SassResponse::new(StatusCode::OK, CONTENT_TYPE_SOURCE_MAP, map)
        }
        Outcome::Success {
            css: Some(css),
            source_map,
        } => {
            if config.save_output {
                if let Some(map) = source_map.as_deref().filter(|_| config.source_map) {
                    write_artifact(fs, &files.map, map);
                }
                write_artifact(fs, &files.css, &css);
            }
            SassResponse::new(StatusCode::OK, CONTENT_TYPE_CSS, css)
        }
        Outcome::Success { .. } => {
            tracing::warn!(
                source = %files.source().display(),
                "Compiler reported success without output"
            );
            SassResponse::new(error_status(config), CONTENT_TYPE_ERROR, UNKNOWN_INTERNAL_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sass::classifier::Syntax;
    use crate::sass::fs::memory::MemoryFs;
    use std::path::PathBuf;

    fn files() -> ResolvedFiles {
        ResolvedFiles {
            sass: PathBuf::from("/www/style.sass"),
            scss: PathBuf::from("/www/style.scss"),
            css: PathBuf::from("/www/style.css"),
            map: PathBuf::from("/www/style.map"),
            syntax: Syntax::Scss,
        }
    }

    fn success(css: Option<&str>, map: Option<&str>) -> Outcome {
        Outcome::Success {
            css: css.map(str::to_string),
            source_map: map.map(str::to_string),
        }
    }

    fn saving() -> EffectiveConfig {
        EffectiveConfig {
            save_output: true,
            source_map: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_error_hidden_as_500() {
        let fs = MemoryFs::default();
        let outcome = Outcome::Error {
            message: Some("Error: expected \";\".".into()),
        };
        let response = dispatch(outcome, OutputKind::Css, &files(), &EffectiveConfig::default(), &fs);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.content_type, "text/plain");
        assert_eq!(response.body, "Error: expected \";\".");
    }

    #[test]
    fn test_error_displayed_as_200() {
        let fs = MemoryFs::default();
        let config = EffectiveConfig {
            display_error: true,
            ..Default::default()
        };
        let outcome = Outcome::Error {
            message: Some("boom".into()),
        };
        let response = dispatch(outcome, OutputKind::Css, &files(), &config, &fs);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type, "text/plain");
        assert_eq!(response.body, "boom");
    }

    #[test]
    fn test_error_without_message_uses_fallback() {
        let fs = MemoryFs::default();
        let response = dispatch(
            Outcome::Error { message: None },
            OutputKind::Css,
            &files(),
            &EffectiveConfig::default(),
            &fs,
        );
        assert_eq!(response.body, NO_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_writes_nothing() {
        let fs = MemoryFs::default();
        dispatch(Outcome::Error { message: None }, OutputKind::Css, &files(), &saving(), &fs);
        assert_eq!(fs.contents("/www/style.css"), None);
        assert_eq!(fs.contents("/www/style.map"), None);
    }

    #[test]
    fn test_map_request_serves_json_and_saves_both() {
        let fs = MemoryFs::default();
        let response = dispatch(
            success(Some("a{}"), Some("{\"version\":3}")),
            OutputKind::SourceMap,
            &files(),
            &saving(),
            &fs,
        );
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type, "application/json");
        assert_eq!(response.body, "{\"version\":3}");
        assert_eq!(fs.contents("/www/style.map").as_deref(), Some("{\"version\":3}"));
        assert_eq!(fs.contents("/www/style.css").as_deref(), Some("a{}"));
    }

    #[test]
    fn test_map_request_without_map_falls_back_to_css() {
        let fs = MemoryFs::default();
        let response = dispatch(
            success(Some("a{}"), None),
            OutputKind::SourceMap,
            &files(),
            &EffectiveConfig::default(),
            &fs,
        );
        assert_eq!(response.content_type, "text/css");
        assert_eq!(response.body, "a{}");
    }

    #[test]
    fn test_css_request_saves_map_then_css() {
        let fs = MemoryFs::default();
        let response = dispatch(
            success(Some("a{}"), Some("{}")),
            OutputKind::Css,
            &files(),
            &saving(),
            &fs,
        );
        assert_eq!(response.content_type, "text/css");
        assert_eq!(fs.contents("/www/style.css").as_deref(), Some("a{}"));
        assert_eq!(fs.contents("/www/style.map").as_deref(), Some("{}"));
    }

    #[test]
    fn test_nothing_saved_when_disabled() {
        let fs = MemoryFs::default();
        dispatch(
            success(Some("a{}"), Some("{}")),
            OutputKind::Css,
            &files(),
            &EffectiveConfig::default(),
            &fs,
        );
        assert_eq!(fs.contents("/www/style.css"), None);
        assert_eq!(fs.contents("/www/style.map"), None);
    }

    #[test]
    fn test_write_failure_does_not_change_response() {
        let fs = MemoryFs::default();
        fs.deny_writes("/www/style.css");
        let response = dispatch(success(Some("a{}"), None), OutputKind::Css, &files(), &saving(), &fs);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "a{}");
    }

    #[test]
    fn test_empty_success_is_an_anomaly() {
        let fs = MemoryFs::default();
        let response = dispatch(success(None, None), OutputKind::Css, &files(), &EffectiveConfig::default(), &fs);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.content_type, "text/plain");
        assert_eq!(response.body, UNKNOWN_INTERNAL_ERROR);

        let config = EffectiveConfig {
            display_error: true,
            ..Default::default()
        };
        let response = dispatch(success(None, None), OutputKind::Css, &files(), &config, &fs);
        assert_eq!(response.status, StatusCode::OK);
    }
}
