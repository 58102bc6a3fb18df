//! Scope matching and cascade resolution.
//!
//! # Responsibilities
//! - Match a request scope against configured scope paths
//! - Order matching scopes parent → child
//! - Fold the matching layers over the base options
//!
//! # Design Decisions
//! - Prefix matching is segment-aware: `/assets` covers `/assets/css`
//!   but not `/assets2`
//! - Path matching is case-sensitive
//! - Compiled once per configuration, immutable afterwards

use crate::cascade::options::{EffectiveConfig, SassOptions};
use crate::config::ScopeConfig;

/// Matches a request scope against a configured scope path.
#[derive(Debug, Clone)]
pub struct ScopeMatcher {
    prefix: String,
}

impl ScopeMatcher {
    /// Create a matcher; trailing slashes are ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        Self {
            prefix: trimmed.to_string(),
        }
    }

    /// Returns true if `path` lies at or below this scope.
    pub fn matches(&self, path: &str) -> bool {
        if self.prefix.is_empty() {
            return path.starts_with('/');
        }
        match path.strip_prefix(&self.prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Number of path segments; deeper scopes are more specific.
    pub fn depth(&self) -> usize {
        self.prefix.split('/').filter(|s| !s.is_empty()).count()
    }
}

#[derive(Debug, Clone)]
struct Scope {
    matcher: ScopeMatcher,
    options: SassOptions,
}

/// Immutable scope hierarchy built from configuration.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    base: SassOptions,
    /// Sorted by depth, shallowest first.
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// Compile the base options and scope overrides into a tree.
    pub fn new(base: SassOptions, scopes: &[ScopeConfig]) -> Self {
        let mut scopes: Vec<Scope> = scopes
            .iter()
            .map(|s| Scope {
                matcher: ScopeMatcher::new(&s.path),
                options: s.options.clone(),
            })
            .collect();
        // Stable sort keeps declaration order among equal depths
        scopes.sort_by_key(|s| s.matcher.depth());
        Self { base, scopes }
    }

    /// Merged (not yet defaulted) options for a request scope.
    pub fn layered(&self, scope: &str) -> SassOptions {
        self.scopes
            .iter()
            .filter(|s| s.matcher.matches(scope))
            .fold(self.base.clone(), |acc, s| acc.merge(&s.options))
    }

    /// Effective configuration for a request scope.
    pub fn resolve(&self, scope: &str) -> EffectiveConfig {
        self.layered(scope).effective()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::options::OutputStyle;

    fn scope(path: &str, options: SassOptions) -> ScopeConfig {
        ScopeConfig {
            path: path.to_string(),
            options,
        }
    }

    #[test]
    fn test_scope_matcher() {
        let matcher = ScopeMatcher::new("/assets/");

        assert!(matcher.matches("/assets"));
        assert!(matcher.matches("/assets/css"));
        assert!(!matcher.matches("/assets2"));
        assert!(!matcher.matches("/other/assets"));
        assert_eq!(matcher.depth(), 1);

        let root = ScopeMatcher::new("/");
        assert!(root.matches("/anything"));
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_child_overrides_parent_regardless_of_declaration_order() {
        let tree = ScopeTree::new(
            SassOptions {
                output_style: Some(OutputStyle::Expanded),
                ..Default::default()
            },
            &[
                scope(
                    "/site/themes/dark",
                    SassOptions {
                        display_error: Some(false),
                        ..Default::default()
                    },
                ),
                scope(
                    "/site",
                    SassOptions {
                        display_error: Some(true),
                        save_output: Some(true),
                        ..Default::default()
                    },
                ),
            ],
        );

        let dark = tree.resolve("/site/themes/dark");
        assert!(!dark.display_error);
        assert!(dark.save_output);
        assert_eq!(dark.output_style, OutputStyle::Expanded);

        let site = tree.resolve("/site/css");
        assert!(site.display_error);

        let elsewhere = tree.resolve("/blog");
        assert!(!elsewhere.display_error);
        assert!(!elsewhere.save_output);
    }

    #[test]
    fn test_three_level_chain_matches_manual_fold() {
        let base = SassOptions {
            precision: Some(3),
            ..Default::default()
        };
        let child = SassOptions {
            source_map: Some(true),
            ..Default::default()
        };
        let grandchild = SassOptions {
            precision: Some(9),
            ..Default::default()
        };
        let tree = ScopeTree::new(
            base.clone(),
            &[scope("/a", child.clone()), scope("/a/b", grandchild.clone())],
        );

        assert_eq!(tree.layered("/a/b"), base.merge(&child).merge(&grandchild));
        assert_eq!(tree.layered("/a/b"), base.merge(&child.merge(&grandchild)));
    }
}
