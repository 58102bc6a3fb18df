//! Shared, swappable configuration snapshot.
//!
//! Readers take a cheap `Arc` to the current snapshot; a reload replaces the
//! snapshot atomically without blocking in-flight requests.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::cascade::{EffectiveConfig, ScopeTree};
use crate::config::schema::ServerConfig;

/// A configuration together with its compiled scope tree.
#[derive(Debug)]
pub struct Snapshot {
    pub config: ServerConfig,
    pub scopes: ScopeTree,
}

impl Snapshot {
    pub fn new(config: ServerConfig) -> Self {
        let scopes = ScopeTree::new(config.sass.clone(), &config.scopes);
        Self { config, scopes }
    }

    /// Effective stylesheet options for a request scope.
    pub fn resolve(&self, scope: &str) -> EffectiveConfig {
        self.scopes.resolve(scope)
    }
}

/// Configuration store handed to request handlers.
#[derive(Debug)]
pub struct ConfigStore {
    current: ArcSwap<Snapshot>,
}

impl ConfigStore {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::new(config)),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Replace the active configuration.
    pub fn replace(&self, config: ServerConfig) {
        self.current.store(Arc::new(Snapshot::new(config)));
        tracing::info!("Configuration swapped");
    }
}
