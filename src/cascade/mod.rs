//! Configuration cascade subsystem.
//!
//! # Data Flow
//! ```text
//! [sass] base options + [[scopes]] overrides
//!     → resolver.rs (compile scope tree, sorted parent → child)
//!
//! Per request scope:
//!     → resolver.rs (select matching scopes)
//!     → options.rs (fold merge, apply defaults)
//!     → EffectiveConfig
//! ```

pub mod options;
pub mod resolver;

pub use options::{EffectiveConfig, OutputStyle, SassOptions};
pub use resolver::{ScopeMatcher, ScopeTree};
