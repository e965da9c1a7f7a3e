//! Hot reconfiguration.
//!
//! The [`ReconfigurationController`] owns the four-state lifecycle
//! (`Uninitialized`, `Reconfiguring`, `Active`, `Inert`) and swaps the
//! dispatcher's active state whenever a configuration change arrives.
//! [`ConfigSource`] decides whether a change is served from the pushed
//! payload or from the local fallback file.

mod controller;
mod source;

pub use controller::{Lifecycle, ReconfigurationController};
pub use source::{ConfigSource, DEFAULT_FALLBACK_CONFIG};
