//! The process-wide node registry.
//!
//! Node types are registered once at startup by every feature that ships
//! nodes, then read for the lifetime of the process. Access goes through a
//! read/write lock so hosts that render from other threads stay safe.

use super::NodeRegistry;
use parking_lot::RwLock;
use std::sync::OnceLock;

static GLOBAL_REGISTRY: OnceLock<RwLock<NodeRegistry>> = OnceLock::new();

/// Initialize the global registry, returning the existing one if already set up.
pub fn init_global() -> &'static RwLock<NodeRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(NodeRegistry::new()))
}

/// Empty the global registry. Tests call this between cases.
pub fn reset_global() {
    init_global().write().clear();
}

/// Run `f` with shared access to the global registry.
pub fn with_global<R>(f: impl FnOnce(&NodeRegistry) -> R) -> R {
    f(&*init_global().read())
}

/// Run `f` with exclusive access to the global registry.
pub fn with_global_mut<R>(f: impl FnOnce(&mut NodeRegistry) -> R) -> R {
    f(&mut *init_global().write())
}
