//! Configuration management
//!
//! The static configuration is resolved once at startup (TOML file plus
//! environment overrides) and injected into store constructors from
//! there; business logic never reads the process environment on its own.

mod structs;

pub use structs::*;

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Resolve and install the global configuration, returning it.
///
/// Idempotent: later calls return the configuration resolved first.
pub fn init_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::load()))
        .load_full()
}

/// Cheap access to the installed configuration.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
        .load_full()
}
