//! Process-wide filter registry.
//!
//! Filter stages are developed and compiled independently of the chain that
//! runs them; each registers a named constructor here (at or before startup)
//! and the chain owner instantiates stages by name from its configuration.
//! The table is created on first access and lives for the process lifetime.

use crate::stage::FilterStage;
use bidgate_core::error::{FilterError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Zero-argument constructor producing a fresh, independently owned stage.
pub type ConstructFn = Arc<dyn Fn() -> Box<dyn FilterStage> + Send + Sync>;

/// The singleton name → constructor table, created on first access.
///
/// The lock guards only map lookups and inserts; constructors run outside it
/// so stage construction never blocks registry access from other threads.
static FILTER_REGISTER: Mutex<Option<HashMap<String, ConstructFn>>> = Mutex::new(None);

/// Name-based lookup of filter stage constructors.
///
/// Registration is expected once per stage, typically from module
/// initialization; lookups may come from request-handling threads during
/// chain (re)configuration.
pub struct FilterRegistry;

impl FilterRegistry {
    /// Register `ctor` under `name`.
    ///
    /// The first registration for a given name wins; later registrations are
    /// a silent no-op, since initialization order across independently
    /// compiled filter modules is unspecified.
    pub fn register_filter<F>(name: &str, ctor: F)
    where
        F: Fn() -> Box<dyn FilterStage> + Send + Sync + 'static,
    {
        let mut guard = FILTER_REGISTER.lock();
        let register = guard.get_or_insert_with(HashMap::new);
        if register.contains_key(name) {
            debug!(name = %name, "Filter already registered, keeping first registration");
            return;
        }
        register.insert(name.to_string(), Arc::new(ctor));
        debug!(name = %name, count = register.len(), "Filter registered");
    }

    /// Construct a new instance of the filter registered under `name`.
    ///
    /// Fails with [`FilterError::UnknownFilter`] if no such registration
    /// exists; the registry is left unmodified. Each successful call yields a
    /// distinct instance.
    pub fn make_filter(name: &str) -> Result<Box<dyn FilterStage>> {
        let ctor = {
            let mut guard = FILTER_REGISTER.lock();
            let register = guard.get_or_insert_with(HashMap::new);
            register
                .get(name)
                .cloned()
                .ok_or_else(|| FilterError::UnknownFilter {
                    name: name.to_string(),
                })?
        };

        // Invoked outside the lock: construction may do arbitrary setup.
        Ok(ctor())
    }

    /// Snapshot of all registered filter names, in no particular order.
    pub fn list_filters() -> Vec<String> {
        let mut guard = FILTER_REGISTER.lock();
        let register = guard.get_or_insert_with(HashMap::new);
        register.keys().cloned().collect()
    }
}
