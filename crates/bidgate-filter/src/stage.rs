//! The filter stage contract.
//!
//! Concrete stages (budget checks, geo fencing, blacklists, ...) live in their
//! own modules and register themselves by name with the
//! [`FilterRegistry`](crate::registry::FilterRegistry); this crate only
//! defines the capability they implement and the statistics the chain keeps
//! while running them.

use crate::state::FilterState;
use std::sync::atomic::{AtomicU64, Ordering};

/// One pluggable admission-policy unit.
///
/// A stage receives the per-request [`FilterState`] and removes the
/// configurations it rejects, either globally via
/// [`FilterState::exclude_config`]/[`FilterState::narrow_configs`] or per
/// (impression, creative) cell via the narrowing methods. Stages must only
/// ever shrink the state, never grow it.
pub trait FilterStage: Send + Sync {
    /// Stable identifier of this stage, used for registration and as the
    /// exclusion reason recorded against configurations it drops.
    fn name(&self) -> &'static str;

    /// Chain ordering hint; lower-priority stages run first.
    ///
    /// Cheap coarse stages should claim low priorities so expensive ones see
    /// an already-narrowed state.
    fn priority(&self) -> u32 {
        0
    }

    /// Narrow `state` according to this stage's policy.
    fn filter(&self, state: &mut FilterState);
}

impl std::fmt::Debug for dyn FilterStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStage")
            .field("name", &self.name())
            .field("priority", &self.priority())
            .finish()
    }
}

/// Lock-free counter for chain statistics.
#[derive(Debug, Default)]
pub struct StageCounter {
    count: AtomicU64,
}

impl StageCounter {
    /// Create a new counter.
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Increment the counter.
    #[inline]
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current count.
    #[inline]
    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Reset the counter.
    #[inline]
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Statistics accumulated across every request a chain evaluates.
#[derive(Debug, Default)]
pub struct ChainStats {
    /// Requests run through the chain.
    pub requests: StageCounter,
    /// Individual stage evaluations.
    pub stage_runs: StageCounter,
    /// Requests where no configuration survived the chain.
    pub exhausted: StageCounter,
}

impl ChainStats {
    /// Create new chain statistics.
    pub const fn new() -> Self {
        Self {
            requests: StageCounter::new(),
            stage_runs: StageCounter::new(),
            exhausted: StageCounter::new(),
        }
    }

    /// Fraction of requests where every configuration was filtered out.
    pub fn exhaustion_rate(&self) -> f64 {
        let total = self.requests.get();
        if total == 0 {
            0.0
        } else {
            self.exhausted.get() as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_counter() {
        let counter = StageCounter::new();
        assert_eq!(counter.get(), 0);

        counter.increment();
        counter.increment();
        assert_eq!(counter.get(), 2);

        counter.reset();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_chain_stats_exhaustion_rate() {
        let stats = ChainStats::new();
        assert_eq!(stats.exhaustion_rate(), 0.0);

        stats.requests.increment();
        stats.requests.increment();
        stats.exhausted.increment();
        assert!((stats.exhaustion_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_priority() {
        struct Noop;
        impl FilterStage for Noop {
            fn name(&self) -> &'static str {
                "noop"
            }
            fn filter(&self, _state: &mut FilterState) {}
        }
        assert_eq!(Noop.priority(), 0);
    }
}
