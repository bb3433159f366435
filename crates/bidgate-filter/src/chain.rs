//! Filter chain assembly and execution.
//!
//! A chain is the ordered list of filter stages one exchange endpoint runs
//! over every bid request. Stages are instantiated by name through the
//! [`FilterRegistry`](crate::registry::FilterRegistry) so the chain's makeup
//! is a configuration concern, not a compile-time one.

use crate::registry::FilterRegistry;
use crate::stage::{ChainStats, FilterStage};
use crate::state::FilterState;
use bidgate_core::error::Result;
use bidgate_core::types::BiddableMap;
use tracing::{debug, trace};

/// An ordered sequence of filter stages plus run statistics.
pub struct FilterChain {
    stages: Vec<Box<dyn FilterStage>>,
    stats: ChainStats,
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("stats", &self.stats)
            .finish()
    }
}

impl FilterChain {
    /// Build a chain from already-constructed stages, sorted by ascending
    /// priority.
    pub fn new(mut stages: Vec<Box<dyn FilterStage>>) -> Self {
        stages.sort_by_key(|stage| stage.priority());
        Self {
            stages,
            stats: ChainStats::new(),
        }
    }

    /// Instantiate every named filter through the registry and build a chain.
    ///
    /// Fails on the first unknown name; a misconfigured chain refuses to
    /// start rather than silently skipping a stage.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stages = names
            .into_iter()
            .map(|name| FilterRegistry::make_filter(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        debug!(stage_count = stages.len(), "Filter chain assembled");
        Ok(Self::new(stages))
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage over `state` and reconstruct the biddable set.
    ///
    /// Stops early once no configuration is left alive; later stages cannot
    /// bring anything back.
    pub fn run(&self, state: &mut FilterState) -> BiddableMap {
        self.stats.requests.increment();

        for stage in &self.stages {
            stage.filter(state);
            self.stats.stage_runs.increment();

            trace!(
                stage = stage.name(),
                alive = state.configs().count(),
                "Stage evaluated"
            );

            if state.configs().is_empty() {
                break;
            }
        }

        if state.configs().is_empty() {
            self.stats.exhausted.increment();
        }

        let biddable = state.biddable_spots();
        debug!(
            biddable_configs = biddable.len(),
            dropped = state.filter_reasons().len(),
            "Filter chain complete"
        );
        biddable
    }

    /// Statistics across every request this chain has evaluated.
    pub fn stats(&self) -> &ChainStats {
        &self.stats
    }
}
