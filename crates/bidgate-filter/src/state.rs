//! Per-request filter state.
//!
//! One `FilterState` is built per bid request, owned by the thread evaluating
//! that request, narrowed monotonically by successive filter stages, queried
//! once for its biddable-spots answer, and then discarded or reset. It carries
//! no internal synchronization; concurrent requests use independent instances.

use crate::set::ConfigSet;
use bidgate_core::types::{BiddableMap, BiddableSpot, ConfigId};
use std::collections::HashMap;

/// Diagnostic map of which filter dropped which configuration.
///
/// Populated only for configurations removed from the global alive set; used
/// for logging and auditing, never for control flow.
pub type FilterReasons = HashMap<ConfigId, String>;

/// Mutable admission state for one bid request.
///
/// Holds, for every (impression, creative) pair, the set of configurations
/// still eligible to show that creative in that slot, plus the global set of
/// configurations still alive at all. Filter stages only ever shrink these
/// sets; [`FilterState::biddable_spots`] reconstructs the final answer.
pub struct FilterState {
    /// Global alive set over the configuration universe.
    configs: ConfigSet,
    /// Eligibility matrix indexed `[impression][creative]`.
    creatives: Vec<Vec<ConfigSet>>,
    reasons: FilterReasons,
}

impl FilterState {
    /// Create the state for a request with `creatives_per_imp.len()`
    /// impression slots, each carrying the given number of candidate
    /// creatives, over a universe of `universe` configuration ids.
    ///
    /// Every matrix cell starts with all configurations eligible and the
    /// alive set starts with all configurations alive.
    pub fn new(creatives_per_imp: &[usize], universe: usize) -> Self {
        let creatives = creatives_per_imp
            .iter()
            .map(|&count| (0..count).map(|_| ConfigSet::full(universe)).collect())
            .collect();
        Self {
            configs: ConfigSet::full(universe),
            creatives,
            reasons: FilterReasons::new(),
        }
    }

    /// The global alive set.
    #[inline]
    pub fn configs(&self) -> &ConfigSet {
        &self.configs
    }

    /// Number of impression slots in the request.
    #[inline]
    pub fn impressions(&self) -> usize {
        self.creatives.len()
    }

    /// Number of candidate creatives for one impression slot.
    #[inline]
    pub fn creatives_for(&self, impression: usize) -> usize {
        self.creatives[impression].len()
    }

    /// Intersect the global alive set with `mask`.
    ///
    /// The eligibility matrix is not touched here; [`biddable_spots`] applies
    /// the alive set to every cell before reconstructing, so a configuration
    /// dropped globally can never resurface in a cell that no stage narrowed.
    ///
    /// [`biddable_spots`]: FilterState::biddable_spots
    #[inline]
    pub fn narrow_configs(&mut self, mask: &ConfigSet) {
        self.configs.intersect(mask);
    }

    /// Drop one configuration from the alive set, recording which filter
    /// rejected it.
    ///
    /// A no-op for configurations already dropped, so the recorded reason is
    /// always the first stage that rejected the configuration.
    pub fn exclude_config(&mut self, config: ConfigId, filter: &str) {
        if !self.configs.contains(config) {
            return;
        }
        self.configs.remove(config);
        self.reasons.insert(config, filter.to_string());
    }

    /// Intersect every eligibility-matrix cell with `mask`.
    pub fn narrow_all_creatives(&mut self, mask: &ConfigSet) {
        for imp in &mut self.creatives {
            for cell in imp {
                cell.intersect(mask);
            }
        }
    }

    /// Intersect a single (impression, creative) cell with `mask`.
    #[inline]
    pub fn narrow_creatives(&mut self, impression: usize, creative: usize, mask: &ConfigSet) {
        self.creatives[impression][creative].intersect(mask);
    }

    /// Reconstruct the final biddable set from the narrowed state.
    ///
    /// Safe to call more than once: the only mutation is re-applying the
    /// current alive set to every cell, which is idempotent and guarantees
    /// matrix/alive-set consistency even if no stage narrowed a given cell.
    ///
    /// Per configuration, impression entries come out in ascending impression
    /// order and creative indices in ascending creative order.
    pub fn biddable_spots(&mut self) -> BiddableMap {
        // Remove creatives for configs that have been filtered out.
        let alive = self.configs.clone();
        self.narrow_all_creatives(&alive);

        debug_assert!(
            self.creatives
                .iter()
                .flatten()
                .all(|cell| cell.is_subset_of(&alive)),
            "eligibility cell not a subset of the alive set"
        );

        let mut biddable = BiddableMap::new();

        for (imp_id, creatives) in self.creatives.iter().enumerate() {
            let mut biddable_creatives: HashMap<ConfigId, Vec<u16>> = HashMap::new();

            for (cr_id, configs) in creatives.iter().enumerate() {
                let mut config = configs.next(0);
                while config < configs.size() {
                    biddable_creatives
                        .entry(config as ConfigId)
                        .or_default()
                        .push(cr_id as u16);
                    config = configs.next(config + 1);
                }
            }

            for (config, creative_ids) in biddable_creatives {
                biddable
                    .entry(config)
                    .or_default()
                    .push(BiddableSpot::new(imp_id as u16, creative_ids));
            }
        }

        biddable
    }

    /// The exclusion reasons recorded so far.
    pub fn filter_reasons(&self) -> &FilterReasons {
        &self.reasons
    }

    /// Clear the exclusion-reason map.
    pub fn reset_filter_reasons(&mut self) {
        self.reasons.clear();
    }

    /// Restore the just-constructed state so the allocation can be reused for
    /// another request with the same shape.
    pub fn reset(&mut self) {
        let universe = self.configs.size();
        self.configs = ConfigSet::full(universe);
        for imp in &mut self.creatives {
            for cell in imp {
                *cell = ConfigSet::full(universe);
            }
        }
        self.reasons.clear();
    }
}
