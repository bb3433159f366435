//! Core identifier and result types for bid admission.
//!
//! A bid request carries one or more impression slots; each slot has a fixed
//! list of candidate creatives; each advertiser bidding configuration is
//! identified by an opaque non-negative integer. The filter chain's final
//! answer maps every surviving configuration to the impressions and creatives
//! it may still bid on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque identifier of one advertiser/campaign bidding configuration.
///
/// Configuration ids are dense and zero-based within one request's candidate
/// universe, which makes them usable as bit indices.
pub type ConfigId = u32;

/// One biddable impression for a configuration: the impression's zero-based
/// index within the bid request and the creative indices still eligible for
/// that slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiddableSpot {
    /// Zero-based impression slot index within the bid request.
    pub impression: u16,
    /// Surviving creative indices for this slot, in ascending order.
    pub creatives: Vec<u16>,
}

impl BiddableSpot {
    /// Create a new biddable spot.
    pub fn new(impression: u16, creatives: Vec<u16>) -> Self {
        Self {
            impression,
            creatives,
        }
    }
}

/// All biddable impressions for one configuration, in ascending impression
/// order.
pub type BiddableSpots = Vec<BiddableSpot>;

/// The final answer a filter chain produces: for every configuration still
/// alive after all stages, where it may bid.
///
/// A configuration absent from this map was filtered out entirely.
pub type BiddableMap = HashMap<ConfigId, BiddableSpots>;
