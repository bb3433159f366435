//! Admission-control filtering for real-time bid requests
//!
//! This crate is the filter engine of the BidGate exchange: for every
//! incoming bid request it tracks which advertiser configurations may still
//! bid, on which impression slots and with which creatives, as a set of
//! bitmasks narrowed by pluggable filter stages.
//!
//! - Fixed-universe [`ConfigSet`] bitmasks with hardware bit-scan iteration
//! - Per-request [`FilterState`] holding the (impression, creative)
//!   eligibility matrix, the global alive set and exclusion diagnostics
//! - A process-wide [`FilterRegistry`] so independently developed stages can
//!   be instantiated by name at chain-assembly time
//! - [`FilterChain`] execution with priority ordering and early exit
//! - YAML chain configuration
//!
//! # Performance Goals
//!
//! - Narrowing and reconstruction dominated by word-wise AND and bit-scan
//! - No allocation on the per-request hot path beyond the result structure
//! - No locking outside registry registration/lookup
//!
//! # Examples
//!
//! ## Narrowing and reconstruction
//!
//! ```rust
//! use bidgate_filter::state::FilterState;
//!
//! // One impression with two creatives, three candidate configurations.
//! let mut state = FilterState::new(&[2], 3);
//!
//! // A stage drops configuration 0 entirely.
//! state.exclude_config(0, "budget");
//!
//! let biddable = state.biddable_spots();
//! assert!(!biddable.contains_key(&0));
//! assert_eq!(biddable[&1][0].creatives, vec![0, 1]);
//! ```
//!
//! ## Registering and assembling a chain
//!
//! ```rust
//! use bidgate_filter::chain::FilterChain;
//! use bidgate_filter::registry::FilterRegistry;
//! use bidgate_filter::stage::FilterStage;
//! use bidgate_filter::state::FilterState;
//!
//! struct Passthrough;
//!
//! impl FilterStage for Passthrough {
//!     fn name(&self) -> &'static str {
//!         "passthrough"
//!     }
//!     fn filter(&self, _state: &mut FilterState) {}
//! }
//!
//! FilterRegistry::register_filter("passthrough", || Box::new(Passthrough));
//!
//! let chain = FilterChain::from_names(["passthrough"]).unwrap();
//! let mut state = FilterState::new(&[1], 2);
//! assert_eq!(chain.run(&mut state).len(), 2);
//! ```

pub mod chain;
pub mod config;
pub mod registry;
pub mod set;
pub mod stage;
pub mod state;

// Re-export commonly used types
pub use chain::FilterChain;
pub use config::ChainConfig;
pub use registry::{ConstructFn, FilterRegistry};
pub use set::ConfigSet;
pub use stage::{ChainStats, FilterStage, StageCounter};
pub use state::{FilterReasons, FilterState};
