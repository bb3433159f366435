//! # BidGate Core
//!
//! Core types and error handling for the BidGate bid admission engine.
//!
//! This crate provides the foundational building blocks shared by the rest of
//! the system:
//!
//! - **Types**: Identifier types for bidding configurations, impressions and
//!   creatives, plus the `BiddableSpot`/`BiddableMap` result types a filter
//!   chain produces for downstream bidding logic.
//! - **Errors**: Error types using `thiserror` for the failure modes of chain
//!   assembly and registry lookup.
//!
//! ## Example
//!
//! ```
//! use bidgate_core::types::{BiddableSpot, ConfigId};
//!
//! let spot = BiddableSpot::new(0, vec![0, 2]);
//! assert_eq!(spot.impression, 0);
//! assert_eq!(spot.creatives, vec![0, 2]);
//! ```

pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{FilterError, Result};
pub use types::{BiddableMap, BiddableSpot, BiddableSpots, ConfigId};
