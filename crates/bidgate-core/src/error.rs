//! Error types for the BidGate bid admission engine.
//!
//! All errors are synchronous and surface immediately to the direct caller;
//! the library performs no retries and no internal recovery. They are
//! serializable so the chain owner can attach them to audit logs or API
//! responses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using FilterError as the error type.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Failure modes of filter-chain assembly and registry lookup.
///
/// Note that duplicate filter registration is *not* an error: the registry
/// resolves it silently with a first-registration-wins policy, since static
/// initialization order across independently compiled filter modules is
/// unspecified.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum FilterError {
    /// A filter name was requested that no module ever registered.
    ///
    /// The chain owner is expected to treat this as a configuration error and
    /// refuse to start the chain rather than silently skip the stage.
    #[error("Unknown filter: {name}")]
    UnknownFilter { name: String },

    /// A chain configuration listed no filters at all.
    #[error("Filter chain configuration contains no filters")]
    EmptyChain,
}
