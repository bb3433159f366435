//! Chain configuration.
//!
//! The set of filter stages an endpoint runs is declared in YAML and resolved
//! against the process-wide registry at startup:
//!
//! ```yaml
//! filters:
//!   - blacklist
//!   - budget
//!   - geo
//! ```

use crate::chain::FilterChain;
use anyhow::{anyhow, Context, Result};
use bidgate_core::error::FilterError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Declarative filter chain configuration loadable from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Names of the filter stages to run, resolved through the registry.
    pub filters: Vec<String>,
}

impl ChainConfig {
    /// Load a chain configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read chain config file: {}", path.display()))?;

        let config: ChainConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse chain config file: {}", path.display()))?;

        config.validate()?;

        info!(
            path = %path.display(),
            filter_count = config.filters.len(),
            "Loaded filter chain configuration"
        );

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.filters.is_empty() {
            return Err(FilterError::EmptyChain.into());
        }

        let mut seen = HashSet::new();
        for name in &self.filters {
            if name.is_empty() {
                return Err(anyhow!("Filter name cannot be empty"));
            }
            if !seen.insert(name) {
                return Err(anyhow!("Duplicate filter in chain: {}", name));
            }
        }

        Ok(())
    }

    /// Resolve every name through the registry and build the chain.
    pub fn into_chain(self) -> Result<FilterChain> {
        self.validate()?;
        let chain = FilterChain::from_names(&self.filters)
            .context("Failed to assemble filter chain from configuration")?;
        Ok(chain)
    }
}
