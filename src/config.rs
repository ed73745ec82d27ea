use crate::error::{Error, Result};
use serde::Deserialize;

/// The default minimum degree, i.e. nodes hold between 1 and 3 keys.
pub const DEFAULT_MIN_DEGREE: usize = 2;

/// Ordered index configuration. The minimum degree t bounds every non-root node to between t-1
/// and 2t-1 keys, and is fixed for the lifetime of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub min_degree: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { min_degree: DEFAULT_MIN_DEGREE }
    }
}

impl IndexConfig {
    /// Creates a configuration with the given minimum degree, validating it.
    pub fn with_min_degree(min_degree: usize) -> Result<Self> {
        let config = Self { min_degree };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a usable tree.
    pub fn validate(&self) -> Result<()> {
        if self.min_degree < 2 {
            return Err(Error::Config(format!(
                "minimum degree must be at least 2, got {}",
                self.min_degree
            )));
        }
        Ok(())
    }

    /// The maximum number of keys a node can hold, 2t-1.
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// The minimum number of keys a non-root node must hold, t-1.
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }
}
