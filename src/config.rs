//! Sizing policy for `ChainedTable`.

use crate::error::ConfigError;

/// Bucket count of a freshly created table.
pub const DEFAULT_INITIAL_CAPACITY: usize = 128;

/// Load factor (`len / capacity`) above which the next insert doubles capacity.
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub load_factor_threshold: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_load_factor_threshold(mut self, threshold: f64) -> Self {
        self.load_factor_threshold = threshold;
        self
    }

    /// Rejects a zero bucket count and thresholds that are NaN, infinite or
    /// not strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let t = self.load_factor_threshold;
        if !t.is_finite() || t <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(t));
        }
        Ok(())
    }
}
