//! Order book configuration

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};

/// Default number of levels retained per side
pub const DEFAULT_PRUNE_THRESHOLD: usize = 1000;

/// Tunables for one order book instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookConfig {
    /// Maximum number of levels retained per side after each event
    pub prune_threshold: usize,
}

impl OrderBookConfig {
    /// Create a config retaining `prune_threshold` levels per side
    pub fn new(prune_threshold: usize) -> Self {
        Self { prune_threshold }
    }

    /// Check the configuration can drive a book.
    ///
    /// # Errors
    /// [`OrderBookError::InvalidConfiguration`] when `prune_threshold` is zero.
    pub fn validate(&self) -> Result<(), OrderBookError> {
        if self.prune_threshold == 0 {
            return Err(OrderBookError::InvalidConfiguration {
                message: "prune_threshold must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for OrderBookConfig {
    fn default() -> Self {
        Self {
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
        }
    }
}
