//! Aggregation options.

use serde::{Deserialize, Serialize};

/// What to do with indicator cells that are not 0/1 or true/false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorPolicy {
    /// Count them as 0 (not transitioned).
    #[default]
    Lenient,
    /// Fail with [`AggregateError::NonCoercibleIndicator`].
    ///
    /// [`AggregateError::NonCoercibleIndicator`]: crate::AggregateError::NonCoercibleIndicator
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    pub indicator_policy: IndicatorPolicy,
}

impl AggregateOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            indicator_policy: IndicatorPolicy::Strict,
        }
    }

    #[must_use]
    pub fn with_indicator_policy(mut self, policy: IndicatorPolicy) -> Self {
        self.indicator_policy = policy;
        self
    }
}
