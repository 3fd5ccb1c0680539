//! Error types for the syncat-rates crate.

/// Error type for all fallible operations in the syncat-rates crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    /// Returned when the rate configuration is inconsistent.
    #[error("invalid rate configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a count-model name is not recognised.
    #[error("unsupported distribution: {name:?} (expected \"poisson\" or \"negative_binomial\")")]
    UnsupportedModel {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when no event precedes the forecast start.
    #[error("no historical events before the forecast start")]
    EmptyHistory,

    /// Returned when count-distribution parameters cannot be sampled from.
    #[error("invalid count distribution: {reason}")]
    InvalidDistribution {
        /// Description of the problem.
        reason: String,
    },
}
