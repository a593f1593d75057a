//! Timing engine error types

use thiserror::Error;

/// Failure signalled by a running animation
///
/// Cancellation is never represented here: a disposed animation finishes
/// with [`Outcome::Cancelled`](crate::animation::Outcome::Cancelled).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A setter rejected a value while applying it to its target
    #[error("Failed to apply animated value: {0}")]
    Apply(String),

    /// The presentation queue was dropped before a value could be applied
    #[error("Presentation queue closed before value was applied")]
    PresenterClosed,

    /// A spawned animation task panicked
    #[error("Animation task panicked: {0}")]
    Panicked(String),

    /// Caller-defined failure raised from inside an animation
    #[error("Animation failed: {0}")]
    Failed(String),
}

impl AnimationError {
    /// Create a setter failure
    pub fn apply(reason: impl Into<String>) -> Self {
        Self::Apply(reason.into())
    }

    /// Create a caller-defined failure
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Invalid timing configuration, reported at construction time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The clock sampling interval must be non-zero
    #[error("Sample interval must be greater than zero")]
    ZeroSampleInterval,

    /// An ease name did not match any known curve
    #[error("Unknown ease: {0}")]
    UnknownEase(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
