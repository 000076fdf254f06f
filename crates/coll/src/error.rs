//! Error types for the collection utilities.

/// Errors produced when constructing or exporting a [`RotatingBuffer`](crate::RotatingBuffer).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("rotating buffer capacity must be > 0")]
    ZeroCapacity,

    #[error("rotating buffer capacity {capacity} cannot be allocated")]
    CapacityTooLarge { capacity: usize },

    #[error("export destination is not a Vec<Option<{expected}>>")]
    IncompatibleDestination { expected: &'static str },

    #[error("export destination too short: need {required} slots, got {actual}")]
    DestinationTooShort { required: usize, actual: usize },
}
