//! Error types shared by the coding-theory modules.

use thiserror::Error;

/// Errors raised while configuring, building or running a Hamming code.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The code order cannot produce a usable Hamming code.
    #[error("invalid code order {order}: {reason}")]
    InvalidOrder { order: u32, reason: String },

    /// The codeword table for this order would exceed the configured memory limit.
    #[error("codeword table for order {order} needs about {bytes} bytes, limit is {limit}")]
    TableTooLarge { order: u32, bytes: u64, limit: u64 },

    /// Exhaustive search found fewer zero-syndrome words than the code guarantees.
    #[error("found {found} codewords, expected {expected}")]
    EnumerationShortfall { found: u64, expected: u64 },

    /// A received bit stream does not split into whole codewords.
    #[error("stream of {len} bits is not a multiple of the {word_len}-bit word length")]
    MisalignedStream { len: usize, word_len: usize },

    /// A vector does not have the length the operation requires.
    #[error("expected a vector of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A bit-flip probability outside `[0, 1]`.
    #[error("flip probability {0} is not in [0, 1]")]
    InvalidProbability(f64),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for coding-theory operations
pub type Result<T> = std::result::Result<T, Error>;
