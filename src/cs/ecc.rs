//! Error correction code implementations.
//!
//! This module provides a single-error-correcting Hamming code family,
//! parameterised by the number of parity bits (the code order `m`):
//! - Parity-check matrix construction over GF(2)
//! - Exhaustive enumeration of the codeword space
//! - Symbol to codeword mapping
//! - Binary symmetric channel simulation
//! - Syndrome decoding with single-bit correction
//!
//! # Examples
//!
//! ```rust
//! use hamming_channel::hamming::HammingCode;
//!
//! let code = HammingCode::new(3).unwrap();
//! let encoded = code.encode(b"hi").unwrap();
//! let decoded = code.correct_and_decode(&encoded).unwrap();
//! assert_eq!(decoded.corrections(), 0);
//! ```

pub use crate::cs::error::Result;

/// Hamming codes
pub mod hamming;
pub use hamming::{
    build_parity_matrix, correct_and_decode, corrupt, encode, enumerate_codewords, HammingCode,
};
