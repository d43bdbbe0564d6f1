//! Hamming error correction code implementation.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! A code of order `m` has codewords of length `n = 2^m - 1` carrying `n - m` information bits,
//! and corrects any single flipped bit per codeword. The parity-check matrix lists `1..=n` in
//! binary as its columns, so the syndrome of a word with one flipped bit is the binary index of
//! that bit.
//!
//! This implementation provides:
//! - Parity-check matrix construction for any order from 2 to 6
//! - Exhaustive enumeration of the codeword table
//! - Encoding of 7-bit symbols as codewords
//! - A binary symmetric channel with injectable randomness
//! - Syndrome decoding with single-bit correction and correction counts
//!
//! The flow of one session is
//! [`build_parity_matrix`] → [`enumerate_codewords`] → [`encode`] → [`corrupt`] →
//! [`correct_and_decode`], or the same steps bundled in [`HammingCode`].
//!
//! # Examples
//!
//! ```rust
//! use hamming_channel::hamming::{BinarySymmetricChannel, HammingCode};
//!
//! let code = HammingCode::new(4).unwrap();
//! let mut channel = BinarySymmetricChannel::with_seed(0.0, 1).unwrap();
//! let sent = code.transmit(b"Hello", &mut channel).unwrap();
//! assert_eq!(sent.decoded.text(), "Hello");
//! assert_eq!(sent.decoded.corrections(), 0);
//! ```

pub mod channel;
pub mod codebook;
pub mod gf2;
pub mod mapping;
pub mod params;
pub mod parity;
pub mod pipeline;
pub mod syndrome;


pub use channel::{
    corrupt, flip_probability_from_denominator, BinarySymmetricChannel, Channel,
    ForcedFlipChannel, DEFAULT_FLIP_DENOMINATOR,
};
pub use codebook::{enumerate_codewords, Codebook};
pub use gf2::{integer_from_vector, matmul, vector_from_integer, BitVector};
pub use mapping::{SymbolMapping, ALPHABET_SIZE, UNKNOWN_SYMBOL};
pub use params::{CodeConfig, CodeParams, DEFAULT_ORDER, MAX_ORDER, MIN_ORDER};
pub use parity::{build_parity_matrix, ParityCheckMatrix};
pub use pipeline::{
    correct_and_decode, encode, format_bit_stream, DecodedMessage, DecodedSymbol, HammingCode,
    Transmission,
};
pub use syndrome::{correct_in_place, correct_word, syndrome, Correction};
