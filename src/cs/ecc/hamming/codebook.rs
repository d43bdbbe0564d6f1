//! Codeword table built by exhaustive search.
//!
//! Every `n`-bit integer is tried in ascending order and kept when its
//! syndrome is zero. The codewords form the kernel of the parity-check
//! map, a subspace of dimension `n - m`, so exactly `2^(n - m)` of the
//! `2^n` candidates are accepted. The search cost is exponential in `n`.
//!
//! Words are stored packed in a single bit buffer next to the integer
//! each word came from. Because those integers are discovered in
//! ascending order, lookup is a binary search over them.

use bitvec::prelude::*;
use log::{debug, info};

use crate::cs::ecc::hamming::gf2::{integer_from_vector, vector_from_integer, BitVector};
use crate::cs::ecc::hamming::parity::ParityCheckMatrix;
use crate::cs::ecc::Result;
use crate::cs::error::Error;

/// Ordered, read-only table of all codewords of a Hamming code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    /// Codeword length `n`
    word_len: usize,
    /// All codewords back to back, `len() * word_len` bits
    words: BitVector,
    /// Source integer of each codeword, strictly ascending
    keys: Vec<u64>,
}

impl Codebook {
    /// Number of codewords.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Codeword length `n`.
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    /// Codeword at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn word(&self, index: usize) -> &BitSlice<u8, Msb0> {
        let start = index * self.word_len;
        &self.words[start..start + self.word_len]
    }

    /// Codeword at `index`, or `None` past the end of the table.
    pub fn get(&self, index: usize) -> Option<&BitSlice<u8, Msb0>> {
        if index < self.len() {
            Some(self.word(index))
        } else {
            None
        }
    }

    /// Integer encodings of the codewords, in table order.
    pub fn keys(&self) -> &[u64] {
        &self.keys
    }

    /// Iterates over the codewords in table order.
    pub fn iter(&self) -> impl Iterator<Item = &BitSlice<u8, Msb0>> + '_ {
        // chunks_exact panics on a zero chunk size
        self.words.chunks_exact(self.word_len.max(1))
    }

    /// Index of the first codeword equal to `word`, if any.
    pub fn position(&self, word: &BitSlice<u8, Msb0>) -> Option<usize> {
        if word.len() != self.word_len {
            return None;
        }
        self.keys.binary_search(&integer_from_vector(word)).ok()
    }
}

/// Enumerates all codewords of length `word_len` accepted by `matrix`,
/// stopping once `target` have been found.
///
/// # Arguments
///
/// * `matrix` - Parity-check matrix of the code
/// * `word_len` - Codeword length `n`, must equal the matrix column count
/// * `target` - Number of codewords `N` the code is known to have
///
/// # Returns
///
/// The codeword table in ascending order of source integer.
///
/// Fails with [`Error::TableTooLarge`] before searching if a table of
/// `target` codewords cannot be allocated, and with
/// [`Error::EnumerationShortfall`] if the search space is exhausted before
/// `target` codewords turn up.
pub fn enumerate_codewords(
    matrix: &ParityCheckMatrix,
    word_len: usize,
    target: u64,
) -> Result<Codebook> {
    if word_len != matrix.column_count() {
        return Err(Error::LengthMismatch {
            expected: matrix.column_count(),
            actual: word_len,
        });
    }
    if word_len >= u64::BITS as usize {
        return Err(Error::InvalidInput(format!(
            "codeword length {} does not fit a 64-bit candidate",
            word_len
        )));
    }

    let max_bits = BitSlice::<u8, Msb0>::MAX_BITS;
    let too_large = || Error::TableTooLarge {
        order: matrix.row_count() as u32,
        bytes: target.saturating_mul(word_len.div_ceil(8) as u64 + 8),
        limit: (max_bits / 8) as u64,
    };
    let capacity = usize::try_from(target).map_err(|_| too_large())?;
    let bit_capacity = capacity
        .checked_mul(word_len)
        .filter(|&bits| bits <= max_bits)
        .ok_or_else(too_large)?;

    // Both buffers are reserved up front; a failed reservation is an error
    let mut storage: Vec<u8> = Vec::new();
    storage
        .try_reserve_exact(bit_capacity.div_ceil(8))
        .map_err(|_| too_large())?;
    let mut words = BitVector::from_vec(storage);
    let mut keys: Vec<u64> = Vec::new();
    keys.try_reserve_exact(capacity).map_err(|_| too_large())?;
    let mut last_decile = 0;

    for candidate in 0..(1u64 << word_len) {
        if keys.len() as u64 == target {
            break;
        }

        let vector = vector_from_integer(word_len, candidate);
        if matrix.multiply(&vector).any() {
            continue;
        }

        words.extend_from_bitslice(&vector);
        keys.push(candidate);

        let decile = keys.len() as u64 * 10 / target.max(1);
        if decile > last_decile {
            last_decile = decile;
            debug!("codeword search {}% complete", decile * 10);
        }
    }

    let found = keys.len() as u64;
    if found < target {
        return Err(Error::EnumerationShortfall {
            found,
            expected: target,
        });
    }

    info!(
        "enumerated {} codewords of length {} from the parity-check kernel",
        found, word_len
    );

    Ok(Codebook {
        word_len,
        words,
        keys,
    })
}
