//! Linear algebra over GF(2).
//!
//! Addition is XOR and multiplication is AND, so a matrix-vector product
//! reduces to the parity of the AND of each row with the vector. Vectors
//! are most-significant-bit first throughout: bit 0 of a vector is the
//! highest-order bit of the integer it represents.

use bitvec::prelude::*;

/// A binary vector, most significant bit first.
pub type BitVector = BitVec<u8, Msb0>;

/// Multiplies a binary matrix (given as its rows) by a binary vector.
///
/// Returns one bit per row. Rows and vector are expected to share a length.
pub fn matmul(rows: &[BitVector], vector: &BitSlice<u8, Msb0>) -> BitVector {
    let mut result = BitVector::with_capacity(rows.len());
    for row in rows {
        debug_assert_eq!(row.len(), vector.len());
        let bit = row
            .iter()
            .by_vals()
            .zip(vector.iter().by_vals())
            .fold(false, |acc, (a, b)| acc ^ (a & b));
        result.push(bit);
    }
    result
}

/// Decomposes `value` into `width` bits, most significant first.
///
/// Bits above position 63 are zero.
pub fn vector_from_integer(width: usize, value: u64) -> BitVector {
    let mut vector = BitVector::with_capacity(width);
    for i in 0..width {
        let shift = width - i - 1;
        let bit = shift < 64 && (value >> shift) & 1 == 1;
        vector.push(bit);
    }
    vector
}

/// Recomposes a bit vector into an integer, most significant first.
///
/// Only the lowest 64 bits of a longer vector survive.
pub fn integer_from_vector(vector: &BitSlice<u8, Msb0>) -> u64 {
    vector
        .iter()
        .by_vals()
        .fold(0u64, |acc, bit| (acc << 1) | u64::from(bit))
}
