//! Syndrome computation and single-bit error correction.
//!
//! The syndrome of a received word read as an integer `c` is zero for a
//! codeword; otherwise bit `c - 1` is flipped. Two or more flips inside
//! one word produce a syndrome pointing elsewhere and the word is
//! silently miscorrected. That is a property of the code, not an error.

use bitvec::prelude::*;
use log::debug;

use crate::cs::ecc::hamming::gf2::{integer_from_vector, BitVector};
use crate::cs::ecc::hamming::parity::ParityCheckMatrix;
use crate::cs::ecc::Result;
use crate::cs::error::Error;

/// Outcome of running the corrector on one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Zero syndrome, the word was left alone
    AlreadyCorrect,
    /// The bit at `position` (0-indexed) was flipped
    Corrected { position: usize },
}

impl Correction {
    pub fn was_corrected(&self) -> bool {
        matches!(self, Correction::Corrected { .. })
    }
}

/// Syndrome `H * word` of a received word.
pub fn syndrome(matrix: &ParityCheckMatrix, word: &BitSlice<u8, Msb0>) -> BitVector {
    matrix.multiply(word)
}

/// Corrects `word` in place.
pub fn correct_in_place(
    matrix: &ParityCheckMatrix,
    word: &mut BitSlice<u8, Msb0>,
) -> Result<Correction> {
    if word.len() != matrix.column_count() {
        return Err(Error::LengthMismatch {
            expected: matrix.column_count(),
            actual: word.len(),
        });
    }

    let point = integer_from_vector(&syndrome(matrix, word)) as usize;
    if point == 0 {
        return Ok(Correction::AlreadyCorrect);
    }

    // The syndrome is at most 2^m - 1 = n, so the position is in range
    let position = point - 1;
    let flipped = !word[position];
    word.set(position, flipped);
    debug!("flipped bit {} of received word", position);

    Ok(Correction::Corrected { position })
}

/// Corrects a copy of `word`, leaving the input untouched.
pub fn correct_word(
    matrix: &ParityCheckMatrix,
    word: &BitSlice<u8, Msb0>,
) -> Result<(BitVector, Correction)> {
    let mut corrected = word.to_bitvec();
    let correction = correct_in_place(matrix, &mut corrected)?;
    Ok((corrected, correction))
}
