//! Parity-check matrix of a Hamming code.
//!
//! For order `m` the matrix has `m` rows and `n = 2^m - 1` columns, and
//! column `j` (1-indexed) is the binary representation of `j` with the
//! most significant bit in row 0. Multiplying a word by this matrix gives
//! its syndrome; a single flipped bit at position `j - 1` yields a
//! syndrome equal to column `j`, which is what makes correction a lookup.

use std::fmt;

use bitvec::prelude::*;

use crate::cs::ecc::hamming::gf2::{self, BitVector};
use crate::cs::ecc::hamming::params::CodeParams;
use crate::cs::ecc::Result;

/// The `m x n` binary parity-check matrix `H`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityCheckMatrix {
    rows: Vec<BitVector>,
    columns: usize,
}

impl ParityCheckMatrix {
    /// Builds the matrix for already validated code parameters.
    pub fn new(params: &CodeParams) -> Self {
        let m = params.parity_bits();
        let n = params.word_len();
        let mut rows = vec![bitvec![u8, Msb0; 0; n]; m];

        for y in 1..=n {
            for x in 0..m {
                rows[m - x - 1].set(y - 1, (y >> x) & 1 == 1);
            }
        }

        ParityCheckMatrix { rows, columns: n }
    }

    /// The matrix rows, each of length `n`.
    pub fn rows(&self) -> &[BitVector] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Entry at `row`, `col` (both 0-indexed).
    pub fn entry(&self, row: usize, col: usize) -> Option<bool> {
        self.rows.get(row).and_then(|r| r.get(col).map(|bit| *bit))
    }

    /// Column `j`, 1-indexed as in the code's construction.
    pub fn column(&self, j: usize) -> Option<BitVector> {
        if j == 0 || j > self.columns {
            return None;
        }
        Some(self.rows.iter().map(|row| row[j - 1]).collect())
    }

    /// Syndrome `H * word` over GF(2).
    pub fn multiply(&self, word: &BitSlice<u8, Msb0>) -> BitVector {
        gf2::matmul(&self.rows, word)
    }
}

impl fmt::Display for ParityCheckMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: Vec<&str> = row
                .iter()
                .by_vals()
                .map(|bit| if bit { "1" } else { "0" })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Builds the parity-check matrix for code order `order`.
pub fn build_parity_matrix(order: u32) -> Result<ParityCheckMatrix> {
    let params = CodeParams::new(order)?;
    Ok(ParityCheckMatrix::new(&params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ecc::hamming::gf2::{integer_from_vector, vector_from_integer};
    use crate::cs::error::Error;

    #[test]
    fn test_order_three_matrix() {
        let h = build_parity_matrix(3).unwrap();
        assert_eq!(h.row_count(), 3);
        assert_eq!(h.column_count(), 7);
        assert_eq!(h.rows()[0], bitvec![u8, Msb0; 0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(h.rows()[1], bitvec![u8, Msb0; 0, 1, 1, 0, 0, 1, 1]);
        assert_eq!(h.rows()[2], bitvec![u8, Msb0; 1, 0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_columns_are_binary_indices() {
        for order in 2..=6 {
            let h = build_parity_matrix(order).unwrap();
            let m = order as usize;
            for j in 1..=h.column_count() {
                let column = h.column(j).unwrap();
                assert_eq!(column, vector_from_integer(m, j as u64));
                assert_eq!(integer_from_vector(&column), j as u64);
            }
        }
    }

    #[test]
    fn test_column_and_entry_bounds() {
        let h = build_parity_matrix(2).unwrap();
        assert!(h.column(0).is_none());
        assert!(h.column(4).is_none());
        assert_eq!(h.entry(0, 2), Some(true));
        assert_eq!(h.entry(1, 1), Some(false));
        assert_eq!(h.entry(2, 0), None);
        assert_eq!(h.entry(0, 3), None);
    }

    #[test]
    fn test_single_bit_syndrome_matches_column() {
        let h = build_parity_matrix(4).unwrap();
        for position in 0..h.column_count() {
            let mut word = bitvec![u8, Msb0; 0; h.column_count()];
            word.set(position, true);
            assert_eq!(h.multiply(&word), h.column(position + 1).unwrap());
        }
    }

    #[test]
    fn test_display() {
        let h = build_parity_matrix(2).unwrap();
        assert_eq!(h.to_string(), "0 1 1\n1 0 1\n");
    }

    #[test]
    fn test_invalid_order() {
        assert!(matches!(
            build_parity_matrix(1),
            Err(Error::InvalidOrder { order: 1, .. })
        ));
    }
}
