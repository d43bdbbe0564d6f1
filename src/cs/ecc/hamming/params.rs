//! Code order validation and the constants derived from it.

use crate::cs::ecc::hamming::mapping::{SymbolMapping, ALPHABET_SIZE};
use crate::cs::ecc::Result;
use crate::cs::error::Error;

/// Smallest order with `m < n`.
pub const MIN_ORDER: u32 = 2;
/// Largest order whose codeword length fits in a `u64` candidate.
pub const MAX_ORDER: u32 = 6;
/// Order used when the caller does not choose one.
pub const DEFAULT_ORDER: u32 = 4;
/// Default cap on the resident codeword table (256 MiB).
pub const DEFAULT_MAX_TABLE_BYTES: u64 = 256 * 1024 * 1024;

/// Derived sizes of a Hamming code of order `m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeParams {
    /// Number of parity bits
    order: u32,
    /// Codeword length, `2^m - 1`
    word_len: usize,
    /// Number of codewords, `2^(n - m)`
    codeword_count: u64,
}

impl CodeParams {
    /// Validates `order` and derives `n` and `N`.
    pub fn new(order: u32) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order,
                reason: format!("order must be at least {}", MIN_ORDER),
            });
        }
        if order > MAX_ORDER {
            return Err(Error::InvalidOrder {
                order,
                reason: format!(
                    "order above {} gives codewords longer than 64 bits",
                    MAX_ORDER
                ),
            });
        }

        let word_len = (1usize << order) - 1;
        let codeword_count = 1u64 << (word_len - order as usize);

        Ok(CodeParams {
            order,
            word_len,
            codeword_count,
        })
    }

    /// The code order `m` (parity bits per word).
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Number of parity-check rows, equal to `m`.
    pub fn parity_bits(&self) -> usize {
        self.order as usize
    }

    /// Codeword length `n`.
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    /// Information bits per word, `n - m`.
    pub fn data_bits(&self) -> usize {
        self.word_len - self.order as usize
    }

    /// Size `N` of the codeword space.
    pub fn codeword_count(&self) -> u64 {
        self.codeword_count
    }

    /// Number of candidate vectors the enumerator has to scan, `2^n`.
    pub fn candidate_count(&self) -> u64 {
        1u64 << self.word_len
    }

    /// Estimated bytes held by a fully enumerated codeword table:
    /// the packed word bits plus one 64-bit lookup key per codeword.
    pub fn table_bytes(&self) -> u64 {
        let per_word = (self.word_len as u64).div_ceil(8) + 8;
        self.codeword_count.saturating_mul(per_word)
    }

    /// Fails with [`Error::TableTooLarge`] if the table would not fit in `limit` bytes.
    pub fn ensure_table_fits(&self, limit: u64) -> Result<()> {
        let bytes = self.table_bytes();
        if bytes > limit {
            return Err(Error::TableTooLarge {
                order: self.order,
                bytes,
                limit,
            });
        }
        Ok(())
    }
}

/// Caller-facing configuration of a Hamming code session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeConfig {
    /// Code order `m`
    pub order: u32,
    /// How input symbols are spread over the codeword table
    pub mapping: SymbolMapping,
    /// Upper bound on the codeword table footprint
    pub max_table_bytes: u64,
}

impl CodeConfig {
    /// Configuration for `order` with the default mapping and memory limit.
    pub fn new(order: u32) -> Self {
        CodeConfig {
            order,
            ..Default::default()
        }
    }

    /// Set the symbol mapping
    pub fn with_mapping(mut self, mapping: SymbolMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Set the maximum codeword table size in bytes
    pub fn with_max_table_bytes(mut self, bytes: u64) -> Self {
        self.max_table_bytes = bytes;
        self
    }

    /// Checks the whole configuration before anything is allocated.
    pub fn validate(&self) -> Result<CodeParams> {
        let params = CodeParams::new(self.order)?;
        params.ensure_table_fits(self.max_table_bytes)?;

        if self.mapping == SymbolMapping::Direct && params.codeword_count() < ALPHABET_SIZE {
            return Err(Error::InvalidInput(format!(
                "direct mapping needs at least {} codewords, order {} has {}",
                ALPHABET_SIZE,
                self.order,
                params.codeword_count()
            )));
        }

        Ok(params)
    }
}

impl Default for CodeConfig {
    fn default() -> Self {
        CodeConfig {
            order: DEFAULT_ORDER,
            mapping: SymbolMapping::default(),
            max_table_bytes: DEFAULT_MAX_TABLE_BYTES,
        }
    }
}
