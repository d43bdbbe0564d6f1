//! Mapping between 7-bit input symbols and codeword table indices.
//!
//! The scaled mapping spreads the 128-symbol alphabet evenly over the
//! codeword table (`index = s * N / 128`) instead of using only its first
//! 128 entries, and inverts with `symbol = index * 128 / N`. It is lossy
//! whenever `N < 128`. The direct mapping uses the symbol value itself as
//! the index and needs `N >= 128`.

use log::warn;

/// Number of symbols in the input alphabet.
pub const ALPHABET_SIZE: u64 = 128;

/// Placeholder for symbols that cannot be represented or recovered.
pub const UNKNOWN_SYMBOL: u8 = b'?';

/// Strategy for assigning codewords to input symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolMapping {
    /// `index = floor(s * N / 128)`, spreading symbols over the table
    #[default]
    Scaled,
    /// `index = s`, using the first 128 codewords
    Direct,
}

impl SymbolMapping {
    /// Codeword table index for `symbol` in a table of `table_len` entries.
    ///
    /// Symbols outside the alphabet are replaced by [`UNKNOWN_SYMBOL`].
    /// The result is always below `table_len` for a non-empty table whose
    /// size suits the mapping.
    pub fn index_of(self, symbol: u8, table_len: usize) -> usize {
        let symbol = if u64::from(symbol) < ALPHABET_SIZE {
            symbol
        } else {
            warn!(
                "symbol {:#04x} is outside the 7-bit alphabet, sending '{}'",
                symbol, UNKNOWN_SYMBOL as char
            );
            UNKNOWN_SYMBOL
        };

        match self {
            SymbolMapping::Scaled => {
                let index = u128::from(symbol) * table_len as u128 / u128::from(ALPHABET_SIZE);
                index as usize
            }
            SymbolMapping::Direct => usize::from(symbol),
        }
    }

    /// Symbol recovered from codeword table index `index`.
    ///
    /// Values that fall outside the alphabet become [`UNKNOWN_SYMBOL`].
    pub fn symbol_at(self, index: usize, table_len: usize) -> u8 {
        let value = match self {
            SymbolMapping::Scaled => {
                if table_len == 0 {
                    return UNKNOWN_SYMBOL;
                }
                index as u128 * u128::from(ALPHABET_SIZE) / table_len as u128
            }
            SymbolMapping::Direct => index as u128,
        };

        if value >= u128::from(ALPHABET_SIZE) {
            UNKNOWN_SYMBOL
        } else {
            value as u8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_FOUR_TABLE: usize = 2048;

    #[test]
    fn test_scaled_mapping() {
        let mapping = SymbolMapping::Scaled;
        assert_eq!(mapping.index_of(0, ORDER_FOUR_TABLE), 0);
        assert_eq!(mapping.index_of(b'A', ORDER_FOUR_TABLE), 1040);
        assert_eq!(mapping.index_of(127, ORDER_FOUR_TABLE), 127 * 2048 / 128);
        assert_eq!(mapping.symbol_at(1040, ORDER_FOUR_TABLE), b'A');
    }

    #[test]
    fn test_scaled_round_trip_on_large_table() {
        let mapping = SymbolMapping::Scaled;
        for symbol in 0..128u8 {
            let index = mapping.index_of(symbol, ORDER_FOUR_TABLE);
            assert!(index < ORDER_FOUR_TABLE);
            assert_eq!(mapping.symbol_at(index, ORDER_FOUR_TABLE), symbol);
        }
    }

    #[test]
    fn test_scaled_mapping_is_lossy_on_small_tables() {
        let mapping = SymbolMapping::Scaled;
        // 16 codewords: eight symbols share each index
        assert_eq!(mapping.index_of(b'A', 16), 8);
        assert_eq!(mapping.symbol_at(8, 16), 64);
        for symbol in 0..128u8 {
            let index = mapping.index_of(symbol, 16);
            assert!(index < 16);
            assert!(mapping.symbol_at(index, 16) <= symbol);
        }
    }

    #[test]
    fn test_boundary_symbol() {
        let mapping = SymbolMapping::Scaled;
        for table_len in [2usize, 16, 2048, 1 << 26] {
            let index = mapping.index_of(127, table_len);
            assert_eq!(index as u128, 127 * table_len as u128 / 128);
            assert!(index < table_len);
            assert!(mapping.symbol_at(index, table_len) <= 127);
        }
    }

    #[test]
    fn test_out_of_alphabet_symbol() {
        let mapping = SymbolMapping::Scaled;
        assert_eq!(
            mapping.index_of(200, ORDER_FOUR_TABLE),
            mapping.index_of(UNKNOWN_SYMBOL, ORDER_FOUR_TABLE)
        );
        assert_eq!(
            SymbolMapping::Direct.index_of(255, ORDER_FOUR_TABLE),
            usize::from(UNKNOWN_SYMBOL)
        );
    }

    #[test]
    fn test_symbol_at_clamps() {
        assert_eq!(SymbolMapping::Scaled.symbol_at(4096, 2048), UNKNOWN_SYMBOL);
        assert_eq!(SymbolMapping::Scaled.symbol_at(0, 0), UNKNOWN_SYMBOL);
        assert_eq!(SymbolMapping::Direct.symbol_at(127, 2048), 127);
        assert_eq!(SymbolMapping::Direct.symbol_at(128, 2048), UNKNOWN_SYMBOL);
    }

    #[test]
    fn test_direct_mapping() {
        let mapping = SymbolMapping::Direct;
        for symbol in 0..128u8 {
            let index = mapping.index_of(symbol, ORDER_FOUR_TABLE);
            assert_eq!(index, usize::from(symbol));
            assert_eq!(mapping.symbol_at(index, ORDER_FOUR_TABLE), symbol);
        }
    }
}
