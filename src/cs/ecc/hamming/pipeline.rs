//! End-to-end encode, transmit, correct and decode.

use bitvec::prelude::*;
use log::{info, warn};

use crate::cs::ecc::hamming::channel::Channel;
use crate::cs::ecc::hamming::codebook::{enumerate_codewords, Codebook};
use crate::cs::ecc::hamming::gf2::BitVector;
use crate::cs::ecc::hamming::mapping::{SymbolMapping, UNKNOWN_SYMBOL};
use crate::cs::ecc::hamming::params::{CodeConfig, CodeParams};
use crate::cs::ecc::hamming::parity::ParityCheckMatrix;
use crate::cs::ecc::hamming::syndrome::{correct_word, Correction};
use crate::cs::ecc::Result;
use crate::cs::error::Error;

/// ANSI escape for red background text
const HIGHLIGHT: &str = "\x1b[0;41m";
/// ANSI escape to reset text attributes
const RESET: &str = "\x1b[0m";

/// One received word after correction and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Recovered symbol, or `'?'` when it could not be recovered
    pub symbol: u8,
    /// What the corrector did to the word
    pub correction: Correction,
    /// Whether the corrected word was found in the codeword table
    pub matched: bool,
}

/// A decoded message together with its correction count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMessage {
    symbols: Vec<DecodedSymbol>,
    corrections: usize,
}

impl DecodedMessage {
    pub fn symbols(&self) -> &[DecodedSymbol] {
        &self.symbols
    }

    /// Number of words in which a bit was flipped back.
    pub fn corrections(&self) -> usize {
        self.corrections
    }

    /// The recovered message bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.symbols.iter().map(|s| s.symbol).collect()
    }

    /// The recovered message as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Text for display, wrapping characters from corrected words in a
    /// red background when `highlight` is set.
    pub fn render(&self, highlight: bool) -> String {
        let mut out = String::with_capacity(self.symbols.len());
        for s in &self.symbols {
            let c = char::from(s.symbol);
            if highlight && s.correction.was_corrected() {
                out.push_str(HIGHLIGHT);
                out.push(c);
                out.push_str(RESET);
            } else {
                out.push(c);
            }
        }
        out
    }
}

/// Streams from one simulated transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// Bits as sent
    pub encoded: BitVector,
    /// Bits as received
    pub received: BitVector,
    pub decoded: DecodedMessage,
}

/// Encodes `message` as consecutive codewords, one per byte.
///
/// Fails with [`Error::InvalidInput`] when a symbol maps past the end of
/// `codebook`, which happens for an empty table or for
/// [`SymbolMapping::Direct`] over fewer than 128 codewords.
pub fn encode(message: &[u8], codebook: &Codebook, mapping: SymbolMapping) -> Result<BitVector> {
    let mut encoded = BitVector::with_capacity(message.len() * codebook.word_len());
    for &symbol in message {
        let index = mapping.index_of(symbol, codebook.len());
        let word = codebook.get(index).ok_or_else(|| {
            Error::InvalidInput(format!(
                "symbol {} maps to index {} outside a table of {} codewords",
                symbol,
                index,
                codebook.len()
            ))
        })?;
        encoded.extend_from_bitslice(word);
    }
    Ok(encoded)
}

/// Corrects every word of `received` and maps it back to a symbol.
///
/// # Arguments
///
/// * `received` - Bit stream of whole `n`-bit words
/// * `matrix` - Parity-check matrix used for the syndromes
/// * `codebook` - Codeword table the stream was encoded with
/// * `mapping` - Symbol mapping the stream was encoded with
///
/// # Returns
///
/// The decoded symbols and the number of corrected words, or
/// [`Error::MisalignedStream`] if the stream does not split into words.
pub fn correct_and_decode(
    received: &BitSlice<u8, Msb0>,
    matrix: &ParityCheckMatrix,
    codebook: &Codebook,
    mapping: SymbolMapping,
) -> Result<DecodedMessage> {
    let word_len = codebook.word_len();
    if word_len == 0 || received.len() % word_len != 0 {
        return Err(Error::MisalignedStream {
            len: received.len(),
            word_len,
        });
    }

    let mut decoded = DecodedMessage::default();
    for chunk in received.chunks_exact(word_len) {
        let (word, correction) = correct_word(matrix, chunk)?;
        if correction.was_corrected() {
            decoded.corrections += 1;
        }

        let (symbol, matched) = match codebook.position(&word) {
            Some(index) => (mapping.symbol_at(index, codebook.len()), true),
            None => {
                warn!("corrected word is not in the codeword table, using '?'");
                (UNKNOWN_SYMBOL, false)
            }
        };

        decoded.symbols.push(DecodedSymbol {
            symbol,
            correction,
            matched,
        });
    }

    Ok(decoded)
}

/// A ready-to-use Hamming code: parity-check matrix and codeword table
/// for one order, built once and shared read-only by every operation.
#[derive(Debug, Clone)]
pub struct HammingCode {
    params: CodeParams,
    matrix: ParityCheckMatrix,
    codebook: Codebook,
    mapping: SymbolMapping,
}

impl HammingCode {
    /// Builds the code of order `order` with the default configuration.
    pub fn new(order: u32) -> Result<Self> {
        Self::with_config(CodeConfig::new(order))
    }

    /// Validates `config`, then builds the matrix and enumerates the codewords.
    pub fn with_config(config: CodeConfig) -> Result<Self> {
        let params = config.validate()?;
        let matrix = ParityCheckMatrix::new(&params);
        let codebook = enumerate_codewords(&matrix, params.word_len(), params.codeword_count())?;

        Ok(HammingCode {
            params,
            matrix,
            codebook,
            mapping: config.mapping,
        })
    }

    pub fn params(&self) -> &CodeParams {
        &self.params
    }

    pub fn matrix(&self) -> &ParityCheckMatrix {
        &self.matrix
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn mapping(&self) -> SymbolMapping {
        self.mapping
    }

    /// Encodes `message` into `n * message.len()` bits.
    pub fn encode(&self, message: &[u8]) -> Result<BitVector> {
        encode(message, &self.codebook, self.mapping)
    }

    /// Corrects and decodes a received stream.
    pub fn correct_and_decode(&self, received: &BitSlice<u8, Msb0>) -> Result<DecodedMessage> {
        correct_and_decode(received, &self.matrix, &self.codebook, self.mapping)
    }

    /// Encodes `message`, sends it through `channel` and decodes the result.
    pub fn transmit<C: Channel + ?Sized>(
        &self,
        message: &[u8],
        channel: &mut C,
    ) -> Result<Transmission> {
        let encoded = self.encode(message)?;
        let received = channel.transmit(&encoded);
        let decoded = self.correct_and_decode(&received)?;

        info!(
            "sent {} symbols as {} bits, corrected {} words",
            message.len(),
            encoded.len(),
            decoded.corrections()
        );

        Ok(Transmission {
            encoded,
            received,
            decoded,
        })
    }
}

/// Formats a bit stream with a space between words and five words per line.
///
/// Line breaks follow the word separator, so each full line ends in `" \n"`.
pub fn format_bit_stream(bits: &BitSlice<u8, Msb0>, word_len: usize) -> String {
    let mut out = String::with_capacity(bits.len() + 2 * bits.len() / word_len.max(1) + 1);
    for (i, bit) in bits.iter().by_vals().enumerate() {
        if word_len > 0 && i != 0 && i % word_len == 0 {
            out.push(' ');
            if i % (word_len * 5) == 0 {
                out.push('\n');
            }
        }
        out.push(if bit { '1' } else { '0' });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bit_stream() {
        let bits = bitvec![u8, Msb0; 1, 0, 1, 1, 1, 1];
        assert_eq!(format_bit_stream(&bits, 3), "101 111");

        let bits = bitvec![u8, Msb0; 0; 12];
        assert_eq!(format_bit_stream(&bits, 2), "00 00 00 00 00 \n00");
        assert_eq!(format_bit_stream(BitSlice::<u8, Msb0>::empty(), 3), "");
    }

    #[test]
    fn test_render_highlights_corrected_symbols() {
        let decoded = DecodedMessage {
            symbols: vec![
                DecodedSymbol {
                    symbol: b'o',
                    correction: Correction::AlreadyCorrect,
                    matched: true,
                },
                DecodedSymbol {
                    symbol: b'k',
                    correction: Correction::Corrected { position: 3 },
                    matched: true,
                },
            ],
            corrections: 1,
        };
        assert_eq!(decoded.render(false), "ok");
        assert_eq!(decoded.render(true), "o\x1b[0;41mk\x1b[0m");
        assert_eq!(decoded.text(), "ok");
    }

    #[test]
    fn test_encode_layout() {
        let code = HammingCode::new(4).unwrap();
        let encoded = code.encode(b"AB").unwrap();
        assert_eq!(encoded.len(), 30);
        assert_eq!(&encoded[..15], code.codebook().word(1040));
        assert_eq!(&encoded[15..], code.codebook().word(1056));
        assert!(code.encode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_direct_mapping_on_small_table_is_rejected() {
        let h = ParityCheckMatrix::new(&CodeParams::new(3).unwrap());
        let book = enumerate_codewords(&h, 7, 16).unwrap();

        // 'A' is 65, past the 16 codewords of an order-3 code
        assert!(matches!(
            encode(b"A", &book, SymbolMapping::Direct),
            Err(Error::InvalidInput(_))
        ));
        // Symbols below 16 still have a codeword
        assert_eq!(
            encode(&[15], &book, SymbolMapping::Direct)
                .unwrap()
                .as_bitslice(),
            book.word(15)
        );
    }

    #[test]
    fn test_encode_into_empty_table() {
        let h = ParityCheckMatrix::new(&CodeParams::new(3).unwrap());
        let book = enumerate_codewords(&h, 7, 0).unwrap();
        assert!(book.is_empty());

        assert!(matches!(
            encode(b"hi", &book, SymbolMapping::Scaled),
            Err(Error::InvalidInput(_))
        ));
        assert!(encode(b"", &book, SymbolMapping::Scaled).unwrap().is_empty());
    }

    #[test]
    fn test_misaligned_stream() {
        let code = HammingCode::new(3).unwrap();
        let bits = bitvec![u8, Msb0; 0; 10];
        assert_eq!(
            code.correct_and_decode(&bits),
            Err(Error::MisalignedStream {
                len: 10,
                word_len: 7
            })
        );
    }

    #[test]
    fn test_empty_stream() {
        let code = HammingCode::new(3).unwrap();
        let decoded = code
            .correct_and_decode(BitSlice::<u8, Msb0>::empty())
            .unwrap();
        assert!(decoded.symbols().is_empty());
        assert_eq!(decoded.corrections(), 0);
    }
}
