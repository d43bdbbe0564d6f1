//! Noisy channel simulation.
//!
//! A binary symmetric channel flips every bit independently with a fixed
//! probability. Channels return a new stream so the sent stream stays
//! available for comparison.

use bitvec::prelude::*;
use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cs::ecc::hamming::gf2::BitVector;
use crate::cs::ecc::Result;
use crate::cs::error::Error;

/// Denominator used when the operator gives no usable "1 in N" value.
pub const DEFAULT_FLIP_DENOMINATOR: f64 = 100.0;

/// A transmission medium for encoded bit streams.
pub trait Channel {
    /// Sends `bits` through the channel and returns what arrives.
    fn transmit(&mut self, bits: &BitSlice<u8, Msb0>) -> BitVector;
}

/// Parses a "1 in N" denominator into a flip probability.
///
/// Empty, non-numeric, zero, negative or non-finite input falls back to
/// [`DEFAULT_FLIP_DENOMINATOR`]. Denominators below one give probability one.
pub fn flip_probability_from_denominator(input: &str) -> f64 {
    let denominator = match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        Ok(value) if value == 0.0 => DEFAULT_FLIP_DENOMINATOR,
        _ => {
            if !input.trim().is_empty() {
                warn!(
                    "unusable flip rate {:?}, using 1 in {}",
                    input.trim(),
                    DEFAULT_FLIP_DENOMINATOR
                );
            }
            DEFAULT_FLIP_DENOMINATOR
        }
    };
    (1.0 / denominator).min(1.0)
}

/// Flips each bit of `bits` when a uniform draw from `[0, 1)` is at most `probability`.
///
/// A probability of zero never flips.
pub fn corrupt<R: Rng + ?Sized>(
    bits: &BitSlice<u8, Msb0>,
    probability: f64,
    rng: &mut R,
) -> BitVector {
    let mut received = bits.to_bitvec();
    if probability <= 0.0 {
        return received;
    }

    let mut flips = 0usize;
    for mut bit in received.iter_mut() {
        let draw: f64 = rng.gen();
        if draw <= probability {
            *bit = !*bit;
            flips += 1;
        }
    }
    debug!("channel flipped {} of {} bits", flips, bits.len());
    received
}

/// Channel flipping each bit independently with a fixed probability.
#[derive(Debug, Clone)]
pub struct BinarySymmetricChannel<R = ChaCha20Rng> {
    flip_probability: f64,
    rng: R,
}

impl BinarySymmetricChannel<ChaCha20Rng> {
    /// Channel seeded from system entropy.
    pub fn new(flip_probability: f64) -> Result<Self> {
        Self::with_rng(flip_probability, ChaCha20Rng::from_entropy())
    }

    /// Channel with a reproducible flip pattern.
    pub fn with_seed(flip_probability: f64, seed: u64) -> Result<Self> {
        Self::with_rng(flip_probability, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> BinarySymmetricChannel<R> {
    /// Channel drawing from the given generator.
    pub fn with_rng(flip_probability: f64, rng: R) -> Result<Self> {
        if !(0.0..=1.0).contains(&flip_probability) {
            return Err(Error::InvalidProbability(flip_probability));
        }
        Ok(BinarySymmetricChannel {
            flip_probability,
            rng,
        })
    }

    pub fn flip_probability(&self) -> f64 {
        self.flip_probability
    }
}

impl<R: Rng> Channel for BinarySymmetricChannel<R> {
    fn transmit(&mut self, bits: &BitSlice<u8, Msb0>) -> BitVector {
        corrupt(bits, self.flip_probability, &mut self.rng)
    }
}

/// Channel that flips exactly the listed stream positions.
///
/// Positions past the end of a stream are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForcedFlipChannel {
    positions: Vec<usize>,
}

impl ForcedFlipChannel {
    pub fn new(positions: Vec<usize>) -> Self {
        ForcedFlipChannel { positions }
    }
}

impl Channel for ForcedFlipChannel {
    fn transmit(&mut self, bits: &BitSlice<u8, Msb0>) -> BitVector {
        let mut received = bits.to_bitvec();
        for &position in &self.positions {
            if position < received.len() {
                let flipped = !received[position];
                received.set(position, flipped);
            }
        }
        received
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flip_probability_parsing() {
        assert_relative_eq!(flip_probability_from_denominator("100"), 0.01);
        assert_relative_eq!(flip_probability_from_denominator(" 20\n"), 0.05);
        assert_relative_eq!(flip_probability_from_denominator("2.5"), 0.4);
        assert_relative_eq!(flip_probability_from_denominator("1"), 1.0);
        assert_relative_eq!(flip_probability_from_denominator("0.5"), 1.0);
    }

    #[test]
    fn test_flip_probability_defaults() {
        for input in ["", "\n", "0", "abc", "-4", "inf", "NaN"] {
            assert_relative_eq!(flip_probability_from_denominator(input), 0.01);
        }
    }

    #[test]
    fn test_zero_probability_is_noiseless() {
        let bits = bitvec![u8, Msb0; 1, 0, 1, 1, 0, 0, 1, 0, 1];
        let mut channel = BinarySymmetricChannel::with_seed(0.0, 7).unwrap();
        for _ in 0..10 {
            assert_eq!(channel.transmit(&bits), bits);
        }
    }

    #[test]
    fn test_certain_flip_inverts_stream() {
        let bits = bitvec![u8, Msb0; 1, 0, 1, 1, 0, 0, 1, 0, 1];
        let mut channel = BinarySymmetricChannel::with_seed(1.0, 7).unwrap();
        assert_eq!(channel.transmit(&bits), !bits.clone());
    }

    #[test]
    fn test_seeded_channels_agree() {
        let bits = bitvec![u8, Msb0; 0; 512];
        let mut a = BinarySymmetricChannel::with_seed(0.1, 42).unwrap();
        let mut b = BinarySymmetricChannel::with_seed(0.1, 42).unwrap();
        let received = a.transmit(&bits);
        assert_eq!(received, b.transmit(&bits));
        // The original stream is untouched
        assert!(bits.not_any());
    }

    #[test]
    fn test_flip_rate_is_plausible() {
        let bits = bitvec![u8, Msb0; 0; 20_000];
        let mut channel = BinarySymmetricChannel::with_seed(0.25, 1).unwrap();
        let flips = channel.transmit(&bits).count_ones();
        assert!(flips > 4_500 && flips < 5_500, "flips = {}", flips);
    }

    #[test]
    fn test_invalid_probability() {
        assert!(matches!(
            BinarySymmetricChannel::with_seed(1.5, 0),
            Err(Error::InvalidProbability(_))
        ));
        assert!(matches!(
            BinarySymmetricChannel::with_seed(-0.1, 0),
            Err(Error::InvalidProbability(_))
        ));
        assert!(BinarySymmetricChannel::with_seed(f64::NAN, 0).is_err());
    }

    #[test]
    fn test_forced_flips() {
        let bits = bitvec![u8, Msb0; 0; 8];
        let mut channel = ForcedFlipChannel::new(vec![1, 6, 100]);
        assert_eq!(
            channel.transmit(&bits),
            bitvec![u8, Msb0; 0, 1, 0, 0, 0, 0, 1, 0]
        );
    }
}
