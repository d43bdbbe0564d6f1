pub mod ecc;
pub mod error;

pub use ecc::hamming::HammingCode;
pub use error::{Error, Result};
