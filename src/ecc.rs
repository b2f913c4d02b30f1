//! Error correction code implementations.
//!
//! This module provides a Hamming single-error-correcting code and an error
//! injector that corrupts codewords on purpose:
//! - [`hamming`] computes parity placement, builds codewords, computes
//!   syndromes and corrects (or mis-corrects) a bit
//! - [`injector`] flips 1, 2 or 3 bits of a codeword, at random or at a
//!   chosen position, to exercise the single-error guarantee and show it
//!   breaking down
//!
//! # Examples
//!
//! ```rust
//! use hamming_sim::ecc::{inject_errors, ErrorCorrection, ErrorMode, HammingCode};
//! use hamming_sim::BitString;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let code = HammingCode::new();
//! let data = BitString::parse("1011").unwrap();
//! let codeword = code.encode(&data);
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let injection = inject_errors(&codeword, ErrorMode::Single, &mut rng).unwrap();
//! let decoded = code.decode(&injection.received);
//! assert_eq!(decoded.position, injection.positions[0]);
//! assert_eq!(decoded.corrected, codeword);
//! ```

pub mod codeword;
pub mod hamming;
pub mod injector;


pub use codeword::{BitString, Codeword, Syndrome};
pub use hamming::{
    correct_bit, decode_data, encode, encode_bits, encoding_info, is_parity_position,
    parity_count, position_from_syndrome, syndrome, validate_input, Decoded, EncodingInfo,
    HammingCode,
};
pub use injector::{
    inject_errors, inject_manual, ErrorInfo, ErrorInjector, ErrorMode, Injection,
};

/// Trait for error correction code implementations
pub trait ErrorCorrection {
    /// Encode data bits into a codeword
    fn encode(&self, data: &BitString) -> Codeword;

    /// Decode a received word, correcting errors if possible
    fn decode(&self, received: &Codeword) -> Decoded;
}
