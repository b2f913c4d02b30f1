//! Hamming error correction code implementation.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! They correct any single-bit error. With two or three corrupted bits the syndrome still
//! points somewhere, so the decoder confidently flips the wrong bit; this module keeps that
//! behavior instead of rejecting the word, because showing the failure is part of the point.
//!
//! The codeword layout is the classic one: parity bits sit at the power-of-two positions
//! (1, 2, 4, 8, ...) and data bits fill every other position in their original order. The
//! parity bit at position `2^i` covers every position whose binary index has bit `i` set.
//!
//! This implementation provides:
//! - Encoding of an arbitrary-length bit string with the minimal number of parity bits
//! - Syndrome computation and mapping of the syndrome to a 1-indexed error position
//! - Single-bit correction and extraction of the data bits
//!
//! # Examples
//!
//! ```
//! use hamming_sim::ecc::hamming::{correct_bit, encode, position_from_syndrome, syndrome};
//!
//! let codeword = encode("1011").unwrap();
//! assert_eq!(codeword.to_string(), "0110011");
//!
//! let received = codeword.flipped(5);
//! let position = position_from_syndrome(&syndrome(&received));
//! assert_eq!(position, 5);
//! assert_eq!(correct_bit(&received, position), codeword);
//! ```

use crate::ecc::codeword::{BitString, Codeword, Syndrome};
use crate::ecc::ErrorCorrection;
use crate::error::Result;
use bitvec::prelude::*;
use log::{debug, trace};
use std::fmt::{self, Display, Formatter};

/// Whether `n` is a parity position, i.e. a power of two.
pub fn is_parity_position(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// Smallest `r` such that `2^r >= data_len + r + 1`.
pub fn parity_count(data_len: usize) -> usize {
    let mut r = 0;
    while (1usize << r) < data_len + r + 1 {
        r += 1;
    }
    r
}

/// Number of parity checks in a received word of `len` bits: the smallest
/// `r` with `2^r >= len + 1`.
fn check_count(len: usize) -> usize {
    let mut r = 0;
    while (1usize << r) < len + 1 {
        r += 1;
    }
    r
}

/// XOR of every bit whose 1-indexed position has `parity_pos` set.
///
/// Encoding and syndrome computation both go through here, so they apply
/// exactly the same coverage rule.
fn parity_over(bits: &BitSlice<u8, Msb0>, parity_pos: usize) -> bool {
    (1..=bits.len())
        .filter(|position| position & parity_pos != 0)
        .fold(false, |parity, position| parity ^ bits[position - 1])
}

/// True if `input` is a non-empty string of `0`s and `1`s.
pub fn validate_input(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b == b'0' || b == b'1')
}

/// Parses `bits` and encodes it.
///
/// # Arguments
///
/// * `bits` - Source data as text, e.g. `"1011"`
///
/// # Returns
///
/// The codeword, `bits.len() + parity_count(bits.len())` bits long, with
/// parity bits at the power-of-two positions
///
/// # Errors
///
/// `Error::InvalidInput` if `bits` is empty or contains anything besides `0`/`1`.
pub fn encode(bits: &str) -> Result<Codeword> {
    let data = BitString::parse(bits)?;
    Ok(encode_bits(&data))
}

/// Encodes already-validated source bits.
pub fn encode_bits(data: &BitString) -> Codeword {
    let r = parity_count(data.len());
    let total_bits = data.len() + r;

    // Index i holds position i + 1; parity slots start out as 0
    let mut encoded = bitvec![u8, Msb0; 0; total_bits];

    // Copy data bits to the non-parity positions, in order
    let mut data_bits = data.iter();
    for position in 1..=total_bits {
        if is_parity_position(position) {
            continue;
        }
        if let Some(bit) = data_bits.next() {
            encoded.set(position - 1, bit);
        }
    }

    // Parity bits in ascending order, each reading whatever is in the word so far
    for i in 0..r {
        let parity_pos = 1 << i;
        let parity = parity_over(&encoded, parity_pos);
        encoded.set(parity_pos - 1, parity);
    }

    debug!(
        "encoded {} data bits with {} parity bits into {} bits",
        data.len(),
        r,
        total_bits
    );
    Codeword::from_bitvec(encoded)
}

/// Recomputes every parity check over `received`.
///
/// Depends only on the received word, never on the originally sent one.
///
/// # Arguments
///
/// * `received` - Word as received, possibly corrupted
///
/// # Returns
///
/// One check per parity bit the word's length implies (the smallest `r`
/// with `2^r >= len + 1`); all zero for an intact word
pub fn syndrome(received: &Codeword) -> Syndrome {
    let bits = received.as_bitslice();
    let r = check_count(bits.len());
    let syndrome = Syndrome::from_checks((0..r).map(|i| parity_over(bits, 1 << i)));
    trace!("syndrome of {} is {}", received, syndrome);
    syndrome
}

/// Reads a syndrome as a 1-indexed error position, 0 meaning no error.
///
/// Only trustworthy when at most one bit was corrupted.
pub fn position_from_syndrome(syndrome: &Syndrome) -> usize {
    syndrome.position()
}

/// A copy of `received` with the bit at `position` flipped.
///
/// Position 0 or anything past the end gives back an unmodified copy. No
/// attempt is made to check that the position is a genuine single error.
pub fn correct_bit(received: &Codeword, position: usize) -> Codeword {
    received.flipped(position)
}

/// Extracts the data bits (every non-power-of-two position) in order.
pub fn decode_data(codeword: &Codeword) -> BitString {
    let data: BitVec<u8, Msb0> = codeword
        .positions()
        .filter(|&(position, _)| !is_parity_position(position))
        .map(|(_, bit)| bit)
        .collect();
    BitString::from_bitvec(data)
}

/// Parity check numbers (P1 for position 1, P2 for 2, P3 for 4, ...) whose
/// coverage includes `position`.
pub fn parity_checks_covering(position: usize) -> Vec<usize> {
    (0..usize::BITS)
        .filter(|&i| position & (1usize << i) != 0)
        .map(|i| i as usize + 1)
        .collect()
}

/// Positions covered by the parity bit at `parity_pos` in a word of `len` bits.
pub fn covered_positions(parity_pos: usize, len: usize) -> Vec<usize> {
    (1..=len).filter(|j| j & parity_pos != 0).collect()
}

/// Size summary of an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingInfo {
    /// Number of source bits
    pub data_bits: usize,
    /// Number of parity bits added
    pub parity_bits: usize,
    /// Codeword length
    pub total_bits: usize,
}

impl EncodingInfo {
    /// Share of the codeword carrying data, as a percentage.
    pub fn efficiency(&self) -> f64 {
        if self.total_bits == 0 {
            return 0.0;
        }
        self.data_bits as f64 / self.total_bits as f64 * 100.0
    }
}

impl Display for EncodingInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bits -> {} bits ({:.1}% efficiency, {} parity bits)",
            self.data_bits,
            self.total_bits,
            self.efficiency(),
            self.parity_bits
        )
    }
}

/// Describes how `original` was expanded into `codeword`.
pub fn encoding_info(original: &BitString, codeword: &Codeword) -> EncodingInfo {
    let data_bits = original.len();
    let total_bits = codeword.len();
    EncodingInfo {
        data_bits,
        parity_bits: total_bits.saturating_sub(data_bits),
        total_bits,
    }
}

/// Everything the receive path computes for one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Recomputed parity checks
    pub syndrome: Syndrome,
    /// Position the syndrome points at, 0 when no error was detected
    pub position: usize,
    /// Received word with `position` flipped
    pub corrected: Codeword,
    /// Data bits extracted from `corrected`
    pub data: BitString,
}

/// Single-error-correcting Hamming code over arbitrary-length bit strings.
///
/// Stateless; the codeword length follows from the input length.
#[derive(Debug, Clone, Copy, Default)]
pub struct HammingCode;

impl HammingCode {
    /// Creates the code
    pub fn new() -> Self {
        HammingCode
    }
}

impl ErrorCorrection for HammingCode {
    fn encode(&self, data: &BitString) -> Codeword {
        encode_bits(data)
    }

    fn decode(&self, received: &Codeword) -> Decoded {
        let syndrome = syndrome(received);
        let position = position_from_syndrome(&syndrome);
        let corrected = correct_bit(received, position);
        let data = decode_data(&corrected);
        if position > received.len() {
            debug!(
                "syndrome points at {} but the word only has {} bits",
                position,
                received.len()
            );
        }
        Decoded {
            syndrome,
            position,
            corrected,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_is_parity_position() {
        assert!(!is_parity_position(0));
        for n in [1, 2, 4, 8, 16, 1024] {
            assert!(is_parity_position(n), "{} is a power of two", n);
        }
        for n in [3, 5, 6, 7, 9, 12, 1023] {
            assert!(!is_parity_position(n), "{} is not a power of two", n);
        }
    }

    #[test]
    fn test_parity_count() {
        assert_eq!(parity_count(0), 0);
        assert_eq!(parity_count(1), 2);
        assert_eq!(parity_count(4), 3);
        assert_eq!(parity_count(5), 4);
        assert_eq!(parity_count(11), 4);
        assert_eq!(parity_count(12), 5);
        assert_eq!(parity_count(26), 5);
        assert_eq!(parity_count(27), 6);
    }

    #[test]
    fn test_encode_1011() {
        // d1..d4 = 1,0,1,1 at positions 3,5,6,7
        // p1 = d(3)^d(5)^d(7) = 0, p2 = d(3)^d(6)^d(7) = 1, p4 = d(5)^d(6)^d(7) = 0
        let codeword = encode("1011").unwrap();
        assert_eq!(codeword.len(), 7);
        assert_eq!(codeword.to_vec(), vec![0, 1, 1, 0, 0, 1, 1]);
        assert_eq!(syndrome(&codeword).to_vec(), vec![0, 0, 0]);
    }

    #[test]
    fn test_flip_position_5_of_1011() {
        let codeword = encode("1011").unwrap();
        let received = codeword.flipped(5);
        let syndrome = syndrome(&received);
        assert_eq!(syndrome.to_vec(), vec![1, 0, 1]);
        assert_eq!(position_from_syndrome(&syndrome), 5);
        assert_eq!(correct_bit(&received, 5), codeword);
    }

    #[test]
    fn test_position_from_oversized_syndrome() {
        // 65 checks with only the last failing: weight 2^64 does not fit
        let checks = (0..=usize::BITS as usize).map(|i| i == usize::BITS as usize);
        let syndrome = Syndrome::from_checks(checks);
        let position = position_from_syndrome(&syndrome);
        assert_eq!(position, usize::MAX);

        // Correcting at an unreachable position is a no-op
        let codeword = encode("1011").unwrap();
        assert_eq!(correct_bit(&codeword, position), codeword);
    }

    #[test]
    fn test_encode_longer_inputs() {
        let codeword = encode("1101001").unwrap();
        assert_eq!(codeword.len(), 11);
        assert!(syndrome(&codeword).is_zero());
        assert_eq!(decode_data(&codeword).to_string(), "1101001");

        let codeword = encode("1").unwrap();
        assert_eq!(codeword.to_string(), "111");
    }

    #[test]
    fn test_encode_rejects_bad_input() {
        assert!(matches!(encode(""), Err(Error::InvalidInput(_))));
        assert!(matches!(encode("10201"), Err(Error::InvalidInput(_))));
        assert!(matches!(encode("1 0"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_validate_input() {
        assert!(validate_input("0"));
        assert!(validate_input("1011"));
        assert!(!validate_input(""));
        assert!(!validate_input("10b1"));
        assert!(!validate_input(" 1011"));
    }

    #[test]
    fn test_correct_bit_out_of_range_is_noop() {
        let codeword = encode("1011").unwrap();
        assert_eq!(correct_bit(&codeword, 0), codeword);
        assert_eq!(correct_bit(&codeword, 8), codeword);
        assert_eq!(correct_bit(&codeword, 3), codeword.flipped(3));
    }

    #[test]
    fn test_double_error_miscorrects() {
        // Flipping 1 and 2 yields syndrome 3, which blames a third, healthy bit
        let codeword = encode("1011").unwrap();
        let received = codeword.flipped(1).flipped(2);
        let decoded = HammingCode::new().decode(&received);
        assert_eq!(decoded.position, 3);
        assert_ne!(decoded.corrected, codeword);
        assert_eq!(decoded.corrected.diff(&codeword), vec![1, 2, 3]);
    }

    #[test]
    fn test_syndrome_of_arbitrary_words() {
        // Never fails, whatever the word
        let word: Codeword = "1".parse().unwrap();
        assert_eq!(syndrome(&word).len(), 1);
        let word: Codeword = "11111111".parse().unwrap();
        assert_eq!(syndrome(&word).len(), 4);
    }

    #[test]
    fn test_parity_coverage() {
        assert_eq!(parity_checks_covering(1), vec![1]);
        assert_eq!(parity_checks_covering(6), vec![2, 3]);
        assert_eq!(parity_checks_covering(7), vec![1, 2, 3]);
        assert!(parity_checks_covering(0).is_empty());

        let top = 1usize << (usize::BITS - 1);
        assert_eq!(parity_checks_covering(top), vec![usize::BITS as usize]);
        assert_eq!(parity_checks_covering(usize::MAX).len(), usize::BITS as usize);
        assert_eq!(parity_checks_covering(top + 3), vec![1, 2, usize::BITS as usize]);

        assert_eq!(covered_positions(1, 7), vec![1, 3, 5, 7]);
        assert_eq!(covered_positions(2, 7), vec![2, 3, 6, 7]);
        assert_eq!(covered_positions(4, 7), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_encoding_info() {
        let data = BitString::parse("1011").unwrap();
        let codeword = encode_bits(&data);
        let info = encoding_info(&data, &codeword);
        assert_eq!(info.data_bits, 4);
        assert_eq!(info.parity_bits, 3);
        assert_eq!(info.total_bits, 7);
        assert!((info.efficiency() - 57.142857).abs() < 1e-4);
        assert_eq!(
            info.to_string(),
            "4 bits -> 7 bits (57.1% efficiency, 3 parity bits)"
        );
    }

    #[test]
    fn test_hamming_code_trait() {
        let code = HammingCode::new();
        let data = BitString::parse("11010011").unwrap();
        let codeword = code.encode(&data);

        let clean = code.decode(&codeword);
        assert_eq!(clean.position, 0);
        assert!(clean.syndrome.is_zero());
        assert_eq!(clean.data, data);

        for position in 1..=codeword.len() {
            let decoded = code.decode(&codeword.flipped(position));
            assert_eq!(decoded.position, position);
            assert_eq!(decoded.corrected, codeword);
            assert_eq!(decoded.data, data);
        }
    }
}
