//! Bit sequence types used by the Hamming encoder and the error injector.
//!
//! All three types store their bits 0-indexed in a [`BitVec`], but
//! [`Codeword`] speaks 1-indexed positions at its public surface, matching
//! the way Hamming codes number their bits (parity bits live at positions
//! 1, 2, 4, 8, ...).

use crate::error::{Error, Result};
use bitvec::prelude::*;
use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

type Bits = BitVec<u8, Msb0>;

/// Parses a strict `[01]+` string.
fn parse_bits(input: &str, what: &str) -> Result<Bits> {
    if input.is_empty() {
        return Err(Error::invalid_input(format!("{} must not be empty", what)));
    }

    let mut bits = Bits::with_capacity(input.len());
    for (offset, c) in input.chars().enumerate() {
        match c {
            '0' => bits.push(false),
            '1' => bits.push(true),
            other => {
                return Err(Error::invalid_input(format!(
                    "unexpected {:?} at offset {} in {}, only 0s and 1s are allowed",
                    other, offset, what
                )))
            }
        }
    }
    Ok(bits)
}

fn write_bits(f: &mut Formatter<'_>, bits: impl Iterator<Item = bool>) -> fmt::Result {
    for bit in bits {
        f.write_char(if bit { '1' } else { '0' })?;
    }
    Ok(())
}

/// Source data supplied by the user, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    bits: Bits,
}

impl BitString {
    /// Parses a non-empty string of `0`s and `1`s.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            bits: parse_bits(input, "bit string")?,
        })
    }

    pub(crate) fn from_bitvec(bits: Bits) -> Self {
        Self { bits }
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether there are no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterates the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Borrows the underlying bits.
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_bits(f, self.iter())
    }
}

/// Data bits interleaved with parity bits at power-of-two positions.
///
/// Positions are 1-indexed: `bit(1)` is the first parity bit. Both freshly
/// encoded words and received (possibly corrupted) words use this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeword {
    bits: Bits,
}

impl Codeword {
    /// An all-zero word of `len` bits.
    pub fn zeroed(len: usize) -> Self {
        Self {
            bits: bitvec![u8, Msb0; 0; len],
        }
    }

    pub(crate) fn from_bitvec(bits: Bits) -> Self {
        Self { bits }
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether there are no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at a 1-indexed `position`, or `None` outside `[1, len]`.
    pub fn bit(&self, position: usize) -> Option<bool> {
        position
            .checked_sub(1)
            .and_then(|index| self.bits.get(index).map(|bit| *bit))
    }

    /// Whether `position` addresses a bit of this word.
    pub fn contains(&self, position: usize) -> bool {
        (1..=self.len()).contains(&position)
    }

    /// Flips the bit at `position` in place. Returns `false` (and changes
    /// nothing) when the position is outside the word.
    pub(crate) fn flip(&mut self, position: usize) -> bool {
        if !self.contains(position) {
            return false;
        }
        let index = position - 1;
        let current = self.bits[index];
        self.bits.set(index, !current);
        true
    }

    /// Sets the bit at `position`. Returns `false` (and changes nothing)
    /// when the position is outside the word.
    pub fn set(&mut self, position: usize, bit: bool) -> bool {
        if !self.contains(position) {
            return false;
        }
        self.bits.set(position - 1, bit);
        true
    }

    /// A copy with the bit at `position` flipped. Out-of-range positions,
    /// including 0, yield an unmodified copy.
    pub fn flipped(&self, position: usize) -> Codeword {
        let mut copy = self.clone();
        copy.flip(position);
        copy
    }

    /// Iterates the bits in position order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Iterates `(position, bit)` pairs with 1-indexed positions.
    pub fn positions(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.iter().enumerate().map(|(index, bit)| (index + 1, bit))
    }

    /// Positions at which `self` and `other` differ, ascending. Bits beyond
    /// the shorter word count as differences.
    pub fn diff(&self, other: &Codeword) -> Vec<usize> {
        let len = self.len().max(other.len());
        (1..=len)
            .filter(|&position| self.bit(position) != other.bit(position))
            .collect()
    }

    /// The bits as `0`/`1` values, for rendering as a grid.
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().map(u8::from).collect()
    }

    /// Borrows the underlying bits (0-indexed).
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }
}

impl FromStr for Codeword {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self {
            bits: parse_bits(s, "codeword")?,
        })
    }
}

impl FromIterator<bool> for Codeword {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Display for Codeword {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_bits(f, self.iter())
    }
}

/// Recomputed parity checks of a received word.
///
/// Check `i` belongs to the parity bit at position `2^i` and carries weight
/// `2^i` when the syndrome is read as an error position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syndrome {
    bits: Bits,
}

impl Syndrome {
    /// Builds a syndrome from checks in ascending order (check 0 first).
    pub fn from_checks<I: IntoIterator<Item = bool>>(checks: I) -> Self {
        Self {
            bits: checks.into_iter().collect(),
        }
    }

    /// Number of parity checks
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether there are no checks at all
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Result of check `i`, or `None` past the last check.
    pub fn check(&self, i: usize) -> Option<bool> {
        self.bits.get(i).map(|bit| *bit)
    }

    /// True when every check passed (no error detected).
    pub fn is_zero(&self) -> bool {
        self.bits.not_any()
    }

    /// Reads the checks as a binary number, check `i` weighing `2^i`.
    ///
    /// 0 means no error was detected; anything else is the 1-indexed
    /// position a single error would have to be at. A failed check beyond
    /// what `usize` can weigh saturates the result to `usize::MAX`, which is
    /// past the end of any word.
    pub fn position(&self) -> usize {
        self.iter()
            .enumerate()
            .filter(|&(_, failed)| failed)
            .map(|(i, _)| {
                u32::try_from(i)
                    .ok()
                    .and_then(|shift| 1usize.checked_shl(shift))
                    .unwrap_or(usize::MAX)
            })
            .fold(0usize, usize::saturating_add)
    }

    /// Iterates the checks, check 0 first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// The checks as `0`/`1` values, check 0 first.
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().map(u8::from).collect()
    }
}

/// Most significant check first, so the text reads as the binary position.
impl Display for Syndrome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let checks: Vec<bool> = self.iter().collect();
        write_bits(f, checks.into_iter().rev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_string_parse() {
        let bits = BitString::parse("1011").unwrap();
        assert_eq!(bits.len(), 4);
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![true, false, true, true]);
        assert_eq!(bits.to_string(), "1011");

        assert!(matches!(BitString::parse(""), Err(Error::InvalidInput(_))));
        assert!(matches!(BitString::parse("10a1"), Err(Error::InvalidInput(_))));
        assert!(matches!(BitString::parse(" 101"), Err(Error::InvalidInput(_))));
        assert!("0".parse::<BitString>().is_ok());
    }

    #[test]
    fn test_codeword_positions_are_one_indexed() {
        let word: Codeword = "0110011".parse().unwrap();
        assert_eq!(word.len(), 7);
        assert_eq!(word.bit(0), None);
        assert_eq!(word.bit(1), Some(false));
        assert_eq!(word.bit(2), Some(true));
        assert_eq!(word.bit(7), Some(true));
        assert_eq!(word.bit(8), None);
        assert!(word.contains(1));
        assert!(!word.contains(0));
        assert!(!word.contains(8));

        assert!(matches!("".parse::<Codeword>(), Err(Error::InvalidInput(_))));
        assert!(matches!("01102".parse::<Codeword>(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_codeword_set() {
        let mut word = Codeword::zeroed(4);
        assert!(word.set(1, true));
        assert!(word.set(4, true));
        assert!(word.set(4, true));
        assert_eq!(word.to_string(), "1001");
        assert!(word.set(1, false));
        assert_eq!(word.to_string(), "0001");

        assert!(!word.set(0, true));
        assert!(!word.set(5, true));
        assert_eq!(word.to_string(), "0001");
    }

    #[test]
    fn test_flipped_leaves_original_untouched() {
        let word: Codeword = "0110011".parse().unwrap();
        let flipped = word.flipped(5);
        assert_eq!(flipped.to_string(), "0110111");
        assert_eq!(word.to_string(), "0110011");
        assert_eq!(word.diff(&flipped), vec![5]);

        // Out of range is a no-op
        assert_eq!(word.flipped(0), word);
        assert_eq!(word.flipped(8), word);
    }

    #[test]
    fn test_codeword_to_vec() {
        let word = Codeword::zeroed(3).flipped(2);
        assert_eq!(word.to_vec(), vec![0, 1, 0]);
        assert_eq!(
            word.positions().collect::<Vec<_>>(),
            vec![(1, false), (2, true), (3, false)]
        );
    }

    #[test]
    fn test_syndrome_position() {
        let syndrome = Syndrome::from_checks([true, false, true]);
        assert_eq!(syndrome.position(), 5);
        assert!(!syndrome.is_zero());
        assert_eq!(syndrome.to_string(), "101");
        assert_eq!(syndrome.to_vec(), vec![1, 0, 1]);

        let syndrome = Syndrome::from_checks([false, true, true]);
        assert_eq!(syndrome.position(), 6);
        assert_eq!(syndrome.to_string(), "110");

        let zero = Syndrome::from_checks([false; 4]);
        assert!(zero.is_zero());
        assert_eq!(zero.position(), 0);
    }

    #[test]
    fn test_syndrome_check() {
        let syndrome = Syndrome::from_checks([true, false, true]);
        assert_eq!(syndrome.check(0), Some(true));
        assert_eq!(syndrome.check(1), Some(false));
        assert_eq!(syndrome.check(2), Some(true));
        assert_eq!(syndrome.check(3), None);
    }

    #[test]
    fn test_syndrome_position_saturates_on_wide_syndromes() {
        let bits = usize::BITS as usize;

        // Highest check usize can still weigh
        let top = Syndrome::from_checks((0..bits).map(|i| i == bits - 1));
        assert_eq!(top.position(), 1usize << (bits - 1));

        // One past it no longer fits
        let wide = Syndrome::from_checks((0..=bits).map(|i| i == bits));
        assert_eq!(wide.position(), usize::MAX);

        let all = Syndrome::from_checks(vec![true; bits + 8]);
        assert_eq!(all.position(), usize::MAX);

        let clean = Syndrome::from_checks(vec![false; bits + 8]);
        assert_eq!(clean.position(), 0);
    }
}
