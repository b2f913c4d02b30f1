//! Deterministic bit-flip error injection.
//!
//! This is not a channel model: each call flips exactly 1, 2 or 3 distinct
//! bits of a copy of the codeword, at positions drawn uniformly from the
//! caller's random source (or given explicitly). The positions actually
//! flipped are returned as ground truth so callers can compare them with
//! what the syndrome claims. The two agree only for single errors.

use crate::ecc::codeword::Codeword;
use crate::error::{Error, Result};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// How many random errors to inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorMode {
    /// One flipped bit, always correctable
    #[default]
    Single,
    /// Two flipped bits, the decoder points at the wrong position
    Double,
    /// Three flipped bits, detected (usually) but mis-corrected
    Triple,
}

impl ErrorMode {
    /// All modes, in increasing error count
    pub const ALL: [ErrorMode; 3] = [ErrorMode::Single, ErrorMode::Double, ErrorMode::Triple];

    /// Number of bits this mode flips
    pub fn error_count(self) -> usize {
        match self {
            ErrorMode::Single => 1,
            ErrorMode::Double => 2,
            ErrorMode::Triple => 3,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorMode::Single => "single",
            ErrorMode::Double => "double",
            ErrorMode::Triple => "triple",
        }
    }
}

impl FromStr for ErrorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(ErrorMode::Single),
            "double" => Ok(ErrorMode::Double),
            "triple" => Ok(ErrorMode::Triple),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl Display for ErrorMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A corrupted copy of a codeword together with the positions flipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// The received word
    pub received: Codeword,
    /// Ground truth: 1-indexed positions flipped, in the order drawn
    pub positions: Vec<usize>,
}

/// Draws `count` distinct positions in `[1, len]` by rejection sampling.
fn distinct_positions<R: Rng + ?Sized>(len: usize, count: usize, rng: &mut R) -> Result<Vec<usize>> {
    if len < count {
        return Err(Error::CodewordTooShort { needed: count, len });
    }

    let mut positions = Vec::with_capacity(count);
    while positions.len() < count {
        let position = rng.gen_range(1..=len);
        if !positions.contains(&position) {
            positions.push(position);
        }
    }
    Ok(positions)
}

fn flip_all(codeword: &Codeword, positions: Vec<usize>) -> Injection {
    let mut received = codeword.clone();
    for &position in &positions {
        received.flip(position);
    }
    debug!("flipped positions {:?}", positions);
    Injection {
        received,
        positions,
    }
}

/// Flips one uniformly chosen bit.
pub fn apply_single<R: Rng + ?Sized>(codeword: &Codeword, rng: &mut R) -> Result<Injection> {
    let positions = distinct_positions(codeword.len(), 1, rng)?;
    Ok(flip_all(codeword, positions))
}

/// Flips two distinct uniformly chosen bits; the second is redrawn until it
/// differs from the first.
pub fn apply_double<R: Rng + ?Sized>(codeword: &Codeword, rng: &mut R) -> Result<Injection> {
    let positions = distinct_positions(codeword.len(), 2, rng)?;
    Ok(flip_all(codeword, positions))
}

/// Flips three distinct bits chosen uniformly without replacement.
pub fn apply_triple<R: Rng + ?Sized>(codeword: &Codeword, rng: &mut R) -> Result<Injection> {
    let positions = distinct_positions(codeword.len(), 3, rng)?;
    Ok(flip_all(codeword, positions))
}

/// Flips exactly the bit at `position`.
///
/// # Errors
///
/// `Error::InvalidPosition` unless `1 <= position <= codeword.len()`.
pub fn apply_manual(codeword: &Codeword, position: usize) -> Result<Injection> {
    if !codeword.contains(position) {
        return Err(Error::InvalidPosition {
            position,
            len: codeword.len(),
        });
    }
    Ok(flip_all(codeword, vec![position]))
}

/// Injects as many random errors as `mode` asks for.
///
/// The original codeword is left untouched.
///
/// # Arguments
///
/// * `codeword` - Word to corrupt
/// * `mode` - How many distinct positions to flip
/// * `rng` - Source of the error positions
///
/// # Returns
///
/// The corrupted copy together with the flipped 1-indexed positions.
///
/// # Errors
///
/// `Error::CodewordTooShort` if the word has fewer positions than `mode` flips.
pub fn inject_errors<R: Rng + ?Sized>(
    codeword: &Codeword,
    mode: ErrorMode,
    rng: &mut R,
) -> Result<Injection> {
    match mode {
        ErrorMode::Single => apply_single(codeword, rng),
        ErrorMode::Double => apply_double(codeword, rng),
        ErrorMode::Triple => apply_triple(codeword, rng),
    }
}

/// Like [`inject_errors`], with the mode given by name.
///
/// # Errors
///
/// `Error::UnknownMode` if `mode` is not `single`, `double` or `triple`.
pub fn inject_errors_named<R: Rng + ?Sized>(
    codeword: &Codeword,
    mode: &str,
    rng: &mut R,
) -> Result<Injection> {
    inject_errors(codeword, mode.parse()?, rng)
}

/// Flips the bit at `position` in a copy of `codeword`.
pub fn inject_manual(codeword: &Codeword, position: usize) -> Result<Codeword> {
    apply_manual(codeword, position).map(|injection| injection.received)
}

/// Summary of the errors currently recorded by an [`ErrorInjector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Number of flipped bits
    pub count: usize,
    /// Flipped positions
    pub positions: Vec<usize>,
    /// Whether a Hamming decoder can repair this (at most one error)
    pub can_correct: bool,
    /// Mode the injector is in
    pub mode: ErrorMode,
}

impl ErrorInfo {
    /// Short human readable description
    pub fn description(&self) -> String {
        match self.count {
            0 => "no errors".to_string(),
            1 => "single error".to_string(),
            n => format!("{} errors", n),
        }
    }
}

/// Error injector with its own seedable random source.
///
/// Besides the random source it only remembers the current mode and the
/// positions flipped by the last call, which front ends use to say whether
/// a correction was right.
#[derive(Debug, Clone)]
pub struct ErrorInjector {
    rng: ChaCha20Rng,
    mode: ErrorMode,
    positions: Vec<usize>,
}

impl Default for ErrorInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorInjector {
    /// Create an injector seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(ChaCha20Rng::from_entropy())
    }

    /// Create a deterministic injector
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha20Rng) -> Self {
        Self {
            rng,
            mode: ErrorMode::default(),
            positions: Vec::new(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// Switches mode and forgets recorded errors
    pub fn set_mode(&mut self, mode: ErrorMode) {
        self.mode = mode;
        self.positions.clear();
    }

    /// Injects errors according to the current mode.
    pub fn simulate(&mut self, codeword: &Codeword) -> Result<Injection> {
        self.simulate_with(codeword, self.mode)
    }

    /// Injects errors according to `mode` without changing the current mode.
    pub fn simulate_with(&mut self, codeword: &Codeword, mode: ErrorMode) -> Result<Injection> {
        let injection = inject_errors(codeword, mode, &mut self.rng)?;
        self.positions = injection.positions.clone();
        Ok(injection)
    }

    /// Flips the bit at `position` and records it as the only error.
    pub fn simulate_manual(&mut self, codeword: &Codeword, position: usize) -> Result<Injection> {
        let injection = apply_manual(codeword, position)?;
        self.positions = injection.positions.clone();
        Ok(injection)
    }

    /// Forgets recorded errors
    pub fn reset(&mut self) {
        self.positions.clear();
    }

    /// Positions flipped by the last call
    pub fn error_positions(&self) -> &[usize] {
        &self.positions
    }

    /// Whether any errors are recorded
    pub fn has_errors(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Summary of recorded errors
    pub fn error_info(&self) -> ErrorInfo {
        ErrorInfo {
            count: self.positions.len(),
            positions: self.positions.clone(),
            can_correct: self.positions.len() <= 1,
            mode: self.mode,
        }
    }
}
