//! Transmission simulator session.
//!
//! A [`Simulator`] holds everything a front end needs to walk through one
//! transmission: the source bits, the encoded word, the word as received
//! after injected errors, its syndrome and the corrected word. It never
//! renders anything; a CLI or GUI drives it and displays its state.
//!
//! ```
//! use hamming_sim::config::SimulatorConfig;
//! use hamming_sim::ecc::ErrorMode;
//! use hamming_sim::simulator::{CorrectionOutcome, Simulator};
//!
//! let mut sim = Simulator::new(SimulatorConfig::default().with_seed(3));
//! sim.encode("1011").unwrap();
//!
//! sim.set_mode(ErrorMode::Single);
//! let injection = sim.simulate().unwrap();
//! let outcome = sim.correct().unwrap();
//! assert_eq!(outcome, CorrectionOutcome::Corrected { position: injection.positions[0] });
//! ```

use crate::config::SimulatorConfig;
use crate::ecc::{
    encoding_info, syndrome, BitString, Codeword, EncodingInfo, ErrorCorrection, ErrorInfo,
    ErrorInjector, ErrorMode, HammingCode, Injection, Syndrome,
};
use crate::error::{Error, Result};
use log::{info, warn};
use rand::Rng;
use std::fmt::{self, Display, Formatter};

/// What happened when the decoder tried to fix the received word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionOutcome {
    /// Syndrome was zero and the word really is intact
    NoErrorDetected,
    /// Syndrome was zero although bits were flipped (errors cancelled out)
    Undetected {
        /// Positions that differ from the sent word
        actual: Vec<usize>,
    },
    /// The flip restored the sent word
    Corrected {
        /// Position that was flipped
        position: usize,
    },
    /// The flip did not restore the sent word
    Miscorrected {
        /// Position the syndrome blamed
        claimed: usize,
        /// Positions that were really corrupted
        actual: Vec<usize>,
    },
}

impl CorrectionOutcome {
    /// True when the corrected word equals the sent word.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            CorrectionOutcome::NoErrorDetected | CorrectionOutcome::Corrected { .. }
        )
    }
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for CorrectionOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionOutcome::NoErrorDetected => write!(f, "no errors to correct"),
            CorrectionOutcome::Undetected { actual } => write!(
                f,
                "syndrome is zero but positions {} were flipped",
                join_positions(actual)
            ),
            CorrectionOutcome::Corrected { position } => {
                write!(f, "error corrected at position {}", position)
            }
            CorrectionOutcome::Miscorrected { claimed, actual } => write!(
                f,
                "correction applied at position {} but INCORRECT: {} errors at positions {}; \
                 a Hamming code can only correct 1 error",
                claimed,
                actual.len(),
                join_positions(actual)
            ),
        }
    }
}

#[derive(Debug, Clone)]
struct Transmission {
    original: BitString,
    encoded: Codeword,
    transmitted: Codeword,
    syndrome: Syndrome,
    corrected: Option<Codeword>,
}

impl Transmission {
    fn receive(&mut self, word: Codeword) {
        self.syndrome = syndrome(&word);
        self.transmitted = word;
        self.corrected = None;
    }
}

/// One encode → corrupt → detect → correct walkthrough.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    code: HammingCode,
    injector: ErrorInjector,
    state: Option<Transmission>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl Simulator {
    /// Creates a session.
    pub fn new(config: SimulatorConfig) -> Self {
        let mut injector = match config.seed {
            Some(seed) => ErrorInjector::with_seed(seed),
            None => ErrorInjector::new(),
        };
        injector.set_mode(config.mode);
        Self {
            config,
            code: HammingCode::new(),
            injector,
            state: None,
        }
    }

    /// The session configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Current injection mode
    pub fn mode(&self) -> ErrorMode {
        self.injector.mode()
    }

    /// Switches the injection mode; recorded errors are forgotten.
    pub fn set_mode(&mut self, mode: ErrorMode) {
        self.injector.set_mode(mode);
    }

    fn transmission(&self) -> Result<&Transmission> {
        self.state.as_ref().ok_or(Error::NothingEncoded)
    }

    fn transmission_mut(&mut self) -> Result<&mut Transmission> {
        self.state.as_mut().ok_or(Error::NothingEncoded)
    }

    /// Validates and encodes `input`, starting a fresh transmission.
    ///
    /// Surrounding whitespace is ignored.
    pub fn encode(&mut self, input: &str) -> Result<EncodingInfo> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::invalid_input("please enter a binary sequence"));
        }
        let original = BitString::parse(input)?;
        self.config.check_length(original.len())?;

        let encoded = self.code.encode(&original);
        let info = encoding_info(&original, &encoded);
        info!("encoded {} into {}: {}", original, encoded, info);

        self.injector.reset();
        self.state = Some(Transmission {
            syndrome: syndrome(&encoded),
            transmitted: encoded.clone(),
            original,
            encoded,
            corrected: None,
        });
        Ok(info)
    }

    /// Injects errors per the current mode into a fresh copy of the encoded word.
    pub fn simulate(&mut self) -> Result<Injection> {
        let encoded = self.transmission()?.encoded.clone();
        let injection = self.injector.simulate(&encoded)?;
        info!(
            "{} error injection at positions {:?}",
            self.injector.mode(),
            injection.positions
        );

        self.transmission_mut()?
            .receive(injection.received.clone());
        Ok(injection)
    }

    /// Flips one bit of the current received word.
    ///
    /// The flip is recorded as the single known error, as in a manual
    /// injection; the outcome of [`correct`](Self::correct) still compares
    /// against the sent word, so stacked toggles are judged correctly.
    pub fn toggle_bit(&mut self, position: usize) -> Result<()> {
        let transmitted = self.transmission()?.transmitted.clone();
        let injection = self.injector.simulate_manual(&transmitted, position)?;
        info!("toggled bit {}", position);

        self.transmission_mut()?.receive(injection.received);
        Ok(())
    }

    /// Syndrome of the current received word.
    pub fn detect(&self) -> Result<Syndrome> {
        Ok(self.transmission()?.syndrome.clone())
    }

    /// Position the syndrome points at, 0 for none.
    pub fn error_position(&self) -> Result<usize> {
        Ok(self.transmission()?.syndrome.position())
    }

    /// Corrects the received word and judges the result against the sent word.
    ///
    /// The corrected word is kept and available from [`corrected`](Self::corrected)
    /// unless the syndrome was zero.
    ///
    /// # Returns
    ///
    /// How the correction compares with the sent word: nothing to fix,
    /// errors that cancelled to a zero syndrome, a successful single-bit
    /// repair, or a flip at the wrong position.
    ///
    /// # Errors
    ///
    /// `Error::NothingEncoded` if no transmission has been started.
    pub fn correct(&mut self) -> Result<CorrectionOutcome> {
        let code = self.code;
        let state = self.transmission_mut()?;
        let actual = state.encoded.diff(&state.transmitted);

        if state.syndrome.is_zero() {
            if actual.is_empty() {
                return Ok(CorrectionOutcome::NoErrorDetected);
            }
            warn!("errors at {:?} produced a zero syndrome", actual);
            return Ok(CorrectionOutcome::Undetected { actual });
        }

        let decoded = code.decode(&state.transmitted);
        let outcome = if decoded.corrected == state.encoded {
            info!("corrected position {}", decoded.position);
            CorrectionOutcome::Corrected {
                position: decoded.position,
            }
        } else {
            warn!(
                "mis-corrected position {}; actual errors at {:?}",
                decoded.position, actual
            );
            CorrectionOutcome::Miscorrected {
                claimed: decoded.position,
                actual,
            }
        };
        state.corrected = Some(decoded.corrected);
        Ok(outcome)
    }

    /// Restores the received word to the encoded word.
    pub fn reset_transmission(&mut self) -> Result<()> {
        let state = self.transmission_mut()?;
        let encoded = state.encoded.clone();
        state.receive(encoded);
        self.injector.reset();
        info!("transmission reset to the encoded word");
        Ok(())
    }

    /// Drops the whole transmission.
    pub fn clear(&mut self) {
        self.state = None;
        self.injector.reset();
    }

    /// Source bits of the current transmission
    pub fn original(&self) -> Option<&BitString> {
        self.state.as_ref().map(|s| &s.original)
    }

    /// Encoded word
    pub fn encoded(&self) -> Option<&Codeword> {
        self.state.as_ref().map(|s| &s.encoded)
    }

    /// Received word, with any injected errors
    pub fn transmitted(&self) -> Option<&Codeword> {
        self.state.as_ref().map(|s| &s.transmitted)
    }

    /// Word produced by the last [`correct`](Self::correct), if any
    pub fn corrected(&self) -> Option<&Codeword> {
        self.state.as_ref().and_then(|s| s.corrected.as_ref())
    }

    /// Errors recorded by the injector
    pub fn error_info(&self) -> ErrorInfo {
        self.injector.error_info()
    }
}

/// Random source bits, for "try a random example".
pub fn random_bits<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<BitString> {
    if len == 0 {
        return Err(Error::invalid_input("random bit string must not be empty"));
    }
    Ok((0..len).map(|_| rng.gen::<bool>()).collect())
}
