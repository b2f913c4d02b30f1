//! Hamming single-error-correcting code with an error injection simulator.
//!
//! - [`ecc`] holds the code itself and the bit-flip injector
//! - [`simulator`] strings them together into an encode → corrupt → detect →
//!   correct session for a front end to drive
//! - [`config`] configures that session

pub mod config;
pub mod ecc;
pub mod error;
pub mod simulator;

pub use config::{Preset, SimulatorConfig};
pub use ecc::{BitString, Codeword, ErrorMode, HammingCode, Syndrome};
pub use error::{Error, Result};
pub use simulator::{CorrectionOutcome, Simulator};
