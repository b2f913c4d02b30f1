//! Error types shared by the encoder, the error injector and the simulator.

use thiserror::Error;

/// Errors raised by the Hamming code core and the simulator session.
///
/// The core has no transient failure modes, so none of these are retried
/// internally; they are meant to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Source or received text is empty or contains something other than `0`/`1`
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Manual flip position outside `[1, len]`
    #[error("Invalid position {position}: must be between 1 and {len}")]
    InvalidPosition { position: usize, len: usize },

    /// Unrecognised injection mode name
    #[error("Unknown error mode: {0}")]
    UnknownMode(String),

    /// Random injection asked for more distinct positions than the word has
    #[error("Codeword too short: need at least {needed} bits, got {len}")]
    CodewordTooShort { needed: usize, len: usize },

    /// Session input longer than the configured maximum
    #[error("Input too long: {len} bits exceeds the maximum of {max}")]
    InputTooLong { len: usize, max: usize },

    /// Session operation attempted before anything was encoded
    #[error("Nothing has been encoded yet")]
    NothingEncoded,

    /// Unrecognised sample input name
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

/// Result type for Hamming code operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::invalid_input("only 0s and 1s are allowed").to_string(),
            "Invalid input: only 0s and 1s are allowed"
        );
        assert_eq!(
            Error::InvalidPosition { position: 9, len: 7 }.to_string(),
            "Invalid position 9: must be between 1 and 7"
        );
        assert_eq!(
            Error::UnknownMode("quadruple".into()).to_string(),
            "Unknown error mode: quadruple"
        );
        assert_eq!(
            Error::CodewordTooShort { needed: 3, len: 2 }.to_string(),
            "Codeword too short: need at least 3 bits, got 2"
        );
    }
}
