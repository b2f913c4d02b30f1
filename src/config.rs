//! Simulator configuration and sample inputs.

use crate::ecc::ErrorMode;
use crate::error::{Error, Result};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Configuration for a [`Simulator`](crate::simulator::Simulator) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Longest accepted source bit string
    pub max_data_bits: usize,
    /// Shortest accepted source bit string
    pub min_data_bits: usize,
    /// Injection mode the session starts in
    pub mode: ErrorMode,
    /// Seed for the injector; `None` draws from system entropy
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_data_bits: 12,
            min_data_bits: 1,
            mode: ErrorMode::Single,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Sets the longest accepted input.
    pub fn with_max_data_bits(mut self, max_data_bits: usize) -> Self {
        self.max_data_bits = max_data_bits;
        self
    }

    /// Sets the shortest accepted input.
    pub fn with_min_data_bits(mut self, min_data_bits: usize) -> Self {
        self.min_data_bits = min_data_bits;
        self
    }

    /// Sets the starting injection mode.
    pub fn with_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Makes error injection deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks a source length against the configured bounds.
    pub fn check_length(&self, len: usize) -> Result<()> {
        if len > self.max_data_bits {
            return Err(Error::InputTooLong {
                len,
                max: self.max_data_bits,
            });
        }
        if len < self.min_data_bits {
            return Err(Error::invalid_input(format!(
                "need at least {} data bits, got {}",
                self.min_data_bits, len
            )));
        }
        Ok(())
    }
}

/// Ready-made inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// The textbook (7,4) case
    Basic,
    /// 7 data bits, 4 parity bits
    Intermediate,
    /// 8 data bits, 4 parity bits
    Advanced,
}

impl Preset {
    /// All presets
    pub const ALL: [Preset; 3] = [Preset::Basic, Preset::Intermediate, Preset::Advanced];

    /// The preset's source bits
    pub fn bits(self) -> &'static str {
        match self {
            Preset::Basic => "1011",
            Preset::Intermediate => "1101001",
            Preset::Advanced => "11010011",
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Preset::Basic => "basic",
            Preset::Intermediate => "intermediate",
            Preset::Advanced => "advanced",
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::{encode, validate_input};

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.max_data_bits, 12);
        assert_eq!(config.min_data_bits, 1);
        assert_eq!(config.mode, ErrorMode::Single);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder() {
        let config = SimulatorConfig::default()
            .with_max_data_bits(32)
            .with_mode(ErrorMode::Triple)
            .with_seed(11);
        assert_eq!(config.max_data_bits, 32);
        assert_eq!(config.mode, ErrorMode::Triple);
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn test_check_length() {
        let config = SimulatorConfig::default();
        assert!(config.check_length(1).is_ok());
        assert!(config.check_length(12).is_ok());
        assert_eq!(
            config.check_length(13),
            Err(Error::InputTooLong { len: 13, max: 12 })
        );
        assert!(matches!(config.check_length(0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_min_data_bits() {
        let config = SimulatorConfig::default()
            .with_min_data_bits(4)
            .with_max_data_bits(8);
        assert_eq!(config.min_data_bits, 4);
        assert!(matches!(config.check_length(3), Err(Error::InvalidInput(_))));
        assert!(config.check_length(4).is_ok());
        assert!(config.check_length(8).is_ok());
    }

    #[test]
    fn test_presets() {
        for preset in Preset::ALL {
            assert!(validate_input(preset.bits()));
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
            assert!(encode(preset.bits()).is_ok());
        }
        assert_eq!("BASIC".parse::<Preset>().unwrap(), Preset::Basic);
        assert_eq!(
            "expert".parse::<Preset>(),
            Err(Error::UnknownPreset("expert".to_string()))
        );
        assert_eq!(encode(Preset::Intermediate.bits()).unwrap().len(), 11);
        assert_eq!(encode(Preset::Advanced.bits()).unwrap().len(), 12);
    }
}
