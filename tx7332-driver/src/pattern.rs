use getset::{CopyGetters, Getters};

use crate::{error::Tx7332DriverError, firmware::params::MEM_WINDOW_WORDS};

/// A drive waveform pattern.
///
/// Each word describes drive-voltage-level transitions over time for one
/// waveform cycle; the start word is the offset of the first word within the
/// pattern memory page.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters)]
pub struct Pattern {
    /// Human-readable name.
    #[getset(get = "pub")]
    name: String,
    /// Operating frequency in Hz (0 for test patterns).
    #[getset(get_copy = "pub")]
    frequency_hz: f64,
    /// Number of waveform cycles.
    #[getset(get_copy = "pub")]
    cycles: u32,
    /// The pattern words.
    #[getset(get = "pub")]
    words: Vec<u32>,
    /// Offset of the first word within the pattern memory page.
    #[getset(get_copy = "pub")]
    start_word: u16,
}

impl Pattern {
    /// Start word used by the preset patterns.
    pub const DEFAULT_START_WORD: u16 = 0x001E;

    /// Creates a custom pattern.
    pub fn custom(words: Vec<u32>, start_word: u16) -> Self {
        Self {
            name: "Custom".to_string(),
            frequency_hz: 0.,
            cycles: 0,
            words,
            start_word,
        }
    }

    /// Standard 5.6 MHz 3-level waveform.
    ///
    /// Under the 250 MHz clock each transition lasts 22 cycles: 0xB1 drives
    /// 22 cycles of PHV (positive high voltage), 0xB5 22 cycles of MHV
    /// (negative high voltage).
    pub fn preset_5_6mhz_3lvl_a() -> Self {
        Self {
            name: "5.6 MHz 3-Level A".to_string(),
            frequency_hz: 5.6e6,
            cycles: 2,
            words: vec![0x0002_0002, 0x0000_B5B1],
            start_word: Self::DEFAULT_START_WORD,
        }
    }

    /// Extended 5.6 MHz 3-level waveform with GND guard bands.
    pub fn preset_5_6mhz_3lvl_extended() -> Self {
        Self {
            name: "5.6 MHz 3-Level Extended".to_string(),
            frequency_hz: 5.6e6,
            cycles: 2,
            words: vec![0xB5B1_0100, 0xC8C8_0500, 0x0000_FF00],
            start_word: Self::DEFAULT_START_WORD,
        }
    }

    /// 3.4 MHz 2-level waveform (250 MHz / (2 * 37) = 3.38 MHz), PHV and MHV
    /// levels only.
    pub fn preset_3_4mhz_2lvl_a() -> Self {
        Self {
            name: "3.4 MHz 2-Level A".to_string(),
            frequency_hz: 3.4e6,
            cycles: 2,
            words: vec![0x31F9_0300, 0x0500_35FD, 0xFF00_C8C8],
            start_word: Self::DEFAULT_START_WORD,
        }
    }

    /// Test pattern for T/R switch glitch testing.
    pub fn preset_tr_glitch_test() -> Self {
        Self {
            name: "Test Glitch Pattern".to_string(),
            frequency_hz: 0.,
            cycles: 0,
            words: vec![0xA0A0_0000],
            start_word: Self::DEFAULT_START_WORD,
        }
    }

    /// Checks the input contract: at least one word, and all words must fit
    /// in the pattern memory window at the configured start word.
    pub fn validate(&self) -> Result<(), Tx7332DriverError> {
        if self.words.is_empty() {
            return Err(Tx7332DriverError::InvalidPattern(
                "pattern must contain at least one word".to_string(),
            ));
        }
        if usize::from(self.start_word) + self.words.len() > MEM_WINDOW_WORDS {
            return Err(Tx7332DriverError::InvalidPattern(format!(
                "pattern of {} words does not fit in pattern memory at start word {:#06X}",
                self.words.len(),
                self.start_word
            )));
        }
        Ok(())
    }
}
