use crate::{
    error::Tx7332DriverError,
    firmware::{
        params::{
            ADDR_CLK_SYNC, ADDR_DELAY_START_WORD, ADDR_MEM_BASE, CLK_SYNC_ENABLED,
            MEM_WINDOW_WORDS, NUM_CHANNEL_PAIRS, NUM_START_WORD_REGS, PAGE_DELAY, PAGE_GLOBAL,
        },
        RegisterLink,
    },
    transport::Transport,
};

use super::with_sync_disabled;

/// Writes a packed delay table into the delay page.
///
/// Re-enabling sync before all delay words are written opens a glitch window
/// on the physical array, so the disable / write / enable order is fixed.
/// Clock-sync detection is re-enabled once sync is restored.
pub struct DelayOp {
    words: [u32; NUM_CHANNEL_PAIRS],
    start_word: u16,
}

impl DelayOp {
    /// Creates a new [`DelayOp`] with the start word fixed at 0.
    pub const fn new(words: [u32; NUM_CHANNEL_PAIRS]) -> Self {
        Self {
            words,
            start_word: 0,
        }
    }

    /// Overrides the delay start word.
    ///
    /// The hardware configuration shipped with this driver always uses 0
    /// here, unlike the pattern path; whether a nonzero delay start word is
    /// meaningful is pending confirmation against the device datasheet.
    pub const fn with_start_word(mut self, start_word: u16) -> Self {
        self.start_word = start_word;
        self
    }

    /// Applies the delay table to the device.
    pub fn apply<T: Transport>(&self, link: &mut RegisterLink<T>) -> Result<(), Tx7332DriverError> {
        let base = usize::from(self.start_word) * 8;
        if base + NUM_CHANNEL_PAIRS > MEM_WINDOW_WORDS {
            return Err(Tx7332DriverError::DelayStartWordOutOfRange(self.start_word));
        }

        tracing::debug!("applying delay table at start word {:#06X}", self.start_word);
        with_sync_disabled(link, |link| {
            let sw = u32::from(self.start_word);
            let broadcast = (sw << 16) | sw;
            for addr in ADDR_DELAY_START_WORD..ADDR_DELAY_START_WORD + NUM_START_WORD_REGS {
                link.write(addr, broadcast, PAGE_GLOBAL)?;
            }

            for (i, &word) in self.words.iter().enumerate() {
                link.write(
                    (usize::from(ADDR_MEM_BASE) + base + i) as u8,
                    word,
                    PAGE_DELAY,
                )?;
            }
            Ok(())
        })?;
        link.write(ADDR_CLK_SYNC, CLK_SYNC_ENABLED, PAGE_GLOBAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[test]
    #[case(true, 0x0000)]
    #[case(true, 0x0005)]
    #[case(true, 0x0006)]
    #[case(false, 0x0007)]
    #[case(false, 0xFFFF)]
    fn start_word_bound(#[case] ok: bool, #[case] start_word: u16) {
        let mut link = RegisterLink::new(super::super::tests::SyncTrackingTransport::new());
        let result = DelayOp::new([0; NUM_CHANNEL_PAIRS])
            .with_start_word(start_word)
            .apply(&mut link);
        assert_eq!(ok, result.is_ok());
        if !ok {
            // Rejected before any register write or sync toggle.
            assert!(link.transport().sync_log.is_empty());
        }
    }
}
