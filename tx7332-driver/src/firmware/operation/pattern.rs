use crate::{
    error::Tx7332DriverError,
    firmware::{
        params::{
            ADDR_CLK_SYNC, ADDR_MEM_BASE, ADDR_PATTERN_START_WORD, CLK_SYNC_DISABLED,
            NUM_START_WORD_REGS, PAGE_GLOBAL, PAGE_PATTERN_ALL,
        },
        RegisterLink,
    },
    pattern::Pattern,
    transport::Transport,
};

use super::with_sync_disabled;

/// Writes a waveform pattern into the pattern memory of all channel pairs.
///
/// The sequence is ordering sensitive: sync and clock-sync detection are
/// disabled first, then the start word is broadcast to the 8 channel-pair
/// group registers, then the pattern words are written on the all-pairs
/// page. Sync is re-enabled on every exit path; clock-sync detection stays
/// disabled until the next delay apply or diagnostics remediation.
pub struct PatternOp {
    pattern: Pattern,
}

impl PatternOp {
    /// Creates a new [`PatternOp`], validating the pattern first.
    pub fn new(pattern: Pattern) -> Result<Self, Tx7332DriverError> {
        pattern.validate()?;
        Ok(Self { pattern })
    }

    /// Applies the pattern to the device.
    pub fn apply<T: Transport>(&self, link: &mut RegisterLink<T>) -> Result<(), Tx7332DriverError> {
        tracing::debug!(
            "applying pattern {:?} ({} words at {:#06X})",
            self.pattern.name(),
            self.pattern.words().len(),
            self.pattern.start_word()
        );
        with_sync_disabled(link, |link| {
            link.write(ADDR_CLK_SYNC, CLK_SYNC_DISABLED, PAGE_GLOBAL)?;

            let sw = u32::from(self.pattern.start_word());
            let broadcast = (sw << 16) | sw;
            for addr in ADDR_PATTERN_START_WORD..ADDR_PATTERN_START_WORD + NUM_START_WORD_REGS {
                link.write(addr, broadcast, PAGE_GLOBAL)?;
            }

            let base = usize::from(ADDR_MEM_BASE) + usize::from(self.pattern.start_word());
            for (i, &word) in self.pattern.words().iter().enumerate() {
                link.write((base + i) as u8, word, PAGE_PATTERN_ALL)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_pattern_before_any_write() {
        assert!(matches!(
            PatternOp::new(Pattern::custom(vec![], 0)),
            Err(Tx7332DriverError::InvalidPattern(_))
        ));
    }
}
