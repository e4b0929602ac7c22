use std::time::Duration;

use crate::{
    error::Tx7332DriverError,
    firmware::{
        params::{ADDR_MEM_BASE, ADDR_MODE, MODE_SOFT_RESET, PAGE_GLOBAL, PAGE_PATTERN_ALL},
        RegisterLink,
    },
    sleep::{Sleeper, StdSleeper},
    transport::Transport,
};

/// Software reset: sets the reset bit of the mode register and waits for the
/// device to settle.
pub struct SoftwareResetOp<S: Sleeper> {
    sleeper: S,
}

impl Default for SoftwareResetOp<StdSleeper> {
    fn default() -> Self {
        Self::new(StdSleeper)
    }
}

impl<S: Sleeper> SoftwareResetOp<S> {
    /// Settle time after the reset bit is written.
    pub const SETTLE: Duration = Duration::from_millis(1);

    /// Creates a new [`SoftwareResetOp`] with the given sleeper.
    pub const fn new(sleeper: S) -> Self {
        Self { sleeper }
    }

    /// Resets the device.
    pub fn apply<T: Transport>(&self, link: &mut RegisterLink<T>) -> Result<(), Tx7332DriverError> {
        tracing::debug!("software reset");
        link.write(ADDR_MODE, MODE_SOFT_RESET, PAGE_GLOBAL)?;
        self.sleeper.sleep(Self::SETTLE);
        Ok(())
    }
}

/// Clears the per-pair register space and pattern memory of every channel
/// pair.
pub struct MemoryResetOp;

impl MemoryResetOp {
    /// Resets the device memory.
    pub fn apply<T: Transport>(&self, link: &mut RegisterLink<T>) -> Result<(), Tx7332DriverError> {
        tracing::debug!("resetting device memory");
        for addr in 0x00..ADDR_MEM_BASE {
            link.write(addr, 0x0000_0000, PAGE_PATTERN_ALL)?;
        }
        Ok(())
    }
}
