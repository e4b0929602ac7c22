use derive_new::new;

use crate::{
    error::Tx7332DriverError,
    firmware::{
        params::{ADDR_TR_SWITCH, PAGE_GLOBAL},
        RegisterLink,
    },
    transport::Transport,
};

use super::with_sync_disabled;

/// Sets the T/R switch control (upper 16 bits) and the channel power-down
/// mask (lower 16 bits) of register 0x07.
#[derive(new, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrSwitchOp {
    switch_mask: u16,
    power_down_mask: u16,
}

impl TrSwitchOp {
    /// Applies the masks to the device.
    pub fn apply<T: Transport>(&self, link: &mut RegisterLink<T>) -> Result<(), Tx7332DriverError> {
        with_sync_disabled(link, |link| {
            link.write(
                ADDR_TR_SWITCH,
                (u32::from(self.switch_mask) << 16) | u32::from(self.power_down_mask),
                PAGE_GLOBAL,
            )
        })
    }
}
