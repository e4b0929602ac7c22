use itertools::Itertools;

use crate::{
    error::Tx7332DriverError,
    firmware::params::{DELAY_CYCLES_MAX, NUM_CHANNELS, NUM_CHANNEL_PAIRS},
};

/// The 16-bit per-channel delay field.
///
/// Layout: bit 15 is always 0, bit 14 adds half a cycle, bits 13:0 hold the
/// delay in cycles of the 250 MHz reference clock.
#[bitfield_struct::bitfield(u16)]
#[derive(PartialEq, Eq)]
pub struct DelayField {
    #[bits(14)]
    pub cycles: u16,
    pub fractional: bool,
    __: bool,
}

/// Delay of a single channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ChannelDelay {
    cycles: u16,
    fractional: bool,
}

impl ChannelDelay {
    /// A zero delay.
    pub const ZERO: Self = Self {
        cycles: 0,
        fractional: false,
    };

    /// Creates a new [`ChannelDelay`]. `cycles` is truncated to 14 bits.
    pub const fn new(cycles: u16, fractional: bool) -> Self {
        Self {
            cycles: cycles & DELAY_CYCLES_MAX,
            fractional,
        }
    }

    /// Delay in clock cycles.
    pub const fn cycles(&self) -> u16 {
        self.cycles
    }

    /// Whether an extra half cycle is added.
    pub const fn fractional(&self) -> bool {
        self.fractional
    }

    /// Encodes the delay into the 16-bit register field.
    pub fn encode(&self) -> u16 {
        DelayField::new()
            .with_cycles(self.cycles)
            .with_fractional(self.fractional)
            .into_bits()
    }
}

impl From<u16> for ChannelDelay {
    fn from(cycles: u16) -> Self {
        Self::new(cycles, false)
    }
}

/// Packs the delays of all 32 channels into 16 register words.
///
/// Channels are paired in channel order: channel `2i` occupies the low half
/// of word `i` and channel `2i + 1` the high half.
pub fn combine_pairs(
    delays: &[ChannelDelay],
) -> Result<[u32; NUM_CHANNEL_PAIRS], Tx7332DriverError> {
    if delays.len() != NUM_CHANNELS {
        return Err(Tx7332DriverError::InvalidDelayCount(delays.len()));
    }
    let mut words = [0; NUM_CHANNEL_PAIRS];
    delays
        .iter()
        .tuples()
        .zip(words.iter_mut())
        .for_each(|((lo, hi), word)| {
            *word = (u32::from(hi.encode()) << 16) | u32::from(lo.encode());
        });
    Ok(words)
}
