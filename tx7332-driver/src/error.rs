use thiserror::Error;

use crate::{
    firmware::params::{DELAY_CYCLES_MAX, MEM_WINDOW_WORDS, NUM_CHANNELS},
    transport::TransportError,
};

use crate::beamforming::{SPEED_OF_SOUND_MAX, SPEED_OF_SOUND_MIN, STEERING_ANGLE_MAX_DEG};

/// A interface for error handling in tx7332-driver.
#[derive(Error, Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum Tx7332DriverError {
    /// No transport is attached to the device.
    #[error("No transport is attached to the device")]
    NotConnected,

    /// The number of delay values is not exactly one per channel.
    #[error("The number of delay values ({0}) must be {num}", num = NUM_CHANNELS)]
    InvalidDelayCount(usize),
    /// A delay value does not fit the 14-bit delay field.
    #[error("Delay value ({0}) is out of range ([0, {max}])", max = DELAY_CYCLES_MAX)]
    DelayOutOfRange(i64),
    /// The delay start word places the delay table outside the memory window.
    #[error(
        "Delay start word ({0:#06X}) places the delay table outside the memory window ({num} words)",
        num = MEM_WINDOW_WORDS
    )]
    DelayStartWordOutOfRange(u16),

    /// The pattern violates the input contract.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// The steering angle is out of range.
    #[error(
        "Steering angle ({0} deg) is out of range ([-{max}, {max}])",
        max = STEERING_ANGLE_MAX_DEG
    )]
    SteeringAngleOutOfRange(f64),
    /// The speed of sound is out of range.
    #[error(
        "Speed of sound ({0} m/s) is out of range ([{min}, {max}])",
        min = SPEED_OF_SOUND_MIN,
        max = SPEED_OF_SOUND_MAX
    )]
    SpeedOfSoundOutOfRange(f64),

    /// Error in the transport.
    #[error("{0}")]
    Transport(#[from] TransportError),
}
