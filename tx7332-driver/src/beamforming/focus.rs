use derive_new::new;

use crate::{
    error::Tx7332DriverError,
    firmware::{
        delay::ChannelDelay,
        params::{DELAY_CYCLES_MAX, NUM_CHANNELS},
    },
};

/// Request for the closed-form geometric focal-point delay solver.
#[derive(new, Clone, Copy, Debug, PartialEq)]
pub struct FocusRequest {
    /// Number of array elements.
    pub num_elements: usize,
    /// Element pitch in micrometers.
    pub pitch_um: f64,
    /// Lateral position of the focal point in millimeters.
    pub focus_x_mm: f64,
    /// Depth of the focal point in millimeters.
    pub focus_z_mm: f64,
    /// Speed of sound in the medium, in m/s.
    pub speed_of_sound: f64,
    /// Delay resolution in nanoseconds.
    pub delay_resolution_ns: f64,
}

impl Default for FocusRequest {
    fn default() -> Self {
        Self::new(NUM_CHANNELS, 110., 0., 15., 1500., 4.)
    }
}

/// The external closed-form focal-point delay solver.
pub trait FocusSolver {
    /// Computes per-element delays, in clock cycles, focusing the array at
    /// the requested point.
    fn compute_focus_delays(&self, request: &FocusRequest) -> Vec<i64>;
}

/// Validates a solver result before it is handed to the encoder: exactly one
/// delay per channel, each non-negative and within the 14-bit delay field.
pub fn validate_focus_delays(
    delays: &[i64],
) -> Result<[ChannelDelay; NUM_CHANNELS], Tx7332DriverError> {
    if delays.len() != NUM_CHANNELS {
        return Err(Tx7332DriverError::InvalidDelayCount(delays.len()));
    }
    let mut out = [ChannelDelay::ZERO; NUM_CHANNELS];
    for (d, &v) in out.iter_mut().zip(delays) {
        if !(0..=i64::from(DELAY_CYCLES_MAX)).contains(&v) {
            return Err(Tx7332DriverError::DelayOutOfRange(v));
        }
        *d = ChannelDelay::new(v as u16, false);
    }
    Ok(out)
}
