use crate::{
    error::Tx7332DriverError,
    firmware::{
        delay::ChannelDelay,
        params::{NUM_CHANNELS, REF_CLK_PERIOD},
    },
};

/// Positions of the 32 array elements along the azimuth axis, in meters,
/// symmetric about the array center.
pub const ELEMENT_POSITIONS: [f64; NUM_CHANNELS] = [
    -0.00182, -0.00171, -0.0016, -0.00149, -0.00138, -0.00127, -0.00116, -0.00105, -0.000935,
    -0.000825, -0.000715, -0.000605, -0.000495, -0.000385, -0.000275, -0.000165, 0.000165,
    0.000275, 0.000385, 0.000495, 0.000605, 0.000715, 0.000825, 0.000935, 0.00105, 0.00116,
    0.00127, 0.00138, 0.00149, 0.0016, 0.00171, 0.00182,
];

/// Largest supported steering angle magnitude, in degrees.
pub const STEERING_ANGLE_MAX_DEG: f64 = 30.;
/// Smallest supported speed of sound, in m/s.
pub const SPEED_OF_SOUND_MIN: f64 = 1000.;
/// Largest supported speed of sound, in m/s.
pub const SPEED_OF_SOUND_MAX: f64 = 2000.;

/// Plane-wave beam steering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamSteering {
    /// Steering angle in degrees, within ±[`STEERING_ANGLE_MAX_DEG`].
    pub angle_deg: f64,
    /// Speed of sound in the medium, in m/s.
    pub speed_of_sound: f64,
    /// Operating frequency in Hz. Plane-wave delays are wavelength
    /// independent; the frequency is carried for reporting only.
    pub frequency_hz: f64,
}

impl Default for BeamSteering {
    fn default() -> Self {
        Self {
            angle_deg: 0.,
            speed_of_sound: 1500.,
            frequency_hz: 5.6e6,
        }
    }
}

impl BeamSteering {
    /// Computes the per-channel delays for this steering configuration.
    ///
    /// For each element, `delay_time = position * sin(angle) / speed_of_sound`
    /// is converted to cycles of the 250 MHz reference clock with
    /// [`f64::round`] (round half away from zero), clamped to be
    /// non-negative, then the array minimum is subtracted so the smallest
    /// delay is exactly 0. Identical inputs yield identical arrays.
    pub fn delays(&self) -> Result<[ChannelDelay; NUM_CHANNELS], Tx7332DriverError> {
        if !(-STEERING_ANGLE_MAX_DEG..=STEERING_ANGLE_MAX_DEG).contains(&self.angle_deg) {
            return Err(Tx7332DriverError::SteeringAngleOutOfRange(self.angle_deg));
        }
        if !(SPEED_OF_SOUND_MIN..=SPEED_OF_SOUND_MAX).contains(&self.speed_of_sound) {
            return Err(Tx7332DriverError::SpeedOfSoundOutOfRange(
                self.speed_of_sound,
            ));
        }

        let sin = self.angle_deg.to_radians().sin();
        let mut cycles = [0i64; NUM_CHANNELS];
        cycles
            .iter_mut()
            .zip(ELEMENT_POSITIONS)
            .for_each(|(c, position)| {
                let delay_time = position * sin / self.speed_of_sound;
                *c = ((delay_time / REF_CLK_PERIOD).round() as i64).max(0);
            });

        let min = cycles.iter().copied().min().unwrap_or(0);
        let mut delays = [ChannelDelay::ZERO; NUM_CHANNELS];
        delays.iter_mut().zip(cycles).for_each(|(d, c)| {
            *d = ChannelDelay::new((c - min) as u16, false);
        });
        Ok(delays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_angle_is_all_zeros() {
        let delays = BeamSteering::default().delays().unwrap();
        assert!(delays.iter().all(|d| d.cycles() == 0));
    }

    #[rstest::rstest]
    #[test]
    #[case(-30.)]
    #[case(-15.)]
    #[case(0.)]
    #[case(15.)]
    #[case(30.)]
    fn minimum_is_exactly_zero(#[case] angle_deg: f64) {
        let delays = BeamSteering {
            angle_deg,
            ..Default::default()
        }
        .delays()
        .unwrap();
        assert_eq!(0, delays.iter().map(|d| d.cycles()).min().unwrap());
    }

    #[test]
    fn positive_angle_delays_are_nondecreasing() {
        let delays = BeamSteering {
            angle_deg: 30.,
            ..Default::default()
        }
        .delays()
        .unwrap();
        assert!(delays.windows(2).all(|w| w[0].cycles() <= w[1].cycles()));
        assert!(delays.last().unwrap().cycles() > 0);
    }

    #[test]
    fn steering_is_symmetric() {
        let pos = BeamSteering {
            angle_deg: 20.,
            ..Default::default()
        }
        .delays()
        .unwrap();
        let mut neg = BeamSteering {
            angle_deg: -20.,
            ..Default::default()
        }
        .delays()
        .unwrap();
        neg.reverse();
        assert_eq!(pos, neg);
    }

    #[test]
    fn deterministic() {
        let steering = BeamSteering {
            angle_deg: 17.3,
            speed_of_sound: 1487.,
            ..Default::default()
        };
        assert_eq!(steering.delays().unwrap(), steering.delays().unwrap());
    }

    #[rstest::rstest]
    #[test]
    #[case(-30.1)]
    #[case(30.1)]
    #[case(f64::NAN)]
    fn rejects_angle_out_of_range(#[case] angle_deg: f64) {
        assert!(matches!(
            BeamSteering {
                angle_deg,
                ..Default::default()
            }
            .delays(),
            Err(Tx7332DriverError::SteeringAngleOutOfRange(_))
        ));
    }

    #[rstest::rstest]
    #[test]
    #[case(999.9)]
    #[case(2000.1)]
    fn rejects_speed_of_sound_out_of_range(#[case] speed_of_sound: f64) {
        assert!(matches!(
            BeamSteering {
                speed_of_sound,
                ..Default::default()
            }
            .delays(),
            Err(Tx7332DriverError::SpeedOfSoundOutOfRange(_))
        ));
    }
}
