mod focus;
mod steering;

pub use focus::{validate_focus_delays, FocusRequest, FocusSolver};
pub use steering::{
    BeamSteering, ELEMENT_POSITIONS, SPEED_OF_SOUND_MAX, SPEED_OF_SOUND_MIN,
    STEERING_ANGLE_MAX_DEG,
};
