pub use crate::Controller;

pub use tx7332_driver::{
    beamforming::{BeamSteering, FocusRequest, FocusSolver},
    error::Tx7332DriverError,
    firmware::{
        delay::{combine_pairs, ChannelDelay},
        diagnostics::{DiagnosticStatus, Diagnostics, DiagnosticsReport},
    },
    pattern::Pattern,
    sleep::{Sleeper, SpinWaitSleeper, StdSleeper},
    transport::{Transport, TransportError},
};
