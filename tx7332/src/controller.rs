use getset::{Getters, MutGetters};

use tx7332_driver::{
    beamforming::{validate_focus_delays, BeamSteering, FocusRequest, FocusSolver},
    error::Tx7332DriverError,
    firmware::{
        delay::{combine_pairs, ChannelDelay},
        diagnostics::{Diagnostics, DiagnosticsReport},
        operation::{DelayOp, MemoryResetOp, PatternOp, SoftwareResetOp, TrSwitchOp},
        params::NUM_CHANNELS,
        RegisterLink,
    },
    pattern::Pattern,
    sleep::Sleeper,
    transport::Transport,
};

/// A controller for a TX7332 device.
///
/// All register transactions to the device go through this struct: it owns
/// the transport and every multi-register sequence holds the link mutably
/// for its whole duration, so sequences never interleave.
#[derive(Getters, MutGetters)]
pub struct Controller<T: Transport> {
    /// The paged register link to the device.
    #[getset(get = "pub", get_mut = "pub")]
    link: RegisterLink<T>,
}

impl<T: Transport> Controller<T> {
    /// Opens a controller over an already-open transport.
    pub fn open(transport: T) -> Result<Self, Tx7332DriverError> {
        if !transport.is_open() {
            return Err(Tx7332DriverError::NotConnected);
        }
        tracing::debug!("opening TX7332 controller");
        Ok(Self {
            link: RegisterLink::new(transport),
        })
    }

    /// Closes the controller.
    pub fn close(mut self) -> Result<(), Tx7332DriverError> {
        self.link.close()
    }

    /// Validates a waveform pattern and writes it to the device.
    pub fn apply_pattern(&mut self, pattern: &Pattern) -> Result<(), Tx7332DriverError> {
        PatternOp::new(pattern.clone())?.apply(&mut self.link)
    }

    /// Packs a 32-channel delay table and writes it to the device.
    pub fn apply_delays(&mut self, delays: &[ChannelDelay]) -> Result<(), Tx7332DriverError> {
        let words = combine_pairs(delays)?;
        DelayOp::new(words).apply(&mut self.link)
    }

    /// Computes plane-wave steering delays and applies them.
    ///
    /// Returns the delays that were applied.
    pub fn steer(
        &mut self,
        steering: &BeamSteering,
    ) -> Result<[ChannelDelay; NUM_CHANNELS], Tx7332DriverError> {
        let delays = steering.delays()?;
        self.apply_delays(&delays)?;
        Ok(delays)
    }

    /// Computes focal-point delays with the given solver and applies them.
    ///
    /// Returns the delays that were applied.
    pub fn focus<S: FocusSolver>(
        &mut self,
        solver: &S,
        request: &FocusRequest,
    ) -> Result<[ChannelDelay; NUM_CHANNELS], Tx7332DriverError> {
        let delays = validate_focus_delays(&solver.compute_focus_delays(request))?;
        self.apply_delays(&delays)?;
        Ok(delays)
    }

    /// Runs diagnostics with the default settle interval.
    pub fn run_diagnostics(&mut self) -> Result<DiagnosticsReport, Tx7332DriverError> {
        Diagnostics::default().run(&mut self.link)
    }

    /// Runs diagnostics with a custom runner.
    pub fn run_diagnostics_with<S: Sleeper>(
        &mut self,
        diagnostics: &Diagnostics<S>,
    ) -> Result<DiagnosticsReport, Tx7332DriverError> {
        diagnostics.run(&mut self.link)
    }

    /// Sets the T/R switch control and channel power-down masks.
    pub fn set_tr_switch(
        &mut self,
        switch_mask: u16,
        power_down_mask: u16,
    ) -> Result<(), Tx7332DriverError> {
        TrSwitchOp::new(switch_mask, power_down_mask).apply(&mut self.link)
    }

    /// Performs a software reset.
    pub fn software_reset(&mut self) -> Result<(), Tx7332DriverError> {
        SoftwareResetOp::default().apply(&mut self.link)
    }

    /// Performs a software reset with a custom sleeper.
    pub fn software_reset_with<S: Sleeper>(
        &mut self,
        sleeper: S,
    ) -> Result<(), Tx7332DriverError> {
        SoftwareResetOp::new(sleeper).apply(&mut self.link)
    }

    /// Clears the per-pair register space and pattern memory of every
    /// channel pair.
    pub fn memory_reset(&mut self) -> Result<(), Tx7332DriverError> {
        MemoryResetOp.apply(&mut self.link)
    }
}
