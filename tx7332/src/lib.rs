#![warn(rustdoc::missing_crate_level_docs)]

//! High-level library for the TI TX7332, a 32-channel piezoelectric
//! ultrasound transmitter.
//!
//! # Example
//!
//! ```
//! use tx7332::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut controller = Controller::open(tx7332_emulator::Tx7332Emulator::new())?;
//!
//!     controller.apply_pattern(&Pattern::preset_5_6mhz_3lvl_a())?;
//!     controller.steer(&BeamSteering {
//!         angle_deg: 15.,
//!         ..Default::default()
//!     })?;
//!
//!     let report = controller.run_diagnostics()?;
//!     assert!(report.passed());
//!
//!     controller.close()?;
//!     Ok(())
//! }
//! ```

mod controller;

/// Commonly used items.
pub mod prelude;

pub use controller::Controller;
pub use tx7332_driver as driver;
