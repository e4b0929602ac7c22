#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Driver for the TI TX7332, a 32-channel piezoelectric ultrasound
//! transmitter with a paged, memory-mapped register interface.
//!
//! The physical transport (USB/FTDI byte-level I/O) is abstracted behind the
//! [`transport::Transport`] trait; everything above it is pure register
//! protocol: the paged read/write discipline, the fixed-point delay encoding,
//! the ordered apply sequences for waveform patterns and delay tables, and
//! the diagnostic bitfield interpreter.

/// Beamforming delay computation.
pub mod beamforming;
/// Driver error types.
pub mod error;
/// Register map, paged register access and apply sequences.
pub mod firmware;
/// Waveform patterns and presets.
pub mod pattern;
/// Sleep abstraction.
pub mod sleep;
/// The register-level interface with the device.
pub mod transport;
