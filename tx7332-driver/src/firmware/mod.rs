/// Per-channel delay encoding.
pub mod delay;
/// Diagnostic status interpretation.
pub mod diagnostics;
mod link;
/// Multi-register apply sequences.
pub mod operation;
/// The TX7332 register map.
pub mod params;

pub use link::RegisterLink;
