mod delay;
mod pattern;
mod reset;
mod tr_switch;

pub use delay::DelayOp;
pub use pattern::PatternOp;
pub use reset::{MemoryResetOp, SoftwareResetOp};
pub use tr_switch::TrSwitchOp;

use crate::{error::Tx7332DriverError, firmware::RegisterLink, transport::Transport};

/// Runs `f` with sync disabled and re-enables sync on every exit path.
///
/// A sequence that fails midway leaves the device in a valid but undefined
/// intermediate state; it is reported as an error, never retried here. A
/// failed restore leaves the array unsynced and is logged as such.
fn with_sync_disabled<T: Transport>(
    link: &mut RegisterLink<T>,
    f: impl FnOnce(&mut RegisterLink<T>) -> Result<(), Tx7332DriverError>,
) -> Result<(), Tx7332DriverError> {
    link.enable_sync(false)?;
    let result = f(link);
    let restored = link.enable_sync(true);
    match (&result, &restored) {
        (Err(e), Ok(())) => tracing::warn!("sequence aborted ({}); sync restored", e),
        (_, Err(e)) => tracing::error!(
            "sync not restored ({}); the array must be resynced before further use",
            e
        ),
        _ => {}
    }
    result?;
    restored?;
    Ok(())
}
