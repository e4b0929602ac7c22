use derive_more::Display;
use derive_new::new;
use thiserror::Error;

/// An error produced by the transport.
#[derive(new, Error, Debug, Display, PartialEq, Eq, Clone)]
#[display("{}", msg)]
pub struct TransportError {
    msg: String,
}

/// A trait that provides the register-level interface with the device.
///
/// Register addresses are 7 bits wide (0x00..=0x7F); implementations reject
/// anything above that. Which physical register an address refers to depends
/// on the currently selected page, so callers must go through
/// [`RegisterLink`](crate::firmware::RegisterLink) rather than use a
/// transport directly.
pub trait Transport: Send {
    /// Writes a value to a device register.
    fn write(&mut self, addr: u8, value: u32) -> Result<(), TransportError>;

    /// Reads the value of a device register.
    fn read(&mut self, addr: u8) -> Result<u32, TransportError>;

    /// Enables or disables the sync signal.
    fn enable_sync(&mut self, enable: bool) -> Result<(), TransportError>;

    /// Closes the transport.
    fn close(&mut self) -> Result<(), TransportError>;

    /// Checks if the transport is open.
    #[must_use]
    fn is_open(&self) -> bool;
}

impl Transport for Box<dyn Transport> {
    fn write(&mut self, addr: u8, value: u32) -> Result<(), TransportError> {
        self.as_mut().write(addr, value)
    }

    fn read(&mut self, addr: u8) -> Result<u32, TransportError> {
        self.as_mut().read(addr)
    }

    fn enable_sync(&mut self, enable: bool) -> Result<(), TransportError> {
        self.as_mut().enable_sync(enable)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.as_mut().close()
    }

    fn is_open(&self) -> bool {
        self.as_ref().is_open()
    }
}
