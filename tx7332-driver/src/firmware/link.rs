use crate::{
    error::Tx7332DriverError,
    firmware::params::{ADDR_MODE, ADDR_PAGE_SELECT, MODE_IDLE, MODE_READ_EN, PAGE_GLOBAL},
    transport::{Transport, TransportError},
};

/// Paged register access to the device.
///
/// Which physical register an address refers to depends on the page select
/// register (register 2), which is shared mutable state on the chip. Every
/// access therefore brackets the target register with a page selection and a
/// mandatory page reset; a page select left dirty corrupts the next caller's
/// access. Reads additionally toggle read mode (register 0) around the
/// access.
///
/// All methods take `&mut self`, so a multi-register sequence that holds a
/// `&mut RegisterLink` for its whole duration cannot be interleaved with
/// another caller's accesses.
pub struct RegisterLink<T: Transport> {
    transport: T,
}

impl<T: Transport> RegisterLink<T> {
    /// Creates a new [`RegisterLink`] over a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns a reference to the underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a mutable reference to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn ensure_open(&self) -> Result<(), Tx7332DriverError> {
        if self.transport.is_open() {
            Ok(())
        } else {
            Err(Tx7332DriverError::NotConnected)
        }
    }

    /// Writes `value` to the register at `addr` on the given page.
    ///
    /// The page reset is attempted even if the target write fails.
    pub fn write(&mut self, addr: u8, value: u32, page: u32) -> Result<(), Tx7332DriverError> {
        self.ensure_open()?;
        tracing::trace!(
            "write {:#04X} <- {:#010X} (page {:#010X})",
            addr,
            value,
            page
        );
        self.transport.write(ADDR_PAGE_SELECT, page)?;
        let written = self.transport.write(addr, value);
        let restored = self.transport.write(ADDR_PAGE_SELECT, PAGE_GLOBAL);
        if restored.is_err() {
            tracing::error!("page select not restored after write to {:#04X}", addr);
        }
        written?;
        restored?;
        Ok(())
    }

    /// Reads the register at `addr` on the given page.
    pub fn read(&mut self, addr: u8, page: u32) -> Result<u32, Tx7332DriverError> {
        self.ensure_open()?;
        self.transport.write(ADDR_PAGE_SELECT, page)?;
        let value = self.read_in_page(addr);
        let restored = self.transport.write(ADDR_PAGE_SELECT, PAGE_GLOBAL);
        if restored.is_err() {
            tracing::error!("page select not restored after read of {:#04X}", addr);
        }
        let value = value?;
        restored?;
        tracing::trace!("read {:#04X} -> {:#010X} (page {:#010X})", addr, value, page);
        Ok(value)
    }

    fn read_in_page(&mut self, addr: u8) -> Result<u32, TransportError> {
        self.transport.write(ADDR_MODE, MODE_READ_EN)?;
        let value = self.transport.read(addr);
        let idle = self.transport.write(ADDR_MODE, MODE_IDLE);
        let value = value?;
        idle?;
        Ok(value)
    }

    /// Enables or disables the sync signal.
    pub fn enable_sync(&mut self, enable: bool) -> Result<(), Tx7332DriverError> {
        self.ensure_open()?;
        self.transport.enable_sync(enable)?;
        Ok(())
    }

    /// Closes the underlying transport.
    pub fn close(&mut self) -> Result<(), Tx7332DriverError> {
        if !self.transport.is_open() {
            return Ok(());
        }
        self.transport.close()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Op {
        Write(u8, u32),
        Read(u8),
    }

    struct MockTransport {
        pub is_open: bool,
        pub ops: Vec<Op>,
        pub read_value: u32,
        pub fail_write_to: Option<u8>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                is_open: true,
                ops: Vec::new(),
                read_value: 0,
                fail_write_to: None,
            }
        }
    }

    impl Transport for MockTransport {
        fn write(&mut self, addr: u8, value: u32) -> Result<(), TransportError> {
            self.ops.push(Op::Write(addr, value));
            if self.fail_write_to == Some(addr) {
                return Err(TransportError::new("write failed".to_string()));
            }
            Ok(())
        }

        fn read(&mut self, addr: u8) -> Result<u32, TransportError> {
            self.ops.push(Op::Read(addr));
            Ok(self.read_value)
        }

        fn enable_sync(&mut self, _: bool) -> Result<(), TransportError> {
            Ok(())
        }

        fn close(&mut self) -> Result<(), TransportError> {
            self.is_open = false;
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.is_open
        }
    }

    #[test]
    fn write_brackets_with_page_select() {
        let mut link = RegisterLink::new(MockTransport::new());

        link.write(0x07, 0xFFFF_0000, 0).unwrap();

        assert_eq!(
            vec![
                Op::Write(ADDR_PAGE_SELECT, 0),
                Op::Write(0x07, 0xFFFF_0000),
                Op::Write(ADDR_PAGE_SELECT, 0),
            ],
            link.transport().ops
        );
    }

    #[test]
    fn read_toggles_read_mode_inside_page_bracket() {
        let mut link = RegisterLink::new(MockTransport::new());
        link.transport_mut().read_value = 0xDEAD_BEEF;

        let value = link.read(0x4D, 0x0001_0000).unwrap();

        assert_eq!(0xDEAD_BEEF, value);
        assert_eq!(
            vec![
                Op::Write(ADDR_PAGE_SELECT, 0x0001_0000),
                Op::Write(ADDR_MODE, MODE_READ_EN),
                Op::Read(0x4D),
                Op::Write(ADDR_MODE, MODE_IDLE),
                Op::Write(ADDR_PAGE_SELECT, 0),
            ],
            link.transport().ops
        );
    }

    #[test]
    fn not_connected() {
        let mut link = RegisterLink::new(MockTransport::new());
        link.transport_mut().is_open = false;

        assert_eq!(
            Some(Tx7332DriverError::NotConnected),
            link.write(0x07, 0, 0).err()
        );
        assert_eq!(
            Some(Tx7332DriverError::NotConnected),
            link.read(0x07, 0).err()
        );
        assert_eq!(
            Some(Tx7332DriverError::NotConnected),
            link.enable_sync(true).err()
        );
        assert!(link.transport().ops.is_empty());
    }

    #[test]
    fn page_reset_attempted_after_failed_write() {
        let mut link = RegisterLink::new(MockTransport::new());
        link.transport_mut().fail_write_to = Some(0x08);

        assert!(link.write(0x08, 0, 0).is_err());

        // The bracket still ends with a page reset.
        assert_eq!(
            Some(&Op::Write(ADDR_PAGE_SELECT, 0)),
            link.transport().ops.last()
        );
        assert_eq!(3, link.transport().ops.len());
    }

    #[test]
    fn close_is_idempotent() {
        let mut link = RegisterLink::new(MockTransport::new());
        link.close().unwrap();
        link.close().unwrap();
        assert!(!link.transport().is_open());
    }
}
