#![warn(rustdoc::missing_crate_level_docs)]

//! Register-level emulator of the TX7332, used to test the driver without
//! hardware.
//!
//! The emulator implements [`Transport`] and models the chip's paged
//! register file: reads require read mode, writes land in the bank selected
//! by the page select register, and every transport-level operation is
//! journaled so tests can assert on exact write sequences.

use getset::CopyGetters;
use tx7332_driver::{
    firmware::params::{
        ADDR_DIAG_CLK, ADDR_DIAG_SUPPLY, ADDR_DIAG_TEMP_HI, ADDR_DIAG_TEMP_LO, ADDR_DIAG_TRIG,
        ADDR_MEM_BASE, ADDR_MODE, ADDR_PAGE_SELECT, MEM_WINDOW_WORDS, MODE_READ_EN, NUM_REGS,
        PAGE_DELAY, PAGE_PATTERN_ALL, VALID_FLAG_CLK, VALID_FLAG_SUPPLY, VALID_FLAG_TEMP_HI,
        VALID_FLAG_TEMP_LO, VALID_FLAG_TRIG,
    },
    transport::{Transport, TransportError},
};

/// A raw transport-level register write, tagged with the page that was
/// selected when it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteRecord {
    /// Register address.
    pub addr: u8,
    /// Written value.
    pub value: u32,
    /// Page selected at the time of the write (for a write to the page
    /// select register itself, the previously selected page).
    pub page: u32,
}

/// A journaled transport-level operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A register write.
    Write(WriteRecord),
    /// A sync enable/disable.
    Sync(bool),
}

/// Emulated TX7332.
///
/// The diagnostic registers default to a healthy device: valid flags set,
/// clock detected, no error bits.
#[derive(CopyGetters)]
pub struct Tx7332Emulator {
    open: bool,
    /// Current sync state.
    #[getset(get_copy = "pub")]
    sync_enabled: bool,
    global: [u32; NUM_REGS],
    pair_regs: [u32; ADDR_MEM_BASE as usize],
    pattern_mem: [u32; MEM_WINDOW_WORDS],
    delay_mem: [u32; MEM_WINDOW_WORDS],
    journal: Vec<Event>,
    fail_after: Option<usize>,
}

impl Default for Tx7332Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tx7332Emulator {
    /// Creates a new, open emulator with healthy diagnostic registers.
    pub fn new() -> Self {
        let mut global = [0; NUM_REGS];
        global[ADDR_DIAG_TEMP_HI as usize] = VALID_FLAG_TEMP_HI << 27;
        global[ADDR_DIAG_SUPPLY as usize] = VALID_FLAG_SUPPLY << 27;
        global[ADDR_DIAG_TEMP_LO as usize] = VALID_FLAG_TEMP_LO << 27;
        global[ADDR_DIAG_CLK as usize] = (VALID_FLAG_CLK << 27) | (1 << 16);
        global[ADDR_DIAG_TRIG as usize] = VALID_FLAG_TRIG << 27;
        Self {
            open: true,
            sync_enabled: false,
            global,
            pair_regs: [0; ADDR_MEM_BASE as usize],
            pattern_mem: [0; MEM_WINDOW_WORDS],
            delay_mem: [0; MEM_WINDOW_WORDS],
            journal: Vec::new(),
            fail_after: None,
        }
    }

    /// Currently selected page.
    pub fn page_select(&self) -> u32 {
        self.global[ADDR_PAGE_SELECT as usize]
    }

    /// Value of a global-page register.
    pub fn register(&self, addr: u8) -> u32 {
        self.global[addr as usize]
    }

    /// Value of a per-pair register (page-selected, below the memory
    /// window).
    pub fn pair_register(&self, addr: u8) -> u32 {
        self.pair_regs[addr as usize]
    }

    /// The pattern memory window, indexed from word 0.
    pub fn pattern_memory(&self) -> &[u32] {
        &self.pattern_mem
    }

    /// The delay table window, indexed from word 0.
    pub fn delay_memory(&self) -> &[u32] {
        &self.delay_mem
    }

    /// Every transport-level operation, in device order.
    pub fn journal(&self) -> &[Event] {
        &self.journal
    }

    /// Register writes excluding the page-select/read-mode bookkeeping of
    /// the transaction bracket.
    pub fn register_writes(&self) -> Vec<WriteRecord> {
        self.journal
            .iter()
            .filter_map(|event| match event {
                Event::Write(record)
                    if record.addr != ADDR_PAGE_SELECT && record.addr != ADDR_MODE =>
                {
                    Some(*record)
                }
                _ => None,
            })
            .collect()
    }

    /// Sync toggles, in device order.
    pub fn sync_events(&self) -> Vec<bool> {
        self.journal
            .iter()
            .filter_map(|event| match event {
                Event::Sync(enable) => Some(*enable),
                _ => None,
            })
            .collect()
    }

    /// Overwrites a global register, for fault injection.
    pub fn set_register(&mut self, addr: u8, value: u32) {
        self.global[addr as usize] = value;
    }

    /// Makes every register access after the next `n` fail. Sync control is
    /// a separate signal line and keeps working.
    pub fn fail_after(&mut self, n: usize) {
        self.fail_after = Some(n);
    }

    fn check_open(&self) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::new(
                "emulator transport is closed".to_string(),
            ));
        }
        Ok(())
    }

    fn check_faults(&mut self) -> Result<(), TransportError> {
        if let Some(n) = self.fail_after.as_mut() {
            if *n == 0 {
                return Err(TransportError::new("injected transport failure".to_string()));
            }
            *n -= 1;
        }
        Ok(())
    }

    fn check_addr(addr: u8) -> Result<(), TransportError> {
        if usize::from(addr) >= NUM_REGS {
            return Err(TransportError::new(format!(
                "register address {:#04X} out of range",
                addr
            )));
        }
        Ok(())
    }
}

impl Transport for Tx7332Emulator {
    fn write(&mut self, addr: u8, value: u32) -> Result<(), TransportError> {
        self.check_open()?;
        self.check_faults()?;
        Self::check_addr(addr)?;
        let page = self.page_select();
        self.journal.push(Event::Write(WriteRecord { addr, value, page }));
        match addr {
            ADDR_MODE | ADDR_PAGE_SELECT => self.global[addr as usize] = value,
            _ => match page {
                PAGE_PATTERN_ALL if addr >= ADDR_MEM_BASE => {
                    self.pattern_mem[(addr - ADDR_MEM_BASE) as usize] = value
                }
                PAGE_PATTERN_ALL => self.pair_regs[addr as usize] = value,
                PAGE_DELAY if addr >= ADDR_MEM_BASE => {
                    self.delay_mem[(addr - ADDR_MEM_BASE) as usize] = value
                }
                _ => self.global[addr as usize] = value,
            },
        }
        Ok(())
    }

    fn read(&mut self, addr: u8) -> Result<u32, TransportError> {
        self.check_open()?;
        self.check_faults()?;
        Self::check_addr(addr)?;
        if self.global[ADDR_MODE as usize] != MODE_READ_EN {
            return Err(TransportError::new(format!(
                "read of {:#04X} without read mode enabled",
                addr
            )));
        }
        Ok(match self.page_select() {
            PAGE_PATTERN_ALL if addr >= ADDR_MEM_BASE => {
                self.pattern_mem[(addr - ADDR_MEM_BASE) as usize]
            }
            PAGE_PATTERN_ALL => self.pair_regs[addr as usize],
            PAGE_DELAY if addr >= ADDR_MEM_BASE => self.delay_mem[(addr - ADDR_MEM_BASE) as usize],
            _ => self.global[addr as usize],
        })
    }

    fn enable_sync(&mut self, enable: bool) -> Result<(), TransportError> {
        self.check_open()?;
        self.journal.push(Event::Sync(enable));
        self.sync_enabled = enable;
        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_land_in_the_selected_bank() {
        let mut dev = Tx7332Emulator::new();

        dev.write(ADDR_PAGE_SELECT, PAGE_PATTERN_ALL).unwrap();
        dev.write(0x42, 0xAAAA_5555).unwrap();
        dev.write(ADDR_PAGE_SELECT, PAGE_DELAY).unwrap();
        dev.write(0x42, 0x1234_5678).unwrap();
        dev.write(ADDR_PAGE_SELECT, 0).unwrap();
        dev.write(0x42, 0xDEAD_BEEF).unwrap();

        assert_eq!(0xAAAA_5555, dev.pattern_memory()[2]);
        assert_eq!(0x1234_5678, dev.delay_memory()[2]);
        assert_eq!(0xDEAD_BEEF, dev.register(0x42));
    }

    #[test]
    fn pair_registers_are_separate_from_global() {
        let mut dev = Tx7332Emulator::new();

        dev.write(ADDR_PAGE_SELECT, PAGE_PATTERN_ALL).unwrap();
        dev.write(0x10, 7).unwrap();
        dev.write(ADDR_PAGE_SELECT, 0).unwrap();

        assert_eq!(7, dev.pair_register(0x10));
        assert_eq!(0, dev.register(0x10));
    }

    #[test]
    fn reads_require_read_mode() {
        let mut dev = Tx7332Emulator::new();

        assert!(dev.read(ADDR_DIAG_CLK).is_err());

        dev.write(ADDR_MODE, MODE_READ_EN).unwrap();
        assert_eq!(
            (VALID_FLAG_CLK << 27) | (1 << 16),
            dev.read(ADDR_DIAG_CLK).unwrap()
        );
    }

    #[test]
    fn fail_after_injects_failures_on_register_access_only() {
        let mut dev = Tx7332Emulator::new();
        dev.fail_after(2);

        assert!(dev.write(0x40, 0).is_ok());
        assert!(dev.write(0x41, 0).is_ok());
        assert!(dev.write(0x42, 0).is_err());
        assert!(dev.read(0x42).is_err());

        // The sync line is separate from the register interface.
        assert!(dev.enable_sync(true).is_ok());
        assert_eq!(vec![true], dev.sync_events());
    }

    #[test]
    fn closed_transport_rejects_everything() {
        let mut dev = Tx7332Emulator::new();
        dev.close().unwrap();

        assert!(!dev.is_open());
        assert!(dev.write(0x40, 0).is_err());
        assert!(dev.read(0x40).is_err());
        assert!(dev.enable_sync(true).is_err());
    }

    #[test]
    fn rejects_address_out_of_range() {
        let mut dev = Tx7332Emulator::new();
        assert!(dev.write(0x80, 0).is_err());
    }
}
