/// Number of transducer channels driven by the chip.
pub const NUM_CHANNELS: usize = 32;
/// Number of channel pairs; two adjacent channels share one delay register.
pub const NUM_CHANNEL_PAIRS: usize = NUM_CHANNELS / 2;

/// Period of the 250 MHz reference clock, in seconds. One delay cycle.
pub const REF_CLK_PERIOD: f64 = 4e-9;

/// Largest delay expressible in the 14-bit delay field.
pub const DELAY_CYCLES_MAX: u16 = 0x3FFF;

/// Size of the 7-bit register address space.
pub const NUM_REGS: usize = 0x80;

/// Mode control register.
pub const ADDR_MODE: u8 = 0x00;
/// Idle/write mode.
pub const MODE_IDLE: u32 = 0x0000_0000;
/// Software reset bit.
pub const MODE_SOFT_RESET: u32 = 0x0000_0001;
/// Read-enable mode; must be set before reading any register.
pub const MODE_READ_EN: u32 = 0x0000_0002;

/// Page select register. Must be restored to [`PAGE_GLOBAL`] after every
/// transaction.
pub const ADDR_PAGE_SELECT: u8 = 0x02;

/// T/R switch control (upper 16 bits) and power-down mask (lower 16 bits).
pub const ADDR_TR_SWITCH: u8 = 0x07;

/// Clock-sync detection enable register.
pub const ADDR_CLK_SYNC: u8 = 0x08;
/// Clock-sync detection disabled.
pub const CLK_SYNC_DISABLED: u32 = 0x0000_0000;
/// Clock-sync detection enabled.
pub const CLK_SYNC_ENABLED: u32 = 0x0000_0002;

/// First of the 8 pattern start-word broadcast registers (0x0C..=0x13), one
/// per channel-pair group.
pub const ADDR_PATTERN_START_WORD: u8 = 0x0C;
/// First of the 8 delay start-word broadcast registers (0x0D..=0x14).
pub const ADDR_DELAY_START_WORD: u8 = 0x0D;
/// Number of start-word broadcast registers.
pub const NUM_START_WORD_REGS: u8 = 8;

/// Base address of the page-selected memory window.
pub const ADDR_MEM_BASE: u8 = 0x40;
/// Number of words in the page-selected memory window (0x40..=0x7F).
pub const MEM_WINDOW_WORDS: usize = 0x40;

/// The global register page.
pub const PAGE_GLOBAL: u32 = 0x0000_0000;
/// Page mask addressing the pattern memory of all 16 channel pairs at once.
pub const PAGE_PATTERN_ALL: u32 = 0x0000_FFFF;
/// Page selecting the delay table.
pub const PAGE_DELAY: u32 = 0x0001_0000;

/// Diagnostic status: drive-level errors.
pub const ADDR_DIAG_LEVEL: u8 = 0x1D;
/// Diagnostic status: temperature shutdown \[11:6\], valid flag, ERROR_RST.
pub const ADDR_DIAG_TEMP_HI: u8 = 0x4D;
/// Diagnostic status: supply errors.
pub const ADDR_DIAG_SUPPLY: u8 = 0x4E;
/// Diagnostic status: temperature shutdown \[5:0\].
pub const ADDR_DIAG_TEMP_LO: u8 = 0x62;
/// Diagnostic status: clock detection.
pub const ADDR_DIAG_CLK: u8 = 0x6C;
/// Diagnostic status: trigger/standby errors.
pub const ADDR_DIAG_TRIG: u8 = 0x78;

/// ERROR_RST control bit in register 0x4D.
pub const ERROR_RST_BIT: u32 = 1 << 16;

/// Expected valid flag (bits 31:27) of register 0x4D.
pub const VALID_FLAG_TEMP_HI: u32 = 21;
/// Expected valid flag (bits 31:27) of register 0x4E.
pub const VALID_FLAG_SUPPLY: u32 = 10;
/// Expected valid flag (bits 31:27) of register 0x62.
pub const VALID_FLAG_TEMP_LO: u32 = 11;
/// Expected valid flag (bits 31:27) of register 0x6C.
pub const VALID_FLAG_CLK: u32 = 22;
/// Expected valid flag (bits 31:27) of register 0x78.
pub const VALID_FLAG_TRIG: u32 = 25;
