use std::time::Duration;

use derive_more::Display;
use getset::{CopyGetters, Getters};

use crate::{
    error::Tx7332DriverError,
    firmware::{
        params::{
            ADDR_CLK_SYNC, ADDR_DIAG_CLK, ADDR_DIAG_LEVEL, ADDR_DIAG_SUPPLY, ADDR_DIAG_TEMP_HI,
            ADDR_DIAG_TEMP_LO, ADDR_DIAG_TRIG, CLK_SYNC_ENABLED, ERROR_RST_BIT, PAGE_GLOBAL,
            VALID_FLAG_CLK, VALID_FLAG_SUPPLY, VALID_FLAG_TEMP_HI, VALID_FLAG_TEMP_LO,
            VALID_FLAG_TRIG,
        },
        RegisterLink,
    },
    sleep::{Sleeper, StdSleeper},
    transport::Transport,
};

/// Result of a single named diagnostic check.
#[derive(Clone, Debug, PartialEq, Eq, CopyGetters)]
pub struct DiagnosticCheck {
    /// Name of the hardware health condition.
    #[getset(get_copy = "pub")]
    name: &'static str,
    /// Whether the check passed.
    #[getset(get_copy = "pub")]
    passed: bool,
    /// Raw value of the checked bitfield.
    #[getset(get_copy = "pub")]
    value: u32,
}

impl DiagnosticCheck {
    const fn new(name: &'static str, passed: bool, value: u32) -> Self {
        Self {
            name,
            passed,
            value,
        }
    }
}

/// Overall diagnostics outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum DiagnosticStatus {
    /// All checks passed.
    #[display("PASS")]
    Pass,
    /// At least one check failed, or the capture itself failed.
    #[display("FAIL")]
    Fail,
}

/// Structured result of a diagnostics run.
#[derive(Clone, Debug, PartialEq, Eq, Getters, CopyGetters)]
pub struct DiagnosticsReport {
    /// Overall outcome.
    #[getset(get_copy = "pub")]
    status: DiagnosticStatus,
    /// The individual check results.
    #[getset(get = "pub")]
    checks: Vec<DiagnosticCheck>,
}

impl DiagnosticsReport {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.status == DiagnosticStatus::Pass
    }
}

/// Snapshot of the six diagnostic status registers, captured with no
/// intervening writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DiagnosticSnapshot {
    level: u32,
    temp_hi: u32,
    supply: u32,
    temp_lo: u32,
    clk: u32,
    trig: u32,
}

const fn bit(value: u32, index: u32) -> u32 {
    (value >> index) & 1
}

const fn valid_flag(value: u32) -> u32 {
    value >> 27
}

impl DiagnosticSnapshot {
    fn no_clk_failed(&self) -> bool {
        bit(self.clk, 16) != 1
    }

    #[rustfmt::skip]
    fn checks(&self) -> Vec<DiagnosticCheck> {
        vec![
            DiagnosticCheck::new("TEMP_SHUT_ERR[11:6]", self.temp_hi & 0x3F == 0, self.temp_hi & 0x3F),
            DiagnosticCheck::new("TEMP_SHUT_ERR[5:0]", self.temp_lo & 0x3F == 0, self.temp_lo & 0x3F),
            DiagnosticCheck::new("NO_CLK_ERR", bit(self.clk, 16) == 1, bit(self.clk, 16)),
            DiagnosticCheck::new("SINGLE_LVL_ERR", bit(self.level, 0) == 0, bit(self.level, 0)),
            DiagnosticCheck::new("LONG_TRAN_ERR", bit(self.level, 2) == 0, bit(self.level, 2)),
            DiagnosticCheck::new("P5V_SUP_ERR", bit(self.supply, 4) == 0, bit(self.supply, 4)),
            DiagnosticCheck::new("M5V_SUP_ERR", bit(self.supply, 5) == 0, bit(self.supply, 5)),
            DiagnosticCheck::new("PHV_RANGE_ERR", bit(self.supply, 15) == 0, bit(self.supply, 15)),
            DiagnosticCheck::new("TRIG_ERR", bit(self.trig, 2) == 0, bit(self.trig, 2)),
            DiagnosticCheck::new("STANDBY_ERR", bit(self.trig, 0) == 0, bit(self.trig, 0)),
            DiagnosticCheck::new("VALID_FLAG_1", valid_flag(self.temp_hi) == VALID_FLAG_TEMP_HI, valid_flag(self.temp_hi)),
            DiagnosticCheck::new("VALID_FLAG_2", valid_flag(self.supply) == VALID_FLAG_SUPPLY, valid_flag(self.supply)),
            DiagnosticCheck::new("VALID_FLAG_3", valid_flag(self.temp_lo) == VALID_FLAG_TEMP_LO, valid_flag(self.temp_lo)),
            DiagnosticCheck::new("VALID_FLAG_4", valid_flag(self.clk) == VALID_FLAG_CLK, valid_flag(self.clk)),
            DiagnosticCheck::new("VALID_FLAG_5", valid_flag(self.trig) == VALID_FLAG_TRIG, valid_flag(self.trig)),
            DiagnosticCheck::new("ERROR_RST", bit(self.temp_hi, 16) == 0, bit(self.temp_hi, 16)),
        ]
    }
}

/// Diagnostics runner: captures the six status registers, evaluates the 16
/// named checks and attempts one error reset if any check failed.
pub struct Diagnostics<S: Sleeper> {
    settle: Duration,
    sleeper: S,
}

impl Default for Diagnostics<StdSleeper> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SETTLE, StdSleeper)
    }
}

impl<S: Sleeper> Diagnostics<S> {
    /// Default hold time of the ERROR_RST bit during remediation.
    pub const DEFAULT_SETTLE: Duration = Duration::from_secs(1);

    /// Creates a new [`Diagnostics`] with the given ERROR_RST hold time.
    pub const fn new(settle: Duration, sleeper: S) -> Self {
        Self { settle, sleeper }
    }

    /// Runs diagnostics.
    ///
    /// The report is data: a failed check never raises. A register read
    /// failure during capture yields a report with a single synthetic
    /// `DIAGNOSTICS` check instead of a partial one. Remediation is
    /// attempted at most once, appends a synthetic `ERROR_RESET` check, and
    /// never turns the current run back into a pass; it only clears error
    /// flags for the next run.
    pub fn run<T: Transport>(
        &self,
        link: &mut RegisterLink<T>,
    ) -> Result<DiagnosticsReport, Tx7332DriverError> {
        let snapshot = match self.capture(link) {
            Ok(snapshot) => snapshot,
            Err(Tx7332DriverError::Transport(e)) => {
                tracing::error!("diagnostic capture failed: {}", e);
                return Ok(DiagnosticsReport {
                    status: DiagnosticStatus::Fail,
                    checks: vec![DiagnosticCheck::new("DIAGNOSTICS", false, 0)],
                });
            }
            Err(e) => return Err(e),
        };

        let mut checks = snapshot.checks();
        let status = if checks.iter().all(DiagnosticCheck::passed) {
            DiagnosticStatus::Pass
        } else {
            checks.push(self.remediate(link, &snapshot));
            DiagnosticStatus::Fail
        };
        tracing::debug!("diagnostics: {}", status);
        Ok(DiagnosticsReport { status, checks })
    }

    fn capture<T: Transport>(
        &self,
        link: &mut RegisterLink<T>,
    ) -> Result<DiagnosticSnapshot, Tx7332DriverError> {
        Ok(DiagnosticSnapshot {
            level: link.read(ADDR_DIAG_LEVEL, PAGE_GLOBAL)?,
            temp_hi: link.read(ADDR_DIAG_TEMP_HI, PAGE_GLOBAL)?,
            supply: link.read(ADDR_DIAG_SUPPLY, PAGE_GLOBAL)?,
            temp_lo: link.read(ADDR_DIAG_TEMP_LO, PAGE_GLOBAL)?,
            clk: link.read(ADDR_DIAG_CLK, PAGE_GLOBAL)?,
            trig: link.read(ADDR_DIAG_TRIG, PAGE_GLOBAL)?,
        })
    }

    fn remediate<T: Transport>(
        &self,
        link: &mut RegisterLink<T>,
        snapshot: &DiagnosticSnapshot,
    ) -> DiagnosticCheck {
        let result = (|| {
            if snapshot.no_clk_failed() {
                link.write(ADDR_CLK_SYNC, CLK_SYNC_ENABLED, PAGE_GLOBAL)?;
            }
            link.write(ADDR_DIAG_TEMP_HI, ERROR_RST_BIT, PAGE_GLOBAL)?;
            self.sleeper.sleep(self.settle);
            link.write(ADDR_DIAG_TEMP_HI, 0, PAGE_GLOBAL)
        })();
        match result {
            Ok(()) => DiagnosticCheck::new("ERROR_RESET", true, 0),
            Err(e) => {
                tracing::warn!("error reset failed: {}", e);
                DiagnosticCheck::new("ERROR_RESET", false, 0)
            }
        }
    }
}
