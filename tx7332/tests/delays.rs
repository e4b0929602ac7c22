use tx7332::driver::firmware::params::{
    ADDR_CLK_SYNC, ADDR_DELAY_START_WORD, ADDR_MEM_BASE, CLK_SYNC_ENABLED, NUM_CHANNELS,
    NUM_CHANNEL_PAIRS, NUM_START_WORD_REGS, PAGE_DELAY, PAGE_GLOBAL,
};
use tx7332::prelude::*;
use tx7332_emulator::{Tx7332Emulator, WriteRecord};

#[test]
fn apply_delays_writes_the_documented_sequence() -> anyhow::Result<()> {
    let mut controller = Controller::open(Tx7332Emulator::new())?;

    controller.apply_delays(&[ChannelDelay::ZERO; NUM_CHANNELS])?;

    let dev = controller.link().transport();

    assert_eq!(vec![false, true], dev.sync_events());

    let writes = dev.register_writes();
    assert_eq!(25, writes.len());

    // Start word 0 broadcast to all 8 channel-pair group registers.
    for i in 0..NUM_START_WORD_REGS {
        assert_eq!(
            WriteRecord {
                addr: ADDR_DELAY_START_WORD + i,
                value: 0,
                page: PAGE_GLOBAL,
            },
            writes[usize::from(i)]
        );
    }

    // 16 packed pair words into the delay table window.
    for i in 0..NUM_CHANNEL_PAIRS {
        assert_eq!(
            WriteRecord {
                addr: ADDR_MEM_BASE + i as u8,
                value: 0,
                page: PAGE_DELAY,
            },
            writes[usize::from(NUM_START_WORD_REGS) + i]
        );
    }

    // Clock-sync detection is re-enabled after the table is in place.
    assert_eq!(
        WriteRecord {
            addr: ADDR_CLK_SYNC,
            value: CLK_SYNC_ENABLED,
            page: PAGE_GLOBAL,
        },
        writes[24]
    );
    assert_eq!(CLK_SYNC_ENABLED, dev.register(ADDR_CLK_SYNC));
    assert_eq!(PAGE_GLOBAL, dev.page_select());
    Ok(())
}

#[test]
fn delays_pack_even_channel_low_odd_channel_high() -> anyhow::Result<()> {
    let mut controller = Controller::open(Tx7332Emulator::new())?;

    let delays = (0..NUM_CHANNELS as u16)
        .map(|cycles| ChannelDelay::new(cycles, false))
        .collect::<Vec<_>>();
    controller.apply_delays(&delays)?;

    let mem = controller.link().transport().delay_memory();
    for pair in 0..NUM_CHANNEL_PAIRS as u32 {
        assert_eq!(((2 * pair + 1) << 16) | (2 * pair), mem[pair as usize]);
    }
    Ok(())
}

#[test]
fn apply_delays_rejects_wrong_channel_count() {
    let mut controller = Controller::open(Tx7332Emulator::new()).unwrap();

    let result = controller.apply_delays(&[ChannelDelay::ZERO; 31]);

    assert!(matches!(
        result,
        Err(Tx7332DriverError::InvalidDelayCount(31))
    ));
    assert!(controller.link().transport().journal().is_empty());
}

#[test]
fn steering_at_zero_angle_applies_an_all_zero_table() -> anyhow::Result<()> {
    let mut controller = Controller::open(Tx7332Emulator::new())?;

    let applied = controller.steer(&BeamSteering::default())?;

    assert!(applied.iter().all(|d| d.encode() == 0));
    assert!(controller
        .link()
        .transport()
        .delay_memory()
        .iter()
        .all(|&w| w == 0));
    Ok(())
}

#[test]
fn steering_normalizes_the_earliest_channel_to_zero() -> anyhow::Result<()> {
    let mut controller = Controller::open(Tx7332Emulator::new())?;

    let applied = controller.steer(&BeamSteering {
        angle_deg: 30.,
        ..Default::default()
    })?;

    assert_eq!(0, applied.iter().map(|d| d.cycles()).min().unwrap());
    assert!(applied.iter().any(|d| d.cycles() > 0));
    Ok(())
}

struct RampSolver;

impl FocusSolver for RampSolver {
    fn compute_focus_delays(&self, _request: &FocusRequest) -> Vec<i64> {
        (0..NUM_CHANNELS as i64).collect()
    }
}

#[test]
fn focus_applies_the_solver_output() -> anyhow::Result<()> {
    let mut controller = Controller::open(Tx7332Emulator::new())?;

    let applied = controller.focus(&RampSolver, &FocusRequest::default())?;

    assert_eq!(5, applied[5].cycles());
    assert_eq!(
        0x0001_0000,
        controller.link().transport().delay_memory()[0]
    );
    Ok(())
}

#[test]
fn transport_failure_mid_delay_table_propagates_and_restores_sync() {
    let mut dev = Tx7332Emulator::new();
    dev.fail_after(10);
    let mut controller = Controller::open(dev).unwrap();

    let result = controller.apply_delays(&[ChannelDelay::ZERO; NUM_CHANNELS]);

    assert!(matches!(result, Err(Tx7332DriverError::Transport(_))));
    // Sync is restored even when the sequence aborts midway.
    assert_eq!(vec![false, true], controller.link().transport().sync_events());
}
