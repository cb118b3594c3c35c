//! Host build: the configured plan over simulated memory, so the
//! diagnostic and its report can be tried without the target hardware.

use {
    crate::{console::Stdout, VERSION},
    memtest::{
        config, executive,
        memory::{SimulatedMemory, Window},
        TextReporter,
    },
};

pub fn main() -> i32 {
    crate::logging::init(config::LOG_LEVEL);
    #[cfg(feature = "self-test")]
    crate::self_test::test_all();

    let mut plan = match config::test_plan() {
        Ok(plan) => plan,
        Err(err) => {
            error!("invalid memory test configuration: {}", err);
            return -1;
        }
    };
    let mut backing: Vec<Vec<u8>> = plan.regions().iter().map(|r| vec![0; r.size()]).collect();
    let mut windows: Vec<Window> = plan
        .regions()
        .iter()
        .zip(backing.iter_mut())
        .map(|(region, cells)| Window::new(region.base(), cells))
        .collect();
    let mut bus = SimulatedMemory::new(&mut windows, &[]);
    let mut reporter = TextReporter::new(Stdout).with_banner(VERSION);
    exit_code(executive::run(&mut plan, &mut bus, &mut reporter))
}

/// The OS keeps only the low byte of an exit status, so a mask whose
/// failures all sit in regions 8 and up still has to exit non-zero.
fn exit_code(mask: u32) -> i32 {
    match mask & 0xff {
        0 if mask != 0 => 0xff,
        low => low as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::exit_code;

    #[test]
    fn exit_code_keeps_low_regions_and_flags_high_ones() {
        assert_eq!(exit_code(0), 0);
        assert_eq!(exit_code(0b101), 0b101);
        assert_eq!(exit_code(1 << 8), 0xff);
        assert_eq!(exit_code(1 << 31), 0xff);
        assert_eq!(exit_code((1 << 12) | 0x40), 0x40);
    }
}
