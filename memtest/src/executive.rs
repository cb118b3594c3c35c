//! The memory test executive.

use {
    crate::error::Mismatch,
    crate::memory::MemoryBus,
    crate::pattern::{PatternTest, TestOutcome},
    crate::plan::{MemoryRegion, TestPlan, VariantPolicy},
    crate::report::ResultReporter,
};

/// Run every pattern test over every region, hand the result to `reporter`
/// and return the overall result mask.
///
/// Regions are visited in order and, within a region, pattern tests in
/// order. A sweep of one pattern test over one region stops at its first
/// failing address; a failure never stops the other sweeps.
pub fn run<B, R>(plan: &mut TestPlan<'_>, bus: &mut B, reporter: &mut R) -> u32
where
    B: MemoryBus + ?Sized,
    R: ResultReporter + ?Sized,
{
    sweep_all(plan, bus);
    reporter.report(plan);
    plan.overall_result()
}

/// Fill in the run-state of `plan` without reporting it.
pub fn sweep_all<B: MemoryBus + ?Sized>(plan: &mut TestPlan<'_>, bus: &mut B) {
    let regions = plan.regions();
    let variants = plan.variants();
    for (index, region) in regions.iter().enumerate() {
        for &variant in variants {
            if plan.policy() == VariantPolicy::SkipAfterRegionFailure && plan.region_failed(index) {
                trace!("region {} already failed, skipping {}", index, variant.name());
                break;
            }
            sweep(plan, bus, index, region, variant);
        }
    }
    for (index, address) in plan.failing_regions() {
        warn!("region {} first failed at {:#x}", index, address);
    }
    info!("memory test done, result {:#x}", plan.overall_result());
}

fn sweep<B: MemoryBus + ?Sized>(
    plan: &mut TestPlan<'_>,
    bus: &mut B,
    index: usize,
    region: &MemoryRegion,
    variant: PatternTest,
) {
    trace!(
        "region {} [{:#x}, {:#x}) {} stride {:#x}",
        index,
        region.base(),
        region.end(),
        variant.name(),
        plan.stride().get()
    );
    for address in region.addresses(plan.stride()) {
        debug_assert!(region.contains(address));
        if let TestOutcome::Fail(expected) = variant.run(bus, address) {
            debug!(
                "region {}: {}",
                index,
                Mismatch {
                    address,
                    variant,
                    expected
                }
            );
            plan.record_failure(index, address);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Fault, SimulatedMemory, Window};
    use crate::plan::Stride;

    #[derive(Default)]
    struct Seen {
        calls: usize,
        result: u32,
    }

    impl ResultReporter for Seen {
        fn report(&mut self, plan: &TestPlan<'_>) {
            self.calls += 1;
            self.result = plan.overall_result();
        }
    }

    #[test]
    fn reporter_sees_final_state_once() {
        let regions = [MemoryRegion::new_unchecked(0x1000, 0x10)];
        let faults = [Fault::StuckAt { addr: 0x1004, value: 0 }];
        let mut cells = [0u8; 0x10];
        let mut windows = [Window::new(0x1000, &mut cells)];
        let mut mem = SimulatedMemory::new(&mut windows, &faults);
        let mut plan =
            TestPlan::new(&regions, &PatternTest::ALL, Stride::new(4).unwrap()).unwrap();
        let mut seen = Seen::default();

        let result = run(&mut plan, &mut mem, &mut seen);

        assert_eq!(result, 1);
        assert_eq!(seen.calls, 1);
        assert_eq!(seen.result, 1);
        assert_eq!(plan.first_failing_address(0), Some(0x1004));
    }

    #[test]
    fn sweep_stops_at_first_failure() {
        let regions = [MemoryRegion::new_unchecked(0x1000, 0x10)];
        let faults = [
            Fault::Inverted { addr: 0x1002 },
            Fault::Inverted { addr: 0x1003 },
        ];
        let mut cells = [0u8; 0x10];
        let mut windows = [Window::new(0x1000, &mut cells)];
        let mut mem = SimulatedMemory::new(&mut windows, &faults);
        let mut plan = TestPlan::new(
            &regions,
            &[PatternTest::WalkingOnes],
            Stride::new(1).unwrap(),
        )
        .unwrap();

        sweep_all(&mut plan, &mut mem);

        // 0x1000 and 0x1001 pass with 8 writes each, 0x1002 fails on its first
        assert_eq!(mem.writes(), 8 + 8 + 1);
        assert_eq!(plan.first_failing_address(0), Some(0x1002));
        // 0x1003 was never touched
        assert_eq!(mem.windows()[0].cells()[3], 0);
    }

    #[test]
    fn later_variants_still_sweep_a_failed_region() {
        let regions = [MemoryRegion::new_unchecked(0x1000, 0x10)];
        // bit 7 tied high: walking ones fails at 0x01, walking zeros at 0x7f
        let faults = [Fault::StuckBit { addr: 0x1008, bit: 7, level: true }];
        let mut cells = [0u8; 0x10];
        let mut windows = [Window::new(0x1000, &mut cells)];
        let mut mem = SimulatedMemory::new(&mut windows, &faults);
        let mut plan =
            TestPlan::new(&regions, &PatternTest::ALL, Stride::new(8).unwrap()).unwrap();

        sweep_all(&mut plan, &mut mem);

        // ones: 0x1000 passes (8), 0x1008 fails (1)
        // zeros: 0x1000 passes (8), 0x1008 fails on its last pattern (8)
        assert_eq!(mem.writes(), 8 + 1 + 8 + 8);
        assert_eq!(mem.windows()[0].cells()[8], 0x7f);
        assert_eq!(plan.overall_result(), 1);
        assert_eq!(plan.first_failing_address(0), Some(0x1008));
    }

    #[test]
    fn skip_policy_leaves_failed_region_after_first_variant() {
        let regions = [
            MemoryRegion::new_unchecked(0x1000, 0x10),
            MemoryRegion::new_unchecked(0x2000, 0x10),
        ];
        let faults = [Fault::Inverted { addr: 0x1000 }];
        let mut low = [0u8; 0x10];
        let mut high = [0u8; 0x10];
        let mut windows = [Window::new(0x1000, &mut low), Window::new(0x2000, &mut high)];
        let mut mem = SimulatedMemory::new(&mut windows, &faults);
        let mut plan = TestPlan::new(&regions, &PatternTest::ALL, Stride::new(0x10).unwrap())
            .unwrap()
            .with_policy(VariantPolicy::SkipAfterRegionFailure);

        sweep_all(&mut plan, &mut mem);

        // region 0: walking ones fails at once, walking zeros is skipped
        // region 1: both variants pass at its single address
        assert_eq!(mem.writes(), 1 + 8 + 8);
        assert_eq!(mem.windows()[0].cells()[0], 0x01);
        assert_eq!(plan.overall_result(), 0b01);
    }
}
