//! Making the result observable once the executive is done.
//!
//! Reporters only read the plan; nothing they do changes the result.

use {
    crate::config::{MAX_REPORTED_REGIONS, PASS_VALUE},
    crate::plan::TestPlan,
    core::fmt::{self, Write},
};

/// Sink for the final state of a [`TestPlan`].
pub trait ResultReporter {
    fn report(&mut self, plan: &TestPlan<'_>);
}

/// Human-readable summary written to any [`core::fmt::Write`].
pub struct TextReporter<W> {
    out: W,
    banner: Option<&'static str>,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        TextReporter { out, banner: None }
    }

    /// Line printed ahead of the results, e.g. the build version.
    pub fn with_banner(mut self, banner: &'static str) -> Self {
        self.banner = Some(banner);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_summary(&mut self, plan: &TestPlan<'_>) -> fmt::Result {
        if let Some(banner) = self.banner {
            writeln!(self.out, "{}", banner)?;
        }
        writeln!(self.out, "Test results:")?;
        if plan.passed() {
            return writeln!(self.out, "\tTest passed - memory checked ok");
        }
        writeln!(self.out, "\tOverall bit encoded result = {:#x}", plan.overall_result())?;
        writeln!(self.out, "\tFailing addresses:")?;
        for index in 0..plan.regions().len().min(MAX_REPORTED_REGIONS) {
            writeln!(
                self.out,
                "\t\tblock = {}  address = 0x{:012x}",
                index,
                plan.first_failing_address(index).unwrap_or(0)
            )?;
        }
        Ok(())
    }
}

impl<W: Write> ResultReporter for TextReporter<W> {
    fn report(&mut self, plan: &TestPlan<'_>) {
        if self.write_summary(plan).is_err() {
            warn!("text report truncated");
        }
    }
}

/// Values for a status-register style report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSlots {
    /// The overall result, or [`PASS_VALUE`] when every region passed.
    pub primary: usize,
    /// First failing address of regions `0..MAX_REPORTED_REGIONS`, 0 for a
    /// region that passed or does not exist.
    pub secondary: [usize; MAX_REPORTED_REGIONS],
}

impl StatusSlots {
    pub fn from_plan(plan: &TestPlan<'_>) -> Self {
        let primary = match plan.overall_result() {
            0 => PASS_VALUE,
            result => result as usize,
        };
        let mut secondary = [0; MAX_REPORTED_REGIONS];
        for (index, slot) in secondary.iter_mut().enumerate() {
            *slot = plan.first_failing_address(index).unwrap_or(0);
        }
        StatusSlots { primary, secondary }
    }
}

/// Somewhere to put [`StatusSlots`], such as a set of CPU registers.
pub trait SlotDeposit {
    fn deposit(&mut self, slots: &StatusSlots);
}

/// Holds the slots until the caller moves them somewhere that must not be
/// disturbed afterwards, such as registers loaded right before the hart parks.
impl SlotDeposit for Option<StatusSlots> {
    fn deposit(&mut self, slots: &StatusSlots) {
        *self = Some(*slots);
    }
}

/// Deposits the result into status slots for inspection from outside.
pub struct RegisterReporter<D> {
    slots: D,
}

impl<D: SlotDeposit> RegisterReporter<D> {
    pub fn new(slots: D) -> Self {
        RegisterReporter { slots }
    }

    pub fn into_inner(self) -> D {
        self.slots
    }
}

impl<D: SlotDeposit> ResultReporter for RegisterReporter<D> {
    fn report(&mut self, plan: &TestPlan<'_>) {
        let slots = StatusSlots::from_plan(plan);
        debug!("status slots {:x?}", slots);
        self.slots.deposit(&slots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternTest;
    use crate::plan::{MemoryRegion, Stride};
    use std::string::String;

    const REGIONS: [MemoryRegion; 5] = [
        MemoryRegion::new_unchecked(0x2000_8000, 0x8000),
        MemoryRegion::new_unchecked(0x3000_0000, 0x8000),
        MemoryRegion::new_unchecked(0x8700_1000, 0x2000),
        MemoryRegion::new_unchecked(0x8718_0000, 0x1000),
        MemoryRegion::new_unchecked(0x8800_0000, 0x1000),
    ];

    fn plan() -> TestPlan<'static> {
        TestPlan::new(&REGIONS, &PatternTest::ALL, Stride::new(0x100).unwrap()).unwrap()
    }

    #[test]
    fn text_pass() {
        let mut reporter = TextReporter::new(String::new()).with_banner("memtest test");
        reporter.report(&plan());
        assert_eq!(
            reporter.into_inner(),
            "memtest test\nTest results:\n\tTest passed - memory checked ok\n"
        );
    }

    #[test]
    fn text_failure_lists_first_four_regions() {
        let mut plan = plan();
        plan.record_failure(1, 0x3000_0200);
        plan.record_failure(4, 0x8800_0000);
        let mut reporter = TextReporter::new(String::new());
        reporter.report(&plan);
        assert_eq!(
            reporter.into_inner(),
            "Test results:\n\
             \tOverall bit encoded result = 0x12\n\
             \tFailing addresses:\n\
             \t\tblock = 0  address = 0x000000000000\n\
             \t\tblock = 1  address = 0x000030000200\n\
             \t\tblock = 2  address = 0x000000000000\n\
             \t\tblock = 3  address = 0x000000000000\n"
        );
    }

    #[test]
    fn slots_pass_sentinel() {
        let mut reporter = RegisterReporter::new(None);
        reporter.report(&plan());
        assert_eq!(
            reporter.into_inner(),
            Some(StatusSlots {
                primary: PASS_VALUE,
                secondary: [0; 4],
            })
        );
    }

    #[test]
    fn slots_carry_mask_and_addresses_in_region_order() {
        let mut plan = plan();
        plan.record_failure(0, 0x2000_8100);
        plan.record_failure(3, 0x8718_0f00);
        plan.record_failure(4, 0x8800_0000);
        let slots = StatusSlots::from_plan(&plan);
        assert_eq!(slots.primary, 0b11001);
        assert_eq!(slots.secondary, [0x2000_8100, 0, 0, 0x8718_0f00]);
    }

    #[test]
    fn held_slots_outlive_the_reporter() {
        let mut plan = plan();
        plan.record_failure(2, 0x8700_1300);
        let mut reporter = RegisterReporter::new(None);
        reporter.report(&plan);
        let held: Option<StatusSlots> = reporter.into_inner();
        assert_eq!(held, Some(StatusSlots::from_plan(&plan)));
        assert_eq!(
            held,
            Some(StatusSlots {
                primary: 0b100,
                secondary: [0, 0, 0x8700_1300, 0],
            })
        );
    }

    #[test]
    fn fewer_regions_than_slots() {
        let regions = [MemoryRegion::new_unchecked(0x1000, 0x10)];
        let mut plan =
            TestPlan::new(&regions, &PatternTest::ALL, Stride::new(1).unwrap()).unwrap();
        plan.record_failure(0, 0x100c);
        let slots = StatusSlots::from_plan(&plan);
        assert_eq!(slots.primary, 1);
        assert_eq!(slots.secondary, [0x100c, 0, 0, 0]);
    }
}
