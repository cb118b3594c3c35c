//! Byte-level bit-pattern tests.
//!
//! Both tests are destructive: the cell under test is left holding the
//! last pattern written to it.

use {
    crate::memory::{MemoryBus, PhysAddr},
    numeric_enum_macro::numeric_enum,
};

numeric_enum! {
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PatternTest {
        /// `0x01, 0x02, 0x04, ... 0x80`: one bit set, walking up.
        WalkingOnes = 0,
        /// `0xfe, 0xfd, 0xfb, ... 0x7f`: one bit clear, walking up.
        WalkingZeros = 1,
    }
}

/// Result of testing a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Pass,
    /// Carries the first pattern that did not read back.
    Fail(u8),
}

impl PatternTest {
    pub const ALL: [PatternTest; 2] = [PatternTest::WalkingOnes, PatternTest::WalkingZeros];

    pub fn name(self) -> &'static str {
        match self {
            PatternTest::WalkingOnes => "walking ones",
            PatternTest::WalkingZeros => "walking zeros",
        }
    }

    /// The eight patterns written, in order.
    pub fn patterns(self) -> impl Iterator<Item = u8> {
        (0..8).map(move |bit| {
            let one = 1u8 << bit;
            match self {
                PatternTest::WalkingOnes => one,
                PatternTest::WalkingZeros => !one,
            }
        })
    }

    /// Write each pattern to `location` and read it straight back.
    ///
    /// Stops at the first mismatch; a single bad read-back is final.
    pub fn run<B: MemoryBus + ?Sized>(self, bus: &mut B, location: PhysAddr) -> TestOutcome {
        for pattern in self.patterns() {
            bus.write_byte(location, pattern);
            if bus.read_byte(location) != pattern {
                return TestOutcome::Fail(pattern);
            }
        }
        TestOutcome::Pass
    }
}
