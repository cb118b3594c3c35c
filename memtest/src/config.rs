//! Static test configuration. Set the regions appropriately for your design.

use crate::error::ConfigError;
use crate::pattern::PatternTest;
use crate::plan::{MemoryRegion, Stride, TestPlan, VariantPolicy};

pub const NUM_MEM_BLOCKS: usize = 4;

pub static MEMORY_BLOCKS: [MemoryRegion; NUM_MEM_BLOCKS] = [
    MemoryRegion::new_unchecked(0x2000_8000, 0x8000),
    MemoryRegion::new_unchecked(0x3000_0000, 0x8000),
    MemoryRegion::new_unchecked(0x8700_1000, 0x2000),
    MemoryRegion::new_unchecked(0x8718_0000, 0x1000),
];

/// Run in this order; the first one to fail a region names its address.
pub static PATTERN_TESTS: [PatternTest; 2] = PatternTest::ALL;

/// Test every 256th byte.
pub const TEST_ADDRESS_STRIDE: usize = 0x100;

pub const VARIANT_POLICY: VariantPolicy = VariantPolicy::ContinueVariants;

/// Primary status value when every region passed.
pub const PASS_VALUE: usize = 0x3333_3333;

/// Regions whose first failing address is reported individually; the rest
/// only show up in the result mask.
pub const MAX_REPORTED_REGIONS: usize = 4;

pub const LOG_LEVEL: &str = "info";

pub fn test_plan() -> Result<TestPlan<'static>, ConfigError> {
    let stride = Stride::new(TEST_ADDRESS_STRIDE)?;
    Ok(TestPlan::new(&MEMORY_BLOCKS, &PATTERN_TESTS, stride)?.with_policy(VARIANT_POLICY))
}
