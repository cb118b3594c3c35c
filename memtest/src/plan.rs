//! What to test, and what the test found.

use {
    crate::error::ConfigError,
    crate::memory::PhysAddr,
    crate::pattern::PatternTest,
    core::num::NonZeroUsize,
};

/// One bit of the overall result per region.
pub const MAX_REGIONS: usize = u32::BITS as usize;

/// A contiguous range of memory, tested independently of the others.
///
/// Regions are not checked for overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    base: PhysAddr,
    size: usize,
}

impl MemoryRegion {
    pub fn new(base: PhysAddr, size: usize) -> Result<Self, ConfigError> {
        let region = MemoryRegion { base, size };
        region.validate()?;
        Ok(region)
    }

    /// For static tables; [`TestPlan::new`] validates the region later.
    pub const fn new_unchecked(base: PhysAddr, size: usize) -> Self {
        MemoryRegion { base, size }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::EmptyRegion { base: self.base });
        }
        if self.base.checked_add(self.size).is_none() {
            return Err(ConfigError::RegionOverflow {
                base: self.base,
                size: self.size,
            });
        }
        Ok(())
    }

    pub const fn base(&self) -> PhysAddr {
        self.base
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// One past the last byte of the region.
    pub fn end(&self) -> PhysAddr {
        self.base.saturating_add(self.size)
    }

    pub fn contains(&self, addr: PhysAddr) -> bool {
        self.base <= addr && addr < self.end()
    }

    /// The addresses a sweep visits, in scan order.
    pub fn addresses(&self, stride: Stride) -> Addresses {
        Addresses {
            next: self.base,
            end: self.end(),
            step: stride.get(),
        }
    }
}

/// Stride-stepped iterator over a region; never yields `end` or beyond.
#[derive(Debug, Clone)]
pub struct Addresses {
    next: PhysAddr,
    end: PhysAddr,
    step: usize,
}

impl Iterator for Addresses {
    type Item = PhysAddr;

    fn next(&mut self) -> Option<PhysAddr> {
        if self.next >= self.end {
            return None;
        }
        let addr = self.next;
        self.next = addr.checked_add(self.step).unwrap_or(self.end);
        Some(addr)
    }
}

/// Address increment between tested bytes (1 = every byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride(NonZeroUsize);

impl Stride {
    pub const fn new(bytes: usize) -> Result<Self, ConfigError> {
        match NonZeroUsize::new(bytes) {
            Some(bytes) => Ok(Stride(bytes)),
            None => Err(ConfigError::ZeroStride),
        }
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

/// What happens to a region's remaining pattern tests once it has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantPolicy {
    /// Every pattern test still sweeps the region; only the first failing
    /// address is kept.
    ContinueVariants,
    /// Move straight on to the next region.
    SkipAfterRegionFailure,
}

impl Default for VariantPolicy {
    fn default() -> Self {
        VariantPolicy::ContinueVariants
    }
}

/// The regions and pattern tests to run, plus the run-state the executive
/// fills in.
///
/// Run-state only ever moves from pass to fail. Bit `i` of
/// [`overall_result`](Self::overall_result) is set iff region `i` failed.
#[derive(Debug, Clone)]
pub struct TestPlan<'a> {
    regions: &'a [MemoryRegion],
    variants: &'a [PatternTest],
    stride: Stride,
    policy: VariantPolicy,
    failed: [bool; MAX_REGIONS],
    first_failing: [Option<PhysAddr>; MAX_REGIONS],
    result: u32,
}

impl<'a> TestPlan<'a> {
    pub fn new(
        regions: &'a [MemoryRegion],
        variants: &'a [PatternTest],
        stride: Stride,
    ) -> Result<Self, ConfigError> {
        if regions.len() > MAX_REGIONS {
            return Err(ConfigError::TooManyRegions {
                count: regions.len(),
                max: MAX_REGIONS,
            });
        }
        if variants.is_empty() {
            return Err(ConfigError::NoPatternTests);
        }
        for region in regions {
            region.validate()?;
        }
        Ok(TestPlan {
            regions,
            variants,
            stride,
            policy: VariantPolicy::default(),
            failed: [false; MAX_REGIONS],
            first_failing: [None; MAX_REGIONS],
            result: 0,
        })
    }

    pub fn with_policy(mut self, policy: VariantPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn regions(&self) -> &'a [MemoryRegion] {
        self.regions
    }

    pub fn variants(&self) -> &'a [PatternTest] {
        self.variants
    }

    pub fn stride(&self) -> Stride {
        self.stride
    }

    pub fn policy(&self) -> VariantPolicy {
        self.policy
    }

    /// Bit `i` set iff region `i` failed; 0 when everything passed.
    pub fn overall_result(&self) -> u32 {
        self.result
    }

    pub fn passed(&self) -> bool {
        self.result == 0
    }

    pub fn region_failed(&self, index: usize) -> bool {
        self.failed.get(index).copied().unwrap_or(false)
    }

    /// First address in scan order at which region `index` failed.
    pub fn first_failing_address(&self, index: usize) -> Option<PhysAddr> {
        self.first_failing.get(index).copied().flatten()
    }

    /// `(region index, first failing address)` of every failed region.
    pub fn failing_regions(&self) -> impl Iterator<Item = (usize, PhysAddr)> + '_ {
        (0..self.regions.len()).filter_map(move |i| self.first_failing_address(i).map(|a| (i, a)))
    }

    /// The only place run-state changes.
    pub(crate) fn record_failure(&mut self, index: usize, address: PhysAddr) {
        debug_assert!(index < self.regions.len());
        if self.first_failing[index].is_none() {
            self.first_failing[index] = Some(address);
        }
        self.failed[index] = true;
        self.result |= 1 << index;
    }
}
