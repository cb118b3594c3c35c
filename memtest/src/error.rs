use {
    crate::memory::PhysAddr,
    crate::pattern::PatternTest,
    core::fmt,
};

/// Rejected test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A region of zero bytes.
    EmptyRegion { base: PhysAddr },
    /// `base + size` does not fit in the address space.
    RegionOverflow { base: PhysAddr, size: usize },
    /// The address stride must be at least one byte.
    ZeroStride,
    /// More regions than bits in the result mask.
    TooManyRegions { count: usize, max: usize },
    /// No pattern test to run.
    NoPatternTests,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::EmptyRegion { base } => {
                write!(f, "memory region at {:#x} is empty", base)
            }
            ConfigError::RegionOverflow { base, size } => write!(
                f,
                "memory region at {:#x} of {:#x} bytes wraps the address space",
                base, size
            ),
            ConfigError::ZeroStride => write!(f, "address stride must be non-zero"),
            ConfigError::TooManyRegions { count, max } => {
                write!(f, "{} memory regions configured, at most {}", count, max)
            }
            ConfigError::NoPatternTests => write!(f, "no pattern test configured"),
        }
    }
}

/// A cell that did not read back what was just written to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub address: PhysAddr,
    pub variant: PatternTest,
    pub expected: u8,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mismatch at {:#x}: wrote {:#04x}",
            self.variant.name(),
            self.address,
            self.expected
        )
    }
}
