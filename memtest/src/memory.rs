//! Byte access to the memory under test.

pub type PhysAddr = usize;

/// Byte-granular read/write access to the memory under test.
pub trait MemoryBus {
    /// Store `value` at `addr`.
    fn write_byte(&mut self, addr: PhysAddr, value: u8);

    /// Load the byte at `addr`.
    fn read_byte(&mut self, addr: PhysAddr) -> u8;
}

/// Volatile access to physical memory through raw pointers.
///
/// Every access dereferences an integer address without any bounds or
/// aliasing checks. This is the whole point of a memory diagnostic, so the
/// capability is only handed out through the `unsafe` constructor.
pub struct RawMemory {
    _private: (),
}

impl RawMemory {
    /// # Safety
    ///
    /// Every address the bus is used with must be byte-addressable RAM that
    /// neither this image, its stack, nor any device relies on while the
    /// test runs. Its contents are destroyed.
    pub const unsafe fn new() -> Self {
        RawMemory { _private: () }
    }
}

impl MemoryBus for RawMemory {
    #[inline]
    fn write_byte(&mut self, addr: PhysAddr, value: u8) {
        unsafe { (addr as *mut u8).write_volatile(value) }
    }

    #[inline]
    fn read_byte(&mut self, addr: PhysAddr) -> u8 {
        unsafe { (addr as *const u8).read_volatile() }
    }
}

/// A fault injected into [`SimulatedMemory`], applied when a cell is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The whole cell always reads back `value`.
    StuckAt { addr: PhysAddr, value: u8 },
    /// One bit line of the cell is tied to `level`.
    StuckBit { addr: PhysAddr, bit: u8, level: bool },
    /// The cell reads back the complement of what was stored.
    Inverted { addr: PhysAddr },
}

impl Fault {
    pub fn addr(&self) -> PhysAddr {
        match *self {
            Fault::StuckAt { addr, .. } => addr,
            Fault::StuckBit { addr, .. } => addr,
            Fault::Inverted { addr } => addr,
        }
    }

    fn apply(&self, stored: u8) -> u8 {
        match *self {
            Fault::StuckAt { value, .. } => value,
            Fault::StuckBit { bit, level, .. } => {
                let mask = 1u8 << (bit & 7);
                if level {
                    stored | mask
                } else {
                    stored & !mask
                }
            }
            Fault::Inverted { .. } => !stored,
        }
    }
}

/// A range of simulated cells starting at `base`.
pub struct Window<'a> {
    base: PhysAddr,
    cells: &'a mut [u8],
}

impl<'a> Window<'a> {
    pub fn new(base: PhysAddr, cells: &'a mut [u8]) -> Self {
        Window { base, cells }
    }

    pub fn base(&self) -> PhysAddr {
        self.base
    }

    pub fn cells(&self) -> &[u8] {
        &*self.cells
    }

    fn cell(&mut self, addr: PhysAddr) -> Option<&mut u8> {
        let offset = addr.checked_sub(self.base)?;
        self.cells.get_mut(offset)
    }
}

/// Memory backed by caller-owned buffers, for running the diagnostic where
/// the real regions are not reachable (host builds, boot self-test).
///
/// Addresses outside every window behave like an open bus: writes are
/// dropped and reads return `0xff`.
pub struct SimulatedMemory<'w, 'a> {
    windows: &'w mut [Window<'a>],
    faults: &'w [Fault],
    writes: usize,
    reads: usize,
}

impl<'w, 'a> SimulatedMemory<'w, 'a> {
    pub fn new(windows: &'w mut [Window<'a>], faults: &'w [Fault]) -> Self {
        SimulatedMemory {
            windows,
            faults,
            writes: 0,
            reads: 0,
        }
    }

    /// Number of byte writes issued so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of byte reads issued so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn windows(&self) -> &[Window<'a>] {
        &*self.windows
    }

    fn cell(&mut self, addr: PhysAddr) -> Option<&mut u8> {
        self.windows.iter_mut().find_map(|w| w.cell(addr))
    }
}

impl MemoryBus for SimulatedMemory<'_, '_> {
    fn write_byte(&mut self, addr: PhysAddr, value: u8) {
        self.writes += 1;
        if let Some(cell) = self.cell(addr) {
            *cell = value;
        }
    }

    fn read_byte(&mut self, addr: PhysAddr) -> u8 {
        self.reads += 1;
        let faults = self.faults;
        match self.cell(addr) {
            Some(cell) => faults
                .iter()
                .filter(|f| f.addr() == addr)
                .fold(*cell, |value, f| f.apply(value)),
            None => 0xff,
        }
    }
}
