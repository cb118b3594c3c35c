//! Byte-granular walking-ones / walking-zeros memory diagnostic.
//!
//! The engine needs neither a heap nor an operating system: a [`TestPlan`]
//! names the regions and pattern tests, [`executive::run`] sweeps them
//! through a [`MemoryBus`] and hands the outcome to a [`ResultReporter`].
#![no_std]

#[cfg(test)]
extern crate std;

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod executive;
pub mod memory;
pub mod pattern;
pub mod plan;
pub mod report;

pub use {
    error::{ConfigError, Mismatch},
    memory::{MemoryBus, PhysAddr, RawMemory},
    pattern::{PatternTest, TestOutcome},
    plan::{MemoryRegion, Stride, TestPlan, VariantPolicy},
    report::{RegisterReporter, ResultReporter, SlotDeposit, StatusSlots, TextReporter},
};
