//! main.rs of memtest
#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(any(feature = "console", not(target_os = "none")))]
#[macro_use]
mod console;
#[cfg(any(feature = "console", not(target_os = "none")))]
mod logging;
#[cfg(all(target_os = "none", feature = "console"))]
mod sbi;
#[cfg(target_os = "none")]
mod arch;
#[cfg(target_os = "none")]
mod lang_items;
#[cfg(not(target_os = "none"))]
mod host;

#[macro_use]
extern crate log;

/// Banner for the text report.
#[cfg(any(feature = "console", not(target_os = "none")))]
const VERSION: &str = git_version::git_version!(prefix = "memtest ", fallback = "memtest unknown");

//entry
#[cfg(target_os = "none")]
core::arch::global_asm!(include_str!("asm/entry.asm"));

// the first function to be called after _start
#[cfg(target_os = "none")]
#[no_mangle]
pub extern "C" fn rust_main() -> ! {
    clear_bss();
    #[cfg(feature = "console")]
    logging::init(memtest::config::LOG_LEVEL);
    #[cfg(feature = "self-test")]
    self_test::test_all();
    run_configured()
}

#[cfg(target_os = "none")]
fn clear_bss() {
    extern "C" {
        fn sbss();
        fn ebss();
    }
    (sbss as usize..ebss as usize).for_each(|a| unsafe { (a as *mut u8).write_volatile(0) });
}

#[cfg(target_os = "none")]
fn run_configured() -> ! {
    use memtest::{config, RawMemory};

    let mut plan = match config::test_plan() {
        Ok(plan) => plan,
        Err(err) => panic!("invalid memory test configuration: {}", err),
    };
    // the configured regions lie outside this image and its stack
    let mut bus = unsafe { RawMemory::new() };
    report_and_halt(&mut plan, &mut bus)
}

#[cfg(all(target_os = "none", feature = "console"))]
fn report_and_halt(plan: &mut memtest::TestPlan<'_>, bus: &mut memtest::RawMemory) -> ! {
    let mut reporter = memtest::TextReporter::new(console::Stdout).with_banner(VERSION);
    let status = memtest::executive::run(plan, bus, &mut reporter);
    arch::halt(status)
}

#[cfg(all(target_os = "none", not(feature = "console")))]
fn report_and_halt(plan: &mut memtest::TestPlan<'_>, bus: &mut memtest::RawMemory) -> ! {
    let mut reporter = memtest::RegisterReporter::new(None);
    let status = memtest::executive::run(plan, bus, &mut reporter);
    let slots = reporter
        .into_inner()
        .unwrap_or_else(|| memtest::StatusSlots::from_plan(plan));
    arch::park_with_status(&slots, status)
}

#[cfg(not(target_os = "none"))]
fn main() {
    std::process::exit(host::main());
}
