//! What the hart does once the memory test is over.

/// Park the hart with the status slots in `t0`..`t4` and the result mask in
/// `a0`, where a simulator or debugger can pick them up without a console.
///
/// Loading the temporaries and parking happen in one block, so no compiled
/// code runs between them.
#[cfg(not(feature = "console"))]
pub fn park_with_status(slots: &memtest::StatusSlots, status: u32) -> ! {
    unsafe {
        core::arch::asm!(
            "1: wfi",
            "j 1b",
            in("t0") slots.primary,
            in("t1") slots.secondary[0],
            in("t2") slots.secondary[1],
            in("t3") slots.secondary[2],
            in("t4") slots.secondary[3],
            in("a0") status as usize,
            options(noreturn, nomem, nostack),
        );
    }
}

#[cfg(feature = "console")]
pub fn halt(status: u32) -> ! {
    info!("memory test finished with status {:#x}", status);
    crate::sbi::shutdown()
}

/// Spin in low-power wait forever.
pub fn idle() -> ! {
    loop {
        unsafe { riscv::asm::wfi() }
    }
}
