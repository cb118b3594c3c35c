//! Legacy SBI calls into the firmware below us.

use core::arch::asm;
use numeric_enum_macro::numeric_enum;

numeric_enum! {
    #[repr(usize)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum LegacyCall {
        ConsolePutchar = 1,
        Shutdown = 8,
    }
}

#[inline(always)]
fn sbi_call(which: LegacyCall, arg0: usize, arg1: usize, arg2: usize) -> usize {
    let ret;
    unsafe {
        asm!(
            "ecall",
            inlateout("x10") arg0 => ret,
            in("x11") arg1,
            in("x12") arg2,
            in("x17") usize::from(which),
        );
    }
    ret
}

pub fn console_putchar(c: usize) {
    sbi_call(LegacyCall::ConsolePutchar, c, 0, 0);
}

pub fn shutdown() -> ! {
    sbi_call(LegacyCall::Shutdown, 0, 0, 0);
    panic!("it should have shut down");
}
