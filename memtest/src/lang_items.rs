use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    #[cfg(feature = "console")]
    crate::console::print_unlocked(format_args!("\u{1B}[1;31m{}\u{1B}[0m\n", info));
    #[cfg(not(feature = "console"))]
    let _ = info;
    crate::arch::idle()
}
