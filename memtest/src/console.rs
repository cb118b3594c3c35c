use {
    core::fmt::{self, Write},
    spin::Mutex,
};

/// 一个 [Zero-Sized Type]，实现 [`core::fmt::Write`] trait 来进行格式化输出
///
/// On the bare-metal image every byte goes out through the SBI console; on a
/// host build it goes to standard output.
pub struct Stdout;

impl Write for Stdout {
    #[cfg(target_os = "none")]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.bytes() {
            crate::sbi::console_putchar(c as usize);
        }
        Ok(())
    }

    #[cfg(not(target_os = "none"))]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        use std::io::Write as _;
        std::io::stdout()
            .write_all(s.as_bytes())
            .map_err(|_| fmt::Error)
    }
}

static STDOUT: Mutex<Stdout> = Mutex::new(Stdout);

/// 打印由 [`core::format_args!`] 格式化后的数据
///
/// [`print!`] 和 [`println!`] 宏都将展开成此函数
pub fn print(args: fmt::Arguments) {
    // nowhere left to report a failed console write
    let _ = STDOUT.lock().write_fmt(args);
}

/// Writes without taking the lock, for the panic path where the lock may
/// already be held by the code that panicked.
#[cfg(any(all(target_os = "none", feature = "console"), test))]
pub fn print_unlocked(args: fmt::Arguments) {
    let _ = Stdout.write_fmt(args);
}

/// 实现类似于标准库中的 `print!` 宏
#[cfg(target_os = "none")]
macro_rules! print {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!($fmt $(, $($arg)+)?));
    }
}

/// 实现类似于标准库中的 `println!` 宏
#[cfg(target_os = "none")]
macro_rules! println {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!(concat!($fmt, "\n") $(, $($arg)+)?));
    }
}
