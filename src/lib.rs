#![no_std]

#[cfg(not(target_arch = "x86_64"))]
compile_error!("Unsupported arch");

pub mod arch;
pub mod logger;
pub mod serial;
pub mod smp;

use core::panic::PanicInfo;

/// Bring up logging on the boot CPU and apply a `log=` directive if the
/// command line carries one. Call before the first `cpu_start`.
pub fn init(cmdline: Option<&str>, tsc_frequency_hz: Option<u64>) {
    logger::init(tsc_frequency_hz);

    if let Some(level) = cmdline.and_then(logger::parse_level_directive) {
        logger::set_max_level(level);
    }

    crate::kinfo!(
        "SMP: bring-up support for {} cores, {} KiB boot stacks, log level {}",
        smp::MAX_CPUS,
        smp::BOOT_STACK_SIZE / 1024,
        logger::max_level().as_str()
    );
}

/// Panic hook for the kernel binary's `#[panic_handler]`. Bring-up fatals
/// end up here with the violation as the message.
pub fn panic(info: &PanicInfo) -> ! {
    match info.location() {
        Some(loc) => crate::klog!(
            logger::LogLevel::PANIC,
            "Kernel panic - not syncing: {} ({}:{})",
            info.message(),
            loc.file(),
            loc.line()
        ),
        None => crate::klog!(
            logger::LogLevel::PANIC,
            "Kernel panic - not syncing: {}",
            info.message()
        ),
    }
    arch::halt_loop()
}

#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        $crate::logger::log($level, format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! kfatal {
    ($($arg:tt)*) => {{
        $crate::klog!($crate::logger::LogLevel::FATAL, $($arg)*);
    }};
}

#[macro_export]
macro_rules! kerror {
    ($($arg:tt)*) => {{
        $crate::klog!($crate::logger::LogLevel::ERROR, $($arg)*);
    }};
}

#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)*) => {{
        $crate::klog!($crate::logger::LogLevel::WARN, $($arg)*);
    }};
}

#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)*) => {{
        $crate::klog!($crate::logger::LogLevel::INFO, $($arg)*);
    }};
}

#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)*) => {{
        $crate::klog!($crate::logger::LogLevel::DEBUG, $($arg)*);
    }};
}

#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)*) => {{
        $crate::klog!($crate::logger::LogLevel::TRACE, $($arg)*);
    }};
}
