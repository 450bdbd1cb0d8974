//! COM1 console shared by all cores
//!
//! The port is opened lazily by whichever core prints first. Cores take a
//! spin lock per line; there is nothing to sleep on during bring-up.

use core::fmt::{self, Write};

use spin::Mutex;
use uart_16550::SerialPort;

const COM1: u16 = 0x3F8;

/// Attempts before a fatal line breaks the lock of a core that died holding it
const FATAL_LOCK_ATTEMPTS: usize = 1 << 20;

static CONSOLE: Mutex<Option<SerialPort>> = Mutex::new(None);

fn write_line(slot: &mut Option<SerialPort>, args: fmt::Arguments<'_>) {
    let port = slot.get_or_insert_with(|| {
        // SAFETY: COM1 is reserved for this console.
        let mut port = unsafe { SerialPort::new(COM1) };
        port.init();
        port
    });
    port.write_fmt(args).ok();
}

pub fn init() {
    // Open the port now rather than on the first line
    write_line(&mut CONSOLE.lock(), format_args!(""));
}

pub(crate) fn _print(args: fmt::Arguments<'_>) {
    write_line(&mut CONSOLE.lock(), args);
}

/// Print a line that must get out even if another core halted mid-line.
pub(crate) fn _print_fatal(args: fmt::Arguments<'_>) {
    for _ in 0..FATAL_LOCK_ATTEMPTS {
        if let Some(mut console) = CONSOLE.try_lock() {
            write_line(&mut console, args);
            return;
        }
        core::hint::spin_loop();
    }

    // SAFETY: the holder has not released the lock in a million attempts;
    // treat it as dead. A torn line beats a silent fatal.
    unsafe { CONSOLE.force_unlock() };
    write_line(&mut CONSOLE.lock(), args);
}
