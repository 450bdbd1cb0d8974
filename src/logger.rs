//! Leveled serial logger for bring-up
//!
//! Secondary cores log while they come online, before per-core state exists,
//! so every line is tagged with the initial APIC id of the core that wrote
//! it. Output goes to COM1 only.

use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

use crate::{arch, serial};

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);
static BOOT_TSC: AtomicU64 = AtomicU64::new(0);
static TSC_FREQUENCY_HZ: AtomicU64 = AtomicU64::new(FALLBACK_TSC_HZ);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::INFO as u8);

const FALLBACK_TSC_HZ: u64 = 1_000_000_000;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    PANIC = 0,
    FATAL = 1,
    ERROR = 2,
    WARN = 3,
    INFO = 4,
    DEBUG = 5,
    TRACE = 6,
}

/// `(level, name, ANSI color)` in priority order
const LEVELS: [(LogLevel, &str, &str); 7] = [
    (LogLevel::PANIC, "PANIC", "\x1b[1;37;41m"),
    (LogLevel::FATAL, "FATAL", "\x1b[1;37;41m"),
    (LogLevel::ERROR, "ERROR", "\x1b[1;31m"),
    (LogLevel::WARN, "WARN", "\x1b[33m"),
    (LogLevel::INFO, "INFO", "\x1b[32m"),
    (LogLevel::DEBUG, "DEBUG", "\x1b[36m"),
    (LogLevel::TRACE, "TRACE", "\x1b[90m"),
];

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        LEVELS[self as usize].1
    }

    const fn color(self) -> &'static str {
        LEVELS[self as usize].2
    }

    fn from_u8(value: u8) -> Self {
        LEVELS
            .get(value as usize)
            .map_or(LogLevel::TRACE, |(level, _, _)| *level)
    }

    /// Case-insensitive level name; `warning` is accepted for `WARN`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("warning") {
            return Some(LogLevel::WARN);
        }
        LEVELS
            .iter()
            .find(|(_, label, _)| label.eq_ignore_ascii_case(name))
            .map(|(level, _, _)| *level)
    }
}

/// Start the logger on the boot CPU. Only the first call has an effect.
///
/// `tsc_frequency_hz` scales timestamps; without it they assume 1 GHz.
pub fn init(tsc_frequency_hz: Option<u64>) {
    if LOGGER_INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    serial::init();
    if let Some(freq) = tsc_frequency_hz.filter(|freq| *freq != 0) {
        TSC_FREQUENCY_HZ.store(freq, Ordering::Relaxed);
    }
    BOOT_TSC.store(read_tsc(), Ordering::Relaxed);
}

pub fn log(level: LogLevel, args: fmt::Arguments<'_>) {
    if level > max_level() {
        return;
    }

    let print: fn(fmt::Arguments<'_>) = if level <= LogLevel::FATAL {
        serial::_print_fatal
    } else {
        serial::_print
    };
    print(format_args!(
        "{}[{}] [cpu{:<2}] [{:<5}] {}\x1b[0m\n",
        level.color(),
        Uptime(uptime_us()),
        arch::apic_id(),
        level.as_str(),
        args,
    ));
}

pub fn set_max_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn max_level() -> LogLevel {
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Level named by the last `log=` or `loglevel=` token on the command line.
pub fn parse_level_directive(cmdline: &str) -> Option<LogLevel> {
    cmdline
        .split_whitespace()
        .filter_map(|token| token.split_once('='))
        .filter(|(key, _)| key.eq_ignore_ascii_case("log") || key.eq_ignore_ascii_case("loglevel"))
        .filter_map(|(_, value)| LogLevel::from_name(value))
        .last()
}

/// Microseconds since `init`, 0 before it.
pub fn uptime_us() -> u64 {
    let start = BOOT_TSC.load(Ordering::Relaxed);
    if start == 0 {
        return 0;
    }
    let ticks = read_tsc().saturating_sub(start);
    ticks.saturating_mul(1_000_000) / TSC_FREQUENCY_HZ.load(Ordering::Relaxed)
}

fn read_tsc() -> u64 {
    // SAFETY: RDTSC has no side effects.
    unsafe { core::arch::x86_64::_rdtsc() }
}

struct Uptime(u64);

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5}.{:06}", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}
