//! SMP Type Definitions
//!
//! Constants and plain types shared by the bring-up protocol: core limits,
//! the start routine signature, reserved stack descriptions and the per-core
//! bring-up state.

use core::ffi::c_void;
use core::fmt;

/// Maximum number of CPUs supported
#[cfg(not(any(feature = "max_cpus_8", feature = "max_cpus_16")))]
pub const MAX_CPUS: usize = 4;
#[cfg(all(feature = "max_cpus_8", not(feature = "max_cpus_16")))]
pub const MAX_CPUS: usize = 8;
#[cfg(feature = "max_cpus_16")]
pub const MAX_CPUS: usize = 16;

/// Core that runs `kernel_main` and issues start requests
pub const BOOT_CPU_ID: usize = 0;

/// Per-core boot stack size (must match the trampoline's stride)
pub const BOOT_STACK_SIZE: usize = 16 * 1024;

/// Mailbox target value before the first publish
pub const NO_TARGET: usize = usize::MAX;

/// Routine a secondary core runs once it claims its start request.
///
/// The routine must not return; the bring-up path treats a return as fatal.
pub type CpuStartFn = fn(arg: *mut c_void);

/// Reserved stack region for one core
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CpuStack {
    pub base: usize,
    pub size: usize,
}

impl CpuStack {
    pub const fn new(base: usize, size: usize) -> Self {
        Self { base, size }
    }

    /// Initial stack pointer (stacks grow down).
    pub const fn top(&self) -> usize {
        self.base + self.size
    }
}

impl fmt::Display for CpuStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}..{:#x}", self.base, self.top())
    }
}

/// Position of a core in its one-shot bring-up sequence
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BringupState {
    Reset = 0,
    WaitingForMailbox = 1,
    Claiming = 2,
    Active = 3,
    Running = 4,
}

impl BringupState {
    pub fn from_atomic(val: u8) -> Self {
        match val {
            1 => BringupState::WaitingForMailbox,
            2 => BringupState::Claiming,
            3 => BringupState::Active,
            4 => BringupState::Running,
            _ => BringupState::Reset,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BringupState::Reset => "reset",
            BringupState::WaitingForMailbox => "waiting",
            BringupState::Claiming => "claiming",
            BringupState::Active => "active",
            BringupState::Running => "running",
        }
    }
}
