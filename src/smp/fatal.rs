//! Fatal bring-up violations
//!
//! Bring-up has no recoverable errors. Every broken contract between the
//! primary core, the trampoline and the delivered start routine ends in
//! [`boot_fatal`], which logs the reason and panics. Kernel builds use
//! `panic = "abort"` and the panic hook parks the core in `halt_loop()`.

use core::fmt;

/// Contract violation detected during secondary-core bring-up
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BootFatal {
    /// Core index outside `0..max`
    CpuOutOfRange { cpu: usize, max: usize },
    /// Start requested for a core that already completed bring-up
    AlreadyActive { cpu: usize },
    /// Supplied stack differs from the one the trampoline will install
    StackMismatch {
        cpu: usize,
        expected: usize,
        supplied: usize,
    },
    /// The mailbox still holds a request its target has not claimed
    RequestPending { pending: usize, requested: usize },
    /// Registry entry written a second time
    DoubleActivation { cpu: usize },
    /// Start routine returned into the bring-up path
    EntryReturned { cpu: usize },
}

impl fmt::Display for BootFatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BootFatal::CpuOutOfRange { cpu, max } => {
                write!(f, "cpu {} out of range (max {})", cpu, max)
            }
            BootFatal::AlreadyActive { cpu } => write!(f, "cpu {} is already active", cpu),
            BootFatal::StackMismatch {
                cpu,
                expected,
                supplied,
            } => write!(
                f,
                "cpu {} stack {:#x} does not match trampoline stack {:#x}",
                cpu, supplied, expected
            ),
            BootFatal::RequestPending { pending, requested } => write!(
                f,
                "start request for cpu {} not yet claimed, cannot start cpu {}",
                pending, requested
            ),
            BootFatal::DoubleActivation { cpu } => {
                write!(f, "cpu {} marked active twice", cpu)
            }
            BootFatal::EntryReturned { cpu } => {
                write!(f, "cpu {} start routine returned", cpu)
            }
        }
    }
}

/// Report a bring-up contract violation and stop.
#[cold]
#[track_caller]
pub fn boot_fatal(reason: BootFatal) -> ! {
    crate::kfatal!("SMP: bring-up violation: {}", reason);
    panic!("SMP bring-up fatal: {}", reason)
}
