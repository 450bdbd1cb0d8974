//! Primary-side start API
//!
//! Publishes a start request for one secondary core and returns at once.
//! Waking the core (IPI, power-domain release) is the caller's job and happens
//! after this returns; the core picks the request up whenever it reaches its
//! mailbox poll.

use core::ffi::c_void;

use super::boot::SmpBoot;
use super::fatal::{boot_fatal, BootFatal};
use super::platform::BringupPlatform;
use super::types::{CpuStack, CpuStartFn};

impl<const N: usize> SmpBoot<N> {
    /// Ask core `cpu` to run `entry(arg)` on `stack`.
    ///
    /// Fatal if `cpu` is out of range, already active, or if `stack` is not
    /// the stack the trampoline computes for `cpu`. Also fatal if the mailbox
    /// still holds a request its target core has not claimed; the slot holds
    /// one request at a time.
    pub fn start<P: BringupPlatform + ?Sized>(
        &self,
        platform: &P,
        cpu: usize,
        stack: CpuStack,
        entry: CpuStartFn,
        arg: *mut c_void,
    ) {
        if cpu >= N {
            boot_fatal(BootFatal::CpuOutOfRange { cpu, max: N });
        }

        if self.registry.is_active(cpu) {
            boot_fatal(BootFatal::AlreadyActive { cpu });
        }

        let expected = platform.boot_stack(cpu);
        if stack != expected {
            boot_fatal(BootFatal::StackMismatch {
                cpu,
                expected: expected.base,
                supplied: stack.base,
            });
        }

        // The previous target's registry write is ordered after its claim,
        // so once it is active its entry/arg snapshot is taken.
        if let Some(pending) = self.mailbox.last_target() {
            if !self.registry.is_active(pending) {
                boot_fatal(BootFatal::RequestPending {
                    pending,
                    requested: cpu,
                });
            }
        }

        crate::kinfo!(
            "SMP: [{}] Publishing start request (stack top {:#x})",
            cpu,
            stack.top()
        );
        self.mailbox.publish(cpu, entry, arg);
    }
}
