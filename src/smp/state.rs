//! SMP Global State
//!
//! The kernel's single bring-up rendezvous and the free-function entry points
//! that operate on it.

use core::ffi::c_void;

use spin::relax::RelaxStrategy;

use super::boot::SmpBoot;
use super::platform::BringupPlatform;
use super::types::{CpuStack, CpuStartFn, MAX_CPUS};

/// Shared between the primary and all secondaries; zeroed at image load
pub static SMP_BOOT: SmpBoot<MAX_CPUS> = SmpBoot::new();

/// Hand `entry(arg)` to secondary core `cpu`. See [`SmpBoot::start`].
pub fn cpu_start<P: BringupPlatform + ?Sized>(
    platform: &P,
    cpu: usize,
    stack: CpuStack,
    entry: CpuStartFn,
    arg: *mut c_void,
) {
    SMP_BOOT.start(platform, cpu, stack, entry, arg);
}

/// Bring-up routine the trampoline calls on each secondary core.
pub fn secondary_main<P, R>(platform: &P) -> !
where
    P: BringupPlatform + ?Sized,
    R: RelaxStrategy,
{
    SMP_BOOT.run_secondary::<P, R>(platform)
}
