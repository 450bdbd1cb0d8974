//! Active-core queries
//!
//! Read-only views of the kernel's bring-up state. None of these write
//! anything, so they are safe to call from any core at any time. A core that
//! just marked itself active may still read as inactive for a moment on
//! another core.

use super::state::SMP_BOOT;
use super::types::BringupState;

/// Whether `cpu` completed bring-up
pub fn cpu_active(cpu: usize) -> bool {
    SMP_BOOT.registry().is_active(cpu)
}

/// Number of secondary cores that completed bring-up
pub fn active_count() -> usize {
    SMP_BOOT.registry().active_count()
}

/// Indices of secondary cores that completed bring-up, e.g. IPI targets
pub fn active_cpus() -> impl Iterator<Item = usize> {
    SMP_BOOT.registry().active_cpus()
}

/// Bring-up state of `cpu`; a core stuck in `WaitingForMailbox` was never
/// addressed by a start request
pub fn bringup_state(cpu: usize) -> BringupState {
    SMP_BOOT.bringup_state(cpu)
}
