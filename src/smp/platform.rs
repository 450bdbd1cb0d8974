//! Platform collaborators for secondary-core bring-up
//!
//! The protocol itself is architecture neutral. Everything that touches
//! hardware or other kernel subsystems sits behind [`BringupPlatform`]:
//!
//! - the trampoline contract: which stack a core gets and how a core learns
//!   its own index
//! - memory attribute setup for the region holding the mailbox and registry
//! - publishing the per-core control block into the core's fast-access slot

use super::types::CpuStack;

pub trait BringupPlatform {
    /// Hardware index of the executing core.
    fn current_cpu_id(&self) -> usize;

    /// Stack the trampoline installs for `cpu` before entering bring-up.
    fn boot_stack(&self, cpu: usize) -> CpuStack;

    /// Make the shared boot region coherent for this core.
    ///
    /// Runs on the secondary before it polls the mailbox.
    fn configure_shared_region(&self);

    /// Install the control block for `cpu` on the executing core.
    fn publish_control_block(&self, cpu: usize);
}
