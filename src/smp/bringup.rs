//! Secondary-core bring-up
//!
//! Runs once on each secondary core after the trampoline has installed the
//! core's boot stack. The core walks
//! `Reset -> WaitingForMailbox -> Claiming -> Active -> Running`:
//!
//! 1. make the shared boot region coherent
//! 2. poll the mailbox until it names this core
//! 3. publish this core's control block
//! 4. mark itself active in the registry
//! 5. jump to the delivered start routine, which never comes back

use spin::relax::RelaxStrategy;

use super::boot::SmpBoot;
use super::fatal::{boot_fatal, BootFatal};
use super::platform::BringupPlatform;
use super::types::BringupState;
use super::wait::await_assignment;

impl<const N: usize> SmpBoot<N> {
    /// Bring the executing secondary core online.
    ///
    /// `R` decides how the core idles between mailbox polls.
    pub fn run_secondary<P, R>(&self, platform: &P) -> !
    where
        P: BringupPlatform + ?Sized,
        R: RelaxStrategy,
    {
        let cpu = platform.current_cpu_id();
        if cpu >= N {
            boot_fatal(BootFatal::CpuOutOfRange { cpu, max: N });
        }

        platform.configure_shared_region();
        self.set_state(cpu, BringupState::WaitingForMailbox);

        let request = await_assignment::<R>(&self.mailbox, cpu);
        self.set_state(cpu, BringupState::Claiming);

        platform.publish_control_block(request.cpu);

        self.registry.mark_active(request.cpu);
        self.set_state(cpu, BringupState::Active);
        crate::kdebug!("SMP: [{}] Claimed start request", cpu);

        self.set_state(cpu, BringupState::Running);
        (request.entry)(request.arg);

        boot_fatal(BootFatal::EntryReturned { cpu })
    }
}
