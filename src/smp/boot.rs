//! Boot-time SMP rendezvous state
//!
//! [`SmpBoot`] owns everything the primary and the secondaries share during
//! bring-up: the start-request mailbox, the active-core registry and the
//! per-core bring-up state bytes. It is `const`-constructible so the kernel's
//! instance lives in `.bss` and is valid before any code runs.

use core::sync::atomic::{AtomicU8, Ordering};

use super::mailbox::StartMailbox;
use super::registry::ActiveRegistry;
use super::types::BringupState;

pub struct SmpBoot<const N: usize> {
    pub(crate) mailbox: StartMailbox,
    pub(crate) registry: ActiveRegistry<N>,
    states: [AtomicU8; N],
}

impl<const N: usize> SmpBoot<N> {
    pub const fn new() -> Self {
        #[allow(clippy::declare_interior_mutable_const)]
        const RESET: AtomicU8 = AtomicU8::new(BringupState::Reset as u8);
        Self {
            mailbox: StartMailbox::new(),
            registry: ActiveRegistry::new(),
            states: [RESET; N],
        }
    }

    /// Publishing goes through [`SmpBoot::start`] only.
    pub(crate) fn mailbox(&self) -> &StartMailbox {
        &self.mailbox
    }

    /// Target of the most recent start request, `None` before the first.
    pub fn last_target(&self) -> Option<usize> {
        self.mailbox.last_target()
    }

    pub fn registry(&self) -> &ActiveRegistry<N> {
        &self.registry
    }

    /// Where `cpu` is in its bring-up sequence.
    pub fn bringup_state(&self, cpu: usize) -> BringupState {
        match self.states.get(cpu) {
            Some(state) => BringupState::from_atomic(state.load(Ordering::Acquire)),
            None => BringupState::Reset,
        }
    }

    /// Advance `cpu`'s state byte. Only `cpu` itself calls this.
    pub(crate) fn set_state(&self, cpu: usize, state: BringupState) {
        if let Some(slot) = self.states.get(cpu) {
            slot.store(state as u8, Ordering::Release);
        }
        #[cfg(feature = "debug_verbose")]
        crate::ktrace!("SMP: [{}] -> {}", cpu, state.as_str());
    }

    pub const fn max_cpus(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for SmpBoot<N> {
    fn default() -> Self {
        Self::new()
    }
}
