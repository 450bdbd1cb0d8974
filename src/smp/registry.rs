//! Active-core registry
//!
//! One flag per core index recording whether that core finished bring-up.
//! Each flag has exactly one writer, the core it describes, and flips
//! `false -> true` once. Any core may read any flag.

use core::sync::atomic::{AtomicBool, Ordering};

use super::fatal::{boot_fatal, BootFatal};

pub struct ActiveRegistry<const N: usize> {
    flags: [AtomicBool; N],
}

impl<const N: usize> ActiveRegistry<N> {
    pub const fn new() -> Self {
        #[allow(clippy::declare_interior_mutable_const)]
        const INACTIVE: AtomicBool = AtomicBool::new(false);
        Self {
            flags: [INACTIVE; N],
        }
    }

    /// Whether `cpu` completed bring-up. Indices past `N` are never active.
    #[inline]
    pub fn is_active(&self, cpu: usize) -> bool {
        match self.flags.get(cpu) {
            Some(flag) => flag.load(Ordering::Acquire),
            None => false,
        }
    }

    /// Record that `cpu` finished bring-up. Only `cpu` itself calls this.
    ///
    /// The release store orders everything the core read from the mailbox
    /// before the flag, so a primary that observes the flag may reuse the
    /// mailbox.
    pub(crate) fn mark_active(&self, cpu: usize) {
        let Some(flag) = self.flags.get(cpu) else {
            boot_fatal(BootFatal::CpuOutOfRange { cpu, max: N });
        };
        if flag.swap(true, Ordering::Release) {
            boot_fatal(BootFatal::DoubleActivation { cpu });
        }
    }

    pub fn active_count(&self) -> usize {
        self.flags
            .iter()
            .filter(|flag| flag.load(Ordering::Acquire))
            .count()
    }

    /// Indices of active cores in ascending order.
    pub fn active_cpus(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, flag)| flag.load(Ordering::Acquire))
            .map(|(cpu, _)| cpu)
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for ActiveRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}
