//! Start-request mailbox
//!
//! A single slot the primary core fills with `(target, entry, arg)` and every
//! waiting secondary core polls. `target` is the synchronisation point: it is
//! stored last with release ordering and loaded with acquire ordering, so a
//! core that sees its own index also sees the entry/argument pair written
//! before that store. The slot is never cleared; a core stops reading it once
//! it has claimed a request.

use core::ffi::c_void;
use core::ptr;
use core::sync::atomic::{fence, AtomicPtr, AtomicUsize, Ordering};

use super::types::{CpuStartFn, NO_TARGET};

/// Snapshot of a claimed start request
#[derive(Copy, Clone, Debug)]
pub struct StartRequest {
    pub cpu: usize,
    pub entry: CpuStartFn,
    pub arg: *mut c_void,
}

pub struct StartMailbox {
    target: AtomicUsize,
    entry: AtomicPtr<()>,
    arg: AtomicPtr<c_void>,
}

// SAFETY: all fields are atomics; `arg` is an opaque token handed to the
// start routine and never dereferenced here.
unsafe impl Sync for StartMailbox {}

impl StartMailbox {
    pub const fn new() -> Self {
        Self {
            target: AtomicUsize::new(NO_TARGET),
            entry: AtomicPtr::new(ptr::null_mut()),
            arg: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Hand `entry(arg)` to core `cpu`.
    ///
    /// Entry and argument go out first, the target id last. The trailing full
    /// fence keeps the id store from being delayed behind whatever the caller
    /// does next (typically the IPI that releases the core).
    pub fn publish(&self, cpu: usize, entry: CpuStartFn, arg: *mut c_void) {
        self.entry.store(entry as *mut (), Ordering::Relaxed);
        self.arg.store(arg, Ordering::Relaxed);
        self.target.store(cpu, Ordering::Release);
        fence(Ordering::SeqCst);
    }

    /// Claim the request if it is addressed to `cpu`.
    ///
    /// Every call performs a fresh atomic load of the target id, so a polling
    /// loop always observes current memory.
    pub fn try_claim(&self, cpu: usize) -> Option<StartRequest> {
        if self.target.load(Ordering::Acquire) != cpu {
            return None;
        }

        let raw = self.entry.load(Ordering::Relaxed);
        debug_assert!(!raw.is_null(), "target published without an entry");
        // SAFETY: `raw` was produced from a `CpuStartFn` in `publish`, and the
        // acquire load above makes that store visible here.
        let entry = unsafe { core::mem::transmute::<*mut (), CpuStartFn>(raw) };
        let arg = self.arg.load(Ordering::Relaxed);

        Some(StartRequest { cpu, entry, arg })
    }

    /// Target id of the most recent publish, `None` before the first one.
    pub fn last_target(&self) -> Option<usize> {
        match self.target.load(Ordering::Acquire) {
            NO_TARGET => None,
            cpu => Some(cpu),
        }
    }
}

impl Default for StartMailbox {
    fn default() -> Self {
        Self::new()
    }
}
