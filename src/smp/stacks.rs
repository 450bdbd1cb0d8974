//! Reserved per-core boot stacks
//!
//! Kernel startup reserves one stack per core in a single array. The
//! trampoline computes a core's initial stack pointer as
//! `base + size * cpu + size`; [`BootStacks::region`] and
//! [`BootStacks::top`] perform the same arithmetic so the start API can check
//! that the caller hands over the stack the trampoline will actually use.

use core::cell::UnsafeCell;

use super::types::CpuStack;

/// `N` stacks of `SIZE` bytes, 16-byte aligned for the x86_64 ABI
#[repr(C, align(16))]
pub struct BootStacks<const N: usize, const SIZE: usize> {
    stacks: UnsafeCell<[[u8; SIZE]; N]>,
}

// SAFETY: the stacks are only handed out as address ranges; each core
// writes exclusively to its own range once the trampoline installs it.
unsafe impl<const N: usize, const SIZE: usize> Sync for BootStacks<N, SIZE> {}

impl<const N: usize, const SIZE: usize> BootStacks<N, SIZE> {
    pub const fn new() -> Self {
        Self {
            stacks: UnsafeCell::new([[0; SIZE]; N]),
        }
    }

    #[inline]
    pub fn base(&self) -> usize {
        self.stacks.get() as usize
    }

    /// Stack region for `cpu`, `None` past the last core.
    pub fn region(&self, cpu: usize) -> Option<CpuStack> {
        if cpu >= N {
            return None;
        }
        Some(CpuStack::new(self.base() + SIZE * cpu, SIZE))
    }

    /// Initial stack pointer the trampoline loads for `cpu`.
    pub fn top(&self, cpu: usize) -> Option<usize> {
        self.region(cpu).map(|stack| stack.top())
    }

    pub const fn count(&self) -> usize {
        N
    }

    pub const fn stack_size(&self) -> usize {
        SIZE
    }
}

impl<const N: usize, const SIZE: usize> Default for BootStacks<N, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
