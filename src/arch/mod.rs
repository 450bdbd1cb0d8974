//! Architecture-specific code for the bring-up protocol
//!
//! This module contains the concrete collaborators the portable `smp` code
//! relies on:
//! - x86_64 platform: core index, boot stacks, control block publication
//! - Halting a core on fatal paths

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "x86_64")]
pub use self::x86_64::{
    apic_id, halt_loop, BringupRelax, CpuControlBlock, X86Platform, BOOT_STACKS,
};
