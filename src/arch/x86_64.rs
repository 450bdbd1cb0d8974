//! x86_64 bring-up platform
//!
//! Trampoline contract on this target: the AP trampoline loads
//! `SMP_BOOT_STACKS + BOOT_STACK_SIZE * apic_id + BOOT_STACK_SIZE` into RSP
//! and calls [`smp_secondary_entry`]. Initial APIC ids are used directly as
//! core indices, so firmware must number cores `0..MAX_CPUS`.

use core::sync::atomic::{fence, AtomicU64, AtomicUsize, Ordering};

use ::x86_64::instructions::{hlt, interrupts};
use ::x86_64::registers::model_specific::Msr;

use crate::smp::{
    secondary_main, BootStacks, BringupPlatform, CpuStack, BOOT_STACK_SIZE, MAX_CPUS,
};

const IA32_GS_BASE: u32 = 0xC000_0101;

/// Idle strategy between mailbox polls (`pause`)
pub type BringupRelax = spin::relax::Spin;

/// Per-core boot stacks, addressed by the trampoline
#[export_name = "SMP_BOOT_STACKS"]
pub static BOOT_STACKS: BootStacks<MAX_CPUS, BOOT_STACK_SIZE> = BootStacks::new();

/// Per-core control block reachable through `IA32_GS_BASE`
#[repr(C, align(64))] // Cache line aligned to prevent false sharing
pub struct CpuControlBlock {
    pub cpu_id: AtomicUsize,
    pub online_tsc: AtomicU64,
}

impl CpuControlBlock {
    const fn new() -> Self {
        Self {
            cpu_id: AtomicUsize::new(usize::MAX),
            online_tsc: AtomicU64::new(0),
        }
    }
}

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_BLOCK: CpuControlBlock = CpuControlBlock::new();

static CONTROL_BLOCKS: [CpuControlBlock; MAX_CPUS] = [EMPTY_BLOCK; MAX_CPUS];

pub struct X86Platform;

impl BringupPlatform for X86Platform {
    fn current_cpu_id(&self) -> usize {
        apic_id()
    }

    fn boot_stack(&self, cpu: usize) -> CpuStack {
        BOOT_STACKS
            .region(cpu)
            .unwrap_or(CpuStack::new(0, 0))
    }

    fn configure_shared_region(&self) {
        // Write-back memory is coherent across cores on x86; nothing to
        // reprogram. Drain the store buffer before the first poll.
        fence(Ordering::SeqCst);
    }

    fn publish_control_block(&self, cpu: usize) {
        let Some(block) = CONTROL_BLOCKS.get(cpu) else {
            return;
        };
        block.cpu_id.store(cpu, Ordering::Relaxed);
        // SAFETY: reading the TSC has no side effects.
        block
            .online_tsc
            .store(unsafe { core::arch::x86_64::_rdtsc() }, Ordering::Relaxed);
        // SAFETY: GS base is owned by the kernel and points at a static block.
        unsafe {
            Msr::new(IA32_GS_BASE).write(block as *const CpuControlBlock as u64);
        }
    }
}

/// Trampoline target for secondary cores.
#[no_mangle]
pub extern "C" fn smp_secondary_entry() -> ! {
    secondary_main::<X86Platform, BringupRelax>(&X86Platform)
}

/// Initial APIC id of the executing core.
pub fn apic_id() -> usize {
    // SAFETY: CPUID leaf 1 exists on every x86_64 processor.
    let leaf = unsafe { core::arch::x86_64::__cpuid(1) };
    (leaf.ebx >> 24) as usize
}

/// Park the executing core forever.
pub fn halt_loop() -> ! {
    interrupts::disable();
    loop {
        hlt();
    }
}
