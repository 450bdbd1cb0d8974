//! SMP (Symmetric Multi-Processing) Secondary-Core Bring-up
//!
//! This module implements the hand-off between the boot CPU and each
//! secondary core before any scheduler runs on that core:
//! - The primary publishes a start request (entry routine + opaque argument)
//!   for one core into a single-slot mailbox and returns immediately
//! - Each secondary polls the mailbox, claims the request addressed to it,
//!   marks itself active and jumps to the entry routine, never to return
//! - Any core can query which cores have completed bring-up
//!
//! No locks, no heap and no scheduler are needed. Ordering between the
//! mailbox fields is carried by a release store / acquire load of the target
//! core id; the registry has one writer per entry.
//!
//! # Module Organization
//!
//! - `types`: Constants, `CpuStack`, `BringupState`, `CpuStartFn`
//! - `mailbox`: Single-slot start-request channel
//! - `registry`: Per-core "bring-up complete" flags
//! - `wait`: Await-assignment polling primitive
//! - `stacks`: Reserved per-core boot stacks and trampoline stack arithmetic
//! - `platform`: Hardware / kernel collaborator trait
//! - `boot`: `SmpBoot`, the rendezvous object owning mailbox and registry
//! - `start`: Primary-side start API
//! - `bringup`: Secondary-side bring-up state machine
//! - `fatal`: Contract violations and the fatal path
//! - `state`: The kernel's global `SMP_BOOT` and free-function entry points
//! - `cpu`: Read-only queries against `SMP_BOOT`

mod boot;
mod bringup;
mod cpu;
pub mod fatal;
pub mod mailbox;
pub mod platform;
pub mod registry;
pub mod stacks;
mod start;
mod state;
pub mod types;
pub mod wait;

// Re-export types
pub use boot::SmpBoot;
pub use fatal::{boot_fatal, BootFatal};
pub use mailbox::{StartMailbox, StartRequest};
pub use platform::BringupPlatform;
pub use registry::ActiveRegistry;
pub use stacks::BootStacks;
pub use types::{
    BringupState, CpuStack, CpuStartFn, BOOT_CPU_ID, BOOT_STACK_SIZE, MAX_CPUS, NO_TARGET,
};
pub use wait::await_assignment;

// Re-export the kernel-wide entry points
pub use state::{cpu_start, secondary_main, SMP_BOOT};

// Re-export queries
pub use cpu::{active_count, active_cpus, bringup_state, cpu_active};
