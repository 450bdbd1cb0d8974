//! Await-assignment primitive
//!
//! Secondary cores wait for their start request before any scheduler exists,
//! so waiting means polling. The relax step between polls is a
//! [`spin::relax::RelaxStrategy`], so a platform can swap the spin hint for
//! its own idle-wait without touching the bring-up state machine.

use spin::relax::RelaxStrategy;

use super::mailbox::{StartMailbox, StartRequest};

/// Poll `mailbox` until it carries a request for `cpu`.
///
/// There is no timeout. A core that is never addressed stays here forever.
pub fn await_assignment<R: RelaxStrategy>(mailbox: &StartMailbox, cpu: usize) -> StartRequest {
    loop {
        if let Some(request) = mailbox.try_claim(cpu) {
            return request;
        }
        R::relax();
    }
}
