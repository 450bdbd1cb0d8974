//! Primary Start API Tests
//!
//! Preconditions of `SmpBoot::start` and what it leaves in the mailbox.

#[cfg(test)]
mod tests {
    use std::ffi::c_void;
    use std::sync::Arc;

    use crate::mock::{parked_entry, spawn_secondary, CoreExit, EntryLog, MockBoard, MockCore};
    use crate::smp::{BringupState, CpuStack, CpuStartFn, SmpBoot};

    fn entry(_arg: *mut c_void) {}

    fn setup() -> (Arc<SmpBoot<4>>, Arc<MockBoard<4>>, MockCore<4>) {
        let boot = Arc::new(SmpBoot::<4>::new());
        let board = MockBoard::<4>::new();
        let primary = MockCore::new(&board, 0);
        (boot, board, primary)
    }

    // =========================================================================
    // Publish Effects
    // =========================================================================

    #[test]
    fn test_start_publishes_request() {
        let (boot, board, primary) = setup();
        boot.start(&primary, 2, board.stack(2), entry, 0xA2 as *mut c_void);

        let request = boot.mailbox().try_claim(2).expect("request for cpu 2");
        assert_eq!(request.entry as usize, entry as CpuStartFn as usize);
        assert_eq!(request.arg as usize, 0xA2);
        assert!(boot.mailbox().try_claim(1).is_none());
    }

    #[test]
    fn test_start_is_fire_and_forget() {
        let (boot, board, primary) = setup();
        boot.start(&primary, 1, board.stack(1), entry, std::ptr::null_mut());

        // Nothing has claimed the request; the start API must not wait for it
        // nor touch the registry on the target's behalf.
        assert!(!boot.registry().is_active(1));
        assert_eq!(boot.bringup_state(1), BringupState::Reset);
    }

    #[test]
    fn test_start_next_core_after_claim() {
        let (boot, board, primary) = setup();
        let log = EntryLog::new();

        boot.start(&primary, 1, board.stack(1), parked_entry, log.as_arg());
        assert_eq!(spawn_secondary(&boot, &board, 1).join().unwrap(), CoreExit::Parked);

        boot.start(&primary, 2, board.stack(2), parked_entry, log.as_arg());
        assert_eq!(spawn_secondary(&boot, &board, 2).join().unwrap(), CoreExit::Parked);

        assert_eq!(log.calls().len(), 2);
    }

    // =========================================================================
    // Fatal Preconditions
    // =========================================================================

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_start_out_of_range_is_fatal() {
        let (boot, _board, primary) = setup();
        boot.start(&primary, 4, CpuStack::new(0, 0), entry, std::ptr::null_mut());
    }

    #[test]
    #[should_panic(expected = "does not match trampoline stack")]
    fn test_start_with_other_cores_stack_is_fatal() {
        let (boot, board, primary) = setup();
        boot.start(&primary, 2, board.stack(3), entry, std::ptr::null_mut());
    }

    #[test]
    #[should_panic(expected = "does not match trampoline stack")]
    fn test_start_with_wrong_stack_size_is_fatal() {
        let (boot, board, primary) = setup();
        let stack = board.stack(2);
        let short = CpuStack::new(stack.base, stack.size / 2);
        boot.start(&primary, 2, short, entry, std::ptr::null_mut());
    }

    #[test]
    fn test_stack_mismatch_leaves_mailbox_untouched() {
        let (boot, board, primary) = setup();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            boot.start(&primary, 2, board.stack(1), entry, std::ptr::null_mut());
        }));
        assert!(result.is_err());
        assert_eq!(boot.last_target(), None);
    }

    #[test]
    #[should_panic(expected = "not yet claimed")]
    fn test_start_over_unclaimed_request_is_fatal() {
        let (boot, board, primary) = setup();
        boot.start(&primary, 1, board.stack(1), entry, std::ptr::null_mut());
        boot.start(&primary, 2, board.stack(2), entry, std::ptr::null_mut());
    }

    #[test]
    #[should_panic(expected = "not yet claimed")]
    fn test_restart_before_claim_is_fatal() {
        let (boot, board, primary) = setup();
        boot.start(&primary, 1, board.stack(1), entry, std::ptr::null_mut());
        boot.start(&primary, 1, board.stack(1), entry, std::ptr::null_mut());
    }

    // =========================================================================
    // Mailbox Ownership
    // =========================================================================

    #[test]
    fn test_rejected_start_keeps_pending_request() {
        let (boot, board, primary) = setup();
        boot.start(&primary, 1, board.stack(1), entry, 0x11 as *mut c_void);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            boot.start(&primary, 2, board.stack(2), entry, 0x22 as *mut c_void);
        }));
        assert!(result.is_err());

        // The unclaimed request for cpu 1 is still the one on offer
        assert_eq!(boot.last_target(), Some(1));
        assert!(boot.mailbox().try_claim(2).is_none());
        let request = boot.mailbox().try_claim(1).expect("request for cpu 1");
        assert_eq!(request.arg as usize, 0x11);
    }

    #[test]
    fn test_out_of_range_start_does_not_wedge_mailbox() {
        let (boot, board, primary) = setup();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            boot.start(&primary, 9, CpuStack::new(0, 0), entry, std::ptr::null_mut());
        }));
        assert!(result.is_err());
        assert_eq!(boot.last_target(), None);

        // A valid start afterwards is not blocked by the rejected target
        boot.start(&primary, 1, board.stack(1), entry, 0x11 as *mut c_void);
        assert_eq!(boot.last_target(), Some(1));
    }

    #[test]
    fn test_last_target_follows_start_requests() {
        let (boot, board, primary) = setup();
        let log = EntryLog::new();
        assert_eq!(boot.last_target(), None);

        boot.start(&primary, 3, board.stack(3), parked_entry, log.as_arg());
        assert_eq!(boot.last_target(), Some(3));
        assert_eq!(spawn_secondary(&boot, &board, 3).join().unwrap(), CoreExit::Parked);
        assert_eq!(boot.last_target(), Some(3));

        boot.start(&primary, 1, board.stack(1), parked_entry, log.as_arg());
        assert_eq!(boot.last_target(), Some(1));
    }
}
