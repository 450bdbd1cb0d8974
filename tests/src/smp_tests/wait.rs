//! Await-Assignment Tests

#[cfg(test)]
mod tests {
    use std::ffi::c_void;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use spin::relax::{Loop, Spin, Yield};

    use crate::smp::{await_assignment, StartMailbox};

    fn entry(_arg: *mut c_void) {}

    #[test]
    fn test_returns_immediately_when_already_addressed() {
        let mailbox = StartMailbox::new();
        mailbox.publish(1, entry, 0x10 as *mut c_void);

        let request = await_assignment::<Spin>(&mailbox, 1);
        assert_eq!(request.cpu, 1);
        assert_eq!(request.arg as usize, 0x10);
    }

    #[test]
    fn test_waits_until_published() {
        let mailbox = StartMailbox::new();
        let returned = AtomicBool::new(false);

        thread::scope(|s| {
            let waiter = s.spawn(|| {
                let request = await_assignment::<Yield>(&mailbox, 3);
                returned.store(true, Ordering::SeqCst);
                request.arg as usize
            });

            thread::sleep(Duration::from_millis(20));
            assert!(!returned.load(Ordering::SeqCst), "returned before any publish");

            mailbox.publish(1, entry, 0x1 as *mut c_void);
            thread::sleep(Duration::from_millis(20));
            assert!(!returned.load(Ordering::SeqCst), "returned for another core's request");

            mailbox.publish(3, entry, 0x3 as *mut c_void);
            assert_eq!(waiter.join().unwrap(), 0x3);
        });
    }

    #[test]
    fn test_strategies_are_interchangeable() {
        let mailbox = StartMailbox::new();
        mailbox.publish(2, entry, 0x2 as *mut c_void);

        assert_eq!(await_assignment::<Spin>(&mailbox, 2).arg as usize, 0x2);
        assert_eq!(await_assignment::<Loop>(&mailbox, 2).arg as usize, 0x2);
        assert_eq!(await_assignment::<Yield>(&mailbox, 2).arg as usize, 0x2);
    }
}
