//! Frame request primitives.
//!
//! `FrameScheduler` is the one host service the driver needs: "call me back
//! on the next refresh" plus cancellation. `IntervalScheduler` implements it
//! on top of a fixed interval for event loops that wake on deadlines.

use std::time::{Duration, Instant};

/// Opaque id of a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host service that calls back once per display refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a request. Cancelling something that already ran or was
    /// already cancelled must be a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Holds a single request due one interval after it was made.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Duration,
    next_id: u64,
    due: Option<(FrameHandle, Instant)>,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            due: None,
        }
    }

    /// When the outstanding request should run.
    pub fn deadline(&self) -> Option<Instant> {
        self.due.map(|(_, at)| at)
    }

    /// Hand out the outstanding request if its time has come.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.due {
            Some((handle, at)) if at <= now => {
                self.due = None;
                Some(handle)
            }
            _ => None,
        }
    }

    fn request_at(&mut self, now: Instant) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.due = Some((handle, now + self.interval));
        handle
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.request_at(Instant::now())
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.due, Some((pending, _)) if pending == handle) {
            self.due = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_request_is_due_after_interval() {
        let mut scheduler = IntervalScheduler::new(FRAME);
        let t0 = Instant::now();
        let handle = scheduler.request_at(t0);
        assert_eq!(scheduler.deadline(), Some(t0 + FRAME));
        assert_eq!(scheduler.take_due(t0), None);
        assert_eq!(scheduler.take_due(t0 + FRAME), Some(handle));
        assert_eq!(scheduler.take_due(t0 + FRAME * 2), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = IntervalScheduler::new(FRAME);
        let handle = scheduler.request_frame();
        scheduler.cancel_frame(handle);
        scheduler.cancel_frame(handle);
        assert_eq!(scheduler.deadline(), None);
    }

    #[test]
    fn test_cancel_of_old_handle_keeps_new_request() {
        let mut scheduler = IntervalScheduler::new(FRAME);
        let old = scheduler.request_frame();
        let new = scheduler.request_frame();
        scheduler.cancel_frame(old);
        assert!(scheduler.deadline().is_some());
        assert_ne!(old, new);
    }
}
