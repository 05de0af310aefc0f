//! Paint-frame scheduling.
//!
//! Pointer events can arrive many times per paint. The scheduler keeps a
//! single slot for the newest sample and at most one outstanding frame
//! request; samples that arrive while a frame is pending overwrite the slot.

use crate::geometry::Scale;
use crate::pointer::PointerSample;

/// Identity of one requested paint callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's "call me on the next paint" facility.
///
/// When the frame fires the host hands the handle back to
/// [`CropEngine::run_frame`](crate::CropEngine::run_frame).
pub trait FrameClock {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A `FrameClock` that queues due handles until the host drains them.
///
/// The optional waker runs on every request, e.g. to ask a UI toolkit for
/// a repaint.
#[derive(Default)]
pub struct QueuedClock {
    next_id: u64,
    due: Vec<FrameHandle>,
    cancelled: usize,
    waker: Option<Box<dyn Fn()>>,
}

impl QueuedClock {
    pub fn with_waker(waker: impl Fn() + 'static) -> Self {
        Self {
            waker: Some(Box::new(waker)),
            ..Default::default()
        }
    }

    /// Handles whose paint has come, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.due)
    }

    pub fn pending(&self) -> usize {
        self.due.len()
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameClock for QueuedClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.due.push(handle);
        if let Some(waker) = &self.waker {
            waker();
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.due.len();
        self.due.retain(|h| *h != handle);
        self.cancelled += before - self.due.len();
    }
}

/// A pointer sample waiting for its paint, with the scale measured when it
/// arrived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledSample {
    pub sample: PointerSample,
    pub scale: Scale,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameHandle>,
    latest: Option<ScheduledSample>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Store `sample` as the newest and request a frame if none is pending.
    /// Returns true when a new frame was requested.
    pub fn offer(&mut self, sample: ScheduledSample, clock: &mut dyn FrameClock) -> bool {
        self.latest = Some(sample);
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(clock.request_frame());
        true
    }

    /// Claim the frame identified by `handle`. Returns the newest sample, or
    /// `None` when the handle is stale (cancelled or superseded).
    pub fn claim(&mut self, handle: FrameHandle) -> Option<ScheduledSample> {
        if self.pending != Some(handle) {
            log::warn!("ignoring stale frame {:?}", handle);
            return None;
        }
        self.pending = None;
        self.latest.take()
    }

    /// Drop the pending frame and sample.
    pub fn cancel(&mut self, clock: &mut dyn FrameClock) {
        if let Some(handle) = self.pending.take() {
            log::debug!("cancelling frame {:?}", handle);
            clock.cancel_frame(handle);
        }
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64) -> ScheduledSample {
        ScheduledSample {
            sample: PointerSample::at(x, 0.0),
            scale: Scale::IDENTITY,
        }
    }

    #[test]
    fn burst_requests_one_frame() {
        let mut clock = QueuedClock::default();
        let mut scheduler = FrameScheduler::new();
        assert!(scheduler.offer(sample(1.0), &mut clock));
        assert!(!scheduler.offer(sample(2.0), &mut clock));
        assert!(!scheduler.offer(sample(3.0), &mut clock));
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn latest_sample_wins() {
        let mut clock = QueuedClock::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.offer(sample(1.0), &mut clock);
        scheduler.offer(sample(2.0), &mut clock);
        let handle = clock.take_due()[0];
        assert_eq!(scheduler.claim(handle), Some(sample(2.0)));
        assert!(!scheduler.is_scheduled());
    }

    #[test]
    fn claim_frees_slot_for_next_frame() {
        let mut clock = QueuedClock::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.offer(sample(1.0), &mut clock);
        let first = clock.take_due()[0];
        scheduler.claim(first);
        assert!(scheduler.offer(sample(2.0), &mut clock));
        assert_ne!(clock.take_due()[0], first);
    }

    #[test]
    fn cancelled_handle_is_stale() {
        let mut clock = QueuedClock::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.offer(sample(1.0), &mut clock);
        let handle = FrameHandle(1);
        scheduler.cancel(&mut clock);
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.cancelled(), 1);
        assert_eq!(scheduler.claim(handle), None);
    }

    #[test]
    fn waker_runs_on_request() {
        use std::cell::Cell;
        use std::rc::Rc;

        let woken = Rc::new(Cell::new(0));
        let counter = woken.clone();
        let mut clock = QueuedClock::with_waker(move || counter.set(counter.get() + 1));
        clock.request_frame();
        clock.request_frame();
        assert_eq!(woken.get(), 2);
    }
}
