//! Timer scheduler
//!
//! Owns every timer and frame request made by the widgets of one host and
//! turns elapsed time into [`Wakeup`]s.
//!
//! Time only moves when the host says so:
//! - [`TimerScheduler::advance`] moves the clock by an explicit amount (tests, headless hosts)
//! - [`TimerScheduler::tick`] moves it by the wall-clock time since the previous tick
//!
//! Wakeups are delivered one at a time through a callback with the scheduler
//! unlocked, so the receiving widget may arm or cancel timers while handling
//! them. A timer armed during delivery fires in the same `advance` call if its
//! deadline falls inside the advanced window.
//!
//! ```ignore
//! let scheduler = TimerScheduler::new();
//! let mut carousel = carousel().interval_ms(3000).build(scheduler.handle(), 4);
//! carousel.mount();
//!
//! // host loop
//! scheduler.tick(|wakeup| carousel.handle_wakeup(wakeup));
//! ```

use glide_core::host::{FrameId, Scheduler, TimerId, Wakeup};
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::{Duration, Instant};

struct TimerEntry {
    deadline: Duration,
    period: Option<Duration>,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
}

struct FrameEntry {
    seq: u64,
}

/// Internal state of the scheduler
struct SchedulerInner {
    timers: SlotMap<TimerId, TimerEntry>,
    frames: SlotMap<FrameId, FrameEntry>,
    /// Time elapsed on the scheduler clock
    now: Duration,
    last_tick: Instant,
    next_seq: u64,
    fired: u64,
}

impl SchedulerInner {
    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn insert_timer(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
        let seq = self.next_seq();
        let deadline = self.now + delay;
        self.timers.insert(TimerEntry {
            deadline,
            period,
            seq,
        })
    }

    /// Pop the earliest timer due at or before `until`, rescheduling repeating ones
    fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, deadline) = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(id, t)| (id, t.deadline))?;

        self.now = self.now.max(deadline);
        self.fired += 1;

        let period = self.timers.get(id).and_then(|t| t.period);
        match period {
            Some(period) => {
                let seq = self.next_seq();
                if let Some(timer) = self.timers.get_mut(id) {
                    // Zero periods would spin forever inside one advance
                    timer.deadline = deadline + period.max(Duration::from_millis(1));
                    timer.seq = seq;
                }
            }
            None => {
                self.timers.remove(id);
            }
        }
        Some(id)
    }
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Snapshot of scheduler bookkeeping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerStats {
    pub timers: usize,
    pub frames: usize,
    pub fired: u64,
    pub now: Duration,
}

/// The scheduler that owns all timers and frame requests of a host
///
/// Widgets receive a [`SchedulerHandle`] via [`handle()`](Self::handle); the
/// host keeps the `TimerScheduler` and drives it.
pub struct TimerScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                timers: SlotMap::with_key(),
                frames: SlotMap::with_key(),
                now: Duration::ZERO,
                last_tick: Instant::now(),
                next_seq: 0,
                fired: 0,
            })),
        }
    }

    /// Get a handle for widgets to schedule work with
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Current time on the scheduler clock
    pub fn now(&self) -> Duration {
        lock(&self.inner).now
    }

    /// Advance the clock by `dt`, delivering due timers in deadline order and
    /// then every frame requested before the frame phase started
    pub fn advance<F>(&self, dt: Duration, mut deliver: F)
    where
        F: FnMut(Wakeup),
    {
        let until = lock(&self.inner).now + dt;

        loop {
            // Guard must drop before delivery so the receiver can schedule
            let due = lock(&self.inner).pop_due(until);
            match due {
                Some(id) => {
                    tracing::trace!(?id, "scheduler: timer fired");
                    deliver(Wakeup::Timer(id));
                }
                None => break,
            }
        }

        lock(&self.inner).now = until;
        self.run_frame(deliver);
    }

    /// Deliver pending frame requests without moving the clock
    ///
    /// Frames requested while these are delivered wait for the next call.
    pub fn run_frame<F>(&self, mut deliver: F)
    where
        F: FnMut(Wakeup),
    {
        let frames: SmallVec<[FrameId; 4]> = {
            let mut inner = lock(&self.inner);
            let mut pending: SmallVec<[(u64, FrameId); 4]> =
                inner.frames.iter().map(|(id, f)| (f.seq, id)).collect();
            pending.sort_unstable_by_key(|(seq, _)| *seq);
            for (_, id) in &pending {
                inner.frames.remove(*id);
            }
            pending.into_iter().map(|(_, id)| id).collect()
        };

        for id in frames {
            deliver(Wakeup::Frame(id));
        }
    }

    /// Advance by the wall-clock time since the previous tick
    pub fn tick<F>(&self, deliver: F)
    where
        F: FnMut(Wakeup),
    {
        let dt = {
            let mut inner = lock(&self.inner);
            let now = Instant::now();
            let dt = now - inner.last_tick;
            inner.last_tick = now;
            dt
        };
        self.advance(dt, deliver);
    }

    /// Time until the earliest timer fires, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        let inner = lock(&self.inner);
        inner
            .timers
            .values()
            .map(|t| t.deadline.saturating_sub(inner.now))
            .min()
    }

    /// Whether a timer is still scheduled
    pub fn has_timer(&self, id: TimerId) -> bool {
        lock(&self.inner).timers.contains_key(id)
    }

    /// Whether a frame request is still pending
    pub fn has_frame(&self, id: FrameId) -> bool {
        lock(&self.inner).frames.contains_key(id)
    }

    pub fn stats(&self) -> SchedulerStats {
        let inner = lock(&self.inner);
        SchedulerStats {
            timers: inner.timers.len(),
            frames: inner.frames.len(),
            fired: inner.fired,
            now: inner.now,
        }
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TimerScheduler {
    fn set_timeout(&self, delay: Duration) -> TimerId {
        lock(&self.inner).insert_timer(delay, None)
    }

    fn set_interval(&self, period: Duration) -> TimerId {
        lock(&self.inner).insert_timer(period, Some(period))
    }

    fn clear_timer(&self, id: TimerId) {
        lock(&self.inner).timers.remove(id);
    }

    fn request_frame(&self) -> FrameId {
        let mut inner = lock(&self.inner);
        let seq = inner.next_seq();
        inner.frames.insert(FrameEntry { seq })
    }

    fn cancel_frame(&self, id: FrameId) {
        lock(&self.inner).frames.remove(id);
    }
}

/// Handle to a [`TimerScheduler`] held by widgets
///
/// Holds a weak reference: once the scheduler is dropped every call becomes a
/// no-op and returns null ids, which never match a delivered wakeup.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Whether the scheduler this handle points to still exists
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    fn with<R: Default>(&self, f: impl FnOnce(&mut SchedulerInner) -> R) -> R {
        match self.inner.upgrade() {
            Some(inner) => f(&mut lock(&inner)),
            None => {
                tracing::debug!("scheduler handle used after scheduler was dropped");
                R::default()
            }
        }
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl Scheduler for SchedulerHandle {
    fn set_timeout(&self, delay: Duration) -> TimerId {
        self.with(|inner| inner.insert_timer(delay, None))
    }

    fn set_interval(&self, period: Duration) -> TimerId {
        self.with(|inner| inner.insert_timer(period, Some(period)))
    }

    fn clear_timer(&self, id: TimerId) {
        self.with(|inner| {
            inner.timers.remove(id);
        })
    }

    fn request_frame(&self) -> FrameId {
        self.with(|inner| {
            let seq = inner.next_seq();
            inner.frames.insert(FrameEntry { seq })
        })
    }

    fn cancel_frame(&self, id: FrameId) {
        self.with(|inner| {
            inner.frames.remove(id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn collect(scheduler: &TimerScheduler, dt: Duration) -> Vec<Wakeup> {
        let mut out = Vec::new();
        scheduler.advance(dt, |w| out.push(w));
        out
    }

    #[test]
    fn test_timeout_fires_once() {
        let scheduler = TimerScheduler::new();
        let id = scheduler.set_timeout(ms(100));

        assert!(collect(&scheduler, ms(99)).is_empty());
        assert_eq!(collect(&scheduler, ms(1)), vec![Wakeup::Timer(id)]);
        assert!(collect(&scheduler, ms(500)).is_empty());
        assert!(!scheduler.has_timer(id));
    }

    #[test]
    fn test_interval_repeats_in_order() {
        let scheduler = TimerScheduler::new();
        let fast = scheduler.set_interval(ms(100));
        let slow = scheduler.set_interval(ms(250));

        let fired = collect(&scheduler, ms(300));
        assert_eq!(
            fired,
            vec![
                Wakeup::Timer(fast),
                Wakeup::Timer(fast),
                Wakeup::Timer(slow),
                Wakeup::Timer(fast),
            ]
        );
        assert_eq!(scheduler.stats().fired, 4);
    }

    #[test]
    fn test_clear_timer() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        let id = handle.set_interval(ms(50));
        handle.clear_timer(id);

        assert!(collect(&scheduler, ms(200)).is_empty());
        // Clearing twice is harmless
        handle.clear_timer(id);
    }

    #[test]
    fn test_frames_delivered_after_timers() {
        let scheduler = TimerScheduler::new();
        let timer = scheduler.set_timeout(ms(10));
        let frame = scheduler.request_frame();

        let fired = collect(&scheduler, ms(16));
        assert_eq!(fired, vec![Wakeup::Timer(timer), Wakeup::Frame(frame)]);
        assert!(!scheduler.has_frame(frame));
    }

    #[test]
    fn test_frame_requested_during_frame_waits() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        scheduler.request_frame();

        let mut second = None;
        scheduler.run_frame(|_| second = Some(handle.request_frame()));
        let second = second.expect("first frame delivered");

        assert!(scheduler.has_frame(second));
        assert_eq!(collect(&scheduler, ms(0)), vec![Wakeup::Frame(second)]);
    }

    #[test]
    fn test_timer_armed_during_delivery_fires_in_window() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        let first = scheduler.set_timeout(ms(10));

        let mut fired = Vec::new();
        let mut rearmed = None;
        scheduler.advance(ms(100), |w| {
            fired.push(w);
            if w == Wakeup::Timer(first) {
                rearmed = Some(handle.set_timeout(ms(20)));
            }
        });

        let rearmed = rearmed.expect("first timer fired");
        assert_eq!(fired, vec![Wakeup::Timer(first), Wakeup::Timer(rearmed)]);
        assert_eq!(scheduler.now(), ms(100));
    }

    #[test]
    fn test_cancel_frame() {
        let scheduler = TimerScheduler::new();
        let frame = scheduler.request_frame();
        scheduler.cancel_frame(frame);
        assert!(collect(&scheduler, ms(16)).is_empty());
    }

    #[test]
    fn test_next_deadline() {
        let scheduler = TimerScheduler::new();
        assert_eq!(scheduler.next_deadline(), None);
        scheduler.set_interval(ms(300));
        scheduler.set_timeout(ms(120));
        collect(&scheduler, ms(20));
        assert_eq!(scheduler.next_deadline(), Some(ms(100)));
    }

    #[test]
    fn test_dead_handle_is_noop() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        drop(scheduler);

        assert!(!handle.is_alive());
        let id = handle.set_interval(ms(10));
        assert_eq!(id, TimerId::default());
        handle.clear_timer(id);
    }
}
