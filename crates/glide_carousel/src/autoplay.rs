//! Autoplay scheduling
//!
//! Owns the one repeating timer that advances the carousel. Nothing else
//! starts or stops it; the carousel asks through [`AutoplayScheduler::cycle`]
//! and [`AutoplayScheduler::pause`].

use glide_core::host::{Scheduler, TimerId};
use std::time::Duration;

/// Whether autoplay is currently allowed to tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayState {
    Running,
    Paused,
}

/// Index after `active`, wrapping to 0 when `wrap` is set
///
/// `None` means there is nowhere to go: no slides, or the end without wrap.
pub fn next_index(active: usize, count: usize, wrap: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let next = active + 1;
    if next > count - 1 {
        return wrap.then_some(0);
    }
    Some(next)
}

/// Index before `active`, wrapping to the last slide when `wrap` is set
pub fn prev_index(active: usize, count: usize, wrap: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    match active.checked_sub(1) {
        Some(prev) => Some(prev.min(count - 1)),
        None => wrap.then_some(count - 1),
    }
}

/// Interval timer driving automatic advances
#[derive(Debug)]
pub struct AutoplayScheduler {
    interval: Option<Duration>,
    timer: Option<TimerId>,
    state: AutoplayState,
}

impl AutoplayScheduler {
    /// Create a paused scheduler. `None` or a zero period disables autoplay.
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval: interval.filter(|period| !period.is_zero()),
            timer: None,
            state: AutoplayState::Paused,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// The live timer, if one is armed
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Whether `id` is this scheduler's live timer
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// (Re)start ticking with a full period
    pub fn cycle(&mut self, scheduler: &dyn Scheduler) {
        self.state = AutoplayState::Running;
        self.clear(scheduler);

        if let Some(interval) = self.interval {
            self.timer = Some(scheduler.set_interval(interval));
            tracing::trace!(?interval, "autoplay: armed");
        }
    }

    /// Stop ticking until the next [`cycle`](Self::cycle)
    pub fn pause(&mut self, scheduler: &dyn Scheduler) {
        self.state = AutoplayState::Paused;
        if self.timer.is_some() {
            tracing::trace!("autoplay: paused");
        }
        self.clear(scheduler);
    }

    /// Change the period. A running scheduler restarts with the new one.
    pub fn set_interval(&mut self, interval: Option<Duration>, scheduler: &dyn Scheduler) {
        self.interval = interval.filter(|period| !period.is_zero());
        if self.state == AutoplayState::Running {
            self.cycle(scheduler);
        }
    }

    /// Cancel the timer for good
    pub fn teardown(&mut self, scheduler: &dyn Scheduler) {
        self.pause(scheduler);
    }

    fn clear(&mut self, scheduler: &dyn Scheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.clear_timer(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_animation::TimerScheduler;

    #[test]
    fn test_next_index() {
        assert_eq!(next_index(0, 3, false), Some(1));
        assert_eq!(next_index(2, 3, false), None);
        assert_eq!(next_index(2, 3, true), Some(0));
        assert_eq!(next_index(0, 0, true), None);
        assert_eq!(next_index(0, 1, true), Some(0));
    }

    #[test]
    fn test_prev_index() {
        assert_eq!(prev_index(2, 3, false), Some(1));
        assert_eq!(prev_index(0, 3, false), None);
        assert_eq!(prev_index(0, 3, true), Some(2));
        assert_eq!(prev_index(0, 0, true), None);
    }

    #[test]
    fn test_cycle_and_pause() {
        let scheduler = TimerScheduler::new();
        let mut autoplay = AutoplayScheduler::new(Some(Duration::from_millis(500)));
        assert_eq!(autoplay.state(), AutoplayState::Paused);

        autoplay.cycle(&scheduler);
        let first = autoplay.timer().unwrap();
        assert!(scheduler.has_timer(first));
        assert_eq!(autoplay.state(), AutoplayState::Running);

        // Cycling again replaces the timer instead of stacking a second one
        autoplay.cycle(&scheduler);
        let second = autoplay.timer().unwrap();
        assert_ne!(first, second);
        assert!(!scheduler.has_timer(first));
        assert_eq!(scheduler.stats().timers, 1);

        autoplay.pause(&scheduler);
        assert_eq!(autoplay.timer(), None);
        assert_eq!(scheduler.stats().timers, 0);
        assert!(!autoplay.owns(second));
    }

    #[test]
    fn test_disabled_never_arms() {
        let scheduler = TimerScheduler::new();
        let mut autoplay = AutoplayScheduler::new(None);
        autoplay.cycle(&scheduler);
        assert!(!autoplay.is_enabled());
        assert_eq!(autoplay.timer(), None);
    }

    #[test]
    fn test_set_interval_rearms_running_timer() {
        let scheduler = TimerScheduler::new();
        let mut autoplay = AutoplayScheduler::new(Some(Duration::from_millis(500)));
        autoplay.cycle(&scheduler);
        autoplay.set_interval(Some(Duration::from_millis(200)), &scheduler);
        assert_eq!(scheduler.next_deadline(), Some(Duration::from_millis(200)));

        autoplay.pause(&scheduler);
        autoplay.set_interval(Some(Duration::from_millis(900)), &scheduler);
        assert_eq!(autoplay.timer(), None);
    }

    #[test]
    fn test_zero_period_disables() {
        let scheduler = TimerScheduler::new();
        assert!(!AutoplayScheduler::new(Some(Duration::ZERO)).is_enabled());

        let mut autoplay = AutoplayScheduler::new(Some(Duration::from_millis(500)));
        autoplay.cycle(&scheduler);
        autoplay.set_interval(Some(Duration::ZERO), &scheduler);
        assert!(!autoplay.is_enabled());
        assert_eq!(autoplay.timer(), None);
        assert_eq!(scheduler.stats().timers, 0);
    }
}
