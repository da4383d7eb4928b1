//! Slide transition driver
//!
//! Plays the class sequence that animates one slide out and the next one in:
//!
//! ```text
//!  Idle --BEGIN--> Entering --FRAME--> Positioning --FINISHED--> Settled --RESET--> Idle
//! ```
//!
//! - **Entering**: outgoing slide keeps `active`, incoming gets the order class
//!   (`carousel-item-next`). A frame is requested so the host lays out this
//!   state before the next one.
//! - **Positioning**: both slides get the directional class
//!   (`carousel-item-left`), which starts the host's transition. A fallback
//!   timer is armed in case the transition-end signal never arrives.
//! - **Settled**: transitional classes are cleared and the incoming slide is
//!   the only `active` one.
//!
//! Only one transition runs at a time. Index changes that arrive while the
//! driver is not idle are parked as the pending index; a newer one replaces
//! an older one. The owning carousel applies it once the driver is idle again.

use glide_core::fsm::StateMachine;
use glide_core::host::{FrameId, Scheduler, TimerId};
use std::time::Duration;

use crate::classes::{ClassList, ClassNames, ACTIVE};
use crate::sequencer::IndexChange;

/// Driver states
pub mod states {
    pub const IDLE: u32 = 0;
    pub const ENTERING: u32 = 1;
    pub const POSITIONING: u32 = 2;
    pub const SETTLED: u32 = 3;
}

/// Driver events
pub mod events {
    pub const BEGIN: u32 = 1;
    pub const FRAME: u32 = 2;
    pub const FINISHED: u32 = 3;
    pub const RESET: u32 = 4;
}

/// Phase of the running transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Entering,
    Positioning,
    Settled,
}

impl TransitionPhase {
    fn from_state(state: u32) -> Self {
        match state {
            states::ENTERING => TransitionPhase::Entering,
            states::POSITIONING => TransitionPhase::Positioning,
            states::SETTLED => TransitionPhase::Settled,
            _ => TransitionPhase::Idle,
        }
    }
}

/// Outcome of a transition reaching its end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settled {
    /// The slide that is now the only active one
    pub index: usize,
}

/// Runs one slide transition at a time
pub struct TransitionDriver {
    fsm: StateMachine,
    names: ClassNames,
    /// Classes of the outgoing slide
    prev_classes: ClassList,
    /// Classes of the incoming (active) slide
    current_classes: ClassList,
    change: Option<IndexChange>,
    pending: Option<usize>,
    frame: Option<FrameId>,
    fallback: Option<TimerId>,
    fallback_delay: Duration,
}

impl TransitionDriver {
    pub fn new(names: ClassNames, fallback_delay: Duration) -> Self {
        Self {
            fsm: Self::create_fsm(),
            names,
            prev_classes: ClassList::new(),
            current_classes: Self::active_only(),
            change: None,
            pending: None,
            frame: None,
            fallback: None,
            fallback_delay,
        }
    }

    fn create_fsm() -> StateMachine {
        StateMachine::builder(states::IDLE)
            .on(states::IDLE, events::BEGIN, states::ENTERING)
            .on(states::ENTERING, events::FRAME, states::POSITIONING)
            .on(states::POSITIONING, events::FINISHED, states::SETTLED)
            .on(states::SETTLED, events::RESET, states::IDLE)
            .build()
    }

    fn active_only() -> ClassList {
        let mut classes = ClassList::new();
        classes.push(ACTIVE.to_string());
        classes
    }

    pub fn phase(&self) -> TransitionPhase {
        TransitionPhase::from_state(self.fsm.current_state())
    }

    /// Whether a transition is running (any phase other than idle)
    pub fn is_in_flight(&self) -> bool {
        !self.fsm.is(states::IDLE)
    }

    /// The change being animated
    pub fn current_change(&self) -> Option<IndexChange> {
        self.change
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    /// Park an index change until the running transition settles
    pub fn queue(&mut self, index: usize) {
        if let Some(replaced) = self.pending.replace(index) {
            tracing::debug!(replaced, index, "transition: pending index replaced");
        } else {
            tracing::debug!(index, "transition: index queued behind running transition");
        }
    }

    /// Take the pending index, leaving none
    pub fn take_pending(&mut self) -> Option<usize> {
        self.pending.take()
    }

    /// Frame request of the entering phase, if outstanding
    pub fn frame(&self) -> Option<FrameId> {
        self.frame
    }

    /// Fallback timer of the positioning phase, if armed
    pub fn fallback_timer(&self) -> Option<TimerId> {
        self.fallback
    }

    /// Start animating `change`. Returns `false` if a transition is already running.
    pub fn begin(&mut self, change: IndexChange, scheduler: &dyn Scheduler) -> bool {
        if !self.fsm.send(events::BEGIN) {
            return false;
        }

        tracing::debug!(
            from = change.previous,
            to = change.active,
            direction = %change.direction,
            "transition: entering"
        );

        self.change = Some(change);
        self.prev_classes = Self::active_only();
        self.current_classes = ClassList::new();
        self.current_classes.push(self.names.order(change.direction));
        self.frame = Some(scheduler.request_frame());
        true
    }

    /// Apply a change without animation
    pub fn apply_immediately(&mut self) {
        self.prev_classes = ClassList::new();
        self.current_classes = Self::active_only();
    }

    /// Handle a frame wakeup. Returns `false` for frames this driver did not request.
    pub fn on_frame(&mut self, id: FrameId, scheduler: &dyn Scheduler) -> bool {
        if self.frame != Some(id) {
            return false;
        }
        self.frame = None;

        let Some(change) = self.change else {
            return false;
        };
        if !self.fsm.send(events::FRAME) {
            return false;
        }

        let order = self.names.order(change.direction);
        let directional = self.names.directional(change.direction);

        self.prev_classes = Self::active_only();
        self.prev_classes.push(directional.clone());
        self.current_classes = ClassList::new();
        self.current_classes.push(order);
        self.current_classes.push(directional);

        self.fallback = Some(scheduler.set_timeout(self.fallback_delay));
        tracing::trace!(to = change.active, "transition: positioning");
        true
    }

    /// Handle a transition-end signal from slide `target`
    ///
    /// Only the incoming slide finishing its transition settles the driver.
    pub fn on_transition_end(&mut self, target: usize, scheduler: &dyn Scheduler) -> Option<Settled> {
        let change = self.change?;
        if target != change.active {
            return None;
        }
        self.finish(scheduler)
    }

    /// Handle a timer wakeup. Settles the transition if it is this driver's fallback.
    pub fn on_timer(&mut self, id: TimerId, scheduler: &dyn Scheduler) -> Option<Settled> {
        if self.fallback != Some(id) {
            return None;
        }
        tracing::debug!("transition: no transition-end signal, settling on fallback");
        self.fallback = None;
        self.finish(scheduler)
    }

    fn finish(&mut self, scheduler: &dyn Scheduler) -> Option<Settled> {
        let change = self.change?;
        if !self.fsm.send(events::FINISHED) {
            return None;
        }

        if let Some(timer) = self.fallback.take() {
            scheduler.clear_timer(timer);
        }
        self.prev_classes = ClassList::new();
        self.current_classes = Self::active_only();

        tracing::debug!(index = change.active, "transition: settled");
        Some(Settled {
            index: change.active,
        })
    }

    /// Leave the settled phase so the next transition can start
    pub fn reset(&mut self) {
        if self.fsm.send(events::RESET) {
            self.change = None;
        }
    }

    /// Abort everything and cancel outstanding host requests
    pub fn cancel(&mut self, scheduler: &dyn Scheduler) {
        if let Some(frame) = self.frame.take() {
            scheduler.cancel_frame(frame);
        }
        if let Some(timer) = self.fallback.take() {
            scheduler.clear_timer(timer);
        }
        self.fsm.reset();
        self.change = None;
        self.pending = None;
        self.apply_immediately();
    }

    /// Classes for slide `index` given the active and previous indices
    pub fn classes_for(&self, index: usize, active: usize, previous: usize) -> ClassList {
        let mut classes = ClassList::new();
        if index == active {
            classes.extend(self.current_classes.iter().cloned());
        }
        if index == previous {
            for class in &self.prev_classes {
                if !classes.contains(class) {
                    classes.push(class.clone());
                }
            }
        }
        classes
    }
}

impl std::fmt::Debug for TransitionDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionDriver")
            .field("phase", &self.phase())
            .field("change", &self.change)
            .field("pending", &self.pending)
            .finish()
    }
}
