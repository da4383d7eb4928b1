//! Finite state machines
//!
//! Flat, table-driven state machines for widget states. States and events are
//! `u32` ids so widgets can declare them as `const`s in a `states` module and
//! reuse [`event_types`](crate::events::event_types) directly as events.
//!
//! ```rust
//! use glide_core::fsm::StateMachine;
//!
//! const CLOSED: u32 = 0;
//! const OPEN: u32 = 1;
//! const TOGGLE: u32 = 7;
//!
//! let mut fsm = StateMachine::builder(CLOSED)
//!     .on(CLOSED, TOGGLE, OPEN)
//!     .on(OPEN, TOGGLE, CLOSED)
//!     .build();
//!
//! fsm.send(TOGGLE);
//! assert_eq!(fsm.current_state(), OPEN);
//! ```

use rustc_hash::FxHashMap;

/// State identifier
pub type StateId = u32;

/// Event identifier
pub type EventId = u32;

/// A flat finite state machine
#[derive(Clone, Debug)]
pub struct StateMachine {
    initial: StateId,
    current: StateId,
    transitions: FxHashMap<(StateId, EventId), StateId>,
}

impl StateMachine {
    /// Start building a machine that begins in `initial`
    pub fn builder(initial: StateId) -> StateMachineBuilder {
        StateMachineBuilder {
            initial,
            transitions: FxHashMap::default(),
        }
    }

    /// Current state
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Whether the machine is in `state`
    pub fn is(&self, state: StateId) -> bool {
        self.current == state
    }

    /// Send an event. Returns `true` if a transition happened.
    pub fn send(&mut self, event: EventId) -> bool {
        let Some(&to) = self.transitions.get(&(self.current, event)) else {
            tracing::trace!(state = self.current, event, "fsm: no transition");
            return false;
        };
        tracing::trace!(from = self.current, event, to, "fsm: transition");
        self.current = to;
        true
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

/// Builder for [`StateMachine`]
pub struct StateMachineBuilder {
    initial: StateId,
    transitions: FxHashMap<(StateId, EventId), StateId>,
}

impl StateMachineBuilder {
    /// Add a transition `from --event--> to`
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.insert((from, event), to);
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            initial: self.initial,
            current: self.initial,
            transitions: self.transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: StateId = 0;
    const HOVERED: StateId = 1;
    const PRESSED: StateId = 2;

    const ENTER: EventId = 1;
    const LEAVE: EventId = 2;
    const DOWN: EventId = 3;

    fn machine() -> StateMachineBuilder {
        StateMachine::builder(IDLE)
            .on(IDLE, ENTER, HOVERED)
            .on(HOVERED, LEAVE, IDLE)
            .on(HOVERED, DOWN, PRESSED)
    }

    #[test]
    fn test_transitions() {
        let mut fsm = machine().build();
        assert_eq!(fsm.current_state(), IDLE);

        assert!(!fsm.send(DOWN));
        assert_eq!(fsm.current_state(), IDLE);

        assert!(fsm.send(ENTER));
        assert!(fsm.send(DOWN));
        assert!(fsm.is(PRESSED));

        fsm.reset();
        assert!(fsm.is(IDLE));
    }

    #[test]
    fn test_unknown_event_keeps_state() {
        let mut fsm = machine().build();
        fsm.send(ENTER);
        assert!(!fsm.send(ENTER));
        assert!(fsm.is(HOVERED));
        assert!(fsm.send(LEAVE));
        assert!(fsm.is(IDLE));
    }
}
