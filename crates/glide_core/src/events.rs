//! Host events
//!
//! Hosts translate their native input and animation notifications into
//! [`Event`] values and hand them to widgets. Event types are plain `u32`
//! constants so they double as FSM event ids.

/// Event type identifier
pub type EventType = u32;

/// Well-known event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 1;
    pub const POINTER_LEAVE: EventType = 2;
    pub const POINTER_DOWN: EventType = 3;
    pub const POINTER_UP: EventType = 4;
    pub const KEY_DOWN: EventType = 10;
    pub const KEY_UP: EventType = 11;
    pub const TOUCH_START: EventType = 20;
    pub const TOUCH_END: EventType = 21;
    /// A CSS-style transition finished on the element identified by `Event::target`
    pub const TRANSITION_END: EventType = 30;
    pub const MOUNT: EventType = 40;
    pub const UNMOUNT: EventType = 41;
}

/// Platform-independent key code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const HOME: KeyCode = KeyCode(36);
    pub const END: KeyCode = KeyCode(35);
}

/// Payload carried by an [`Event`]
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
        pressure: f32,
    },
    Key {
        key: KeyCode,
        /// The key was typed into a text field rather than the widget itself
        in_text_input: bool,
    },
    Touch {
        x: f32,
        y: f32,
    },
    /// Transition-end notification, `elapsed_ms` as reported by the host
    Transition {
        elapsed_ms: f32,
    },
    None,
}

/// An event delivered by the host
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Host-defined target id (for widgets with children, the child index)
    pub target: u64,
    pub data: EventData,
    /// Host timestamp in milliseconds
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

impl Event {
    /// Create an event with no payload
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            target: 0,
            data: EventData::None,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Pointer event at a position
    pub fn pointer(event_type: EventType, x: f32, y: f32) -> Self {
        Self {
            data: EventData::Pointer {
                x,
                y,
                button: 0,
                pressure: 1.0,
            },
            ..Self::new(event_type)
        }
    }

    /// Key-down event for `key`
    pub fn key_down(key: KeyCode) -> Self {
        Self {
            data: EventData::Key {
                key,
                in_text_input: false,
            },
            ..Self::new(event_types::KEY_DOWN)
        }
    }

    /// Touch event at a screen position
    pub fn touch(event_type: EventType, x: f32, y: f32) -> Self {
        Self {
            data: EventData::Touch { x, y },
            ..Self::new(event_type)
        }
    }

    /// Transition-end event for the element `target`
    pub fn transition_end(target: u64) -> Self {
        Self {
            target,
            data: EventData::Transition { elapsed_ms: 0.0 },
            ..Self::new(event_types::TRANSITION_END)
        }
    }

    /// Set the event target
    pub fn with_target(mut self, target: u64) -> Self {
        self.target = target;
        self
    }

    /// Set the event timestamp
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Stop this event from propagating further
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Horizontal coordinate for pointer and touch events
    pub fn x(&self) -> Option<f32> {
        match self.data {
            EventData::Pointer { x, .. } | EventData::Touch { x, .. } => Some(x),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let e = Event::key_down(KeyCode::LEFT);
        assert_eq!(e.event_type, event_types::KEY_DOWN);
        assert!(matches!(e.data, EventData::Key { key: KeyCode::LEFT, .. }));

        let t = Event::transition_end(3);
        assert_eq!(t.target, 3);
        assert_eq!(t.event_type, event_types::TRANSITION_END);
    }

    #[test]
    fn test_x_coordinate() {
        assert_eq!(Event::touch(event_types::TOUCH_START, 12.0, 4.0).x(), Some(12.0));
        assert_eq!(Event::pointer(event_types::POINTER_ENTER, 5.0, 1.0).x(), Some(5.0));
        assert_eq!(Event::new(event_types::MOUNT).x(), None);
    }
}
