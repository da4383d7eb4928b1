//! Glide Core
//!
//! Foundational primitives shared by Glide widgets and hosts:
//!
//! - **Events**: Pointer, keyboard, touch and transition-end events delivered by the host
//! - **State Machines**: Table-driven FSMs for widget interaction and animation phases
//! - **Host Capabilities**: Timer/frame scheduling and visibility probing, injected by the host
//!
//! # Example
//!
//! ```rust
//! use glide_core::fsm::StateMachine;
//!
//! const IDLE: u32 = 0;
//! const ACTIVE: u32 = 1;
//! const CLICK: u32 = 1;
//!
//! let mut fsm = StateMachine::builder(IDLE)
//!     .on(IDLE, CLICK, ACTIVE)
//!     .on(ACTIVE, CLICK, IDLE)
//!     .build();
//!
//! assert!(fsm.send(CLICK));
//! assert_eq!(fsm.current_state(), ACTIVE);
//! ```

pub mod events;
pub mod fsm;
pub mod host;

pub use events::{event_types, Event, EventData, EventType, KeyCode};
pub use fsm::{EventId, StateId, StateMachine, StateMachineBuilder};
pub use host::{AlwaysVisible, FrameId, Scheduler, TimerId, VisibilityProbe, Wakeup};
