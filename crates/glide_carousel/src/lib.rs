//! Glide Carousel
//!
//! A host-agnostic carousel widget: it cycles through slides with automatic
//! timing, directional slide/fade transitions, and pointer, keyboard and touch
//! navigation, and reports the classes every element should carry.
//!
//! # Architecture
//!
//! 1. **Slide Sequencer** ([`sequencer`]): clamps indices, derives the
//!    direction of travel, and hides whether the host or the widget owns the
//!    active index.
//!
//! 2. **Transition Driver** ([`transition`]): an FSM that sequences the
//!    enter/position/settle classes, waits for the host's transition-end
//!    signal (with a fallback timer), and parks at most one pending index.
//!
//! 3. **Autoplay Scheduler** ([`autoplay`]): the single repeating timer that
//!    advances slides, paused on hover and while a transition runs.
//!
//! Timers, frames and visibility come from the host through
//! [`glide_core::host`].
//!
//! # Example
//!
//! ```ignore
//! use glide_animation::TimerScheduler;
//! use glide_carousel::prelude::*;
//!
//! let scheduler = TimerScheduler::new();
//! let mut carousel = carousel()
//!     .interval_ms(3000)
//!     .wrap(false)
//!     .on_slide_end(|index| println!("now showing {index}"))
//!     .build(scheduler.handle(), 5);
//! carousel.mount();
//!
//! scheduler.advance(Duration::from_millis(3000), |wakeup| {
//!     carousel.handle_wakeup(wakeup);
//! });
//! let view = carousel.view();
//! ```

pub mod autoplay;
pub mod carousel;
pub mod classes;
pub mod config;
pub mod error;
pub mod sequencer;
pub mod transition;
pub mod view;

pub use autoplay::{next_index, prev_index, AutoplayScheduler, AutoplayState};
pub use carousel::{carousel, Carousel, CarouselBuilder};
pub use classes::{ClassList, ClassNames};
pub use config::{CarouselConfig, SWIPE_THRESHOLD};
pub use error::{ConfigError, Result};
pub use sequencer::{
    clamp_index, direction_between, Direction, IndexChange, IndexSource, SlideSelection,
    SlideSequencer,
};
pub use transition::{Settled, TransitionDriver, TransitionPhase};
pub use view::{CarouselView, ControlView, IndicatorView, SlideView};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::carousel::{carousel, Carousel, CarouselBuilder};
    pub use crate::config::CarouselConfig;
    pub use crate::sequencer::{Direction, SlideSelection};
    pub use crate::transition::TransitionPhase;
    pub use crate::view::CarouselView;
    pub use glide_core::events::{event_types, Event, KeyCode};
    pub use glide_core::host::Wakeup;
    pub use std::time::Duration;
}
