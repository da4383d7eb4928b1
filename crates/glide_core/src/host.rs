//! Host capabilities
//!
//! Widgets never talk to a platform timer, frame clock, or window directly.
//! The host injects these capabilities and later delivers the resulting
//! [`Wakeup`]s back to the widget that requested them:
//!
//! - [`Scheduler`]: one-shot and repeating timers plus "next frame" requests
//! - [`VisibilityProbe`]: whether the widget's container is currently visible
//!
//! A wakeup is only meaningful to the widget holding its id. Widgets must
//! ignore ids they no longer own, which makes late or duplicated deliveries
//! harmless.

use slotmap::new_key_type;
use std::time::Duration;

new_key_type! {
    /// Handle to a scheduled timer (one-shot or repeating)
    pub struct TimerId;
    /// Handle to a requested animation frame
    pub struct FrameId;
}

/// A deferred callback delivered by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wakeup {
    /// A timer elapsed. Repeating timers produce one wakeup per period.
    Timer(TimerId),
    /// The frame requested with this id is being prepared
    Frame(FrameId),
}

/// Timer and frame scheduling provided by the host
///
/// Methods take `&self` so a single scheduler handle can be shared between
/// the host loop and every widget it drives.
pub trait Scheduler {
    /// Fire [`Wakeup::Timer`] once after `delay`
    fn set_timeout(&self, delay: Duration) -> TimerId;

    /// Fire [`Wakeup::Timer`] every `period`, starting one full period from now
    fn set_interval(&self, period: Duration) -> TimerId;

    /// Cancel a timer. Unknown or already-fired ids are ignored.
    fn clear_timer(&self, id: TimerId);

    /// Request a [`Wakeup::Frame`] on the next rendering tick
    fn request_frame(&self) -> FrameId;

    /// Cancel a frame request. Unknown ids are ignored.
    fn cancel_frame(&self, id: FrameId);
}

/// Reports whether a widget's container is currently visible
pub trait VisibilityProbe {
    fn is_visible(&self) -> bool;
}

/// Probe for hosts without a notion of visibility
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysVisible;

impl VisibilityProbe for AlwaysVisible {
    fn is_visible(&self) -> bool {
        true
    }
}

impl<F> VisibilityProbe for F
where
    F: Fn() -> bool,
{
    fn is_visible(&self) -> bool {
        self()
    }
}
