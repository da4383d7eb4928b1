//! Carousel widget
//!
//! Owns the slide sequencer, the transition driver, and the autoplay timer,
//! and routes host input to them:
//!
//! - [`Carousel::handle_event`] for pointer, keyboard, touch and transition-end events
//! - [`Carousel::handle_wakeup`] for timers and frames it requested from the scheduler
//! - [`Carousel::set_active_index`] whenever a controlling host changes its index
//!
//! Presentation comes back through [`Carousel::view`].
//!
//! ```ignore
//! let scheduler = TimerScheduler::new();
//! let mut carousel = carousel()
//!     .interval_ms(3000)
//!     .on_select(|selection| println!("showing {}", selection.index))
//!     .build(scheduler.handle(), slides.len());
//! carousel.mount();
//!
//! loop {
//!     for event in platform.poll_events() {
//!         carousel.handle_event(&event);
//!     }
//!     scheduler.tick(|wakeup| {
//!         carousel.handle_wakeup(wakeup);
//!     });
//!     render(carousel.view());
//! }
//! ```

use glide_core::events::{event_types, Event, EventData, KeyCode};
use glide_core::host::{AlwaysVisible, Scheduler, TimerId, VisibilityProbe, Wakeup};
use std::time::Duration;

use crate::autoplay::{next_index, prev_index, AutoplayScheduler, AutoplayState};
use crate::classes::{ClassList, ClassNames};
use crate::config::{CarouselConfig, SWIPE_THRESHOLD};
use crate::sequencer::{clamp_index, Direction, IndexSource, SlideSelection, SlideSequencer};
use crate::transition::{Settled, TransitionDriver, TransitionPhase};
use crate::view::{CarouselView, ControlView, IndicatorView, SlideView};

type SelectCallback = Box<dyn FnMut(&SlideSelection) + Send>;
type SlideEndCallback = Box<dyn FnMut(usize) + Send>;

/// Carousel widget
pub struct Carousel {
    config: CarouselConfig,
    names: ClassNames,
    sequencer: SlideSequencer,
    driver: TransitionDriver,
    autoplay: AutoplayScheduler,
    scheduler: Box<dyn Scheduler + Send>,
    visibility: Box<dyn VisibilityProbe + Send>,
    on_select: Option<SelectCallback>,
    on_slide_end: Option<SlideEndCallback>,
    /// The queued index came from the host rather than from a selection
    pending_from_host: bool,
    touch_start_x: Option<f32>,
    hovered: bool,
    mounted: bool,
    torn_down: bool,
}

impl Carousel {
    /// Create a carousel with default config that owns its active index
    pub fn new(scheduler: impl Scheduler + Send + 'static, slide_count: usize) -> Self {
        Self::with_config(CarouselConfig::default(), scheduler, slide_count)
    }

    /// Create a carousel that owns its active index
    pub fn with_config(
        config: CarouselConfig,
        scheduler: impl Scheduler + Send + 'static,
        slide_count: usize,
    ) -> Self {
        let source = IndexSource::Uncontrolled(config.default_active_index);
        Self::from_parts(config, Box::new(scheduler), source, slide_count)
    }

    /// Create a carousel whose active index is supplied by the host
    pub fn controlled(
        config: CarouselConfig,
        scheduler: impl Scheduler + Send + 'static,
        slide_count: usize,
        active_index: usize,
    ) -> Self {
        let source = IndexSource::Controlled(active_index);
        Self::from_parts(config, Box::new(scheduler), source, slide_count)
    }

    fn from_parts(
        config: CarouselConfig,
        scheduler: Box<dyn Scheduler + Send>,
        source: IndexSource,
        slide_count: usize,
    ) -> Self {
        let names = ClassNames::new(config.class_prefix.clone());
        let driver = TransitionDriver::new(names.clone(), config.transition_fallback());
        let autoplay = AutoplayScheduler::new(config.autoplay_interval());

        Self {
            sequencer: SlideSequencer::new(source, slide_count),
            config,
            names,
            driver,
            autoplay,
            scheduler,
            visibility: Box::new(AlwaysVisible),
            on_select: None,
            on_slide_end: None,
            pending_from_host: false,
            touch_start_x: None,
            hovered: false,
            mounted: false,
            torn_down: false,
        }
    }

    /// Set the selection callback
    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&SlideSelection) + Send + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Set the callback fired once a transition has settled
    pub fn on_slide_end<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_slide_end = Some(Box::new(callback));
        self
    }

    /// Set the probe consulted before every autoplay advance
    pub fn visibility(mut self, probe: impl VisibilityProbe + Send + 'static) -> Self {
        self.visibility = Box::new(probe);
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start autoplay. Animated transitions only run while mounted.
    pub fn mount(&mut self) {
        if self.torn_down || self.mounted {
            return;
        }
        self.mounted = true;
        tracing::debug!(
            slides = self.sequencer.count(),
            active = self.active_index(),
            "carousel: mounted"
        );
        self.autoplay.cycle(&*self.scheduler);
    }

    /// Cancel every timer and frame request. The carousel ignores all input afterwards.
    pub fn unmount(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.mounted = false;
        self.autoplay.teardown(&*self.scheduler);
        self.driver.cancel(&*self.scheduler);
        self.pending_from_host = false;
        self.touch_start_x = None;
        tracing::debug!("carousel: unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn active_index(&self) -> usize {
        self.sequencer.active_index()
    }

    /// Outgoing slide while a transition runs, otherwise the active slide
    pub fn previous_index(&self) -> usize {
        self.sequencer.previous_index()
    }

    /// Direction of the last change
    pub fn direction(&self) -> Direction {
        self.sequencer.direction()
    }

    pub fn slide_count(&self) -> usize {
        self.sequencer.count()
    }

    pub fn is_controlled(&self) -> bool {
        self.sequencer.is_controlled()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.driver.phase()
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.driver.pending()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// The live autoplay timer, if armed
    pub fn autoplay_timer(&self) -> Option<TimerId> {
        self.autoplay.timer()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Advance one slide. Ignored while a transition runs.
    pub fn next(&mut self, event: Option<Event>) {
        if self.torn_down || self.driver.is_in_flight() {
            return;
        }
        let Some(index) = next_index(self.active_index(), self.slide_count(), self.config.wrap)
        else {
            return;
        };
        self.select(index, Some(Direction::Next), event);
    }

    /// Go back one slide. Ignored while a transition runs.
    pub fn prev(&mut self, event: Option<Event>) {
        if self.torn_down || self.driver.is_in_flight() {
            return;
        }
        let Some(index) = prev_index(self.active_index(), self.slide_count(), self.config.wrap)
        else {
            return;
        };
        self.select(index, Some(Direction::Prev), event);
    }

    /// Go to slide `index` (clamped). Queued if a transition runs.
    pub fn to(&mut self, index: usize, event: Option<Event>) {
        if self.torn_down || self.slide_count() == 0 {
            return;
        }
        let index = clamp_index(index, self.slide_count());

        if self.driver.is_in_flight() {
            self.driver.queue(index);
            self.pending_from_host = false;
            return;
        }
        if index == self.active_index() {
            return;
        }
        self.select(index, None, event);
    }

    /// Reconcile with an index supplied by the host
    ///
    /// Controlling hosts call this every time their value changes, typically
    /// in response to the selection callback.
    pub fn set_active_index(&mut self, index: usize) {
        if self.torn_down {
            return;
        }
        self.apply_index(index);
    }

    /// Update the number of slides, clamping the active index into range
    pub fn set_slide_count(&mut self, count: usize) {
        if self.torn_down {
            return;
        }
        let outgoing_removed = self
            .driver
            .current_change()
            .is_some_and(|change| change.previous >= count);
        let clamped = self.sequencer.set_count(count);
        if clamped.is_none() && !outgoing_removed {
            return;
        }
        let index = clamped.unwrap_or_else(|| self.active_index());

        // The active or outgoing slide disappeared: jump without animating
        let interrupted = self.driver.is_in_flight();
        if interrupted {
            self.driver.cancel(&*self.scheduler);
            self.pending_from_host = false;
        }
        self.sequencer.reconcile(index);
        self.sequencer.settle();
        self.driver.apply_immediately();
        tracing::debug!(count, index, "carousel: slide count shrank past a displayed slide");

        if interrupted {
            self.resume_autoplay();
        }
    }

    /// Change the autoplay period. `None` disables autoplay.
    pub fn set_interval(&mut self, interval: Option<Duration>) {
        if self.torn_down {
            return;
        }
        self.autoplay.set_interval(interval, &*self.scheduler);
    }

    /// Stop autoplay until the next [`cycle`](Self::cycle)
    pub fn pause(&mut self) {
        if self.torn_down {
            return;
        }
        self.autoplay.pause(&*self.scheduler);
    }

    /// Restart autoplay with a full period
    pub fn cycle(&mut self) {
        if self.torn_down || !self.mounted {
            return;
        }
        self.autoplay.cycle(&*self.scheduler);
    }

    fn resume_autoplay(&mut self) {
        if self.hovered && self.config.pause_on_hover {
            return;
        }
        self.cycle();
    }

    fn select(&mut self, index: usize, direction: Option<Direction>, event: Option<Event>) {
        let selection = self.sequencer.propose(index, direction, event);
        tracing::debug!(
            index = selection.index,
            direction = %selection.direction,
            "carousel: select"
        );

        if let Some(callback) = self.on_select.as_mut() {
            callback(&selection);
        }
        if !self.sequencer.is_controlled() {
            self.apply_index(selection.index);
        }
    }

    fn apply_index(&mut self, requested: usize) {
        let index = clamp_index(requested, self.slide_count());
        // Queue even the running target so it replaces an older request
        if self.driver.is_in_flight() {
            self.driver.queue(index);
            self.pending_from_host = self.sequencer.is_controlled();
            return;
        }
        if index == self.active_index() {
            return;
        }

        let Some(change) = self.sequencer.reconcile(index) else {
            return;
        };

        if self.config.slide && self.mounted {
            self.autoplay.pause(&*self.scheduler);
            self.driver.begin(change, &*self.scheduler);
        } else {
            self.driver.apply_immediately();
            self.sequencer.settle();
        }
    }

    fn handle_settled(&mut self, settled: Settled) {
        self.sequencer.settle();
        if let Some(callback) = self.on_slide_end.as_mut() {
            callback(settled.index);
        }
        self.driver.reset();

        match self.driver.take_pending() {
            Some(index) => {
                if std::mem::take(&mut self.pending_from_host) {
                    self.apply_index(index);
                } else {
                    self.to(index, None);
                }
                // A controlling host may not follow up on the selection
                if !self.driver.is_in_flight() {
                    self.resume_autoplay();
                }
            }
            None => self.resume_autoplay(),
        }
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Handle a host event. Returns `true` if the carousel consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.torn_down {
            return false;
        }

        match event.event_type {
            event_types::POINTER_ENTER => {
                self.hovered = true;
                if self.config.pause_on_hover {
                    self.autoplay.pause(&*self.scheduler);
                }
                true
            }
            event_types::POINTER_LEAVE => {
                self.hovered = false;
                // A running transition resumes autoplay when it settles
                if !self.driver.is_in_flight() {
                    self.cycle();
                }
                true
            }
            event_types::KEY_DOWN => self.handle_key(event),
            event_types::TOUCH_START if self.config.touch => {
                self.touch_start_x = event.x();
                true
            }
            event_types::TOUCH_END if self.config.touch => {
                let (Some(start), Some(end)) = (self.touch_start_x.take(), event.x()) else {
                    return false;
                };
                let delta = end - start;
                if delta > SWIPE_THRESHOLD {
                    self.prev(Some(event.clone()));
                } else if delta < -SWIPE_THRESHOLD {
                    self.next(Some(event.clone()));
                }
                true
            }
            event_types::TRANSITION_END => {
                let Ok(target) = usize::try_from(event.target) else {
                    return false;
                };
                match self.driver.on_transition_end(target, &*self.scheduler) {
                    Some(settled) => {
                        self.handle_settled(settled);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, event: &Event) -> bool {
        if !self.config.keyboard {
            return false;
        }
        let EventData::Key {
            key,
            in_text_input: false,
        } = event.data
        else {
            return false;
        };

        match key {
            KeyCode::LEFT => {
                self.prev(Some(event.clone()));
                true
            }
            KeyCode::RIGHT => {
                self.next(Some(event.clone()));
                true
            }
            _ => false,
        }
    }

    /// Handle a timer or frame delivered by the scheduler
    ///
    /// Returns `false` for wakeups this carousel does not own, including every
    /// wakeup after [`unmount`](Self::unmount).
    pub fn handle_wakeup(&mut self, wakeup: Wakeup) -> bool {
        if self.torn_down {
            tracing::trace!(?wakeup, "carousel: wakeup after teardown ignored");
            return false;
        }

        match wakeup {
            Wakeup::Timer(id) if self.autoplay.owns(id) => {
                self.on_autoplay_tick();
                true
            }
            Wakeup::Timer(id) => match self.driver.on_timer(id, &*self.scheduler) {
                Some(settled) => {
                    self.handle_settled(settled);
                    true
                }
                None => false,
            },
            Wakeup::Frame(id) => self.driver.on_frame(id, &*self.scheduler),
        }
    }

    fn on_autoplay_tick(&mut self) {
        if !self.visibility.is_visible() {
            tracing::trace!("autoplay: container hidden, tick skipped");
            return;
        }
        if self.driver.is_in_flight() {
            tracing::trace!("autoplay: transition running, tick skipped");
            return;
        }
        self.next(None);
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Snapshot of container, slide, indicator and control classes
    pub fn view(&self) -> CarouselView {
        let count = self.slide_count();
        let active = self.active_index();
        let previous = self.sequencer.previous_index();

        let slides = (0..count)
            .map(|index| {
                let mut classes = ClassList::new();
                classes.push(self.names.item());
                classes.extend(self.driver.classes_for(index, active, previous));
                SlideView {
                    index,
                    active: index == active,
                    classes,
                }
            })
            .collect();

        let indicators = if self.config.indicators {
            (0..count)
                .map(|index| IndicatorView {
                    index,
                    active: index == active,
                })
                .collect()
        } else {
            Vec::new()
        };

        let show_controls = self.config.controls && count > 0;
        let prev_control = (show_controls && (self.config.wrap || active != 0))
            .then(|| self.control(Direction::Prev));
        let next_control = (show_controls && (self.config.wrap || active != self.sequencer.last_index()))
            .then(|| self.control(Direction::Next));

        CarouselView {
            container_classes: self.names.container(self.config.slide, self.config.fade),
            inner_class: self.names.inner(),
            slides,
            indicators_class: self.names.indicators(),
            indicators,
            prev_control,
            next_control,
        }
    }

    fn control(&self, direction: Direction) -> ControlView {
        let label = match direction {
            Direction::Prev => self.config.prev_label.clone(),
            Direction::Next => self.config.next_label.clone(),
        };
        ControlView {
            direction,
            class: self.names.control(direction),
            icon_class: self.names.control_icon(direction),
            label,
        }
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("active", &self.active_index())
            .field("previous", &self.previous_index())
            .field("count", &self.slide_count())
            .field("controlled", &self.is_controlled())
            .field("driver", &self.driver)
            .field("autoplay", &self.autoplay)
            .field("mounted", &self.mounted)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

/// Create a carousel
pub fn carousel() -> CarouselBuilder {
    CarouselBuilder {
        config: CarouselConfig::default(),
        active_index: None,
        on_select: None,
        on_slide_end: None,
        visibility: None,
    }
}

/// Builder for creating carousels
pub struct CarouselBuilder {
    config: CarouselConfig,
    active_index: Option<usize>,
    on_select: Option<SelectCallback>,
    on_slide_end: Option<SlideEndCallback>,
    visibility: Option<Box<dyn VisibilityProbe + Send>>,
}

impl CarouselBuilder {
    /// Replace the whole config
    pub fn config(mut self, config: CarouselConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable animated transitions
    pub fn slide(mut self, slide: bool) -> Self {
        self.config.slide = slide;
        self
    }

    /// Cross fade instead of slide
    pub fn fade(mut self, fade: bool) -> Self {
        self.config.fade = fade;
        self
    }

    /// Enable or disable wraparound
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.config.wrap = wrap;
        self
    }

    /// Show or hide indicators
    pub fn indicators(mut self, indicators: bool) -> Self {
        self.config.indicators = indicators;
        self
    }

    /// Show or hide controls
    pub fn controls(mut self, controls: bool) -> Self {
        self.config.controls = controls;
        self
    }

    /// Set the autoplay period in milliseconds, 0 disables autoplay
    pub fn interval_ms(mut self, interval: u64) -> Self {
        self.config = self.config.interval_ms(interval);
        self
    }

    /// Disable autoplay
    pub fn no_autoplay(mut self) -> Self {
        self.config.interval_ms = None;
        self
    }

    /// Pause autoplay on hover
    pub fn pause_on_hover(mut self, pause: bool) -> Self {
        self.config.pause_on_hover = pause;
        self
    }

    /// Enable or disable arrow-key navigation
    pub fn keyboard(mut self, keyboard: bool) -> Self {
        self.config.keyboard = keyboard;
        self
    }

    /// Enable or disable swipe navigation
    pub fn touch(mut self, touch: bool) -> Self {
        self.config.touch = touch;
        self
    }

    /// Set the class name prefix
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.class_prefix = prefix.into();
        self
    }

    /// Starting slide for a carousel that owns its index
    pub fn default_active_index(mut self, index: usize) -> Self {
        self.config.default_active_index = index;
        self
    }

    /// Let the host control the active index, starting at `index`
    pub fn active_index(mut self, index: usize) -> Self {
        self.active_index = Some(index);
        self
    }

    /// Set the selection callback
    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&SlideSelection) + Send + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Set the slide-ended callback
    pub fn on_slide_end<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_slide_end = Some(Box::new(callback));
        self
    }

    /// Set the visibility probe
    pub fn visibility(mut self, probe: impl VisibilityProbe + Send + 'static) -> Self {
        self.visibility = Some(Box::new(probe));
        self
    }

    /// Build the carousel widget
    pub fn build(self, scheduler: impl Scheduler + Send + 'static, slide_count: usize) -> Carousel {
        let mut carousel = match self.active_index {
            Some(index) => Carousel::controlled(self.config, scheduler, slide_count, index),
            None => Carousel::with_config(self.config, scheduler, slide_count),
        };
        carousel.on_select = self.on_select;
        carousel.on_slide_end = self.on_slide_end;
        if let Some(visibility) = self.visibility {
            carousel.visibility = visibility;
        }
        carousel
    }
}
