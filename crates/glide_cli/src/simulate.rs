//! Headless carousel simulation
//!
//! Drives a carousel with a [`TimerScheduler`] in fixed steps and plays the
//! host's part: pointer enter/leave, visibility, and transition-end signals
//! arriving a fixed time after each transition starts moving.

use glide_animation::TimerScheduler;
use glide_carousel::classes::join;
use glide_carousel::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// A `FROM..TO` span on the simulated clock, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub from: u64,
    pub to: u64,
}

impl Window {
    fn contains(&self, t: u64) -> bool {
        self.from <= t && t < self.to
    }
}

/// Simulation parameters
#[derive(Clone, Debug)]
pub struct Simulation {
    pub config: CarouselConfig,
    pub slides: usize,
    pub duration_ms: u64,
    pub step_ms: u64,
    /// Delay before the host reports a transition end, `None` never reports one
    pub transition_ms: Option<u64>,
    pub hover: Option<Window>,
    pub hidden: Option<Window>,
}

/// What happened during a simulation
#[derive(Debug, Default)]
pub struct Report {
    pub lines: Vec<String>,
    pub selections: usize,
    pub settled: usize,
    pub final_index: usize,
}

#[derive(PartialEq)]
struct Snapshot {
    active: usize,
    phase: TransitionPhase,
    slides: Vec<String>,
}

impl Snapshot {
    fn of(carousel: &Carousel) -> Self {
        Self {
            active: carousel.active_index(),
            phase: carousel.phase(),
            slides: carousel
                .view()
                .slides
                .iter()
                .map(|slide| join(&slide.classes))
                .collect(),
        }
    }

    fn line(&self, t: u64) -> String {
        let slides = self
            .slides
            .iter()
            .enumerate()
            .map(|(index, classes)| format!("{index}:[{classes}]"))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{t:>7}ms  slide {} {:<12} {slides}",
            self.active,
            format!("{:?}", self.phase).to_lowercase()
        )
    }
}

impl Simulation {
    pub fn run(self) -> Report {
        let scheduler = TimerScheduler::new();
        let visible = Arc::new(AtomicBool::new(true));
        let selections = Arc::new(AtomicUsize::new(0));
        let settled = Arc::new(AtomicUsize::new(0));

        let probe = visible.clone();
        let selected = selections.clone();
        let ended = settled.clone();
        let mut carousel = carousel()
            .config(self.config.clone())
            .visibility(move || probe.load(Ordering::Relaxed))
            .on_select(move |selection: &SlideSelection| {
                tracing::debug!(
                    index = selection.index,
                    direction = %selection.direction,
                    "simulation: selection"
                );
                selected.fetch_add(1, Ordering::Relaxed);
            })
            .on_slide_end(move |_| {
                ended.fetch_add(1, Ordering::Relaxed);
            })
            .build(scheduler.handle(), self.slides);
        carousel.mount();

        let mut lines = Vec::new();
        let mut last = Snapshot::of(&carousel);
        lines.push(last.line(0));

        let step = self.step_ms.max(1);
        let mut t = 0;
        let mut hovered = false;
        let mut transition_end_at: Option<(u64, usize)> = None;

        while t < self.duration_ms {
            let dt = step.min(self.duration_ms - t);
            t += dt;

            let hover = self.hover.is_some_and(|w| w.contains(t));
            if hover != hovered {
                hovered = hover;
                let event = if hover {
                    event_types::POINTER_ENTER
                } else {
                    event_types::POINTER_LEAVE
                };
                carousel.handle_event(&Event::new(event).with_timestamp(t));
                lines.push(format!(
                    "{t:>7}ms  pointer {}",
                    if hover { "enter" } else { "leave" }
                ));
            }
            visible.store(
                !self.hidden.is_some_and(|w| w.contains(t)),
                Ordering::Relaxed,
            );

            scheduler.advance(Duration::from_millis(dt), |wakeup| {
                carousel.handle_wakeup(wakeup);
            });

            if carousel.phase() == TransitionPhase::Positioning {
                if let (None, Some(delay)) = (transition_end_at, self.transition_ms) {
                    transition_end_at = Some((t + delay, carousel.active_index()));
                }
            } else {
                transition_end_at = None;
            }
            if let Some((at, target)) = transition_end_at {
                if t >= at {
                    transition_end_at = None;
                    carousel.handle_event(
                        &Event::transition_end(target as u64).with_timestamp(t),
                    );
                }
            }

            let snapshot = Snapshot::of(&carousel);
            if snapshot != last {
                lines.push(snapshot.line(t));
                last = snapshot;
            }
        }

        let final_index = carousel.active_index();
        carousel.unmount();

        Report {
            lines,
            selections: selections.load(Ordering::Relaxed),
            settled: settled.load(Ordering::Relaxed),
            final_index,
        }
    }
}
