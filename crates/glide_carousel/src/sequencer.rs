//! Slide sequencing
//!
//! Tracks the active slide, clamps requested indices, and derives the
//! direction of travel between two slides.
//!
//! The active index either belongs to the host ([`IndexSource::Controlled`])
//! or to the carousel ([`IndexSource::Uncontrolled`]). The rest of the widget
//! only ever reads it through [`SlideSequencer::active_index`].

use glide_core::events::Event;
use std::fmt;

/// Visual direction of travel between slides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Prev => "prev",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp `requested` into `[0, count - 1]` (0 when there are no slides)
pub fn clamp_index(requested: usize, count: usize) -> usize {
    requested.min(count.saturating_sub(1))
}

/// Direction of travel from `previous` to `next` among `count` slides
///
/// Moving to the first slide from the last one (or from past the end) counts
/// as `Next`, otherwise moving forward or staying is `Next` and moving
/// backward is `Prev`.
pub fn direction_between(previous: usize, next: usize, count: usize) -> Direction {
    let last = count.saturating_sub(1);
    if (next == 0 && previous >= last) || previous <= next {
        Direction::Next
    } else {
        Direction::Prev
    }
}

/// Who owns the active index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexSource {
    /// Supplied by the host, changed only through reconciliation
    Controlled(usize),
    /// Owned by the carousel, changed by its own selections
    Uncontrolled(usize),
}

impl IndexSource {
    fn index(self) -> usize {
        match self {
            IndexSource::Controlled(index) | IndexSource::Uncontrolled(index) => index,
        }
    }

    fn with_index(self, index: usize) -> Self {
        match self {
            IndexSource::Controlled(_) => IndexSource::Controlled(index),
            IndexSource::Uncontrolled(_) => IndexSource::Uncontrolled(index),
        }
    }
}

/// A proposed change of the active slide, handed to the selection callback
#[derive(Clone, Debug, PartialEq)]
pub struct SlideSelection {
    /// Index (and key) of the slide that should become active
    pub index: usize,
    pub direction: Direction,
    /// The interaction that caused the selection, `None` for autoplay
    pub event: Option<Event>,
}

/// An applied change of the active slide
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexChange {
    pub previous: usize,
    pub active: usize,
    pub direction: Direction,
}

/// Active/previous index bookkeeping for a carousel
#[derive(Clone, Debug)]
pub struct SlideSequencer {
    source: IndexSource,
    previous: usize,
    direction: Direction,
    count: usize,
}

impl SlideSequencer {
    pub fn new(source: IndexSource, count: usize) -> Self {
        let index = clamp_index(source.index(), count);
        Self {
            source: source.with_index(index),
            previous: index,
            direction: Direction::Next,
            count,
        }
    }

    /// The current slide
    pub fn active_index(&self) -> usize {
        self.source.index()
    }

    /// The slide before the last change
    pub fn previous_index(&self) -> usize {
        self.previous
    }

    /// Direction of the last change
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last_index(&self) -> usize {
        self.count.saturating_sub(1)
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.source, IndexSource::Controlled(_))
    }

    pub fn source(&self) -> IndexSource {
        self.source
    }

    /// Update the slide count. Returns the clamped index the carousel should
    /// reconcile to when the current one fell out of range.
    pub fn set_count(&mut self, count: usize) -> Option<usize> {
        self.count = count;
        self.previous = clamp_index(self.previous, count);
        let clamped = clamp_index(self.active_index(), count);
        (clamped != self.active_index()).then_some(clamped)
    }

    /// Build a selection for `requested`
    ///
    /// Without an explicit direction, lower indices travel `Prev` and
    /// everything else `Next`.
    pub fn propose(
        &self,
        requested: usize,
        direction: Option<Direction>,
        event: Option<Event>,
    ) -> SlideSelection {
        let index = clamp_index(requested, self.count);
        let direction = direction.unwrap_or(if index < self.active_index() {
            Direction::Prev
        } else {
            Direction::Next
        });
        SlideSelection {
            index,
            direction,
            event,
        }
    }

    /// Make `requested` (clamped) the active index
    ///
    /// Returns `None` when it already is. The previous index keeps pointing at
    /// the outgoing slide until [`settle`](Self::settle).
    pub fn reconcile(&mut self, requested: usize) -> Option<IndexChange> {
        let next = clamp_index(requested, self.count);
        let previous = self.active_index();
        if next == previous {
            return None;
        }

        let direction = direction_between(previous, next, self.count);
        self.source = self.source.with_index(next);
        self.previous = previous;
        self.direction = direction;

        Some(IndexChange {
            previous,
            active: next,
            direction,
        })
    }

    /// The outgoing slide is gone, previous catches up with active
    pub fn settle(&mut self) {
        self.previous = self.active_index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_index() {
        for count in 1..6 {
            for requested in 0..10 {
                let index = clamp_index(requested, count);
                assert!(index < count);
                if requested < count {
                    assert_eq!(index, requested);
                }
            }
        }
        assert_eq!(clamp_index(4, 0), 0);
    }

    #[test]
    fn test_direction_tie_break() {
        // Wrapping from the last slide to the first travels forward
        assert_eq!(direction_between(4, 0, 5), Direction::Next);
        // Past the end counts as the end
        assert_eq!(direction_between(7, 0, 5), Direction::Next);
        // Plain backward movement
        assert_eq!(direction_between(2, 0, 5), Direction::Prev);
        assert_eq!(direction_between(3, 1, 5), Direction::Prev);
        // Forward movement
        assert_eq!(direction_between(1, 3, 5), Direction::Next);
        assert_eq!(direction_between(0, 4, 5), Direction::Next);
    }

    #[test]
    fn test_out_of_range_source_is_clamped() {
        let seq = SlideSequencer::new(IndexSource::Controlled(9), 3);
        assert_eq!(seq.active_index(), 2);
        assert_eq!(seq.previous_index(), 2);
        assert!(seq.is_controlled());
    }

    #[test]
    fn test_reconcile() {
        let mut seq = SlideSequencer::new(IndexSource::Uncontrolled(0), 4);
        assert_eq!(seq.reconcile(0), None);

        let change = seq.reconcile(2).unwrap();
        assert_eq!(
            change,
            IndexChange {
                previous: 0,
                active: 2,
                direction: Direction::Next
            }
        );
        assert_eq!(seq.previous_index(), 0);
        seq.settle();
        assert_eq!(seq.previous_index(), 2);

        let change = seq.reconcile(99).unwrap();
        assert_eq!(change.active, 3);
        assert_eq!(seq.active_index(), 3);
    }

    #[test]
    fn test_propose_direction() {
        let mut seq = SlideSequencer::new(IndexSource::Uncontrolled(2), 5);
        assert_eq!(seq.propose(1, None, None).direction, Direction::Prev);
        assert_eq!(seq.propose(4, None, None).direction, Direction::Next);
        assert_eq!(seq.propose(10, None, None).index, 4);
        assert_eq!(
            seq.propose(0, Some(Direction::Next), None).direction,
            Direction::Next
        );

        seq.reconcile(4);
        assert_eq!(seq.propose(4, None, None).direction, Direction::Next);
    }

    #[test]
    fn test_shrinking_count_requests_reconcile() {
        let mut seq = SlideSequencer::new(IndexSource::Uncontrolled(4), 5);
        assert_eq!(seq.set_count(8), None);
        assert_eq!(seq.set_count(3), Some(2));
        assert_eq!(seq.previous_index(), 2);
    }
}
