//! Presentation snapshot handed to the host renderer

use crate::classes::ClassList;
use crate::sequencer::Direction;

/// One slide and the classes it carries right now
#[derive(Clone, Debug, PartialEq)]
pub struct SlideView {
    pub index: usize,
    pub active: bool,
    pub classes: ClassList,
}

/// One position indicator. Clicking it should call `Carousel::to(index, ..)`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorView {
    pub index: usize,
    pub active: bool,
}

/// A previous/next control
#[derive(Clone, Debug, PartialEq)]
pub struct ControlView {
    pub direction: Direction,
    pub class: String,
    pub icon_class: String,
    /// Screen-reader label, `None` when disabled in the config
    pub label: Option<String>,
}

/// Everything the host needs to render the carousel
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselView {
    pub container_classes: ClassList,
    pub inner_class: String,
    pub slides: Vec<SlideView>,
    pub indicators_class: String,
    /// Empty when indicators are disabled
    pub indicators: Vec<IndicatorView>,
    pub prev_control: Option<ControlView>,
    pub next_control: Option<ControlView>,
}

impl CarouselView {
    /// The slide marked active, if any
    pub fn active_slide(&self) -> Option<&SlideView> {
        self.slides.iter().find(|slide| slide.active)
    }
}
