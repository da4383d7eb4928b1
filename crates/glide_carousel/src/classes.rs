//! Presentation class names
//!
//! The carousel never renders; it tells the host which classes every element
//! carries. All names derive from one prefix (`carousel` by default):
//!
//! | Element | Classes |
//! |---|---|
//! | container | `carousel`, `slide` (animated), `carousel-fade` (cross fade) |
//! | slide | `carousel-item` plus `active` / order / directional classes |
//! | incoming slide, travelling next | `carousel-item-next`, then `carousel-item-left` |
//! | incoming slide, travelling prev | `carousel-item-prev`, then `carousel-item-right` |

use smallvec::SmallVec;

use crate::sequencer::Direction;

/// Classes applied to one element
pub type ClassList = SmallVec<[String; 3]>;

/// Join a class list into a single space-separated attribute value
pub fn join(classes: &ClassList) -> String {
    classes.join(" ")
}

pub const ACTIVE: &str = "active";

/// Generates class names for a prefix
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    prefix: String,
}

impl ClassNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Base class of every slide
    pub fn item(&self) -> String {
        format!("{}-item", self.prefix)
    }

    /// Class placing the incoming slide next to the outgoing one
    pub fn order(&self, direction: Direction) -> String {
        match direction {
            Direction::Next => format!("{}-item-next", self.prefix),
            Direction::Prev => format!("{}-item-prev", self.prefix),
        }
    }

    /// Class that starts the slide movement
    pub fn directional(&self, direction: Direction) -> String {
        match direction {
            Direction::Next => format!("{}-item-left", self.prefix),
            Direction::Prev => format!("{}-item-right", self.prefix),
        }
    }

    /// Classes of the outer container
    pub fn container(&self, animated: bool, fade: bool) -> ClassList {
        let mut classes = ClassList::new();
        classes.push(self.prefix.clone());
        if animated {
            classes.push("slide".to_string());
        }
        if fade {
            classes.push(format!("{}-fade", self.prefix));
        }
        classes
    }

    /// Class of the element wrapping the slides
    pub fn inner(&self) -> String {
        format!("{}-inner", self.prefix)
    }

    /// Class of the indicator list
    pub fn indicators(&self) -> String {
        format!("{}-indicators", self.prefix)
    }

    /// Class of a previous/next control
    pub fn control(&self, direction: Direction) -> String {
        match direction {
            Direction::Next => format!("{}-control-next", self.prefix),
            Direction::Prev => format!("{}-control-prev", self.prefix),
        }
    }

    /// Class of the icon inside a previous/next control
    pub fn control_icon(&self, direction: Direction) -> String {
        format!("{}-icon", self.control(direction))
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::new("carousel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_pairs() {
        let names = ClassNames::default();
        assert_eq!(names.order(Direction::Next), "carousel-item-next");
        assert_eq!(names.directional(Direction::Next), "carousel-item-left");
        assert_eq!(names.order(Direction::Prev), "carousel-item-prev");
        assert_eq!(names.directional(Direction::Prev), "carousel-item-right");
    }

    #[test]
    fn test_container_classes() {
        let names = ClassNames::new("hero");
        assert_eq!(join(&names.container(true, false)), "hero slide");
        assert_eq!(join(&names.container(true, true)), "hero slide hero-fade");
        assert_eq!(join(&names.container(false, false)), "hero");
        assert_eq!(names.control_icon(Direction::Prev), "hero-control-prev-icon");
    }
}
