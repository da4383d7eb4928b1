//! Carousel configuration
//!
//! Built fluently in code or loaded from TOML:
//!
//! ```toml
//! wrap = false
//! fade = true
//! interval_ms = 3000       # 0 disables autoplay
//! pause_on_hover = true
//! class_prefix = "carousel"
//! prev_label = ""           # empty hides the label
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Horizontal travel in pixels before a touch gesture counts as a swipe
pub const SWIPE_THRESHOLD: f32 = 40.0;

/// Carousel configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Animate transitions between slides
    pub slide: bool,
    /// Cross fade slides instead of sliding them
    pub fade: bool,
    /// Loop back to the start after the last slide (and to the end before the first)
    pub wrap: bool,
    /// Show slide position indicators
    pub indicators: bool,
    /// Delay between automatic advances. `None` or 0 disables autoplay.
    #[serde(with = "disabled_as_zero")]
    pub interval_ms: Option<u64>,
    /// Show previous/next controls
    pub controls: bool,
    /// Pause autoplay while the pointer is over the carousel
    pub pause_on_hover: bool,
    /// Arrow-key navigation
    pub keyboard: bool,
    /// Swipe navigation on touch screens
    pub touch: bool,
    /// Starting slide when the index is owned by the carousel
    pub default_active_index: usize,
    /// Prefix for all generated class names
    pub class_prefix: String,
    /// Label for the previous control, `None` hides it from assistive output
    #[serde(with = "hidden_as_empty")]
    pub prev_label: Option<String>,
    /// Label for the next control
    #[serde(with = "hidden_as_empty")]
    pub next_label: Option<String>,
    /// Settle a transition after this long even if no transition-end arrives
    pub transition_fallback_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slide: true,
            fade: false,
            wrap: true,
            indicators: true,
            interval_ms: Some(1000),
            controls: true,
            pause_on_hover: true,
            keyboard: true,
            touch: true,
            default_active_index: 0,
            class_prefix: "carousel".to_string(),
            prev_label: Some("Previous".to_string()),
            next_label: Some("Next".to_string()),
            transition_fallback_ms: 650,
        }
    }
}

impl CarouselConfig {
    /// Create a new carousel config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("loading carousel config from {}", path.display());
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check option values the carousel cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.class_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "class_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.class_prefix.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                field: "class_prefix",
                reason: format!("`{}` contains whitespace", self.class_prefix),
            });
        }
        if self.transition_fallback_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "transition_fallback_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Autoplay period, `None` when autoplay is disabled
    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Fallback delay for transitions whose end is never signalled
    pub fn transition_fallback(&self) -> Duration {
        Duration::from_millis(self.transition_fallback_ms)
    }

    /// Enable or disable animated transitions
    pub fn slide(mut self, slide: bool) -> Self {
        self.slide = slide;
        self
    }

    /// Cross fade instead of slide
    pub fn fade(mut self, fade: bool) -> Self {
        self.fade = fade;
        self
    }

    /// Enable or disable wraparound
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Show or hide indicators
    pub fn indicators(mut self, indicators: bool) -> Self {
        self.indicators = indicators;
        self
    }

    /// Set the autoplay period in milliseconds, 0 disables autoplay
    pub fn interval_ms(mut self, interval: u64) -> Self {
        self.interval_ms = Some(interval).filter(|ms| *ms > 0);
        self
    }

    /// Disable autoplay
    pub fn no_autoplay(mut self) -> Self {
        self.interval_ms = None;
        self
    }

    /// Show or hide controls
    pub fn controls(mut self, controls: bool) -> Self {
        self.controls = controls;
        self
    }

    /// Pause autoplay on hover
    pub fn pause_on_hover(mut self, pause: bool) -> Self {
        self.pause_on_hover = pause;
        self
    }

    /// Enable or disable arrow-key navigation
    pub fn keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Enable or disable swipe navigation
    pub fn touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    /// Set the starting slide for carousels that own their index
    pub fn default_active_index(mut self, index: usize) -> Self {
        self.default_active_index = index;
        self
    }

    /// Set the class name prefix
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Set the previous control label
    pub fn prev_label(mut self, label: Option<String>) -> Self {
        self.prev_label = label.filter(|label| !label.is_empty());
        self
    }

    /// Set the next control label
    pub fn next_label(mut self, label: Option<String>) -> Self {
        self.next_label = label.filter(|label| !label.is_empty());
        self
    }

    /// Set the transition fallback in milliseconds
    pub fn transition_fallback_ms(mut self, ms: u64) -> Self {
        self.transition_fallback_ms = ms;
        self
    }
}

/// TOML has no null: a disabled interval is written as 0
mod disabled_as_zero {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<u64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.unwrap_or(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        Ok(Some(u64::deserialize(deserializer)?).filter(|ms| *ms > 0))
    }
}

/// A hidden label is written as the empty string
mod hidden_as_empty {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Some(String::deserialize(deserializer)?).filter(|label| !label.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert!(config.slide);
        assert!(!config.fade);
        assert!(config.wrap);
        assert_eq!(config.autoplay_interval(), Some(Duration::from_millis(1000)));
        assert_eq!(config.class_prefix, "carousel");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = CarouselConfig::from_toml_str(
            r#"
            wrap = false
            fade = true
            interval_ms = 2500
            prev_label = "Back"
            "#,
        )
        .unwrap();

        assert!(!config.wrap);
        assert!(config.fade);
        assert_eq!(config.interval_ms, Some(2500));
        assert_eq!(config.prev_label.as_deref(), Some("Back"));
        // untouched fields keep their defaults
        assert!(config.keyboard);
        assert_eq!(config.next_label.as_deref(), Some("Next"));
    }

    #[test]
    fn test_zero_interval_disables_autoplay() {
        let config = CarouselConfig::from_toml_str("interval_ms = 0").unwrap();
        assert_eq!(config.interval_ms, None);
        assert_eq!(config.autoplay_interval(), None);
        assert_eq!(CarouselConfig::new().interval_ms(0).interval_ms, None);
        assert_eq!(CarouselConfig::new().no_autoplay().autoplay_interval(), None);
    }

    #[test]
    fn test_invalid_values() {
        let err = CarouselConfig::from_toml_str("class_prefix = \"\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "class_prefix",
                ..
            }
        ));

        let err = CarouselConfig::from_toml_str("transition_fallback_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "transition_fallback_ms",
                ..
            }
        ));

        let err = CarouselConfig::from_toml_str("wrap = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_roundtrip_of_custom_config() {
        let config = CarouselConfig::new()
            .wrap(false)
            .interval_ms(750)
            .class_prefix("slider");
        let text = config.to_toml_string().unwrap();
        assert_eq!(CarouselConfig::from_toml_str(&text).unwrap(), config);

        let disabled = CarouselConfig::new()
            .no_autoplay()
            .prev_label(None)
            .next_label(Some("Forward".to_string()));
        let text = disabled.to_toml_string().unwrap();
        assert!(text.contains("interval_ms = 0"));
        assert!(text.contains("prev_label = \"\""));
        let reloaded = CarouselConfig::from_toml_str(&text).unwrap();
        assert_eq!(reloaded.interval_ms, None);
        assert_eq!(reloaded.prev_label, None);
        assert_eq!(reloaded, disabled);
    }

    #[test]
    fn test_empty_label_hides_it() {
        let config = CarouselConfig::from_toml_str("next_label = \"\"").unwrap();
        assert_eq!(config.next_label, None);
        assert_eq!(config.prev_label.as_deref(), Some("Previous"));
    }
}
