use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::domain::core::Rect;
use crate::domain::grid::GridError;

/// Correction added to a maximized probe's outer geometry
///
/// Maximized windows report their frame, title bar and sometimes invisible
/// resize borders; the right values depend on the OS and theme, so they
/// are configured rather than derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BorderAdjust {
    pub dx: i32,
    pub dy: i32,
    pub dw: i32,
    pub dh: i32,
}

impl BorderAdjust {
    pub const NONE: BorderAdjust = BorderAdjust::new(0, 0, 0, 0);

    pub const fn new(dx: i32, dy: i32, dw: i32, dh: i32) -> Self {
        Self { dx, dy, dw, dh }
    }

    /// Adds the correction to `rect`
    ///
    /// Fails with `InvalidRect` if any corrected field leaves the `i32` range.
    pub fn apply(&self, rect: Rect) -> Result<Rect, GridError> {
        let overflow = || GridError::InvalidRect { rect };
        Ok(Rect::new(
            rect.x.checked_add(self.dx).ok_or_else(overflow)?,
            rect.y.checked_add(self.dy).ok_or_else(overflow)?,
            rect.w.checked_add(self.dw).ok_or_else(overflow)?,
            rect.h.checked_add(self.dh).ok_or_else(overflow)?,
        ))
    }
}

impl Default for BorderAdjust {
    /// Title bar plus bottom panel of a typical desktop theme
    fn default() -> Self {
        Self::new(0, 23, 0, -63)
    }
}

impl From<[i32; 4]> for BorderAdjust {
    fn from([dx, dy, dw, dh]: [i32; 4]) -> Self {
        Self::new(dx, dy, dw, dh)
    }
}

impl From<BorderAdjust> for [i32; 4] {
    fn from(adjust: BorderAdjust) -> Self {
        [adjust.dx, adjust.dy, adjust.dw, adjust.dh]
    }
}

/// Settings read from `config.toml`
///
/// ```toml
/// # Skip measuring and use this screen area: [x, y, width, height]
/// screen = [0, 23, 1920, 1017]
/// auto_measure = true
/// settle_delay_ms = 100
/// border_adjust = [0, 23, 0, -63]
/// probe_label = "Test Figure"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub screen: Option<[i32; 4]>,
    pub auto_measure: bool,
    pub settle_delay_ms: u64,
    pub border_adjust: BorderAdjust,
    pub probe_label: String,
}

impl Settings {
    pub const MAX_SETTLE_DELAY_MS: u64 = 10_000;

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn screen_rect(&self) -> Option<Rect> {
        self.screen.map(Rect::from)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(rect) = self.screen_rect() {
            rect.validate_screen()
                .map_err(|e| ConfigError::Invalid(format!("screen: {e}")))?;
        }

        if self.settle_delay_ms > Self::MAX_SETTLE_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "settle_delay_ms: {} exceeds {}",
                self.settle_delay_ms,
                Self::MAX_SETTLE_DELAY_MS
            )));
        }

        if self.probe_label.trim().is_empty() {
            return Err(ConfigError::Invalid("probe_label: must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen: None,
            auto_measure: true,
            settle_delay_ms: 100,
            border_adjust: BorderAdjust::default(),
            probe_label: "Test Figure".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.validate().is_ok());
        assert_eq!(settings.settle_delay(), Duration::from_millis(100));
    }

    #[test]
    fn parses_full_file() {
        let settings = Settings::from_toml_str(
            r#"
            screen = [1920, 0, 1920, 1080]
            auto_measure = false
            settle_delay_ms = 250
            border_adjust = [8, 8, -16, -16]
            probe_label = "Move me"
            "#,
        )
        .unwrap();

        assert_eq!(settings.screen_rect(), Some(Rect::new(1920, 0, 1920, 1080)));
        assert!(!settings.auto_measure);
        assert_eq!(settings.settle_delay_ms, 250);
        assert_eq!(settings.border_adjust, BorderAdjust::new(8, 8, -16, -16));
        assert_eq!(settings.probe_label, "Move me");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml_str("delay = 3").is_err());
    }

    #[test]
    fn validation_catches_bad_values() {
        let settings = Settings {
            screen: Some([0, 0, 0, 1080]),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));

        let settings = Settings {
            settle_delay_ms: 60_000,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn border_adjust_applies_to_each_field() {
        let raw = Rect::new(-8, -8, 1936, 1056);
        let adjusted = BorderAdjust::new(8, 8, -16, -16).apply(raw).unwrap();
        assert_eq!(adjusted, Rect::new(0, 0, 1920, 1040));
        assert_eq!(BorderAdjust::NONE.apply(raw).unwrap(), raw);
    }

    #[test]
    fn border_adjust_overflow_is_an_error() {
        let raw = Rect::new(i32::MAX - 5, 0, 100, 100);
        assert!(matches!(
            BorderAdjust::new(10, 0, 0, 0).apply(raw),
            Err(GridError::InvalidRect { .. })
        ));
        assert!(matches!(
            BorderAdjust::new(0, 0, 0, i32::MIN).apply(Rect::new(0, 0, 100, -1)),
            Err(GridError::InvalidRect { .. })
        ));
    }
}
