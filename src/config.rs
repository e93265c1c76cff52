use std::{fs::File, io::BufReader, path::Path};

use crate::{
    animation::ease::Ease,
    foundation::error::{ChapterflowError, ChapterflowResult},
};

/// Tunables of the chapter transition and input handling.
///
/// Every field has a default, so a config file only needs the values it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Default tween duration of a transition (panel wrappers and backgrounds).
    pub transition_duration: f64,
    /// Default ease of a transition.
    pub transition_ease: Ease,
    /// How far (in % of the viewport) background layers travel on enter/exit.
    pub background_shift_percent: f64,
    /// Start offset of the title character reveal.
    pub title_offset: f64,
    /// Duration of each title character tween.
    pub title_duration: f64,
    /// Ease of the title character tweens.
    pub title_ease: Ease,
    /// Vertical start offset of title characters in % of their height.
    pub title_shift_percent: f64,
    /// Seconds between character starts (random order).
    pub title_stagger: f64,
    /// Start offset of the content element reveal.
    pub content_offset: f64,
    /// Duration of each content element tween.
    pub content_duration: f64,
    /// Vertical start offset of content elements in pixels.
    pub content_shift_px: f64,
    /// Seconds between content element starts (document order).
    pub content_stagger: f64,
    /// Minimum accumulated gesture delta, in pixels, before a gesture counts.
    pub gesture_tolerance: f64,
    /// Multiplier applied to wheel deltas; negative inverts the wheel.
    pub wheel_speed: f64,
    /// Seed for random stagger orders.
    pub seed: u64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            transition_duration: 1.25,
            transition_ease: Ease::InOutQuad,
            background_shift_percent: 15.0,
            title_offset: 0.2,
            title_duration: 1.0,
            title_ease: Ease::OutCubic,
            title_shift_percent: 150.0,
            title_stagger: 0.02,
            content_offset: 0.4,
            content_duration: 0.8,
            content_shift_px: 50.0,
            content_stagger: 0.1,
            gesture_tolerance: 10.0,
            wheel_speed: -1.0,
            seed: 0x0C4A_F7E5,
        }
    }
}

impl SequencerConfig {
    /// Check that every time value is finite and non-negative.
    pub fn validate(&self) -> ChapterflowResult<()> {
        let times = [
            ("transition_duration", self.transition_duration),
            ("title_offset", self.title_offset),
            ("title_duration", self.title_duration),
            ("title_stagger", self.title_stagger),
            ("content_offset", self.content_offset),
            ("content_duration", self.content_duration),
            ("content_stagger", self.content_stagger),
            ("gesture_tolerance", self.gesture_tolerance),
        ];
        for (name, value) in times {
            if !value.is_finite() || value < 0.0 {
                return Err(ChapterflowError::validation(format!(
                    "{name} must be finite and >= 0 (got {value})"
                )));
            }
        }
        for (name, value) in [
            ("background_shift_percent", self.background_shift_percent),
            ("title_shift_percent", self.title_shift_percent),
            ("content_shift_px", self.content_shift_px),
            ("wheel_speed", self.wheel_speed),
        ] {
            if !value.is_finite() {
                return Err(ChapterflowError::validation(format!(
                    "{name} must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a config from JSON.
    pub fn from_json_str(json: &str) -> ChapterflowResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn from_path(path: &Path) -> ChapterflowResult<Self> {
        let f = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(f))?;
        config.validate()?;
        Ok(config)
    }
}
