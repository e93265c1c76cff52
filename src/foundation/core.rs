use crate::foundation::error::{ChapterflowError, ChapterflowResult};

/// Direction of travel through the chapter sequence.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Advancing to a later index (scroll down, swipe up, "next").
    #[default]
    Forward,
    /// Retreating to an earlier index.
    Backward,
}

impl Direction {
    /// `+1.0` for [`Direction::Forward`], `-1.0` for [`Direction::Backward`].
    ///
    /// Every positional offset of a transition is multiplied by this factor.
    pub fn factor(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Direction implied by moving from `from` to `to`; equal indices count as forward.
    pub fn between(from: usize, to: usize) -> Self {
        if to < from {
            Self::Backward
        } else {
            Self::Forward
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Wrap `index` into `[0, len)` cyclically (`-1 -> len-1`, `len -> 0`).
///
/// `len == 0` maps everything to 0.
pub fn wrap_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as isize) as usize
}

/// Frames-per-second represented as a rational `num/den`.
///
/// Used by drivers that advance the sequencer from a fixed frame clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ChapterflowResult<Self> {
        if den == 0 {
            return Err(ChapterflowError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ChapterflowError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Number of whole frames needed to cover `secs`, rounding up.
    pub fn frames_for_secs(self, secs: f64) -> u64 {
        let frames = secs.max(0.0) / self.frame_duration_secs();
        // Tolerate float noise so 1.25 s at 60 fps is 75 frames, not 76.
        (frames - 1e-9).ceil().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
