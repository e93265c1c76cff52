//! Scroll-scrubbed reveals for the page's secondary sections.
//!
//! Each preset pairs a [`ScrollTrigger`] with a [`Timeline`]. A [`ScrubbedReveal`] maps the
//! section's scroll position to a play-head through a lagging [`Scrub`] and seeks the player,
//! so the animation follows the scrollbar instead of the clock.

use crate::{
    animation::{
        ease::Ease,
        player::TimelinePlayer,
        timeline::{Timeline, Tween, TweenDefaults, props},
    },
    foundation::error::{ChapterflowError, ChapterflowResult},
    stage::{Property, Stage, Target},
};

/// Number of blocks, layers or parts in every preset.
pub const REVEAL_PARTS: usize = 3;

/// Maps a section's top edge, relative to the viewport, to a progress in `[0, 1]`.
///
/// `start` and `end` are viewport-height fractions: "top 80%" is `0.8`. Progress is 0 while
/// the section top is below `start` and 1 once it has passed `end`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollTrigger {
    /// Viewport fraction at which the reveal begins.
    pub start: f64,
    /// Viewport fraction at which the reveal ends.
    pub end: f64,
}

impl ScrollTrigger {
    /// Progress for a section whose top edge is `top_px` below the viewport top.
    ///
    /// Non-finite positions map to 0.
    pub fn progress(&self, top_px: f64, viewport_height: f64) -> f64 {
        if !top_px.is_finite() || !viewport_height.is_finite() {
            return 0.0;
        }
        let start = self.start * viewport_height;
        let end = self.end * viewport_height;
        let span = start - end;
        if span.abs() <= f64::EPSILON {
            return if top_px <= end { 1.0 } else { 0.0 };
        }
        ((start - top_px) / span).clamp(0.0, 1.0)
    }
}

/// Smooths a target progress with exponential catch-up.
///
/// After `lag` seconds the value is within 2% of a fixed target. A lag of 0 snaps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrub {
    lag: f64,
    current: f64,
}

impl Default for Scrub {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Scrub {
    /// Scrub with the given lag in seconds.
    pub fn new(lag: f64) -> Self {
        Self {
            lag: lag.max(0.0),
            current: 0.0,
        }
    }

    /// Smoothed progress.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Move toward `target` over a frame of `dt` seconds and return the new value.
    ///
    /// A non-finite `target` or `dt` leaves the value unchanged.
    pub fn update(&mut self, target: f64, dt: f64) -> f64 {
        if !target.is_finite() || !dt.is_finite() {
            return self.current;
        }
        let target = target.clamp(0.0, 1.0);
        if self.lag <= 0.0 {
            self.current = target;
            return target;
        }
        // time constant lag/4: e^-4 < 0.02
        let k = 1.0 - (-4.0 * dt.max(0.0) / self.lag).exp();
        self.current += (target - self.current) * k;
        if (target - self.current).abs() < 1e-4 {
            self.current = target;
        }
        self.current
    }
}

/// Page-level scroll progress, clamped to `[0, 1]`.
///
/// `doc_height` is the scrollable distance (document height minus viewport height).
pub fn scroll_progress(scroll_top: f64, doc_height: f64) -> f64 {
    if doc_height <= 0.0 || !doc_height.is_finite() || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / doc_height).clamp(0.0, 1.0)
}

/// A reveal timeline and the scroll range that drives it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealPreset {
    /// Preset name.
    pub name: String,
    /// Scroll range.
    pub trigger: ScrollTrigger,
    /// Animation sampled by scroll progress.
    pub timeline: Timeline,
}

/// Start offsets of `count` tweens of `duration` where each starts `overlap` seconds before the
/// previous one ends.
fn overlapping_offsets(count: usize, duration: f64, overlap: f64) -> impl Iterator<Item = f64> {
    (0..count).map(move |i| i as f64 * (duration - overlap))
}

/// Three cover blocks slide down off the text, 0.1 s apart.
pub fn text_blocks() -> RevealPreset {
    let mut timeline = Timeline::new(TweenDefaults {
        duration: 1.2,
        ease: Ease::OutQuad,
    });
    for i in 0..REVEAL_PARTS {
        timeline.tween(
            Tween::from_to(
                [Target::RevealPart(i)],
                props([(Property::YPercent, 0.0)]),
                props([(Property::YPercent, 100.0)]),
            )
            .at(i as f64 * 0.1),
        );
    }
    RevealPreset {
        name: "text_blocks".to_owned(),
        trigger: ScrollTrigger {
            start: 0.8,
            end: 0.2,
        },
        timeline,
    }
}

/// Three layers open upwards from left to right.
pub fn layer_panels() -> RevealPreset {
    let mut timeline = Timeline::new(TweenDefaults {
        duration: 1.0,
        ease: Ease::InOutCubic,
    });
    for (i, offset) in overlapping_offsets(REVEAL_PARTS, 1.0, 0.6).enumerate() {
        timeline.tween(
            Tween::from_to(
                [Target::RevealPart(i)],
                props([(Property::YPercent, 0.0)]),
                props([(Property::YPercent, -100.0)]),
            )
            .at(offset),
        );
    }
    RevealPreset {
        name: "layer_panels".to_owned(),
        trigger: ScrollTrigger {
            start: 0.5,
            end: 0.0,
        },
        timeline,
    }
}

/// Three gradient parts unclip top to bottom, then the content fades up.
pub fn content_reveal() -> RevealPreset {
    let mut timeline = Timeline::new(TweenDefaults {
        duration: 1.0,
        ease: Ease::InOutCubic,
    });
    for (i, offset) in overlapping_offsets(REVEAL_PARTS, 1.0, 0.6).enumerate() {
        timeline.tween(
            Tween::from_to(
                [Target::RevealPart(i)],
                props([(Property::ClipBottomPercent, 100.0)]),
                props([(Property::ClipBottomPercent, 0.0)]),
            )
            .at(offset),
        );
    }
    let content_at = timeline.end() - 0.4;
    timeline.tween(
        Tween::from_to(
            [Target::RevealContent],
            props([(Property::Opacity, 0.0), (Property::YPx, 50.0)]),
            props([(Property::Opacity, 1.0), (Property::YPx, 0.0)]),
        )
        .at(content_at)
        .duration(0.8)
        .ease(Ease::OutCubic),
    );
    RevealPreset {
        name: "content_reveal".to_owned(),
        trigger: ScrollTrigger {
            start: 0.8,
            end: 0.2,
        },
        timeline,
    }
}

/// Look up a preset by name.
pub fn preset(name: &str) -> ChapterflowResult<RevealPreset> {
    match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "text_blocks" | "text" => Ok(text_blocks()),
        "layer_panels" | "layers" => Ok(layer_panels()),
        "content_reveal" | "content" => Ok(content_reveal()),
        other => Err(ChapterflowError::validation(format!(
            "unknown reveal preset '{other}'"
        ))),
    }
}

/// A preset bound to a player and a scrub.
#[derive(Clone, Debug)]
pub struct ScrubbedReveal {
    trigger: ScrollTrigger,
    scrub: Scrub,
    player: TimelinePlayer,
}

impl ScrubbedReveal {
    /// Resolve `preset` and render its start state into `stage`.
    pub fn new(preset: &RevealPreset, scrub: Scrub, stage: &mut Stage) -> ChapterflowResult<Self> {
        let resolved = preset.timeline.resolve(0)?;
        Ok(Self {
            trigger: preset.trigger,
            scrub,
            player: TimelinePlayer::start(resolved, stage),
        })
    }

    /// Update from the section's current position and render. Returns the smoothed progress.
    pub fn update(&mut self, top_px: f64, viewport_height: f64, dt: f64, stage: &mut Stage) -> f64 {
        let target = self.trigger.progress(top_px, viewport_height);
        let progress = self.scrub.update(target, dt);
        self.player.seek(progress * self.player.duration(), stage);
        progress
    }

    /// Smoothed progress.
    pub fn progress(&self) -> f64 {
        self.scrub.current()
    }
}

#[cfg(test)]
#[path = "../tests/unit/reveal.rs"]
mod tests;
