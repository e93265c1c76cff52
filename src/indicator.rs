//! Ruler-timeline indicator: everything here is derived from the active index.

use crate::{
    animation::{
        ease::Ease,
        timeline::{Timeline, Tween, TweenDefaults, props},
    },
    chapters::model::{ChapterDeck, is_dark_style},
    stage::{Property, Target},
};

/// Straight-alpha RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    const fn gray(level: u8, a: u8) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
            a,
        }
    }
}

/// Colour scheme of the indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Palette {
    /// Year label and tick colour.
    pub foreground: Rgba8,
    /// Year badge fill.
    pub badge_fill: Rgba8,
    /// Year badge border and corner accents.
    pub badge_border: Rgba8,
    /// Vertical ruler line.
    pub ruler_line: Rgba8,
    /// Glow around the active tick.
    pub glow: Rgba8,
}

/// Light-on-dark scheme, used over dark backgrounds.
pub const LIGHT_ON_DARK: Palette = Palette {
    foreground: Rgba8::gray(255, 255),
    badge_fill: Rgba8::gray(255, 26),
    badge_border: Rgba8::gray(255, 51),
    ruler_line: Rgba8::gray(255, 77),
    glow: Rgba8::gray(255, 204),
};

/// Dark-on-light scheme, used over light backgrounds.
pub const DARK_ON_LIGHT: Palette = Palette {
    foreground: Rgba8::gray(0, 255),
    badge_fill: Rgba8::gray(0, 26),
    badge_border: Rgba8::gray(0, 51),
    ruler_line: Rgba8::gray(0, 77),
    glow: Rgba8::gray(0, 204),
};

/// Height of the ruler per chapter gap, in rem.
pub const RULER_REM_PER_GAP: f64 = 8.0;

/// Position of the indicator mark along the ruler, in percent.
///
/// `active / (count - 1) * 100`; 0 in the sentinel state or for decks of one chapter.
pub fn position_percent(active: Option<usize>, count: usize) -> f64 {
    match active {
        Some(i) if count > 1 => i as f64 / (count - 1) as f64 * 100.0,
        _ => 0.0,
    }
}

/// One clickable tick mark.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TickMark {
    /// Chapter index the tick selects.
    pub index: usize,
    /// Position along the ruler in percent.
    pub position_percent: f64,
    /// Whether this is the active chapter.
    pub active: bool,
    /// Tick width in px.
    pub width_px: f64,
    /// Tick thickness in px.
    pub height_px: f64,
    /// Tick opacity.
    pub opacity: f64,
}

/// Everything the indicator renders for one active index.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IndicatorView {
    /// Mark position in percent.
    pub position_percent: f64,
    /// Active chapter's year (empty before the first activation).
    pub label: String,
    /// Whether the active background is dark.
    pub dark_background: bool,
    /// Colour scheme picked from `dark_background`.
    pub palette: Palette,
    /// Tick marks, one per chapter.
    pub ticks: Vec<TickMark>,
    /// Total ruler height in rem.
    pub ruler_height_rem: f64,
    /// Whether the site navigation bar is shown (first chapter only).
    pub navbar_visible: bool,
}

impl IndicatorView {
    /// Derive the indicator for `active` over `deck`.
    pub fn derive(deck: &ChapterDeck, active: Option<usize>) -> Self {
        let count = deck.len();
        let current = active.and_then(|i| deck.get(i));
        // Before the first activation the page shows chapter 0's background.
        let background = current
            .or_else(|| deck.get(0))
            .map(|c| c.background_style.as_str())
            .unwrap_or_default();
        let dark_background = is_dark_style(background);

        let ticks = (0..count)
            .map(|index| {
                let is_active = active == Some(index);
                TickMark {
                    index,
                    position_percent: position_percent(Some(index), count),
                    active: is_active,
                    width_px: if is_active { 20.0 } else { 12.0 },
                    height_px: if is_active { 3.0 } else { 1.5 },
                    opacity: if is_active { 1.0 } else { 0.4 },
                }
            })
            .collect();

        Self {
            position_percent: position_percent(active, count),
            label: current.map(|c| c.year.clone()).unwrap_or_default(),
            dark_background,
            palette: if dark_background {
                LIGHT_ON_DARK
            } else {
                DARK_ON_LIGHT
            },
            ticks,
            ruler_height_rem: count.saturating_sub(1) as f64 * RULER_REM_PER_GAP,
            navbar_visible: active == Some(0),
        }
    }

    /// Chapter selected by a click at `position_percent` along the ruler (nearest tick).
    pub fn tick_at(&self, position_percent: f64) -> Option<usize> {
        self.ticks
            .iter()
            .min_by(|a, b| {
                let da = (a.position_percent - position_percent).abs();
                let db = (b.position_percent - position_percent).abs();
                da.total_cmp(&db)
            })
            .map(|t| t.index)
    }
}

/// Motion of the indicator when the active chapter changes: the mark glides to its new
/// position while the year badge pops in.
pub fn indicator_motion(target_percent: f64) -> Timeline {
    let mut tl = Timeline::new(TweenDefaults {
        duration: 0.7,
        ease: Ease::OutCubic,
    });
    tl.tween(Tween::to(
        [Target::IndicatorMark],
        props([(Property::TopPercent, target_percent)]),
    ));
    tl.tween(
        Tween::from_to(
            [Target::YearBadge],
            props([
                (Property::Opacity, 0.0),
                (Property::Scale, 0.8),
                (Property::YPx, 20.0),
            ]),
            props([
                (Property::Opacity, 1.0),
                (Property::Scale, 1.0),
                (Property::YPx, 0.0),
            ]),
        )
        .duration(0.5)
        .ease(Ease::BackOut { overshoot: 1.7 }),
    );
    tl
}

#[cfg(test)]
#[path = "../tests/unit/indicator.rs"]
mod tests;
