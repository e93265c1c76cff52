//! Per-element property store that timelines write into and the view layer reads from.
//!
//! The stage is the only place where animated values live. A renderer maps each [`Target`]
//! to its own element handle and copies the [`ElementState`] over on every frame.

use std::collections::BTreeMap;

/// Which piece of a chapter's content block an element is.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentSlot {
    /// Small year label above the title.
    Year,
    /// Description paragraph.
    Description,
    /// Media grid (only present when the chapter has media).
    Media,
}

/// Addressable animated element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Full-viewport panel of a chapter.
    Section(usize),
    /// Outer clipping wrapper of a chapter panel.
    OuterWrapper(usize),
    /// Inner clipping wrapper, moves against the outer one.
    InnerWrapper(usize),
    /// Background colour layer carrying the chapter content.
    Background(usize),
    /// One character of a chapter title.
    TitleChar {
        /// Chapter index.
        chapter: usize,
        /// Character index within the split title.
        char_index: usize,
    },
    /// A content element of a chapter.
    Content {
        /// Chapter index.
        chapter: usize,
        /// Which content element.
        slot: ContentSlot,
    },
    /// Moving mark on the ruler indicator.
    IndicatorMark,
    /// Year badge next to the ruler.
    YearBadge,
    /// Numbered element of a scroll reveal preset (blocks, layers, parts).
    RevealPart(usize),
    /// Text content revealed after the parts of a reveal preset.
    RevealContent,
}

/// Animatable property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Vertical translation relative to the element's own height.
    YPercent,
    /// Vertical translation in pixels.
    YPx,
    /// Opacity that also toggles visibility (hidden exactly at 0).
    AutoAlpha,
    /// Plain opacity.
    Opacity,
    /// Uniform scale.
    Scale,
    /// `top` offset as a percentage of the containing axis.
    TopPercent,
    /// Bottom clip inset as a percentage (100 = fully clipped).
    ClipBottomPercent,
    /// Stacking order; values are rounded.
    ZIndex,
}

/// Current values of every property of one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ElementState {
    /// See [`Property::YPercent`].
    pub y_percent: f64,
    /// See [`Property::YPx`].
    pub y_px: f64,
    /// Effective opacity.
    pub opacity: f64,
    /// Visibility flag driven by [`Property::AutoAlpha`].
    pub visible: bool,
    /// See [`Property::Scale`].
    pub scale: f64,
    /// See [`Property::TopPercent`].
    pub top_percent: f64,
    /// See [`Property::ClipBottomPercent`].
    pub clip_bottom_percent: f64,
    /// See [`Property::ZIndex`].
    pub z_index: i32,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            y_percent: 0.0,
            y_px: 0.0,
            opacity: 1.0,
            visible: true,
            scale: 1.0,
            top_percent: 0.0,
            clip_bottom_percent: 0.0,
            z_index: 0,
        }
    }
}

impl ElementState {
    /// Read a property as a float.
    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::YPercent => self.y_percent,
            Property::YPx => self.y_px,
            Property::AutoAlpha | Property::Opacity => self.opacity,
            Property::Scale => self.scale,
            Property::TopPercent => self.top_percent,
            Property::ClipBottomPercent => self.clip_bottom_percent,
            Property::ZIndex => f64::from(self.z_index),
        }
    }

    /// Write a property.
    pub fn set(&mut self, property: Property, value: f64) {
        match property {
            Property::YPercent => self.y_percent = value,
            Property::YPx => self.y_px = value,
            Property::AutoAlpha => {
                self.opacity = value;
                self.visible = value > 0.0;
            }
            Property::Opacity => self.opacity = value,
            Property::Scale => self.scale = value,
            Property::TopPercent => self.top_percent = value,
            Property::ClipBottomPercent => self.clip_bottom_percent = value,
            Property::ZIndex => self.z_index = value.round() as i32,
        }
    }
}

/// Map of element states; untouched elements read as [`ElementState::default`].
#[derive(Clone, Debug, Default)]
pub struct Stage {
    elements: BTreeMap<Target, ElementState>,
}

impl Stage {
    /// Empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `target` (default when never written).
    pub fn get(&self, target: Target) -> ElementState {
        self.elements.get(&target).copied().unwrap_or_default()
    }

    /// Read one property of `target`.
    pub fn value(&self, target: Target, property: Property) -> f64 {
        self.get(target).get(property)
    }

    /// Write one property of `target`.
    pub fn apply(&mut self, target: Target, property: Property, value: f64) {
        self.elements
            .entry(target)
            .or_default()
            .set(property, value);
    }

    /// Whether `target` is currently visible.
    pub fn is_visible(&self, target: Target) -> bool {
        self.get(target).visible
    }

    /// Indices of chapter sections currently visible, ascending.
    pub fn visible_sections(&self) -> Vec<usize> {
        self.elements
            .iter()
            .filter_map(|(target, state)| match target {
                Target::Section(i) if state.visible => Some(*i),
                _ => None,
            })
            .collect()
    }

    /// Drop every element whose target satisfies `pred`.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&Target) -> bool) {
        self.elements.retain(|target, _| !pred(target));
    }

    /// Number of elements that have been written.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` when no element has been written.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
