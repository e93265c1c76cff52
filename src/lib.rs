//! chapterflow sequences full-viewport "chapters" of a storytelling page.
//!
//! The crate owns the state machine that decides which chapter is active, builds a declarative
//! [`Timeline`] for every transition and plays it frame by frame into a [`Stage`] of element
//! property values. Rendering is left to the host: it reads the stage, feeds raw input events
//! and calls `advance(dt)` from its frame callback.
//!
//! # Flow
//!
//! 1. **Load**: a [`ChapterDeck`] from JSON (or [`ChapterDeck::heritage`]).
//! 2. **Mount**: [`ChapterView::mount`] attaches gesture input and activates chapter 0.
//! 3. **Drive**: [`ChapterView::handle_input`], [`ChapterView::click_tick`] and
//!    [`ChapterView::advance`]; at most one transition is in flight and extra requests are
//!    dropped.
//! 4. **Teardown**: cancels the running timeline, detaches input and silences observers.
//!
//! Secondary sections use the scroll-scrubbed presets in [`reveal`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod chapters;
mod config;
mod foundation;
mod indicator;
mod input;
mod sequencer;
mod stage;
mod text;
mod view;

/// Scroll-scrubbed reveal presets and scroll-position mapping.
pub mod reveal;

pub use crate::foundation::core::{Direction, Fps, wrap_index};
pub use crate::foundation::error::{ChapterflowError, ChapterflowResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::player::{PlayState, Tick, TimelinePlayer};
pub use crate::animation::timeline::{
    Cue, PropertySet, ResolvedTimeline, Stagger, StaggerFrom, Step, Timeline, Track, Tween,
    TweenDefaults, props,
};
pub use crate::chapters::model::{
    Chapter, ChapterDeck, Logo, LogoAlign, MediaItem, MediaLayout, MediaPosition, is_dark_style,
};
pub use crate::config::SequencerConfig;
pub use crate::indicator::{
    DARK_ON_LIGHT, IndicatorView, LIGHT_ON_DARK, Palette, RULER_REM_PER_GAP, Rgba8, TickMark,
    indicator_motion, position_percent,
};
pub use crate::input::gesture::{
    Disposer, GestureNormalizer, GestureSignal, GestureSource, RawInput,
};
pub use crate::sequencer::chapter_sequencer::ChapterSequencer;
pub use crate::sequencer::state::{GotoOutcome, ObserverId, SequencerSnapshot};
pub use crate::sequencer::transition::{build_transition, content_slots};
pub use crate::stage::{ContentSlot, ElementState, Property, Stage, Target};
pub use crate::text::{CharUnit, TextSplit};
pub use crate::view::ChapterView;
