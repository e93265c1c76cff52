/// Runtime state owned by the sequencer.
///
/// `active_index` is `None` until the first activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SequencerState {
    pub(crate) active_index: Option<usize>,
    pub(crate) is_transitioning: bool,
}

/// Read-only view of the sequencer handed to observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SequencerSnapshot {
    /// Active chapter, `None` before the first activation.
    pub active_index: Option<usize>,
    /// Whether a transition is in flight.
    pub is_transitioning: bool,
    /// Number of chapters in the deck.
    pub chapter_count: usize,
}

/// Identifier returned by [`ChapterSequencer::register_on_change`](crate::ChapterSequencer::register_on_change).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// What a navigation command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum GotoOutcome {
    /// A transition to `index` started.
    Started {
        /// Normalized target index.
        index: usize,
        /// Direction of travel.
        direction: crate::Direction,
    },
    /// Dropped because a transition was already in flight.
    Ignored,
    /// The requested chapter is already active.
    Unchanged,
    /// The sequencer has been torn down.
    Inactive,
}

impl GotoOutcome {
    /// Whether a transition started.
    pub fn started(self) -> bool {
        matches!(self, Self::Started { .. })
    }
}
