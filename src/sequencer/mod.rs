pub(crate) mod chapter_sequencer;
pub(crate) mod state;
pub(crate) mod transition;
