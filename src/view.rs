use crate::{
    animation::player::Tick,
    chapters::model::ChapterDeck,
    config::SequencerConfig,
    foundation::error::ChapterflowResult,
    indicator::IndicatorView,
    input::gesture::{Disposer, GestureSignal, GestureSource, RawInput},
    sequencer::{
        chapter_sequencer::ChapterSequencer,
        state::{GotoOutcome, SequencerSnapshot},
    },
    stage::Stage,
};

/// Mounted chapter page: routes input into the sequencer and drives its frames.
///
/// Mounting attaches the gesture listener and activates the first chapter. Teardown (explicit
/// or on drop) disposes the listener before tearing down the sequencer.
#[derive(Debug)]
pub struct ChapterView {
    sequencer: ChapterSequencer,
    gestures: GestureSource,
    listener: Option<Disposer>,
}

impl ChapterView {
    /// Mount over an already configured sequencer.
    ///
    /// Observers registered on `sequencer` beforehand see the initial activation.
    #[tracing::instrument(level = "debug", skip_all, fields(chapters = sequencer.deck().len()))]
    pub fn mount(mut sequencer: ChapterSequencer) -> Self {
        let config = sequencer.config();
        let mut gestures = GestureSource::new(config.gesture_tolerance, config.wheel_speed);
        let listener = gestures.attach();
        sequencer.start();
        Self {
            sequencer,
            gestures,
            listener: Some(listener),
        }
    }

    /// Build a sequencer for `deck` and mount it.
    pub fn mount_deck(deck: ChapterDeck, config: SequencerConfig) -> ChapterflowResult<Self> {
        Ok(Self::mount(ChapterSequencer::new(deck, config)?))
    }

    /// Feed one raw input event.
    ///
    /// Returns the navigation outcome when the event completed a gesture.
    pub fn handle_input(&mut self, input: RawInput) -> Option<GotoOutcome> {
        let signal = self.gestures.push(input)?;
        let outcome = match signal {
            GestureSignal::Forward => self.sequencer.forward(),
            GestureSignal::Backward => self.sequencer.backward(),
        };
        if outcome == GotoOutcome::Ignored {
            tracing::debug!(?signal, "gesture ignored during transition");
        }
        Some(outcome)
    }

    /// A tick on the indicator was clicked.
    pub fn click_tick(&mut self, index: usize) -> GotoOutcome {
        if !self.is_mounted() {
            return GotoOutcome::Inactive;
        }
        self.sequencer.select(index)
    }

    /// The ruler was clicked at `position_percent`; selects the nearest tick.
    pub fn click_ruler(&mut self, position_percent: f64) -> GotoOutcome {
        match self.indicator().tick_at(position_percent) {
            Some(index) => self.click_tick(index),
            None => GotoOutcome::Unchanged,
        }
    }

    /// Frame callback.
    pub fn advance(&mut self, dt: f64) -> Tick {
        self.sequencer.advance(dt)
    }

    /// Whether the view is mounted (listener attached).
    pub fn is_mounted(&self) -> bool {
        self.listener.as_ref().is_some_and(Disposer::is_attached)
    }

    /// Current indicator.
    pub fn indicator(&self) -> IndicatorView {
        self.sequencer.indicator()
    }

    /// Current sequencer state.
    pub fn snapshot(&self) -> SequencerSnapshot {
        self.sequencer.snapshot()
    }

    /// Element values to render.
    pub fn stage(&self) -> &Stage {
        self.sequencer.stage()
    }

    /// The underlying sequencer.
    pub fn sequencer(&self) -> &ChapterSequencer {
        &self.sequencer
    }

    /// The underlying sequencer, for registering observers after mount.
    pub fn sequencer_mut(&mut self) -> &mut ChapterSequencer {
        &mut self.sequencer
    }

    /// Detach input and tear down the sequencer. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(listener) = self.listener.take()
            && listener.dispose()
        {
            tracing::debug!("gesture listener detached");
        }
        self.sequencer.teardown();
    }
}

impl Drop for ChapterView {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../tests/unit/view.rs"]
mod tests;
