use crate::{
    animation::player::{Tick, TimelinePlayer},
    chapters::model::ChapterDeck,
    config::SequencerConfig,
    foundation::core::{Direction, wrap_index},
    foundation::error::ChapterflowResult,
    foundation::rng::mix_seed,
    indicator::{IndicatorView, indicator_motion, position_percent},
    sequencer::{
        state::{GotoOutcome, ObserverId, SequencerSnapshot, SequencerState},
        transition::{build_transition, content_slots},
    },
    stage::{Property, Stage, Target},
    text::TextSplit,
};

type ChangeObserver = Box<dyn FnMut(&SequencerSnapshot)>;

/// Owns the chapter deck and the active-chapter state machine.
///
/// At most one transition is in flight. Navigation commands issued while one is running are
/// dropped, not queued. The host drives time through [`ChapterSequencer::advance`] from its
/// frame callback; the guard releases when the transition timeline completes.
pub struct ChapterSequencer {
    deck: ChapterDeck,
    config: SequencerConfig,
    state: SequencerState,
    stage: Stage,
    titles: Vec<TextSplit>,
    transition: Option<TimelinePlayer>,
    indicator: Option<TimelinePlayer>,
    observers: Vec<(ObserverId, ChangeObserver)>,
    next_observer: u64,
    transitions_started: u64,
    torn_down: bool,
}

impl std::fmt::Debug for ChapterSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChapterSequencer")
            .field("chapters", &self.deck.len())
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl ChapterSequencer {
    /// Create a sequencer in the sentinel state with every chapter panel hidden.
    ///
    /// Nothing is activated yet; call [`ChapterSequencer::start`] (or mount a
    /// [`ChapterView`](crate::ChapterView), which does so).
    pub fn new(deck: ChapterDeck, config: SequencerConfig) -> ChapterflowResult<Self> {
        config.validate()?;

        let titles = deck.iter().map(|c| TextSplit::new(&c.title)).collect();
        let mut stage = Stage::new();
        for i in 0..deck.len() {
            stage.apply(Target::Section(i), Property::AutoAlpha, 0.0);
            stage.apply(Target::OuterWrapper(i), Property::YPercent, 100.0);
            stage.apply(Target::InnerWrapper(i), Property::YPercent, -100.0);
        }

        Ok(Self {
            deck,
            config,
            state: SequencerState::default(),
            stage,
            titles,
            transition: None,
            indicator: None,
            observers: Vec::new(),
            next_observer: 0,
            transitions_started: 0,
            torn_down: false,
        })
    }

    /// Activate the first chapter if nothing is active yet.
    pub fn start(&mut self) -> GotoOutcome {
        if self.state.active_index.is_some() {
            return GotoOutcome::Unchanged;
        }
        self.goto_chapter(0, Direction::Forward)
    }

    /// Transition to `target_index` (wrapped cyclically) travelling in `direction`.
    ///
    /// Dropped with [`GotoOutcome::Ignored`] while another transition is in flight.
    pub fn goto_chapter(&mut self, target_index: isize, direction: Direction) -> GotoOutcome {
        if self.torn_down {
            return GotoOutcome::Inactive;
        }
        if self.state.is_transitioning {
            tracing::debug!(target_index, ?direction, "transition in flight, dropping request");
            return GotoOutcome::Ignored;
        }

        let index = wrap_index(target_index, self.deck.len());
        let from = self.state.active_index;

        self.state.is_transitioning = true;
        self.state.active_index = Some(index);
        self.transitions_started += 1;
        tracing::debug!(?from, to = index, ?direction, "starting chapter transition");
        self.notify();

        let Some(chapter) = self.deck.get(index) else {
            // wrap_index keeps the index in range; reaching this means the deck is empty.
            self.state.is_transitioning = false;
            self.notify();
            return GotoOutcome::Inactive;
        };
        let timeline = build_transition(
            chapter,
            &self.titles[index],
            from,
            direction,
            &self.config,
        );
        let seed = mix_seed(self.config.seed, self.transitions_started);
        match timeline.resolve(seed) {
            Ok(resolved) => {
                self.transition = Some(TimelinePlayer::start(resolved, &mut self.stage));
            }
            Err(err) => {
                tracing::warn!(error = %err, "transition timeline rejected, cutting without animation");
                self.cut_to(from, index);
                self.state.is_transitioning = false;
                self.notify();
            }
        }

        let target_percent = position_percent(Some(index), self.deck.len());
        if let Ok(motion) = indicator_motion(target_percent).resolve(seed) {
            self.indicator = Some(TimelinePlayer::start(motion, &mut self.stage));
        }

        GotoOutcome::Started { index, direction }
    }

    /// Go to the next chapter (wrapping after the last).
    pub fn forward(&mut self) -> GotoOutcome {
        let current = self.state.active_index.map_or(-1, |i| i as isize);
        self.goto_chapter(current + 1, Direction::Forward)
    }

    /// Go to the previous chapter (wrapping before the first).
    ///
    /// With no active chapter yet this counts from the first one, so it lands on the last.
    pub fn backward(&mut self) -> GotoOutcome {
        let current = self.state.active_index.map_or(0, |i| i as isize);
        self.goto_chapter(current - 1, Direction::Backward)
    }

    /// Jump to the chapter picked on the indicator.
    ///
    /// The direction follows the sign of `index - active`; selecting the active chapter does
    /// nothing.
    pub fn select(&mut self, index: usize) -> GotoOutcome {
        if self.torn_down {
            return GotoOutcome::Inactive;
        }
        if self.state.is_transitioning {
            tracing::debug!(index, "transition in flight, dropping selection");
            return GotoOutcome::Ignored;
        }
        let index = wrap_index(index as isize, self.deck.len());
        let direction = match self.state.active_index {
            Some(active) if active == index => return GotoOutcome::Unchanged,
            Some(active) => Direction::between(active, index),
            None => Direction::Forward,
        };
        self.goto_chapter(index as isize, direction)
    }

    /// Advance running timelines by `dt` seconds.
    ///
    /// Returns [`Tick::Completed`] on the frame the chapter transition finishes.
    pub fn advance(&mut self, dt: f64) -> Tick {
        if self.torn_down {
            return Tick::Idle;
        }

        if let Some(indicator) = self.indicator.as_mut()
            && indicator.advance(dt, &mut self.stage) != Tick::Running
        {
            self.indicator = None;
        }

        let Some(player) = self.transition.as_mut() else {
            return Tick::Idle;
        };
        match player.advance(dt, &mut self.stage) {
            Tick::Running => Tick::Running,
            Tick::Completed | Tick::Idle => self.settle(),
        }
    }

    /// Run the in-flight transition to its end state immediately.
    pub fn finish_transition(&mut self) -> Tick {
        if self.torn_down {
            return Tick::Idle;
        }
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.finish(&mut self.stage);
            self.indicator = None;
        }
        let Some(player) = self.transition.as_mut() else {
            return Tick::Idle;
        };
        player.finish(&mut self.stage);
        self.settle()
    }

    /// Subscribe to state changes (activation and transition end).
    pub fn register_on_change(
        &mut self,
        observer: impl FnMut(&SequencerSnapshot) + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        if !self.torn_down {
            self.observers.push((id, Box::new(observer)));
        }
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Cancel the in-flight timeline, release title splits and drop observers.
    ///
    /// Idempotent; afterwards every command is a no-op and no observer is called again.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(player) = self.transition.as_mut() {
            player.cancel();
        }
        if let Some(player) = self.indicator.as_mut() {
            player.cancel();
        }
        self.transition = None;
        self.indicator = None;
        for title in &mut self.titles {
            title.revert();
        }
        self.stage
            .remove_where(|target| matches!(target, Target::TitleChar { .. }));
        self.observers.clear();
        tracing::debug!("sequencer torn down");
    }

    /// Active chapter, `None` before the first activation.
    pub fn active_index(&self) -> Option<usize> {
        self.state.active_index
    }

    /// Whether a transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning
    }

    /// Whether [`ChapterSequencer::teardown`] has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Current state.
    pub fn snapshot(&self) -> SequencerSnapshot {
        SequencerSnapshot {
            active_index: self.state.active_index,
            is_transitioning: self.state.is_transitioning,
            chapter_count: self.deck.len(),
        }
    }

    /// Indicator derived from the active chapter.
    pub fn indicator(&self) -> IndicatorView {
        IndicatorView::derive(&self.deck, self.state.active_index)
    }

    /// Animated element values.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The deck being sequenced.
    pub fn deck(&self) -> &ChapterDeck {
        &self.deck
    }

    /// Active configuration.
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Title splits, one per chapter (empty after teardown).
    pub fn titles(&self) -> &[TextSplit] {
        &self.titles
    }

    /// Progress of the in-flight transition, if any.
    pub fn transition_progress(&self) -> Option<f64> {
        self.transition.as_ref().map(TimelinePlayer::progress)
    }

    fn settle(&mut self) -> Tick {
        self.transition = None;
        self.state.is_transitioning = false;
        tracing::debug!(active = ?self.state.active_index, "chapter transition complete");
        self.notify();
        Tick::Completed
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        for (_, observer) in &mut self.observers {
            observer(&snapshot);
        }
    }

    fn cut_to(&mut self, from: Option<usize>, to: usize) {
        if let Some(prev) = from.filter(|&p| p != to) {
            self.stage.apply(Target::Section(prev), Property::AutoAlpha, 0.0);
            self.stage.apply(Target::Section(prev), Property::ZIndex, 0.0);
        }
        self.stage.apply(Target::Section(to), Property::AutoAlpha, 1.0);
        self.stage.apply(Target::Section(to), Property::ZIndex, 1.0);
        for target in [
            Target::OuterWrapper(to),
            Target::InnerWrapper(to),
            Target::Background(to),
        ] {
            self.stage.apply(target, Property::YPercent, 0.0);
        }
        for target in self.titles[to].char_targets(to) {
            self.stage.apply(target, Property::AutoAlpha, 1.0);
            self.stage.apply(target, Property::YPercent, 0.0);
        }
        if let Some(chapter) = self.deck.get(to) {
            for slot in content_slots(chapter) {
                let target = Target::Content { chapter: to, slot };
                self.stage.apply(target, Property::AutoAlpha, 1.0);
                self.stage.apply(target, Property::YPx, 0.0);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/chapter_sequencer.rs"]
mod tests;
