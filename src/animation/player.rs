use crate::{
    animation::timeline::{ResolvedTimeline, Track},
    stage::Stage,
};

/// Lifecycle of a [`TimelinePlayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    /// Play-head is inside the timeline.
    Playing,
    /// Play-head reached the end; completion has been reported.
    Completed,
    /// Stopped by [`TimelinePlayer::cancel`]; never reports completion.
    Cancelled,
}

/// Result of advancing a player by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Still playing.
    Running,
    /// Reached the end on this call. Reported exactly once.
    Completed,
    /// Nothing to do (already completed or cancelled).
    Idle,
}

/// Frame-driven engine that plays a [`ResolvedTimeline`] into a [`Stage`].
///
/// Tweens with explicit start values render those values immediately, so staggered elements
/// stay in their start state until their own delay has elapsed. Tweens without start values
/// capture the element's value the first time the play-head enters them; seeking back before
/// such a tween restores the captured value.
#[derive(Clone, Debug)]
pub struct TimelinePlayer {
    timeline: ResolvedTimeline,
    time: f64,
    captured: Vec<Option<f64>>,
    next_cue: usize,
    state: PlayState,
}

impl TimelinePlayer {
    /// Create a player and render the timeline at time 0.
    pub fn start(timeline: ResolvedTimeline, stage: &mut Stage) -> Self {
        let captured = timeline.tracks.iter().map(|t| t.from).collect();
        let mut player = Self {
            timeline,
            time: 0.0,
            captured,
            next_cue: 0,
            state: PlayState::Playing,
        };
        player.render(stage);
        player
    }

    /// Current play-head in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.timeline.duration
    }

    /// Play-head as a fraction of the duration (1 for empty timelines).
    pub fn progress(&self) -> f64 {
        if self.timeline.duration <= 0.0 {
            return 1.0;
        }
        (self.time / self.timeline.duration).clamp(0.0, 1.0)
    }

    /// Lifecycle state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// The timeline being played.
    pub fn timeline(&self) -> &ResolvedTimeline {
        &self.timeline
    }

    /// Move the play-head forward by `dt` seconds and render.
    pub fn advance(&mut self, dt: f64, stage: &mut Stage) -> Tick {
        if self.state != PlayState::Playing {
            return Tick::Idle;
        }
        self.time = (self.time + dt.max(0.0)).min(self.timeline.duration);
        self.render(stage);
        if self.time >= self.timeline.duration {
            self.state = PlayState::Completed;
            return Tick::Completed;
        }
        Tick::Running
    }

    /// Jump to `time` (clamped) and render, for scroll-scrubbed timelines.
    ///
    /// Seeking never completes the player. Cues already passed stay applied when seeking
    /// backwards. A non-finite `time` is ignored.
    pub fn seek(&mut self, time: f64, stage: &mut Stage) {
        if self.state == PlayState::Cancelled || !time.is_finite() {
            return;
        }
        self.time = time.clamp(0.0, self.timeline.duration);
        self.render(stage);
    }

    /// Jump to the end, render the final state and report completion.
    pub fn finish(&mut self, stage: &mut Stage) -> Tick {
        if self.state != PlayState::Playing {
            return Tick::Idle;
        }
        self.time = self.timeline.duration;
        self.render(stage);
        self.state = PlayState::Completed;
        Tick::Completed
    }

    /// Stop without rendering further; idempotent.
    pub fn cancel(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Cancelled;
        }
    }

    fn render(&mut self, stage: &mut Stage) {
        let t = self.time;

        for (track, captured) in self.timeline.tracks.iter().zip(self.captured.iter_mut()) {
            if t < track.start {
                if let Some(from) = *captured {
                    stage.apply(track.target, track.property, from);
                }
                continue;
            }
            let from = *captured.get_or_insert_with(|| stage.value(track.target, track.property));
            stage.apply(track.target, track.property, sample(track, from, t));
        }

        while let Some(cue) = self.timeline.cues.get(self.next_cue) {
            if cue.at > t {
                break;
            }
            stage.apply(cue.target, cue.property, cue.value);
            self.next_cue += 1;
        }
    }
}

fn sample(track: &Track, from: f64, t: f64) -> f64 {
    if track.duration <= 0.0 || t >= track.end() {
        return track.to;
    }
    let local = (t - track.start) / track.duration;
    let eased = track.ease.apply(local);
    from + (track.to - from) * eased
}

#[cfg(test)]
#[path = "../../tests/unit/animation/player.rs"]
mod tests;
