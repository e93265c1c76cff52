use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    foundation::error::{ChapterflowError, ChapterflowResult},
    foundation::rng::{Rng64, mix_seed},
    stage::{Property, Target},
};

/// Property/value pairs applied together.
pub type PropertySet = SmallVec<[(Property, f64); 4]>;

/// Build a [`PropertySet`] from pairs.
pub fn props<const N: usize>(pairs: [(Property, f64); N]) -> PropertySet {
    pairs.into_iter().collect()
}

/// Order in which staggered targets start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerFrom {
    /// Document order.
    Start,
    /// Reverse document order.
    End,
    /// Seeded random permutation.
    Random,
}

/// Per-target start delay policy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    /// Seconds between consecutive starts.
    pub each: f64,
    /// Start order.
    pub from: StaggerFrom,
}

impl Stagger {
    /// Stagger in document order.
    pub fn each(each: f64) -> Self {
        Self {
            each,
            from: StaggerFrom::Start,
        }
    }

    /// Stagger in seeded random order.
    pub fn random(each: f64) -> Self {
        Self {
            each,
            from: StaggerFrom::Random,
        }
    }
}

/// Values a timeline falls back to when a tween leaves them unset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenDefaults {
    /// Default duration in seconds.
    pub duration: f64,
    /// Default easing.
    pub ease: Ease,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self {
            duration: 0.5,
            ease: Ease::OutQuad,
        }
    }
}

/// Interpolation of a set of targets between two property sets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    /// Animated elements.
    pub targets: Vec<Target>,
    /// Start values; `None` captures the current values when the tween begins.
    pub from: Option<PropertySet>,
    /// End values.
    pub to: PropertySet,
    /// Start time relative to the timeline start.
    pub offset: f64,
    /// Duration override.
    pub duration: Option<f64>,
    /// Ease override.
    pub ease: Option<Ease>,
    /// Optional per-target stagger.
    pub stagger: Option<Stagger>,
}

impl Tween {
    /// Tween from the current values to `to`.
    pub fn to(targets: impl IntoIterator<Item = Target>, to: PropertySet) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            from: None,
            to,
            offset: 0.0,
            duration: None,
            ease: None,
            stagger: None,
        }
    }

    /// Tween with explicit start values; the start values render immediately.
    pub fn from_to(
        targets: impl IntoIterator<Item = Target>,
        from: PropertySet,
        to: PropertySet,
    ) -> Self {
        Self {
            from: Some(from),
            ..Self::to(targets, to)
        }
    }

    /// Place the tween at `offset` seconds.
    pub fn at(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Override the duration.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Override the ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Stagger target start times.
    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }
}

/// One entry of a [`Timeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Instant assignment at time `at`.
    Set {
        /// Time of the assignment.
        at: f64,
        /// Assigned elements.
        targets: Vec<Target>,
        /// Assigned values.
        values: PropertySet,
    },
    /// Interpolation.
    Tween(Tween),
}

/// Declarative, ordered description of one coordinated animation.
///
/// Built once and handed to a [`TimelinePlayer`](crate::TimelinePlayer) as a unit.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Fallback duration/ease.
    pub defaults: TweenDefaults,
    /// Steps in insertion order.
    pub steps: Vec<Step>,
}

/// A single property of a single element animated over `[start, start + duration]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Track {
    /// Animated element.
    pub target: Target,
    /// Animated property.
    pub property: Property,
    /// Start value, `None` when captured at runtime.
    pub from: Option<f64>,
    /// End value.
    pub to: f64,
    /// Absolute start time.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Easing.
    pub ease: Ease,
}

impl Track {
    /// Absolute end time.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Instant assignment at an absolute time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Cue {
    /// Time of the assignment.
    pub at: f64,
    /// Assigned element.
    pub target: Target,
    /// Assigned property.
    pub property: Property,
    /// Assigned value.
    pub value: f64,
}

/// Flattened timeline with stagger and defaults applied.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ResolvedTimeline {
    /// Interpolated tracks in step order.
    pub tracks: Vec<Track>,
    /// Instant assignments sorted by time (stable).
    pub cues: Vec<Cue>,
    /// Time at which every track and cue has finished.
    pub duration: f64,
}

impl ResolvedTimeline {
    /// Tracks that animate `target`.
    pub fn tracks_for(&self, target: Target) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(move |t| t.target == target)
    }
}

impl Timeline {
    /// Empty timeline with the given defaults.
    pub fn new(defaults: TweenDefaults) -> Self {
        Self {
            defaults,
            steps: Vec::new(),
        }
    }

    /// Append an instant assignment.
    pub fn set(
        &mut self,
        at: f64,
        targets: impl IntoIterator<Item = Target>,
        values: PropertySet,
    ) -> &mut Self {
        self.steps.push(Step::Set {
            at,
            targets: targets.into_iter().collect(),
            values,
        });
        self
    }

    /// Append a tween.
    pub fn tween(&mut self, tween: Tween) -> &mut Self {
        self.steps.push(Step::Tween(tween));
        self
    }

    /// End time of the last step appended so far (0 for an empty timeline).
    ///
    /// Use it to chain a step after everything added before it.
    pub fn end(&self) -> f64 {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Set { at, .. } => *at,
                Step::Tween(tween) => {
                    let duration = tween.duration.unwrap_or(self.defaults.duration);
                    tween.offset + duration + stagger_span(tween)
                }
            })
            .fold(0.0, f64::max)
    }

    /// Check static invariants: finite non-negative times, non-empty targets and values.
    pub fn validate(&self) -> ChapterflowResult<()> {
        fn check_time(what: &str, v: f64) -> ChapterflowResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(ChapterflowError::timeline(format!(
                    "{what} must be finite and >= 0 (got {v})"
                )));
            }
            Ok(())
        }

        check_time("default duration", self.defaults.duration)?;
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Set {
                    at,
                    targets,
                    values,
                } => {
                    check_time("set time", *at)?;
                    if targets.is_empty() || values.is_empty() {
                        return Err(ChapterflowError::timeline(format!(
                            "step {i}: set needs targets and values"
                        )));
                    }
                }
                Step::Tween(tween) => {
                    check_time("tween offset", tween.offset)?;
                    if let Some(d) = tween.duration {
                        check_time("tween duration", d)?;
                    }
                    if let Some(s) = tween.stagger {
                        check_time("stagger", s.each)?;
                    }
                    if tween.targets.is_empty() || tween.to.is_empty() {
                        return Err(ChapterflowError::timeline(format!(
                            "step {i}: tween needs targets and end values"
                        )));
                    }
                    if let Some(from) = &tween.from {
                        for (property, _) in from {
                            if !tween.to.iter().any(|(p, _)| p == property) {
                                return Err(ChapterflowError::timeline(format!(
                                    "step {i}: start value for {property:?} has no end value"
                                )));
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Flatten into per-property tracks and time-sorted cues.
    ///
    /// `seed` drives [`StaggerFrom::Random`]; the same seed always yields the same order.
    #[tracing::instrument(level = "trace", skip(self), fields(steps = self.steps.len()))]
    pub fn resolve(&self, seed: u64) -> ChapterflowResult<ResolvedTimeline> {
        self.validate()?;

        let mut tracks = Vec::new();
        let mut cues = Vec::new();

        for (step_index, step) in self.steps.iter().enumerate() {
            match step {
                Step::Set {
                    at,
                    targets,
                    values,
                } => {
                    for &target in targets {
                        for &(property, value) in values {
                            cues.push(Cue {
                                at: *at,
                                target,
                                property,
                                value,
                            });
                        }
                    }
                }
                Step::Tween(tween) => {
                    let duration = tween.duration.unwrap_or(self.defaults.duration);
                    let ease = tween.ease.unwrap_or(self.defaults.ease);
                    let delays = stagger_delays(tween, mix_seed(seed, step_index as u64));

                    for (&target, delay) in tween.targets.iter().zip(delays) {
                        for &(property, to) in &tween.to {
                            let from = tween.from.as_ref().and_then(|from| {
                                from.iter().find(|(p, _)| *p == property).map(|(_, v)| *v)
                            });
                            tracks.push(Track {
                                target,
                                property,
                                from,
                                to,
                                start: tween.offset + delay,
                                duration,
                                ease,
                            });
                        }
                    }
                }
            }
        }

        cues.sort_by(|a, b| a.at.total_cmp(&b.at));

        let duration = tracks
            .iter()
            .map(Track::end)
            .chain(cues.iter().map(|c| c.at))
            .fold(0.0, f64::max);

        Ok(ResolvedTimeline {
            tracks,
            cues,
            duration,
        })
    }
}

fn stagger_span(tween: &Tween) -> f64 {
    match tween.stagger {
        Some(s) if tween.targets.len() > 1 => s.each * (tween.targets.len() - 1) as f64,
        _ => 0.0,
    }
}

fn stagger_delays(tween: &Tween, seed: u64) -> Vec<f64> {
    let n = tween.targets.len();
    let Some(stagger) = tween.stagger else {
        return vec![0.0; n];
    };

    // slot[i] = position of target i in the start order
    let slots: Vec<usize> = match stagger.from {
        StaggerFrom::Start => (0..n).collect(),
        StaggerFrom::End => (0..n).rev().collect(),
        StaggerFrom::Random => {
            let mut order: Vec<usize> = (0..n).collect();
            Rng64::new(seed).shuffle(&mut order);
            order
        }
    };
    slots
        .into_iter()
        .map(|slot| slot as f64 * stagger.each)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
