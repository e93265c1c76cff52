use crate::{
    animation::timeline::{Stagger, Timeline, Tween, TweenDefaults, props},
    chapters::model::Chapter,
    config::SequencerConfig,
    foundation::core::Direction,
    stage::{ContentSlot, Property, Target},
    text::TextSplit,
};

/// Content elements that fade in after the title, in document order.
pub fn content_slots(chapter: &Chapter) -> Vec<ContentSlot> {
    let mut slots = vec![ContentSlot::Year];
    if !chapter.description.trim().is_empty() {
        slots.push(ContentSlot::Description);
    }
    if !chapter.media.is_empty() {
        slots.push(ContentSlot::Media);
    }
    slots
}

/// Build the timeline that moves from chapter `from` to `chapter`.
///
/// Every positional offset is multiplied by the direction factor, so a backward transition
/// is the mirror image of a forward one. The outgoing section is hidden only after its
/// background has finished sliding out.
#[tracing::instrument(level = "debug", skip(chapter, title, config), fields(to = chapter.index))]
pub fn build_transition(
    chapter: &Chapter,
    title: &TextSplit,
    from: Option<usize>,
    direction: Direction,
    config: &SequencerConfig,
) -> Timeline {
    let to = chapter.index;
    let d = direction.factor();
    let shift = config.background_shift_percent;

    let mut tl = Timeline::new(TweenDefaults {
        duration: config.transition_duration,
        ease: config.transition_ease,
    });

    if let Some(prev) = from.filter(|&prev| prev != to) {
        tl.set(0.0, [Target::Section(prev)], props([(Property::ZIndex, 0.0)]));
        tl.tween(Tween::to(
            [Target::Background(prev)],
            props([(Property::YPercent, -shift * d)]),
        ));
        let exit_end = tl.end();
        tl.set(
            exit_end,
            [Target::Section(prev)],
            props([(Property::AutoAlpha, 0.0)]),
        );
    }

    tl.set(
        0.0,
        [Target::Section(to)],
        props([(Property::AutoAlpha, 1.0), (Property::ZIndex, 1.0)]),
    );

    // Outer and inner wrappers travel in opposite directions.
    tl.tween(
        Tween::from_to(
            [Target::OuterWrapper(to)],
            props([(Property::YPercent, 100.0 * d)]),
            props([(Property::YPercent, 0.0)]),
        )
        .at(0.0),
    );
    tl.tween(
        Tween::from_to(
            [Target::InnerWrapper(to)],
            props([(Property::YPercent, -100.0 * d)]),
            props([(Property::YPercent, 0.0)]),
        )
        .at(0.0),
    );
    tl.tween(
        Tween::from_to(
            [Target::Background(to)],
            props([(Property::YPercent, shift * d)]),
            props([(Property::YPercent, 0.0)]),
        )
        .at(0.0),
    );

    let chars = title.char_targets(to);
    if !chars.is_empty() {
        tl.tween(
            Tween::from_to(
                chars,
                props([
                    (Property::AutoAlpha, 0.0),
                    (Property::YPercent, config.title_shift_percent * d),
                ]),
                props([(Property::AutoAlpha, 1.0), (Property::YPercent, 0.0)]),
            )
            .at(config.title_offset)
            .duration(config.title_duration)
            .ease(config.title_ease)
            .stagger(Stagger::random(config.title_stagger)),
        );
    }

    let content: Vec<Target> = content_slots(chapter)
        .into_iter()
        .map(|slot| Target::Content { chapter: to, slot })
        .collect();
    tl.tween(
        Tween::from_to(
            content,
            props([
                (Property::AutoAlpha, 0.0),
                (Property::YPx, config.content_shift_px * d),
            ]),
            props([(Property::AutoAlpha, 1.0), (Property::YPx, 0.0)]),
        )
        .at(config.content_offset)
        .duration(config.content_duration)
        .stagger(Stagger::each(config.content_stagger)),
    );

    tl
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/transition.rs"]
mod tests;
