use std::{cell::RefCell, rc::Rc};

use super::*;

fn sequencer() -> ChapterSequencer {
    ChapterSequencer::new(ChapterDeck::heritage().unwrap(), SequencerConfig::default()).unwrap()
}

fn settled(index: usize) -> ChapterSequencer {
    let mut seq = sequencer();
    seq.start();
    seq.finish_transition();
    if index > 0 {
        assert!(seq.select(index).started());
        seq.finish_transition();
    }
    assert_eq!(seq.active_index(), Some(index));
    assert!(!seq.is_transitioning());
    seq
}

#[test]
fn new_hides_every_section() {
    let seq = sequencer();
    assert_eq!(seq.active_index(), None);
    assert!(!seq.is_transitioning());
    assert!(seq.stage().visible_sections().is_empty());
    assert_eq!(seq.stage().value(Target::OuterWrapper(3), Property::YPercent), 100.0);
    assert_eq!(seq.stage().value(Target::InnerWrapper(3), Property::YPercent), -100.0);
}

#[test]
fn new_rejects_invalid_config() {
    let config = SequencerConfig {
        transition_duration: -1.0,
        ..SequencerConfig::default()
    };
    assert!(ChapterSequencer::new(ChapterDeck::heritage().unwrap(), config).is_err());
}

#[test]
fn start_activates_first_chapter_forward() {
    let mut seq = sequencer();
    assert_eq!(
        seq.start(),
        GotoOutcome::Started {
            index: 0,
            direction: Direction::Forward
        }
    );
    assert!(seq.is_transitioning());
    assert_eq!(seq.stage().visible_sections(), vec![0]);

    seq.finish_transition();
    assert_eq!(seq.start(), GotoOutcome::Unchanged);
}

#[test]
fn backward_from_first_wraps_to_last() {
    let mut seq = settled(0);
    assert_eq!(
        seq.backward(),
        GotoOutcome::Started {
            index: 5,
            direction: Direction::Backward
        }
    );
    assert_eq!(seq.active_index(), Some(5));
}

#[test]
fn backward_before_activation_lands_on_last() {
    let mut seq = sequencer();
    assert_eq!(
        seq.backward(),
        GotoOutcome::Started {
            index: 5,
            direction: Direction::Backward
        }
    );
}

#[test]
fn forward_from_last_wraps_to_first() {
    let mut seq = settled(5);
    assert_eq!(
        seq.forward(),
        GotoOutcome::Started {
            index: 0,
            direction: Direction::Forward
        }
    );
}

#[test]
fn goto_wraps_out_of_range_indices() {
    let mut seq = settled(0);
    assert_eq!(
        seq.goto_chapter(6, Direction::Forward),
        GotoOutcome::Started {
            index: 0,
            direction: Direction::Forward
        }
    );
    seq.finish_transition();
    assert!(seq.goto_chapter(-1, Direction::Backward).started());
    assert_eq!(seq.active_index(), Some(5));
}

#[test]
fn requests_during_transition_are_dropped() {
    let mut seq = settled(2);
    assert!(seq.forward().started());
    assert_eq!(seq.forward(), GotoOutcome::Ignored);
    assert_eq!(seq.backward(), GotoOutcome::Ignored);
    assert_eq!(seq.select(0), GotoOutcome::Ignored);
    assert_eq!(seq.active_index(), Some(3));

    seq.finish_transition();
    assert_eq!(seq.active_index(), Some(3));
    assert!(!seq.is_transitioning());
}

#[test]
fn select_picks_direction_from_index_order() {
    let mut seq = settled(3);
    assert_eq!(
        seq.select(1),
        GotoOutcome::Started {
            index: 1,
            direction: Direction::Backward
        }
    );
    seq.finish_transition();
    assert_eq!(
        seq.select(4),
        GotoOutcome::Started {
            index: 4,
            direction: Direction::Forward
        }
    );
    seq.finish_transition();
    assert_eq!(seq.select(4), GotoOutcome::Unchanged);
}

#[test]
fn guard_releases_when_timeline_completes() {
    let mut seq = settled(0);
    seq.forward();
    assert_eq!(seq.transition_progress(), Some(0.0));
    let mut frames = 0;
    let mut last = 0.0;
    while seq.advance(1.0 / 60.0) == Tick::Running {
        let progress = seq.transition_progress().unwrap();
        assert!(progress >= last && progress <= 1.0);
        last = progress;
        frames += 1;
        assert!(frames < 1_000, "transition never completed");
    }
    assert!(!seq.is_transitioning());
    assert_eq!(seq.transition_progress(), None);
    assert_eq!(seq.advance(1.0 / 60.0), Tick::Idle);
    assert_eq!(seq.stage().visible_sections(), vec![1]);
}

#[test]
fn outgoing_section_stays_visible_until_exit_finishes() {
    let mut seq = settled(0);
    seq.forward();
    seq.advance(0.5);
    let mut visible = seq.stage().visible_sections();
    visible.sort_unstable();
    assert_eq!(visible, vec![0, 1]);
    assert_eq!(seq.stage().value(Target::Section(1), Property::ZIndex), 1.0);
    assert_eq!(seq.stage().value(Target::Section(0), Property::ZIndex), 0.0);
}

#[test]
fn settled_chapter_content_is_fully_shown() {
    let seq = settled(1);
    let stage = seq.stage();
    for target in [
        Target::OuterWrapper(1),
        Target::InnerWrapper(1),
        Target::Background(1),
    ] {
        assert_eq!(stage.value(target, Property::YPercent), 0.0);
    }
    for target in seq.titles()[1].char_targets(1) {
        assert!(stage.is_visible(target));
        assert_eq!(stage.value(target, Property::YPercent), 0.0);
    }
    let media = Target::Content {
        chapter: 1,
        slot: crate::stage::ContentSlot::Media,
    };
    assert_eq!(stage.value(media, Property::AutoAlpha), 1.0);
    assert_eq!(stage.value(media, Property::YPx), 0.0);
}

#[test]
fn observers_see_activation_then_settle() {
    let mut seq = sequencer();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    seq.register_on_change(move |s| sink.borrow_mut().push((s.active_index, s.is_transitioning)));

    seq.start();
    seq.finish_transition();
    assert_eq!(*seen.borrow(), vec![(Some(0), true), (Some(0), false)]);

    // Dropped requests do not notify.
    seq.forward();
    seq.forward();
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn unregister_stops_notifications() {
    let mut seq = sequencer();
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    let id = seq.register_on_change(move |_| *sink.borrow_mut() += 1);
    assert!(seq.unregister(id));
    assert!(!seq.unregister(id));
    seq.start();
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn teardown_mid_transition_silences_everything() {
    let mut seq = settled(0);
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    seq.register_on_change(move |_| *sink.borrow_mut() += 1);

    seq.forward();
    seq.advance(0.3);
    let before = *calls.borrow();
    let elements = seq.stage().len();
    seq.teardown();
    seq.teardown();

    assert!(seq.is_torn_down());
    assert_eq!(seq.advance(2.0), Tick::Idle);
    assert_eq!(seq.forward(), GotoOutcome::Inactive);
    assert_eq!(seq.select(3), GotoOutcome::Inactive);
    assert_eq!(*calls.borrow(), before);
    assert!(seq.titles().iter().all(TextSplit::is_reverted));
    assert!(seq.stage().len() < elements);
    assert!(seq.stage().is_visible(Target::Section(1)));
}

#[test]
fn indicator_follows_active_chapter() {
    let mut seq = settled(0);
    assert!(seq.indicator().navbar_visible);
    seq.forward();
    let view = seq.indicator();
    assert!((view.position_percent - 20.0).abs() < 1e-9);
    assert!(!view.navbar_visible);
    assert_eq!(view.label, seq.deck().get(1).unwrap().year);

    seq.finish_transition();
    let mark = seq.stage().value(Target::IndicatorMark, Property::TopPercent);
    assert!((mark - 20.0).abs() < 1e-9);
    assert_eq!(seq.stage().value(Target::YearBadge, Property::Opacity), 1.0);
}
