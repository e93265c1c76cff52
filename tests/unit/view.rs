use std::{cell::RefCell, rc::Rc};

use super::*;

fn mounted() -> ChapterView {
    ChapterView::mount_deck(ChapterDeck::heritage().unwrap(), SequencerConfig::default()).unwrap()
}

fn settle(view: &mut ChapterView) {
    for _ in 0..600 {
        if view.advance(1.0 / 60.0) != Tick::Running {
            return;
        }
    }
    panic!("transition did not settle");
}

fn wheel(delta_y: f64) -> RawInput {
    RawInput::Wheel { delta_y }
}

#[test]
fn mount_activates_first_chapter() {
    let mut view = mounted();
    assert!(view.is_mounted());
    assert_eq!(view.snapshot().active_index, Some(0));
    assert!(view.snapshot().is_transitioning);

    settle(&mut view);
    let snap = view.snapshot();
    assert_eq!(snap.active_index, Some(0));
    assert!(!snap.is_transitioning);
    assert_eq!(view.stage().visible_sections(), vec![0]);
}

#[test]
fn small_wheel_deltas_are_filtered() {
    let mut view = mounted();
    settle(&mut view);
    assert_eq!(view.handle_input(wheel(4.0)), None);
    assert_eq!(view.snapshot().active_index, Some(0));
}

#[test]
fn scrolling_down_moves_forward_and_second_gesture_is_ignored() {
    let mut view = mounted();
    settle(&mut view);
    view.click_tick(2);
    settle(&mut view);

    let first = view.handle_input(wheel(40.0));
    assert!(first.is_some_and(GotoOutcome::started));
    assert_eq!(view.snapshot().active_index, Some(3));

    view.advance(0.2);
    assert_eq!(view.handle_input(wheel(40.0)), Some(GotoOutcome::Ignored));

    settle(&mut view);
    assert_eq!(view.snapshot().active_index, Some(3));
    assert_eq!(view.stage().visible_sections(), vec![3]);
}

#[test]
fn swipe_down_moves_backward() {
    let mut view = mounted();
    settle(&mut view);
    view.handle_input(RawInput::TouchStart { y: 100.0 });
    let outcome = view.handle_input(RawInput::TouchMove { y: 160.0 });
    assert_eq!(
        outcome,
        Some(GotoOutcome::Started {
            index: 5,
            direction: crate::Direction::Backward
        })
    );
}

#[test]
fn ruler_click_selects_nearest_tick() {
    let mut view = mounted();
    settle(&mut view);
    assert!(view.click_ruler(41.0).started());
    assert_eq!(view.snapshot().active_index, Some(2));
}

#[test]
fn teardown_mid_flight_stops_updates() {
    let mut view = mounted();
    settle(&mut view);
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    view.sequencer_mut()
        .register_on_change(move |_| *sink.borrow_mut() += 1);

    view.handle_input(wheel(40.0));
    view.advance(0.3);
    let before = *calls.borrow();

    view.teardown();
    view.teardown();
    assert!(!view.is_mounted());
    assert_eq!(view.handle_input(wheel(40.0)), None);
    assert_eq!(view.click_tick(4), GotoOutcome::Inactive);
    assert_eq!(view.advance(1.0), Tick::Idle);
    assert_eq!(*calls.borrow(), before);
    assert!(view.sequencer().titles().iter().all(|t| t.is_reverted()));
}

#[test]
fn dropping_the_view_tears_down() {
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    let mut seq =
        ChapterSequencer::new(ChapterDeck::heritage().unwrap(), SequencerConfig::default())
            .unwrap();
    seq.register_on_change(move |_| *sink.borrow_mut() += 1);

    let view = ChapterView::mount(seq);
    assert_eq!(*calls.borrow(), 1);
    drop(view);
    // The observer closure was released with the sequencer's observer list.
    assert_eq!(Rc::strong_count(&calls), 1);
}
