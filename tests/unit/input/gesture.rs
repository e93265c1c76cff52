use super::*;

#[test]
fn wheel_down_is_forward_with_inverted_wheel() {
    let mut n = GestureNormalizer::new(10.0, -1.0);
    assert_eq!(
        n.feed(RawInput::Wheel { delta_y: 40.0 }),
        Some(GestureSignal::Forward)
    );
    assert_eq!(
        n.feed(RawInput::Wheel { delta_y: -40.0 }),
        Some(GestureSignal::Backward)
    );
}

#[test]
fn small_deltas_accumulate_until_tolerance() {
    let mut n = GestureNormalizer::new(10.0, -1.0);
    assert_eq!(n.feed(RawInput::Wheel { delta_y: 4.0 }), None);
    assert_eq!(n.feed(RawInput::Wheel { delta_y: 4.0 }), None);
    assert_eq!(
        n.feed(RawInput::Wheel { delta_y: 4.0 }),
        Some(GestureSignal::Forward)
    );
}

#[test]
fn reversal_resets_accumulator() {
    let mut n = GestureNormalizer::new(10.0, -1.0);
    assert_eq!(n.feed(RawInput::Wheel { delta_y: 8.0 }), None);
    assert_eq!(n.feed(RawInput::Wheel { delta_y: -8.0 }), None);
    assert_eq!(n.feed(RawInput::Wheel { delta_y: 8.0 }), None);
}

#[test]
fn swipe_up_is_forward() {
    let mut n = GestureNormalizer::new(10.0, -1.0);
    assert_eq!(n.feed(RawInput::TouchStart { y: 300.0 }), None);
    assert_eq!(n.feed(RawInput::TouchMove { y: 295.0 }), None);
    assert_eq!(
        n.feed(RawInput::TouchMove { y: 280.0 }),
        Some(GestureSignal::Forward)
    );
    assert_eq!(n.feed(RawInput::TouchEnd), None);
}

#[test]
fn pointer_moves_without_press_are_ignored() {
    let mut n = GestureNormalizer::new(10.0, -1.0);
    assert_eq!(n.feed(RawInput::PointerMove { y: 0.0 }), None);
    assert_eq!(n.feed(RawInput::PointerMove { y: 100.0 }), None);
    n.feed(RawInput::PointerDown { y: 100.0 });
    assert_eq!(
        n.feed(RawInput::PointerMove { y: 150.0 }),
        Some(GestureSignal::Backward)
    );
}

#[test]
fn detached_source_yields_nothing() {
    let mut source = GestureSource::new(10.0, -1.0);
    assert_eq!(source.push(RawInput::Wheel { delta_y: 50.0 }), None);

    let disposer = source.attach();
    assert!(source.is_attached());
    assert_eq!(
        source.push(RawInput::Wheel { delta_y: 50.0 }),
        Some(GestureSignal::Forward)
    );

    assert!(disposer.dispose());
    assert!(!disposer.dispose());
    assert!(!source.is_attached());
    assert_eq!(source.push(RawInput::Wheel { delta_y: 50.0 }), None);
}

#[test]
fn reattach_detaches_previous_listener() {
    let mut source = GestureSource::new(10.0, -1.0);
    let first = source.attach();
    let second = source.attach();
    assert!(!first.is_attached());
    assert!(second.is_attached());
}
