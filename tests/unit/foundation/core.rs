use super::*;

#[test]
fn wrap_index_is_cyclic() {
    assert_eq!(wrap_index(-1, 6), 5);
    assert_eq!(wrap_index(6, 6), 0);
    assert_eq!(wrap_index(13, 6), 1);
    assert_eq!(wrap_index(-7, 6), 5);
    assert_eq!(wrap_index(3, 6), 3);
}

#[test]
fn wrap_index_on_empty_is_zero() {
    assert_eq!(wrap_index(4, 0), 0);
}

#[test]
fn direction_factor_and_between() {
    assert_eq!(Direction::Forward.factor(), 1.0);
    assert_eq!(Direction::Backward.factor(), -1.0);
    assert_eq!(Direction::between(2, 4), Direction::Forward);
    assert_eq!(Direction::between(4, 2), Direction::Backward);
    assert_eq!(Direction::Forward.reversed(), Direction::Backward);
}

#[test]
fn fps_validation_and_frame_math() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.frames_for_secs(1.25), 75);
    assert_eq!(fps.frames_for_secs(0.0), 0);
}

proptest::proptest! {
    #[test]
    fn wrap_index_stays_in_range(index in -1000isize..1000, len in 1usize..50) {
        let wrapped = wrap_index(index, len);
        proptest::prop_assert!(wrapped < len);
        proptest::prop_assert_eq!((wrapped as isize - index).rem_euclid(len as isize), 0);
    }
}
