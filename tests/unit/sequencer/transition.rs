use super::*;
use crate::{animation::timeline::ResolvedTimeline, chapters::model::ChapterDeck};

fn plan(from: Option<usize>, to: usize, direction: Direction) -> ResolvedTimeline {
    let deck = ChapterDeck::heritage().unwrap();
    let chapter = deck.get(to).unwrap();
    let title = TextSplit::new(&chapter.title);
    build_transition(chapter, &title, from, direction, &SequencerConfig::default())
        .resolve(42)
        .unwrap()
}

#[test]
fn backward_mirrors_forward_offsets() {
    let fwd = plan(Some(2), 3, Direction::Forward);
    let back = plan(Some(4), 3, Direction::Backward);

    let entering = |tl: &ResolvedTimeline| -> Vec<(Target, Property, Option<f64>, f64)> {
        tl.tracks
            .iter()
            .filter(|t| match t.target {
                Target::OuterWrapper(i) | Target::InnerWrapper(i) | Target::Background(i) => {
                    i == 3
                }
                Target::TitleChar { .. } | Target::Content { .. } => true,
                _ => false,
            })
            .map(|t| (t.target, t.property, t.from, t.start))
            .collect()
    };

    let a = entering(&fwd);
    let b = entering(&back);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!((x.0, x.1), (y.0, y.1));
        assert_eq!(x.3, y.3);
        match x.1 {
            Property::AutoAlpha => assert_eq!(x.2, y.2),
            _ => assert_eq!(x.2.map(|v| -v), y.2),
        }
    }

    let exit_fwd = fwd.tracks_for(Target::Background(2)).next().unwrap();
    let exit_back = back.tracks_for(Target::Background(4)).next().unwrap();
    assert_eq!(exit_fwd.to, -15.0);
    assert_eq!(exit_back.to, 15.0);
}

#[test]
fn wrappers_counter_move_and_background_shifts() {
    let tl = plan(Some(0), 1, Direction::Forward);
    let first = |target| tl.tracks_for(target).next().unwrap().from;
    assert_eq!(first(Target::OuterWrapper(1)), Some(100.0));
    assert_eq!(first(Target::InnerWrapper(1)), Some(-100.0));
    assert_eq!(first(Target::Background(1)), Some(15.0));
    for t in [Target::OuterWrapper(1), Target::InnerWrapper(1), Target::Background(1)] {
        let track = tl.tracks_for(t).next().unwrap();
        assert_eq!(track.start, 0.0);
        assert_eq!(track.duration, 1.25);
    }
}

#[test]
fn outgoing_section_hides_after_exit_tween() {
    let tl = plan(Some(0), 1, Direction::Forward);
    let hide = tl
        .cues
        .iter()
        .find(|c| c.target == Target::Section(0) && c.property == Property::AutoAlpha)
        .unwrap();
    assert_eq!(hide.value, 0.0);
    assert_eq!(hide.at, 1.25);

    let show = tl
        .cues
        .iter()
        .find(|c| c.target == Target::Section(1) && c.property == Property::AutoAlpha)
        .unwrap();
    assert_eq!(show.at, 0.0);
    assert_eq!(show.value, 1.0);
}

#[test]
fn first_activation_has_no_outgoing_steps() {
    let tl = plan(None, 0, Direction::Forward);
    assert!(tl.cues.iter().all(|c| c.target == Target::Section(0)));
    assert_eq!(tl.tracks_for(Target::Background(5)).count(), 0);
}

#[test]
fn title_chars_start_at_offset_with_random_stagger() {
    let tl = plan(Some(0), 1, Direction::Forward);
    let title_len = TextSplit::new("Frankfurt's Early Development").chars().len();
    let mut slots: Vec<usize> = tl
        .tracks
        .iter()
        .filter(|t| matches!(t.target, Target::TitleChar { .. }) && t.property == Property::AutoAlpha)
        .map(|t| {
            assert_eq!(t.duration, 1.0);
            assert_eq!(t.ease, crate::Ease::OutCubic);
            assert_eq!(t.from, Some(0.0));
            ((t.start - 0.2) / 0.02).round() as usize
        })
        .collect();
    assert_eq!(slots.len(), title_len);
    slots.sort_unstable();
    assert_eq!(slots, (0..title_len).collect::<Vec<_>>());
}

#[test]
fn content_follows_document_order() {
    let tl = plan(Some(0), 1, Direction::Forward);
    let starts: Vec<(ContentSlot, f64)> = tl
        .tracks
        .iter()
        .filter(|t| t.property == Property::YPx)
        .map(|t| match t.target {
            Target::Content { slot, .. } => (slot, t.start),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    let expected = [
        (ContentSlot::Year, 0.4),
        (ContentSlot::Description, 0.5),
        (ContentSlot::Media, 0.6),
    ];
    assert_eq!(starts.len(), expected.len());
    for ((slot, start), (want_slot, want_start)) in starts.iter().zip(expected) {
        assert_eq!(*slot, want_slot);
        assert!((start - want_start).abs() < 1e-9);
    }
}

#[test]
fn chapter_without_media_skips_media_slot() {
    let deck = ChapterDeck::heritage().unwrap();
    assert!(!content_slots(deck.get(0).unwrap()).contains(&ContentSlot::Media));
    assert!(content_slots(deck.get(3).unwrap()).contains(&ContentSlot::Media));
    assert_eq!(
        content_slots(deck.get(0).unwrap()),
        vec![ContentSlot::Year, ContentSlot::Description]
    );
}
