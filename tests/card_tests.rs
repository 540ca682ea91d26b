//! Card entity integration tests.
//!
//! These tests drive cards only through their public operations and the
//! per-tick hook, the way a host loop does.

use std::cell::RefCell;
use std::rc::Rc;

use card_battle::animation::Move;
use card_battle::cards::{Card, CardColor, CardData, CardError, CardId, VisualStateKind};
use card_battle::core::CardConfig;
use card_battle::render::{Rect, RenderSurface, Rgb, TextStyle};
use proptest::prelude::*;

fn card(type_id: &str, color: &str) -> Result<Card, CardError> {
    let data = CardData::new(CardId::new(1), "Test", type_id, color)
        .with_stats(3, 7)
        .with_image("art");
    Card::create(Rc::new(data), &CardConfig::default())
}

fn battle(ap: i32, hp: i32) -> Card {
    let data = CardData::battle(CardId::new(1), "Knight", "red", ap, hp);
    Card::create(Rc::new(data), &CardConfig::default()).unwrap()
}

/// Test that every supported color builds and maps to its background.
#[test]
fn test_supported_colors() {
    let expected = [
        ("red", 0xff0000),
        ("blue", 0x0000ff),
        ("green", 0x00ff00),
        ("white", 0xffffff),
        ("black", 0x000000),
        ("orange", 0xffa500),
    ];

    for (name, rgb) in expected {
        let card = card("battle", name).unwrap();
        assert_eq!(card.background(), Rgb(rgb), "background of {}", name);
        assert_eq!(card.color().name(), name);
    }
    assert_eq!(CardColor::ALL.len(), expected.len());
}

#[test]
fn test_unknown_color_fails() {
    let err = card("battle", "purple").unwrap_err();
    assert_eq!(err, CardError::UnknownColor("purple".to_string()));
}

#[test]
fn test_unknown_type_fails() {
    let err = card("spell", "red").unwrap_err();
    assert_eq!(err, CardError::UnknownCardType("spell".to_string()));
}

#[test]
fn test_display_text_by_type() {
    assert_eq!(battle(3, 7).display_text(), "03/07");
    assert_eq!(battle(12, 0).display_text(), "12/00");
    assert_eq!(card("power", "blue").unwrap().display_text(), "P");
}

/// Test the static → moving → settled scenario for `move_position`.
#[test]
fn test_move_position_then_idle() {
    let mut card = battle(3, 7);
    assert_eq!(card.visual_state().kind(), VisualStateKind::Static);

    card.move_position(50.0, 60.0);
    assert_eq!(card.visual_state().kind(), VisualStateKind::Moving);
    assert_eq!(card.pending_moves(), 1);

    card.pre_update(16);
    assert_eq!((card.x(), card.y()), (50.0, 60.0));
    assert!(!card.is_animating());

    // Drained Moving state: further ticks change nothing.
    let settled = card.transform();
    for _ in 0..5 {
        card.pre_update(100);
    }
    assert_eq!(card.transform(), settled);
    assert_eq!(card.visual_state().kind(), VisualStateKind::Moving);
}

#[test]
fn test_move_from_to_snaps_then_travels() {
    let mut card = battle(1, 1);
    card.move_from_to(0.0, 0.0, 200.0, 100.0, 400);
    assert_eq!(card.pending_moves(), 2);

    card.pre_update(200);
    assert_eq!((card.x(), card.y()), (100.0, 50.0));

    card.pre_update(200);
    assert_eq!((card.x(), card.y()), (200.0, 100.0));
    assert!(!card.is_animating());
}

#[test]
fn test_open_close_idempotent() {
    let mut card = battle(1, 1);
    let opened = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&opened);
    assert!(!card.open_then(move |_| *counter.borrow_mut() += 1));
    assert_eq!(card.pending_moves(), 0);

    assert!(card.close());
    assert_eq!(card.pending_moves(), 1);

    card.pre_update(200);
    assert!(card.is_closed());
    assert_eq!(card.transform().scale_x, 0.0);

    // Once closed, another close queues nothing.
    assert!(!card.close());
    assert_eq!(card.pending_moves(), 0);

    let counter = Rc::clone(&opened);
    assert!(card.open_then(move |_| *counter.borrow_mut() += 1));
    card.pre_update(200);
    assert!(!card.is_closed());
    assert_eq!(*opened.borrow(), 1);
}

/// A card only counts as closed once its close segment has played, so a
/// second close requested mid-animation queues another segment.
#[test]
fn test_close_while_closing_queues_again() {
    let mut card = battle(1, 1);

    assert!(card.close());
    assert!(card.close());
    assert_eq!(card.pending_moves(), 2);
    assert!(!card.is_closed());

    card.pre_update(200);
    assert!(card.is_closed());
    assert_eq!(card.pending_moves(), 1);

    card.pre_update(200);
    assert!(card.is_closed());
    assert!(!card.is_animating());
    assert!(!card.close());
}

#[test]
fn test_flip_queues_close_then_open() {
    let mut card = battle(1, 1);
    card.move_position(10.0, 10.0);
    card.pre_update(0);

    assert!(card.flip());
    assert_eq!(card.pending_moves(), 2);
    assert!(!card.is_face_up());

    card.pre_update(199);
    assert!(!card.is_face_up());

    // The face toggles exactly when the close segment ends.
    card.pre_update(1);
    assert!(card.is_face_up());
    assert!(card.is_closed());
    assert_eq!(card.x(), 60.0);

    card.pre_update(200);
    assert!(card.is_face_up());
    assert!(!card.is_closed());
    assert_eq!((card.x(), card.transform().scale_x), (10.0, 1.0));
}

#[test]
fn test_flip_closed_card_is_noop() {
    let mut card = battle(1, 1);
    card.close();
    card.pre_update(200);

    assert!(!card.flip());
    assert_eq!(card.pending_moves(), 0);
    assert!(!card.is_face_up());
}

#[test]
fn test_change_ap_display_replaces_moving() {
    let mut card = battle(3, 7);
    card.move_from_to(0.0, 0.0, 100.0, 0.0, 1000);
    card.pre_update(100);

    card.change_ap_display(5).unwrap();
    assert_eq!(card.visual_state().kind(), VisualStateKind::Updating);
    assert_eq!(card.display_text(), "05/07");
    assert!(!card.is_animating());

    // A new move leaves Updating for a fresh Moving state.
    card.move_position(0.0, 0.0);
    assert_eq!(card.visual_state().kind(), VisualStateKind::Moving);
}

#[test]
fn test_power_card_has_no_health() {
    let data = CardData::power(CardId::new(2), "Spark", "green");
    let mut card = Card::create(Rc::new(data), &CardConfig::default()).unwrap();
    assert!(matches!(card.change_ap_display(2), Err(CardError::MissingStat(_))));
}

#[derive(Default)]
struct Recorder {
    rects: Vec<(Rect, Rgb)>,
    images: Vec<(String, Rect)>,
    texts: Vec<String>,
}

impl RenderSurface for Recorder {
    fn texture_size(&self, key: &str) -> Option<(f32, f32)> {
        (key == "card-back").then_some((88.0, 138.0))
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.rects.push((rect, color));
    }

    fn draw_image(&mut self, key: &str, rect: Rect) {
        self.images.push((key.to_string(), rect));
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _scale_x: f32, _style: &TextStyle) {
        self.texts.push(text.to_string());
    }
}

#[test]
fn test_render_face_down() {
    let card = battle(3, 7);
    let mut surface = Recorder::default();
    card.render(&mut surface);

    assert_eq!(surface.rects, vec![(Rect::new(0.0, 0.0, 100.0, 150.0), Rgb(0xff0000))]);
    assert_eq!(surface.images, vec![("card-back".to_string(), Rect::new(6.0, 6.0, 88.0, 138.0))]);
    assert_eq!(surface.texts, vec!["03/07".to_string()]);
}

proptest! {
    /// Moves requested while moving join the running queue in order.
    #[test]
    fn test_moves_merge_in_request_order(targets in prop::collection::vec((0i16..500, 0i16..500), 1..12)) {
        let mut card = battle(1, 1);
        card.move_from_to(0.0, 0.0, 1.0, 1.0, 100);
        let before = card.pending_moves();

        let order = Rc::new(RefCell::new(Vec::new()));
        for (index, &(x, y)) in targets.iter().enumerate() {
            let order = Rc::clone(&order);
            card.animate(
                [Move::to(f32::from(x), f32::from(y)).on_complete(move |_: &mut Card| order.borrow_mut().push(index))],
                50,
            );
        }
        prop_assert_eq!(card.visual_state().kind(), VisualStateKind::Moving);
        prop_assert_eq!(card.pending_moves(), before + targets.len());

        for _ in 0..targets.len() * 2 + 4 {
            card.pre_update(50);
        }
        prop_assert_eq!(order.borrow().clone(), (0..targets.len()).collect::<Vec<_>>());

        let (x, y) = targets[targets.len() - 1];
        prop_assert_eq!((card.x(), card.y()), (f32::from(x), f32::from(y)));
    }
}
