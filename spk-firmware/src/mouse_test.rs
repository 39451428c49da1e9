extern crate std;

use embassy_futures::block_on;
use spk_common::Symbol;
use std::vec;

use super::*;
use crate::sink_test_stub::{RecordingSink, SinkEvent};

fn held(symbols: &[PointerSymbol]) -> SymbolSet {
    symbols.iter().map(|p| Symbol::Pointer(*p)).collect()
}

#[test]
fn up_ramps() {
    let mut m = MouseEmulator::default();
    let up = held(&[PointerSymbol::Up]);

    let moves: vec::Vec<_> = (0..3).map(|_| m.update(&up).movement).collect();
    assert_eq!(
        moves,
        vec![Some((0, -3, 0)), Some((0, -3, 0)), Some((0, -4, 0))]
    );
    assert_eq!(m.velocity(), 4.5);
}

#[test]
fn velocity_stays_in_range() {
    let mut m = MouseEmulator::default();
    let right = held(&[PointerSymbol::Right]);
    for _ in 0..100 {
        m.update(&right);
        assert!((3.0..=20.0).contains(&m.velocity()));
    }
    assert_eq!(m.velocity(), 20.0);
    assert_eq!(m.update(&right).movement, Some((20, 0, 0)));

    assert_eq!(m.update(&SymbolSet::new()).movement, None);
    assert_eq!(m.velocity(), 3.0);
}

#[test]
fn opposite_directions() {
    let mut m = MouseEmulator::default();
    let all = held(&[
        PointerSymbol::Up,
        PointerSymbol::Down,
        PointerSymbol::Left,
        PointerSymbol::Right,
        PointerSymbol::WheelUp,
        PointerSymbol::WheelDown,
    ]);
    assert_eq!(m.update(&all).movement, Some((-3, -3, 1)));

    let mut m = MouseEmulator::default();
    let down_right = held(&[PointerSymbol::Down, PointerSymbol::Right, PointerSymbol::WheelDown]);
    assert_eq!(m.update(&down_right).movement, Some((3, 3, -1)));
}

#[test]
fn wheel_alone_moves_and_ramps() {
    let mut m = MouseEmulator::default();
    let wheel = held(&[PointerSymbol::WheelUp]);
    assert_eq!(m.update(&wheel).movement, Some((0, 0, 1)));
    assert_eq!(m.update(&wheel).movement, Some((0, 0, 1)));
    assert_eq!(m.velocity(), 4.0);
}

#[test]
fn clicks_are_edges() {
    let mut m = MouseEmulator::default();

    let u = m.update(&held(&[PointerSymbol::LeftClick, PointerSymbol::MiddleClick]));
    assert_eq!(u.pressed_buttons, 5);
    assert_eq!(u.released_buttons, 0);
    assert_eq!(u.movement, None);

    let u = m.update(&held(&[PointerSymbol::LeftClick, PointerSymbol::MiddleClick]));
    assert!(u.is_empty());

    let u = m.update(&held(&[PointerSymbol::RightClick, PointerSymbol::MiddleClick]));
    assert_eq!(u.pressed_buttons, 2);
    assert_eq!(u.released_buttons, 1);

    let u = m.update(&SymbolSet::new());
    assert_eq!(u.released_buttons, 6);
}

#[test]
fn keys_are_ignored() {
    let mut m = MouseEmulator::default();
    let mut current = held(&[]);
    current.insert(Symbol::Key(4));
    current.insert(Symbol::SENTINEL);
    assert!(m.update(&current).is_empty());
}

#[test]
fn report_order() {
    let mut m = MouseEmulator::new(MouseAccel::slow());
    let mut sink = RecordingSink::default();
    block_on(async {
        let u = m.update(&held(&[PointerSymbol::LeftClick, PointerSymbol::Left]));
        m.report(&u, &mut sink).await;
        let u = m.update(&held(&[PointerSymbol::RightClick, PointerSymbol::Left]));
        m.report(&u, &mut sink).await;
        let u = m.update(&SymbolSet::new());
        m.report(&u, &mut sink).await;
    });
    assert_eq!(
        sink.take(),
        vec![
            SinkEvent::PressButtons(1),
            SinkEvent::Move(-1, 0, 0),
            SinkEvent::PressButtons(2),
            SinkEvent::ReleaseButtons(1),
            SinkEvent::Move(-1, 0, 0),
            SinkEvent::ReleaseButtons(2),
        ]
    );
}
