use super::*;
use crate::kc;

#[test]
fn default_base_layer() {
    let l = &DEFAULT;
    assert_eq!(l.symbol(false, 0, 0), Symbol::Key(kc!("esc")));
    assert_eq!(l.symbol(false, 0, 1), Symbol::Key(kc!("1")));
    assert_eq!(l.symbol(false, 0, 7), Symbol::None);
    assert_eq!(l.symbol(false, 3, 9), Symbol::Key(kc!("n")));
    assert_eq!(l.symbol(false, 4, 8), Symbol::Key(kc!("space")));
    assert_eq!(l.symbol(false, 1, 3), Symbol::Key(kc!("e")));
}

#[test]
fn default_function_layer() {
    let l = &DEFAULT;
    assert_eq!(l.symbol(true, 0, 0), Symbol::Key(kc!("pound")));
    assert_eq!(l.symbol(true, 0, 8), Symbol::Key(kc!("f7")));
    assert_eq!(l.symbol(true, 1, 3), Symbol::Pointer(PointerSymbol::Up));
    assert_eq!(l.symbol(true, 2, 3), Symbol::Pointer(PointerSymbol::Down));
    assert_eq!(l.symbol(true, 4, 8), Symbol::Pointer(PointerSymbol::LeftClick));
    assert_eq!(l.symbol(true, 3, 13), Symbol::Key(kc!("down")));

    // untouched cells fall through to the base layer
    assert_eq!(l.symbol(true, 1, 1), Symbol::Key(kc!("q")));
    assert_eq!(l.symbol(true, 2, 0), Symbol::Key(kc!("leftctrl")));
}

#[test]
fn fn_key_is_the_sentinel_in_both_layers() {
    let (row, col) = DEFAULT.fn_key();
    assert_eq!((row, col), (3, 15));
    assert_eq!(DEFAULT.symbol(false, row, col), Symbol::SENTINEL);
    assert_eq!(DEFAULT.symbol(true, row, col), Symbol::SENTINEL);
}

#[test]
fn fn_active() {
    let mut grid = KeyGrid::<ROWS, COLS>::EMPTY;
    assert!(!DEFAULT.is_fn_active(&grid));
    grid.set(3, 15, true);
    assert!(DEFAULT.is_fn_active(&grid));
}

#[test]
fn overrides_apply_in_order() {
    const L: Layout<1, 2> = Layout::with_overrides(
        [[Symbol::Key(usage::A), Symbol::None]],
        &[
            Override::new(0, 1, Symbol::Key(usage::B)),
            Override::new(0, 1, Symbol::Key(usage::C)),
        ],
        (0, 0),
    );
    assert_eq!(L.table(false), &[[Symbol::Key(usage::A), Symbol::None]]);
    assert_eq!(
        L.table(true),
        &[[Symbol::Key(usage::A), Symbol::Key(usage::C)]]
    );
    assert_eq!(L.symbol(true, 1, 0), Symbol::None);
    assert_eq!(L.symbol(false, 0, 2), Symbol::None);
}
