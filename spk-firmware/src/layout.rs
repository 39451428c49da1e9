//! Symbol tables for the two layers.

use spk_common::{keycodes::usage, PointerSymbol, Symbol};

use crate::fuser::KeyGrid;

/// Replace one cell of the base table in the function layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override {
    pub row: usize,
    pub col: usize,
    pub symbol: Symbol,
}
impl Override {
    pub const fn new(row: usize, col: usize, symbol: Symbol) -> Self {
        Self { row, col, symbol }
    }
}

pub type Table<const ROWS: usize, const COLS: usize> = [[Symbol; COLS]; ROWS];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<const ROWS: usize, const COLS: usize> {
    base: Table<ROWS, COLS>,
    function: Table<ROWS, COLS>,
    fn_key: (usize, usize),
}

impl<const ROWS: usize, const COLS: usize> Layout<ROWS, COLS> {
    pub const fn new(
        base: Table<ROWS, COLS>,
        function: Table<ROWS, COLS>,
        fn_key: (usize, usize),
    ) -> Self {
        Self {
            base,
            function,
            fn_key,
        }
    }

    /// A function layer that is the base layer with `overrides` applied in order.
    pub const fn with_overrides(
        base: Table<ROWS, COLS>,
        overrides: &[Override],
        fn_key: (usize, usize),
    ) -> Self {
        let mut function = base;
        let mut i = 0;
        while i < overrides.len() {
            let o = overrides[i];
            function[o.row][o.col] = o.symbol;
            i += 1;
        }
        Self::new(base, function, fn_key)
    }

    pub fn fn_key(&self) -> (usize, usize) {
        self.fn_key
    }

    /// The function layer is active while its key is held.
    pub fn is_fn_active(&self, grid: &KeyGrid<ROWS, COLS>) -> bool {
        grid.is_closed(self.fn_key.0, self.fn_key.1)
    }

    pub fn table(&self, fn_active: bool) -> &Table<ROWS, COLS> {
        if fn_active {
            &self.function
        } else {
            &self.base
        }
    }

    pub fn symbol(&self, fn_active: bool, row: usize, col: usize) -> Symbol {
        self.table(fn_active)
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or_default()
    }
}

pub const ROWS: usize = 5;
pub const COLS: usize = 16;
/// First column wired to the right half.
pub const SPLIT_COL: usize = 8;

const N: Symbol = Symbol::None;

const fn k(code: u8) -> Symbol {
    Symbol::Key(code)
}

const fn p(symbol: PointerSymbol) -> Symbol {
    Symbol::Pointer(symbol)
}

const fn o(row: usize, col: usize, symbol: Symbol) -> Override {
    Override::new(row, col, symbol)
}

use usage::*;

#[rustfmt::skip]
const BASE: Table<ROWS, COLS> = [
    [k(ESCAPE), k(ONE), k(TWO), k(THREE), k(FOUR), k(FIVE), k(SIX), N,
     k(SEVEN), k(EIGHT), k(NINE), k(ZERO), k(MINUS), k(EQUALS), k(BACKSLASH), k(GRAVE)],
    [k(TAB), k(Q), k(W), k(E), k(R), k(T), N, N,
     k(Y), k(U), k(I), k(O), k(P), k(LEFT_BRACKET), k(RIGHT_BRACKET), k(BACKSPACE)],
    [k(LEFT_CTRL), k(A), k(S), k(D), k(F), k(G), N, N,
     k(H), k(J), k(K), k(L), k(SEMICOLON), k(QUOTE), N, k(ENTER)],
    [k(LEFT_SHIFT), k(Z), k(X), k(C), k(V), k(B), N, N,
     k(B), k(usage::N), k(M), k(COMMA), k(PERIOD), k(SLASH), k(RIGHT_SHIFT), Symbol::SENTINEL],
    [N, k(LEFT_GUI), k(LEFT_ALT), N, k(SPACE), N, N, N,
     k(SPACE), N, k(RIGHT_ALT), k(LEFT_GUI), N, N, N, N],
];

#[rustfmt::skip]
const FUNCTION: &[Override] = &[
    o(0, 0, k(NON_US_HASH)),
    o(0, 1, k(F1)), o(0, 2, k(F2)), o(0, 3, k(F3)),
    o(0, 4, k(F4)), o(0, 5, k(F5)), o(0, 6, k(F6)),
    o(0, 8, k(F7)), o(0, 9, k(F8)), o(0, 10, k(F9)),
    o(0, 11, k(F10)), o(0, 12, k(F11)), o(0, 13, k(F12)),
    o(0, 14, k(INSERT)), o(0, 15, k(DELETE)),

    o(1, 0, k(CAPS_LOCK)),
    o(1, 2, p(PointerSymbol::WheelUp)),
    o(1, 3, p(PointerSymbol::Up)),
    o(1, 4, p(PointerSymbol::WheelDown)),
    o(1, 10, k(PRINT_SCREEN)), o(1, 11, k(SCROLL_LOCK)), o(1, 12, k(PAUSE)),
    o(1, 13, k(UP)),

    o(2, 2, p(PointerSymbol::Left)),
    o(2, 3, p(PointerSymbol::Down)),
    o(2, 4, p(PointerSymbol::Right)),
    o(2, 10, k(HOME)), o(2, 11, k(PAGE_UP)), o(2, 12, k(LEFT)), o(2, 13, k(RIGHT)),

    o(3, 11, k(END)), o(3, 12, k(PAGE_DOWN)), o(3, 13, k(DOWN)),

    o(4, 4, p(PointerSymbol::RightClick)),
    o(4, 8, p(PointerSymbol::LeftClick)),
];

/// Two 5×8 halves side by side with the function key next to right shift.
pub const DEFAULT: Layout<ROWS, COLS> = Layout::with_overrides(BASE, FUNCTION, (3, 15));

#[cfg(test)]
#[path = "layout_test.rs"]
mod test;
