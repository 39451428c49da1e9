//! What a matrix cell means once a layer has been chosen.

use crate::keycodes::usage;

/// Symbols consumed by the mouse emulation instead of being sent as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PointerSymbol {
    Up = 0,
    Down,
    Left,
    Right,
    WheelUp,
    WheelDown,
    LeftClick,
    RightClick,
    MiddleClick,
}
impl PointerSymbol {
    pub const ALL: [PointerSymbol; 9] = [
        PointerSymbol::Up,
        PointerSymbol::Down,
        PointerSymbol::Left,
        PointerSymbol::Right,
        PointerSymbol::WheelUp,
        PointerSymbol::WheelDown,
        PointerSymbol::LeftClick,
        PointerSymbol::RightClick,
        PointerSymbol::MiddleClick,
    ];

    const fn bit(self) -> u16 {
        1 << self as u8
    }

    /// HID mouse button mask for click symbols; zero for movement.
    pub const fn button(self) -> u8 {
        match self {
            PointerSymbol::LeftClick => 1,
            PointerSymbol::RightClick => 2,
            PointerSymbol::MiddleClick => 4,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    #[default]
    None,
    Key(u8),
    Pointer(PointerSymbol),
}
impl Symbol {
    /// Overflow key sharing the function-key position. It is never reported and its release is
    /// held back until the switch has settled.
    pub const SENTINEL: Symbol = Symbol::Key(usage::F24);

    pub const fn key(code: u8) -> Self {
        Symbol::Key(code)
    }

    /// Symbols that must never reach the keyboard HID report.
    pub const fn is_excluded(&self) -> bool {
        match self {
            Symbol::None | Symbol::Pointer(_) => true,
            Symbol::Key(code) => *code == usage::F24,
        }
    }
}

const KEY_WORDS: usize = 4;

/// A set of [`Symbol`]s backed by a fixed bitmap; keys by usage id, pointer symbols and the
/// none marker by flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymbolSet {
    keys: [u64; KEY_WORDS],
    pointers: u16,
    none: bool,
}
impl SymbolSet {
    pub const fn new() -> Self {
        Self {
            keys: [0; KEY_WORDS],
            pointers: 0,
            none: false,
        }
    }

    /// Returns `true` if the symbol was not already in the set.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::None => !core::mem::replace(&mut self.none, true),
            Symbol::Key(code) => {
                let (i, bit) = key_pos(code);
                let old = self.keys[i];
                self.keys[i] |= bit;
                old & bit == 0
            }
            Symbol::Pointer(p) => {
                let old = self.pointers;
                self.pointers |= p.bit();
                old & p.bit() == 0
            }
        }
    }

    pub fn remove(&mut self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::None => core::mem::replace(&mut self.none, false),
            Symbol::Key(code) => {
                let (i, bit) = key_pos(code);
                let old = self.keys[i];
                self.keys[i] &= !bit;
                old & bit != 0
            }
            Symbol::Pointer(p) => {
                let old = self.pointers;
                self.pointers &= !p.bit();
                old & p.bit() != 0
            }
        }
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::None => self.none,
            Symbol::Key(code) => {
                let (i, bit) = key_pos(code);
                self.keys[i] & bit != 0
            }
            Symbol::Pointer(p) => self.pointers & p.bit() != 0,
        }
    }

    pub fn contains_pointer(&self, p: PointerSymbol) -> bool {
        self.pointers & p.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        !self.none && self.pointers == 0 && self.keys.iter().all(|w| *w == 0)
    }

    pub fn len(&self) -> usize {
        self.keys.iter().map(|w| w.count_ones() as usize).sum::<usize>()
            + self.pointers.count_ones() as usize
            + self.none as usize
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Symbols in `self` that are not in `other`.
    pub fn difference(&self, other: &SymbolSet) -> SymbolSet {
        let mut keys = [0; KEY_WORDS];
        for (k, (a, b)) in keys.iter_mut().zip(self.keys.iter().zip(other.keys.iter())) {
            *k = a & !b;
        }
        SymbolSet {
            keys,
            pointers: self.pointers & !other.pointers,
            none: self.none && !other.none,
        }
    }

    pub fn intersection(&self, other: &SymbolSet) -> SymbolSet {
        let mut keys = [0; KEY_WORDS];
        for (k, (a, b)) in keys.iter_mut().zip(self.keys.iter().zip(other.keys.iter())) {
            *k = a & b;
        }
        SymbolSet {
            keys,
            pointers: self.pointers & other.pointers,
            none: self.none && other.none,
        }
    }

    /// Only the pointer symbols of this set.
    pub fn pointers(&self) -> SymbolSet {
        SymbolSet {
            pointers: self.pointers,
            ..SymbolSet::new()
        }
    }

    /// Key usage ids in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|code| {
            let (i, bit) = key_pos(*code);
            self.keys[i] & bit != 0
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        let none = self.none.then_some(Symbol::None);
        none.into_iter()
            .chain(self.keys().map(Symbol::Key))
            .chain(
                PointerSymbol::ALL
                    .into_iter()
                    .filter(|p| self.contains_pointer(*p))
                    .map(Symbol::Pointer),
            )
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        let mut set = SymbolSet::new();
        for s in iter {
            set.insert(s);
        }
        set
    }
}

#[inline]
fn key_pos(code: u8) -> (usize, u64) {
    ((code >> 6) as usize, 1 << (code & 63))
}

#[cfg(test)]
#[path = "symbol_test.rs"]
mod test;
