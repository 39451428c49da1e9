pub mod key_range {
    pub const BASIC_MIN: u8 = 0x4;
    pub const BASIC_A: u8 = 0x4;
    pub const BASIC_1: u8 = 0x1e;
    pub const BASIC_0: u8 = 0x27;
    pub const BASIC_MAX: u8 = 0xa4;
    pub const MODIFIER_MIN: u8 = 0xe0;
    pub const MODIFIER_MAX: u8 = 0xe7;

    pub const fn is_modifier(code: u8) -> bool {
        code >= MODIFIER_MIN && code <= MODIFIER_MAX
    }

    /// The bit a modifier usage occupies in the report's modifier byte.
    pub const fn modifier_bit(code: u8) -> u8 {
        1 << (code - MODIFIER_MIN)
    }
}

/// HID keyboard page usage ids.
pub mod usage {
    pub const A: u8 = 0x04;
    pub const B: u8 = 0x05;
    pub const C: u8 = 0x06;
    pub const D: u8 = 0x07;
    pub const E: u8 = 0x08;
    pub const F: u8 = 0x09;
    pub const G: u8 = 0x0a;
    pub const H: u8 = 0x0b;
    pub const I: u8 = 0x0c;
    pub const J: u8 = 0x0d;
    pub const K: u8 = 0x0e;
    pub const L: u8 = 0x0f;
    pub const M: u8 = 0x10;
    pub const N: u8 = 0x11;
    pub const O: u8 = 0x12;
    pub const P: u8 = 0x13;
    pub const Q: u8 = 0x14;
    pub const R: u8 = 0x15;
    pub const S: u8 = 0x16;
    pub const T: u8 = 0x17;
    pub const U: u8 = 0x18;
    pub const V: u8 = 0x19;
    pub const W: u8 = 0x1a;
    pub const X: u8 = 0x1b;
    pub const Y: u8 = 0x1c;
    pub const Z: u8 = 0x1d;

    pub const ONE: u8 = 0x1e;
    pub const TWO: u8 = 0x1f;
    pub const THREE: u8 = 0x20;
    pub const FOUR: u8 = 0x21;
    pub const FIVE: u8 = 0x22;
    pub const SIX: u8 = 0x23;
    pub const SEVEN: u8 = 0x24;
    pub const EIGHT: u8 = 0x25;
    pub const NINE: u8 = 0x26;
    pub const ZERO: u8 = 0x27;

    pub const ENTER: u8 = 0x28;
    pub const ESCAPE: u8 = 0x29;
    pub const BACKSPACE: u8 = 0x2a;
    pub const TAB: u8 = 0x2b;
    pub const SPACE: u8 = 0x2c;
    pub const MINUS: u8 = 0x2d;
    pub const EQUALS: u8 = 0x2e;
    pub const LEFT_BRACKET: u8 = 0x2f;
    pub const RIGHT_BRACKET: u8 = 0x30;
    pub const BACKSLASH: u8 = 0x31;
    pub const NON_US_HASH: u8 = 0x32;
    pub const SEMICOLON: u8 = 0x33;
    pub const QUOTE: u8 = 0x34;
    pub const GRAVE: u8 = 0x35;
    pub const COMMA: u8 = 0x36;
    pub const PERIOD: u8 = 0x37;
    pub const SLASH: u8 = 0x38;
    pub const CAPS_LOCK: u8 = 0x39;

    pub const F1: u8 = 0x3a;
    pub const F2: u8 = 0x3b;
    pub const F3: u8 = 0x3c;
    pub const F4: u8 = 0x3d;
    pub const F5: u8 = 0x3e;
    pub const F6: u8 = 0x3f;
    pub const F7: u8 = 0x40;
    pub const F8: u8 = 0x41;
    pub const F9: u8 = 0x42;
    pub const F10: u8 = 0x43;
    pub const F11: u8 = 0x44;
    pub const F12: u8 = 0x45;

    pub const PRINT_SCREEN: u8 = 0x46;
    pub const SCROLL_LOCK: u8 = 0x47;
    pub const PAUSE: u8 = 0x48;
    pub const INSERT: u8 = 0x49;
    pub const HOME: u8 = 0x4a;
    pub const PAGE_UP: u8 = 0x4b;
    pub const DELETE: u8 = 0x4c;
    pub const END: u8 = 0x4d;
    pub const PAGE_DOWN: u8 = 0x4e;
    pub const RIGHT: u8 = 0x4f;
    pub const LEFT: u8 = 0x50;
    pub const DOWN: u8 = 0x51;
    pub const UP: u8 = 0x52;

    pub const F13: u8 = 0x68;
    pub const F24: u8 = 0x73;

    pub const LEFT_CTRL: u8 = 0xe0;
    pub const LEFT_SHIFT: u8 = 0xe1;
    pub const LEFT_ALT: u8 = 0xe2;
    pub const LEFT_GUI: u8 = 0xe3;
    pub const RIGHT_CTRL: u8 = 0xe4;
    pub const RIGHT_SHIFT: u8 = 0xe5;
    pub const RIGHT_ALT: u8 = 0xe6;
    pub const RIGHT_GUI: u8 = 0xe7;
}

use usage::*;

/// Mnemonics accepted by [`key_code`]. Alternatives for the same usage are listed separately.
const KEY_NAMES: &[(&str, u8)] = &[
    ("a", A),
    ("b", B),
    ("c", C),
    ("d", D),
    ("e", E),
    ("f", F),
    ("g", G),
    ("h", H),
    ("i", I),
    ("j", J),
    ("k", K),
    ("l", L),
    ("m", M),
    ("n", N),
    ("o", O),
    ("p", P),
    ("q", Q),
    ("r", R),
    ("s", S),
    ("t", T),
    ("u", U),
    ("v", V),
    ("w", W),
    ("x", X),
    ("y", Y),
    ("z", Z),
    ("1", ONE),
    ("2", TWO),
    ("3", THREE),
    ("4", FOUR),
    ("5", FIVE),
    ("6", SIX),
    ("7", SEVEN),
    ("8", EIGHT),
    ("9", NINE),
    ("0", ZERO),
    ("enter", ENTER),
    ("return", ENTER),
    ("ent", ENTER),
    ("escape", ESCAPE),
    ("esc", ESCAPE),
    ("backspace", BACKSPACE),
    ("bksp", BACKSPACE),
    ("tab", TAB),
    ("space", SPACE),
    ("spc", SPACE),
    ("minus", MINUS),
    ("-", MINUS),
    ("equals", EQUALS),
    ("=", EQUALS),
    ("leftbracket", LEFT_BRACKET),
    ("[", LEFT_BRACKET),
    ("rightbracket", RIGHT_BRACKET),
    ("]", RIGHT_BRACKET),
    ("backslash", BACKSLASH),
    ("\\", BACKSLASH),
    ("nonushash", NON_US_HASH),
    ("pound", NON_US_HASH),
    ("semicolon", SEMICOLON),
    (";", SEMICOLON),
    ("quote", QUOTE),
    ("'", QUOTE),
    ("grave", GRAVE),
    ("`", GRAVE),
    ("comma", COMMA),
    (",", COMMA),
    ("period", PERIOD),
    (".", PERIOD),
    ("slash", SLASH),
    ("/", SLASH),
    ("capslock", CAPS_LOCK),
    ("f1", F1),
    ("f2", F2),
    ("f3", F3),
    ("f4", F4),
    ("f5", F5),
    ("f6", F6),
    ("f7", F7),
    ("f8", F8),
    ("f9", F9),
    ("f10", F10),
    ("f11", F11),
    ("f12", F12),
    ("printscreen", PRINT_SCREEN),
    ("scrolllock", SCROLL_LOCK),
    ("pause", PAUSE),
    ("insert", INSERT),
    ("home", HOME),
    ("pageup", PAGE_UP),
    ("pgup", PAGE_UP),
    ("delete", DELETE),
    ("del", DELETE),
    ("end", END),
    ("pagedown", PAGE_DOWN),
    ("pgdn", PAGE_DOWN),
    ("right", RIGHT),
    ("left", LEFT),
    ("down", DOWN),
    ("up", UP),
    ("f24", F24),
    ("leftctrl", LEFT_CTRL),
    ("lc", LEFT_CTRL),
    ("leftshift", LEFT_SHIFT),
    ("ls", LEFT_SHIFT),
    ("leftalt", LEFT_ALT),
    ("la", LEFT_ALT),
    ("leftgui", LEFT_GUI),
    ("lg", LEFT_GUI),
    ("rightctrl", RIGHT_CTRL),
    ("rc", RIGHT_CTRL),
    ("rightshift", RIGHT_SHIFT),
    ("rs", RIGHT_SHIFT),
    ("rightalt", RIGHT_ALT),
    ("ra", RIGHT_ALT),
    ("rightgui", RIGHT_GUI),
    ("rg", RIGHT_GUI),
];

/// Look up a usage id by mnemonic. Case is ignored, as are `-` and `_` between words.
///
/// ```
/// use spk_common::keycodes::{key_code, usage};
///
/// assert_eq!(key_code("Page_Up"), Some(usage::PAGE_UP));
/// assert_eq!(key_code("no-such-key"), None);
/// ```
pub fn key_code(name: &str) -> Option<u8> {
    let wanted = || {
        name.chars()
            .filter(|c| !matches!(c, '-' | '_') || name.len() == 1)
            .map(|c| c.to_ascii_lowercase())
    };
    KEY_NAMES
        .iter()
        .find(|(n, _)| n.chars().eq(wanted()))
        .map(|(_, code)| *code)
}

/// The first mnemonic registered for `code`.
pub fn key_name(code: u8) -> Option<&'static str> {
    KEY_NAMES.iter().find(|(_, c)| *c == code).map(|(n, _)| *n)
}

#[cfg(test)]
#[path = "keycodes_test.rs"]
mod test;
