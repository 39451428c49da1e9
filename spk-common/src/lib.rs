#![no_std]
//! Types shared by the SPK split keyboard firmware and the board crates that wire it to real
//! hardware.

pub mod globals;
pub mod keycodes;
pub mod mouse;
pub mod symbol;

pub use symbol::{PointerSymbol, Symbol, SymbolSet};
