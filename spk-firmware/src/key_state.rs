//! Turns the fused grid into symbol press and release edges.

use embassy_time::{Duration, Timer};
use spk_common::{globals::SENTINEL_SETTLE_MS, Symbol, SymbolSet};

use crate::{debug, fuser::KeyGrid, key_reporter::KeySink, layout::Layout};

/// Most key usages forwarded in one call to a [`KeySink`].
pub const MAX_KEYS_PER_EDGE: usize = 64;

pub type KeyList = heapless::Vec<u8, MAX_KEYS_PER_EDGE>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    Idle,
    /// Holding the cycle back after the sentinel was released.
    Settling,
}

/// What changed between two cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub pressed: SymbolSet,
    pub released: SymbolSet,
    /// Everything held this cycle.
    pub current: SymbolSet,
}

impl Edges {
    pub fn key_presses(&self) -> KeyList {
        forwardable(&self.pressed)
    }

    pub fn key_releases(&self) -> KeyList {
        forwardable(&self.released)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.released.is_empty()
    }
}

fn forwardable(set: &SymbolSet) -> KeyList {
    set.iter()
        .filter_map(|s| match s {
            Symbol::Key(code) if !s.is_excluded() => Some(code),
            _ => None,
        })
        .take(MAX_KEYS_PER_EDGE)
        .collect()
}

pub struct KeyStateEngine<const ROWS: usize, const COLS: usize> {
    layout: Layout<ROWS, COLS>,
    settle_delay: Duration,
    previous: SymbolSet,
    state: EngineState,
}

impl<const ROWS: usize, const COLS: usize> KeyStateEngine<ROWS, COLS> {
    pub fn new(layout: Layout<ROWS, COLS>, settle_delay: Duration) -> Self {
        Self {
            layout,
            settle_delay,
            previous: SymbolSet::new(),
            state: EngineState::Idle,
        }
    }

    pub fn with_default_settle(layout: Layout<ROWS, COLS>) -> Self {
        Self::new(layout, Duration::from_millis(SENTINEL_SETTLE_MS))
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Symbols held after the last [`advance`](Self::advance).
    pub fn held(&self) -> &SymbolSet {
        &self.previous
    }

    /// Resolve `grid` through the active layer and diff it against the previous cycle.
    ///
    /// The function key picks the layer for every cell of the grid, itself included.
    pub fn advance(&mut self, grid: &KeyGrid<ROWS, COLS>) -> Edges {
        let table = self.layout.table(self.layout.is_fn_active(grid));

        let current: SymbolSet = grid.closed().map(|(row, col)| table[row][col]).collect();

        let edges = Edges {
            pressed: current.difference(&self.previous),
            released: self.previous.difference(&current),
            current,
        };
        self.previous = current;
        edges
    }

    /// Send the key edges to `sink`, presses first.
    ///
    /// Releasing the sentinel holds the whole cycle for the settle delay before anything is
    /// sent.
    pub async fn dispatch(&mut self, edges: &Edges, sink: &mut impl KeySink) {
        if edges.released.contains(Symbol::SENTINEL) {
            self.state = EngineState::Settling;
            debug!("sentinel released; settling");
            Timer::after(self.settle_delay).await;
            self.state = EngineState::Idle;
        }

        let presses = edges.key_presses();
        if !presses.is_empty() {
            sink.press(&presses).await;
        }
        let releases = edges.key_releases();
        if !releases.is_empty() {
            sink.release(&releases).await;
        }
    }
}

#[cfg(test)]
#[path = "key_state_test.rs"]
mod test;
