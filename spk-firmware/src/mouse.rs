use spk_common::{mouse::MouseAccel, PointerSymbol, SymbolSet};

use crate::{debug, key_reporter::PointerSink};

/// Pointer output of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseUpdate {
    /// (dx, dy, wheel) when any direction is held.
    pub movement: Option<(i8, i8, i8)>,
    pub pressed_buttons: u8,
    pub released_buttons: u8,
}

impl MouseUpdate {
    pub fn is_empty(&self) -> bool {
        self.movement.is_none() && self.pressed_buttons == 0 && self.released_buttons == 0
    }
}

/// Drives the pointer from the movement and click symbols held on the function layer.
pub struct MouseEmulator {
    accel: MouseAccel,
    velocity: f32,
    previous: SymbolSet,
}

impl Default for MouseEmulator {
    fn default() -> Self {
        Self::new(MouseAccel::default())
    }
}

impl MouseEmulator {
    pub fn new(accel: MouseAccel) -> Self {
        Self {
            velocity: accel.floor,
            accel,
            previous: SymbolSet::new(),
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Work out this cycle's pointer output from everything held.
    ///
    /// Opposite directions held together resolve to up, left and wheel up. Movement is scaled
    /// by the velocity reached before this cycle; the velocity then ramps while anything moves
    /// and falls back to the floor otherwise.
    pub fn update(&mut self, current: &SymbolSet) -> MouseUpdate {
        let held = current.pointers();
        let dir = |neg: PointerSymbol, pos: PointerSymbol| -> i8 {
            if held.contains_pointer(neg) {
                -1
            } else if held.contains_pointer(pos) {
                1
            } else {
                0
            }
        };

        let dy = dir(PointerSymbol::Up, PointerSymbol::Down);
        let dx = dir(PointerSymbol::Left, PointerSymbol::Right);
        let wheel = -dir(PointerSymbol::WheelUp, PointerSymbol::WheelDown);

        let moving = dx != 0 || dy != 0 || wheel != 0;
        let movement = moving.then(|| {
            (
                MouseAccel::scale(dx, self.velocity),
                MouseAccel::scale(dy, self.velocity),
                wheel,
            )
        });
        self.velocity = self.accel.next(self.velocity, moving);

        let pressed_buttons = buttons(&held.difference(&self.previous));
        let released_buttons = buttons(&self.previous.difference(&held));
        self.previous = held;

        MouseUpdate {
            movement,
            pressed_buttons,
            released_buttons,
        }
    }

    /// Send `update` to `sink`: button presses, then releases, then movement.
    pub async fn report(&self, update: &MouseUpdate, sink: &mut impl PointerSink) {
        if update.pressed_buttons != 0 {
            debug!("mouse buttons down {:#x}", update.pressed_buttons);
            sink.press_buttons(update.pressed_buttons).await;
        }
        if update.released_buttons != 0 {
            debug!("mouse buttons up {:#x}", update.released_buttons);
            sink.release_buttons(update.released_buttons).await;
        }
        if let Some((dx, dy, wheel)) = update.movement {
            sink.move_by(dx, dy, wheel).await;
        }
    }
}

fn buttons(set: &SymbolSet) -> u8 {
    PointerSymbol::ALL
        .iter()
        .filter(|p| set.contains_pointer(**p))
        .fold(0, |acc, p| acc | p.button())
}

#[cfg(test)]
#[path = "mouse_test.rs"]
mod test;
