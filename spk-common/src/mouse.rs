/// How pointer speed builds up while a movement key is held.
///
/// Velocity starts at `floor`, grows by `step` every scan cycle that has movement and never
/// exceeds `ceiling`. A cycle without movement drops it back to `floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseAccel {
    pub floor: f32,
    pub step: f32,
    pub ceiling: f32,
}
impl Default for MouseAccel {
    fn default() -> Self {
        MouseAccel::normal()
    }
}
impl MouseAccel {
    pub const fn slow() -> Self {
        Self {
            floor: 1.0,
            step: 0.25,
            ceiling: 8.0,
        }
    }
    pub const fn normal() -> Self {
        Self {
            floor: 3.0,
            step: 0.5,
            ceiling: 20.0,
        }
    }
    pub const fn fast() -> Self {
        Self {
            floor: 4.0,
            step: 1.0,
            ceiling: 40.0,
        }
    }

    /// Velocity for the next cycle.
    pub fn next(&self, velocity: f32, moving: bool) -> f32 {
        if moving {
            min(velocity + self.step, self.ceiling)
        } else {
            self.floor
        }
    }

    /// Scale a unit direction by `velocity`, truncating toward zero into report range.
    pub fn scale(direction: i8, velocity: f32) -> i8 {
        let v = direction as f32 * velocity;
        // `as` saturates out of range floats
        v.clamp(-127.0, 127.0) as i8
    }
}

fn min(a: f32, b: f32) -> f32 {
    if a < b {
        a
    } else {
        b
    }
}

#[cfg(test)]
#[path = "mouse_test.rs"]
mod test;
