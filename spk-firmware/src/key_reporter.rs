use embassy_usb::driver::Driver;
use spk_common::keycodes::key_range::{is_modifier, modifier_bit};

use crate::{add_key_bit, del_key_bit, hid::HidWriter, warn};

pub const KEYBOARD_REPORT_ID: u8 = 6;
pub const MOUSE_REPORT_ID: u8 = 2;

/// Where keyboard usages go once they have been resolved from the matrix. Pressing a key that
/// is already down, or releasing one that is up, changes nothing.
pub trait KeySink {
    async fn press(&mut self, keys: &[u8]);
    async fn release(&mut self, keys: &[u8]);
}

/// Where the mouse emulation sends pointer movement and buttons.
pub trait PointerSink {
    async fn move_by(&mut self, dx: i8, dy: i8, wheel: i8);
    async fn press_buttons(&mut self, buttons: u8);
    async fn release_buttons(&mut self, buttons: u8);
}

/// Keeps the state of the NKRO keyboard report and the mouse buttons and writes reports to the
/// HID endpoint whenever they change.
pub struct Reporter<'d, D: Driver<'d>, const DESC_SIZE: usize> {
    hid_writer: HidWriter<'d, D, DESC_SIZE>,
    keyboard_report: [u8; crate::KEY_BITS_SIZE + 2],
    buttons: u8,
}

impl<'d, D: Driver<'d>, const DESC_SIZE: usize> Reporter<'d, D, DESC_SIZE> {
    pub fn new(hid_writer: HidWriter<'d, D, DESC_SIZE>) -> Self {
        let mut keyboard_report = [0; crate::KEY_BITS_SIZE + 2];
        keyboard_report[0] = KEYBOARD_REPORT_ID;
        Self {
            hid_writer,
            keyboard_report,
            buttons: 0,
        }
    }

    async fn write_report(&mut self, report: &[u8]) {
        if let Err(e) = self.hid_writer.write(report).await {
            warn!("Failed to send report: {:?}", e);
        }
    }

    async fn write_keyboard_report(&mut self) {
        if let Err(e) = self.hid_writer.write(&self.keyboard_report).await {
            warn!("Failed to send report: {:?}", e);
        }
    }

    async fn write_mouse_report(&mut self, dx: i8, dy: i8, wheel: i8) {
        let report = [
            MOUSE_REPORT_ID,
            self.buttons,
            clamp(dx),
            clamp(dy),
            clamp(wheel),
            0,
        ];
        self.write_report(&report).await;
    }

    /// Release everything and tell the host.
    pub async fn clear(&mut self) {
        self.keyboard_report.iter_mut().skip(1).for_each(|b| *b = 0);
        self.buttons = 0;
        self.write_mouse_report(0, 0, 0).await;
        self.write_keyboard_report().await;
    }

    fn add_key(&mut self, key: u8) -> bool {
        if is_modifier(key) {
            let bit = modifier_bit(key);
            let old = self.keyboard_report[1];
            self.keyboard_report[1] |= bit;
            return old & bit == 0;
        }
        if key > 3 {
            add_key_bit(&mut self.keyboard_report[2..], key)
        } else {
            false
        }
    }

    fn remove_key(&mut self, key: u8) -> bool {
        if is_modifier(key) {
            let bit = modifier_bit(key);
            let old = self.keyboard_report[1];
            self.keyboard_report[1] &= !bit;
            return old & bit != 0;
        }
        if key > 3 {
            del_key_bit(&mut self.keyboard_report[2..], key)
        } else {
            false
        }
    }
}

impl<'d, D: Driver<'d>, const DESC_SIZE: usize> KeySink for Reporter<'d, D, DESC_SIZE> {
    async fn press(&mut self, keys: &[u8]) {
        let mut changed = false;
        for key in keys {
            changed |= self.add_key(*key);
        }
        if changed {
            self.write_keyboard_report().await;
        }
    }

    async fn release(&mut self, keys: &[u8]) {
        let mut changed = false;
        for key in keys {
            changed |= self.remove_key(*key);
        }
        if changed {
            self.write_keyboard_report().await;
        }
    }
}

impl<'d, D: Driver<'d>, const DESC_SIZE: usize> PointerSink for Reporter<'d, D, DESC_SIZE> {
    async fn move_by(&mut self, dx: i8, dy: i8, wheel: i8) {
        self.write_mouse_report(dx, dy, wheel).await;
    }

    async fn press_buttons(&mut self, buttons: u8) {
        self.buttons |= buttons;
        self.write_mouse_report(0, 0, 0).await;
    }

    async fn release_buttons(&mut self, buttons: u8) {
        self.buttons &= !buttons;
        self.write_mouse_report(0, 0, 0).await;
    }
}

/// HID relative axes run -127..=127.
fn clamp(v: i8) -> u8 {
    v.max(-127) as u8
}

#[cfg(test)]
#[path = "key_reporter_test.rs"]
mod test;
