#![no_std]
#![allow(async_fn_in_trait)]
pub mod fuser;
pub mod hid;
pub mod key_reporter;
pub mod key_state;
pub mod keyboard;
pub mod layout;
pub mod link;
pub mod matrix_sampler;
pub mod mouse;
pub mod usb;

#[cfg(any(test, feature = "test-utils"))]
pub mod serial_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod sink_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod switch_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod time_driver_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod usb_test_stub;

#[macro_use]
mod macros;

pub(crate) const KEY_BITS_SIZE: usize = 32;

fn add_bit<const SIZE: usize>(bits: &mut [u8], code: u8) -> bool {
    let i = (code >> 3) as usize;
    if i >= SIZE || i >= bits.len() {
        crate::error!("invalid key! {}", code);
        return false;
    }
    let bp = 1 << (code & 7);
    let old = bits[i];
    bits[i] |= bp;
    old & bp == 0
}

fn del_bit<const SIZE: usize>(bits: &mut [u8], code: u8) -> bool {
    let i = (code >> 3) as usize;
    if i >= SIZE || i >= bits.len() {
        crate::error!("invalid key! {}", code);
        return false;
    }
    let bp = 1 << (code & 7);
    let old = bits[i];
    bits[i] &= !bp;
    old & bp != 0
}

/// Set `code` in an NKRO usage bitmap; `true` if it was not already set.
fn add_key_bit(bits: &mut [u8], code: u8) -> bool {
    add_bit::<KEY_BITS_SIZE>(bits, code)
}

/// Clear `code` in an NKRO usage bitmap; `true` if it was set.
fn del_key_bit(bits: &mut [u8], code: u8) -> bool {
    del_bit::<KEY_BITS_SIZE>(bits, code)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
