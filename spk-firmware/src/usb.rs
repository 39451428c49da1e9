use core::mem::MaybeUninit;
use embassy_usb::{
    control::{InResponse, OutResponse, Recipient, Request, RequestType},
    driver::Driver,
    types::InterfaceNumber,
    Builder, Config, Handler,
};

use crate::{debug, hid::HidWriter};

// HID
const HID_DESC_DESCTYPE_HID: u8 = 0x21;
const HID_DESC_DESCTYPE_HID_REPORT: u8 = 0x22;
const HID_DESC_SPEC_1_11: [u8; 2] = [0x11, 0x01];
const HID_DESC_COUNTRY_UNSPEC: u8 = 0x00;

const HID_REQ_SET_IDLE: u8 = 0x0a;
const HID_REQ_GET_IDLE: u8 = 0x02;
const HID_REQ_SET_REPORT: u8 = 0x09;
const HID_REQ_GET_PROTOCOL: u8 = 0x03;
const HID_REQ_SET_PROTOCOL: u8 = 0x0b;

/// Largest input report: the NKRO keyboard report.
pub const MAX_REPORT_SIZE: usize = crate::KEY_BITS_SIZE + 2;

/// Keyboard (report id 6) and mouse (report id 2) on one interface.
///
/// Keyboard input: modifier byte then a 255-bit usage bitmap. Keyboard output: 5 LED bits.
/// Mouse input: buttons, x, y, wheel, pan; each axis is a relative signed byte.
#[rustfmt::skip]
pub const SHARED_REPORT_DESC: [u8; 59 + 73] = [
    // keyboard, 59 bytes
    0x05, 0x01,         // usage page: generic desktop
    0x09, 0x06,         // usage: keyboard
    0xA1, 0x01,         // collection: application
    0x85, 0x06,         //   report id 6
    0x05, 0x07,         //   usage page: keyboard
    0x19, 0xE0,         //   usage min: left ctrl
    0x29, 0xE7,         //   usage max: right gui
    0x15, 0x00,         //   logical min 0
    0x25, 0x01,         //   logical max 1
    0x95, 0x08,         //   count 8
    0x75, 0x01,         //   size 1
    0x81, 0x02,         //   input: modifiers
    0x05, 0x07,         //   usage page: keyboard
    0x19, 0x00,         //   usage min 0
    0x29, 0xFE,         //   usage max 0xfe
    0x15, 0x00,         //   logical min 0
    0x25, 0x01,         //   logical max 1
    0x95, 0xFF,         //   count 255
    0x75, 0x01,         //   size 1
    0x81, 0x02,         //   input: usage bitmap
    0x05, 0x08,         //   usage page: LEDs
    0x19, 0x01,         //   usage min: num lock
    0x29, 0x05,         //   usage max: kana
    0x95, 0x05,         //   count 5
    0x75, 0x01,         //   size 1
    0x91, 0x02,         //   output: LEDs
    0x95, 0x01,         //   count 1
    0x75, 0x03,         //   size 3
    0x91, 0x01,         //   output: padding
    0xC0,               // end collection

    // mouse, 73 bytes
    0x05, 0x01,         // usage page: generic desktop
    0x09, 0x02,         // usage: mouse
    0xA1, 0x01,         // collection: application
    0x85, 0x02,         //   report id 2
    0x09, 0x01,         //   usage: pointer
    0xA1, 0x00,         //   collection: physical
    0x05, 0x09,         //     usage page: buttons
    0x19, 0x01,         //     usage min: button 1
    0x29, 0x08,         //     usage max: button 8
    0x15, 0x00,         //     logical min 0
    0x25, 0x01,         //     logical max 1
    0x95, 0x08,         //     count 8
    0x75, 0x01,         //     size 1
    0x81, 0x02,         //     input: buttons
    0x05, 0x01,         //     usage page: generic desktop
    0x09, 0x30,         //     usage: x
    0x09, 0x31,         //     usage: y
    0x15, 0x81,         //     logical min -127
    0x25, 0x7F,         //     logical max 127
    0x95, 0x02,         //     count 2
    0x75, 0x08,         //     size 8
    0x81, 0x06,         //     input: x, y (relative)
    0x09, 0x38,         //     usage: wheel
    0x15, 0x81,         //     logical min -127
    0x25, 0x7F,         //     logical max 127
    0x95, 0x01,         //     count 1
    0x75, 0x08,         //     size 8
    0x81, 0x06,         //     input: wheel (relative)
    0x05, 0x0C,         //     usage page: consumer
    0x0A, 0x38, 0x02,   //     usage: AC pan
    0x15, 0x81,         //     logical min -127
    0x25, 0x7F,         //     logical max 127
    0x95, 0x01,         //     count 1
    0x75, 0x08,         //     size 8
    0x81, 0x06,         //     input: pan (relative)
    0xC0,               //   end collection
    0xC0,               // end collection
];

/// Storage for the HID control handler; must outlive the USB device.
pub struct State<'d> {
    control: MaybeUninit<Control<'d>>,
}
impl Default for State<'_> {
    fn default() -> Self {
        Self::new()
    }
}
impl State<'_> {
    pub const fn new() -> Self {
        State {
            control: MaybeUninit::uninit(),
        }
    }
}

const CONFIG_SIZE: usize = 128;
const BOS_SIZE: usize = 32;
const MSOS_SIZE: usize = 0;
const CONTROL_SIZE: usize = 64;

pub struct UsbBuffers {
    config_descriptor_buf: [u8; CONFIG_SIZE],
    bos_descriptor_buf: [u8; BOS_SIZE],
    msos_descriptor_buf: [u8; MSOS_SIZE],
    control_buf: [u8; CONTROL_SIZE],
}

impl Default for UsbBuffers {
    fn default() -> Self {
        Self {
            config_descriptor_buf: [0; CONFIG_SIZE],
            bos_descriptor_buf: [0; BOS_SIZE],
            msos_descriptor_buf: [0; MSOS_SIZE],
            control_buf: [0; CONTROL_SIZE],
        }
    }
}

pub struct Configurator<'d> {
    device_config: Option<Config<'d>>,
    max_packet_size: u16,
    poll_ms: u8,
}

impl<'d> Configurator<'d> {
    pub fn new(device_config: Config<'d>) -> Self {
        Self {
            max_packet_size: device_config.max_packet_size_0 as u16,
            device_config: Some(device_config),
            poll_ms: 1,
        }
    }

    /// The device builder; `None` once it has been taken.
    pub fn usb_builder<D: Driver<'d>>(
        &mut self,
        driver: D,
        buffers: &'d mut UsbBuffers,
    ) -> Option<Builder<'d, D>> {
        self.device_config.take().map(|device_config| {
            Builder::new(
                driver,
                device_config,
                &mut buffers.config_descriptor_buf,
                &mut buffers.bos_descriptor_buf,
                &mut buffers.msos_descriptor_buf,
                &mut buffers.control_buf,
            )
        })
    }

    /// Add a HID interface with an interrupt IN endpoint described by `descriptor`.
    pub fn add_iface<D: Driver<'d>, const WRITE_N: usize>(
        &self,
        builder: &mut Builder<'d, D>,
        descriptor: &'static [u8],
        subclass: u8,
        protocol: u8,
        state: &'d mut State<'d>,
    ) -> HidWriter<'d, D, WRITE_N> {
        let mut func = builder.function(3, subclass, protocol);
        let mut iface = func.interface();
        let if_num = iface.interface_number();
        let mut alt = iface.alt_setting(3, subclass, protocol, None);

        let len = descriptor.len();
        alt.descriptor(
            HID_DESC_DESCTYPE_HID,
            &[
                HID_DESC_SPEC_1_11[0],
                HID_DESC_SPEC_1_11[1],
                HID_DESC_COUNTRY_UNSPEC,
                1,                            // Number of following descriptors
                HID_DESC_DESCTYPE_HID_REPORT, // We have a HID report descriptor the host should read
                (len & 0xFF) as u8,
                (len >> 8 & 0xFF) as u8,
            ],
        );

        let ep_in = alt.endpoint_interrupt_in(self.max_packet_size, self.poll_ms);

        drop(func);

        let control = state.control.write(Control::new(if_num, descriptor));
        builder.handler(control);
        HidWriter::new(ep_in)
    }
}

/// Answers the HID class requests for one interface. Output reports (keyboard LEDs) are
/// accepted and ignored.
struct Control<'d> {
    if_num: InterfaceNumber,
    report_descriptor: &'d [u8],
    hid_descriptor: [u8; 9],
    idle: u8,
}
impl<'d> Control<'d> {
    fn new(if_num: InterfaceNumber, report_descriptor: &'d [u8]) -> Self {
        Control {
            if_num,
            report_descriptor,
            hid_descriptor: [
                9,
                HID_DESC_DESCTYPE_HID,
                HID_DESC_SPEC_1_11[0],
                HID_DESC_SPEC_1_11[1],
                HID_DESC_COUNTRY_UNSPEC,
                1, // one class descriptor follows: the report descriptor
                HID_DESC_DESCTYPE_HID_REPORT,
                (report_descriptor.len() & 0xFF) as u8,
                (report_descriptor.len() >> 8 & 0xFF) as u8,
            ],
            idle: 0,
        }
    }
}
impl Handler for Control<'_> {
    fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
        if (req.request_type, req.recipient, req.index)
            != (
                RequestType::Class,
                Recipient::Interface,
                self.if_num.0 as u16,
            )
        {
            return None;
        }

        match req.request {
            HID_REQ_SET_IDLE => {
                self.idle = (req.value >> 8) as u8;
                Some(OutResponse::Accepted)
            }
            HID_REQ_SET_REPORT => {
                debug!("host output report {:?}", data);
                Some(OutResponse::Accepted)
            }
            HID_REQ_SET_PROTOCOL => {
                if req.value == 1 {
                    Some(OutResponse::Accepted)
                } else {
                    crate::warn!("boot protocol requested; keyboard report is NKRO only");
                    Some(OutResponse::Rejected)
                }
            }
            _ => Some(OutResponse::Rejected),
        }
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if req.index != self.if_num.0 as u16 {
            return None;
        }

        match (req.request_type, req.recipient) {
            (RequestType::Standard, Recipient::Interface) => match req.request {
                Request::GET_DESCRIPTOR => match (req.value >> 8) as u8 {
                    HID_DESC_DESCTYPE_HID_REPORT => {
                        Some(InResponse::Accepted(self.report_descriptor))
                    }
                    HID_DESC_DESCTYPE_HID => Some(InResponse::Accepted(&self.hid_descriptor)),
                    _ => Some(InResponse::Rejected),
                },

                _ => Some(InResponse::Rejected),
            },
            (RequestType::Class, Recipient::Interface) => match req.request {
                HID_REQ_GET_IDLE => {
                    buf[0] = self.idle;
                    Some(InResponse::Accepted(&buf[0..1]))
                }
                HID_REQ_GET_PROTOCOL => {
                    // always report protocol
                    buf[0] = 1;
                    Some(InResponse::Accepted(&buf[0..1]))
                }
                _ => Some(InResponse::Rejected),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "usb_test.rs"]
mod test;
