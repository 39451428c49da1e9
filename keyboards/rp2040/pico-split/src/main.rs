#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{UART0, USB};
use embassy_rp::uart::{self, BufferedInterruptHandler, BufferedUart};
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_time::{Duration, Timer};
use embassy_usb::UsbDevice;
use spk_firmware::{
    fuser::{Fuser, Side},
    key_reporter::Reporter,
    key_state::KeyStateEngine,
    keyboard::Keyboard,
    layout::{DEFAULT, SPLIT_COL},
    link::{Link, LinkConfig, Role},
    matrix_sampler::MatrixSampler,
    mouse::MouseEmulator,
    usb::{Configurator, State, UsbBuffers, MAX_REPORT_SIZE, SHARED_REPORT_DESC},
};
use static_cell::StaticCell;

// ---------------- User Config ------------------
const VENDOR_ID: u16 = 0x6e0f;
const PRODUCT_ID: u16 = 0x0010;
const MANUFACTURER: &str = "SPK";
const PRODUCT: &str = "SPK pico-split";
const SERIAL_NUMBER: &str = "spk:0010";
const MAX_POWER: u16 = 100;

const BAUD_RATE: u32 = 115_200;

#[cfg(not(feature = "right"))]
const SIDE: Side = Side::Left;
#[cfg(feature = "right")]
const SIDE: Side = Side::Right;

// Delay before sampling VBUS so the host has powered the bus.
const STARTUP_DELAY: Duration = Duration::from_secs(1);

// Key switch configuration: sense pins are pulled down, select pins drive a column high.
macro_rules! config_pins {
    (peripherals: $p:ident) => {
        (
            [
                Input::new($p.PIN_11, Pull::Down),
                Input::new($p.PIN_12, Pull::Down),
                Input::new($p.PIN_13, Pull::Down),
                Input::new($p.PIN_14, Pull::Down),
                Input::new($p.PIN_15, Pull::Down),
            ],
            [
                Output::new($p.PIN_16, Level::Low),
                Output::new($p.PIN_17, Level::Low),
                Output::new($p.PIN_18, Level::Low),
                Output::new($p.PIN_19, Level::Low),
                Output::new($p.PIN_20, Level::Low),
                Output::new($p.PIN_21, Level::Low),
                Output::new($p.PIN_22, Level::Low),
                Output::new($p.PIN_26, Level::Low),
            ],
        )
    };
}

// ----------- End of user config ----------------

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

type UsbDriver = Driver<'static, USB>;

static USB_BUFFERS: StaticCell<UsbBuffers> = StaticCell::new();
static USB_CONFIG: StaticCell<Configurator> = StaticCell::new();
static SHARED_HID_STATE: StaticCell<State> = StaticCell::new();
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

#[embassy_executor::task]
async fn usb_device(mut usb: UsbDevice<'static, UsbDriver>) {
    usb.run().await;
}

fn usb_configurator() -> Configurator<'static> {
    let mut conf = embassy_usb::Config::new(VENDOR_ID, PRODUCT_ID);
    conf.manufacturer = Some(MANUFACTURER);
    conf.product = Some(PRODUCT);
    conf.serial_number = Some(SERIAL_NUMBER);
    conf.max_power = MAX_POWER;
    Configurator::new(conf)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    Timer::after(STARTUP_DELAY).await;
    let vbus = Input::new(p.PIN_24, Pull::None);
    let role = Role::from_host_attached(vbus.is_high());

    let (sense_pins, select_pins) = config_pins!(peripherals: p);
    let led = Output::new(p.PIN_25, Level::Low);

    let mut uart_config = uart::Config::default();
    uart_config.baudrate = BAUD_RATE;
    let serial = BufferedUart::new(
        p.UART0,
        Irqs,
        p.PIN_0,
        p.PIN_1,
        TX_BUF.init([0; 16]),
        RX_BUF.init([0; 16]),
        uart_config,
    );

    let driver = Driver::new(p.USB, Irqs);
    let usb_buffers: &'static mut UsbBuffers = USB_BUFFERS.init(UsbBuffers::default());
    let usb_config: &'static mut Configurator = USB_CONFIG.init(usb_configurator());
    let shared_hid_state: &'static mut State<'static> = SHARED_HID_STATE.init(State::new());

    let Some(mut usb_builder) = usb_config.usb_builder(driver, usb_buffers) else {
        panic!("usb builder already taken");
    };
    let hid_writer = usb_config.add_iface::<_, MAX_REPORT_SIZE>(
        &mut usb_builder,
        &SHARED_REPORT_DESC,
        0,
        0,
        shared_hid_state,
    );
    spawner.must_spawn(usb_device(usb_builder.build()));

    let mut reporter = Reporter::new(hid_writer);

    let keyboard = Keyboard::new(
        MatrixSampler::new(sense_pins, select_pins, Duration::from_ticks(0)),
        Link::new(role, serial, LinkConfig::default()),
        Fuser::new(SPLIT_COL, SIDE),
        KeyStateEngine::with_default_settle(DEFAULT),
        MouseEmulator::default(),
        led,
    );
    keyboard.run(&mut reporter).await
}
