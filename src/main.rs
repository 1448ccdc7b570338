//! joyhid firmware entry point.
//!
//! Reads an analog joystick and two buttons on an RP2040 and presents
//! them to the host as a USB HID mouse, a typing keyboard or an
//! arrow-key controller.  Clicking the joystick cycles the mode.
//!
//! ## Tasks
//!
//! - `usb_task`      - embassy-usb device state machine
//! - `hid_writer`    - drains queued reports into the HID endpoint
//! - `button` (×3)   - edge-driven press capture per control
//! - `main`          - 1 ms cooperative loop driving the scheduler

#![no_std]
#![no_main]

mod board;
mod ui;
mod usb;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Duration, Instant, Ticker};
use joyhid::config;
use joyhid::{Control, InputMailbox, Scheduler, SchedulerConfig};
use {defmt_rtt as _, panic_probe as _};

use crate::board::Hardware;
use crate::ui::led::RgbLed;
use crate::usb::hid_device::{self, CompositeWriter, UsbDriver, UsbTransport};

/// Press mailbox shared by the button tasks and the scheduler.
static INPUTS: InputMailbox = InputMailbox::new(config::GUARD_WINDOW_MS);

#[embassy_executor::task]
async fn usb_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn hid_writer(writer: CompositeWriter) -> ! {
    hid_device::hid_writer_task(writer).await
}

#[embassy_executor::task(pool_size = 3)]
async fn button(pin: Input<'static>, control: Control) -> ! {
    ui::buttons::button_task(pin, control, &INPUTS).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("joyhid starting");

    // USB
    let usb = hid_device::init(p.USB);
    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(hid_writer(usb.writer)));

    // Buttons (active-low)
    unwrap!(spawner.spawn(button(Input::new(p.PIN_22, Pull::Up), Control::JoystickPress)));
    unwrap!(spawner.spawn(button(Input::new(p.PIN_5, Pull::Up), Control::ButtonA)));
    unwrap!(spawner.spawn(button(Input::new(p.PIN_6, Pull::Up), Control::ButtonB)));

    // Joystick: X on ADC1, Y on ADC0
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let x_axis = adc::Channel::new_pin(p.PIN_27, Pull::None);
    let y_axis = adc::Channel::new_pin(p.PIN_26, Pull::None);

    // Status LED
    let led = RgbLed::new(
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
    );

    // OLED on I²C1
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config::DISPLAY_I2C_FREQUENCY_HZ;
    let bus = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let display = ui::display::init(bus);

    let mut hardware = Hardware::new(adc, x_axis, y_axis, led, display);
    let mut transport = UsbTransport;
    let mut scheduler = Scheduler::new(SchedulerConfig::default(), Instant::now().as_millis());

    info!("Entering main loop");

    let mut ticker = Ticker::every(Duration::from_millis(config::MAIN_LOOP_TICK_MS));
    loop {
        scheduler.poll(
            Instant::now().as_millis(),
            &mut hardware,
            &mut transport,
            &INPUTS,
        );
        ticker.next().await;
    }
}
