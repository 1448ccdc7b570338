//! RGB status LED.

use embassy_rp::gpio::Output;
use joyhid::mode::Rgb;

/// Three GPIO-driven channels, active-high.
pub struct RgbLed {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl RgbLed {
    /// Takes the pins already configured as outputs, all low.
    pub fn new(red: Output<'static>, green: Output<'static>, blue: Output<'static>) -> Self {
        Self { red, green, blue }
    }

    pub fn set(&mut self, color: Rgb) {
        self.red.set_level(color.red.into());
        self.green.set_level(color.green.into());
        self.blue.set_level(color.blue.into());
    }
}
