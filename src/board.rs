//! RP2040 implementation of the scheduler's [`Board`] seam.

use defmt::{info, warn};
use embassy_rp::adc::{self, Adc};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use joyhid::analog::AxisSample;
use joyhid::mode::{Mode, Rgb};
use joyhid::{Board, Error};

use crate::ui::display::{self, Display};
use crate::ui::led::RgbLed;

pub type OledBus = I2c<'static, I2C1, i2c::Blocking>;

pub struct Hardware {
    adc: Adc<'static, adc::Blocking>,
    x_axis: adc::Channel<'static>,
    y_axis: adc::Channel<'static>,
    led: RgbLed,
    display: Display<OledBus>,
}

impl Hardware {
    pub fn new(
        adc: Adc<'static, adc::Blocking>,
        x_axis: adc::Channel<'static>,
        y_axis: adc::Channel<'static>,
        led: RgbLed,
        display: Display<OledBus>,
    ) -> Self {
        Self {
            adc,
            x_axis,
            y_axis,
            led,
            display,
        }
    }
}

impl Board for Hardware {
    fn read_axes(&mut self) -> Result<AxisSample, Error> {
        let x = self
            .adc
            .blocking_read(&mut self.x_axis)
            .map_err(|_| Error::Adc)?;
        let y = self
            .adc
            .blocking_read(&mut self.y_axis)
            .map_err(|_| Error::Adc)?;
        Ok(AxisSample { x, y })
    }

    fn set_led(&mut self, color: Rgb) {
        self.led.set(color);
    }

    fn announce(&mut self, mode: Mode) {
        info!("Active mode: {}", mode);
        if !display::draw_status(&mut self.display, mode) {
            warn!("OLED update failed: {}", Error::Display);
        }
    }
}
