//! SSD1306 OLED display wrapper.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use joyhid::mode::{status_line, Mode};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        defmt::warn!("OLED init failed, continuing without display");
    }
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn controls_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Mouse => "A:left  B:right",
        Mode::Keyboard => "A:next  B:prev",
        Mode::Controller => "Stick: arrows",
    }
}

/// Render the status screen for `mode`.
///
/// Returns `false` if the frame could not be pushed to the panel.
pub fn draw_status<I2C>(display: &mut Display<I2C>, mode: Mode) -> bool
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let _ = Text::new("joyhid", Point::new(0, 10), text_style()).draw(display);

    let line = status_line(mode);
    let _ = Text::new(line.as_str(), Point::new(0, 28), text_style()).draw(display);
    let _ = Text::new(controls_hint(mode), Point::new(0, 42), text_style()).draw(display);
    let _ = Text::new("Press stick: switch", Point::new(0, 56), text_style()).draw(display);

    display.flush().is_ok()
}
