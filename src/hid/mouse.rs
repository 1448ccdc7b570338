//! USB HID mouse report (report ID 2 of the composite interface).
//!
//! Layout (6 bytes):
//! ```text
//! Byte 0: Report ID (0x02)
//! Byte 1: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle
//! Byte 2: X displacement (signed, -127..127)
//! Byte 3: Y displacement (signed, -127..127)
//! Byte 4: Scroll wheel  (signed, -127..127)
//! Byte 5: Horizontal pan (signed, -127..127)
//! ```

/// Report ID used in the composite report descriptor.
pub const MOUSE_REPORT_ID: u8 = 2;

/// Mouse report size in bytes, including the report ID.
pub const MOUSE_REPORT_SIZE: usize = 6;

/// Button bit for the left button.
pub const BUTTON_LEFT: u8 = 1 << 0;

/// Button bit for the right button.
pub const BUTTON_RIGHT: u8 = 1 << 1;

/// Relative mouse input report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed, positive = down).
    pub y: i8,
    /// Scroll wheel delta (signed).
    pub wheel: i8,
    /// Horizontal pan delta (signed).
    pub pan: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
            pan: 0,
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (always 6), or 0 if `buf`
    /// is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = MOUSE_REPORT_ID;
        buf[1] = self.buttons;
        buf[2] = self.x as u8;
        buf[3] = self.y as u8;
        buf[4] = self.wheel as u8;
        buf[5] = self.pan as u8;
        MOUSE_REPORT_SIZE
    }

    /// Returns `true` when no buttons are pressed and there is no movement.
    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0 && self.pan == 0
    }
}
