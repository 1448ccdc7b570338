//! USB HID keyboard report (report ID 1 of the composite interface).
//!
//! Layout (9 bytes):
//! ```text
//! Byte 0: Report ID (0x01)
//! Byte 1: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 2: Reserved (0x00)
//! Byte 3-8: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```

use heapless::Vec;

use crate::error::Error;

/// Report ID used in the composite report descriptor.
pub const KEYBOARD_REPORT_ID: u8 = 1;

/// Keyboard report size in bytes, including the report ID.
pub const KEYBOARD_REPORT_SIZE: usize = 9;

/// Number of simultaneous key slots in a boot-style report.
pub const KEY_SLOTS: usize = 6;

/// Modifier bit for Left Shift.
pub const MODIFIER_LEFT_SHIFT: u8 = 0x02;

/// Keyboard usage codes (HID Usage Tables, page 0x07) used by the firmware.
pub mod keycode {
    pub const NONE: u8 = 0x00;
    pub const A: u8 = 0x04;
    pub const Z: u8 = 0x1D;
    pub const DIGIT_1: u8 = 0x1E;
    pub const DIGIT_0: u8 = 0x27;
    pub const BACKSPACE: u8 = 0x2A;
    pub const ARROW_RIGHT: u8 = 0x4F;
    pub const ARROW_LEFT: u8 = 0x50;
    pub const ARROW_DOWN: u8 = 0x51;
    pub const ARROW_UP: u8 = 0x52;
}

/// Keys currently held in an outgoing report.
///
/// Holds at most [`KEY_SLOTS`] codes in press order; presses beyond
/// that are refused.  Unused slots serialise as [`keycode::NONE`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyBuffer {
    keys: Vec<u8, KEY_SLOTS>,
}

impl KeyBuffer {
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Add a key.  Duplicates and `NONE` are ignored.
    pub fn press(&mut self, code: u8) -> Result<(), Error> {
        if code == keycode::NONE || self.keys.contains(&code) {
            return Ok(());
        }
        self.keys.push(code).map_err(|_| Error::BufferOverflow)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Fixed-width slot view with `NONE` padding.
    pub fn slots(&self) -> [u8; KEY_SLOTS] {
        let mut slots = [keycode::NONE; KEY_SLOTS];
        slots[..self.keys.len()].copy_from_slice(&self.keys);
        slots
    }
}

/// Keyboard input report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte, always 0x00.
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; KEY_SLOTS],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [keycode::NONE; KEY_SLOTS],
        }
    }

    /// A single key (with modifiers) held down.
    pub const fn single(modifier: u8, code: u8) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes: [code, 0, 0, 0, 0, 0],
        }
    }

    pub fn from_keys(keys: &KeyBuffer) -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: keys.slots(),
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (always 9), or 0 if `buf`
    /// is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = KEYBOARD_REPORT_ID;
        buf[1] = self.modifier;
        buf[2] = self.reserved;
        buf[3..9].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// Returns `true` if no keys are pressed (release event).
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == keycode::NONE)
    }
}
