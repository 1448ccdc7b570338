//! Outbound HID report types for the composite keyboard + mouse interface.

pub mod descriptor;
pub mod keyboard;
pub mod mouse;


pub use keyboard::{KeyBuffer, KeyboardReport};
pub use mouse::MouseReport;

/// A report ready to go to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Mouse(MouseReport),
}

impl HidReport {
    /// Serialise, report ID first.  Returns bytes written, 0 if `buf`
    /// is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Keyboard(k) => k.serialize(buf),
            HidReport::Mouse(m) => m.serialize(buf),
        }
    }
}

impl From<KeyboardReport> for HidReport {
    fn from(report: KeyboardReport) -> Self {
        HidReport::Keyboard(report)
    }
}

impl From<MouseReport> for HidReport {
    fn from(report: MouseReport) -> Self {
        HidReport::Mouse(report)
    }
}
