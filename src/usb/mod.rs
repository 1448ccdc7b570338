//! USB Device subsystem - presents a composite HID device to the host.
//!
//! The RP2040's built-in USB 1.1 Full-Speed controller is driven by
//! `embassy-usb`.  One HID interface carries two report IDs:
//!
//! - Report 1: Keyboard (used by keyboard and controller modes)
//! - Report 2: Mouse
//!
//! Bus lifecycle callbacks are forwarded to the scheduler as
//! `LinkEvent`s; reports flow back through a bounded queue.

pub mod hid_device;
