//! Per-mode HID report generators.
//!
//! Each generator is stepped at most once per HID tick by the scheduler
//! and never blocks: if the transport is not ready it defers, keeping
//! whatever state the next attempt needs.

pub mod controller;
pub mod keyboard;
pub mod mouse;

pub use controller::ControllerGenerator;
pub use keyboard::{Alphabet, Stroke, Typist};
pub use mouse::MouseGenerator;

/// Result of stepping a generator once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A report went out.
    Sent,
    /// Nothing needed sending.
    Idle,
    /// The transport could not take the report; retry next tick.
    Deferred,
}
