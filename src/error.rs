//! Unified error type for joyhid.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // USB
    /// The host has not configured the device, the bus is suspended,
    /// or the report queue is full.  Retry on the next tick.
    NotReady,

    /// USB stack returned an error.
    Usb,

    // Input
    /// ADC conversion failed.
    Adc,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}
