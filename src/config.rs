//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Analog joystick

/// Full-scale reading of the RP2040's 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// Reading of a centred axis.
pub const ADC_CENTER: u16 = ADC_MAX / 2;

/// Largest cursor step (counts per HID report) at full deflection.
pub const MOUSE_MAX_SPEED: u16 = 10;

// Scheduling

/// HID task period (ms).
pub const HID_TASK_INTERVAL_MS: u64 = 10;

/// Main loop tick (ms). Must be well below `HID_TASK_INTERVAL_MS`.
pub const MAIN_LOOP_TICK_MS: u64 = 1;

/// Status LED blink period while the host has not configured us (ms).
pub const BLINK_NOT_MOUNTED_MS: u64 = 250;

/// Status LED blink period while configured (ms).
pub const BLINK_MOUNTED_MS: u64 = 1000;

/// Status LED blink period while the bus is suspended (ms).
pub const BLINK_SUSPENDED_MS: u64 = 2500;

// Input

/// Minimum spacing between two accepted control presses (ms).
///
/// One record guards every control, including the redundant polled
/// path for the joystick switch.
pub const GUARD_WINDOW_MS: u64 = 200;

/// Quiet time after a release before the next press edge is armed (ms).
pub const BUTTON_RELEASE_SETTLE_MS: u64 = 5;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "joyhid";
pub const USB_PRODUCT: &str = "Joystick HID Composite";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 5;

/// Depth of the scheduler -> HID writer report queue.
pub const REPORT_QUEUE_DEPTH: usize = 8;

// GPIO pin assignments (Raspberry Pi Pico based joystick board)
//
// These are logical names; the actual `embassy_rp::peripherals::*`
// are picked in `main.rs`.  Adjust for your own wiring.
//
//   Joystick Y      → GPIO26 (ADC0)
//   Joystick X      → GPIO27 (ADC1)
//   Joystick switch → GPIO22
//   Button A        → GPIO5
//   Button B        → GPIO6
//   LED red         → GPIO13
//   LED green       → GPIO11
//   LED blue        → GPIO12
//   I²C1 SDA        → GPIO14
//   I²C1 SCL        → GPIO15

/// I²C bus frequency for the OLED (Hz).
pub const DISPLAY_I2C_FREQUENCY_HZ: u32 = 400_000;
