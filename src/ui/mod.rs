//! User interface subsystem - OLED status display, buttons and RGB LED.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C, shows the active mode
//! - **Buttons**: joystick switch plus A/B, one edge-driven task each
//! - **LED**: common-cathode RGB status LED, colour follows the mode

pub mod buttons;
pub mod display;
pub mod led;
