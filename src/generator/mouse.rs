//! Joystick-as-mouse.

use crate::analog::{AxisSample, Displacement};
use crate::config::ADC_MAX;
use crate::hid::mouse::{MouseReport, BUTTON_LEFT, BUTTON_RIGHT};
use crate::input::{Control, Controls};
use crate::transport::Transport;

use super::Outcome;

/// Emits one relative-motion report per step.
///
/// Clicks are the held level OR'd with a sticky latch of every press
/// seen since the last successful send, so a tap shorter than one HID
/// tick still reaches the host.  The latch survives deferred steps.
#[derive(Clone, Debug)]
pub struct MouseGenerator {
    range_max: u16,
    scale: u16,
    latched: u8,
}

impl MouseGenerator {
    /// `scale` is the cursor step at full deflection.
    pub const fn new(scale: u16) -> Self {
        Self {
            range_max: ADC_MAX,
            scale,
            latched: 0,
        }
    }

    /// Buttons waiting to be delivered.
    pub fn latched_buttons(&self) -> u8 {
        self.latched
    }

    /// Remember presses seen since the last drain until they are sent.
    pub fn latch(&mut self, pressed: Controls) {
        self.latched |= button_bits(pressed);
    }

    /// Drop undelivered clicks.
    pub fn reset(&mut self) {
        self.latched = 0;
    }

    pub fn step<T: Transport>(
        &mut self,
        sample: AxisSample,
        held: Controls,
        transport: &mut T,
    ) -> Outcome {
        if !transport.ready() {
            return Outcome::Deferred;
        }

        let motion = Displacement::from_sample(sample, self.range_max, self.scale);
        let report = MouseReport {
            buttons: button_bits(held) | self.latched,
            x: motion.dx,
            // ADC Y grows upward, HID Y grows downward.
            y: motion.dy.saturating_neg(),
            wheel: 0,
            pan: 0,
        };

        match transport.send(report.into()) {
            Ok(()) => {
                self.latched = 0;
                Outcome::Sent
            }
            Err(_) => Outcome::Deferred,
        }
    }
}

fn button_bits(controls: Controls) -> u8 {
    let mut bits = 0;
    if controls.contains(Control::ButtonA) {
        bits |= BUTTON_LEFT;
    }
    if controls.contains(Control::ButtonB) {
        bits |= BUTTON_RIGHT;
    }
    bits
}
