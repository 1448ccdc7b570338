//! Joystick-as-arrow-keys.

use crate::analog::{axis_direction, AxisSample, Direction};
use crate::config::ADC_MAX;
use crate::hid::keyboard::{keycode, KeyBuffer, KeyboardReport};
use crate::transport::Transport;

use super::Outcome;

/// Each step presses the arrows the stick points at and clears the
/// buffer straight after sending, so nothing stays held between ticks.
/// A centred stick produces one all-released report, then silence.
#[derive(Clone, Debug)]
pub struct ControllerGenerator {
    range_max: u16,
    keys: KeyBuffer,
    released: bool,
}

impl ControllerGenerator {
    pub const fn new() -> Self {
        Self {
            range_max: ADC_MAX,
            keys: KeyBuffer::new(),
            released: true,
        }
    }

    /// Keys accumulated for the report being built.  Empty between steps.
    pub fn keys(&self) -> &KeyBuffer {
        &self.keys
    }

    /// Forget the last press.  Used after the host has been sent an
    /// all-released report by someone else.
    pub fn reset(&mut self) {
        self.keys.clear();
        self.released = true;
    }

    pub fn step<T: Transport>(&mut self, sample: AxisSample, transport: &mut T) -> Outcome {
        if !transport.ready() {
            return Outcome::Deferred;
        }

        self.collect(sample);
        if self.keys.is_empty() && self.released {
            return Outcome::Idle;
        }

        let report = KeyboardReport::from_keys(&self.keys);
        let outcome = match transport.send(report.into()) {
            Ok(()) => {
                self.released = self.keys.is_empty();
                Outcome::Sent
            }
            Err(_) => Outcome::Deferred,
        };
        self.keys.clear();
        outcome
    }

    fn collect(&mut self, sample: AxisSample) {
        let x = axis_direction(sample.x, self.range_max).map(|d| match d {
            Direction::Positive => keycode::ARROW_RIGHT,
            Direction::Negative => keycode::ARROW_LEFT,
        });
        let y = axis_direction(sample.y, self.range_max).map(|d| match d {
            Direction::Positive => keycode::ARROW_UP,
            Direction::Negative => keycode::ARROW_DOWN,
        });
        // At most two arrows per tick; a full buffer drops the rest.
        for code in [x, y].into_iter().flatten() {
            let _ = self.keys.press(code);
        }
    }
}

impl Default for ControllerGenerator {
    fn default() -> Self {
        Self::new()
    }
}
