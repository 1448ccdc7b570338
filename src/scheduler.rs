//! Cooperative main-loop body.
//!
//! [`Scheduler::poll`] is called continuously from the firmware's main
//! task.  Each call services the transport, then runs the LED blink task
//! and the HID task when their intervals are due.  Nothing in here
//! waits; all pacing comes from the caller's clock.

use crate::analog::AxisSample;
use crate::config::{HID_TASK_INTERVAL_MS, MOUSE_MAX_SPEED};
use crate::debounce::EdgeDetector;
use crate::error::Error;
use crate::generator::{Alphabet, ControllerGenerator, MouseGenerator, Outcome, Typist};
use crate::hid::{HidReport, KeyboardReport, MouseReport};
use crate::input::{Control, InputMailbox};
use crate::mode::{Mode, ModeMachine, Rgb};
use crate::transport::{Link, LinkState, Transport};

/// Board-side capabilities the scheduler drives.
pub trait Board {
    /// Sample both joystick axes.
    fn read_axes(&mut self) -> Result<AxisSample, Error>;

    /// Drive the status LED; [`Rgb::OFF`] turns it off.
    fn set_led(&mut self, color: Rgb);

    /// Show the newly active mode on the status display.
    fn announce(&mut self, mode: Mode);
}

/// Runtime-tunable scheduler parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerConfig {
    /// HID task period (ms).
    pub hid_interval_ms: u64,
    /// Cursor step at full joystick deflection.
    pub mouse_scale: u16,
    /// Glyphs offered in keyboard mode.
    pub alphabet: Alphabet,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            hid_interval_ms: HID_TASK_INTERVAL_MS,
            mouse_scale: MOUSE_MAX_SPEED,
            alphabet: Alphabet::Letters,
        }
    }
}

/// Fixed-period gate.  Advances by whole periods so the average rate
/// holds even when polls arrive late.
#[derive(Clone, Copy, Debug)]
pub struct IntervalTimer {
    start_ms: u64,
}

impl IntervalTimer {
    pub const fn new(start_ms: u64) -> Self {
        Self { start_ms }
    }

    pub fn due(&mut self, now_ms: u64, interval_ms: u64) -> bool {
        if now_ms.saturating_sub(self.start_ms) < interval_ms {
            return false;
        }
        self.start_ms += interval_ms;
        true
    }
}

/// Square-wave status blink.
#[derive(Clone, Copy, Debug)]
struct BlinkTask {
    timer: IntervalTimer,
    lit: bool,
}

impl BlinkTask {
    const fn new(now_ms: u64) -> Self {
        Self {
            timer: IntervalTimer::new(now_ms),
            lit: false,
        }
    }

    /// Returns the LED level to apply, if it is time to toggle.
    /// A zero interval disables blinking.
    fn poll(&mut self, now_ms: u64, interval_ms: u64) -> Option<bool> {
        if interval_ms == 0 || !self.timer.due(now_ms, interval_ms) {
            return None;
        }
        let level = self.lit;
        self.lit = !self.lit;
        Some(level)
    }
}

pub struct Scheduler {
    config: SchedulerConfig,
    link: Link,
    blink: BlinkTask,
    hid_timer: IntervalTimer,
    modes: ModeMachine,
    mode_switch: EdgeDetector,
    /// All-released mouse report owed to the host.
    release_buttons: bool,
    /// All-released keyboard report owed to the host.
    release_keys: bool,
    mouse: MouseGenerator,
    typist: Typist,
    controller: ControllerGenerator,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig, now_ms: u64) -> Self {
        Self {
            config,
            link: Link::new(),
            blink: BlinkTask::new(now_ms),
            hid_timer: IntervalTimer::new(now_ms),
            modes: ModeMachine::new(),
            mode_switch: EdgeDetector::new(),
            release_buttons: false,
            release_keys: false,
            mouse: MouseGenerator::new(config.mouse_scale),
            typist: Typist::new(config.alphabet),
            controller: ControllerGenerator::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    pub fn link_state(&self) -> LinkState {
        self.link.state()
    }

    /// One main-loop iteration.
    ///
    /// Returns what the HID task did, or `None` if it was not due.
    pub fn poll<B: Board, T: Transport>(
        &mut self,
        now_ms: u64,
        board: &mut B,
        transport: &mut T,
        inputs: &InputMailbox,
    ) -> Option<Outcome> {
        self.service_transport(transport);
        self.led_task(now_ms, board);
        let outcome = self.hid_task(now_ms, board, transport, inputs);

        #[cfg(feature = "defmt")]
        if outcome == Some(Outcome::Deferred) {
            defmt::trace!("HID: transport busy, retrying next tick");
        }

        outcome
    }

    fn service_transport<T: Transport>(&mut self, transport: &mut T) {
        while let Some(event) = transport.service() {
            self.link.apply(event);

            #[cfg(feature = "defmt")]
            defmt::info!("USB: {} -> {}", event, self.link.state());
        }
    }

    fn led_task<B: Board>(&mut self, now_ms: u64, board: &mut B) {
        let interval = self.link.state().blink_interval_ms();
        if let Some(lit) = self.blink.poll(now_ms, interval) {
            let color = if lit {
                self.modes.current().led_color()
            } else {
                Rgb::OFF
            };
            board.set_led(color);
        }
    }

    fn hid_task<B: Board, T: Transport>(
        &mut self,
        now_ms: u64,
        board: &mut B,
        transport: &mut T,
        inputs: &InputMailbox,
    ) -> Option<Outcome> {
        if !self.hid_timer.due(now_ms, self.config.hid_interval_ms) {
            return None;
        }

        let input = inputs.drain();

        // Polled twin of the interrupt path.  Both share the mailbox's
        // guard record, so one physical press advances the mode once.
        // An edge the interrupt path rejected still counts here if this
        // tick lands past the window while the switch is down.
        let polled = self
            .mode_switch
            .rising(input.held.contains(Control::JoystickPress))
            && inputs.accept_polled(now_ms);

        if input.events.contains(Control::JoystickPress) || polled {
            let left = self.modes.advance();
            self.leave(left);
        }

        if let Some(mode) = self.modes.take_announcement() {
            board.announce(mode);
        }

        // Clicks only mean something in mouse mode; elsewhere they drop.
        if self.modes.current() == Mode::Mouse {
            self.mouse.latch(input.latched);
        }

        if self.release_buttons {
            if !send_now(transport, MouseReport::empty().into()) {
                return Some(Outcome::Deferred);
            }
            self.release_buttons = false;
        }
        if self.release_keys {
            if !send_now(transport, KeyboardReport::empty().into()) {
                return Some(Outcome::Deferred);
            }
            self.release_keys = false;
        }

        let outcome = match self.modes.current() {
            Mode::Mouse => {
                let sample = read_axes_or_center(board);
                self.mouse.step(sample, input.held, transport)
            }
            Mode::Keyboard => self.typist.step(input.events, transport),
            Mode::Controller => {
                let sample = read_axes_or_center(board);
                self.controller.step(sample, transport)
            }
        };
        Some(outcome)
    }

    /// Reset the generator of the mode being left and owe the host a
    /// report that lets go of anything it may have left pressed.
    fn leave(&mut self, mode: Mode) {
        match mode {
            Mode::Mouse => {
                self.mouse.reset();
                self.release_buttons = true;
            }
            Mode::Keyboard => self.typist.reset(),
            Mode::Controller => self.controller.reset(),
        }
        if mode.sends_keys() {
            self.release_keys = true;
        }
    }
}

fn send_now<T: Transport>(transport: &mut T, report: HidReport) -> bool {
    transport.ready() && transport.send(report).is_ok()
}

/// A failed conversion reads as a centred stick for this tick.
fn read_axes_or_center<B: Board>(board: &mut B) -> AxisSample {
    match board.read_axes() {
        Ok(sample) => sample,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("ADC read failed: {}", _e);
            AxisSample::centered()
        }
    }
}
