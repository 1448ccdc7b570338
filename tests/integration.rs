//! Integration tests for joyhid host-testable logic.
//!
//! The scheduler is driven one millisecond at a time through fake board
//! and transport implementations, the way the firmware's main loop
//! drives it on hardware.

use std::collections::VecDeque;

use joyhid::analog::AxisSample;
use joyhid::hid::keyboard::{keycode, MODIFIER_LEFT_SHIFT};
use joyhid::hid::mouse::BUTTON_LEFT;
use joyhid::hid::{HidReport, KeyboardReport, MouseReport};
use joyhid::mode::Rgb;
use joyhid::transport::LinkState;
use joyhid::{
    Board, Control, Error, InputMailbox, LinkEvent, Mode, Scheduler, SchedulerConfig, Transport,
};

// ═══════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════

struct FakeBoard {
    sample: AxisSample,
    adc_fails: bool,
    leds: Vec<Rgb>,
    announced: Vec<Mode>,
}

impl Board for FakeBoard {
    fn read_axes(&mut self) -> Result<AxisSample, Error> {
        if self.adc_fails {
            Err(Error::Adc)
        } else {
            Ok(self.sample)
        }
    }

    fn set_led(&mut self, color: Rgb) {
        self.leds.push(color);
    }

    fn announce(&mut self, mode: Mode) {
        self.announced.push(mode);
    }
}

struct FakeUsb {
    events: VecDeque<LinkEvent>,
    ready: bool,
    sent: Vec<HidReport>,
}

impl Transport for FakeUsb {
    fn service(&mut self) -> Option<LinkEvent> {
        self.events.pop_front()
    }

    fn ready(&self) -> bool {
        self.ready
    }

    fn send(&mut self, report: HidReport) -> Result<(), Error> {
        if !self.ready {
            return Err(Error::NotReady);
        }
        self.sent.push(report);
        Ok(())
    }
}

struct Rig {
    now: u64,
    scheduler: Scheduler,
    board: FakeBoard,
    usb: FakeUsb,
    inputs: InputMailbox,
}

impl Rig {
    fn new() -> Self {
        Self {
            now: 0,
            scheduler: Scheduler::new(SchedulerConfig::default(), 0),
            board: FakeBoard {
                sample: AxisSample::centered(),
                adc_fails: false,
                leds: Vec::new(),
                announced: Vec::new(),
            },
            usb: FakeUsb {
                events: VecDeque::new(),
                ready: true,
                sent: Vec::new(),
            },
            inputs: InputMailbox::new(200),
        }
    }

    /// Poll once per millisecond up to and including `until`.
    fn run_until(&mut self, until: u64) {
        while self.now < until {
            self.now += 1;
            self.scheduler
                .poll(self.now, &mut self.board, &mut self.usb, &self.inputs);
        }
    }

    /// Move the clock without polling, as if the main loop were stalled.
    fn stall_until(&mut self, until: u64) {
        self.now = until;
    }

    /// Press `control` at `at` and let go `hold_ms` later.
    fn tap(&mut self, control: Control, at: u64, hold_ms: u64) {
        self.run_until(at);
        self.inputs.press(control, self.now);
        self.run_until(at + hold_ms);
        self.inputs.release(control);
    }

    fn keyboard_reports(&self) -> Vec<KeyboardReport> {
        self.usb
            .sent
            .iter()
            .filter_map(|r| match r {
                HidReport::Keyboard(k) => Some(*k),
                HidReport::Mouse(_) => None,
            })
            .collect()
    }

    fn mouse_reports(&self) -> Vec<MouseReport> {
        self.usb
            .sent
            .iter()
            .filter_map(|r| match r {
                HidReport::Mouse(m) => Some(*m),
                HidReport::Keyboard(_) => None,
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════
// Mode switching
// ═══════════════════════════════════════════════════════════════════

#[test]
fn boot_mode_is_announced_once() {
    let mut rig = Rig::new();
    rig.run_until(100);
    assert_eq!(rig.scheduler.mode(), Mode::Mouse);
    assert_eq!(rig.board.announced, vec![Mode::Mouse]);
}

#[test]
fn joystick_click_cycles_through_all_modes() {
    let mut rig = Rig::new();

    rig.tap(Control::JoystickPress, 1000, 50);
    rig.run_until(1100);
    assert_eq!(rig.scheduler.mode(), Mode::Keyboard);

    rig.tap(Control::JoystickPress, 1300, 50);
    rig.run_until(1400);
    assert_eq!(rig.scheduler.mode(), Mode::Controller);

    rig.tap(Control::JoystickPress, 1600, 50);
    rig.run_until(1700);
    assert_eq!(rig.scheduler.mode(), Mode::Mouse);

    assert_eq!(
        rig.board.announced,
        vec![Mode::Mouse, Mode::Keyboard, Mode::Controller, Mode::Mouse]
    );
}

#[test]
fn long_hold_advances_once() {
    // Seen by the edge interrupt and, a tick later, by the polled level.
    let mut rig = Rig::new();
    rig.tap(Control::JoystickPress, 1000, 500);
    rig.run_until(2000);
    assert_eq!(rig.scheduler.mode(), Mode::Keyboard);
    assert_eq!(rig.board.announced.len(), 2);
}

#[test]
fn contact_bounce_inside_guard_window_is_ignored() {
    let mut rig = Rig::new();
    rig.tap(Control::JoystickPress, 1000, 2);
    rig.tap(Control::JoystickPress, 1004, 3);
    rig.tap(Control::JoystickPress, 1100, 20);
    rig.run_until(1500);
    assert_eq!(rig.scheduler.mode(), Mode::Keyboard);
}

#[test]
fn polled_path_catches_press_rejected_at_the_edge() {
    let mut rig = Rig::new();

    // A click claims the shared guard.
    rig.tap(Control::ButtonA, 1000, 10);
    rig.run_until(1100);

    // The switch edge lands inside the window and is not posted.
    assert!(!rig.inputs.press(Control::JoystickPress, 1100));

    // Main loop next runs after the window; the switch is still down.
    rig.stall_until(1350);
    rig.run_until(1351);
    assert_eq!(rig.scheduler.mode(), Mode::Keyboard);

    rig.inputs.release(Control::JoystickPress);
    rig.run_until(1600);
    assert_eq!(rig.scheduler.mode(), Mode::Keyboard);
}

// ═══════════════════════════════════════════════════════════════════
// Status LED
// ═══════════════════════════════════════════════════════════════════

#[test]
fn led_blink_rate_follows_link_state() {
    let mut rig = Rig::new();

    // Not mounted: 250 ms.
    rig.run_until(500);
    assert_eq!(rig.board.leds, vec![Rgb::OFF, Rgb::BLUE]);

    // Mounted: 1000 ms.
    rig.usb.events.push_back(LinkEvent::Mounted);
    rig.run_until(1499);
    assert_eq!(rig.scheduler.link_state(), LinkState::Mounted);
    assert_eq!(rig.board.leds.len(), 2);
    rig.run_until(1500);
    assert_eq!(rig.board.leds.len(), 3);
    rig.run_until(2500);
    assert_eq!(rig.board.leds.len(), 4);

    // Suspended: 2500 ms.
    rig.usb.events.push_back(LinkEvent::Suspended);
    rig.run_until(4999);
    assert_eq!(rig.scheduler.link_state(), LinkState::Suspended);
    assert_eq!(rig.board.leds.len(), 4);
    rig.run_until(5000);
    assert_eq!(rig.board.leds.len(), 5);

    rig.usb.events.push_back(LinkEvent::Resumed);
    rig.run_until(5001);
    assert_eq!(rig.scheduler.link_state(), LinkState::Mounted);
}

#[test]
fn led_colour_tracks_active_mode() {
    let mut rig = Rig::new();
    rig.tap(Control::JoystickPress, 100, 20);
    rig.run_until(500);
    assert_eq!(rig.board.leds.last(), Some(&Rgb::GREEN));
}

// ═══════════════════════════════════════════════════════════════════
// Report generation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn keyboard_mode_types_over_previous_glyph() {
    let mut rig = Rig::new();
    rig.tap(Control::JoystickPress, 100, 20);
    rig.tap(Control::ButtonA, 400, 20);
    rig.run_until(500);

    assert_eq!(
        rig.keyboard_reports(),
        vec![
            KeyboardReport::single(0, keycode::BACKSPACE),
            KeyboardReport::empty(),
            KeyboardReport::single(MODIFIER_LEFT_SHIFT, keycode::A + 1),
            KeyboardReport::empty(),
        ]
    );
}

#[test]
fn leaving_keyboard_mode_releases_held_glyph() {
    let mut rig = Rig::new();
    rig.tap(Control::JoystickPress, 100, 20);
    rig.tap(Control::ButtonA, 400, 5);

    // Backspace down, up, glyph down.
    rig.run_until(430);
    assert_eq!(rig.keyboard_reports().len(), 3);

    // Switch away with the glyph still down and the bus busy.
    rig.usb.ready = false;
    rig.stall_until(700);
    rig.tap(Control::JoystickPress, 700, 20);
    assert_eq!(rig.scheduler.mode(), Mode::Controller);
    assert_eq!(rig.keyboard_reports().len(), 3);

    rig.usb.ready = true;
    rig.run_until(800);
    let reports = rig.keyboard_reports();
    assert_eq!(reports.len(), 4);
    assert!(reports[3].is_empty());
}

#[test]
fn controller_mode_sends_arrows_then_one_release() {
    let mut rig = Rig::new();
    rig.tap(Control::JoystickPress, 100, 20);
    rig.board.sample = AxisSample { x: 4095, y: 2047 };
    rig.tap(Control::JoystickPress, 400, 20);
    assert_eq!(rig.scheduler.mode(), Mode::Controller);

    rig.run_until(430);
    rig.board.sample = AxisSample::centered();
    rig.run_until(600);

    let right = KeyboardReport::single(0, keycode::ARROW_RIGHT);
    assert_eq!(
        rig.keyboard_reports(),
        vec![KeyboardReport::empty(), right, right, right, KeyboardReport::empty()]
    );
}

#[test]
fn leaving_mouse_mode_releases_held_button() {
    let mut rig = Rig::new();
    rig.run_until(100);
    rig.inputs.press(Control::ButtonA, 100);

    rig.tap(Control::JoystickPress, 400, 20);
    assert_eq!(rig.scheduler.mode(), Mode::Keyboard);
    rig.run_until(600);
    rig.inputs.release(Control::ButtonA);
    rig.run_until(1000);

    let reports = rig.mouse_reports();
    let n = reports.len();
    assert_eq!(reports[n - 2].buttons, BUTTON_LEFT);
    assert!(reports[n - 1].is_idle());
}

#[test]
fn reentering_controller_mode_sends_no_stale_release() {
    let mut rig = Rig::new();
    rig.board.sample = AxisSample { x: 4095, y: 2047 };
    rig.tap(Control::JoystickPress, 100, 20);
    rig.tap(Control::JoystickPress, 400, 20);
    assert_eq!(rig.scheduler.mode(), Mode::Controller);

    // Leave with the stick pushed, come back with it centred.
    rig.tap(Control::JoystickPress, 700, 20);
    rig.board.sample = AxisSample::centered();
    rig.tap(Control::JoystickPress, 1000, 20);
    rig.run_until(1300);
    let before = rig.keyboard_reports().len();

    rig.tap(Control::JoystickPress, 1300, 20);
    rig.run_until(1600);
    assert_eq!(rig.scheduler.mode(), Mode::Controller);

    // Only the release owed by Keyboard mode.
    let reports = rig.keyboard_reports();
    assert_eq!(reports.len(), before + 1);
    assert!(reports[before].is_empty());
}

#[test]
fn mouse_click_survives_busy_bus() {
    let mut rig = Rig::new();
    rig.usb.ready = false;

    rig.tap(Control::ButtonA, 100, 3);
    rig.run_until(150);
    assert!(rig.mouse_reports().is_empty());

    rig.usb.ready = true;
    rig.run_until(170);
    let reports = rig.mouse_reports();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].buttons, BUTTON_LEFT);
    assert_eq!(reports[1].buttons, 0);
}

#[test]
fn adc_failure_reads_as_centred_stick() {
    let mut rig = Rig::new();
    rig.board.sample = AxisSample { x: 0, y: 0 };
    rig.board.adc_fails = true;
    rig.run_until(10);

    let reports = rig.mouse_reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].is_idle());
}
