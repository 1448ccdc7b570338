//! Physical controls and the interrupt → scheduler input mailbox.
//!
//! Button tasks (woken by GPIO edge interrupts) are the only writers of
//! press/release state; the scheduler is the only reader, and it drains
//! what it reads.  Both sides go through a critical-section mutex so the
//! handoff is safe on the RP2040's single-core, CAS-less Cortex-M0+.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::debounce::DebounceGuard;

/// A physical push control on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    /// Joystick push switch - cycles the operating mode.
    JoystickPress,
    /// Button A - left click / next character.
    ButtonA,
    /// Button B - right click / previous character.
    ButtonB,
}

impl Control {
    const fn bit(self) -> u8 {
        match self {
            Control::JoystickPress => 1 << 0,
            Control::ButtonA => 1 << 1,
            Control::ButtonB => 1 << 2,
        }
    }
}

/// Small bit set of [`Control`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Controls(u8);

impl Controls {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, control: Control) -> bool {
        self.0 & control.bit() != 0
    }

    pub fn insert(&mut self, control: Control) {
        self.0 |= control.bit();
    }

    pub fn remove(&mut self, control: Control) {
        self.0 &= !control.bit();
    }

    pub const fn union(self, other: Controls) -> Controls {
        Controls(self.0 | other.0)
    }
}

impl From<Control> for Controls {
    fn from(control: Control) -> Self {
        Controls(control.bit())
    }
}

/// What the scheduler sees when it drains the mailbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Presses accepted by the debounce guard since the last drain.
    pub events: Controls,
    /// Controls physically held down right now.
    pub held: Controls,
    /// Controls pressed at any point since the last drain (sticky OR).
    pub latched: Controls,
}

struct Inner {
    guard: DebounceGuard,
    pending: Controls,
    held: Controls,
    latched: Controls,
}

/// Single-producer / single-consumer handoff between the button tasks
/// and the scheduler.
///
/// One [`DebounceGuard`] is shared by every control and by both the
/// interrupt path ([`InputMailbox::press`]) and the scheduler's polled
/// path ([`InputMailbox::accept_polled`]).
pub struct InputMailbox {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Inner>>,
}

impl InputMailbox {
    pub const fn new(guard_window_ms: u64) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                guard: DebounceGuard::new(guard_window_ms),
                pending: Controls::empty(),
                held: Controls::empty(),
                latched: Controls::empty(),
            })),
        }
    }

    /// Producer: a control went down at `now_ms`.
    ///
    /// Always records the held level and the click latch; posts an event
    /// only if the debounce guard accepts it.  Returns whether it did.
    pub fn press(&self, control: Control, now_ms: u64) -> bool {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            inner.held.insert(control);
            inner.latched.insert(control);
            let accepted = inner.guard.accept(now_ms);
            if accepted {
                inner.pending.insert(control);
            }
            accepted
        })
    }

    /// Producer: a control was let go.
    pub fn release(&self, control: Control) {
        self.inner.lock(|cell| cell.borrow_mut().held.remove(control));
    }

    /// Consumer: run a press seen by polling through the shared guard.
    ///
    /// The result is returned rather than posted; the caller acts on it
    /// in the same tick.  A press the edge path rejected inside the
    /// window is accepted here if the poll itself falls outside it, so
    /// whether such a press counts depends on when the next poll lands.
    pub fn accept_polled(&self, now_ms: u64) -> bool {
        self.inner.lock(|cell| cell.borrow_mut().guard.accept(now_ms))
    }

    /// Consumer: take pending events and click latches, read held levels.
    pub fn drain(&self) -> InputSnapshot {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            let snapshot = InputSnapshot {
                events: inner.pending,
                held: inner.held,
                latched: inner.latched,
            };
            inner.pending = Controls::empty();
            inner.latched = Controls::empty();
            snapshot
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_set_operations() {
        let mut set = Controls::empty();
        assert!(set.is_empty());
        set.insert(Control::ButtonB);
        assert!(set.contains(Control::ButtonB));
        assert!(!set.contains(Control::ButtonA));
        let both = set.union(Control::ButtonA.into());
        assert!(both.contains(Control::ButtonA) && both.contains(Control::ButtonB));
        set.remove(Control::ButtonB);
        assert!(set.is_empty());
    }

    #[test]
    fn press_posts_event_and_latch() {
        let mailbox = InputMailbox::new(200);
        assert!(mailbox.press(Control::ButtonA, 1_000));

        let snap = mailbox.drain();
        assert!(snap.events.contains(Control::ButtonA));
        assert!(snap.held.contains(Control::ButtonA));
        assert!(snap.latched.contains(Control::ButtonA));

        // Events and latches are consumed; the held level is not.
        let snap = mailbox.drain();
        assert!(snap.events.is_empty());
        assert!(snap.latched.is_empty());
        assert!(snap.held.contains(Control::ButtonA));

        mailbox.release(Control::ButtonA);
        assert!(mailbox.drain().held.is_empty());
    }

    #[test]
    fn guard_is_shared_between_controls() {
        let mailbox = InputMailbox::new(200);
        assert!(mailbox.press(Control::ButtonA, 1_000));
        mailbox.release(Control::ButtonA);
        assert!(!mailbox.press(Control::JoystickPress, 1_050));
        assert!(!mailbox.press(Control::ButtonB, 1_100));

        let snap = mailbox.drain();
        assert_eq!(snap.events, Controls::from(Control::ButtonA));
        // Rejected presses still latch clicks.
        assert!(snap.latched.contains(Control::ButtonB));
        assert!(snap.latched.contains(Control::JoystickPress));
    }

    #[test]
    fn polled_path_uses_same_guard() {
        let mailbox = InputMailbox::new(200);
        assert!(mailbox.press(Control::JoystickPress, 500));
        assert!(!mailbox.accept_polled(505));
        assert!(mailbox.accept_polled(800));
        assert!(!mailbox.press(Control::JoystickPress, 900));
    }

    #[test]
    fn bounce_collapses_into_single_event() {
        let mailbox = InputMailbox::new(200);
        for t in [0, 2, 5, 9] {
            mailbox.press(Control::ButtonB, t);
        }
        let snap = mailbox.drain();
        assert_eq!(snap.events, Controls::from(Control::ButtonB));
    }
}
