//! Operating mode state machine.

use core::fmt::Write;

use heapless::String;

/// What the device currently presents itself as to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Joystick moves the cursor, A/B click.
    #[default]
    Mouse,
    /// A/B pick a character which is typed over the previous one.
    Keyboard,
    /// Joystick deflection becomes arrow keys.
    Controller,
}

impl Mode {
    /// Transition table for the mode-cycle control.
    pub const fn next(self) -> Mode {
        match self {
            Mode::Mouse => Mode::Keyboard,
            Mode::Keyboard => Mode::Controller,
            Mode::Controller => Mode::Mouse,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Mouse => "Mouse",
            Mode::Keyboard => "Keyboard",
            Mode::Controller => "Controller",
        }
    }

    /// Whether leaving this mode may leave keys down on the host.
    pub const fn sends_keys(self) -> bool {
        matches!(self, Mode::Keyboard | Mode::Controller)
    }

    /// Status LED colour while this mode is active.
    pub const fn led_color(self) -> Rgb {
        match self {
            Mode::Mouse => Rgb::BLUE,
            Mode::Keyboard => Rgb::GREEN,
            Mode::Controller => Rgb::RED,
        }
    }
}

/// On/off state of the three LED channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Rgb {
    pub const OFF: Rgb = Rgb {
        red: false,
        green: false,
        blue: false,
    };
    pub const RED: Rgb = Rgb {
        red: true,
        green: false,
        blue: false,
    };
    pub const GREEN: Rgb = Rgb {
        red: false,
        green: true,
        blue: false,
    };
    pub const BLUE: Rgb = Rgb {
        red: false,
        green: false,
        blue: true,
    };
}

/// Status text shown on the display for `mode`.
pub fn status_line(mode: Mode) -> String<20> {
    let mut line = String::new();
    let _ = write!(line, "Mode: {}", mode.name());
    line
}

/// Current mode plus a one-shot "changed" flag for the status display.
#[derive(Clone, Copy, Debug)]
pub struct ModeMachine {
    current: Mode,
    unannounced: bool,
}

impl ModeMachine {
    /// Start in [`Mode::Mouse`], with the boot mode still to be announced.
    pub const fn new() -> Self {
        Self {
            current: Mode::Mouse,
            unannounced: true,
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// Step to the next mode.  Returns the mode that was left.
    pub fn advance(&mut self) -> Mode {
        let previous = self.current;
        self.current = previous.next();
        self.unannounced = true;

        #[cfg(feature = "defmt")]
        defmt::info!("Mode: {} -> {}", previous, self.current);

        previous
    }

    /// Returns the current mode once after each change, then `None`.
    pub fn take_announcement(&mut self) -> Option<Mode> {
        if self.unannounced {
            self.unannounced = false;
            Some(self.current)
        } else {
            None
        }
    }
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_all_modes_and_wraps() {
        let mut modes = ModeMachine::new();
        assert_eq!(modes.current(), Mode::Mouse);
        assert_eq!(modes.advance(), Mode::Mouse);
        assert_eq!(modes.current(), Mode::Keyboard);
        modes.advance();
        assert_eq!(modes.current(), Mode::Controller);
        assert_eq!(modes.advance(), Mode::Controller);
        assert_eq!(modes.current(), Mode::Mouse);
    }

    #[test]
    fn boot_mode_is_announced_once() {
        let mut modes = ModeMachine::new();
        assert_eq!(modes.take_announcement(), Some(Mode::Mouse));
        assert_eq!(modes.take_announcement(), None);
    }

    #[test]
    fn each_change_is_announced_once() {
        let mut modes = ModeMachine::new();
        let _ = modes.take_announcement();
        modes.advance();
        assert_eq!(modes.take_announcement(), Some(Mode::Keyboard));
        assert_eq!(modes.take_announcement(), None);

        // Two changes before the next tick collapse into one announcement.
        modes.advance();
        modes.advance();
        assert_eq!(modes.take_announcement(), Some(Mode::Mouse));
        assert_eq!(modes.take_announcement(), None);
    }

    #[test]
    fn status_line_names_mode() {
        assert_eq!(status_line(Mode::Mouse).as_str(), "Mode: Mouse");
        assert_eq!(status_line(Mode::Controller).as_str(), "Mode: Controller");
    }

    #[test]
    fn key_sending_modes() {
        assert!(!Mode::Mouse.sends_keys());
        assert!(Mode::Keyboard.sends_keys());
        assert!(Mode::Controller.sends_keys());
    }

    #[test]
    fn each_mode_has_distinct_colour() {
        assert_ne!(Mode::Mouse.led_color(), Mode::Keyboard.led_color());
        assert_ne!(Mode::Keyboard.led_color(), Mode::Controller.led_color());
        assert_ne!(Mode::Controller.led_color(), Mode::Mouse.led_color());
    }
}
