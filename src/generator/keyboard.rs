//! Character picker that types over its own previous output.
//!
//! Button A moves to the next glyph, button B to the previous one.
//! After each move the host receives Backspace then the new glyph, so
//! the text cursor shows exactly one character tracking the picker.
//! The four reports go out on four consecutive HID ticks.

use crate::hid::keyboard::{keycode, KeyboardReport, MODIFIER_LEFT_SHIFT};
use crate::input::{Control, Controls};
use crate::transport::Transport;

use super::Outcome;

/// Set of glyphs the picker cycles through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alphabet {
    /// `A`-`Z`.
    #[default]
    Letters,
    /// `A`-`Z`, `a`-`z`, `0`-`9`.
    Extended,
}

impl Alphabet {
    pub const fn len(self) -> usize {
        match self {
            Alphabet::Letters => 26,
            Alphabet::Extended => 62,
        }
    }

    /// Glyph at `index`, wrapping past the end.
    pub fn glyph(self, index: usize) -> char {
        let i = (index % self.len()) as u8;
        let byte = match i {
            0..=25 => b'A' + i,
            26..=51 => b'a' + (i - 26),
            _ => b'0' + (i - 52),
        };
        char::from(byte)
    }
}

/// Modifier and usage code that type `glyph` on a US layout.
pub fn key_for(glyph: char) -> Option<(u8, u8)> {
    match glyph {
        'A'..='Z' => Some((MODIFIER_LEFT_SHIFT, keycode::A + (glyph as u8 - b'A'))),
        'a'..='z' => Some((0, keycode::A + (glyph as u8 - b'a'))),
        '1'..='9' => Some((0, keycode::DIGIT_1 + (glyph as u8 - b'1'))),
        '0' => Some((0, keycode::DIGIT_0)),
        _ => None,
    }
}

/// Position in the type-over sequence.  `Idle` means nothing is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stroke {
    Idle,
    BackspacePress,
    BackspaceRelease,
    GlyphPress,
    GlyphRelease,
}

impl Stroke {
    const fn next(self) -> Stroke {
        match self {
            Stroke::Idle => Stroke::Idle,
            Stroke::BackspacePress => Stroke::BackspaceRelease,
            Stroke::BackspaceRelease => Stroke::GlyphPress,
            Stroke::GlyphPress => Stroke::GlyphRelease,
            Stroke::GlyphRelease => Stroke::Idle,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Typist {
    alphabet: Alphabet,
    cursor: usize,
    stroke: Stroke,
    retype: bool,
}

impl Typist {
    pub const fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            cursor: 0,
            stroke: Stroke::Idle,
            retype: false,
        }
    }

    pub fn glyph(&self) -> char {
        self.alphabet.glyph(self.cursor)
    }

    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    /// Drop any half-typed sequence.  The picked glyph is kept.
    ///
    /// The caller is responsible for releasing keys on the host.
    pub fn reset(&mut self) {
        self.stroke = Stroke::Idle;
        self.retype = false;
    }

    pub fn step<T: Transport>(&mut self, events: Controls, transport: &mut T) -> Outcome {
        let mut moved = false;
        if events.contains(Control::ButtonA) {
            self.cursor = (self.cursor + 1) % self.alphabet.len();
            moved = true;
        }
        if events.contains(Control::ButtonB) {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.alphabet.len() - 1);
            moved = true;
        }
        if moved {
            #[cfg(feature = "defmt")]
            defmt::debug!("Typist: glyph {}", self.glyph());

            match self.stroke {
                Stroke::Idle => self.stroke = Stroke::BackspacePress,
                // Glyph already sent; type over it once this sequence ends.
                Stroke::GlyphRelease => self.retype = true,
                // Glyph not sent yet; it will pick up the new cursor.
                _ => {}
            }
        }

        if self.stroke == Stroke::Idle {
            return Outcome::Idle;
        }
        if !transport.ready() {
            return Outcome::Deferred;
        }
        if transport.send(self.report().into()).is_err() {
            return Outcome::Deferred;
        }

        self.stroke = self.stroke.next();
        if self.stroke == Stroke::Idle && self.retype {
            self.retype = false;
            self.stroke = Stroke::BackspacePress;
        }
        Outcome::Sent
    }

    fn report(&self) -> KeyboardReport {
        match self.stroke {
            Stroke::BackspacePress => KeyboardReport::single(0, keycode::BACKSPACE),
            Stroke::GlyphPress => match key_for(self.glyph()) {
                Some((modifier, code)) => KeyboardReport::single(modifier, code),
                None => KeyboardReport::empty(),
            },
            Stroke::Idle | Stroke::BackspaceRelease | Stroke::GlyphRelease => {
                KeyboardReport::empty()
            }
        }
    }
}
