//! Collaborators the game controller talks to besides the display.

use heapless::String;

use crate::{board::WORD_LEN, input::Button};

/// Raw per-letter verdict: `+` correct, `x` misplaced, `-` absent.
pub type Verdict = String<WORD_LEN>;

pub const VERDICT_CORRECT: char = '+';
pub const VERDICT_MISPLACED: char = 'x';
pub const VERDICT_ABSENT: char = '-';

/// Remote word service. Calls are awaited inline, one at a time.
pub trait WordService {
    type Error: core::fmt::Debug;

    /// New secret word, five ASCII letters in either case.
    async fn fetch_word(&mut self) -> Result<String<WORD_LEN>, Self::Error>;

    /// Scores a lowercase guess against the current secret.
    async fn check_word(&mut self, guess: &str) -> Result<Verdict, Self::Error>;
}

/// Which option-button LEDs are lit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LedMask(u8);

impl LedMask {
    pub const NONE: Self = Self(0);
    pub const SELECT: Self = Self::button(Button::SELECT);
    pub const GUESS: Self = Self::button(Button::GUESS);
    pub const DELETE: Self = Self::button(Button::DELETE);
    pub const EXIT: Self = Self::button(Button::EXIT);
    pub const ALL: Self = Self(0b1111);

    pub const fn button(button: Button) -> Self {
        Self(1 << button as u8)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, button: Button) -> bool {
        self.0 & Self::button(button).0 != 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

pub trait ButtonLeds {
    type Error: core::fmt::Debug;

    fn set_leds(&mut self, mask: LedMask) -> Result<(), Self::Error>;
}
