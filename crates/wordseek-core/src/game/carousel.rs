use crate::{
    input::Direction,
    symbols::{ALPHABET_LEN, Symbol},
};

/// Lower-display slots showing the three carousel letters.
pub const START_SLOT: usize = 1;
pub const MID_SLOT: usize = 2;
pub const END_SLOT: usize = 3;

/// Three consecutive alphabet indices shown by the letter carousel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CarouselSlider {
    start: usize,
    mid: usize,
    end: usize,
}

impl CarouselSlider {
    /// Starts on `Z A B`.
    pub const fn new() -> Self {
        Self {
            start: ALPHABET_LEN - 1,
            mid: 0,
            end: 1,
        }
    }

    /// Shifts all three letters one alphabet position. Up/Down are ignored.
    pub fn cycle(&mut self, direction: Direction) {
        let shift = match direction {
            Direction::Left => ALPHABET_LEN - 1,
            Direction::Right => 1,
            Direction::Up | Direction::Down => return,
        };

        self.start = (self.start + shift) % ALPHABET_LEN;
        self.mid = (self.mid + shift) % ALPHABET_LEN;
        self.end = (self.end + shift) % ALPHABET_LEN;
    }

    pub const fn indices(&self) -> (usize, usize, usize) {
        (self.start, self.mid, self.end)
    }

    pub const fn letters(&self) -> [Symbol; 3] {
        [
            Symbol::letter(self.start),
            Symbol::letter(self.mid),
            Symbol::letter(self.end),
        ]
    }
}

impl Default for CarouselSlider {
    fn default() -> Self {
        Self::new()
    }
}
