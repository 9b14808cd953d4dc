//! Segment grid and cursor engine for the two 5-module LED displays.
//!
//! The board owns the authoritative copy of every segment's glyph and writes
//! through to a [`SegmentDriver`]. While the cursor is enabled, the cell it
//! addresses (and only that cell) holds the complement of its glyph.

mod cursor;

use heapless::String;
use log::{debug, error, warn};

pub use cursor::{Cursor, HOME_POSITION, HOME_ROW, LEFT_EDGE, RIGHT_EDGE};

use crate::{
    error::{Error, Result},
    graphics::BoardGraphic,
    input::Direction,
    symbols::{Symbol, char_of, glyph_of},
};

/// Segments per display row.
pub const ROW_LEN: usize = 5;
/// Segments on the whole board.
pub const SEGMENT_COUNT: usize = ROW_LEN * 2;
/// Letters in a word.
pub const WORD_LEN: usize = ROW_LEN;
pub const MAX_BRIGHTNESS: u8 = 15;

pub type Word = String<WORD_LEN>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Row {
    Upper,
    Lower,
}

impl Row {
    pub const fn other(self) -> Self {
        match self {
            Row::Upper => Row::Lower,
            Row::Lower => Row::Upper,
        }
    }

    const fn index(self) -> usize {
        match self {
            Row::Upper => 0,
            Row::Lower => 1,
        }
    }

    /// Linear segment index of `position` on this row.
    pub const fn segment(self, position: usize) -> usize {
        self.index() * ROW_LEN + position
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    Upper,
    Lower,
    All,
}

/// Display collaborator: ten 8x8 modules addressed linearly, upper row first.
pub trait SegmentDriver {
    type Error: core::fmt::Debug;

    fn draw_glyph(&mut self, segment: usize, glyph: u64) -> core::result::Result<(), Self::Error>;
    fn set_brightness(&mut self, level: u8) -> core::result::Result<(), Self::Error>;
    fn clear_all(&mut self) -> core::result::Result<(), Self::Error>;
}

pub struct MatrixBoard<D> {
    driver: D,
    grid: [[u64; ROW_LEN]; 2],
    cursor: Cursor,
    brightness: u8,
}

impl<D> MatrixBoard<D>
where
    D: SegmentDriver,
{
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            grid: [[0; ROW_LEN]; 2],
            cursor: Cursor::home(),
            brightness: 0,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Stored glyph for a cell (complemented if under the cursor).
    pub fn segment(&self, row: Row, position: usize) -> Option<u64> {
        self.grid[row.index()].get(position).copied()
    }

    /// Zeroes part of the grid. Hardware failures are logged only.
    pub fn clear(&mut self, target: Target) {
        match target {
            Target::All => {
                self.grid = [[0; ROW_LEN]; 2];
                if let Err(err) = self.driver.clear_all() {
                    error!("board: clear_all failed err={:?}", err);
                }
            }
            Target::Upper | Target::Lower => {
                let row = if target == Target::Upper {
                    Row::Upper
                } else {
                    Row::Lower
                };
                self.grid[row.index()] = [0; ROW_LEN];
                for position in 0..ROW_LEN {
                    let _ = self.draw(row, position);
                }
            }
        }

        let cursor = self.cursor;
        let cleared = target == Target::All
            || (target == Target::Upper && cursor.row == Row::Upper)
            || (target == Target::Lower && cursor.row == Row::Lower);
        if cursor.enabled && cleared {
            let _ = self.invert(cursor.row, cursor.position);
        }
    }

    /// Writes one symbol, highlighted if the cursor sits on that cell.
    pub fn set_symbol(&mut self, symbol: Symbol, row: Row, position: usize) -> Result<()> {
        if position >= ROW_LEN {
            return Err(Error::InvalidArgument);
        }
        let glyph = glyph_of(symbol).ok_or(Error::InvalidArgument)?;

        let under_cursor =
            self.cursor.enabled && self.cursor.row == row && self.cursor.position == position;
        self.grid[row.index()][position] = if under_cursor { !glyph } else { glyph };
        self.draw(row, position)
    }

    /// Writes a whole row left to right.
    pub fn fill_row(&mut self, row: Row, symbols: &[Symbol; ROW_LEN]) -> Result<()> {
        let mut result = Ok(());
        for (position, symbol) in symbols.iter().enumerate() {
            result = result.and(self.set_symbol(*symbol, row, position));
        }
        result
    }

    pub fn move_cursor(&mut self, direction: Direction) -> Result<()> {
        if !self.cursor.enabled {
            return Ok(());
        }

        let from = self.cursor;
        let restored = self.invert(from.row, from.position);
        self.cursor = from.step(direction);
        let highlighted = self.invert(self.cursor.row, self.cursor.position);
        debug!(
            "board: cursor {:?}/{} -> {:?}/{}",
            from.row, from.position, self.cursor.row, self.cursor.position
        );

        restored.and(highlighted)
    }

    /// Moves `steps` times without drawing the intermediate cells.
    ///
    /// The cursor ends up shown at the final cell even if it was hidden.
    pub fn move_cursor_multiple(&mut self, direction: Direction, steps: usize) -> Result<()> {
        let hidden = if self.cursor.enabled {
            self.disable_cursor()
        } else {
            Ok(())
        };
        for _ in 0..steps {
            self.cursor = self.cursor.step(direction);
        }
        hidden.and(self.enable_cursor())
    }

    /// Re-homes the cursor to the middle of the upper display and shows it.
    pub fn reset_cursor(&mut self) -> Result<()> {
        let restored = if self.cursor.enabled {
            let Cursor { row, position, .. } = self.cursor;
            self.invert(row, position)
        } else {
            Ok(())
        };

        self.cursor = Cursor {
            enabled: true,
            ..Cursor::home()
        };
        restored.and(self.invert(HOME_ROW, HOME_POSITION))
    }

    pub fn enable_cursor(&mut self) -> Result<()> {
        if self.cursor.enabled {
            warn!("board: cursor already enabled");
            return Ok(());
        }

        self.cursor.enabled = true;
        self.invert(self.cursor.row, self.cursor.position)
    }

    /// Hides the cursor, restoring its cell to the plain glyph.
    pub fn disable_cursor(&mut self) -> Result<()> {
        if !self.cursor.enabled {
            warn!("board: cursor already disabled");
            return Ok(());
        }

        self.cursor.enabled = false;
        self.invert(self.cursor.row, self.cursor.position)
    }

    /// Runs `f` with the cursor hidden, then shows it again if it was visible.
    pub fn with_cursor_hidden<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let was_enabled = self.cursor.enabled;
        if was_enabled {
            let _ = self.disable_cursor();
        }

        let result = f(self);

        if was_enabled && !self.cursor.enabled {
            let _ = self.enable_cursor();
        }
        result
    }

    pub fn char_at_cursor(&self) -> char {
        char_of(self.grid[self.cursor.row.index()][self.cursor.position])
    }

    /// Decodes the upper display into `buf`.
    pub fn read_word<'a>(&self, buf: &'a mut [u8]) -> Result<&'a str> {
        let Some(out) = buf.get_mut(..WORD_LEN) else {
            return Err(Error::InvalidSize);
        };

        for (byte, glyph) in out.iter_mut().zip(self.grid[Row::Upper.index()]) {
            // Decoded characters are always ASCII.
            *byte = char_of(glyph) as u8;
        }

        core::str::from_utf8(out).map_err(|_| Error::InvalidArgument)
    }

    pub fn word(&self) -> Word {
        let mut word = Word::new();
        for glyph in self.grid[Row::Upper.index()] {
            let _ = word.push(char_of(glyph));
        }
        word
    }

    /// Pass-through to the display brightness, clamped to 0..=15.
    pub fn set_brightness(&mut self, level: u8) -> Result<()> {
        self.brightness = level.min(MAX_BRIGHTNESS);
        self.driver.set_brightness(self.brightness).map_err(|err| {
            error!(
                "board: set_brightness failed level={} err={:?}",
                self.brightness, err
            );
            Error::HardwareFailure
        })
    }

    /// Draws a full-board graphic outside the symbol grid.
    ///
    /// The cursor is hidden and the grid is left cleared.
    pub fn show_graphic(&mut self, graphic: &BoardGraphic) -> Result<()> {
        self.cursor.enabled = false;
        self.grid = [[0; ROW_LEN]; 2];

        let mut result = Ok(());
        for (segment, glyph) in graphic.iter().enumerate() {
            result = result.and(self.driver.draw_glyph(segment, *glyph).map_err(|err| {
                error!("board: graphic draw failed segment={} err={:?}", segment, err);
                Error::HardwareFailure
            }));
        }
        result
    }

    fn invert(&mut self, row: Row, position: usize) -> Result<()> {
        let cell = &mut self.grid[row.index()][position];
        *cell = !*cell;
        self.draw(row, position)
    }

    fn draw(&mut self, row: Row, position: usize) -> Result<()> {
        let segment = row.segment(position);
        let glyph = self.grid[row.index()][position];
        self.driver.draw_glyph(segment, glyph).map_err(|err| {
            error!(
                "board: draw failed segment={} glyph={:#018x} err={:?}",
                segment, glyph, err
            );
            Error::HardwareFailure
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory display that mirrors every draw.
    #[derive(Default)]
    pub(crate) struct FakeDisplay {
        pub segments: [u64; SEGMENT_COUNT],
        pub draws: usize,
        pub brightness: u8,
        pub fail_draws: bool,
        pub clears: usize,
    }

    impl SegmentDriver for FakeDisplay {
        type Error = ();

        fn draw_glyph(&mut self, segment: usize, glyph: u64) -> core::result::Result<(), ()> {
            if self.fail_draws {
                return Err(());
            }
            self.segments[segment] = glyph;
            self.draws += 1;
            Ok(())
        }

        fn set_brightness(&mut self, level: u8) -> core::result::Result<(), ()> {
            self.brightness = level;
            Ok(())
        }

        fn clear_all(&mut self) -> core::result::Result<(), ()> {
            self.segments = [0; SEGMENT_COUNT];
            self.clears += 1;
            Ok(())
        }
    }

    fn board_with(upper: &[Symbol; ROW_LEN], lower: &[Symbol; ROW_LEN]) -> MatrixBoard<FakeDisplay> {
        let mut board = MatrixBoard::new(FakeDisplay::default());
        board.fill_row(Row::Upper, upper).unwrap();
        board.fill_row(Row::Lower, lower).unwrap();
        board
    }

    fn glyph(symbol: Symbol) -> u64 {
        glyph_of(symbol).unwrap()
    }

    /// Number of cells currently holding a complemented glyph.
    fn highlighted(board: &MatrixBoard<FakeDisplay>) -> usize {
        board
            .grid
            .iter()
            .flatten()
            .filter(|cell| Symbol::VALID.iter().any(|s| glyph(*s) == !**cell))
            .count()
    }

    const HELLO: [Symbol; ROW_LEN] = [Symbol::H, Symbol::E, Symbol::L, Symbol::L, Symbol::O];
    const CAROUSEL: [Symbol; ROW_LEN] = [
        Symbol::LeftArrow,
        Symbol::Z,
        Symbol::A,
        Symbol::B,
        Symbol::RightArrow,
    ];

    #[test]
    fn set_symbol_writes_through_to_driver() {
        let board = board_with(&HELLO, &CAROUSEL);
        assert_eq!(board.driver().segments[0], glyph(Symbol::H));
        assert_eq!(board.driver().segments[5], glyph(Symbol::LeftArrow));
        assert_eq!(board.driver().segments[9], glyph(Symbol::RightArrow));
    }

    #[test]
    fn set_symbol_rejects_bad_arguments() {
        let mut board = MatrixBoard::new(FakeDisplay::default());
        assert_eq!(
            board.set_symbol(Symbol::A, Row::Upper, ROW_LEN),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            board.set_symbol(Symbol::Invalid, Row::Upper, 0),
            Err(Error::InvalidArgument)
        );
        assert_eq!(board.driver().draws, 0);
    }

    #[test]
    fn set_symbol_under_cursor_stays_highlighted() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.reset_cursor().unwrap();
        board.set_symbol(Symbol::Q, Row::Upper, HOME_POSITION).unwrap();

        assert_eq!(board.segment(Row::Upper, HOME_POSITION), Some(!glyph(Symbol::Q)));
        assert_eq!(board.driver().segments[HOME_POSITION], !glyph(Symbol::Q));
        assert_eq!(board.char_at_cursor(), 'Q');
        assert_eq!(highlighted(&board), 1);
    }

    #[test]
    fn move_cursor_keeps_exactly_one_highlight() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.reset_cursor().unwrap();

        for direction in [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ] {
            board.move_cursor(direction).unwrap();
            assert_eq!(highlighted(&board), 1);
            let cursor = board.cursor();
            let cell = board.segment(cursor.row, cursor.position).unwrap();
            assert!(Symbol::VALID.iter().any(|s| glyph(*s) == !cell));
        }
    }

    #[test]
    fn move_cursor_is_noop_when_disabled() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        let draws = board.driver().draws;
        board.move_cursor(Direction::Right).unwrap();
        assert_eq!(board.cursor(), Cursor::home());
        assert_eq!(board.driver().draws, draws);
    }

    #[test]
    fn move_cursor_multiple_matches_repeated_moves() {
        for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            for steps in 0..8 {
                let mut stepped = board_with(&HELLO, &CAROUSEL);
                stepped.reset_cursor().unwrap();
                stepped.move_cursor(Direction::Down).unwrap();
                let mut jumped = board_with(&HELLO, &CAROUSEL);
                jumped.reset_cursor().unwrap();
                jumped.move_cursor(Direction::Down).unwrap();

                for _ in 0..steps {
                    stepped.move_cursor(direction).unwrap();
                }
                let before = jumped.driver().draws;
                jumped.move_cursor_multiple(direction, steps).unwrap();

                assert_eq!(jumped.cursor(), stepped.cursor());
                assert_eq!(jumped.grid, stepped.grid);
                // One restore plus one highlight, whatever the distance.
                assert_eq!(jumped.driver().draws - before, 2);
            }
        }
    }

    #[test]
    fn move_cursor_multiple_shows_a_hidden_cursor() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        assert!(!board.cursor().enabled);

        board.move_cursor_multiple(Direction::Right, 2).unwrap();

        let cursor = board.cursor();
        assert!(cursor.enabled);
        assert_eq!((cursor.row, cursor.position), (Row::Upper, 4));
        assert_eq!(board.segment(Row::Upper, 4), Some(!glyph(Symbol::O)));
        assert_eq!(board.driver().segments[4], !glyph(Symbol::O));
        assert_eq!(board.segment(Row::Upper, HOME_POSITION), Some(glyph(Symbol::L)));
        assert_eq!(highlighted(&board), 1);
    }

    #[test]
    fn cursor_toggles_are_idempotent() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.reset_cursor().unwrap();
        board.enable_cursor().unwrap();
        assert_eq!(highlighted(&board), 1);

        board.disable_cursor().unwrap();
        board.disable_cursor().unwrap();
        assert_eq!(highlighted(&board), 0);
        assert_eq!(board.segment(Row::Upper, HOME_POSITION), Some(glyph(Symbol::L)));
    }

    #[test]
    fn hidden_cursor_bracket_prevents_stray_highlight() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.reset_cursor().unwrap();
        board.move_cursor(Direction::Down).unwrap();

        board.with_cursor_hidden(|board| board.set_symbol(Symbol::W, Row::Upper, 0)).unwrap();

        assert_eq!(board.segment(Row::Upper, 0), Some(glyph(Symbol::W)));
        assert_eq!(highlighted(&board), 1);
        assert!(board.cursor().enabled);
    }

    #[test]
    fn reset_cursor_moves_highlight_home() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.reset_cursor().unwrap();
        board.move_cursor(Direction::Down).unwrap();
        board.move_cursor(Direction::Right).unwrap();
        board.reset_cursor().unwrap();

        assert_eq!(board.segment(Row::Lower, 3), Some(glyph(Symbol::B)));
        assert_eq!(board.cursor().row, HOME_ROW);
        assert_eq!(board.cursor().position, HOME_POSITION);
        assert_eq!(highlighted(&board), 1);
    }

    #[test]
    fn read_word_decodes_upper_row_through_cursor() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.reset_cursor().unwrap();

        let mut buf = [0u8; 6];
        assert_eq!(board.read_word(&mut buf), Ok("HELLO"));
        assert_eq!(board.word().as_str(), "HELLO");

        let mut small = [0u8; 4];
        assert_eq!(board.read_word(&mut small), Err(Error::InvalidSize));
    }

    #[test]
    fn clear_row_keeps_cursor_visible() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.reset_cursor().unwrap();
        board.clear(Target::Upper);

        assert_eq!(board.segment(Row::Upper, 0), Some(0));
        assert_eq!(board.segment(Row::Upper, HOME_POSITION), Some(!0));
        assert_eq!(board.segment(Row::Lower, 1), Some(glyph(Symbol::Z)));
        assert_eq!(board.driver().segments[0], 0);
    }

    #[test]
    fn clear_lower_leaves_upper_and_keeps_highlight() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.reset_cursor().unwrap();
        board.move_cursor(Direction::Down).unwrap();
        board.clear(Target::Lower);

        for position in 0..ROW_LEN {
            assert_eq!(board.segment(Row::Upper, position), Some(glyph(HELLO[position])));
            assert_eq!(board.driver().segments[Row::Lower.segment(position)] != 0, position == 2);
        }
        assert_eq!(board.segment(Row::Lower, 1), Some(0));
        assert_eq!(board.segment(Row::Lower, 2), Some(!0));
        assert_eq!(board.driver().clears, 0);
    }

    #[test]
    fn clear_all_uses_hardware_clear() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.clear(Target::All);

        assert_eq!(board.driver().clears, 1);
        for row in [Row::Upper, Row::Lower] {
            for position in 0..ROW_LEN {
                assert_eq!(board.segment(row, position), Some(0));
            }
        }
        assert_eq!(board.driver().segments, [0; SEGMENT_COUNT]);
        assert!(!board.cursor().enabled);
    }

    #[test]
    fn draw_failures_surface_but_grid_is_updated() {
        let mut board = board_with(&HELLO, &CAROUSEL);
        board.driver_mut().fail_draws = true;

        assert_eq!(
            board.set_symbol(Symbol::X, Row::Upper, 1),
            Err(Error::HardwareFailure)
        );
        assert_eq!(board.segment(Row::Upper, 1), Some(glyph(Symbol::X)));
    }

    #[test]
    fn brightness_is_clamped() {
        let mut board = MatrixBoard::new(FakeDisplay::default());
        board.set_brightness(40).unwrap();
        assert_eq!(board.brightness(), MAX_BRIGHTNESS);
        assert_eq!(board.driver().brightness, MAX_BRIGHTNESS);
    }
}
