//! Full-board graphics, one glyph per segment (upper row first).
//!
//! Frames were drawn with <https://xantorohara.github.io/led-matrix-editor/>.

use crate::board::SEGMENT_COUNT;

pub type BoardGraphic = [u64; SEGMENT_COUNT];

/// "WORD" + arrow over "SEEK!", shown while waiting for the first game.
pub const TITLE_SCREEN: BoardGraphic = [
    0x0063777f6b636363,
    0x001c36636363361c,
    0x006766363e66663f,
    0x001f36666666361f,
    0x006666667e3e0000,
    0x001e33380e07331e,
    0x007f46161e16467f,
    0x007f46161e16467f,
    0x006766361e366667,
    0x180018183c3c1800,
];

/// "GOOD" over "BYE", shown after the player exits.
pub const EXIT_SCREEN: BoardGraphic = [
    0x3c66760606663c00,
    0x3c66666666663c00,
    0x3c66666666663c00,
    0x3e66666666663e00,
    0x0000000000000000,
    0x0000000000000000,
    0x3e66663e66663e00,
    0x1818183c66666600,
    0x7e06063e06067e00,
    0x0000000000000000,
];

/// Frames played on every segment at power-up.
pub const BOOT_ANIMATION: [u64; 3] = [0xffffffffffffffff, 0xfff9c1bdffffdbff, 0x00063e4200002400];

pub const BOOT_FRAME_MS: u64 = 1_000;
pub const BOOT_HOLD_MS: u64 = 700;
