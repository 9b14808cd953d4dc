//! Static symbol table: displayable symbols, their 8x8 glyphs and characters.
//!
//! Glyphs are packed row-major with row 0 in the low byte and bit 0 as the
//! leftmost column. A glyph's bitwise complement is the same symbol drawn
//! under the cursor.

/// Letters in the alphabet carousel.
pub const ALPHABET_LEN: usize = 26;

/// Character shown for an empty letter slot.
pub const PLACEHOLDER_CHAR: char = '-';

/// Returned by [`char_of`] when a glyph does not decode.
pub const UNKNOWN_CHAR: char = '?';

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Symbol {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    NoSelection,
    Incorrect,
    Unknown,
    Correct,
    RightArrow,
    LeftArrow,
    SwapArrows,
    Invalid,
}

impl Symbol {
    /// Every symbol that owns a glyph, in table order.
    pub const VALID: [Symbol; GLYPH_COUNT] = [
        Symbol::A,
        Symbol::B,
        Symbol::C,
        Symbol::D,
        Symbol::E,
        Symbol::F,
        Symbol::G,
        Symbol::H,
        Symbol::I,
        Symbol::J,
        Symbol::K,
        Symbol::L,
        Symbol::M,
        Symbol::N,
        Symbol::O,
        Symbol::P,
        Symbol::Q,
        Symbol::R,
        Symbol::S,
        Symbol::T,
        Symbol::U,
        Symbol::V,
        Symbol::W,
        Symbol::X,
        Symbol::Y,
        Symbol::Z,
        Symbol::NoSelection,
        Symbol::Incorrect,
        Symbol::Unknown,
        Symbol::Correct,
        Symbol::RightArrow,
        Symbol::LeftArrow,
        Symbol::SwapArrows,
    ];

    /// Letter at `index` in the alphabet (wraps mod 26).
    pub const fn letter(index: usize) -> Symbol {
        Self::VALID[index % ALPHABET_LEN]
    }

    /// Alphabet index for letter symbols.
    pub const fn letter_index(self) -> Option<usize> {
        let raw = self as usize;
        if raw < ALPHABET_LEN { Some(raw) } else { None }
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self, Symbol::Invalid)
    }
}

const GLYPH_COUNT: usize = 33;

/// Letters A..Z, then the status glyphs, in [`Symbol`] order.
const GLYPHS: [u64; GLYPH_COUNT] = [
    0x0033333f33331e0c,
    0x003f66663e66663f,
    0x003c66030303663c,
    0x001f36666666361f,
    0x007f46161e16467f,
    0x000f06161e16467f,
    0x007c66730303663c,
    0x003333333f333333,
    0x001e0c0c0c0c0c1e,
    0x001e333330303078,
    0x006766361e366667,
    0x007f66460606060f,
    0x0063636b7f7f7763,
    0x006363737b6f6763,
    0x001c36636363361c,
    0x000f06063e66663f,
    0x00381e3b3333331e,
    0x006766363e66663f,
    0x001e33380e07331e,
    0x001e0c0c0c0c2d3f,
    0x003f333333333333,
    0x000c1e3333333333,
    0x0063777f6b636363,
    0x0063361c1c366363,
    0x001e0c0c1e333333,
    0x007f664c1831637f,
    // NoSelection: centered dash
    0x0000003c00000000,
    // Incorrect: X
    0x0042241818244200,
    // Unknown: ?
    0x000c000c1830331e,
    // Correct: check mark
    0x0000040a11204000,
    // RightArrow
    0x061e7efe7e1e0600,
    // LeftArrow
    0x60787e7f7e786000,
    // SwapArrows: two opposing arrows
    0x04fe040000207f20,
];

/// Characters for the decodable subset: letters plus the placeholder.
const CHARS: [char; ALPHABET_LEN + 1] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', PLACEHOLDER_CHAR,
];

/// Glyph for a symbol. `None` only for [`Symbol::Invalid`].
pub const fn glyph_of(symbol: Symbol) -> Option<u64> {
    match symbol {
        Symbol::Invalid => None,
        valid => Some(GLYPHS[valid as usize]),
    }
}

/// Symbol for an uppercase letter or the placeholder; [`Symbol::Invalid`] otherwise.
pub fn symbol_of(ch: char) -> Symbol {
    CHARS
        .iter()
        .position(|&candidate| candidate == ch)
        .map_or(Symbol::Invalid, |index| Symbol::VALID[index])
}

/// Character drawn by `glyph`, also accepting its cursor complement.
pub fn char_of(glyph: u64) -> char {
    GLYPHS[..CHARS.len()]
        .iter()
        .position(|&candidate| candidate == glyph || candidate == !glyph)
        .map_or(UNKNOWN_CHAR, |index| CHARS[index])
}

/// Any symbol drawn by `glyph` or its complement.
pub fn symbol_of_glyph(glyph: u64) -> Symbol {
    GLYPHS
        .iter()
        .position(|&candidate| candidate == glyph || candidate == !glyph)
        .map_or(Symbol::Invalid, |index| Symbol::VALID[index])
}

/// Character for a symbol, if it has one.
pub fn char_for(symbol: Symbol) -> Option<char> {
    CHARS.get(symbol as usize).copied()
}
