//! Error taxonomy shared by the board engine and the game controller.

use core::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Out-of-range position or a symbol without a glyph.
    InvalidArgument,
    /// Caller buffer cannot hold a full word.
    InvalidSize,
    /// A draw, clear or brightness call failed in the display collaborator.
    HardwareFailure,
    /// Word fetch or check did not complete.
    NetworkFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "Invalid argument"),
            Error::InvalidSize => write!(f, "Invalid size"),
            Error::HardwareFailure => write!(f, "Hardware failure"),
            Error::NetworkFailure => write!(f, "Network failure"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
