use crate::board::MAX_BRIGHTNESS;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub max_guesses: u8,
    pub default_brightness: u8,
    pub max_brightness: u8,
    pub hold_repeat_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_guesses: 6,
            default_brightness: 2,
            max_brightness: MAX_BRIGHTNESS,
            hold_repeat_ms: 150,
        }
    }
}

impl GameConfig {
    pub const fn with_max_guesses(mut self, max_guesses: u8) -> Self {
        self.max_guesses = max_guesses;
        self
    }

    pub const fn with_default_brightness(mut self, default_brightness: u8) -> Self {
        self.default_brightness = default_brightness;
        self
    }

    /// Clamped to the hardware ceiling of 15.
    pub const fn with_max_brightness(mut self, max_brightness: u8) -> Self {
        self.max_brightness = if max_brightness > MAX_BRIGHTNESS {
            MAX_BRIGHTNESS
        } else {
            max_brightness
        };
        self
    }

    pub const fn with_hold_repeat_ms(mut self, hold_repeat_ms: u64) -> Self {
        self.hold_repeat_ms = hold_repeat_ms;
        self
    }
}
