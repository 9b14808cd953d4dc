use embedded_hal::digital::OutputPin;
use wordseek_core::{
    input::Button,
    service::{ButtonLeds, LedMask},
};

const BUTTONS: [Button; 4] = [Button::A, Button::B, Button::C, Button::D];

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LedError<E> {
    pub button: Button,
    pub source: E,
}

/// Option-button LEDs, active high, indexed A..D.
#[derive(Debug)]
pub struct OptionLeds<O> {
    pins: [O; 4],
    lit: LedMask,
}

impl<O> OptionLeds<O>
where
    O: OutputPin,
{
    pub fn new(pins: [O; 4]) -> Self {
        Self {
            pins,
            lit: LedMask::NONE,
        }
    }

    pub fn lit(&self) -> LedMask {
        self.lit
    }
}

impl<O> ButtonLeds for OptionLeds<O>
where
    O: OutputPin,
    O::Error: core::fmt::Debug,
{
    type Error = LedError<O::Error>;

    fn set_leds(&mut self, mask: LedMask) -> Result<(), Self::Error> {
        for (pin, button) in self.pins.iter_mut().zip(BUTTONS) {
            let result = if mask.contains(button) {
                pin.set_high()
            } else {
                pin.set_low()
            };
            result.map_err(|source| LedError { button, source })?;
        }

        self.lit = mask;
        Ok(())
    }
}
