pub mod display;
pub mod leds;
