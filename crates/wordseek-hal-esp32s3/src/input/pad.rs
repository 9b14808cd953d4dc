use embassy_futures::select::select_array;
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;
use wordseek_core::input::{InputEvent, LINE_COUNT};

/// Four buttons and the four joystick contacts, all active low.
///
/// Pins are ordered by [`InputEvent::line_index`]: buttons A..D, then
/// joystick left, right, up, down.
#[derive(Debug)]
pub struct InputPad<P> {
    pins: [P; LINE_COUNT],
}

impl<P> InputPad<P>
where
    P: InputPin + Wait,
{
    pub fn new(pins: [P; LINE_COUNT]) -> Self {
        Self { pins }
    }

    /// Waits for the first falling edge on any line.
    pub async fn next_edge(&mut self) -> Result<InputEvent, P::Error> {
        let [a, b, c, d, left, right, up, down] = &mut self.pins;
        let (result, line) = select_array([
            a.wait_for_falling_edge(),
            b.wait_for_falling_edge(),
            c.wait_for_falling_edge(),
            d.wait_for_falling_edge(),
            left.wait_for_falling_edge(),
            right.wait_for_falling_edge(),
            up.wait_for_falling_edge(),
            down.wait_for_falling_edge(),
        ])
        .await;

        result?;
        Ok(InputEvent::ALL[line])
    }

    /// Current level of the line behind `event`, used for hold-repeat.
    pub fn is_asserted(&mut self, event: InputEvent) -> Result<bool, P::Error> {
        self.pins[event.line_index()].is_low()
    }
}
