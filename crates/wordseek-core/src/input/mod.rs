//! Input abstraction layer: button and joystick events, debounce and repeat.

mod debounce;
pub mod mock;
mod repeat;

pub use debounce::{DebounceConfig, DebounceMode, Debouncer, Dispatch, Dispatcher};
pub use repeat::HoldRepeat;

/// Bounded queue between the edge producer and the game loop.
pub const EVENT_QUEUE_CAPACITY: usize = 10;

/// Number of physical input lines (four buttons, four joystick contacts).
pub const LINE_COUNT: usize = 8;

/// Option buttons. Game roles: A select, B guess, C delete, D exit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Button {
    A,
    B,
    C,
    D,
}

impl Button {
    pub const SELECT: Self = Self::A;
    pub const GUESS: Self = Self::B;
    pub const DELETE: Self = Self::C;
    pub const EXIT: Self = Self::D;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Logical actions consumed by the game controller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Button(Button),
    Joystick(Direction),
}

impl InputEvent {
    pub const ALL: [InputEvent; LINE_COUNT] = [
        InputEvent::Button(Button::A),
        InputEvent::Button(Button::B),
        InputEvent::Button(Button::C),
        InputEvent::Button(Button::D),
        InputEvent::Joystick(Direction::Left),
        InputEvent::Joystick(Direction::Right),
        InputEvent::Joystick(Direction::Up),
        InputEvent::Joystick(Direction::Down),
    ];

    /// Physical line carrying this event, `0..LINE_COUNT`.
    pub const fn line_index(self) -> usize {
        match self {
            InputEvent::Button(Button::A) => 0,
            InputEvent::Button(Button::B) => 1,
            InputEvent::Button(Button::C) => 2,
            InputEvent::Button(Button::D) => 3,
            InputEvent::Joystick(Direction::Left) => 4,
            InputEvent::Joystick(Direction::Right) => 5,
            InputEvent::Joystick(Direction::Up) => 6,
            InputEvent::Joystick(Direction::Down) => 7,
        }
    }

    /// Only horizontal joystick moves auto-repeat while held.
    pub const fn repeats_when_held(self) -> bool {
        matches!(
            self,
            InputEvent::Joystick(Direction::Left) | InputEvent::Joystick(Direction::Right)
        )
    }
}

/// Awaited input source feeding the game loop.
///
/// Hardware sources never resolve to `None`; a closed scripted source does.
pub trait EventSource {
    async fn next_event(&mut self) -> Option<InputEvent>;
}

/// Non-blocking, allocation-free producer side of the event queue.
pub trait EventSink {
    /// Hands the event back when the queue is full.
    fn try_push(&mut self, event: InputEvent) -> Result<(), InputEvent>;
}

impl<const N: usize> EventSink for heapless::spsc::Producer<'_, InputEvent, N> {
    fn try_push(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.enqueue(event)
    }
}

impl<const N: usize> EventSink for heapless::Deque<InputEvent, N> {
    fn try_push(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.push_back(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_indices_are_unique_and_dense() {
        for (index, event) in InputEvent::ALL.iter().enumerate() {
            assert_eq!(event.line_index(), index);
        }
    }

    #[test]
    fn only_horizontal_moves_repeat() {
        let repeating: heapless::Vec<InputEvent, LINE_COUNT> = InputEvent::ALL
            .into_iter()
            .filter(|event| event.repeats_when_held())
            .collect();
        assert_eq!(
            repeating.as_slice(),
            &[
                InputEvent::Joystick(Direction::Left),
                InputEvent::Joystick(Direction::Right)
            ]
        );
    }

    #[test]
    fn spsc_producer_rejects_when_full() {
        // heapless spsc keeps one slot free.
        let mut queue: heapless::spsc::Queue<InputEvent, 3> = heapless::spsc::Queue::new();
        let (mut producer, mut consumer) = queue.split();
        let press = InputEvent::Button(Button::A);

        assert_eq!(producer.try_push(press), Ok(()));
        assert_eq!(producer.try_push(press), Ok(()));
        assert_eq!(producer.try_push(press), Err(press));
        assert_eq!(consumer.dequeue(), Some(press));
    }
}
