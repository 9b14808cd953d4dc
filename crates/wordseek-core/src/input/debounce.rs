use log::{debug, warn};

use super::{EventSink, InputEvent, LINE_COUNT};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DebounceMode {
    /// One window shared by every line.
    Global,
    /// Each line keeps its own window.
    PerLine,
}

#[derive(Debug, Clone, Copy)]
pub struct DebounceConfig {
    window_ms: u64,
    mode: DebounceMode,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window_ms: 200,
            mode: DebounceMode::PerLine,
        }
    }
}

impl DebounceConfig {
    pub const fn with_window_ms(mut self, window_ms: u64) -> Self {
        self.window_ms = window_ms;
        self
    }

    pub const fn with_mode(mut self, mode: DebounceMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Time-window edge filter.
///
/// An edge is accepted when no edge was accepted yet, or when strictly more
/// than `window_ms` has passed since the last accepted one (on any line in
/// [`DebounceMode::Global`], on the same line in [`DebounceMode::PerLine`]).
#[derive(Debug, Clone)]
pub struct Debouncer {
    config: DebounceConfig,
    last_accepted: [Option<u64>; LINE_COUNT],
}

impl Debouncer {
    pub const fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            last_accepted: [None; LINE_COUNT],
        }
    }

    pub fn accept(&mut self, event: InputEvent, now_ms: u64) -> bool {
        let slot = match self.config.mode {
            DebounceMode::Global => 0,
            DebounceMode::PerLine => event.line_index(),
        };

        let accepted = match self.last_accepted[slot] {
            None => true,
            Some(last_ms) => now_ms.saturating_sub(last_ms) > self.config.window_ms,
        };

        if accepted {
            self.last_accepted[slot] = Some(now_ms);
        }
        accepted
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dispatch {
    Queued,
    Debounced,
    Dropped,
}

/// Edge handler: debounce, then push into the bounded event queue.
pub struct Dispatcher<S> {
    sink: S,
    debouncer: Debouncer,
}

impl<S> Dispatcher<S>
where
    S: EventSink,
{
    pub const fn new(sink: S, config: DebounceConfig) -> Self {
        Self {
            sink,
            debouncer: Debouncer::new(config),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn on_edge(&mut self, event: InputEvent, now_ms: u64) -> Dispatch {
        if !self.debouncer.accept(event, now_ms) {
            debug!("input: debounced event={:?} now_ms={}", event, now_ms);
            return Dispatch::Debounced;
        }

        self.push(event)
    }

    /// Hold-repeat events skip the debounce window.
    pub fn on_repeat(&mut self, event: InputEvent) -> Dispatch {
        self.push(event)
    }

    fn push(&mut self, event: InputEvent) -> Dispatch {
        match self.sink.try_push(event) {
            Ok(()) => Dispatch::Queued,
            Err(dropped) => {
                warn!("input: queue full, dropped event={:?}", dropped);
                Dispatch::Dropped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use heapless::Deque;

    use super::*;
    use crate::input::{Button, Direction, EVENT_QUEUE_CAPACITY};

    const SELECT: InputEvent = InputEvent::Button(Button::A);
    const GUESS: InputEvent = InputEvent::Button(Button::B);
    const LEFT: InputEvent = InputEvent::Joystick(Direction::Left);

    #[test]
    fn first_edge_is_always_accepted() {
        let mut debouncer = Debouncer::new(DebounceConfig::default());
        assert!(debouncer.accept(SELECT, 0));
    }

    #[test]
    fn window_is_measured_from_last_accepted_edge() {
        let mut debouncer = Debouncer::new(DebounceConfig::default());
        assert!(debouncer.accept(SELECT, 1_000));
        assert!(!debouncer.accept(SELECT, 1_150));
        assert!(!debouncer.accept(SELECT, 1_200));
        // Rejected bounces do not extend the window.
        assert!(debouncer.accept(SELECT, 1_201));
    }

    #[test]
    fn per_line_mode_keeps_lines_independent() {
        let mut debouncer = Debouncer::new(DebounceConfig::default());
        assert!(debouncer.accept(SELECT, 1_000));
        assert!(debouncer.accept(GUESS, 1_010));
        assert!(debouncer.accept(LEFT, 1_020));
        assert!(!debouncer.accept(GUESS, 1_100));
    }

    #[test]
    fn global_mode_shares_one_window() {
        let config = DebounceConfig::default().with_mode(DebounceMode::Global);
        let mut debouncer = Debouncer::new(config);
        assert!(debouncer.accept(SELECT, 1_000));
        assert!(!debouncer.accept(GUESS, 1_010));
        assert!(debouncer.accept(GUESS, 1_201));
    }

    #[test]
    fn dispatcher_queues_debounces_and_drops() {
        let config = DebounceConfig::default().with_window_ms(0);
        let mut dispatcher = Dispatcher::new(Deque::<InputEvent, EVENT_QUEUE_CAPACITY>::new(), config);

        for step in 0..EVENT_QUEUE_CAPACITY as u64 {
            assert_eq!(dispatcher.on_edge(SELECT, step + 1), Dispatch::Queued);
        }
        assert_eq!(dispatcher.on_edge(SELECT, 100), Dispatch::Dropped);
        assert_eq!(dispatcher.on_edge(SELECT, 100), Dispatch::Debounced);
        assert_eq!(dispatcher.sink().len(), EVENT_QUEUE_CAPACITY);
    }

    #[test]
    fn repeats_bypass_debounce() {
        let mut dispatcher = Dispatcher::new(Deque::<InputEvent, 4>::new(), DebounceConfig::default());
        assert_eq!(dispatcher.on_edge(LEFT, 0), Dispatch::Queued);
        assert_eq!(dispatcher.on_repeat(LEFT), Dispatch::Queued);
        assert_eq!(dispatcher.on_repeat(LEFT), Dispatch::Queued);
        assert_eq!(dispatcher.on_edge(LEFT, 10), Dispatch::Debounced);

        let queued: heapless::Vec<InputEvent, 4> = dispatcher.sink().iter().copied().collect();
        assert_eq!(queued.as_slice(), &[LEFT, LEFT, LEFT]);
    }
}
