use super::{EventSource, InputEvent};

/// Replays a fixed event script, then reports the source as closed.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedInput<'a> {
    events: &'a [InputEvent],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    pub const fn new(events: &'a [InputEvent]) -> Self {
        Self { events, cursor: 0 }
    }

    fn next(&mut self) -> Option<InputEvent> {
        let event = self.events.get(self.cursor).copied()?;
        self.cursor = self.cursor.saturating_add(1);
        Some(event)
    }
}

impl EventSource for ScriptedInput<'_> {
    async fn next_event(&mut self) -> Option<InputEvent> {
        self.next()
    }
}
