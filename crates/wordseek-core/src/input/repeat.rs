use log::debug;

use super::InputEvent;

/// Auto-repeat timer for a held joystick direction.
///
/// The input task arms it on an accepted edge, sleeps until
/// [`HoldRepeat::deadline_ms`] and then calls [`HoldRepeat::fire`] with the
/// current line level. The game loop only ever sees ordinary events.
#[derive(Debug, Clone, Copy)]
pub struct HoldRepeat {
    interval_ms: u64,
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    event: InputEvent,
    deadline_ms: u64,
}

impl HoldRepeat {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            armed: None,
        }
    }

    /// Starts repeating `event` if its line supports it; other lines cancel.
    pub fn arm(&mut self, event: InputEvent, now_ms: u64) {
        if !event.repeats_when_held() {
            self.cancel();
            return;
        }

        self.armed = Some(Armed {
            event,
            deadline_ms: now_ms.saturating_add(self.interval_ms),
        });
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn armed_event(&self) -> Option<InputEvent> {
        self.armed.map(|armed| armed.event)
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.armed.map(|armed| armed.deadline_ms)
    }

    /// Emits a repeat and re-arms while the line is still asserted.
    pub fn fire(&mut self, now_ms: u64, still_asserted: bool) -> Option<InputEvent> {
        let armed = self.armed?;
        if now_ms < armed.deadline_ms {
            return None;
        }

        if !still_asserted {
            debug!("input: hold released event={:?}", armed.event);
            self.cancel();
            return None;
        }

        self.armed = Some(Armed {
            deadline_ms: now_ms.saturating_add(self.interval_ms),
            ..armed
        });
        Some(armed.event)
    }
}
