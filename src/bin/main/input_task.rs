use embassy_futures::select::{Either, select};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Receiver, Sender, TrySendError},
};
use embassy_time::{Instant, Timer};
use esp_hal::gpio::Input;
use log::warn;
use wordseek_core::input::{
    Dispatch, Dispatcher, EVENT_QUEUE_CAPACITY, EventSink, EventSource, HoldRepeat, InputEvent,
};
use wordseek_hal_esp32s3::input::pad::InputPad;

const EDGE_ERROR_BACKOFF_MS: u64 = 10;

pub type EventSender = Sender<'static, CriticalSectionRawMutex, InputEvent, EVENT_QUEUE_CAPACITY>;
pub type EventReceiver =
    Receiver<'static, CriticalSectionRawMutex, InputEvent, EVENT_QUEUE_CAPACITY>;

/// Producer half of the event channel; never blocks.
pub struct ChannelSink(pub EventSender);

impl EventSink for ChannelSink {
    fn try_push(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.0
            .try_send(event)
            .map_err(|TrySendError::Full(event)| event)
    }
}

/// Consumer half; waits forever for the next event.
pub struct ChannelSource(pub EventReceiver);

impl EventSource for ChannelSource {
    async fn next_event(&mut self) -> Option<InputEvent> {
        Some(self.0.receive().await)
    }
}

/// Turns pad edges into debounced events, plus hold-repeat for left/right.
pub async fn input_loop(
    mut pad: InputPad<Input<'static>>,
    mut dispatcher: Dispatcher<ChannelSink>,
    mut repeat: HoldRepeat,
) -> ! {
    loop {
        let edge = match repeat.deadline_ms() {
            Some(deadline_ms) => {
                match select(
                    pad.next_edge(),
                    Timer::at(Instant::from_millis(deadline_ms)),
                )
                .await
                {
                    Either::First(edge) => Some(edge),
                    Either::Second(()) => None,
                }
            }
            None => Some(pad.next_edge().await),
        };
        let now_ms = Instant::now().as_millis();

        match edge {
            Some(Ok(event)) => {
                if dispatcher.on_edge(event, now_ms) == Dispatch::Queued {
                    repeat.arm(event, now_ms);
                }
            }
            Some(Err(err)) => {
                warn!("input: edge wait failed err={:?}", err);
                Timer::after_millis(EDGE_ERROR_BACKOFF_MS).await;
            }
            None => {
                let Some(held) = repeat.armed_event() else {
                    continue;
                };
                let still_asserted = pad.is_asserted(held).unwrap_or(false);
                if let Some(event) = repeat.fire(now_ms, still_asserted) {
                    dispatcher.on_repeat(event);
                }
            }
        }
    }
}
