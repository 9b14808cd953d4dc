//! Game controller: owns the board session and reacts to one event at a time.

pub mod carousel;

use heapless::String;
use log::{debug, error, info, warn};

use crate::{
    board::{MatrixBoard, ROW_LEN, Row, SegmentDriver, WORD_LEN, Word},
    config::GameConfig,
    error::Result,
    graphics::{EXIT_SCREEN, TITLE_SCREEN},
    input::{Button, Direction, EventSource, InputEvent},
    service::{
        ButtonLeds, LedMask, VERDICT_ABSENT, VERDICT_CORRECT, VERDICT_MISPLACED, WordService,
    },
    symbols::{PLACEHOLDER_CHAR, Symbol, symbol_of},
};

use carousel::{CarouselSlider, END_SLOT, MID_SLOT, START_SLOT};

/// Lower display while choosing a letter, before any cycling.
pub const CAROUSEL_START_SCREEN: [Symbol; ROW_LEN] = [
    Symbol::LeftArrow,
    Symbol::Z,
    Symbol::A,
    Symbol::B,
    Symbol::RightArrow,
];

pub const RESULTS_START_SCREEN: [Symbol; ROW_LEN] = [Symbol::Unknown; ROW_LEN];
pub const EMPTY_GUESS: [Symbol; ROW_LEN] = [Symbol::NoSelection; ROW_LEN];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameState {
    Init,
    LetterSelection,
    LetterEdit,
    Results,
}

impl GameState {
    /// Option buttons that do something in this state.
    pub const fn led_mask(self) -> LedMask {
        match self {
            GameState::Init | GameState::LetterSelection => LedMask::SELECT.union(LedMask::EXIT),
            GameState::LetterEdit => LedMask::ALL,
            GameState::Results => LedMask::EXIT,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct WordGame<D, W, L>
where
    D: SegmentDriver,
    W: WordService,
    L: ButtonLeds,
{
    board: MatrixBoard<D>,
    words: W,
    leds: L,
    config: GameConfig,
    state: GameState,
    secret: Word,
    guess_count: u8,
    edit_slot: usize,
    carousel: CarouselSlider,
    carousel_screen: [Symbol; ROW_LEN],
    results_screen: [Symbol; ROW_LEN],
    brightness: u8,
    exited: bool,
}

impl<D, W, L> WordGame<D, W, L>
where
    D: SegmentDriver,
    W: WordService,
    L: ButtonLeds,
{
    pub fn new(driver: D, words: W, leds: L, config: GameConfig) -> Self {
        Self {
            board: MatrixBoard::new(driver),
            words,
            leds,
            config,
            state: GameState::Init,
            secret: placeholder_word(),
            guess_count: 0,
            edit_slot: MID_SLOT,
            carousel: CarouselSlider::new(),
            carousel_screen: CAROUSEL_START_SCREEN,
            results_screen: RESULTS_START_SCREEN,
            brightness: config.default_brightness,
            exited: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn guess_count(&self) -> u8 {
        self.guess_count
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn carousel(&self) -> CarouselSlider {
        self.carousel
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn board(&self) -> &MatrixBoard<D> {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn is_exited(&self) -> bool {
        self.exited
    }

    /// Shows the title screen and waits in [`GameState::Init`].
    pub fn start(&mut self) {
        info!("game: start");
        self.state = GameState::Init;
        self.exited = false;
        self.apply_brightness(self.config.default_brightness);
        settle(self.board.show_graphic(&TITLE_SCREEN), "title screen");
        self.refresh_leds();
    }

    /// Processes events until the player exits or the source closes.
    pub async fn run<S>(&mut self, source: &mut S) -> Flow
    where
        S: EventSource,
    {
        loop {
            self.refresh_leds();

            let Some(event) = source.next_event().await else {
                debug!("game: input source closed state={:?}", self.state);
                return Flow::Continue;
            };

            if self.handle_event(event).await == Flow::Exit {
                return Flow::Exit;
            }
        }
    }

    pub async fn handle_event(&mut self, event: InputEvent) -> Flow {
        if self.exited {
            return Flow::Exit;
        }

        debug!("game: event={:?} state={:?}", event, self.state);
        match event {
            InputEvent::Button(button) => self.apply_button(button).await,
            InputEvent::Joystick(direction) => {
                self.apply_joystick(direction);
                Flow::Continue
            }
        }
    }

    /// Fetches a new secret and redraws the empty board.
    pub async fn reset(&mut self) {
        info!("game: reset");

        self.carousel = CarouselSlider::new();
        self.carousel_screen = CAROUSEL_START_SCREEN;
        self.results_screen = RESULTS_START_SCREEN;

        settle(
            self.board.with_cursor_hidden(|board| {
                board
                    .fill_row(Row::Upper, &EMPTY_GUESS)
                    .and(board.fill_row(Row::Lower, &CAROUSEL_START_SCREEN))
            }),
            "empty board",
        );
        self.apply_brightness(self.config.default_brightness);

        self.secret = match self.words.fetch_word().await {
            Ok(word) => normalize_secret(&word).unwrap_or_else(|| {
                error!("game: malformed secret word len={}", word.len());
                placeholder_word()
            }),
            Err(err) => {
                error!("game: word fetch failed err={:?}", err);
                placeholder_word()
            }
        };
        info!("game: new secret word={}", self.secret.as_str());

        self.guess_count = 0;
        self.edit_slot = MID_SLOT;
        self.state = GameState::Init;
        settle(self.board.reset_cursor(), "cursor reset");
    }

    fn refresh_leds(&mut self) {
        let mask = if self.exited {
            LedMask::NONE
        } else {
            self.state.led_mask()
        };
        if let Err(err) = self.leds.set_leds(mask) {
            error!("game: led update failed mask={:#06b} err={:?}", mask.bits(), err);
        }
    }

    fn apply_brightness(&mut self, level: u8) {
        self.brightness = level.min(self.config.max_brightness);
        settle(self.board.set_brightness(self.brightness), "brightness");
    }

    fn show_results(&mut self) -> Result<()> {
        let screen = self.results_screen;
        self.board
            .with_cursor_hidden(|board| board.fill_row(Row::Lower, &screen))
    }

    fn show_carousel(&mut self) -> Result<()> {
        let screen = self.carousel_screen;
        self.board
            .with_cursor_hidden(|board| board.fill_row(Row::Lower, &screen))
    }
}

include!("buttons.rs");
include!("joystick.rs");
include!("verdict.rs");

/// Display and LED calls are best-effort; the board already logs the cause.
fn settle(result: Result<()>, action: &str) {
    if let Err(err) = result {
        warn!("game: {} incomplete err={}", action, err);
    }
}

fn placeholder_word() -> Word {
    let mut word = Word::new();
    for _ in 0..WORD_LEN {
        let _ = word.push(PLACEHOLDER_CHAR);
    }
    word
}

/// Uppercases a fetched word; `None` unless it is exactly five ASCII letters.
fn normalize_secret(word: &str) -> Option<Word> {
    if word.len() != WORD_LEN || !word.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        return None;
    }

    let mut secret = Word::new();
    for ch in word.chars() {
        secret.push(ch.to_ascii_uppercase()).ok()?;
    }
    Some(secret)
}
