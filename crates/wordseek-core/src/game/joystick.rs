impl<D, W, L> WordGame<D, W, L>
where
    D: SegmentDriver,
    W: WordService,
    L: ButtonLeds,
{
    fn apply_joystick(&mut self, direction: Direction) {
        match direction {
            Direction::Up => {
                let level = self.brightness.saturating_add(1);
                self.apply_brightness(level);
                info!("game: brightness={}", self.brightness);
            }
            Direction::Down => {
                let level = self.brightness.saturating_sub(1);
                self.apply_brightness(level);
                info!("game: brightness={}", self.brightness);
            }
            Direction::Left | Direction::Right => match self.state {
                GameState::LetterSelection => self.slide(direction),
                GameState::LetterEdit => {
                    settle(self.board.move_cursor(direction), "cursor move");
                }
                GameState::Init | GameState::Results => {}
            },
        }
    }

    /// Cycles the carousel when pushing past its outer letters, else moves.
    fn slide(&mut self, direction: Direction) {
        let position = self.board.cursor().position;
        let at_edge = matches!(
            (direction, position),
            (Direction::Left, START_SLOT) | (Direction::Right, END_SLOT)
        );

        if !at_edge {
            settle(self.board.move_cursor(direction), "cursor move");
            return;
        }

        self.carousel.cycle(direction);
        let letters = self.carousel.letters();
        for (slot, letter) in [START_SLOT, MID_SLOT, END_SLOT].into_iter().zip(letters) {
            settle(self.board.set_symbol(letter, Row::Lower, slot), "carousel");
        }
        debug!("game: carousel={:?}", self.carousel.indices());
    }
}
