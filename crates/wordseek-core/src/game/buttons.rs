impl<D, W, L> WordGame<D, W, L>
where
    D: SegmentDriver,
    W: WordService,
    L: ButtonLeds,
{
    async fn apply_button(&mut self, button: Button) -> Flow {
        match (button, self.state) {
            (Button::A, GameState::Init) => {
                self.reset().await;
                self.enter_letter_edit();
            }
            (Button::A, GameState::LetterSelection) => self.commit_selection(),
            (Button::A, GameState::LetterEdit) => self.enter_letter_selection(),
            (Button::B, GameState::LetterEdit) => self.submit_guess().await,
            (Button::C, GameState::LetterEdit) => self.delete_at_cursor(),
            (Button::D, GameState::LetterSelection) => {
                debug!("game: exit during selection commits slot={}", self.edit_slot);
                self.commit_selection();
            }
            (Button::D, _) => return self.exit(),
            (button, state) => {
                debug!("game: ignored button={:?} state={:?}", button, state);
            }
        }

        Flow::Continue
    }

    fn enter_letter_edit(&mut self) {
        self.state = GameState::LetterEdit;
        debug!("game: state={:?}", self.state);
    }

    /// Remembers the edited slot and drops the cursor onto the carousel centre.
    fn enter_letter_selection(&mut self) {
        let slot = self.board.cursor().position;
        self.edit_slot = slot;

        let steps = (MID_SLOT + ROW_LEN - slot) % ROW_LEN;
        settle(
            self.board.move_cursor_multiple(Direction::Right, steps),
            "cursor recentre",
        );
        settle(self.show_carousel(), "carousel");
        settle(self.board.move_cursor(Direction::Down), "cursor down");

        self.state = GameState::LetterSelection;
        debug!("game: state={:?} edit_slot={}", self.state, slot);
    }

    /// Writes the letter under the cursor into the remembered upper slot.
    fn commit_selection(&mut self) {
        let ch = self.board.char_at_cursor();
        let symbol = symbol_of(ch);
        if !symbol.is_valid() {
            error!("game: invalid letter under cursor ch={}", ch);
            return;
        }

        let slot = self.edit_slot;
        settle(
            self.board
                .with_cursor_hidden(|board| board.set_symbol(symbol, Row::Upper, slot)),
            "letter commit",
        );

        let [start, mid, end] = self.carousel.letters();
        self.carousel_screen[START_SLOT] = start;
        self.carousel_screen[MID_SLOT] = mid;
        self.carousel_screen[END_SLOT] = end;

        settle(self.show_results(), "results");
        settle(self.board.reset_cursor(), "cursor reset");

        info!("game: slot={} letter={}", slot, ch);
        self.enter_letter_edit();
    }

    fn delete_at_cursor(&mut self) {
        let position = self.board.cursor().position;
        settle(
            self.board.set_symbol(Symbol::NoSelection, Row::Upper, position),
            "delete",
        );
    }

    fn exit(&mut self) -> Flow {
        info!("game: exit state={:?}", self.state);
        settle(self.board.show_graphic(&EXIT_SCREEN), "exit screen");
        self.exited = true;
        self.refresh_leds();
        Flow::Exit
    }
}
