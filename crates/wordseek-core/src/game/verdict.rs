impl<D, W, L> WordGame<D, W, L>
where
    D: SegmentDriver,
    W: WordService,
    L: ButtonLeds,
{
    async fn submit_guess(&mut self) {
        let guess = self.board.word();
        let mut query: String<WORD_LEN> = String::new();
        for ch in guess.chars() {
            let _ = query.push(ch.to_ascii_lowercase());
        }
        info!("game: guess word={}", guess.as_str());

        self.results_screen = match self.words.check_word(&query).await {
            Ok(verdict) => verdict_symbols(&verdict),
            Err(err) => {
                // The player only sees a fully wrong guess.
                error!("game: word check failed err={:?}", err);
                [Symbol::Incorrect; WORD_LEN]
            }
        };

        if self.results_screen.iter().all(|symbol| *symbol == Symbol::Correct) {
            info!("game: solved after {} misses", self.guess_count);
            self.state = GameState::Results;
        } else {
            self.guess_count = self.guess_count.saturating_add(1);
            if self.guess_count >= self.config.max_guesses {
                info!("game: out of guesses, secret={}", self.secret.as_str());
                self.results_screen = secret_symbols(&self.secret);
                self.state = GameState::Results;
            } else {
                info!(
                    "game: guesses left={}",
                    self.config.max_guesses - self.guess_count
                );
                self.state = GameState::LetterEdit;
            }
        }

        settle(self.show_results(), "results");
        settle(self.board.reset_cursor(), "cursor reset");
    }
}

/// Maps a raw verdict to result symbols; unknown or missing marks are misses.
pub fn verdict_symbols(verdict: &str) -> [Symbol; WORD_LEN] {
    let mut symbols = [Symbol::Incorrect; WORD_LEN];
    for (symbol, mark) in symbols.iter_mut().zip(verdict.chars()) {
        *symbol = match mark {
            VERDICT_CORRECT => Symbol::Correct,
            VERDICT_MISPLACED => Symbol::SwapArrows,
            VERDICT_ABSENT => Symbol::Incorrect,
            other => {
                warn!("game: unexpected verdict mark={:?}", other);
                Symbol::Incorrect
            }
        };
    }

    let marks = verdict.chars().count();
    if marks != WORD_LEN {
        error!("game: malformed verdict marks={}", marks);
    }
    symbols
}

fn secret_symbols(secret: &str) -> [Symbol; WORD_LEN] {
    let mut symbols = [Symbol::NoSelection; WORD_LEN];
    for (symbol, ch) in symbols.iter_mut().zip(secret.chars()) {
        *symbol = match symbol_of(ch) {
            Symbol::Invalid => Symbol::Unknown,
            letter => letter,
        };
    }
    symbols
}
