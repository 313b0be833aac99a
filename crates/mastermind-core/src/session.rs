use crate::{score, suggest_hint, Code, Feedback, InvalidGuess, Rules};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Where a game currently stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    /// More guesses are accepted
    InProgress,
    /// The secret was guessed
    Won,
    /// All attempts are used up without guessing the secret
    Lost,
}

impl GameState {
    /// Check if the game is won or lost
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A scored guess
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The guess as submitted
    pub guess: Code,
    /// The feedback for the guess
    pub feedback: Feedback,
}

/// All guesses of a game in the order they were made
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History(Vec<HistoryEntry>);

impl History {
    /// Return the number of guesses
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true iff nothing was guessed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all entries, the first guess comes first
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.0.iter()
    }

    /// The most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.last()
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.0.push(entry);
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<HistoryEntry> for History {
    fn from_iter<T: IntoIterator<Item = HistoryEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;

    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A single game
///
/// The session owns the secret and the history; both can only change through
/// [`Session::submit_guess`] and [`Session::reset`].
#[derive(Debug)]
pub struct Session<R = StdRng> {
    rules: Rules,
    rng: R,
    secret: Code,
    history: History,
    state: GameState,
}

impl Session {
    /// Start a game with a random generator seeded from the operating system
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        Self::with_rng(rules, StdRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    /// Start a game that draws the secret and all hints from `rng`
    pub fn with_rng(rules: Rules, mut rng: R) -> Self {
        let secret = rules
            .palette()
            .random_code(rules.code_length(), &mut rng);
        let session = Self {
            rules,
            rng,
            secret,
            history: History::default(),
            state: GameState::InProgress,
        };
        session.trace_start();
        session
    }

    /// The rules of this game
    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The current state
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// All scored guesses so far
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The number of guesses made so far
    #[must_use]
    pub fn attempts_used(&self) -> usize {
        self.history.len()
    }

    /// The number of guesses that can still be made
    #[must_use]
    pub fn attempts_left(&self) -> usize {
        self.rules.max_attempts().saturating_sub(self.attempts_used())
    }

    /// The secret, but only once the game is over
    #[must_use]
    pub fn revealed(&self) -> Option<&Code> {
        self.state.is_over().then_some(&self.secret)
    }

    /// Score a guess and record it
    ///
    /// # Errors
    ///
    /// [`InvalidGuess`] if the guess does not fit the rules or the game is already over.
    /// The session is left unchanged in that case.
    pub fn submit_guess(&mut self, guess: Code) -> Result<Feedback, InvalidGuess> {
        if self.state.is_over() {
            return Err(InvalidGuess::GameOver);
        }
        self.rules.validate(&guess)?;

        let feedback = score(&guess, &self.secret);
        self.history.push(HistoryEntry { guess, feedback });

        self.state = if feedback.is_solved(self.rules.code_length()) {
            GameState::Won
        } else if self.attempts_used() >= self.rules.max_attempts() {
            GameState::Lost
        } else {
            GameState::InProgress
        };

        tracing::debug!(
            attempt = self.attempts_used(),
            exact = feedback.exact,
            colors = feedback.colors,
            state = ?self.state,
            "scored guess"
        );

        Ok(feedback)
    }

    /// Suggest a code to play next, based on the history so far
    pub fn request_hint(&mut self) -> Code {
        suggest_hint(
            &self.history,
            self.rules.palette(),
            self.rules.code_length(),
            &mut self.rng,
        )
    }

    /// Start over with a new secret and an empty history
    pub fn reset(&mut self) {
        self.secret = self
            .rules
            .palette()
            .random_code(self.rules.code_length(), &mut self.rng);
        self.history.clear();
        self.state = GameState::InProgress;
        self.trace_start();
    }

    fn trace_start(&self) {
        tracing::debug!(
            colors = self.rules.palette().len(),
            code_length = self.rules.code_length(),
            max_attempts = self.rules.max_attempts(),
            "started new game"
        );
        tracing::trace!(secret = %self.rules.palette().describe(&self.secret));
    }

    #[cfg(test)]
    fn with_secret(rules: Rules, rng: R, secret: Code) -> Self {
        let mut session = Self::with_rng(rules, rng);
        session.secret = secret;
        session
    }
}
