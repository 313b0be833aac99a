/*!
Building blocks for a game of Mastermind.

The crate provides the scoring function [`score`], a hint generator [`suggest_hint`]
and the [`Session`] that ties both together: it holds the secret, records every guess
with its [`Feedback`] and knows when the game is won or lost.

A front end only needs to compose guesses from the [`Palette`] and call the
operations on the session.

# Example

```rust
use mastermind_core::{GameState, Rules, Session};
use rand::{rngs::StdRng, SeedableRng};

// Play with the default rules: six colors, a code of four, ten attempts
let rules = Rules::default();
let mut session = Session::with_rng(rules, StdRng::seed_from_u64(42));

// Guesses are built from color names of the palette
let guess = session.rules().palette().parse_code(["red", "blue", "green", "yellow"]).unwrap();
let feedback = session.submit_guess(guess).unwrap();
assert!(usize::from(feedback.exact + feedback.colors) <= 4);
assert_eq!(session.attempts_used(), 1);

// Hints are always well formed, even if they may not be consistent with the history
let hint = session.request_hint();
assert_eq!(hint.len(), 4);

// Just play the hints until the game is over
while session.state() == GameState::InProgress {
    let hint = session.request_hint();
    let _ = session.submit_guess(hint).unwrap();
}

// Once the game is over, the secret is revealed
assert!(session.revealed().is_some());

// Start over with a new secret
session.reset();
assert_eq!(session.attempts_used(), 0);
assert!(session.revealed().is_none());
```
*/

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![warn(
    bad_style,
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_crate_dependencies,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    unused,
    while_true
)]

mod hint;
mod session;
pub mod types;

pub use hint::{suggest_hint, CANDIDATE_CAP, SAMPLE_BUDGET};
pub use session::{GameState, History, HistoryEntry, Session};
pub use types::{Code, Color, Feedback, InvalidGuess, InvalidRules, Palette, Rules};

use types::MAX_CODE_LENGTH;

/// Score a guess against the secret
///
/// `exact` counts the positions where both codes have the same color.
/// `colors` counts the size of the multiset intersection of both codes, minus the exact matches.
///
/// The result does not change if `guess` and `secret` are swapped.
///
/// # Panics
///
/// Panics if the codes have different lengths or are longer than [`MAX_CODE_LENGTH`]
#[must_use]
pub fn score(guess: &Code, secret: &Code) -> Feedback {
    assert_eq!(
        guess.len(),
        secret.len(),
        "Trying to score codes of different length"
    );
    assert!(
        guess.len() <= MAX_CODE_LENGTH,
        "Trying to score a code that is too long"
    );

    let exact = guess
        .iter()
        .zip(secret)
        .map(|(g, s)| u8::from(g == s))
        .sum::<u8>();

    // counts include the exact matches, those are removed at the end
    let guess_counts = guess.color_counts();
    let secret_counts = secret.color_counts();
    let common = guess_counts
        .iter()
        .zip(secret_counts)
        .map(|(&g, s)| g.min(s))
        .sum::<u8>();

    Feedback::new(exact, common - exact)
}

/// A Builder to compose a guess one color at a time.
///
/// # Examples
///
/// ```rust
/// # use mastermind_core::{GuessBuilder, Palette};
/// let palette = Palette::default();
/// let mut builder = GuessBuilder::new(2);
/// let red = palette.find("red").unwrap();
///
/// assert!(builder.add(red));
/// assert!(builder.add(red));
/// // the guess is full, more colors are ignored
/// assert!(!builder.add(red));
/// assert!(builder.is_complete());
/// assert_eq!(palette.describe(&builder.build()), "Red, Red");
/// ```
#[derive(Clone, Debug)]
pub struct GuessBuilder {
    code: Code,
    code_length: usize,
}

impl GuessBuilder {
    /// Create a new builder for codes of the given length
    #[must_use]
    pub const fn new(code_length: usize) -> Self {
        Self {
            code: Code::new(),
            code_length,
        }
    }

    /// Append a color to the guess
    ///
    /// Returns false, and leaves the guess unchanged, if the guess is already complete
    pub fn add(&mut self, color: Color) -> bool {
        if self.is_complete() {
            return false;
        }
        self.code.push(color);
        true
    }

    /// Remove all colors
    pub fn clear(&mut self) -> &mut Self {
        self.code.clear();
        self
    }

    /// Check if all positions have a color
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.code.len() >= self.code_length
    }

    /// The length of the code being built
    #[must_use]
    pub const fn code_length(&self) -> usize {
        self.code_length
    }

    /// Return the guess so far
    #[must_use]
    pub const fn current(&self) -> &Code {
        &self.code
    }

    /// Take the composed guess, leaving the builder empty
    pub fn build(&mut self) -> Code {
        std::mem::take(&mut self.code)
    }
}
