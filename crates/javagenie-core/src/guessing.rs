use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive bounds of the hidden number.
pub const MIN_TARGET: i64 = 1;
pub const MAX_TARGET: i64 = 100;

pub const INTRO_MESSAGE: &str = "I picked a number between 1 and 100.";
pub const INVALID_INPUT_MESSAGE: &str = "Please enter a valid number.";
pub const TOO_HIGH_MESSAGE: &str = "Too high! Try again.";
pub const TOO_LOW_MESSAGE: &str = "Too low! Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessState {
    Playing,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    TooHigh,
    TooLow,
    Correct,
}

/// One parseable guess and how it compared to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub value: i64,
    pub outcome: GuessOutcome,
}

/// Result of feeding raw input to [`NumberGuessGame::submit_guess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// Input was not an integer. Nothing but the message changed.
    Rejected,
    Scored(GuessOutcome),
}

/// Number-guessing playthrough. Mirrors the Java sample the demo entry
/// ships with: pick 1..=100, answer too high / too low until correct.
#[derive(Debug, Clone)]
pub struct NumberGuessGame {
    target: i64,
    attempts: u32,
    history: Vec<GuessRecord>,
    state: GuessState,
    message: String,
}

impl Default for NumberGuessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberGuessGame {
    /// Start a playthrough with a target drawn from the thread RNG.
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Self::with_target(MIN_TARGET);
        game.start_new_game_with(rng);
        game
    }

    /// Start a playthrough with a fixed target. Used for scripted play.
    pub fn with_target(target: i64) -> Self {
        Self {
            target,
            attempts: 0,
            history: Vec::new(),
            state: GuessState::Playing,
            message: INTRO_MESSAGE.to_string(),
        }
    }

    pub fn start_new_game(&mut self) {
        self.start_new_game_with(&mut rand::rng());
    }

    pub fn start_new_game_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::with_target(rng.random_range(MIN_TARGET..=MAX_TARGET));
    }

    /// Score one raw input line. Input with no leading integer is not an
    /// attempt; trailing junk after the digits is ignored (`"12abc"` is 12).
    ///
    /// This does not check [`GuessState::Won`]; the interaction surface is
    /// responsible for refusing guesses once the game is won.
    pub fn submit_guess(&mut self, raw: &str) -> GuessResult {
        let Some(value) = leading_integer(raw) else {
            self.message = INVALID_INPUT_MESSAGE.to_string();
            return GuessResult::Rejected;
        };

        self.attempts += 1;
        let outcome = if value > self.target {
            self.message = TOO_HIGH_MESSAGE.to_string();
            GuessOutcome::TooHigh
        } else if value < self.target {
            self.message = TOO_LOW_MESSAGE.to_string();
            GuessOutcome::TooLow
        } else {
            self.message = format!("Correct! You guessed it in {} attempts.", self.attempts);
            self.state = GuessState::Won;
            GuessOutcome::Correct
        };

        self.history.insert(0, GuessRecord { value, outcome });
        GuessResult::Scored(outcome)
    }

    pub fn state(&self) -> GuessState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == GuessState::Won
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Most recent guess first.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    #[cfg(any(test, feature = "test-helpers"))]
    pub fn target(&self) -> i64 {
        self.target
    }
}

/// Optional sign then the leading run of ASCII digits, after leading
/// whitespace. Runs too long for `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let digits = &unsigned[..end];
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
