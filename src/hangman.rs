//! Hangman
//!
//! [`Game`] holds the rules; [`play`] is the terminal loop around it.
//! Words come from a random-word endpoint, falling back to a built-in list so
//! a game can always start.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::config::HangmanConfig;
use crate::console::Console;
use crate::http::{FetchError, HttpGet, ensure_success};

/// Wrong guesses allowed by default
pub const MAX_INCORRECT: u8 = 6;

/// Used when the configured fallback list is empty too
const LAST_RESORT_WORD: &str = "apple";

/// Gallows drawings, indexed by wrong guesses
const GALLOWS: [&str; 7] = [
    "
  ------
  |    |
       |
       |
       |
       |
=========",
    "
  ------
  |    |
  O    |
       |
       |
       |
=========",
    "
  ------
  |    |
  O    |
  |    |
       |
       |
=========",
    "
  ------
  |    |
  O    |
 /|    |
       |
       |
=========",
    r"
  ------
  |    |
  O    |
 /|\   |
       |
       |
=========",
    r"
  ------
  |    |
  O    |
 /|\   |
 /     |
       |
=========",
    r"
  ------
  |    |
  O    |
 /|\   |
 / \   |
       |
=========",
];

/// Why a guess was rejected. The game state is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// Input is not exactly one alphabetic character
    #[error("'{0}' is not a single letter")]
    NotALetter(String),
    /// The letter was guessed before
    #[error("'{0}' was already guessed")]
    AlreadyGuessed(char),
    /// The game already ended
    #[error("the game is over")]
    GameOver,
}

/// Result of an accepted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The letter is in the word
    Hit(char),
    /// The letter is not in the word
    Miss(char),
}

/// Game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Still guessing
    InProgress,
    /// Every letter revealed
    Won,
    /// Out of guesses
    Lost,
}

/// Render `word` with unguessed characters as `_`
#[must_use]
pub fn display_word(word: &str, guessed: &[char]) -> String {
    word.chars().map(|c| if guessed.contains(&c) { c } else { '_' }).collect()
}

/// Gallows drawing for a number of wrong guesses
#[must_use]
pub fn gallows(incorrect: u8) -> &'static str {
    GALLOWS[usize::from(incorrect).min(GALLOWS.len() - 1)]
}

/// Hangman state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    word: String,
    guessed: BTreeSet<char>,
    incorrect: u8,
    max_incorrect: u8,
}

impl Game {
    /// Start a game for `word` (lowercased). `max_incorrect` is clamped to
    /// `1..=MAX_INCORRECT`, the stages the gallows can draw.
    #[must_use]
    pub fn new(word: &str, max_incorrect: u8) -> Self {
        Self {
            word: word.to_lowercase(),
            guessed: BTreeSet::new(),
            incorrect: 0,
            max_incorrect: max_incorrect.clamp(1, MAX_INCORRECT),
        }
    }

    /// The secret word
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Letters guessed so far
    #[must_use]
    pub const fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// Wrong guesses so far
    #[must_use]
    pub const fn incorrect(&self) -> u8 {
        self.incorrect
    }

    /// Wrong guesses allowed
    #[must_use]
    pub const fn max_incorrect(&self) -> u8 {
        self.max_incorrect
    }

    /// Word with unrevealed letters masked
    #[must_use]
    pub fn masked(&self) -> String {
        self.word.chars().map(|c| if self.guessed.contains(&c) { c } else { '_' }).collect()
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> Status {
        if self.word.chars().all(|c| self.guessed.contains(&c)) {
            Status::Won
        } else if self.incorrect >= self.max_incorrect {
            Status::Lost
        } else {
            Status::InProgress
        }
    }

    /// Apply a guess
    pub fn guess(&mut self, input: &str) -> Result<Outcome, GuessError> {
        if self.status() != Status::InProgress {
            return Err(GuessError::GameOver);
        }

        let normalized = input.trim().to_lowercase();
        let mut chars = normalized.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => c,
            _ => return Err(GuessError::NotALetter(input.trim().to_string())),
        };

        if !self.guessed.insert(letter) {
            return Err(GuessError::AlreadyGuessed(letter));
        }

        if self.word.contains(letter) {
            Ok(Outcome::Hit(letter))
        } else {
            self.incorrect += 1;
            Ok(Outcome::Miss(letter))
        }
    }
}

/// Fetch candidate words from the endpoint
pub async fn fetch_words<C: HttpGet>(
    client: &C,
    config: &HangmanConfig,
) -> Result<Vec<String>, FetchError> {
    let query = [("number".to_string(), config.word_count.to_string())];
    let response = client.get(&config.endpoint, &query).await?;
    let response = ensure_success(response, &config.endpoint)?;
    let words: Vec<String> = response.json()?;
    let words: Vec<String> = words.into_iter().filter(|w| !w.trim().is_empty()).collect();
    if words.is_empty() {
        return Err(FetchError::Empty("words"));
    }
    Ok(words)
}

/// Pick a word: remote if possible, otherwise from the fallback list
pub async fn choose_word<C: HttpGet, R: Rng>(
    client: &C,
    config: &HangmanConfig,
    rng: &mut R,
) -> String {
    match fetch_words(client, config).await {
        Ok(words) => {
            if let Some(word) = words.choose(rng) {
                return word.trim().to_lowercase();
            }
        },
        Err(e) => log::warn!("could not fetch a word: {e}"),
    }
    log::info!("using fallback word list");
    fallback_word(&config.fallback_words, rng)
}

/// Uniform pick from `words`
pub fn fallback_word<R: Rng>(words: &[String], rng: &mut R) -> String {
    words
        .choose(rng)
        .map_or_else(|| LAST_RESORT_WORD.to_string(), |w| w.trim().to_lowercase())
}

/// Run the guessing loop until the game ends or input runs out
pub fn play<R: BufRead, W: Write>(console: &mut Console<R, W>, game: &mut Game) -> io::Result<Status> {
    while game.status() == Status::InProgress {
        console.clear()?;
        console.say(gallows(game.incorrect()))?;
        console.say(format!("Word: {}", game.masked()))?;

        let Some(input) = console.prompt("Enter a letter: ")? else {
            return Ok(Status::InProgress);
        };

        match game.guess(&input) {
            Ok(Outcome::Hit(c)) => console.say(format!("Correct! '{c}' is in the word."))?,
            Ok(Outcome::Miss(c)) => console.say(format!("Incorrect! '{c}' is not in the word."))?,
            Err(e) => console.say(format!("Invalid guess: {e}"))?,
        }
    }

    let status = game.status();
    match status {
        Status::Won => {
            let line = format!("Congratulations! You guessed the word: {}", game.word());
            console.say(line.green().to_string())?;
        },
        Status::Lost => {
            console.clear()?;
            console.say(gallows(game.incorrect()))?;
            let line = format!("Out of guesses. The word was: {}", game.word());
            console.say(line.red().to_string())?;
        },
        Status::InProgress => {},
    }
    Ok(status)
}
