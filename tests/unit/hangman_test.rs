//! Tests for hangman

use crate::common::{self, MockHttp};
use test_case::test_case;
use toolbelt::config::HangmanConfig;
use toolbelt::hangman::{
    Game, GuessError, MAX_INCORRECT, Outcome, Status, choose_word, display_word, fallback_word,
    fetch_words, gallows, play,
};
use toolbelt::http::FetchError;

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_display_word() {
    assert_eq!(display_word("python", &['p', 'y', 't']), "pyt___");
    assert_eq!(display_word("python", &[]), "______");
}

#[test]
fn test_hit_and_miss() {
    let mut game = Game::new("Rust", MAX_INCORRECT);
    assert_eq!(game.guess("R"), Ok(Outcome::Hit('r')));
    assert_eq!(game.guess("x"), Ok(Outcome::Miss('x')));
    assert_eq!(game.incorrect(), 1);
    assert_eq!(game.masked(), "r___");
}

#[test_case("" ; "empty")]
#[test_case("ab" ; "two letters")]
#[test_case("1" ; "digit")]
#[test_case("?" ; "symbol")]
fn test_invalid_guess_leaves_state(input: &str) {
    let mut game = Game::new("rust", MAX_INCORRECT);
    let before = game.clone();
    assert!(matches!(game.guess(input), Err(GuessError::NotALetter(_))));
    assert_eq!(game, before);
}

#[test]
fn test_repeat_guess_rejected() {
    let mut game = Game::new("rust", MAX_INCORRECT);
    game.guess("z").unwrap();
    let before = game.clone();
    assert_eq!(game.guess(" Z "), Err(GuessError::AlreadyGuessed('z')));
    assert_eq!(game, before);
}

#[test]
fn test_win() {
    let mut game = Game::new("aab", MAX_INCORRECT);
    game.guess("a").unwrap();
    assert_eq!(game.status(), Status::InProgress);
    game.guess("b").unwrap();
    assert_eq!(game.status(), Status::Won);
    assert_eq!(game.guess("c"), Err(GuessError::GameOver));
}

#[test]
fn test_loss_after_max_incorrect() {
    let mut game = Game::new("a", MAX_INCORRECT);
    for letter in ["b", "c", "d", "e", "f"] {
        game.guess(letter).unwrap();
        assert_eq!(game.status(), Status::InProgress);
    }
    game.guess("g").unwrap();
    assert_eq!(game.status(), Status::Lost);
    assert_eq!(game.incorrect(), MAX_INCORRECT);
}

#[test]
fn test_gallows_clamped() {
    assert!(gallows(0).contains("------"));
    assert_eq!(gallows(6), gallows(200));
    assert!(gallows(6).contains("/ \\"));
}

// =============================================================================
// Word source
// =============================================================================

#[tokio::test]
async fn test_fetch_words_sends_number() {
    let http = MockHttp::new().respond(200, r#"["alpha","beta"]"#);
    let words = fetch_words(&http, &HangmanConfig::default()).await.unwrap();
    assert_eq!(words, ["alpha", "beta"]);
    assert_eq!(http.requests()[0].param("number"), Some("5"));
}

#[tokio::test]
async fn test_fetch_words_empty_list() {
    let http = MockHttp::new().respond(200, "[]");
    let err = fetch_words(&http, &HangmanConfig::default()).await.unwrap_err();
    assert!(matches!(err, FetchError::Empty(_)));
}

#[tokio::test]
async fn test_choose_word_remote() {
    let http = MockHttp::new().respond(200, r#"["Kettle"]"#);
    let word = choose_word(&http, &HangmanConfig::default(), &mut common::rng(1)).await;
    assert_eq!(word, "kettle");
}

#[tokio::test]
async fn test_choose_word_falls_back_on_failure() {
    let config = HangmanConfig::default();
    for http in [
        MockHttp::new().fail("offline"),
        MockHttp::new().respond(500, "oops"),
        MockHttp::new().respond(200, "not json"),
    ] {
        let word = choose_word(&http, &config, &mut common::rng(7)).await;
        assert!(config.fallback_words.contains(&word), "unexpected word {word}");
    }
}

#[test]
fn test_fallback_word_empty_list() {
    assert_eq!(fallback_word(&[], &mut common::rng(3)), "apple");
}

// =============================================================================
// Terminal loop
// =============================================================================

#[test]
fn test_play_until_won() {
    let mut game = Game::new("hi", MAX_INCORRECT);
    let mut console = common::console("h\nx\nh\ni\n");

    let status = play(&mut console, &mut game).unwrap();

    assert_eq!(status, Status::Won);
    let out = common::output(console);
    assert!(out.contains("Correct! 'h' is in the word."));
    assert!(out.contains("Incorrect! 'x' is not in the word."));
    assert!(out.contains("Invalid guess: 'h' was already guessed"));
    assert!(out.contains("You guessed the word: hi"));
}

#[test_case(0, 1 ; "zero raised to one")]
#[test_case(3, 3 ; "in range kept")]
#[test_case(200, MAX_INCORRECT ; "capped at gallows stages")]
fn test_max_incorrect_is_clamped(requested: u8, expected: u8) {
    let game = Game::new("rust", requested);
    assert_eq!(game.max_incorrect(), expected);
    assert_eq!(game.status(), Status::InProgress);
}

#[test]
fn test_play_reveals_word_on_loss() {
    let mut game = Game::new("z", 2);
    let mut console = common::console("a\nb\n");
    assert_eq!(play(&mut console, &mut game).unwrap(), Status::Lost);
    assert!(common::output(console).contains("The word was: z"));
}

#[test]
fn test_play_end_of_input() {
    let mut game = Game::new("word", MAX_INCORRECT);
    let mut console = common::console("w\n");
    assert_eq!(play(&mut console, &mut game).unwrap(), Status::InProgress);
}
