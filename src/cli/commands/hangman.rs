//! Hangman command

use toolbelt::config::Config;
use toolbelt::console;
use toolbelt::hangman::{self, Game, choose_word};

/// Pick a word and play
pub async fn hangman(word: Option<String>, config: &Config) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let word = match word.filter(|w| !w.trim().is_empty()) {
        Some(word) => word.trim().to_lowercase(),
        None => {
            let client = super::http_client(config)?;
            choose_word(&client, &config.hangman, &mut rng).await
        },
    };

    let mut game = Game::new(&word, config.hangman.max_incorrect);
    let mut console = console::stdio();
    hangman::play(&mut console, &mut game)?;
    Ok(())
}
