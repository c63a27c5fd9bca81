//! Tic-tac-toe command

use toolbelt::console;
use toolbelt::tictactoe::{self, Mode, choose_mode};

/// Play one game, asking for the mode if not given
pub fn tictactoe(mode: Option<Mode>) -> anyhow::Result<()> {
    let mut console = console::stdio();
    let mode = match mode {
        Some(mode) => mode,
        None => match choose_mode(&mut console)? {
            Some(mode) => mode,
            None => return Ok(()),
        },
    };

    tictactoe::play(&mut console, mode, &mut rand::thread_rng())?;
    Ok(())
}
