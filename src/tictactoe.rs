//! Tic-tac-toe
//!
//! [`Game`] is the pure state machine: a position goes in, the new state
//! comes out. [`play`] drives it from a [`Console`] for two players or a
//! player against a random computer.

use std::fmt;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::console::Console;

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mark {
    /// Moves first
    X,
    /// Moves second
    O,
}

impl Mark {
    /// The other player
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    const fn symbol(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Position outside 1..=9
    #[error("Invalid move. Choose a number between 1 and 9.")]
    OutOfRange,
    /// Cell already marked
    #[error("This cell is already taken, try another one.")]
    Occupied,
    /// The game has ended
    #[error("The game is over.")]
    GameOver,
}

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// 3x3 grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Mark>; 3]; 3],
}

impl Board {
    /// Empty board
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rows of `"X"`, `"O"` and `" "`; anything else is empty
    #[must_use]
    pub fn from_rows(rows: [[&str; 3]; 3]) -> Self {
        let mut cells = [[None; 3]; 3];
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                cells[r][c] = match cell.trim() {
                    "X" | "x" => Some(Mark::X),
                    "O" | "o" => Some(Mark::O),
                    _ => None,
                };
            }
        }
        Self { cells }
    }

    fn coords(position: usize) -> Result<(usize, usize), MoveError> {
        if (1..=9).contains(&position) {
            Ok(((position - 1) / 3, (position - 1) % 3))
        } else {
            Err(MoveError::OutOfRange)
        }
    }

    /// Mark at position 1..=9
    pub fn get(&self, position: usize) -> Result<Option<Mark>, MoveError> {
        let (r, c) = Self::coords(position)?;
        Ok(self.cells[r][c])
    }

    /// Place `mark` at position 1..=9, numbered left to right, top to bottom
    pub fn place(&mut self, position: usize, mark: Mark) -> Result<(), MoveError> {
        let (r, c) = Self::coords(position)?;
        let cell = &mut self.cells[r][c];
        if cell.is_some() {
            return Err(MoveError::Occupied);
        }
        *cell = Some(mark);
        Ok(())
    }

    /// Whether no empty cell remains
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Empty positions, ascending
    #[must_use]
    pub fn empty_positions(&self) -> Vec<usize> {
        (1..=9)
            .filter(|&p| matches!(self.get(p), Ok(None)))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            let line: Vec<String> =
                row.iter().map(|cell| cell.map_or(' ', Mark::symbol).to_string()).collect();
            writeln!(f, "{}", line.join(" | "))?;
            if i < 2 {
                writeln!(f, "-----")?;
            }
        }
        Ok(())
    }
}

/// Whether `mark` holds a full row, column or diagonal
#[must_use]
pub fn check_win(board: &Board, mark: Mark) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&(r, c)| board.cells[r][c] == Some(mark)))
}

/// Whether the board is full with no winner
#[must_use]
pub fn check_draw(board: &Board) -> bool {
    board.is_full() && !check_win(board, Mark::X) && !check_win(board, Mark::O)
}

/// Where the game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    /// Waiting for `to_move`
    InProgress {
        /// Player whose turn it is
        to_move: Mark,
    },
    /// Someone completed a line
    Won(Mark),
    /// Full board, no line
    Draw,
}

/// A game in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    board: Board,
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Fresh game, X to move
    #[must_use]
    pub const fn new() -> Self {
        Self {
            board: Board {
                cells: [[None; 3]; 3],
            },
            state: GameState::InProgress { to_move: Mark::X },
        }
    }

    /// The board
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Play the current player's mark at `position`
    pub fn play(&mut self, position: usize) -> Result<GameState, MoveError> {
        let GameState::InProgress { to_move } = self.state else {
            return Err(MoveError::GameOver);
        };
        self.board.place(position, to_move)?;

        self.state = if check_win(&self.board, to_move) {
            GameState::Won(to_move)
        } else if check_draw(&self.board) {
            GameState::Draw
        } else {
            GameState::InProgress {
                to_move: to_move.other(),
            }
        };
        Ok(self.state)
    }
}

/// Random empty cell, resampling uniformly over 1..=9 until one is free
pub fn computer_pick<R: Rng>(board: &Board, rng: &mut R) -> Option<usize> {
    if board.is_full() {
        return None;
    }
    loop {
        let position = rng.gen_range(1..=9);
        if matches!(board.get(position), Ok(None)) {
            return Some(position);
        }
    }
}

/// Who plays O
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Two people share the terminal
    #[value(name = "pvp")]
    PlayerVsPlayer,
    /// The computer plays O
    #[value(name = "pvc")]
    PlayerVsComputer,
}

/// Ask for a mode until the answer is 1 or 2. `None` when input ends.
pub fn choose_mode<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<Option<Mode>> {
    loop {
        let prompt = "With whom you want to play \n1) with another player \n2) With computer.\nEnter your choice: ";
        let Some(answer) = console.prompt(prompt)? else {
            return Ok(None);
        };
        match answer.trim() {
            "1" => return Ok(Some(Mode::PlayerVsPlayer)),
            "2" => return Ok(Some(Mode::PlayerVsComputer)),
            _ => console.say("Invalid input. Try again.")?,
        }
    }
}

/// Run a game to the end. Returns the final state, or `None` when input
/// ends first.
pub fn play<R: BufRead, W: Write, G: Rng>(
    console: &mut Console<R, W>,
    mode: Mode,
    rng: &mut G,
) -> io::Result<Option<GameState>> {
    let mut game = Game::new();

    loop {
        let to_move = match game.state() {
            GameState::InProgress { to_move } => to_move,
            GameState::Won(mark) => {
                console.clear()?;
                console.say(game.board().to_string())?;
                console.say(format!("Player {mark} wins!").green().bold().to_string())?;
                return Ok(Some(game.state()));
            },
            GameState::Draw => {
                console.clear()?;
                console.say(game.board().to_string())?;
                console.say("It's a draw!".yellow().bold().to_string())?;
                return Ok(Some(game.state()));
            },
        };

        console.clear()?;
        console.say(game.board().to_string())?;

        if mode == Mode::PlayerVsComputer && to_move == Mark::O {
            if let Some(position) = computer_pick(game.board(), rng) {
                console.say(format!("Computer chose cell {position}"))?;
                if let Err(e) = game.play(position) {
                    log::warn!("computer move rejected: {e}");
                }
            }
            continue;
        }

        let Some(input) = console.prompt(&format!("Player {to_move}, choose a cell (1-9): "))? else {
            return Ok(None);
        };
        let Ok(position) = input.trim().parse::<usize>() else {
            console.say("Invalid input. Enter a number between 1 and 9.")?;
            continue;
        };
        if let Err(e) = game.play(position) {
            console.say(e.to_string())?;
        }
    }
}
