//! Line-oriented terminal shell for the interactive tools
//!
//! The games and the task board keep their rules in pure state types and
//! drive them through a [`Console`], which can wrap stdin/stdout or any
//! in-memory reader and writer.

use std::io::{self, BufRead, IsTerminal, Write};

/// ANSI sequence clearing the screen and homing the cursor
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Input/output pair used by interactive loops
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap a reader and writer. Screen clearing is disabled.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: false,
        }
    }

    /// Print `message` (no newline) and read one line.
    ///
    /// Returns `Ok(None)` when input is exhausted; callers treat that as the
    /// user leaving.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Print a line
    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Clear the screen when attached to a terminal
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Consume the console, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Console over the process's stdin and stdout
pub type StdConsole = Console<io::StdinLock<'static>, io::Stdout>;

/// Build a console over stdin/stdout, clearing the screen only on a terminal
#[must_use]
pub fn stdio() -> StdConsole {
    let output = io::stdout();
    let clear_screen = output.is_terminal();
    Console {
        input: io::stdin().lock(),
        output,
        clear_screen,
    }
}
