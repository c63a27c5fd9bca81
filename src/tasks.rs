//! Four-bucket task board
//!
//! Every task lives in exactly one bucket. The board keeps a single map from
//! task name to its placement (bucket plus a sequence number), so a task can
//! never be listed twice or lost; a bucket's listing is its tasks ordered by
//! sequence, and moving a task gives it a fresh, highest sequence, which
//! appends it to the target bucket.
//!
//! The board is saved as a fixed-width text table, one column per bucket:
//!
//! ```text
//! TO DO       IN PROGRESS REVIEW      DONE
//! task 2      task 1      task 3
//! task 4      task 6
//! ```
//!
//! Columns are as wide as the longest name plus two, never narrower than
//! twelve, and cell positions are read back from the header labels. Files
//! from the older fixed twelve-column layout, whose header does not line up
//! with its rows, do not parse correctly. Task names may not contain line
//! breaks or other control characters.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::console::Console;

/// Narrowest column in the saved table
const MIN_COLUMN_WIDTH: usize = 12;

/// Errors raised by the task board
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task name is blank
    #[error("task name cannot be empty")]
    EmptyName,
    /// Task name holds a line break or other control character
    #[error("task name {0:?} contains a control character")]
    InvalidName(String),
    /// Task name already on the board
    #[error("task '{0}' already exists")]
    Duplicate(String),
    /// No task with this name
    #[error("task '{0}' not found")]
    NotFound(String),
    /// The saved table could not be read
    #[error("malformed task file: {0}")]
    Malformed(String),
    /// IO error reading or writing the board
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Task status bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Not started
    Todo,
    /// Being worked on
    InProgress,
    /// Waiting for review
    Review,
    /// Finished
    Done,
}

impl Bucket {
    /// All buckets in board order
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    /// Column label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "TO DO",
            Self::InProgress => "IN PROGRESS",
            Self::Review => "REVIEW",
            Self::Done => "DONE",
        }
    }

    /// Menu number, 1 to 4
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::Todo => 1,
            Self::InProgress => 2,
            Self::Review => 3,
            Self::Done => 4,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "1" | "todo" | "to_do" => Ok(Self::Todo),
            "2" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "3" | "review" => Ok(Self::Review),
            "4" | "done" => Ok(Self::Done),
            _ => Err(format!("Invalid status: {s}. Use: todo, in_progress, review, done (or 1-4)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    bucket: Bucket,
    seq: u64,
}

/// The board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    placements: HashMap<String, Placement>,
    next_seq: u64,
}

impl Board {
    /// Empty board
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The starter board used when no file exists yet
    #[must_use]
    pub fn seeded() -> Self {
        let mut board = Self::new();
        let seed = [
            (Bucket::Todo, ["task 2", "task 4", "task 5"].as_slice()),
            (Bucket::InProgress, ["task 1", "task 6"].as_slice()),
            (Bucket::Review, ["task 3"].as_slice()),
        ];
        for (bucket, names) in seed {
            for name in names {
                board.insert(name, bucket);
            }
        }
        board
    }

    fn insert(&mut self, name: &str, bucket: Bucket) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.placements.insert(name.to_string(), Placement { bucket, seq });
    }

    /// Add a new task at the end of `bucket`
    pub fn add(&mut self, name: &str, bucket: Bucket) -> Result<(), TaskError> {
        let name = valid_name(name)?;
        if name.is_empty() {
            return Err(TaskError::EmptyName);
        }
        if self.placements.contains_key(name) {
            return Err(TaskError::Duplicate(name.to_string()));
        }
        self.insert(name, bucket);
        Ok(())
    }

    /// Move a task to the end of `target`, returning the bucket it left
    pub fn move_task(&mut self, name: &str, target: Bucket) -> Result<Bucket, TaskError> {
        let name = valid_name(name)?;
        let seq = self.next_seq;
        let placement = self
            .placements
            .get_mut(name)
            .ok_or_else(|| TaskError::NotFound(name.to_string()))?;
        let previous = placement.bucket;
        *placement = Placement {
            bucket: target,
            seq,
        };
        self.next_seq += 1;
        Ok(previous)
    }

    /// Bucket holding `name`
    #[must_use]
    pub fn status_of(&self, name: &str) -> Option<Bucket> {
        self.placements.get(name.trim()).map(|p| p.bucket)
    }

    /// Whether `name` is on the board
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.placements.contains_key(name.trim())
    }

    /// Tasks in `bucket`, in insertion order
    #[must_use]
    pub fn tasks(&self, bucket: Bucket) -> Vec<&str> {
        let mut tasks: Vec<(&str, u64)> = self
            .placements
            .iter()
            .filter(|(_, p)| p.bucket == bucket)
            .map(|(name, p)| (name.as_str(), p.seq))
            .collect();
        tasks.sort_by_key(|(_, seq)| *seq);
        tasks.into_iter().map(|(name, _)| name).collect()
    }

    /// Number of tasks on the board
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the board has no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// One summary line for a bucket
    #[must_use]
    pub fn summary_line(&self, bucket: Bucket) -> String {
        let tasks = self.tasks(bucket);
        if tasks.is_empty() {
            format!("{bucket}: No tasks")
        } else {
            format!("{bucket}: {}", tasks.join(", "))
        }
    }

    /// Render the fixed-width table
    #[must_use]
    pub fn render(&self) -> String {
        let columns: Vec<Vec<&str>> = Bucket::ALL.iter().map(|b| self.tasks(*b)).collect();
        let longest = self.placements.keys().map(|n| n.chars().count()).max().unwrap_or(0);
        let width = MIN_COLUMN_WIDTH.max(longest + 2);
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

        let mut out = String::new();
        let header: String = Bucket::ALL.iter().map(|b| format!("{:<width$}", b.label())).collect();
        let _ = writeln!(out, "{}", header.trim_end());
        for row in 0..rows {
            let line: String = columns
                .iter()
                .map(|column| format!("{:<width$}", column.get(row).copied().unwrap_or("")))
                .collect();
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out
    }

    /// Parse a table written by [`Board::render`]
    pub fn parse(text: &str) -> Result<Self, TaskError> {
        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| TaskError::Malformed("missing header".to_string()))?;
        let header: Vec<char> = header.chars().collect();

        // Column starts come from where each label sits in the header
        let mut starts = Vec::with_capacity(Bucket::ALL.len());
        let mut from = 0;
        for bucket in Bucket::ALL {
            let label: Vec<char> = bucket.label().chars().collect();
            let start = (from..header.len())
                .find(|&i| header[i..].starts_with(&label))
                .ok_or_else(|| TaskError::Malformed(format!("header lacks '{bucket}'")))?;
            starts.push(start);
            from = start + label.len();
        }

        let mut board = Self::new();
        let mut columns: Vec<Vec<String>> = vec![Vec::new(); Bucket::ALL.len()];
        for line in lines {
            let chars: Vec<char> = line.chars().collect();
            for (i, column) in columns.iter_mut().enumerate() {
                let start = starts[i].min(chars.len());
                let end = starts.get(i + 1).copied().unwrap_or(chars.len()).min(chars.len());
                let cell: String = chars[start..end].iter().collect();
                let cell = cell.trim();
                if !cell.is_empty() {
                    column.push(cell.to_string());
                }
            }
        }

        for (bucket, names) in Bucket::ALL.into_iter().zip(columns) {
            for name in names {
                board.add(&name, bucket)?;
            }
        }
        Ok(board)
    }

    /// Load a board from `path`
    pub fn load(path: &Path) -> Result<Self, TaskError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Load `path` if it exists, else the starter board
    pub fn load_or_seed(path: &Path) -> Result<Self, TaskError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("{} not found, starting from the default board", path.display());
            Ok(Self::seeded())
        }
    }

    /// Rewrite `path` with the whole board
    pub fn save(&self, path: &Path) -> Result<(), TaskError> {
        fs::write(path, self.render())?;
        log::debug!("saved {} tasks to {}", self.len(), path.display());
        Ok(())
    }
}

/// Trimmed `name`; a saved table holds one task per cell, so control
/// characters are refused
fn valid_name(name: &str) -> Result<&str, TaskError> {
    let name = name.trim();
    if name.chars().any(char::is_control) {
        return Err(TaskError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// What to show in the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// One bucket
    Bucket(Bucket),
    /// Every bucket
    All,
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5" => Ok(Self::All),
            n @ ("1" | "2" | "3" | "4") => n.parse().map(Self::Bucket),
            _ => Err("Invalid choice. Please choose a number from 1 to 5.".to_string()),
        }
    }
}

fn bucket_menu() -> String {
    Bucket::ALL.iter().map(|b| format!("{}. {}", b.number(), b.label())).collect::<Vec<_>>().join("\n")
}

/// Interactive loop: view, pick a task, pick a bucket, move and save.
///
/// Returns when the user declines to continue or input runs out.
pub fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    board: &mut Board,
    path: &Path,
) -> anyhow::Result<()> {
    loop {
        console.say(format!("\nWhat task do you want to see?\n{}\n5. ALL", bucket_menu()))?;
        let Some(choice) = console.prompt("Choose a number (1-5): ")? else {
            return Ok(());
        };
        let view = match choice.parse::<View>() {
            Ok(view) => view,
            Err(e) => {
                console.say(e)?;
                continue;
            },
        };
        match view {
            View::Bucket(bucket) => console.say(board.summary_line(bucket))?,
            View::All => {
                for bucket in Bucket::ALL {
                    console.say(board.summary_line(bucket))?;
                }
            },
        }

        let Some(task) = console.prompt("\nWhich task do you want to deal with? ")? else {
            return Ok(());
        };
        if !board.contains(&task) {
            console.say("Task not found. Please choose a valid task.")?;
            continue;
        }

        console.say(format!("\nWhere to move?\n{}", bucket_menu()))?;
        let Some(target) = console.prompt("Choose a number (1-4): ")? else {
            return Ok(());
        };
        let target = match target.trim() {
            n @ ("1" | "2" | "3" | "4") => n.parse::<Bucket>().map_err(anyhow::Error::msg)?,
            _ => {
                console.say("Invalid choice. Task not moved.")?;
                continue;
            },
        };

        board.move_task(&task, target)?;
        console.say(format!("\nTask '{}' has been moved to {target}.", task.trim()))?;
        board.save(path)?;
        console.say(format!("\nChanges saved to {}.", path.display()))?;

        let Some(answer) = console.prompt("\nDo you want to continue? (y/n): ")? else {
            return Ok(());
        };
        if answer.trim().to_lowercase() != "y" {
            return Ok(());
        }
    }
}

/// Write one summary line per bucket
pub fn write_summary<W: Write>(out: &mut W, board: &Board) -> io::Result<()> {
    for bucket in Bucket::ALL {
        writeln!(out, "{}", board.summary_line(bucket))?;
    }
    Ok(())
}
