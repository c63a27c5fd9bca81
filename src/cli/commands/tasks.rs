//! Task board command

use std::path::PathBuf;

use crate::cli::app::TaskAction;
use toolbelt::config::Config;
use toolbelt::console;
use toolbelt::output::{OperationResult, OutputMode, Render, TasksResult};
use toolbelt::tasks::{self, Board};

/// Run a board action, or the interactive session when none is given
pub fn tasks(
    file: Option<PathBuf>,
    action: Option<TaskAction>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(&config.tasks.file));
    let mut board = Board::load_or_seed(&path)?;

    match action {
        None => {
            let mut console = console::stdio();
            tasks::run_session(&mut console, &mut board, &path)
        },
        Some(TaskAction::List { status }) => {
            TasksResult::from_board(&board, status).render(mode);
            Ok(())
        },
        Some(TaskAction::Add { name, status }) => {
            board.add(&name, status)?;
            board.save(&path)?;
            OperationResult::ok(format!("Task '{}' added to {status}.", name.trim())).render(mode);
            Ok(())
        },
        Some(TaskAction::Move { name, status }) => {
            let from = board.move_task(&name, status)?;
            board.save(&path)?;
            OperationResult::ok(format!("Task '{}' has been moved from {from} to {status}.", name.trim()))
                .render(mode);
            Ok(())
        },
    }
}
