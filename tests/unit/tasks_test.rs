//! Tests for the task board

use std::fs;

use crate::common;
use tempfile::TempDir;
use test_case::test_case;
use toolbelt::tasks::{Board, Bucket, TaskError, View, run_session};

// =============================================================================
// Buckets
// =============================================================================

#[test_case("1", Bucket::Todo ; "number one")]
#[test_case("todo", Bucket::Todo ; "snake todo")]
#[test_case("TO DO", Bucket::Todo ; "label todo")]
#[test_case("in-progress", Bucket::InProgress ; "kebab in progress")]
#[test_case("IN PROGRESS", Bucket::InProgress ; "label in progress")]
#[test_case("3", Bucket::Review ; "number three")]
#[test_case("done", Bucket::Done ; "done")]
fn test_bucket_parse(input: &str, expected: Bucket) {
    assert_eq!(input.parse::<Bucket>().unwrap(), expected);
}

#[test_case("0" ; "zero")]
#[test_case("5" ; "five")]
#[test_case("later" ; "word")]
fn test_bucket_parse_invalid(input: &str) {
    assert!(input.parse::<Bucket>().is_err());
}

#[test]
fn test_view_parse() {
    assert_eq!("5".parse::<View>().unwrap(), View::All);
    assert_eq!("2".parse::<View>().unwrap(), View::Bucket(Bucket::InProgress));
    assert!("6".parse::<View>().is_err());
}

// =============================================================================
// Board operations
// =============================================================================

#[test]
fn test_seeded_board() {
    let board = Board::seeded();
    assert_eq!(board.tasks(Bucket::Todo), ["task 2", "task 4", "task 5"]);
    assert_eq!(board.tasks(Bucket::InProgress), ["task 1", "task 6"]);
    assert_eq!(board.tasks(Bucket::Review), ["task 3"]);
    assert!(board.tasks(Bucket::Done).is_empty());
    assert_eq!(board.len(), 6);
}

#[test]
fn test_move_appends_and_keeps_count() {
    let mut board = Board::seeded();
    let from = board.move_task("task 4", Bucket::Done).unwrap();

    assert_eq!(from, Bucket::Todo);
    assert_eq!(board.tasks(Bucket::Todo), ["task 2", "task 5"]);
    assert_eq!(board.tasks(Bucket::Done), ["task 4"]);
    assert_eq!(board.len(), 6);
    assert_eq!(board.status_of("task 4"), Some(Bucket::Done));
}

#[test]
fn test_move_to_same_bucket_goes_to_end() {
    let mut board = Board::seeded();
    board.move_task("task 2", Bucket::Todo).unwrap();
    assert_eq!(board.tasks(Bucket::Todo), ["task 4", "task 5", "task 2"]);
}

#[test]
fn test_move_unknown_task_changes_nothing() {
    let mut board = Board::seeded();
    let before = board.clone();
    assert!(matches!(board.move_task("task 99", Bucket::Done), Err(TaskError::NotFound(_))));
    assert_eq!(board, before);
}

#[test]
fn test_each_task_in_exactly_one_bucket() {
    let mut board = Board::seeded();
    board.move_task("task 1", Bucket::Review).unwrap();
    board.move_task("task 3", Bucket::Done).unwrap();
    board.add("task 7", Bucket::InProgress).unwrap();

    let listed: usize = Bucket::ALL.iter().map(|b| board.tasks(*b).len()).sum();
    assert_eq!(listed, board.len());
}

#[test]
fn test_add_rejects_empty_and_duplicate() {
    let mut board = Board::new();
    assert!(matches!(board.add("  ", Bucket::Todo), Err(TaskError::EmptyName)));
    board.add("write docs", Bucket::Todo).unwrap();
    assert!(matches!(board.add("write docs", Bucket::Done), Err(TaskError::Duplicate(_))));
}

#[test_case("fix\nbug" ; "newline")]
#[test_case("fix\r\nbug" ; "carriage return")]
#[test_case("fix\tbug" ; "tab")]
fn test_add_rejects_control_characters(name: &str) {
    let mut board = Board::new();
    assert!(matches!(board.add(name, Bucket::Review), Err(TaskError::InvalidName(_))));
    assert!(board.is_empty());
}

#[test]
fn test_move_rejects_control_characters() {
    let mut board = Board::seeded();
    let before = board.clone();
    assert!(matches!(
        board.move_task("task 1\ntask 2", Bucket::Done),
        Err(TaskError::InvalidName(_))
    ));
    assert_eq!(board, before);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_render_seeded_board() {
    let expected = "\
TO DO       IN PROGRESS REVIEW      DONE
task 2      task 1      task 3
task 4      task 6
task 5
";
    assert_eq!(Board::seeded().render(), expected);
}

#[test]
fn test_parse_render_preserves_order() {
    let mut board = Board::seeded();
    board.add("a rather long task name", Bucket::Done).unwrap();
    board.move_task("task 1", Bucket::Review).unwrap();

    let parsed = Board::parse(&board.render()).unwrap();

    for bucket in Bucket::ALL {
        assert_eq!(parsed.tasks(bucket), board.tasks(bucket), "bucket {bucket}");
    }
}

#[test]
fn test_rejected_name_never_reaches_the_file() {
    let mut board = Board::new();
    board.add("fix bug", Bucket::Todo).unwrap();
    assert!(board.add("fix\nbug", Bucket::Review).is_err());

    let parsed = Board::parse(&board.render()).unwrap();

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.tasks(Bucket::Todo), ["fix bug"]);
    assert!(parsed.tasks(Bucket::Review).is_empty());
}

#[test]
fn test_parse_rejects_bad_header() {
    assert!(matches!(Board::parse("TODO DOING DONE\n"), Err(TaskError::Malformed(_))));
    assert!(matches!(Board::parse(""), Err(TaskError::Malformed(_))));
}

#[test]
fn test_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("task.txt");
    let mut board = Board::seeded();
    board.move_task("task 5", Bucket::InProgress).unwrap();

    board.save(&path).unwrap();
    let loaded = Board::load(&path).unwrap();

    assert_eq!(loaded.tasks(Bucket::InProgress), ["task 1", "task 6", "task 5"]);
}

#[test]
fn test_load_or_seed_missing_file() {
    let temp = TempDir::new().unwrap();
    let board = Board::load_or_seed(&temp.path().join("none.txt")).unwrap();
    assert_eq!(board.len(), 6);
}

// =============================================================================
// Interactive session
// =============================================================================

#[test]
fn test_session_moves_and_saves() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("task.txt");
    let mut board = Board::seeded();
    let mut console = common::console("5\ntask 3\n4\nn\n");

    run_session(&mut console, &mut board, &path).unwrap();

    assert_eq!(board.tasks(Bucket::Done), ["task 3"]);
    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("task 3"));
    let out = common::output(console);
    assert!(out.contains("REVIEW: task 3"));
    assert!(out.contains("Task 'task 3' has been moved to DONE."));
}

#[test]
fn test_session_unknown_task_does_not_save() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("task.txt");
    let mut board = Board::seeded();
    let mut console = common::console("1\nnope\n");

    run_session(&mut console, &mut board, &path).unwrap();

    assert!(!path.exists());
    assert!(common::output(console).contains("Task not found"));
}

#[test]
fn test_session_invalid_target_keeps_board() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("task.txt");
    let mut board = Board::seeded();
    let mut console = common::console("1\ntask 2\n9\n");

    run_session(&mut console, &mut board, &path).unwrap();

    assert_eq!(board, Board::seeded());
    assert!(common::output(console).contains("Invalid choice. Task not moved."));
}
