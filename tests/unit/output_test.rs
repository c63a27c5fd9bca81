//! Tests for output rendering

use std::path::PathBuf;

use toolbelt::jokes::RatedJoke;
use toolbelt::news::Article;
use toolbelt::output::{
    ExportResult, JokesResult, NewsResult, OperationResult, OutputMode, Render, SortResult,
    TasksResult, WeatherResult, WordsResult,
};
use toolbelt::sorter::{FailedMove, MovedFile, SortReport};
use toolbelt::tasks::{Board, Bucket};
use toolbelt::weather::{WeatherOption, WeatherSample};
use toolbelt::words::WordCount;

#[test]
fn words_result_human() {
    let result = WordsResult {
        top: 2,
        words: vec![
            WordCount {
                word: "тест".to_string(),
                count: 2,
            },
            WordCount {
                word: "python".to_string(),
                count: 2,
            },
        ],
    };
    assert_eq!(result.human(), "Top 2 catchwords:\nтест: 2\npython: 2\n");
}

#[test]
fn words_result_json() {
    let result = WordsResult {
        top: 1,
        words: vec![WordCount {
            word: "rust".to_string(),
            count: 3,
        }],
    };
    let json: serde_json::Value = serde_json::from_str(&result.to_output(OutputMode::Json)).unwrap();
    assert_eq!(json["top"], 1);
    assert_eq!(json["words"][0]["word"], "rust");
    assert_eq!(json["words"][0]["count"], 3);
}

#[test]
fn weather_result_serialization() {
    let sample = WeatherSample {
        temperature: Some(-3.5),
        humidity: None,
        wind_speed: Some(2.0),
    };
    let result = WeatherResult::new(" Oslo ", WeatherOption::WindSpeed, sample);

    assert_eq!(result.human(), "Wind Speed: 2 m/s");
    let json: serde_json::Value = serde_json::from_str(&result.json()).unwrap();
    assert_eq!(json["city"], "Oslo");
    assert_eq!(json["option"], "wind_speed");
    assert_eq!(json["value"], 2.0);
}

#[test]
fn tasks_result_filters_bucket() {
    let board = Board::seeded();

    let all = TasksResult::from_board(&board, None);
    assert_eq!(all.buckets.len(), 4);
    assert!(all.human().contains("DONE: No tasks"));

    let review = TasksResult::from_board(&board, Some(Bucket::Review));
    assert_eq!(review.human(), "REVIEW: task 3\n");
    let json: serde_json::Value = serde_json::from_str(&review.json()).unwrap();
    assert_eq!(json["buckets"][0]["status"], "review");
    assert_eq!(json["buckets"][0]["tasks"][0], "task 3");
}

#[test]
fn sort_result_human_and_json() {
    let result = SortResult {
        source: PathBuf::from("downloads"),
        report: SortReport {
            created_dirs: vec![PathBuf::from("downloads/others")],
            moved: vec![MovedFile {
                from: PathBuf::from("downloads/a.pdf"),
                to: PathBuf::from("downloads/pdf/pdf/a.pdf"),
            }],
            failed: vec![FailedMove {
                path: PathBuf::from("downloads/b.pdf"),
                reason: "exists".to_string(),
            }],
        },
    };

    let human = result.human();
    assert!(human.contains("Moved: downloads/a.pdf -> downloads/pdf/pdf/a.pdf"));
    assert!(human.contains("Error moving file downloads/b.pdf: exists"));
    assert!(human.contains("1 file(s) moved, 1 left in place."));

    let json: serde_json::Value = serde_json::from_str(&result.json()).unwrap();
    assert_eq!(json["moved"].as_array().unwrap().len(), 1);
    assert_eq!(json["failed"][0]["reason"], "exists");
}

#[test]
fn sort_result_empty() {
    let result = SortResult {
        source: PathBuf::from("empty"),
        report: SortReport::default(),
    };
    assert!(result.human().contains("nothing to sort"));
}

#[test]
fn news_result_human() {
    let result = NewsResult {
        saved_to: Some(PathBuf::from("news_today.txt")),
        articles: vec![Article {
            title: Some("Big news".to_string()),
            published_at: Some("2024-12-30T09:15:00Z".to_string()),
            ..Article::default()
        }],
    };
    let human = result.human();
    assert!(human.contains("1. Big news"));
    assert!(human.contains("Published: 2024-12-30 09:15 UTC"));
    assert!(human.contains("Source: N/A"));
    assert!(human.contains("News saved to news_today.txt"));
}

#[test]
fn jokes_and_export_results() {
    let jokes = JokesResult {
        output: PathBuf::from("top_jokes.txt"),
        jokes: vec![RatedJoke {
            joke: "knock knock".to_string(),
            rating: 10,
        }],
    };
    assert!(jokes.human().starts_with("Joke: knock knock\nRating: 10\n"));

    let export = ExportResult {
        output: PathBuf::from("people.xlsx"),
        rows: 4,
    };
    assert_eq!(export.human(), "Data successfully saved to people.xlsx (4 rows).");
}

#[test]
fn operation_result_serialization() {
    let result = OperationResult::ok("done");
    let json: serde_json::Value = serde_json::from_str(&result.json()).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "done");
    assert_eq!(result.to_output(OutputMode::Human), "done");
}
