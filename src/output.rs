//! Output formatting for human and JSON modes
//!
//! Every command that produces a result builds one of these structs and calls
//! `render`, which prints either readable text or pretty JSON.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use crate::crypto::{self, Asset};
use crate::jokes::{self, RatedJoke};
use crate::news::{self, Article};
use crate::sorter::SortReport;
use crate::tasks::{Board, Bucket};
use crate::weather::{WeatherOption, WeatherSample};
use crate::words::WordCount;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A result that can be shown either way
pub trait Render: Serialize {
    /// Human-readable text
    fn human(&self) -> String;

    /// Pretty JSON
    fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Text for `mode`
    fn to_output(&self, mode: OutputMode) -> String {
        match mode {
            OutputMode::Human => self.human(),
            OutputMode::Json => self.json(),
        }
    }

    /// Print to stdout
    fn render(&self, mode: OutputMode) {
        println!("{}", self.to_output(mode).trim_end());
    }
}

/// Assets that passed the filters
#[derive(Debug, Serialize)]
pub struct AssetsResult {
    /// Matching assets
    pub assets: Vec<Asset>,
}

impl Render for AssetsResult {
    fn human(&self) -> String {
        if self.assets.is_empty() {
            return "No data matching the filter.".to_string();
        }
        let refs: Vec<&Asset> = self.assets.iter().collect();
        crypto::render_assets(&refs)
    }
}

/// Headlines fetched and where they were saved
#[derive(Debug, Serialize)]
pub struct NewsResult {
    /// File the articles were written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
    /// The articles
    pub articles: Vec<Article>,
}

impl Render for NewsResult {
    fn human(&self) -> String {
        if self.articles.is_empty() {
            return "No news found.".to_string();
        }
        let mut out = String::new();
        for (idx, article) in self.articles.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", idx + 1, article.title.as_deref().unwrap_or("N/A"));
            let _ = writeln!(out, "   Source: {}", article.source.name.as_deref().unwrap_or("N/A"));
            let _ = writeln!(
                out,
                "   Published: {}",
                news::format_published(article.published_at.as_ref())
            );
            let _ = writeln!(out, "   Link: {}\n", article.url.as_deref().unwrap_or("N/A"));
        }
        if let Some(path) = &self.saved_to {
            let _ = writeln!(out, "News saved to {}", path.display());
        }
        out
    }
}

/// One weather value for a city
#[derive(Debug, Serialize)]
pub struct WeatherResult {
    /// City asked for
    pub city: String,
    /// Which value
    pub option: WeatherOption,
    /// The value, if the API sent it
    pub value: Option<f64>,
    #[serde(skip)]
    sample: WeatherSample,
}

impl WeatherResult {
    /// Pick `option` out of `sample`
    #[must_use]
    pub fn new(city: &str, option: WeatherOption, sample: WeatherSample) -> Self {
        Self {
            city: city.trim().to_string(),
            option,
            value: sample.value(option),
            sample,
        }
    }
}

impl Render for WeatherResult {
    fn human(&self) -> String {
        self.sample.describe(self.option)
    }
}

/// Most frequent words
#[derive(Debug, Serialize)]
pub struct WordsResult {
    /// How many were asked for
    pub top: usize,
    /// Ranked words
    pub words: Vec<WordCount>,
}

impl Render for WordsResult {
    fn human(&self) -> String {
        let mut out = format!("Top {} catchwords:\n", self.top);
        for w in &self.words {
            let _ = writeln!(out, "{}: {}", w.word, w.count);
        }
        out
    }
}

/// What the sorter did
#[derive(Debug, Serialize)]
pub struct SortResult {
    /// Directory sorted
    pub source: PathBuf,
    /// Details
    #[serde(flatten)]
    pub report: SortReport,
}

impl Render for SortResult {
    fn human(&self) -> String {
        if self.report.is_empty() {
            return format!("{} is empty, nothing to sort.", self.source.display());
        }
        let mut out = String::new();
        for dir in &self.report.created_dirs {
            let _ = writeln!(out, "Created directory: {}", dir.display());
        }
        for moved in &self.report.moved {
            let _ = writeln!(out, "Moved: {} -> {}", moved.from.display(), moved.to.display());
        }
        for failed in &self.report.failed {
            let _ = writeln!(out, "Error moving file {}: {}", failed.path.display(), failed.reason);
        }
        let _ = writeln!(
            out,
            "{} file(s) moved, {} left in place.",
            self.report.moved.len(),
            self.report.failed.len()
        );
        out
    }
}

/// Tasks of one bucket
#[derive(Debug, Serialize)]
pub struct BucketTasks {
    /// Bucket
    pub status: Bucket,
    /// Column label
    pub label: &'static str,
    /// Tasks in order
    pub tasks: Vec<String>,
}

/// Board listing, optionally limited to one bucket
#[derive(Debug, Serialize)]
pub struct TasksResult {
    /// Listed buckets
    pub buckets: Vec<BucketTasks>,
}

impl TasksResult {
    /// List `only` or every bucket
    #[must_use]
    pub fn from_board(board: &Board, only: Option<Bucket>) -> Self {
        let buckets = Bucket::ALL
            .into_iter()
            .filter(|b| only.is_none_or(|o| o == *b))
            .map(|status| BucketTasks {
                status,
                label: status.label(),
                tasks: board.tasks(status).into_iter().map(String::from).collect(),
            })
            .collect();
        Self { buckets }
    }
}

impl Render for TasksResult {
    fn human(&self) -> String {
        let mut out = String::new();
        for bucket in &self.buckets {
            if bucket.tasks.is_empty() {
                let _ = writeln!(out, "{}: No tasks", bucket.label);
            } else {
                let _ = writeln!(out, "{}: {}", bucket.label, bucket.tasks.join(", "));
            }
        }
        out
    }
}

/// Spreadsheet written
#[derive(Debug, Serialize)]
pub struct ExportResult {
    /// Workbook path
    pub output: PathBuf,
    /// Data rows written
    pub rows: usize,
}

impl Render for ExportResult {
    fn human(&self) -> String {
        format!("Data successfully saved to {} ({} rows).", self.output.display(), self.rows)
    }
}

/// Rated jokes and where they were saved
#[derive(Debug, Serialize)]
pub struct JokesResult {
    /// Output file
    pub output: PathBuf,
    /// Jokes, best first
    pub jokes: Vec<RatedJoke>,
}

impl Render for JokesResult {
    fn human(&self) -> String {
        format!(
            "{}\nTop jokes saved to {}",
            jokes::render_rated(&self.jokes),
            self.output.display()
        )
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Successful operation with `message`
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl Render for OperationResult {
    fn human(&self) -> String {
        self.message.clone()
    }
}
