//! Sort a directory's files into category folders by extension
//!
//! `report.pdf` lands in `pdf/pdf/`, `clip.mp4` in `videos/mp4/`, anything
//! unlisted in `others/`. Only regular, non-hidden files directly inside the
//! source directory are moved. A symlink to a file counts as a file and the
//! link itself is moved; links to directories stay put.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::SortConfig;

/// Errors that stop a sort before any file is moved
#[derive(Debug, Error)]
pub enum SortError {
    /// Source path is missing or not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// IO error creating the catch-all folder
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error listing the source directory
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

/// Where a file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A listed extension
    Category {
        /// Category folder
        category: String,
        /// Extension subfolder, without the leading dot
        extension: String,
    },
    /// Anything else
    Others,
}

/// Extension to category lookup, built once from config
#[derive(Debug, Clone)]
pub struct CategoryTable {
    /// (lowercase extension with dot, category), longest extension first
    entries: Vec<(String, String)>,
    others: String,
}

impl CategoryTable {
    /// Build the table
    #[must_use]
    pub fn from_config(config: &SortConfig) -> Self {
        let mut entries: Vec<(String, String)> = config
            .categories
            .iter()
            .flat_map(|category| {
                category.extensions.iter().map(move |ext| {
                    let ext = ext.trim().to_lowercase();
                    let ext = if ext.starts_with('.') { ext } else { format!(".{ext}") };
                    (ext, category.name.clone())
                })
            })
            .collect();
        // Longest first so ".tar.gz" wins over ".gz"
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            entries,
            others: config.others.clone(),
        }
    }

    /// Name of the catch-all folder
    #[must_use]
    pub fn others(&self) -> &str {
        &self.others
    }

    /// Route a file name
    #[must_use]
    pub fn route(&self, file_name: &str) -> Route {
        let lower = file_name.to_lowercase();
        self.entries
            .iter()
            .find(|(ext, _)| lower.len() > ext.len() && lower.ends_with(ext.as_str()))
            .map_or(Route::Others, |(ext, category)| Route::Category {
                category: category.clone(),
                extension: ext.trim_start_matches('.').to_string(),
            })
    }

    /// Destination folder for a route, relative to the source directory
    #[must_use]
    pub fn destination(&self, route: &Route) -> PathBuf {
        match route {
            Route::Category {
                category,
                extension,
            } => Path::new(category).join(extension),
            Route::Others => PathBuf::from(&self.others),
        }
    }
}

/// A completed move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedFile {
    /// Where the file was
    pub from: PathBuf,
    /// New path
    pub to: PathBuf,
}

/// A file that could not be moved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedMove {
    /// The file
    pub path: PathBuf,
    /// Why it stayed
    pub reason: String,
}

/// Outcome of a sort
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortReport {
    /// Directories created along the way
    pub created_dirs: Vec<PathBuf>,
    /// Files moved
    pub moved: Vec<MovedFile>,
    /// Files left in place
    pub failed: Vec<FailedMove>,
}

impl SortReport {
    /// Whether nothing was touched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created_dirs.is_empty() && self.moved.is_empty() && self.failed.is_empty()
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Create `dir` unless it exists, recording it in the report
fn ensure_dir(dir: &Path, report: &mut SortReport) -> std::io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    log::info!("created directory {}", dir.display());
    report.created_dirs.push(dir.to_path_buf());
    Ok(())
}

/// Sort the files directly inside `source`.
///
/// An empty directory is left untouched. A failure on one file is recorded
/// and the remaining files are still processed.
pub fn sort_directory(source: &Path, table: &CategoryTable) -> Result<SortReport, SortError> {
    if !source.is_dir() {
        return Err(SortError::NotADirectory(source.to_path_buf()));
    }

    let mut report = SortReport::default();

    let mut entries = Vec::new();
    for entry in WalkDir::new(source).min_depth(1).max_depth(1).sort_by_file_name() {
        entries.push(entry?);
    }
    if entries.is_empty() {
        log::info!("{} is empty, nothing to sort", source.display());
        return Ok(report);
    }

    ensure_dir(&source.join(table.others()), &mut report)?;

    for entry in entries {
        let name = entry.file_name().to_string_lossy().to_string();
        // Follows symlinks, so a link to a file is moved as a file
        if !entry.path().is_file() || is_hidden(&name) {
            continue;
        }

        let path = entry.into_path();
        let dest_dir = source.join(table.destination(&table.route(&name)));

        if let Err(e) = ensure_dir(&dest_dir, &mut report) {
            log::warn!("error creating directory {}: {e}", dest_dir.display());
            report.failed.push(FailedMove {
                path,
                reason: format!("cannot create {}: {e}", dest_dir.display()),
            });
            continue;
        }

        let dest = dest_dir.join(&name);
        if dest.exists() {
            log::warn!("{} already exists, leaving {} in place", dest.display(), path.display());
            report.failed.push(FailedMove {
                path,
                reason: format!("{} already exists", dest.display()),
            });
            continue;
        }

        match fs::rename(&path, &dest) {
            Ok(()) => {
                log::info!("moved {} -> {}", path.display(), dest.display());
                report.moved.push(MovedFile {
                    from: path,
                    to: dest,
                });
            },
            Err(e) => {
                log::warn!("error moving {}: {e}", path.display());
                report.failed.push(FailedMove {
                    path,
                    reason: e.to_string(),
                });
            },
        }
    }

    Ok(report)
}
