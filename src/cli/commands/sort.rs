//! File sorter command

use std::path::PathBuf;

use toolbelt::config::Config;
use toolbelt::output::{OutputMode, Render, SortResult};
use toolbelt::sorter::{CategoryTable, sort_directory};

/// Sort `source` into category folders
pub fn sort(source: PathBuf, config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let table = CategoryTable::from_config(&config.sort);
    let report = sort_directory(&source, &table)?;
    SortResult { source, report }.render(mode);
    Ok(())
}
