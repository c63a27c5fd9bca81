//! Spreadsheet export command

use std::path::PathBuf;

use toolbelt::config::Config;
use toolbelt::export::{Palette, export_file};
use toolbelt::output::{ExportResult, OutputMode, Render};

/// Read the people file and write the workbook
pub fn export(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from(&config.export.input));
    let output = output.unwrap_or_else(|| PathBuf::from(&config.export.output));
    let palette = Palette::from_config(&config.export)?;

    let rows = export_file(&input, &output, &palette)?;
    ExportResult { output, rows }.render(mode);
    Ok(())
}
