//! People file to coloured spreadsheet
//!
//! Reads lines of `<name...> <profession> <age> <gender>`, colours each row
//! by a profession keyword table and writes an `.xlsx` workbook.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};
use serde::Serialize;
use thiserror::Error;

use crate::config::ExportConfig;

/// Header row of the workbook
pub const HEADER: [&str; 4] = ["Full Name", "Profession", "Age", "Gender"];

/// Errors raised by the export tool
#[derive(Debug, Error)]
pub enum ExportError {
    /// A line had fewer than four whitespace-separated fields
    #[error("line does not have enough parts: '{0}'")]
    TooFewFields(String),

    /// The age field is not a non-negative integer
    #[error("invalid age '{age}' in line '{line}'")]
    InvalidAge {
        /// The rejected line
        line: String,
        /// The age token
        age: String,
    },

    /// A palette colour could not be understood
    #[error("unknown colour '{0}'")]
    UnknownColor(String),

    /// No line of the input produced a record
    #[error("no valid data found in {0}")]
    NoData(String),

    /// Reading the input failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the workbook failed
    #[error("workbook error: {0}")]
    Workbook(#[from] XlsxError),
}

/// One row of the people file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    /// Full name, possibly several words
    pub name: String,
    /// Profession
    pub profession: String,
    /// Age in years
    pub age: u32,
    /// Gender marker
    pub gender: String,
}

/// Parse one line: every leading token is the name, the last three are
/// profession, age and gender.
pub fn parse_line(line: &str) -> Result<Person, ExportError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [name @ .., profession, age, gender] = parts.as_slice() else {
        return Err(ExportError::TooFewFields(line.trim().to_string()));
    };
    if name.is_empty() {
        return Err(ExportError::TooFewFields(line.trim().to_string()));
    }

    let age = age.parse::<u32>().map_err(|_| ExportError::InvalidAge {
        line: line.trim().to_string(),
        age: (*age).to_string(),
    })?;

    Ok(Person {
        name: name.join(" "),
        profession: (*profession).to_string(),
        age,
        gender: (*gender).to_string(),
    })
}

/// Read all valid records from `path`. Bad lines are logged and skipped.
pub fn read_people(path: &Path) -> Result<Vec<Person>, ExportError> {
    let content = fs::read_to_string(path)?;
    let mut people = Vec::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        match parse_line(line) {
            Ok(person) => people.push(person),
            Err(e) => log::warn!("skipping line: {e}"),
        }
    }
    Ok(people)
}

/// Named colours understood in the palette, as RGB
const NAMED_COLORS: [(&str, u32); 14] = [
    ("black", 0x00_0000),
    ("blue", 0x00_00FF),
    ("brown", 0x80_0000),
    ("cyan", 0x00_FFFF),
    ("gray", 0x80_8080),
    ("green", 0x00_8000),
    ("grey", 0x80_8080),
    ("orange", 0xFF_6600),
    ("pink", 0xFF_C0CB),
    ("purple", 0x80_0080),
    ("red", 0xFF_0000),
    ("tomato", 0xFF_6347),
    ("white", 0xFF_FFFF),
    ("yellow", 0xFF_FF00),
];

/// Resolve a colour name or `#RRGGBB` to RGB
pub fn parse_color(value: &str) -> Result<u32, ExportError> {
    let lower = value.trim().to_lowercase();
    if let Some(hex) = lower.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(rgb) = u32::from_str_radix(hex, 16) {
                return Ok(rgb);
            }
        }
        return Err(ExportError::UnknownColor(value.to_string()));
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| *rgb)
        .ok_or_else(|| ExportError::UnknownColor(value.to_string()))
}

/// Profession keyword to row colour lookup, built once from config
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<(String, String)>,
    default_color: String,
}

impl Palette {
    /// Build and validate the palette
    pub fn from_config(config: &ExportConfig) -> Result<Self, ExportError> {
        parse_color(&config.default_color)?;
        let mut entries = Vec::with_capacity(config.palette.len());
        for entry in &config.palette {
            parse_color(&entry.color)?;
            entries.push((entry.keyword.to_lowercase(), entry.color.to_lowercase()));
        }
        Ok(Self {
            entries,
            default_color: config.default_color.to_lowercase(),
        })
    }

    /// Colour name for a profession: the first keyword contained in it
    #[must_use]
    pub fn color_for(&self, profession: &str) -> &str {
        let profession = profession.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| profession.contains(keyword.as_str()))
            .map_or(self.default_color.as_str(), |(_, color)| color.as_str())
    }
}

/// Write `people` (sorted by profession) to a workbook at `path`
pub fn write_workbook(path: &Path, people: &[Person], palette: &Palette) -> Result<(), ExportError> {
    let mut sorted: Vec<&Person> = people.iter().collect();
    sorted.sort_by(|a, b| a.profession.cmp(&b.profession));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, title) in (0u16..).zip(HEADER) {
        worksheet.write_string(0, col, title)?;
    }

    for (row, person) in (1u32..).zip(sorted) {
        let rgb = parse_color(palette.color_for(&person.profession))?;
        let format = Format::new()
            .set_background_color(Color::RGB(rgb))
            .set_font_color(Color::Black);
        worksheet.write_string_with_format(row, 0, &person.name, &format)?;
        worksheet.write_string_with_format(row, 1, &person.profession, &format)?;
        worksheet.write_number_with_format(row, 2, person.age, &format)?;
        worksheet.write_string_with_format(row, 3, &person.gender, &format)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Read `input`, write `output`, return the number of rows written
pub fn export_file(input: &Path, output: &Path, palette: &Palette) -> Result<usize, ExportError> {
    let people = read_people(input)?;
    if people.is_empty() {
        return Err(ExportError::NoData(input.display().to_string()));
    }
    write_workbook(output, &people, palette)?;
    log::info!("wrote {} rows to {}", people.len(), output.display());
    Ok(people.len())
}
