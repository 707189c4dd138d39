// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of API payloads as aligned text tables or YAML.

use crate::domain::{ConfigError, DataError};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Output formats understood by [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// YAML document
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(ConfigError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// A table column: a header title and the JSON field it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header text
    pub title: &'static str,
    /// Field of each item shown in this column
    pub field: &'static str,
}

impl Column {
    /// Creates a column.
    pub const fn new(title: &'static str, field: &'static str) -> Self {
        Self { title, field }
    }
}

/// Columns for assets, scan profiles and schedules.
pub const NAMED_COLUMNS: &[Column] = &[Column::new("Name", "name"), Column::new("UUID", "uuid")];

/// Columns for scans.
pub const SCAN_COLUMNS: &[Column] = &[
    Column::new("UUID", "uuid"),
    Column::new("Status", "status"),
    Column::new("Started", "started_date"),
    Column::new("Finished", "finished_date"),
    Column::new("Vulnerabilities", "vulnerabilities_count"),
];

/// Turns items into printable text in one [`OutputFormat`].
///
/// # Examples
///
/// ```rust
/// use holmscan::render::{OutputFormat, Renderer, NAMED_COLUMNS};
/// use serde_json::json;
///
/// let renderer = Renderer::new(OutputFormat::Table);
/// let rows = vec![json!({"name": "host1", "uuid": "u-1"})];
/// assert_eq!(
///     renderer.render_rows(&rows, NAMED_COLUMNS).unwrap(),
///     "Name  | UUID\nhost1 | u-1"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    /// Creates a renderer for `format`.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Renders a list of items.
    pub fn render_rows(&self, rows: &[Value], columns: &[Column]) -> Result<String, DataError> {
        match self.format {
            OutputFormat::Table => Ok(table(rows, columns)),
            OutputFormat::Yaml => yaml(rows),
        }
    }

    /// Renders a single item.
    pub fn render_item(&self, item: &Value, columns: &[Column]) -> Result<String, DataError> {
        match self.format {
            OutputFormat::Table => Ok(table(std::slice::from_ref(item), columns)),
            OutputFormat::Yaml => yaml(item),
        }
    }
}

fn cell(item: &Value, field: &str) -> String {
    match item.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn table(rows: &[Value], columns: &[Column]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| cell(row, c.field)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.title.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(columns.iter().map(|c| c.title).collect())];
    for row in &cells {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

fn yaml<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, DataError> {
    serde_yaml::to_string(value)
        .map(|text| text.trim_end().to_string())
        .map_err(|e| DataError::MalformedPayload {
            message: format!("cannot render as YAML: {}", e),
        })
}
