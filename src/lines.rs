use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// One row of the input line table: a display name and the text to speak.
#[derive(Debug, Clone, Deserialize)]
pub struct LineRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Line")]
    pub line: String,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open line table {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("line table is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("failed to parse line table: {0}")]
    Parse(#[from] csv::Error),
}

const REQUIRED_COLUMNS: [&str; 2] = ["Name", "Line"];

/// Replace every space in a display name with a hyphen so it can serve as
/// a WAV base name. Idempotent on names that contain no spaces.
pub fn sanitize_name(name: &str) -> String {
    name.replace(' ', "-")
}

/// Load the whole line table into memory, in row order.
///
/// The header row must carry both `Name` and `Line`; a missing column
/// fails the run before any row is processed.
pub fn read_lines(path: &Path) -> Result<Vec<LineRecord>, TableError> {
    let file = File::open(path).map_err(|source| TableError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(TableError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
