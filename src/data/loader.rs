use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use super::model::{Dataset, Record, FEATURE_COLUMNS, TARGET_COLUMN};
use crate::error::{PipelineError, Result};

/// Number of positional columns in a dataset row.
const COLUMN_COUNT: usize = 6;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Reads `floor1,floor2,floor3,floor4,temperature,area` CSV files.
///
/// The header row is skipped and fields are taken by position, so header
/// spelling does not matter. Parsing is strict: the first malformed row
/// aborts the read.
#[derive(Debug, Clone)]
pub struct DatasetReader {
    path: PathBuf,
    max_records: Option<usize>,
}

impl DatasetReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetReader {
            path: path.into(),
            max_records: None,
        }
    }

    /// Stop after `max` records.
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = Some(max);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file and stream its records lazily.
    ///
    /// Every call reopens the file, so the sequence can be restarted.
    pub fn records(&self) -> Result<Records> {
        let file = File::open(&self.path).map_err(|e| PipelineError::io(&self.path, e))?;
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .trim(csv::Trim::All)
            .from_reader(file);

        Ok(Records {
            path: self.path.clone(),
            rows: reader.into_records(),
            remaining: self.max_records.unwrap_or(usize::MAX),
        })
    }

    /// Read the whole file (up to the record cap) into a [`Dataset`].
    pub fn read(&self) -> Result<Dataset> {
        let records = self.records()?.collect::<Result<Vec<_>>>()?;
        log::debug!("read {} record(s) from {}", records.len(), self.path.display());
        Ok(Dataset::from_records(records))
    }
}

/// Lazy record stream returned by [`DatasetReader::records`].
pub struct Records {
    path: PathBuf,
    rows: csv::StringRecordsIntoIter<File>,
    remaining: usize,
}

impl Iterator for Records {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let row = self.rows.next()?;
        self.remaining -= 1;

        let parsed = row
            .map_err(|e| csv_error(&self.path, e))
            .and_then(|row| parse_row(&self.path, &row));
        if parsed.is_err() {
            // Strict mode: nothing after a bad row is yielded.
            self.remaining = 0;
        }
        Some(parsed)
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_row(path: &Path, row: &StringRecord) -> Result<Record> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);
    let parse_err = |message: String| PipelineError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };

    if row.len() != COLUMN_COUNT {
        return Err(parse_err(format!(
            "expected {COLUMN_COUNT} fields, found {}",
            row.len()
        )));
    }

    let mut values = [0f32; COLUMN_COUNT];
    let names = FEATURE_COLUMNS.iter().chain(std::iter::once(&TARGET_COLUMN));
    for ((slot, raw), name) in values.iter_mut().zip(row.iter()).zip(names) {
        let value = raw
            .parse::<f32>()
            .map_err(|_| parse_err(format!("{name}: '{raw}' is not a number")))?;
        if !value.is_finite() {
            return Err(parse_err(format!("{name}: '{raw}' is not finite")));
        }
        *slot = value;
    }

    let [floor1, floor2, floor3, floor4, temperature, area] = values;
    Ok(Record {
        floor1,
        floor2,
        floor3,
        floor4,
        temperature,
        area,
    })
}

fn csv_error(path: &Path, err: csv::Error) -> PipelineError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => PipelineError::io(path, source),
        other => PipelineError::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("{other:?}"),
        },
    }
}
