//! CSV table input and output.
//!
//! Timesheets and rate tables are read from CSV files whose headers match the
//! spreadsheet exports (`First Name`, `Start Time`, `Day Rate`, ...). The hours
//! and pay tables are written back as CSV, one file each, named after the
//! timesheet.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{HoursRow, PayRow, Punch, RateEntry, RateTable};

/// Default tag appended to the timesheet name for output files.
pub const DEFAULT_OUTPUT_TAG: &str = " - Payroll";

/// Default rate table file name, looked up next to the timesheet.
pub const DEFAULT_PAY_RATE_FILE: &str = "Pay Rate.csv";

/// Where the hours and pay tables for one timesheet are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// The hours table.
    pub hours: PathBuf,
    /// The pay table.
    pub pay: PathBuf,
}

impl OutputPaths {
    /// Derives output paths from the timesheet file name and a tag.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::tables::OutputPaths;
    /// use std::path::Path;
    ///
    /// let paths = OutputPaths::for_timesheet(Path::new("data/April.csv"), " - Payroll", None);
    /// assert_eq!(paths.hours, Path::new("data/April - Payroll - Hours.csv"));
    /// assert_eq!(paths.pay, Path::new("data/April - Payroll - Pay.csv"));
    /// ```
    pub fn for_timesheet(timesheet: &Path, tag: &str, output_dir: Option<&Path>) -> Self {
        let stem = timesheet
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "timesheet".to_string());
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| timesheet.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        Self {
            hours: dir.join(format!("{}{} - Hours.csv", stem, tag)),
            pay: dir.join(format!("{}{} - Pay.csv", stem, tag)),
        }
    }
}

fn read_error(path: &str, error: impl std::fmt::Display) -> EngineError {
    EngineError::TableRead {
        path: path.to_string(),
        message: error.to_string(),
    }
}

fn write_error(path: &str, error: impl std::fmt::Display) -> EngineError {
    EngineError::TableWrite {
        path: path.to_string(),
        message: error.to_string(),
    }
}

/// Deserializes every row of a CSV source. `source` names it in errors.
pub fn read_rows<T, R>(reader: R, source: &str) -> EngineResult<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .enumerate()
        // Row 1 is the header.
        .map(|(index, row)| row.map_err(|e| read_error(source, format!("row {}: {}", index + 2, e))))
        .collect()
}

/// Serializes rows with a header line.
pub fn write_rows<T, W>(writer: W, rows: &[T], destination: &str) -> EngineResult<()>
where
    T: Serialize,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| write_error(destination, e))?;
    }
    csv_writer.flush().map_err(|e| write_error(destination, e))
}

fn open(path: &Path) -> EngineResult<File> {
    File::open(path).map_err(|e| read_error(&path.display().to_string(), e))
}

/// Reads a timesheet CSV.
pub fn read_timesheet<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Punch>> {
    let path = path.as_ref();
    let punches: Vec<Punch> = read_rows(open(path)?, &path.display().to_string())?;
    debug!(path = %path.display(), rows = punches.len(), "Read timesheet");
    Ok(punches)
}

/// Reads a pay rate CSV and resolves duplicate entries.
pub fn read_rates<P: AsRef<Path>>(path: P) -> EngineResult<RateTable> {
    let path = path.as_ref();
    let entries: Vec<RateEntry> = read_rows(open(path)?, &path.display().to_string())?;
    debug!(path = %path.display(), rows = entries.len(), "Read pay rates");
    Ok(RateTable::from_entries(entries))
}

fn write_file<T: Serialize>(path: &Path, rows: &[T]) -> EngineResult<()> {
    let destination = path.display().to_string();
    let file = File::create(path).map_err(|e| write_error(&destination, e))?;
    write_rows(file, rows, &destination)?;
    debug!(path = %destination, rows = rows.len(), "Wrote table");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".partial");
    PathBuf::from(staged)
}

fn publish(staged: &Path, path: &Path) -> EngineResult<()> {
    fs::rename(staged, path).map_err(|e| write_error(&path.display().to_string(), e))
}

/// Writes the hours and pay tables.
///
/// Both tables are written to staging files first and only moved into place
/// once both writes succeed, so a failed run leaves no output behind.
pub fn write_payroll_tables(
    paths: &OutputPaths,
    hours: &[HoursRow],
    pay: &[PayRow],
) -> EngineResult<()> {
    let hours_staged = staging_path(&paths.hours);
    let pay_staged = staging_path(&paths.pay);

    let written = write_file(&hours_staged, hours)
        .and_then(|()| write_file(&pay_staged, pay))
        .and_then(|()| publish(&hours_staged, &paths.hours))
        .and_then(|()| publish(&pay_staged, &paths.pay));

    if written.is_err() {
        let _ = fs::remove_file(&hours_staged);
        let _ = fs::remove_file(&pay_staged);
    }
    written
}
