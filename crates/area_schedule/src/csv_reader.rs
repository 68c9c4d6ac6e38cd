use crate::config::InputConfig;
use crate::error::{Result, ScheduleError};
use crate::group::{FileReport, Record};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads area records from a CSV file
///
/// # Errors
/// Returns error if the file cannot be opened, the header lacks one of the
/// configured columns, or the CSV itself is malformed
pub fn read_records<P: AsRef<Path>>(path: P, input: &InputConfig) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| ScheduleError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    read_records_from_reader(file, input)
}

/// Read CSV with a header row.
/// - columns are located by name, other columns are ignored
/// - rows with a blank name, a blank area or a non-numeric area are skipped
pub fn read_records_from_reader<R: Read>(reader: R, input: &InputConfig) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true) // allow additional and missing trailing columns
        .from_reader(reader);

    let (name_idx, area_idx) = locate_columns(&mut rdr, input)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // CSV rows are 1-indexed, +1 for header

        match parse_record(&rec, name_idx, area_idx) {
            Some(record) => records.push(record),
            None => {
                debug!("Skipping row {row}: {:?}", rec);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {skipped} row(s) without a usable name and area");
    }
    Ok(records)
}

/// Reads one file and turns it into an ordered report labelled with the file stem
pub fn load_file_report<P: AsRef<Path>>(path: P, input: &InputConfig) -> Result<FileReport> {
    let path = path.as_ref();
    let records = read_records(path, input)?;
    Ok(FileReport::from_records(file_label(path), records))
}

/// File name without its extension
pub fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lists the CSV files of a directory, sorted by file name
///
/// # Errors
/// Returns `InputNotFound` if the directory is missing or holds no CSV files
pub fn collect_csv_files<P: AsRef<Path>>(dir_path: P) -> Result<Vec<PathBuf>> {
    let dir_path = dir_path.as_ref();

    if !dir_path.is_dir() {
        return Err(ScheduleError::InputNotFound(dir_path.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir_path)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ScheduleError::InputNotFound(dir_path.to_path_buf()));
    }

    files.sort();
    Ok(files)
}

/// Finds the name and area columns in the header row
fn locate_columns<R: Read>(
    csv_reader: &mut csv::Reader<R>,
    input: &InputConfig,
) -> Result<(usize, usize)> {
    let headers = csv_reader
        .headers()
        .map_err(|e| ScheduleError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    // a repeated header resolves to its last column
    let find = |column: &str| {
        headers
            .iter()
            .enumerate()
            .filter(|&(_, h)| h == column)
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| ScheduleError::CsvHeader(format!("Missing '{}' column", column)))
    };

    Ok((find(&input.name_column)?, find(&input.area_column)?))
}

fn parse_record(rec: &StringRecord, name_idx: usize, area_idx: usize) -> Option<Record> {
    let name = rec.get(name_idx).map(str::trim).unwrap_or_default();
    let area_raw = rec.get(area_idx).map(str::trim).unwrap_or_default();

    if name.is_empty() || area_raw.is_empty() {
        return None;
    }

    let area: f64 = area_raw.parse().ok()?;
    if !area.is_finite() {
        return None;
    }

    Some(Record::new(name, area))
}
