use crate::config::Config;
use crate::csv_reader::load_file_report;
use crate::error::{Result, ScheduleError};
use crate::group::FileReport;
use crate::render::{Document, grand_total, render};
use crate::svg::save_svg;

use log::{info, warn};
use std::path::{Path, PathBuf};

/// Input left out of a combined schedule
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything a run produced, minus the SVG bytes
#[derive(Debug, Clone)]
pub struct Report {
    pub output: PathBuf,
    pub files: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
    pub grand_total: f64,
    pub document: Document,
    config: Config,
}

impl Report {
    /// Per-file and per-group totals in both units
    pub fn summary_lines(&self) -> Vec<String> {
        let units = &self.config.units;
        let mut lines = vec![format!("Total Area: {}", units.format_pair(self.grand_total))];

        for file in &self.files {
            lines.push(String::new());
            lines.push(format!(
                "{}: {} ({} groups)",
                file.label,
                units.format_pair(file.total),
                file.groups.len()
            ));
            for group in &file.groups {
                lines.push(format!(
                    "  {}: {} ({} items)",
                    group.key,
                    units.format_pair(group.total),
                    group.items.len()
                ));
            }
        }

        for skipped in &self.skipped {
            lines.push(format!(
                "Skipped {}: {}",
                skipped.path.display(),
                skipped.reason
            ));
        }
        lines
    }

    /// Status text shown after a successful run
    pub fn success_message(&self) -> String {
        format!(
            "SVG generated successfully: {}\nProcessed {} files\nGrand Total: {}",
            self.output.display(),
            self.files.len(),
            self.config.units.format_pair(self.grand_total)
        )
    }
}

/// Loads every input and lays out the document without writing it
pub fn build(
    inputs: &[PathBuf],
    config: &Config,
) -> Result<(Vec<FileReport>, Vec<SkippedFile>, Document)> {
    let variant = config.variant;
    if inputs.is_empty() {
        return Err(ScheduleError::NoInputs);
    }
    if variant.is_strict() && inputs.len() != 1 {
        return Err(ScheduleError::InputCount {
            variant,
            got: inputs.len(),
        });
    }

    let mut files = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();
    for path in inputs {
        info!("Processing: {}", path.display());
        match load_input(path, config) {
            Ok(report) => files.push(report),
            Err(e) if !variant.is_strict() => {
                warn!("Error processing {}: {}", path.display(), e);
                skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    if files.is_empty() {
        return Err(ScheduleError::NoValidData);
    }

    let document = render(&files, config);
    Ok((files, skipped, document))
}

/// Builds the schedule and writes it to `output`
pub fn generate<P: AsRef<Path>>(inputs: &[PathBuf], output: P, config: &Config) -> Result<Report> {
    let output = output.as_ref();
    let (files, skipped, document) = build(inputs, config)?;

    save_svg(output, &document, config)?;
    info!("SVG generated → {}", output.display());

    Ok(Report {
        output: output.to_path_buf(),
        grand_total: grand_total(&files),
        files,
        skipped,
        document,
        config: config.clone(),
    })
}

/// True when a run failed only because its inputs do not exist, whether the
/// variant stopped at the first one or skipped all of them
pub fn inputs_missing(err: &ScheduleError, inputs: &[PathBuf]) -> bool {
    match err {
        ScheduleError::NoInputs | ScheduleError::InputNotFound(_) => true,
        ScheduleError::NoValidData => inputs.iter().all(|path| !path.exists()),
        _ => false,
    }
}

fn load_input(path: &Path, config: &Config) -> Result<FileReport> {
    if !path.exists() {
        return Err(ScheduleError::InputNotFound(path.to_path_buf()));
    }
    load_file_report(path, &config.input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, format!("IFC Class,Area\n{body}")).unwrap();
        path
    }

    #[test]
    fn test_generate_floor_schedule() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(
            &dir,
            "Floor.csv",
            "Deck East,5.0\nDeck West,7.0\nStore,\nPorch,abc\nHall,9\n",
        );
        let output = dir.path().join("area_schedule.svg");

        let report = generate(&[input], &output, &Config::for_variant(Variant::Floor)).unwrap();
        assert_eq!(report.grand_total, 21.0);
        assert_eq!(report.files[0].groups.len(), 2);
        assert!(report.skipped.is_empty());

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains(">21.00 m² / 226.04 sq.ft</text>"));
        assert!(svg.contains(">(Total: 12.00 m² / 129.17 sq.ft)</text>"));
        assert!(!svg.contains("Porch"));
        assert!(!svg.contains("Store"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "GF.csv", "Living Room,20.5\nBedroom A,15\nBedroom B,12\n");
        let b = write_csv(&dir, "FF.csv", "Terrace,30\nDeck East,5\nDeck West,5\n");
        let inputs = [a, b];
        let config = Config::for_variant(Variant::Combined);

        let first = dir.path().join("first.svg");
        let second = dir.path().join("second.svg");
        generate(&inputs, &first, &config).unwrap();
        generate(&inputs, &second, &config).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_combined_skips_unreadable_files() {
        let dir = TempDir::new().unwrap();
        let good = write_csv(&dir, "GF.csv", "Hall,10\n");
        let bad_header = dir.path().join("Bad.csv");
        fs::write(&bad_header, "Name,Size\nHall,3\n").unwrap();
        let missing = dir.path().join("missing.csv");

        let inputs = [good, bad_header.clone(), missing.clone()];
        let (files, skipped, _) = build(&inputs, &Config::for_variant(Variant::Combined)).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].label, "GF");
        let skipped_paths: Vec<&PathBuf> = skipped.iter().map(|s| &s.path).collect();
        assert_eq!(skipped_paths, [&bad_header, &missing]);
    }

    #[test]
    fn test_combined_without_any_readable_file() {
        let dir = TempDir::new().unwrap();
        let inputs = [dir.path().join("missing.csv")];
        let err = build(&inputs, &Config::for_variant(Variant::Combined)).unwrap_err();
        assert!(matches!(err, ScheduleError::NoValidData));
        assert_eq!(err.to_string(), "No valid data found in CSV files");
    }

    #[test]
    fn test_combined_with_empty_files_is_well_formed() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "A.csv", "");
        let b = write_csv(&dir, "B.csv", "Store,\n");
        let (files, _, doc) = build(&[a, b], &Config::for_variant(Variant::Combined)).unwrap();
        assert!(files.iter().all(|f| f.groups.is_empty()));
        assert_eq!(doc.labels[1].text, "0.00 m² / 0.00 sq.ft");
    }

    #[test]
    fn test_missing_inputs_in_every_variant() {
        let dir = TempDir::new().unwrap();
        let missing = [dir.path().join("gone1.csv"), dir.path().join("gone2.csv")];

        let err = build(&missing, &Config::for_variant(Variant::Combined)).unwrap_err();
        assert!(matches!(err, ScheduleError::NoValidData));
        assert!(inputs_missing(&err, &missing));

        let err = build(&missing[..1], &Config::for_variant(Variant::Floor)).unwrap_err();
        assert!(inputs_missing(&err, &missing[..1]));

        assert!(inputs_missing(&ScheduleError::NoInputs, &[]));
    }

    #[test]
    fn test_unreadable_inputs_are_not_missing() {
        let dir = TempDir::new().unwrap();
        let bad_header = dir.path().join("Bad.csv");
        fs::write(&bad_header, "Name,Size\nHall,3\n").unwrap();
        let inputs = [bad_header, dir.path().join("gone.csv")];

        let err = build(&inputs, &Config::for_variant(Variant::Combined)).unwrap_err();
        assert!(matches!(err, ScheduleError::NoValidData));
        assert!(!inputs_missing(&err, &inputs));

        let err = build(&inputs[..1], &Config::for_variant(Variant::Floor)).unwrap_err();
        assert!(!inputs_missing(&err, &inputs[..1]));
    }

    #[test]
    fn test_strict_variants() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "A.csv", "Hall,1\n");
        let b = write_csv(&dir, "B.csv", "Hall,2\n");
        let config = Config::for_variant(Variant::Schedule);

        assert!(matches!(build(&[], &config), Err(ScheduleError::NoInputs)));
        assert!(matches!(
            build(&[a, b], &config),
            Err(ScheduleError::InputCount { got: 2, .. })
        ));
        assert!(matches!(
            build(&[dir.path().join("nope.csv")], &config),
            Err(ScheduleError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_summary_and_message() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "Floor.csv", "Deck East,5.0\nDeck West,7.0\nHall,9\n");
        let output = dir.path().join("out.svg");
        let report = generate(&[input], &output, &Config::default()).unwrap();

        let lines = report.summary_lines();
        assert_eq!(lines[0], "Total Area: 21.00 m² / 226.04 sq.ft");
        assert!(lines.contains(&"  Deck: 12.00 m² / 129.17 sq.ft (2 items)".to_string()));
        assert!(lines.contains(&"  Hall: 9.00 m² / 96.88 sq.ft (1 items)".to_string()));

        let message = report.success_message();
        assert!(message.starts_with("SVG generated successfully: "));
        assert!(message.contains("\nProcessed 1 files\n"));
        assert!(message.ends_with("Grand Total: 21.00 m² / 226.04 sq.ft"));
    }

    #[test]
    fn test_output_write_failure() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "Floor.csv", "Hall,9\n");
        let output = dir.path().join("no_dir").join("out.svg");
        let err = generate(&[input], &output, &Config::default()).unwrap_err();
        assert!(matches!(err, ScheduleError::CreateFile { .. }));
    }
}
