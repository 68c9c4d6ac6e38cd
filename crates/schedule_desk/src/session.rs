use crate::config::Config;
use area_schedule::{DEFAULT_OUTPUT_FILE, ScheduleError};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of one command, shown on the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl Status {
    pub fn message(&self) -> &str {
        match self {
            Status::Info(m) | Status::Success(m) | Status::Warning(m) | Status::Error(m) => m,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Info(m) | Status::Success(m) => write!(f, "{m}"),
            Status::Warning(m) => write!(f, "Warning: {m}"),
            Status::Error(m) => write!(f, "Error: {m}"),
        }
    }
}

/// Pending input files and the output name of one desk session
#[derive(Debug)]
pub struct Session {
    files: Vec<PathBuf>,
    selected: Option<usize>,
    output_name: String,
    config: area_schedule::Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            files: Vec::new(),
            selected: None,
            output_name: config.output_name,
            config: config.schedule,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Appends the paths not already listed
    pub fn add_files<I, P>(&mut self, paths: I) -> Status
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut given = 0;
        for path in paths {
            given += 1;
            let path = path.into();
            if !self.files.contains(&path) {
                self.files.push(path);
            }
        }
        Status::Info(format!(
            "Added {given} file(s). Total: {}",
            self.files.len()
        ))
    }

    pub fn clear_all(&mut self) -> Status {
        self.files.clear();
        self.selected = None;
        Status::Info("All files cleared".to_string())
    }

    pub fn select(&mut self, index: usize) -> Status {
        match self.files.get(index) {
            Some(path) => {
                self.selected = Some(index);
                Status::Info(format!("Selected {}", display_name(path)))
            }
            None => Status::Warning(format!("No file at position {}", index + 1)),
        }
    }

    /// Drops the selected file; nothing happens without a selection
    pub fn remove_selected(&mut self) -> Option<Status> {
        let index = self.selected.take()?;
        if index >= self.files.len() {
            return None;
        }
        self.files.remove(index);
        Some(Status::Info(format!(
            "File removed. Total: {}",
            self.files.len()
        )))
    }

    pub fn move_up(&mut self) -> Option<Status> {
        let index = self.selected?;
        if index == 0 || index >= self.files.len() {
            return None;
        }
        self.files.swap(index, index - 1);
        self.selected = Some(index - 1);
        Some(Status::Info(format!("Moved to position {index}")))
    }

    pub fn move_down(&mut self) -> Option<Status> {
        let index = self.selected?;
        if index + 1 >= self.files.len() {
            return None;
        }
        self.files.swap(index, index + 1);
        self.selected = Some(index + 1);
        Some(Status::Info(format!("Moved to position {}", index + 2)))
    }

    pub fn set_output_name(&mut self, name: &str) -> Status {
        self.output_name = name.to_string();
        Status::Info(format!("Output: {}", self.output_path().display()))
    }

    /// Output name with blanks trimmed and the `.svg` extension ensured
    pub fn output_path(&self) -> PathBuf {
        let name = self.output_name.trim();
        if name.is_empty() {
            return PathBuf::from(DEFAULT_OUTPUT_FILE);
        }
        if name.to_lowercase().ends_with(".svg") {
            PathBuf::from(name)
        } else {
            PathBuf::from(format!("{name}.svg"))
        }
    }

    /// Numbered listing, the selected entry marked with `>`
    pub fn list_lines(&self) -> Vec<String> {
        if self.files.is_empty() {
            return vec!["No files added".to_string()];
        }
        self.files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let marker = if self.selected == Some(i) { '>' } else { ' ' };
                format!("{marker} {:>2}. {}", i + 1, display_name(path))
            })
            .collect()
    }

    /// Runs the combined schedule over the listed files
    pub fn generate(&self) -> Status {
        if self.files.is_empty() {
            return Status::Warning("Please add CSV files first.".to_string());
        }

        let output = self.output_path();
        match area_schedule::generate(&self.files, &output, &self.config) {
            Ok(report) => {
                for line in report.summary_lines() {
                    info!("{line}");
                }
                Status::Success(report.success_message())
            }
            Err(e @ (ScheduleError::CreateFile { .. } | ScheduleError::WriteFile { .. })) => {
                Status::Error(format!("Error writing SVG file: {e}"))
            }
            Err(e) => Status::Error(e.to_string()),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
