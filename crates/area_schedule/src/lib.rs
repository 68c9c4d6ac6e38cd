pub mod config;
pub mod constants;
pub mod csv_reader;
pub mod error;
pub mod group;
pub mod render;
pub mod report;
pub mod svg;

pub use config::{Config, Variant};
pub use constants::{DEFAULT_AREA_HEADER, DEFAULT_NAME_HEADER, DEFAULT_OUTPUT_FILE, SQM_TO_SQFT};
pub use csv_reader::{collect_csv_files, load_file_report, read_records};
pub use error::{Result, ScheduleError};
pub use group::{FileReport, Group, Record, aggregate, group_key, order};
pub use render::{Document, Label, StyleClass, render};
pub use report::{Report, SkippedFile, build, generate, inputs_missing};
pub use svg::{html_encode, save_svg, to_svg_string};
