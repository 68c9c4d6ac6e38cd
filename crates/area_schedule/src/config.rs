use crate::{
    constants::*,
    error::{Result, ScheduleError},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which of the schedule layouts to generate
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Variant {
    /// Single file, titled with the file name
    Schedule,
    /// Single file, headed by the total area
    #[default]
    Floor,
    /// Several files in one document, headed by the grand total
    Combined,
}

impl Variant {
    /// Strict variants abort on the first unreadable file
    pub fn is_strict(self) -> bool {
        !matches!(self, Variant::Combined)
    }

    pub fn shows_file_headers(self) -> bool {
        matches!(self, Variant::Combined)
    }

    pub fn default_heading(self) -> Option<&'static str> {
        match self {
            Variant::Schedule => None,
            Variant::Floor => Some(FLOOR_HEADING),
            Variant::Combined => Some(COMBINED_HEADING),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(skip)]
    pub variant: Variant,
    /// Overrides the heading text (the file name for `schedule`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub units: UnitsConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub name_x: f64,
    /// right edge of the area column
    pub area_x: f64,
    pub indent: f64,
    pub start_y: f64,
    pub title_y: f64,
    pub total_y: f64,
    pub row_gap: f64,
    pub group_gap: f64,
    pub file_title_gap: f64,
    pub file_gap: f64,
    pub bottom_margin: f64,
}

impl LayoutConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let base = Self {
            page_width: 1100.0,
            page_height: 800.0,
            name_x: START_X_NAME,
            area_x: 1000.0,
            indent: ITEM_INDENT,
            start_y: 180.0,
            title_y: 80.0,
            total_y: 130.0,
            row_gap: ROW_GAP,
            group_gap: GROUP_GAP,
            file_title_gap: FILE_TITLE_GAP,
            file_gap: 0.0,
            bottom_margin: BOTTOM_MARGIN,
        };
        match variant {
            Variant::Schedule => Self {
                page_width: 900.0,
                page_height: 1400.0,
                area_x: 750.0,
                start_y: 160.0,
                title_y: 90.0,
                ..base
            },
            Variant::Floor => base,
            Variant::Combined => Self {
                page_height: 3000.0,
                file_gap: FILE_GAP,
                ..base
            },
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font_regular: String,
    pub font_light: String,
    /// web font stylesheet pulled in with `@import`; empty disables it
    pub font_import_url: String,
    pub main_title_size: f64,
    pub file_title_size: f64,
    pub group_size: f64,
    pub item_size: f64,
    pub title_color: String,
    pub main_title_color: String,
    pub file_title_color: String,
    pub group_color: String,
    pub item_color: String,
    pub area_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_regular: FONT_FAMILY_REGULAR.to_string(),
            font_light: FONT_FAMILY_LIGHT.to_string(),
            font_import_url: FONT_IMPORT_URL.to_string(),
            main_title_size: FONT_SIZE_MAIN_TITLE,
            file_title_size: FONT_SIZE_FILE_TITLE,
            group_size: FONT_SIZE_GROUP,
            item_size: FONT_SIZE_ITEM,
            title_color: COLOR_TITLE.to_string(),
            main_title_color: COLOR_MAIN_TITLE.to_string(),
            file_title_color: COLOR_FILE_TITLE.to_string(),
            group_color: COLOR_GROUP.to_string(),
            item_color: COLOR_ITEM.to_string(),
            area_color: COLOR_AREA.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UnitsConfig {
    pub primary_unit: String,
    pub secondary_unit: String,
    /// primary -> secondary factor
    pub conversion: f64,
    /// decimal places for both units
    pub precision: usize,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            primary_unit: PRIMARY_UNIT.to_string(),
            secondary_unit: SECONDARY_UNIT.to_string(),
            conversion: SQM_TO_SQFT,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl UnitsConfig {
    /// Rounds to the configured number of decimal places
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.precision as i32);
        (value * scale).round() / scale
    }

    pub fn primary(&self, area: f64) -> f64 {
        self.round(area)
    }

    /// Converted from the unrounded value
    pub fn secondary(&self, area: f64) -> f64 {
        self.round(area * self.conversion)
    }

    /// "20.50 m² / 220.66 sq.ft"
    pub fn format_pair(&self, area: f64) -> String {
        let p = self.precision;
        format!(
            "{:.p$}{} / {:.p$}{}",
            self.primary(area),
            self.primary_unit,
            self.secondary(area),
            self.secondary_unit,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub name_column: String,
    pub area_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            name_column: DEFAULT_NAME_HEADER.to_string(),
            area_column: DEFAULT_AREA_HEADER.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl Config {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            title: None,
            layout: LayoutConfig::for_variant(variant),
            style: StyleConfig::default(),
            units: UnitsConfig::default(),
            input: InputConfig::default(),
        }
    }

    /// Reads a TOML file and lays its values over the variant defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P, variant: Variant) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScheduleError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content, variant).map_err(|e| {
            ScheduleError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn from_toml_str(content: &str, variant: Variant) -> Result<Self> {
        let overrides: toml::Table = toml::from_str(content)?;

        let mut merged = match toml::Value::try_from(Self::for_variant(variant))? {
            toml::Value::Table(table) => table,
            other => {
                return Err(ScheduleError::Config(format!(
                    "defaults did not encode as a table: {}",
                    other.type_str()
                )));
            }
        };
        merge_tables(&mut merged, overrides);

        let mut config: Config = toml::Value::Table(merged).try_into()?;
        config.variant = variant;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        for (label, value) in [
            ("page_width", layout.page_width),
            ("page_height", layout.page_height),
            ("name_x", layout.name_x),
            ("area_x", layout.area_x),
            ("indent", layout.indent),
            ("start_y", layout.start_y),
            ("title_y", layout.title_y),
            ("total_y", layout.total_y),
            ("row_gap", layout.row_gap),
            ("group_gap", layout.group_gap),
            ("file_title_gap", layout.file_title_gap),
            ("file_gap", layout.file_gap),
            ("bottom_margin", layout.bottom_margin),
        ] {
            if !value.is_finite() {
                return Err(ScheduleError::Config(format!(
                    "{label} must be a finite number, got {value}"
                )));
            }
        }
        // spacing only ever moves the cursor down
        for (label, value) in [
            ("indent", layout.indent),
            ("group_gap", layout.group_gap),
            ("file_title_gap", layout.file_title_gap),
            ("file_gap", layout.file_gap),
            ("bottom_margin", layout.bottom_margin),
        ] {
            if value < 0.0 {
                return Err(ScheduleError::Config(format!(
                    "{label} cannot be negative, got {value}"
                )));
            }
        }
        if layout.page_width <= 0.0 || layout.page_height <= 0.0 {
            return Err(ScheduleError::Config(format!(
                "page size must be positive, got {}x{}",
                layout.page_width, layout.page_height
            )));
        }
        if layout.row_gap <= 0.0 {
            return Err(ScheduleError::Config(format!(
                "row_gap must be positive, got {}",
                layout.row_gap
            )));
        }
        if layout.area_x <= layout.name_x {
            return Err(ScheduleError::Config(format!(
                "area_x ({}) must be right of name_x ({})",
                layout.area_x, layout.name_x
            )));
        }

        let units = &self.units;
        if !units.conversion.is_finite() || units.conversion <= 0.0 {
            return Err(ScheduleError::Config(format!(
                "conversion must be a positive number, got {}",
                units.conversion
            )));
        }
        if units.precision > MAX_PRECISION {
            return Err(ScheduleError::Config(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, units.precision
            )));
        }

        if self.input.name_column.trim().is_empty() || self.input.area_column.trim().is_empty() {
            return Err(ScheduleError::Config(
                "name_column and area_column cannot be empty".to_string(),
            ));
        }

        let style = &self.style;
        for (label, size) in [
            ("main_title_size", style.main_title_size),
            ("file_title_size", style.file_title_size),
            ("group_size", style.group_size),
            ("item_size", style.item_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ScheduleError::Config(format!(
                    "{label} must be a positive number, got {size}"
                )));
            }
        }

        Ok(())
    }
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        if let toml::Value::Table(src) = value {
            if let Some(toml::Value::Table(dst)) = base.get_mut(&key) {
                merge_tables(dst, src);
                continue;
            }
            base.insert(key, toml::Value::Table(src));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_variant_defaults() {
        let schedule = Config::for_variant(Variant::Schedule);
        assert_eq!(schedule.layout.page_width, 900.0);
        assert_eq!(schedule.layout.area_x, 750.0);
        assert_eq!(schedule.layout.start_y, 160.0);

        let combined = Config::for_variant(Variant::Combined);
        assert_eq!(combined.layout.page_height, 3000.0);
        assert_eq!(combined.layout.file_gap, 40.0);

        let floor = Config::default();
        assert_eq!(floor.variant, Variant::Floor);
        assert_eq!(floor.layout.file_gap, 0.0);
    }

    #[test]
    fn test_partial_toml_overrides_keep_other_defaults() {
        let toml = r#"
title = "Ground Floor"

[layout]
row_gap = 30
page_width = 1200.5

[units]
precision = 1
"#;
        let config = Config::from_toml_str(toml, Variant::Combined).unwrap();
        assert_eq!(config.variant, Variant::Combined);
        assert_eq!(config.title.as_deref(), Some("Ground Floor"));
        assert_eq!(config.layout.row_gap, 30.0);
        assert_eq!(config.layout.page_width, 1200.5);
        // untouched values come from the combined defaults
        assert_eq!(config.layout.page_height, 3000.0);
        assert_eq!(config.layout.file_gap, 40.0);
        assert_eq!(config.units.precision, 1);
        assert_eq!(config.units.conversion, SQM_TO_SQFT);
        assert_eq!(config.input.name_column, DEFAULT_NAME_HEADER);
    }

    #[test]
    fn test_empty_toml_is_variant_default() {
        let config = Config::from_toml_str("", Variant::Schedule).unwrap();
        assert_eq!(config, Config::for_variant(Variant::Schedule));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            "[layout]\nrow_gap = 0",
            "[layout]\narea_x = 50",
            "[units]\nconversion = -1.0",
            "[units]\nprecision = 9",
            "[input]\narea_column = \" \"",
            "[style]\nitem_size = 0",
            "[style]\ngroup_size = inf",
            "[layout]\nrow_gap = nan",
            "[layout]\narea_x = nan",
            "[layout]\npage_width = inf",
            "[layout]\nstart_y = -inf",
            "[layout]\nbottom_margin = -2000",
            "[layout]\ngroup_gap = -1",
            "[layout]\nfile_gap = -40",
            "[layout]\nindent = -20",
        ];
        for toml in bad {
            let err = Config::from_toml_str(toml, Variant::Floor).unwrap_err();
            assert!(matches!(err, ScheduleError::Config(_)), "{toml}: {err}");
        }
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("[layout\nrow_gap = 1", Variant::Floor).unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[input]\nname_column = \"Space\"").unwrap();

        let config = Config::load_from_file(file.path(), Variant::Floor).unwrap();
        assert_eq!(config.input.name_column, "Space");
        assert_eq!(config.input.area_column, DEFAULT_AREA_HEADER);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from_file("no/such/config.toml", Variant::Floor).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_format_pair_rounds_each_unit_from_raw_value() {
        let units = UnitsConfig::default();
        assert_eq!(units.format_pair(20.5), "20.50 m² / 220.66 sq.ft");
        assert_eq!(units.format_pair(0.0), "0.00 m² / 0.00 sq.ft");

        // 12.004 rounds to 12.00, but the conversion uses 12.004
        assert_eq!(units.primary(12.004), 12.0);
        assert_eq!(units.secondary(12.004), units.round(12.004 * SQM_TO_SQFT));
        assert_ne!(units.secondary(12.004), units.round(12.0 * SQM_TO_SQFT));
    }
}
