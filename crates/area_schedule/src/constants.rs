/// Expected headers in CSV files
pub const DEFAULT_NAME_HEADER: &str = "IFC Class"; // category name column
pub const DEFAULT_AREA_HEADER: &str = "Area"; // area column (m²)

/// unit conversion m² -> sq.ft
pub const SQM_TO_SQFT: f64 = 10.7639;
pub const PRIMARY_UNIT: &str = " m²";
pub const SECONDARY_UNIT: &str = " sq.ft";
pub const DEFAULT_PRECISION: usize = 2;
pub const MAX_PRECISION: usize = 6;

/// Default output file
pub const DEFAULT_OUTPUT_FILE: &str = "area_schedule.svg";

/// Headings
pub const FLOOR_HEADING: &str = "AREA SCHEDULE";
pub const COMBINED_HEADING: &str = "TOTAL CARPET AREA";

/// Fonts
pub const FONT_FAMILY_REGULAR: &str = "Roboto";
pub const FONT_FAMILY_LIGHT: &str = "Roboto Light";
pub const FONT_IMPORT_URL: &str =
    "https://fonts.googleapis.com/css2?family=Roboto:wght@300;400&display=swap";

/// Font sizes (px)
pub const FONT_SIZE_MAIN_TITLE: f64 = 36.0;
pub const FONT_SIZE_FILE_TITLE: f64 = 30.0;
pub const FONT_SIZE_GROUP: f64 = 24.0;
pub const FONT_SIZE_ITEM: f64 = 20.0;
pub const TITLE_SIZE_BONUS: f64 = 8.0; // schedule title = group + 8

/// Colors
pub const COLOR_TITLE: &str = "#000";
pub const COLOR_MAIN_TITLE: &str = "#000000";
pub const COLOR_FILE_TITLE: &str = "#333333";
pub const COLOR_GROUP: &str = "#000000";
pub const COLOR_ITEM: &str = "#222222";
pub const COLOR_AREA: &str = "#444444";

/// Layout (px)
pub const START_X_NAME: f64 = 100.0;
pub const ITEM_INDENT: f64 = 20.0;
pub const ROW_GAP: f64 = 42.0;
pub const GROUP_GAP: f64 = 12.0;
pub const FILE_TITLE_GAP: f64 = 10.0;
pub const FILE_GAP: f64 = 40.0;
pub const BOTTOM_MARGIN: f64 = 100.0;
