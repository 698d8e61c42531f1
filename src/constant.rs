// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1100.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 680.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Report Compare";

/// Name used for the confy config file
pub const APP_NAME: &str = "report-compare";

/// Comparison view defaults
pub const DEFAULT_SYNC_SUPPRESSION_MS: u64 = 50;
pub const DEFAULT_HIGHLIGHT_PULSE_MS: u64 = 2000;
pub const DEFAULT_REVERT_PULSE_MS: u64 = 300;
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

pub const NOTHING_TO_COMPARE: &str = "Nothing to compare";
