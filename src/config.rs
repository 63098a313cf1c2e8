//! Application-level configuration constants.

use crate::MilesSource;

// Progress goal
pub const GOAL_MILES: u32 = 50_000;
pub const CLAIM_COUNT: u32 = 25;

// Data sources
pub const MILES_SOURCE: MilesSource = MilesSource::OfficialFile;
pub const PROGRESS_DATA_URL: &str = "./data/progress.json";
pub const STREAM_URL_KEY: &str = "tt_stream_url";
pub const MILES_KEY: &str = "tt_miles";

// Countdown
pub const COUNTDOWN_TICK_MS: u32 = 1_000;
/// 2027-01-01T00:00:00Z, in milliseconds since the Unix epoch.
pub const COUNTDOWN_TARGET_MS: i64 = 1_798_761_600_000;
pub const COUNTDOWN_LIVE_MESSAGE: &str = "We're live now!";
pub const SCHEDULE_LABEL: &str = "Weekdays • 3:00–7:00 PM EST";

// UI copy
pub const LOCKED_MILES_PLACEHOLDER: &str = "Owner-only (repo controlled)";
pub const LOCKED_SAVE_TITLE: &str = "Owner-only (edit data/progress.json in GitHub)";
pub const MILESTONE_CAPTION: &str = "Claim milestone";
