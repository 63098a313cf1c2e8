use log::{debug, warn};
use serde::Deserialize;
use std::fmt;

pub mod config;
pub mod fetch;
pub mod logging;
pub mod storage;
pub mod utils;

use config::{CLAIM_COUNT, GOAL_MILES};
use utils::{coerce_number, group_thousands};

/// Where the authoritative miles value comes from.
///
/// `OfficialFile` treats `data/progress.json` as read-only and locks the
/// editor. `LocalStorage` lets whoever owns the browser edit the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilesSource {
    OfficialFile,
    LocalStorage,
}

impl MilesSource {
    /// Whether the miles editor accepts input for this source.
    pub fn is_editable(self) -> bool {
        matches!(self, MilesSource::LocalStorage)
    }
}

/// Fixed goal parameters: total miles and number of evenly spaced claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub goal_miles: u32,
    pub claim_count: u32,
}

impl Default for Goal {
    fn default() -> Self {
        Goal {
            goal_miles: GOAL_MILES,
            claim_count: CLAIM_COUNT,
        }
    }
}

impl Goal {
    pub fn step_size(&self) -> u32 {
        if self.claim_count == 0 {
            self.goal_miles
        } else {
            self.goal_miles / self.claim_count
        }
    }

    /// Clamp an arbitrary numeric value into `[0, goal_miles]`, truncating
    /// fractions. NaN counts as zero.
    pub fn clamp_miles(&self, raw: f64) -> u32 {
        if raw.is_nan() || raw <= 0.0 {
            0
        } else if raw >= self.goal_miles as f64 {
            self.goal_miles
        } else {
            raw.trunc() as u32
        }
    }
}

/// A single claim threshold and whether the current total has reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub index: u32,
    pub target_miles: u32,
    pub unlocked: bool,
}

impl Milestone {
    pub fn heading(&self) -> String {
        format!("{}) {} miles", self.index, group_thousands(self.target_miles))
    }

    pub fn status_label(&self) -> &'static str {
        if self.unlocked {
            "Unlocked"
        } else {
            "Locked"
        }
    }
}

/// Compute every milestone for `miles` against `goal`.
///
/// The list is rebuilt from scratch on each call, so the same input always
/// yields the same list.
pub fn compute_milestones(goal: &Goal, miles: u32) -> Vec<Milestone> {
    let step = goal.step_size();
    (1..=goal.claim_count)
        .map(|index| {
            let target_miles = index * step;
            Milestone {
                index,
                target_miles,
                unlocked: miles >= target_miles,
            }
        })
        .collect()
}

/// Current progress toward the goal. `current_miles` never leaves
/// `[0, goal.goal_miles]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    current_miles: u32,
    goal: Goal,
}

impl Default for ProgressState {
    fn default() -> Self {
        ProgressState::new(Goal::default(), 0.0)
    }
}

impl ProgressState {
    pub fn new(goal: Goal, raw_miles: f64) -> Self {
        let current_miles = goal.clamp_miles(raw_miles);
        if current_miles as f64 != raw_miles {
            debug!("Miles value {} clamped to {}", raw_miles, current_miles);
        }
        ProgressState {
            current_miles,
            goal,
        }
    }

    /// Build a state from an untrusted string, coercing anything
    /// non-numeric to zero.
    pub fn from_text(goal: Goal, raw: &str) -> Self {
        ProgressState::new(goal, coerce_number(raw))
    }

    pub fn current_miles(&self) -> u32 {
        self.current_miles
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Percentage of the goal reached, within `[0.0, 100.0]`.
    pub fn percent(&self) -> f64 {
        if self.goal.goal_miles == 0 {
            return 100.0;
        }
        let pct = self.current_miles as f64 * 100.0 / self.goal.goal_miles as f64;
        pct.clamp(0.0, 100.0)
    }

    pub fn miles_label(&self) -> String {
        group_thousands(self.current_miles)
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent())
    }

    /// CSS width for the progress bar fill.
    pub fn bar_width(&self) -> String {
        format!("{}%", self.percent())
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        compute_milestones(&self.goal, self.current_miles)
    }
}

/// Two-state live indicator; driven only by whether a stream is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveStatus {
    Live,
    Offline,
}

impl LiveStatus {
    pub fn from_stream_url(url: &str) -> Self {
        if url.trim().is_empty() {
            LiveStatus::Offline
        } else {
            LiveStatus::Live
        }
    }

    pub fn is_live(self) -> bool {
        self == LiveStatus::Live
    }
}

/// Trim a user-entered stream URL into the form that gets persisted.
pub fn normalize_stream_url(raw: &str) -> String {
    raw.trim().to_string()
}

/// Remaining time until the countdown target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Live,
    Remaining {
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: u64,
    },
}

impl Countdown {
    /// Compute the countdown between `now_ms` and `target_ms` (both epoch
    /// milliseconds). Partial seconds round up so a running countdown never
    /// shows `0s`.
    pub fn between(now_ms: i64, target_ms: i64) -> Self {
        let remaining_ms = target_ms.saturating_sub(now_ms);
        if remaining_ms <= 0 {
            return Countdown::Live;
        }
        let total_secs = (remaining_ms as u64).div_ceil(1000);
        Countdown::Remaining {
            days: total_secs / 86_400,
            hours: (total_secs % 86_400) / 3_600,
            minutes: (total_secs % 3_600) / 60,
            seconds: total_secs % 60,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Countdown::Live)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Countdown::Live => write!(f, "{}", config::COUNTDOWN_LIVE_MESSAGE),
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => {
                if days > 0 {
                    write!(f, "{}d {}h {}m {}s", days, hours, minutes, seconds)
                } else if hours > 0 {
                    write!(f, "{}h {}m {}s", hours, minutes, seconds)
                } else if minutes > 0 {
                    write!(f, "{}m {}s", minutes, seconds)
                } else {
                    write!(f, "{}s", seconds)
                }
            }
        }
    }
}

/// Errors raised while loading the official progress file.
#[derive(Debug)]
pub enum ProgressError {
    /// No browser window, or the request could not be built or sent.
    Unavailable(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was not valid JSON of the expected shape.
    Malformed(String),
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressError::Unavailable(reason) => {
                write!(f, "Progress data unavailable: {}", reason)
            }
            ProgressError::Status(code) => {
                write!(f, "Missing progress data (HTTP {})", code)
            }
            ProgressError::Malformed(reason) => {
                write!(f, "Malformed progress data: {}", reason)
            }
        }
    }
}

impl std::error::Error for ProgressError {}

#[derive(Debug, Deserialize)]
struct ProgressPayload {
    #[serde(default)]
    miles: serde_json::Value,
}

/// Parse the body of the progress file and return its raw miles value.
///
/// Numbers are taken as-is, numeric strings are coerced and booleans count
/// as 1 or 0. A missing or non-numeric `miles` field yields `0.0`; a body that is not a JSON object
/// is an error.
pub fn parse_progress_payload(body: &str) -> Result<f64, ProgressError> {
    let payload: ProgressPayload =
        serde_json::from_str(body).map_err(|e| ProgressError::Malformed(e.to_string()))?;

    let miles = match &payload.miles {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => coerce_number(s),
        serde_json::Value::Bool(b) => f64::from(u8::from(*b)),
        serde_json::Value::Null => 0.0,
        other => {
            warn!("Ignoring non-numeric miles value: {}", other);
            0.0
        }
    };
    Ok(miles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_size_matches_goal() {
        let goal = Goal::default();
        assert_eq!(goal.step_size(), 2_000);
    }

    #[test]
    fn percent_is_proportional_and_clamped() {
        let goal = Goal::default();
        for miles in [0u32, 1, 1_999, 12_345, 25_000, 49_999, 50_000] {
            let state = ProgressState::new(goal, miles as f64);
            let expected = miles as f64 * 100.0 / 50_000.0;
            assert!((state.percent() - expected).abs() < 1e-9);
            assert!((0.0..=100.0).contains(&state.percent()));
        }
    }

    #[test]
    fn over_goal_clamps_to_goal() {
        let state = ProgressState::new(Goal::default(), 72_000.0);
        assert_eq!(state.current_miles(), 50_000);
        assert_eq!(state.miles_label(), "50,000");
        assert_eq!(state.percent_label(), "100.0%");
        assert_eq!(state.bar_width(), "100%");
        assert!(state.milestones().iter().all(|m| m.unlocked));
    }

    #[test]
    fn negative_and_garbage_render_as_zero() {
        let goal = Goal::default();
        for state in [
            ProgressState::new(goal, -10.0),
            ProgressState::new(goal, f64::NAN),
            ProgressState::from_text(goal, "lots"),
            ProgressState::from_text(goal, ""),
        ] {
            assert_eq!(state.current_miles(), 0);
            assert_eq!(state.miles_label(), "0");
            assert_eq!(state.percent_label(), "0.0%");
            assert!(state.milestones().iter().all(|m| !m.unlocked));
        }
    }

    #[test]
    fn infinity_counts_as_goal() {
        let state = ProgressState::new(Goal::default(), f64::INFINITY);
        assert_eq!(state.current_miles(), 50_000);
    }

    #[test]
    fn fractional_miles_truncate() {
        let state = ProgressState::new(Goal::default(), 24_000.9);
        assert_eq!(state.current_miles(), 24_000);
    }

    #[test]
    fn example_24000_miles() {
        let state = ProgressState::new(Goal::default(), 24_000.0);
        assert_eq!(state.miles_label(), "24,000");
        assert_eq!(state.percent_label(), "48.0%");
        assert_eq!(state.bar_width(), "48%");

        let milestones = state.milestones();
        assert_eq!(milestones.len(), 25);
        let twelfth = &milestones[11];
        assert_eq!(twelfth.target_miles, 24_000);
        assert!(twelfth.unlocked);
        assert_eq!(twelfth.heading(), "12) 24,000 miles");
        assert_eq!(twelfth.status_label(), "Unlocked");
        let thirteenth = &milestones[12];
        assert_eq!(thirteenth.target_miles, 26_000);
        assert!(!thirteenth.unlocked);
        assert_eq!(thirteenth.status_label(), "Locked");
    }

    #[test]
    fn milestone_targets_step_by_two_thousand() {
        let goal = Goal::default();
        let miles = 31_337;
        for m in compute_milestones(&goal, miles) {
            assert_eq!(m.target_miles, m.index * 2_000);
            assert_eq!(m.unlocked, miles >= m.target_miles);
        }
        let last = compute_milestones(&goal, 0).pop().unwrap();
        assert_eq!(last.index, 25);
        assert_eq!(last.target_miles, 50_000);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let a = ProgressState::new(Goal::default(), 17_500.0);
        let b = ProgressState::new(Goal::default(), 17_500.0);
        assert_eq!(a.milestones(), b.milestones());
        assert_eq!(a.milestones(), a.milestones());
        assert_eq!(a.percent_label(), b.percent_label());
    }

    #[test]
    fn one_decimal_percent() {
        let state = ProgressState::new(Goal::default(), 12_345.0);
        assert_eq!(state.percent_label(), "24.7%");
    }

    #[test]
    fn live_status_follows_url() {
        assert_eq!(LiveStatus::from_stream_url(""), LiveStatus::Offline);
        assert_eq!(LiveStatus::from_stream_url("   "), LiveStatus::Offline);
        assert!(LiveStatus::from_stream_url("https://player.twitch.tv/?channel=x").is_live());
    }

    #[test]
    fn stream_url_is_trimmed() {
        assert_eq!(
            normalize_stream_url("  https://example.com/embed \n"),
            "https://example.com/embed"
        );
        assert_eq!(normalize_stream_url("\t "), "");
    }

    #[test]
    fn countdown_five_seconds_out() {
        let target = 1_700_000_000_000;
        let countdown = Countdown::between(target - 5_000, target);
        assert_eq!(countdown.to_string(), "5s");
    }

    #[test]
    fn countdown_rounds_partial_seconds_up() {
        let target = 1_700_000_000_000;
        assert_eq!(Countdown::between(target - 4_200, target).to_string(), "5s");
        assert_eq!(Countdown::between(target - 1, target).to_string(), "1s");
    }

    #[test]
    fn countdown_breaks_into_units() {
        let target = 1_700_000_000_000;
        let remaining = ((2 * 86_400) + (3 * 3_600) + (4 * 60) + 5) * 1_000;
        let countdown = Countdown::between(target - remaining, target);
        assert_eq!(
            countdown,
            Countdown::Remaining {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
        assert_eq!(countdown.to_string(), "2d 3h 4m 5s");
        assert_eq!(
            Countdown::between(target - 3_600_000, target).to_string(),
            "1h 0m 0s"
        );
        assert_eq!(Countdown::between(target - 90_000, target).to_string(), "1m 30s");
    }

    #[test]
    fn countdown_never_goes_negative() {
        let target = 1_700_000_000_000;
        for now in [target, target + 1, target + 86_400_000] {
            let countdown = Countdown::between(now, target);
            assert!(countdown.is_live());
            assert_eq!(countdown.to_string(), config::COUNTDOWN_LIVE_MESSAGE);
        }
    }

    #[test]
    fn payload_with_number() {
        assert_eq!(parse_progress_payload(r#"{"miles": 24000}"#).unwrap(), 24_000.0);
        assert_eq!(
            parse_progress_payload(r#"{"miles": 1200.5, "updated": "2026-10-01"}"#).unwrap(),
            1_200.5
        );
    }

    #[test]
    fn payload_with_string_or_missing_miles() {
        assert_eq!(parse_progress_payload(r#"{"miles": "3100"}"#).unwrap(), 3_100.0);
        assert_eq!(parse_progress_payload(r#"{"miles": "n/a"}"#).unwrap(), 0.0);
        assert_eq!(parse_progress_payload(r#"{}"#).unwrap(), 0.0);
        assert_eq!(parse_progress_payload(r#"{"miles": [1]}"#).unwrap(), 0.0);
    }

    #[test]
    fn payload_with_boolean_miles() {
        assert_eq!(parse_progress_payload(r#"{"miles": true}"#).unwrap(), 1.0);
        assert_eq!(parse_progress_payload(r#"{"miles": false}"#).unwrap(), 0.0);
    }

    #[test]
    fn infinity_text_renders_as_zero() {
        let goal = Goal::default();
        for raw in ["inf", "infinity", "INF"] {
            let state = ProgressState::from_text(goal, raw);
            assert_eq!(state.current_miles(), 0);
            assert_eq!(state.percent_label(), "0.0%");
        }
        let miles = parse_progress_payload(r#"{"miles": "infinity"}"#).unwrap();
        let state = ProgressState::new(goal, miles);
        assert_eq!(state.current_miles(), 0);
        assert_eq!(state.percent_label(), "0.0%");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = parse_progress_payload("<html>404</html>").unwrap_err();
        assert!(matches!(err, ProgressError::Malformed(_)));
        assert!(err.to_string().starts_with("Malformed progress data"));
    }

    #[test]
    fn only_local_storage_is_editable() {
        assert!(!MilesSource::OfficialFile.is_editable());
        assert!(MilesSource::LocalStorage.is_editable());
    }
}
