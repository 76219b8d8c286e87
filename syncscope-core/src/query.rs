//! Query normalization
//!
//! Callers may send anything as query parameters. Nothing here rejects input:
//! every raw query is coerced into a [`LogQuery`] or [`StatsQuery`] that is
//! safe to hand to the journal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of journal records per log query
pub const DEFAULT_LINE_COUNT: u32 = 100;
/// Smallest accepted log query size
pub const MIN_LINE_COUNT: u32 = 1;
/// Largest accepted log query size
pub const MAX_LINE_COUNT: u32 = 1000;
/// Window used when no valid window was supplied
pub const DEFAULT_WINDOW: &str = "1d";

/// systemd time span: a positive count followed by a single unit
/// (`s`econds, `m`inutes, `h`ours, `d`ays, `w`eeks, `y`ears)
static WINDOW_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]{0,5}[smhdwy]$").unwrap());

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

/// A relative time window such as `"1d"` or `"12h"`.
///
/// Only constructible from a token that matches the duration grammar, so its
/// contents are always safe to pass on to `journalctl --since`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeWindow(String);

impl TimeWindow {
    /// Validate a duration token
    pub fn parse(token: &str) -> Option<Self> {
        if WINDOW_PATTERN.is_match(token) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render as a relative journal timestamp, e.g. `"1d ago"`
    pub fn to_since_arg(&self) -> String {
        format!("{} ago", self.0)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self(DEFAULT_WINDOW.to_string())
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TimeWindow {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeWindow::parse(&value).ok_or_else(|| format!("Invalid time window: {}", value))
    }
}

impl From<TimeWindow> for String {
    fn from(window: TimeWindow) -> Self {
        window.0
    }
}

/// Log query parameters exactly as received
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLogQuery {
    pub lines: Option<String>,
    #[serde(rename = "lineCount")]
    pub line_count: Option<String>,
    pub since: Option<String>,
}

/// Statistics query parameters exactly as received
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStatsQuery {
    #[serde(rename = "timeRange")]
    pub time_range: Option<String>,
}

/// Normalized log query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub line_count: u32,
    pub since: TimeWindow,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            line_count: DEFAULT_LINE_COUNT,
            since: TimeWindow::default(),
        }
    }
}

/// Normalized statistics query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub time_range: TimeWindow,
}

/// Coerce a raw log query into safe bounds.
///
/// Absent or non-numeric counts become [`DEFAULT_LINE_COUNT`]; numeric counts
/// are clamped to `[MIN_LINE_COUNT, MAX_LINE_COUNT]`. An unrecognised window
/// becomes [`DEFAULT_WINDOW`].
pub fn normalize_log_query(raw: &RawLogQuery) -> LogQuery {
    let requested = raw.lines.as_deref().or(raw.line_count.as_deref());

    LogQuery {
        line_count: normalize_line_count(requested),
        since: normalize_window(raw.since.as_deref()),
    }
}

/// Coerce a raw statistics query into a safe window
pub fn normalize_stats_query(raw: &RawStatsQuery) -> StatsQuery {
    StatsQuery {
        time_range: normalize_window(raw.time_range.as_deref()),
    }
}

fn normalize_line_count(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim) else {
        return DEFAULT_LINE_COUNT;
    };

    if !INTEGER_PATTERN.is_match(raw) {
        return DEFAULT_LINE_COUNT;
    }

    // Digits that overflow i64 still carry a sign worth honouring
    let value = raw
        .parse::<i64>()
        .unwrap_or(if raw.starts_with('-') { i64::MIN } else { i64::MAX });

    value.clamp(MIN_LINE_COUNT as i64, MAX_LINE_COUNT as i64) as u32
}

fn normalize_window(raw: Option<&str>) -> TimeWindow {
    match raw {
        Some(token) => TimeWindow::parse(token.trim()).unwrap_or_else(|| {
            tracing::debug!("Rejected time window {:?}, using {}", token, DEFAULT_WINDOW);
            TimeWindow::default()
        }),
        None => TimeWindow::default(),
    }
}
