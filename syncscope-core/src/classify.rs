//! Journal record classification
//!
//! Turns `journalctl -o json` output into [`ActivityEvent`]s using ordered
//! keyword rules. The rule tables are plain data so their precedence can be
//! read (and tested) top to bottom.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ClassifyError;
use crate::types::{ActivityEvent, Operation, OperationStatus};

/// Keyword sets and the operation they indicate, highest precedence first.
///
/// Shared with the statistics aggregator, which applies them non-exclusively.
pub const OPERATION_RULES: &[(&[&str], Operation)] = &[
    (&["Pushing", "push"], Operation::Push),
    (&["Pulling", "pull"], Operation::Pull),
    (&["Merged", "merge"], Operation::Merge),
    (&["Conflict", "conflict"], Operation::Conflict),
];

/// Keyword sets and the status they indicate, highest precedence first
pub const STATUS_RULES: &[(&[&str], OperationStatus)] = &[
    (&["error", "failed"], OperationStatus::Failed),
    (&["pending"], OperationStatus::Pending),
];

/// Repository name used when a message carries no `[name]` tag
pub const UNKNOWN_REPOSITORY: &str = "Unknown";

const MESSAGE_FIELD: &str = "MESSAGE";
const TIMESTAMP_FIELD: &str = "__REALTIME_TIMESTAMP";

static REPOSITORY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

/// What to report when no operation keyword matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedOperation {
    /// Historical behaviour: treat unmatched records as pulls
    #[default]
    Pull,
    /// Report [`Operation::Unknown`]
    Unknown,
}

impl UnmatchedOperation {
    fn operation(&self) -> Operation {
        match self {
            UnmatchedOperation::Pull => Operation::Pull,
            UnmatchedOperation::Unknown => Operation::Unknown,
        }
    }
}

/// Fields extracted from one journal record
#[derive(Debug, Clone, PartialEq)]
pub struct JournalRecord {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl JournalRecord {
    /// Parse one line of `journalctl -o json` output
    pub fn parse(line: &str) -> Result<Self, ClassifyError> {
        let value: Value = serde_json::from_str(line)?;
        let record = value.as_object().ok_or(ClassifyError::NotAnObject)?;

        let message = record.get(MESSAGE_FIELD).map(message_text).unwrap_or_default();
        let timestamp = record
            .get(TIMESTAMP_FIELD)
            .and_then(realtime_micros)
            .and_then(micros_to_instant)
            .ok_or(ClassifyError::MissingTimestamp)?;

        Ok(Self { message, timestamp })
    }
}

/// Keyword-based classifier for journal records
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    unmatched: UnmatchedOperation,
}

impl Classifier {
    pub fn new(unmatched: UnmatchedOperation) -> Self {
        Self { unmatched }
    }

    /// Classify raw `journalctl -o json` output.
    ///
    /// Blank lines are skipped and malformed records dropped. Output keeps
    /// input order; ids are assigned from the ordinal among kept records.
    pub fn classify(&self, raw: &str) -> Vec<ActivityEvent> {
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match JournalRecord::parse(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("Dropping journal line: {}", e);
                    None
                }
            })
            .enumerate()
            .map(|(index, record)| self.to_event(index, record))
            .collect()
    }

    /// Classify a single message's operation
    pub fn operation(&self, message: &str) -> Operation {
        OPERATION_RULES
            .iter()
            .find(|(keywords, _)| contains_any(message, keywords))
            .map(|(_, operation)| *operation)
            .unwrap_or_else(|| self.unmatched.operation())
    }

    fn to_event(&self, index: usize, record: JournalRecord) -> ActivityEvent {
        ActivityEvent {
            id: format!("log-{}", index),
            timestamp: record.timestamp,
            repository: repository_name(&record.message),
            operation: self.operation(&record.message),
            status: status(&record.message),
            details: record.message,
        }
    }
}

/// Classify raw journal output with the default classifier
pub fn classify(raw: &str) -> Vec<ActivityEvent> {
    Classifier::default().classify(raw)
}

/// Repository tag: the text inside the first non-empty `[...]`
pub fn repository_name(message: &str) -> String {
    REPOSITORY_TAG
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_REPOSITORY.to_string())
}

/// Classify a single message's status
pub fn status(message: &str) -> OperationStatus {
    STATUS_RULES
        .iter()
        .find(|(keywords, _)| contains_any(message, keywords))
        .map(|(_, status)| *status)
        .unwrap_or_default()
}

pub(crate) fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

// journald emits binary-safe messages as arrays of bytes
fn message_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let bytes: Vec<u8> = items
                .iter()
                .filter_map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect();
            String::from_utf8_lossy(&bytes).into_owned()
        }
        _ => String::new(),
    }
}

fn realtime_micros(value: &Value) -> Option<u64> {
    match value {
        Value::String(text) => text.trim().parse().ok(),
        Value::Number(number) => number.as_u64(),
        _ => None,
    }
}

fn micros_to_instant(micros: u64) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(micros / 1000).ok()?;
    DateTime::from_timestamp_millis(millis)
}
