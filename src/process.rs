//! Purpose: The pluggable processing step and the result document it produces.
//! Exports: `Processor`, `KeyListing`, `ResultDocument`, `Status`, `format_timestamp`.
//! Role: Pure mapping from a decoded input document to the record written to output.
//! Invariants: Processing never fails; any JSON value is accepted.
//! Invariants: Serialized key order is `status`, `inputKeys`, `processed`, `timestamp`.
use serde::Serialize;
use serde_json::Value;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument {
    pub status: Status,
    pub input_keys: Vec<String>,
    pub processed: bool,
    pub timestamp: String,
}

/// Extension point: swap in a different implementation to change what gets written.
pub trait Processor {
    fn process(&self, input: &Value) -> ResultDocument;
}

/// Lists the top-level keys of an object input; other JSON types yield no keys.
#[derive(Clone, Copy, Debug)]
pub struct KeyListing {
    clock: fn() -> OffsetDateTime,
}

impl KeyListing {
    pub fn new() -> Self {
        Self {
            clock: OffsetDateTime::now_utc,
        }
    }

    pub fn with_clock(clock: fn() -> OffsetDateTime) -> Self {
        Self { clock }
    }
}

impl Default for KeyListing {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for KeyListing {
    fn process(&self, input: &Value) -> ResultDocument {
        let input_keys = match input {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        };
        ResultDocument {
            status: Status::Success,
            input_keys,
            processed: true,
            // A static description over an `OffsetDateTime` always formats.
            timestamp: format_timestamp((self.clock)()).unwrap_or_default(),
        }
    }
}

/// Formats as `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC.
pub fn format_timestamp(ts: OffsetDateTime) -> Option<String> {
    ts.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT).ok()
}
