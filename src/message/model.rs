//! The message record and its conversion to a document.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::document::document::Document;
use crate::error::{KazsearchError, Result};

/// Headline field.
pub const TITLE: &str = "title";
/// Message text field.
pub const BODY: &str = "body";
/// Space-joined region codes.
pub const REGION: &str = "region";
/// Creation time, epoch seconds (UTC).
pub const CREATION_DATE: &str = "creationDate";

/// Format of `creationDate` in the JSON input, e.g. `Feb 7, 2016 7:53:22 PM`.
pub const CREATION_DATE_FORMAT: &str = "%b %d, %Y %I:%M:%S %p";

/// A news message as it appears in the input JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub title: String,
    pub body: String,
    pub region: Vec<String>,
    pub creation_date: String,
}

impl Message {
    pub fn new<T, B, R, S, D>(title: T, body: B, region: R, creation_date: D) -> Self
    where
        T: Into<String>,
        B: Into<String>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
        D: Into<String>,
    {
        Message {
            title: title.into(),
            body: body.into(),
            region: region.into_iter().map(Into::into).collect(),
            creation_date: creation_date.into(),
        }
    }

    /// The creation date as epoch seconds.
    pub fn creation_timestamp(&self) -> Result<i64> {
        parse_creation_date(&self.creation_date)
    }

    /// Convert to a document.
    ///
    /// An unparsable creation date is stored as 0; the parse error is
    /// returned next to the document so the caller can report it.
    pub fn to_document(&self) -> (Document, Option<KazsearchError>) {
        let (timestamp, warning) = match self.creation_timestamp() {
            Ok(timestamp) => (timestamp, None),
            Err(e) => (0, Some(e)),
        };

        let document = Document::builder()
            .add_text(TITLE, self.title.as_str())
            .add_text(BODY, self.body.as_str())
            .add_text(REGION, self.region.join(" "))
            .add_integer(CREATION_DATE, timestamp)
            .build();

        (document, warning)
    }
}

/// Parse a `creationDate` string, read as UTC, into epoch seconds.
pub fn parse_creation_date(raw: &str) -> Result<i64> {
    NaiveDateTime::parse_from_str(raw.trim(), CREATION_DATE_FORMAT)
        .map(|date| date.and_utc().timestamp())
        .map_err(|e| KazsearchError::malformed_field(CREATION_DATE, raw, e.to_string()))
}

/// Decode messages from a JSON array or from JSON lines.
pub fn parse_messages(input: &str) -> Result<Vec<Message>> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(KazsearchError::from))
        .collect()
}

/// Read messages from a file; see [`parse_messages`].
pub fn load_messages<P: AsRef<Path>>(path: P) -> Result<Vec<Message>> {
    let input = fs::read_to_string(path)?;
    parse_messages(&input)
}
