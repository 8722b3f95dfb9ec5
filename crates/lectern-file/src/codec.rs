//! Record codec: pretty-printed JSON blocks separated by delimiter
//! lines.
//!
//! Wire format: UTF-8 text; each record is a pretty-printed JSON block;
//! records are joined by a line containing exactly the delimiter token;
//! a non-empty file ends with a trailing delimiter line. Surrounding
//! whitespace is insignificant.

use serde::Serialize;
use serde::de::DeserializeOwned;

use lectern_core::Result;
use lectern_core::error::StoreError;

/// The literal separator token marking record boundaries.
pub const DELIMITER: &str = "---";

/// Serialize a record to its on-disk text block.
///
/// Pretty-printed on purpose: the backing file doubles as a
/// manual-inspection artifact and should stay human-diffable.
pub fn encode<R: Serialize>(record: &R) -> Result<String> {
    serde_json::to_string_pretty(record).map_err(|err| {
        StoreError::Encode {
            message: err.to_string(),
        }
        .into()
    })
}

/// Parse one text segment into a record.
///
/// Collection scans treat a failure here as a corrupt or foreign
/// segment and skip it; rewrites preserve the raw text instead.
pub fn decode<R: DeserializeOwned>(segment: &str) -> Result<R> {
    serde_json::from_str(segment.trim()).map_err(|err| {
        StoreError::Decode {
            message: err.to_string(),
        }
        .into()
    })
}

/// Split file contents into trimmed, non-empty record segments.
///
/// A segment ends at a line that trims to exactly [`DELIMITER`]. Matching
/// whole lines (rather than any `---` substring) means a delimiter-like
/// sequence inside a JSON string value cannot split a record.
pub fn split_segments(contents: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for line in contents.lines() {
        if line.trim() == DELIMITER {
            flush_segment(&mut segments, &mut current);
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    flush_segment(&mut segments, &mut current);

    segments
}

fn flush_segment(segments: &mut Vec<String>, current: &mut String) {
    let segment = current.trim();
    if !segment.is_empty() {
        segments.push(segment.to_string());
    }
    current.clear();
}

/// Join encoded segments back into full file contents, with a trailing
/// delimiter line when non-empty.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut contents = String::new();
    for segment in segments {
        contents.push_str(segment.as_ref());
        contents.push('\n');
        contents.push_str(DELIMITER);
        contents.push('\n');
    }
    contents
}

/// One appended entry: the encoded record followed by a delimiter line.
pub fn entry(encoded: &str) -> String {
    format!("{}\n{}\n", encoded, DELIMITER)
}
