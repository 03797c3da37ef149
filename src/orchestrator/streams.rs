//! Stream list loading
//!
//! One entry per line, either a bare location or `<id> <location>`:
//!
//! ```text
//! # lobby cameras
//! rtsp://10.0.0.11/stream1
//! rtsp://10.0.0.12/stream1
//!
//! dock synthetic://h264/25
//! ```
//!
//! Blank lines and `#` comments are skipped. Bare locations are named
//! `cam<index>`, where the index counts accepted entries from zero.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::registry::StreamId;

/// One configured stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSpec {
    /// Unique identifier
    pub id: StreamId,
    /// Source location handed to the collaborator
    pub location: String,
}

impl StreamSpec {
    pub fn new(id: impl Into<StreamId>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
        }
    }
}

/// Parse a newline-delimited stream list
pub fn parse_stream_list<R: BufRead>(reader: R) -> Result<Vec<StreamSpec>> {
    let mut specs = Vec::new();
    let mut seen = HashSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let spec = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(location), None, None) => StreamSpec::new(StreamId::indexed(specs.len()), location),
            (Some(id), Some(location), None) => StreamSpec::new(id, location),
            _ => {
                return Err(Error::InvalidStreamEntry {
                    line: index + 1,
                    reason: "expected '<location>' or '<id> <location>'".into(),
                });
            }
        };

        if !seen.insert(spec.id.clone()) {
            return Err(Error::DuplicateStream(spec.id));
        }
        specs.push(spec);
    }

    if specs.is_empty() {
        return Err(Error::NoStreams);
    }

    Ok(specs)
}

/// Load the stream list from a file, or stdin when `path` is `-`
pub fn load_stream_list(path: &Path) -> Result<Vec<StreamSpec>> {
    if path == Path::new("-") {
        return parse_stream_list(io::stdin().lock());
    }

    let file = File::open(path)?;
    let specs = parse_stream_list(BufReader::new(file))?;

    tracing::debug!(path = %path.display(), streams = specs.len(), "Loaded stream list");
    Ok(specs)
}
