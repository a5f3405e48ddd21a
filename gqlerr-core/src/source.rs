//! Source documents and offset resolution.
//!
//! Offsets handed around the crate are byte offsets into
//! [`Source::body`]. Resolved [`SourceLocation`]s are 1-based and count
//! columns in characters, so they match what an editor shows.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_SOURCE_NAME: &str = "GraphQL request";

/// Largest accepted location offsets. The column offset is printed as
/// padding, so it is kept small.
pub(crate) const MAX_LINE_OFFSET: usize = u32::MAX as usize;
pub(crate) const MAX_COLUMN_OFFSET: usize = u16::MAX as usize;

/// A resolved, human-readable position within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub const fn new(line: usize, column: usize) -> Self {
        SourceLocation { line, column }
    }
}

/// The text of a GraphQL document together with a display name.
///
/// `location_offset` is the position of the first character of `body`
/// inside a larger file (e.g. a query embedded in a host language). It
/// only affects how excerpts are printed, not how offsets resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub body: String,
    pub name: String,
    pub location_offset: SourceLocation,
}

impl Source {
    pub fn new(body: impl Into<String>) -> Self {
        Source {
            body: body.into(),
            name: DEFAULT_SOURCE_NAME.to_string(),
            location_offset: SourceLocation::new(1, 1),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set where the body starts inside its enclosing file.
    pub fn with_location_offset(mut self, offset: SourceLocation) -> Result<Self, CoreError> {
        if offset.line == 0 || offset.column == 0 {
            return Err(CoreError::InvalidLocationOffset {
                line: offset.line,
                column: offset.column,
            });
        }
        if offset.line > MAX_LINE_OFFSET || offset.column > MAX_COLUMN_OFFSET {
            return Err(CoreError::LocationOffsetTooLarge {
                line: offset.line,
                column: offset.column,
                max_line: MAX_LINE_OFFSET,
                max_column: MAX_COLUMN_OFFSET,
            });
        }
        self.location_offset = offset;
        Ok(self)
    }
}

/// Resolve a byte offset in `source` to a line and column.
///
/// `\r\n`, `\n` and `\r` all terminate a line. Offsets past the end of
/// the body resolve to the end; offsets inside a multi-byte character
/// resolve to that character. An offset between `\r` and `\n` resolves to
/// column 1 of the next line, never column 0.
pub fn get_location(source: &Source, position: usize) -> SourceLocation {
    let body = source.body.as_bytes();
    let position = position.min(body.len());

    let mut line = 1;
    let mut line_start = 0;
    let mut index = 0;
    while index < position {
        let terminator_len = match body[index] {
            b'\r' if body.get(index + 1) == Some(&b'\n') => 2,
            b'\r' | b'\n' => 1,
            _ => 0,
        };
        if terminator_len == 0 {
            index += 1;
            continue;
        }
        index += terminator_len;
        line_start = index;
        line += 1;
    }

    // A position between `\r` and `\n` already sits on the next line.
    let line_start = line_start.min(position);
    let column = source.body[line_start..]
        .char_indices()
        .take_while(|(i, ch)| line_start + i + ch.len_utf8() <= position)
        .count()
        + 1;

    SourceLocation { line, column }
}

/// Split a body on the same terminators `get_location` counts.
pub(crate) fn split_lines(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\r' if bytes.get(index + 1) == Some(&b'\n') => {
                lines.push(&body[start..index]);
                index += 2;
                start = index;
            }
            b'\r' | b'\n' => {
                lines.push(&body[start..index]);
                index += 1;
                start = index;
            }
            _ => index += 1,
        }
    }
    lines.push(&body[start..]);
    lines
}
