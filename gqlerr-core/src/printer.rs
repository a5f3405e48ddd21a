//! Render a location as a highlighted excerpt of its document.
//!
//! Output looks like:
//!
//! ```text
//! GraphQL request:2:3
//! 1 | {
//! 2 |   nope
//!   |   ^
//! 3 | }
//! ```

use crate::ast::Location;
use crate::source::{MAX_COLUMN_OFFSET, Source, SourceLocation, get_location, split_lines};

/// Lines longer than this are treated as minified and printed in chunks.
const MAX_LINE_WIDTH: usize = 120;
const CHUNK_WIDTH: usize = 80;

/// Print the excerpt for a node location.
pub fn print_location(location: &Location) -> String {
    print_source_location(
        &location.source,
        get_location(&location.source, location.start),
    )
}

/// Print the excerpt for an already resolved location in `source`.
///
/// Never panics: line numbers saturate, a column offset set directly on
/// the fields is capped like [`Source::with_location_offset`] caps it,
/// and the caret stops one past the end of the line.
pub fn print_source_location(source: &Source, location: SourceLocation) -> String {
    let first_line_column_offset = source
        .location_offset
        .column
        .min(MAX_COLUMN_OFFSET)
        .saturating_sub(1);
    let body = format!("{}{}", " ".repeat(first_line_column_offset), source.body);

    let line_index = location.line.saturating_sub(1);
    let line_offset = source.location_offset.line.saturating_sub(1);
    let line_num = location.line.saturating_add(line_offset);

    let column_offset = if location.line == 1 {
        first_line_column_offset
    } else {
        0
    };
    let column_num = location.column.saturating_add(column_offset);
    let header = format!("{}:{}:{}\n", source.name, line_num, column_num);

    let lines = split_lines(&body);
    let location_line = lines.get(line_index).copied().unwrap_or_default();

    if location_line.chars().count() > MAX_LINE_WIDTH {
        let sub_line_index = column_num / CHUNK_WIDTH;
        let sub_line_column_num = column_num % CHUNK_WIDTH;
        let sub_lines = chunk_chars(location_line, CHUNK_WIDTH);

        let mut rows = vec![(format!("{line_num} |"), sub_lines.first().cloned())];
        for sub_line in sub_lines.iter().take(sub_line_index.saturating_add(1)).skip(1) {
            rows.push(("|".to_string(), Some(sub_line.clone())));
        }
        rows.push(("|".to_string(), Some(caret(sub_line_column_num))));
        rows.push((
            "|".to_string(),
            sub_lines.get(sub_line_index.saturating_add(1)).cloned(),
        ));

        return header + &print_prefixed_lines(&rows);
    }

    let previous = line_index
        .checked_sub(1)
        .and_then(|index| lines.get(index))
        .map(|line| line.to_string());
    let next = lines.get(line_index.saturating_add(1)).map(|line| line.to_string());
    let caret_column = column_num.min(location_line.chars().count() + 1);

    let rows = [
        (format!("{} |", line_num.saturating_sub(1)), previous),
        (format!("{line_num} |"), lines.get(line_index).map(|line| line.to_string())),
        ("|".to_string(), Some(caret(caret_column))),
        (format!("{} |", line_num.saturating_add(1)), next),
    ];
    header + &print_prefixed_lines(&rows)
}

/// A caret in column `column` (1-based).
fn caret(column: usize) -> String {
    format!("{:>width$}", "^", width = column)
}

fn chunk_chars(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Right-align the gutters and join rows that exist. An empty line prints
/// only its gutter.
fn print_prefixed_lines(rows: &[(String, Option<String>)]) -> String {
    let existing: Vec<(&str, &str)> = rows
        .iter()
        .filter_map(|(prefix, line)| line.as_deref().map(|line| (prefix.as_str(), line)))
        .collect();
    let pad_len = existing
        .iter()
        .map(|(prefix, _)| prefix.len())
        .max()
        .unwrap_or(0);

    existing
        .iter()
        .map(|(prefix, line)| {
            if line.is_empty() {
                format!("{prefix:>pad_len$}")
            } else {
                format!("{prefix:>pad_len$} {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
