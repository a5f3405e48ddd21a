use thiserror::Error;

/// Failures of the fallible helpers around error records.
///
/// Building a [`GraphQLError`](crate::GraphQLError) never fails; these
/// variants cover the inputs that have to be validated before one can be
/// built (source offsets, dotted paths, extension payloads).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("location offset must be 1-indexed, got line {line} column {column}")]
    InvalidLocationOffset { line: usize, column: usize },
    #[error(
        "location offset too large, got line {line} column {column} (max line {max_line}, max column {max_column})"
    )]
    LocationOffsetTooLarge {
        line: usize,
        column: usize,
        max_line: usize,
        max_column: usize,
    },
    #[error("invalid response path '{path}': {message}")]
    InvalidPath { path: String, message: String },
    #[error("failed to parse extensions: {0}")]
    InvalidExtensions(#[from] serde_json::Error),
    #[error("extensions must be a JSON object, got {0}")]
    ExtensionsNotAnObject(String),
}
