//! Response paths: where in the result tree a value (or failure) lives.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One step of a response path: a field key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Path built up while walking a response tree.
///
/// Each `push` returns a new path that shares its prefix with the parent,
/// so sibling fields and list items do not copy the segments above them.
/// Turn it into the wire form with [`ResponsePath::to_vec`] once an error
/// has to be reported.
#[derive(Debug, Clone, Default)]
pub struct ResponsePath {
    head: Option<Arc<PathLink>>,
}

#[derive(Debug)]
struct PathLink {
    prev: Option<Arc<PathLink>>,
    key: PathSegment,
}

impl ResponsePath {
    pub fn new() -> Self {
        ResponsePath::default()
    }

    pub fn push(&self, key: impl Into<PathSegment>) -> Self {
        ResponsePath {
            head: Some(Arc::new(PathLink {
                prev: self.head.clone(),
                key: key.into(),
            })),
        }
    }

    /// The last segment, if any.
    pub fn key(&self) -> Option<&PathSegment> {
        self.head.as_ref().map(|link| &link.key)
    }

    pub fn parent(&self) -> ResponsePath {
        ResponsePath {
            head: self.head.as_ref().and_then(|link| link.prev.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Segments from the root down to this path.
    pub fn to_vec(&self) -> Vec<PathSegment> {
        let mut segments = Vec::new();
        let mut current = self.head.as_deref();
        while let Some(link) = current {
            segments.push(link.key.clone());
            current = link.prev.as_deref();
        }
        segments.reverse();
        segments
    }
}

/// Parse a dotted path such as `user.0.name`.
///
/// Segments made only of ASCII digits become list indices.
pub fn parse_path(input: &str) -> Result<Vec<PathSegment>, CoreError> {
    if input.is_empty() {
        return Err(invalid_path(input, "path is empty"));
    }

    input
        .split('.')
        .map(|segment| {
            if segment.is_empty() {
                return Err(invalid_path(input, "empty segment"));
            }
            if segment.bytes().all(|b| b.is_ascii_digit()) {
                return segment
                    .parse::<usize>()
                    .map(PathSegment::Index)
                    .map_err(|_| invalid_path(input, "index out of range"));
            }
            Ok(PathSegment::Key(segment.to_string()))
        })
        .collect()
}

fn invalid_path(path: &str, message: &str) -> CoreError {
    CoreError::InvalidPath {
        path: path.to_string(),
        message: message.to_string(),
    }
}
