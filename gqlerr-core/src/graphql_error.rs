//! The error record reported in GraphQL responses.
//!
//! A [`GraphQLError`] is built once, when a failure is detected, from
//! whatever context the caller has at hand: AST nodes, a source document
//! with byte offsets, a response path, a lower-level cause, extension
//! data. Construction reconciles those inputs into one view and never
//! fails; missing or partial context simply leaves fields absent.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::ast::Node;
use crate::error::CoreError;
use crate::path::PathSegment;
use crate::printer::{print_location, print_source_location};
use crate::source::{Source, SourceLocation, get_location};
use crate::trace::Trace;

/// Protocol metadata attached to an error (`extensions` in the response).
pub type Extensions = serde_json::Map<String, Value>;

/// A lower-level failure that can be wrapped by a [`GraphQLError`].
///
/// Every method is optional; the defaults report nothing. A cause that
/// carries its own extensions or trace exposes them here so the wrapping
/// record can adopt them.
pub trait ErrorCause: Error + Send + Sync + 'static {
    fn extensions(&self) -> Option<&Extensions> {
        None
    }

    fn trace(&self) -> Option<&Trace> {
        None
    }

    /// Set when the cause is itself a GraphQL error record.
    fn as_graphql_error(&self) -> Option<&GraphQLError> {
        None
    }
}

impl ErrorCause for CoreError {}
impl ErrorCause for std::io::Error {}
impl ErrorCause for serde_json::Error {}

/// Adapter for arbitrary errors that know nothing about extensions.
#[derive(Debug)]
pub struct OpaqueCause(Box<dyn Error + Send + Sync>);

impl OpaqueCause {
    pub fn new(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        OpaqueCause(error.into())
    }
}

impl fmt::Display for OpaqueCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for OpaqueCause {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl ErrorCause for OpaqueCause {}

/// Nodes attached to an error: one node or a sequence of them.
#[derive(Debug, Clone)]
pub enum NodesInput {
    One(Node),
    Many(Vec<Node>),
}

impl From<Node> for NodesInput {
    fn from(node: Node) -> Self {
        NodesInput::One(node)
    }
}

impl From<Vec<Node>> for NodesInput {
    fn from(nodes: Vec<Node>) -> Self {
        NodesInput::Many(nodes)
    }
}

impl From<&[Node]> for NodesInput {
    fn from(nodes: &[Node]) -> Self {
        NodesInput::Many(nodes.to_vec())
    }
}

/// Optional context for [`GraphQLError::new`].
#[derive(Debug, Clone, Default)]
pub struct ErrorOptions {
    nodes: Option<NodesInput>,
    source: Option<Arc<Source>>,
    positions: Option<Vec<usize>>,
    path: Option<Vec<PathSegment>>,
    cause: Option<Arc<dyn ErrorCause>>,
    extensions: Option<Extensions>,
}

impl ErrorOptions {
    pub fn new() -> Self {
        ErrorOptions::default()
    }

    pub fn nodes(mut self, nodes: impl Into<NodesInput>) -> Self {
        self.nodes = Some(nodes.into());
        self
    }

    pub fn source(mut self, source: Arc<Source>) -> Self {
        self.source = Some(source);
        self
    }

    /// Byte offsets into the source document.
    pub fn positions(mut self, positions: impl Into<Vec<usize>>) -> Self {
        self.positions = Some(positions.into());
        self
    }

    pub fn path(mut self, path: impl Into<Vec<PathSegment>>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn cause(self, cause: impl ErrorCause) -> Self {
        self.shared_cause(Arc::new(cause))
    }

    pub fn shared_cause(mut self, cause: Arc<dyn ErrorCause>) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = Some(extensions);
        self
    }
}

/// A failure located in a document and/or a response.
#[derive(Clone)]
pub struct GraphQLError {
    message: String,
    nodes: Option<Vec<Node>>,
    source: Option<Arc<Source>>,
    positions: Option<Vec<usize>>,
    locations: Option<Vec<SourceLocation>>,
    path: Option<Vec<PathSegment>>,
    cause: Option<Arc<dyn ErrorCause>>,
    extensions: Extensions,
    trace: Trace,
}

impl GraphQLError {
    /// Build a record, normalizing the optional context.
    ///
    /// - an empty node sequence counts as no nodes;
    /// - without an explicit source, the first node's document is used
    ///   (if the first node is located);
    /// - without explicit positions, the start offsets of located nodes
    ///   are used;
    /// - explicit positions resolve against the explicit source when both
    ///   are given; otherwise each located node resolves against its own
    ///   document;
    /// - explicit extensions win over the cause's, which win over none;
    /// - the cause's trace is kept when it has one.
    pub fn new(message: impl Into<String>, options: ErrorOptions) -> Self {
        let message = message.into();
        let ErrorOptions {
            nodes,
            source,
            positions,
            path,
            cause,
            extensions,
        } = options;

        let nodes = match nodes {
            Some(NodesInput::One(node)) => Some(vec![node]),
            Some(NodesInput::Many(nodes)) if !nodes.is_empty() => Some(nodes),
            _ => None,
        };
        let node_locations = || nodes.iter().flatten().filter_map(|node| node.loc.as_ref());

        let locations = match (&positions, &source) {
            (Some(positions), Some(source)) => Some(
                positions
                    .iter()
                    .map(|&position| get_location(source, position))
                    .collect::<Vec<_>>(),
            ),
            _ if nodes.is_some() => Some(
                node_locations()
                    .map(|loc| get_location(&loc.source, loc.start))
                    .collect(),
            ),
            _ => None,
        }
        .filter(|locations| !locations.is_empty());

        let positions = positions
            .or_else(|| {
                nodes
                    .as_ref()
                    .map(|_| node_locations().map(|loc| loc.start).collect())
            })
            .filter(|positions| !positions.is_empty());

        let source = source.or_else(|| {
            nodes
                .as_ref()
                .and_then(|nodes| nodes.first())
                .and_then(|node| node.loc.as_ref())
                .map(|loc| Arc::clone(&loc.source))
        });

        let cause_extensions = cause.as_ref().and_then(|cause| cause.extensions());
        let adopted_extensions = extensions.is_none() && cause_extensions.is_some();
        let extensions = extensions
            .or_else(|| cause_extensions.cloned())
            .unwrap_or_default();

        let cause_trace = cause.as_ref().and_then(|cause| cause.trace()).cloned();
        let adopted_trace = cause_trace.is_some();
        let trace = cause_trace.unwrap_or_else(Trace::capture);

        tracing::trace!(
            error_message = %message,
            locations = locations.as_ref().map_or(0, Vec::len),
            has_path = path.is_some(),
            adopted_extensions,
            adopted_trace,
            "constructed GraphQL error"
        );

        GraphQLError {
            message,
            nodes,
            source,
            positions,
            locations,
            path,
            cause,
            extensions,
            trace,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn nodes(&self) -> Option<&[Node]> {
        self.nodes.as_deref()
    }

    /// The document the positions refer to.
    pub fn source_document(&self) -> Option<&Arc<Source>> {
        self.source.as_ref()
    }

    pub fn positions(&self) -> Option<&[usize]> {
        self.positions.as_deref()
    }

    pub fn locations(&self) -> Option<&[SourceLocation]> {
        self.locations.as_deref()
    }

    pub fn path(&self) -> Option<&[PathSegment]> {
        self.path.as_deref()
    }

    pub fn cause(&self) -> Option<&Arc<dyn ErrorCause>> {
        self.cause.as_ref()
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// The message followed by an excerpt for every known location.
    pub fn to_display_string(&self) -> String {
        let mut output = self.message.clone();

        if let Some(nodes) = &self.nodes {
            for loc in nodes.iter().filter_map(|node| node.loc.as_ref()) {
                output.push_str("\n\n");
                output.push_str(&print_location(loc));
            }
        } else if let (Some(source), Some(locations)) = (&self.source, &self.locations) {
            for &location in locations {
                output.push_str("\n\n");
                output.push_str(&print_source_location(source, location));
            }
        }

        output
    }

    /// The shape serialized into the `errors` list of a response.
    pub fn to_response_object(&self) -> ResponseError {
        ResponseError {
            message: self.message.clone(),
            locations: self.locations.clone(),
            path: self.path.clone(),
            extensions: (!self.extensions.is_empty()).then(|| self.extensions.clone()),
        }
    }
}

impl fmt::Debug for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphQLError")
            .field("message", &self.message)
            .field("locations", &self.locations)
            .field("path", &self.path)
            .field("extensions", &self.extensions)
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl Error for GraphQLError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|cause| cause as &(dyn Error + 'static))
    }
}

impl ErrorCause for GraphQLError {
    fn extensions(&self) -> Option<&Extensions> {
        Some(&self.extensions)
    }

    fn trace(&self) -> Option<&Trace> {
        Some(&self.trace)
    }

    fn as_graphql_error(&self) -> Option<&GraphQLError> {
        Some(self)
    }
}

impl Serialize for GraphQLError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_response_object().serialize(serializer)
    }
}

/// Wire form of an error. Fields serialize in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<SourceLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}

/// Parse a JSON object into an extensions map.
pub fn parse_extensions(json: &str) -> Result<Extensions, CoreError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::ExtensionsNotAnObject(json_kind(&other).to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
